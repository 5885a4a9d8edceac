//! BlazeCSS: nested style rules written in Rust, flattened into stylesheet
//! text.
//!
//! ```
//! use blazecss_lib::style::builder::value;
//! use blazecss_lib::style::selector::Selector;
//! use blazecss_lib::{Stylesheet, Style};
//!
//! let button = Style::new("button", || {
//!     value("color", "red")?;
//!     Selector::new().hover().declare(|| value("color", "blue"))
//! });
//! let css = Stylesheet::new().add(&button).to_css().unwrap();
//! assert_eq!(css, ".button {\n  color: red;\n}\n\n.button:hover {\n  color: blue;\n}\n");
//! ```

pub mod blaze_generate;
pub mod error;
pub mod format;
pub mod properties;
pub mod style;
pub mod value;

pub use blaze_generate::Stylesheet;
pub use error::{StyleError, StyleResult};
pub use format::{FormatOptions, Formatter};
pub use style::cache::{StyleParameter, ValuedStyle};
pub use style::selector::{attr, Selector};
pub use style::Style;
pub use value::{Numeric, Unit, Value, Vendor};
