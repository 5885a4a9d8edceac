//! Value algebra: the closed set of values a declaration can hold and how
//! each one renders for a vendor.

mod numeric;

pub use numeric::{Numeric, Unit};

use crate::format::Formatter;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A rendering target. `Standard` is the unprefixed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Vendor {
    Standard,
    Webkit,
    Moz,
    Ms,
}

impl Vendor {
    pub const ALL: [Vendor; 4] = [Vendor::Standard, Vendor::Webkit, Vendor::Moz, Vendor::Ms];

    pub fn prefix(self) -> &'static str {
        match self {
            Vendor::Standard => "",
            Vendor::Webkit => "-webkit-",
            Vendor::Moz => "-moz-",
            Vendor::Ms => "-ms-",
        }
    }
}

/// Panic payload raised when an operation reaches [`Value::EMPTY`].
///
/// Empty only exists as a join identity and as the "absent" answer of a
/// declaration lookup; rendering or comparing it means a caller forgot an
/// existence check. The payload is raised with `std::panic::panic_any` so it
/// can be told apart from ordinary panics with `downcast_ref`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyValueDefect {
    pub operation: &'static str,
}

impl fmt::Display for EmptyValueDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "internal defect: `{}` reached the empty value", self.operation)
    }
}

fn defect(operation: &'static str) -> ! {
    std::panic::panic_any(EmptyValueDefect { operation })
}

#[derive(Debug, Clone)]
enum Repr {
    Empty,
    Literal(String),
    Numeric(Numeric),
    Joined {
        before: Box<Value>,
        after: Box<Value>,
        separator: String,
    },
    VendorFixed {
        vendor: Vendor,
        inner: Box<Value>,
    },
}

/// An immutable declaration value.
#[derive(Debug, Clone)]
pub struct Value(Repr);

impl Value {
    /// The join identity, also returned for absent declarations.
    pub const EMPTY: Value = Value(Repr::Empty);

    pub fn of(text: impl Into<String>) -> Self {
        Value(Repr::Literal(text.into()))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.0, Repr::Empty)
    }

    /// Joins `other` after this value. Empty on either side yields the
    /// other operand unchanged.
    pub fn join(self, separator: impl Into<String>, other: impl Into<Value>) -> Value {
        let other = other.into();
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Value(Repr::Joined {
            before: Box::new(self),
            after: Box::new(other),
            separator: separator.into(),
        })
    }

    /// Pins this value to one vendor's rendering, whatever line it is
    /// printed on.
    pub fn fix(self, vendor: Vendor) -> Value {
        if self.is_empty() {
            defect("fix");
        }
        Value(Repr::VendorFixed {
            vendor,
            inner: Box::new(self),
        })
    }

    /// Renders the value for one vendor. Pure: the same vendor always
    /// yields the same text.
    pub fn value_for(&self, vendor: Vendor) -> String {
        match &self.0 {
            Repr::Empty => defect("value_for"),
            Repr::Literal(text) => text.clone(),
            Repr::Numeric(numeric) => numeric.value_for(vendor),
            Repr::Joined {
                before,
                after,
                separator,
            } => format!(
                "{}{}{}",
                before.value_for(vendor),
                separator,
                after.value_for(vendor)
            ),
            Repr::VendorFixed { vendor: fixed, inner } => inner.value_for(*fixed),
        }
    }

    /// Non-standard vendors that need a rendering of their own.
    pub fn vendors(&self) -> BTreeSet<Vendor> {
        match &self.0 {
            Repr::Empty | Repr::Literal(_) | Repr::VendorFixed { .. } => BTreeSet::new(),
            Repr::Numeric(numeric) => numeric.vendors(),
            Repr::Joined { before, after, .. } => {
                let mut vendors = before.vendors();
                vendors.extend(after.vendors());
                vendors
            }
        }
    }

    /// Case-insensitive comparison against the standard rendering.
    pub fn matches(&self, text: &str) -> bool {
        self.value_for(Vendor::Standard).eq_ignore_ascii_case(text)
    }

    /// Standard rendering as the formatter wants it.
    pub fn format(&self, formatter: &Formatter) -> String {
        self.format_for(Vendor::Standard, formatter)
    }

    /// Vendor rendering as the formatter wants it.
    pub fn format_for(&self, vendor: Vendor, formatter: &Formatter) -> String {
        match &self.0 {
            Repr::Empty => defect("format"),
            Repr::Literal(text) => text.clone(),
            Repr::Numeric(numeric) => numeric.format_for(vendor, formatter.options().minify),
            Repr::Joined {
                before,
                after,
                separator,
            } => format!(
                "{}{}{}",
                before.format_for(vendor, formatter),
                separator,
                after.format_for(vendor, formatter)
            ),
            Repr::VendorFixed { vendor: fixed, inner } => inner.format_for(*fixed, formatter),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            defect("to_string");
        }
        f.write_str(&self.value_for(Vendor::Standard))
    }
}

impl Value {
    /// The value underneath any vendor pinning.
    fn unfixed(&self) -> &Value {
        match &self.0 {
            Repr::VendorFixed { inner, .. } => inner.unfixed(),
            _ => self,
        }
    }
}

/// Pinning a value to a vendor changes how it renders, not what it is:
/// `x.fix(vendor) == x`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (&self.unfixed().0, &other.unfixed().0) {
            (Repr::Empty, _) | (_, Repr::Empty) => defect("eq"),
            (Repr::Literal(left), Repr::Literal(right)) => left == right,
            (Repr::Numeric(left), Repr::Numeric(right)) => left == right,
            (
                Repr::Joined {
                    before: left_before,
                    after: left_after,
                    separator: left_separator,
                },
                Repr::Joined {
                    before: right_before,
                    after: right_after,
                    separator: right_separator,
                },
            ) => {
                left_separator == right_separator
                    && left_before == right_before
                    && left_after == right_after
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            Repr::Empty => defect("hash"),
            Repr::Literal(text) => text.hash(state),
            Repr::Numeric(numeric) => numeric.hash(state),
            Repr::Joined {
                before,
                after,
                separator,
            } => {
                before.hash(state);
                separator.hash(state);
                after.hash(state);
            }
            Repr::VendorFixed { inner, .. } => inner.hash(state),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::of(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::of(text)
    }
}

impl From<Numeric> for Value {
    fn from(numeric: Numeric) -> Self {
        Value(Repr::Numeric(numeric))
    }
}

impl From<f64> for Value {
    fn from(size: f64) -> Self {
        Numeric::number(size).into()
    }
}

impl From<i32> for Value {
    fn from(size: i32) -> Self {
        Numeric::number(f64::from(size)).into()
    }
}
