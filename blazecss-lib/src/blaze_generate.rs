use crate::error::StyleResult;
use crate::format::{FormatOptions, Formatter};
use crate::style::builder;
use crate::style::rule::RuleRef;
use crate::style::selector::Selector;
use crate::style::Style;
use log::info;

/// The root styles of one document, rendered together.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    styles: Vec<Style>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Stylesheet { styles: Vec::new() }
    }

    /// Adds a root style. The same style instance is only added once and
    /// [`Style::none`] is ignored.
    pub fn add(&mut self, style: &Style) -> &mut Self {
        if !style.is_none() && !self.styles.iter().any(|known| known.ptr_eq(style)) {
            self.styles.push(style.clone());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Evaluates every root style into a fresh rule tree.
    pub fn build(&self) -> StyleResult<Vec<RuleRef>> {
        self.styles
            .iter()
            .map(|style| builder::create_root(Selector::new(), style))
            .collect()
    }

    pub fn to_css(&self) -> StyleResult<String> {
        self.to_css_with(FormatOptions::default())
    }

    /// Renders the whole sheet, or fails without producing any text.
    pub fn to_css_with(&self, options: FormatOptions) -> StyleResult<String> {
        let roots = self.build()?;
        let css = Formatter::new(options).format_rules(&roots);
        info!(
            "generated {} root styles into {} bytes of css",
            roots.len(),
            css.len()
        );
        Ok(css)
    }
}

pub mod blaze_css {
    use super::*;

    pub fn generate(styles: &[&Style], options: FormatOptions) -> StyleResult<String> {
        let mut sheet = Stylesheet::new();
        for style in styles {
            sheet.add(style);
        }
        sheet.to_css_with(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StyleError;
    use crate::style::builder::value;

    #[test]
    fn test_single_root_single_line() {
        let red = Style::new("red", || value("color", "red"));
        let css = blaze_css::generate(&[&red], FormatOptions::default()).unwrap();
        assert_eq!(css, ".red {\n  color: red;\n}\n");
    }

    #[test]
    fn test_same_style_added_once() {
        let red = Style::new("red", || value("color", "red"));
        let mut sheet = Stylesheet::new();
        sheet.add(&red).add(&red.clone()).add(&Style::none());
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_failure_emits_nothing() {
        let good = Style::new("good", || value("color", "red"));
        let bad = Style::new("bad", || Err(StyleError::Other("nope".into())));
        let result = blaze_css::generate(&[&good, &bad], FormatOptions::default());
        assert!(result.is_err());
    }
}
