use crate::format::Formatter;
use crate::style::declarations::Declarations;
use crate::style::selector::Selector;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a rule while the tree is being built.
pub type RuleRef = Rc<RefCell<StyleRule>>;

/// One node of the rule tree: a resolved selector, its declarations and
/// the rules nested in it, in call order.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selector: Selector,
    pub declarations: Declarations,
    pub children: Vec<RuleRef>,
}

impl StyleRule {
    pub fn new(selector: Selector) -> Self {
        StyleRule {
            selector,
            declarations: Declarations::new(),
            children: Vec::new(),
        }
    }

    /// e.g. ".button:hover"
    pub fn selector_text(&self) -> String {
        self.selector.to_string()
    }

    /// Number of rules in this subtree, this one included.
    pub fn count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.borrow().count())
            .sum::<usize>()
    }
}

impl PartialEq for StyleRule {
    fn eq(&self, other: &Self) -> bool {
        self.selector_text() == other.selector_text()
    }
}

impl Eq for StyleRule {}

impl PartialOrd for StyleRule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StyleRule {
    fn cmp(&self, other: &Self) -> Ordering {
        self.selector_text().cmp(&other.selector_text())
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Formatter::pretty().format_rule(self))
    }
}
