//! Serializes rule trees into stylesheet text.

use crate::style::declarations::Declarations;
use crate::style::rule::{RuleRef, StyleRule};
use crate::value::Vendor;
use std::collections::BTreeSet;

/// Output settings, in the spirit of lightningcss' `PrinterOptions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Compact output with minimal whitespace.
    pub minify: bool,
    /// Spaces per indentation level in pretty output.
    pub indent: usize,
    /// Merge consecutive rules whose selector text is identical.
    pub merge_duplicates: bool,
    /// Vendors allowed to get prefixed lines. `None` allows all of them.
    pub targets: Option<BTreeSet<Vendor>>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            minify: false,
            indent: 2,
            merge_duplicates: true,
            targets: None,
        }
    }
}

/// A flattened rule ready to be written out.
struct Block {
    selector: String,
    declarations: Declarations,
}

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        Formatter { options }
    }

    pub fn pretty() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Formatter::new(FormatOptions {
            minify: true,
            ..FormatOptions::default()
        })
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats every root and its descendants, depth first.
    pub fn format_rules(&self, roots: &[RuleRef]) -> String {
        let mut blocks = Vec::new();
        for root in roots {
            flatten(&root.borrow(), &mut blocks);
        }
        self.write_blocks(blocks)
    }

    /// Formats one rule and its descendants.
    pub fn format_rule(&self, rule: &StyleRule) -> String {
        let mut blocks = Vec::new();
        flatten(rule, &mut blocks);
        self.write_blocks(blocks)
    }

    fn write_blocks(&self, blocks: Vec<Block>) -> String {
        let blocks = if self.options.merge_duplicates {
            merge_adjacent(blocks)
        } else {
            blocks
        };
        let rendered: Vec<String> = blocks.iter().map(|block| self.write_block(block)).collect();
        if self.options.minify {
            rendered.concat()
        } else {
            rendered.join("\n")
        }
    }

    fn vendors(&self, declarations: &Declarations) -> BTreeSet<Vendor> {
        let mut vendors = BTreeSet::new();
        for decl in declarations.iter() {
            vendors.extend(decl.value.vendors());
        }
        vendors.remove(&Vendor::Standard);
        if let Some(targets) = &self.options.targets {
            vendors.retain(|vendor| targets.contains(vendor));
        }
        vendors
    }

    /// Vendor lines come before the standard line of each property, and
    /// are skipped when they would repeat it.
    fn lines(&self, declarations: &Declarations) -> Vec<(String, String)> {
        let vendors = self.vendors(declarations);
        let mut lines = Vec::new();
        for decl in declarations.iter() {
            let standard = decl.value.format(self);
            for vendor in &vendors {
                let text = decl.value.format_for(*vendor, self);
                if text != standard {
                    lines.push((decl.property.clone(), text));
                }
            }
            lines.push((decl.property.clone(), standard));
        }
        lines
    }

    fn write_block(&self, block: &Block) -> String {
        let lines = self.lines(&block.declarations);
        if self.options.minify {
            let body: Vec<String> = lines
                .iter()
                .map(|(property, value)| format!("{}:{}", property, value))
                .collect();
            return format!("{}{{{}}}", block.selector, body.join(";"));
        }
        let indent = " ".repeat(self.options.indent);
        let mut out = format!("{} {{\n", block.selector);
        for (property, value) in &lines {
            out.push_str(&format!("{}{}: {};\n", indent, property, value));
        }
        out.push_str("}\n");
        out
    }
}

/// Collects rules with declarations in depth-first order. Rules without
/// declarations are skipped but their children are still visited.
fn flatten(rule: &StyleRule, blocks: &mut Vec<Block>) {
    if !rule.declarations.is_empty() {
        blocks.push(Block {
            selector: rule.selector_text(),
            declarations: rule.declarations.clone(),
        });
    }
    for child in &rule.children {
        flatten(&child.borrow(), blocks);
    }
}

fn merge_adjacent(blocks: Vec<Block>) -> Vec<Block> {
    let mut merged: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(last) if last.selector == block.selector => {
                last.declarations.merge(&block.declarations);
            }
            _ => merged.push(block),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::selector::Selector;
    use crate::value::{Numeric, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rule(compound: &str, declarations: &[(&str, Value)]) -> StyleRule {
        let mut rule = StyleRule::new(Selector::new().resolve(None, compound));
        for (property, value) in declarations {
            rule.declarations.set(*property, value.clone());
        }
        rule
    }

    fn child(parent: &mut StyleRule, child: StyleRule) {
        parent.children.push(Rc::new(RefCell::new(child)));
    }

    #[test]
    fn test_single_declaration() {
        let root = rule(".a", &[("color", Value::of("red"))]);
        assert_eq!(Formatter::pretty().format_rule(&root), ".a {\n  color: red;\n}\n");
        assert_eq!(Formatter::compact().format_rule(&root), ".a{color:red}");
    }

    #[test]
    fn test_vendor_lines_precede_standard_line() {
        let width = Numeric::percent(100.0) - Numeric::px(10.0);
        let root = rule(".a", &[("width", width.into()), ("color", Value::of("red"))]);
        assert_eq!(
            Formatter::pretty().format_rule(&root),
            ".a {\n  width: -webkit-calc(100% - 10px);\n  width: calc(100% - 10px);\n  color: red;\n}\n"
        );
    }

    #[test]
    fn test_targets_filter_vendor_lines() {
        let width = Numeric::percent(100.0) - Numeric::px(10.0);
        let root = rule(".a", &[("width", width.into())]);
        let formatter = Formatter::new(FormatOptions {
            targets: Some(BTreeSet::from([Vendor::Moz])),
            ..FormatOptions::default()
        });
        assert_eq!(formatter.format_rule(&root), ".a {\n  width: calc(100% - 10px);\n}\n");
    }

    #[test]
    fn test_empty_parent_still_emits_children() {
        let mut root = rule(".a", &[]);
        child(&mut root, rule(".a:hover", &[("color", Value::of("blue"))]));
        assert_eq!(
            Formatter::pretty().format_rule(&root),
            ".a:hover {\n  color: blue;\n}\n"
        );
    }

    #[test]
    fn test_blocks_are_separated_by_blank_line() {
        let mut root = rule(".a", &[("color", Value::of("red"))]);
        child(&mut root, rule(".a:hover", &[("color", Value::of("blue"))]));
        assert_eq!(
            Formatter::pretty().format_rule(&root),
            ".a {\n  color: red;\n}\n\n.a:hover {\n  color: blue;\n}\n"
        );
        assert_eq!(
            Formatter::compact().format_rule(&root),
            ".a{color:red}.a:hover{color:blue}"
        );
    }

    #[test]
    fn test_adjacent_identical_selectors_merge() {
        let mut root = rule(".a", &[("color", Value::of("red")), ("margin", Value::of("0"))]);
        child(&mut root, rule(".a", &[("color", Value::of("blue"))]));
        assert_eq!(
            Formatter::pretty().format_rule(&root),
            ".a {\n  color: blue;\n  margin: 0;\n}\n"
        );

        let unmerged = Formatter::new(FormatOptions {
            merge_duplicates: false,
            ..FormatOptions::default()
        });
        assert_eq!(
            unmerged.format_rule(&root),
            ".a {\n  color: red;\n  margin: 0;\n}\n\n.a {\n  color: blue;\n}\n"
        );
    }

    #[test]
    fn test_minify_drops_leading_zero() {
        let root = rule(".a", &[("opacity", Numeric::number(0.5).into())]);
        assert_eq!(Formatter::compact().format_rule(&root), ".a{opacity:.5}");
    }
}
