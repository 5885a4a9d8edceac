//! A thin property facade over the current rule's declarations.
//!
//! Only a handful of groups live here; everything goes through
//! [`builder::value`], [`builder::value_with`] and
//! [`builder::with_declarations`].

use crate::error::StyleResult;
use crate::style::builder::{self, value, value_with};
use crate::value::{Numeric, Value};

/// Box sides in shorthand order.
const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

pub fn color(color: impl Into<Value>) -> StyleResult<()> {
    value("color", color)
}

pub fn background_color(color: impl Into<Value>) -> StyleResult<()> {
    value("background-color", color)
}

pub fn display(display: impl Into<Value>) -> StyleResult<()> {
    value("display", display)
}

pub fn width(width: impl Into<Value>) -> StyleResult<()> {
    value("width", width)
}

pub fn height(height: impl Into<Value>) -> StyleResult<()> {
    value("height", height)
}

/// Rotation, normalized into `[0, 360)`.
pub fn rotate(degrees: f64) -> StyleResult<()> {
    let angle = Value::of("rotate(")
        .join("", Numeric::deg(degrees))
        .join("", ")");
    value("transform", angle)
}

/// Appends one transition to the comma-separated list.
pub fn transition(property: &str, duration: Numeric) -> StyleResult<()> {
    value_with("transition", Value::of(property).join(" ", duration), ", ")
}

/// A box-model group such as `margin` or `padding`, set side by side.
pub struct BoxSides {
    group: &'static str,
}

pub const MARGIN: BoxSides = BoxSides { group: "margin" };
pub const PADDING: BoxSides = BoxSides { group: "padding" };

impl BoxSides {
    fn side(&self, side: &str, size: impl Into<Value>) -> StyleResult<()> {
        value(&format!("{}-{}", self.group, side), size)
    }

    pub fn top(&self, size: impl Into<Value>) -> StyleResult<()> {
        self.side("top", size)
    }

    pub fn right(&self, size: impl Into<Value>) -> StyleResult<()> {
        self.side("right", size)
    }

    pub fn bottom(&self, size: impl Into<Value>) -> StyleResult<()> {
        self.side("bottom", size)
    }

    pub fn left(&self, size: impl Into<Value>) -> StyleResult<()> {
        self.side("left", size)
    }

    pub fn all(&self, size: impl Into<Value>) -> StyleResult<()> {
        let size = size.into();
        for side in SIDES {
            self.side(side, size.clone())?;
        }
        Ok(())
    }

    /// Folds the sides set so far into the shorthand, filling gaps with
    /// `0`, and drops the longhands.
    pub fn compact(&self) -> StyleResult<()> {
        let group = self.group;
        builder::with_declarations(group, |declarations| {
            let names: Vec<String> = SIDES
                .iter()
                .map(|side| format!("{}-{}", group, side))
                .collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            declarations.compact_to(group, "0", &names);
            if declarations.contains(group) {
                for name in names {
                    declarations.remove(name);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::builder::create;
    use crate::style::selector::Selector;
    use crate::style::Style;

    fn evaluate(style: &Style) -> Vec<(String, String)> {
        let rule = create(Selector::new(), style).unwrap();
        let rule = rule.borrow();
        rule.declarations
            .iter()
            .map(|decl| (decl.property.clone(), decl.value.to_string()))
            .collect()
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(property, value)| (property.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_margin_compaction() {
        let style = Style::new("card", || {
            MARGIN.top(Numeric::px(4.0))?;
            MARGIN.left(Numeric::px(8.0))?;
            MARGIN.compact()
        });
        assert_eq!(evaluate(&style), pairs(&[("margin", "4px 0 0 8px")]));
    }

    #[test]
    fn test_compact_without_sides_is_noop() {
        let style = Style::new("plain", || {
            color("red")?;
            PADDING.compact()
        });
        assert_eq!(evaluate(&style), pairs(&[("color", "red")]));
    }

    #[test]
    fn test_transitions_join() {
        let style = Style::new("fade", || {
            transition("opacity", Numeric::millis(200.0))?;
            transition("color", Numeric::seconds(1.5))
        });
        assert_eq!(
            evaluate(&style),
            pairs(&[("transition", "opacity 200ms, color 1.5s")])
        );
    }

    #[test]
    fn test_rotate_wraps_degrees() {
        let style = Style::new("spin", || rotate(-90.0));
        assert_eq!(evaluate(&style), pairs(&[("transform", "rotate(270deg)")]));
    }
}
