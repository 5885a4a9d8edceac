//! Builds the rule tree while style bodies run.
//!
//! The rule being evaluated lives in a thread-local slot, so property
//! setters called from a body reach it without any parameter threading.
//! Every push is paired with a [`SlotGuard`] that restores the previous
//! rule when dropped, on `Err` returns and on unwinding alike.

use crate::error::{StyleError, StyleResult};
use crate::style::declarations::Declarations;
use crate::style::rule::{RuleRef, StyleRule};
use crate::style::selector::Selector;
use crate::style::Style;
use crate::value::Value;
use log::{debug, trace, warn};
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static CURRENT: RefCell<Option<RuleRef>> = const { RefCell::new(None) };
}

/// Puts a rule (or nothing) in the slot and puts the previous occupant
/// back on drop.
struct SlotGuard {
    previous: Option<RuleRef>,
}

impl SlotGuard {
    fn enter(rule: Option<RuleRef>) -> Self {
        let previous = CURRENT.with(|slot| slot.replace(rule));
        SlotGuard { previous }
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// The rule currently being evaluated on this thread.
pub fn current() -> Option<RuleRef> {
    CURRENT.with(|slot| slot.borrow().clone())
}

/// Creates the rule for `template` under whatever rule is current,
/// evaluates the body with the new rule current, then attaches it to its
/// parent. Without a parent the rule is returned as a document root.
///
/// A failing body attaches nothing and its error is wrapped with the
/// selector of the rule being built.
pub fn create(selector: Selector, template: &Style) -> StyleResult<RuleRef> {
    let parent = current();
    let resolved = {
        let parent_rule = parent.as_ref().map(|rule| rule.borrow());
        selector.resolve(parent_rule.as_ref().map(|rule| &rule.selector), &template.compound())
    };
    let rule = Rc::new(RefCell::new(StyleRule::new(resolved)));
    debug!("evaluating `{}`", rule.borrow().selector_text());

    let result = {
        let _guard = SlotGuard::enter(Some(Rc::clone(&rule)));
        template.evaluate()
    };

    if let Err(source) = result {
        let selector = rule.borrow().selector_text();
        warn!("evaluation of `{}` failed: {}", selector, source);
        return Err(StyleError::Evaluation {
            selector,
            source: Box::new(source),
        });
    }

    if let Some(parent) = parent {
        trace!(
            "attaching `{}` under `{}`",
            rule.borrow().selector_text(),
            parent.borrow().selector_text()
        );
        parent.borrow_mut().children.push(Rc::clone(&rule));
    }
    Ok(rule)
}

/// Like [`create`] but ignores any rule already being evaluated, so the
/// result is always a document root.
pub fn create_root(selector: Selector, template: &Style) -> StyleResult<RuleRef> {
    let _guard = SlotGuard::enter(None);
    create(selector, template)
}

/// Runs `f` on the declarations of the current rule. `f` must not
/// evaluate styles itself.
pub fn with_declarations<F, R>(property: &str, f: F) -> StyleResult<R>
where
    F: FnOnce(&mut Declarations) -> R,
{
    match current() {
        Some(rule) => Ok(f(&mut rule.borrow_mut().declarations)),
        None => Err(StyleError::NoActiveRule {
            property: property.to_string(),
        }),
    }
}

/// Sets `name` on the current rule.
pub fn value(name: &str, value: impl Into<Value>) -> StyleResult<()> {
    let value = value.into();
    with_declarations(name, |declarations| declarations.set(name, value))
}

/// Joins `value` onto the current rule's `name` with `separator`.
pub fn value_with(name: &str, value: impl Into<Value>, separator: &str) -> StyleResult<()> {
    let value = value.into();
    with_declarations(name, |declarations| {
        declarations.set_joined(name, value, separator)
    })
}
