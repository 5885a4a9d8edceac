//! Style templates and the rule tree they evaluate into.

pub mod builder;
pub mod cache;
pub mod declarations;
pub mod rule;
pub mod selector;

use crate::error::{StyleError, StyleResult};
use selector::Selector;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_STYLE_ID: AtomicU64 = AtomicU64::new(0);

type Body = Box<dyn Fn() -> StyleResult<()> + Send + Sync>;

struct StyleTemplate {
    id: u64,
    /// Compound used for `$` when the style is evaluated at the root.
    compound: String,
    body: Option<Body>,
}

/// A unit of declarative style. Cloning shares the template; two styles
/// are equal only when they are the same template.
#[derive(Clone)]
pub struct Style {
    inner: Arc<StyleTemplate>,
}

impl Style {
    fn build(compound: String, body: Option<Body>) -> Self {
        Style {
            inner: Arc::new(StyleTemplate {
                id: NEXT_STYLE_ID.fetch_add(1, Ordering::Relaxed),
                compound,
                body,
            }),
        }
    }

    /// A class style: `Style::new("button", ..)` renders as `.button`.
    /// The name is not checked; see [`Style::try_new`].
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn() -> StyleResult<()> + Send + Sync + 'static,
    {
        Self::build(format!(".{}", name), Some(Box::new(body)))
    }

    /// Like [`Style::new`] but rejects names that cannot be a class.
    pub fn try_new<F>(name: impl Into<String>, body: F) -> StyleResult<Self>
    where
        F: Fn() -> StyleResult<()> + Send + Sync + 'static,
    {
        let name = name.into();
        validate_identifier(&name)?;
        Ok(Self::new(&name, body))
    }

    /// A style whose root compound is used verbatim, e.g. `h1` or `a.link`.
    pub fn raw<F>(compound: &str, body: F) -> Self
    where
        F: Fn() -> StyleResult<()> + Send + Sync + 'static,
    {
        Self::build(compound.to_string(), Some(Box::new(body)))
    }

    /// A style with a generated class, meant for nested blocks.
    pub fn anonymous<F>(body: F) -> Self
    where
        F: Fn() -> StyleResult<()> + Send + Sync + 'static,
    {
        let id = NEXT_STYLE_ID.fetch_add(1, Ordering::Relaxed);
        Style {
            inner: Arc::new(StyleTemplate {
                id,
                compound: format!(".style-{}", id),
                body: Some(Box::new(body)),
            }),
        }
    }

    /// The style that renders nothing and never takes part in a selector.
    pub fn none() -> Self {
        Self::build(String::new(), None)
    }

    pub fn is_none(&self) -> bool {
        self.inner.body.is_none()
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Own selector text, used for `$` at the root and by `with()`.
    pub fn compound(&self) -> String {
        self.inner.compound.clone()
    }

    pub fn ptr_eq(&self, other: &Style) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Evaluates this style as a rule nested in the current one (or as a
    /// root when nothing is being evaluated).
    pub fn apply(&self) -> StyleResult<()> {
        self.apply_to(Selector::new())
    }

    pub fn apply_to(&self, selector: Selector) -> StyleResult<()> {
        if self.is_none() {
            return Ok(());
        }
        builder::create(selector, self).map(|_| ())
    }

    pub(crate) fn evaluate(&self) -> StyleResult<()> {
        match &self.inner.body {
            Some(body) => body(),
            None => Ok(()),
        }
    }
}

fn validate_identifier(name: &str) -> StyleResult<()> {
    let reason = if name.is_empty() {
        Some("empty name")
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        Some("starts with a digit")
    } else if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        Some("only letters, digits, '-' and '_' are allowed")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(StyleError::InvalidIdentifier {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Style {}

impl Hash for Style {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("id", &self.inner.id)
            .field("compound", &self.inner.compound)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compounds() {
        assert_eq!(Style::new("button", || Ok(())).compound(), ".button");
        assert_eq!(Style::raw("h1", || Ok(())).compound(), "h1");
        assert!(Style::anonymous(|| Ok(())).compound().starts_with(".style-"));
        assert!(Style::none().is_none());
    }

    #[test]
    fn test_identity_equality() {
        let a = Style::new("a", || Ok(()));
        let b = Style::new("a", || Ok(()));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_try_new_rejects_bad_names() {
        assert!(Style::try_new("ok-name_1", || Ok(())).is_ok());
        for bad in ["", "1st", "two words", "a{b"] {
            let err = Style::try_new(bad, || Ok(())).unwrap_err();
            assert!(matches!(err, StyleError::InvalidIdentifier { .. }), "{}", bad);
        }
    }
}
