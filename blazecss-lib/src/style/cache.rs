//! Per-parameter style derivation.
//!
//! A [`ValuedStyle`] is a style template with one argument. Each distinct
//! argument is turned into exactly one [`Style`], which is then handed out
//! for every later equal argument, so callers can deduplicate styles by
//! identity.

use crate::error::{StyleError, StyleResult};
use crate::style::Style;
use crate::value::Numeric;
use log::debug;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A value a [`ValuedStyle`] can be keyed by. Equality and hashing are the
/// cache key; there is no identity fallback.
pub trait StyleParameter: Eq + Hash + Clone + Send + Sync + 'static {
    /// Marker values produce [`Style::none`] and are never cached.
    fn is_empty_marker(&self) -> bool {
        false
    }
}

impl<T: StyleParameter> StyleParameter for Option<T> {
    fn is_empty_marker(&self) -> bool {
        self.is_none()
    }
}

impl StyleParameter for bool {}
impl StyleParameter for char {}
impl StyleParameter for i32 {}
impl StyleParameter for i64 {}
impl StyleParameter for u32 {}
impl StyleParameter for u64 {}
impl StyleParameter for usize {}
impl StyleParameter for String {}
impl StyleParameter for &'static str {}

/// `NaN` sizes never equal themselves, so they cannot key the cache.
impl StyleParameter for Numeric {
    fn is_empty_marker(&self) -> bool {
        self.size().is_nan()
    }
}

impl<A: StyleParameter, B: StyleParameter> StyleParameter for (A, B) {}

type ValuedBody<P> = Arc<dyn Fn(&P) -> StyleResult<()> + Send + Sync>;

/// A style template parameterized by `P`, with its derived styles cached
/// for the life of the template.
pub struct ValuedStyle<P: StyleParameter> {
    name: String,
    body: ValuedBody<P>,
    derived: Mutex<HashMap<P, Style>>,
}

impl<P: StyleParameter> ValuedStyle<P> {
    /// Derived styles are classes named `<name>-<n>`, `n` counting distinct
    /// parameters in request order.
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&P) -> StyleResult<()> + Send + Sync + 'static,
    {
        ValuedStyle {
            name: name.to_string(),
            body: Arc::new(body),
            derived: Mutex::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The style for `parameter`. Equal parameters always get the same
    /// instance; the lock is held while deriving so racing callers cannot
    /// build two. A failed derivation stores nothing.
    pub fn of(&self, parameter: P) -> StyleResult<Style> {
        if parameter.is_empty_marker() {
            return Ok(Style::none());
        }
        let mut derived = self
            .derived
            .lock()
            .map_err(|_| StyleError::CachePoisoned {
                template: self.name.clone(),
            })?;
        if let Some(style) = derived.get(&parameter) {
            return Ok(style.clone());
        }
        let style = self.derive(&parameter, derived.len())?;
        debug!("derived `{}` from `{}`", style.compound(), self.name);
        derived.insert(parameter, style.clone());
        Ok(style)
    }

    fn derive(&self, parameter: &P, ordinal: usize) -> StyleResult<Style> {
        let body = Arc::clone(&self.body);
        let parameter = parameter.clone();
        Style::try_new(format!("{}-{}", self.name, ordinal), move || body(&parameter))
    }

    /// Read access for inspection. A poisoned map is still consistent, since
    /// entries are only inserted once fully derived.
    fn snapshot(&self) -> MutexGuard<'_, HashMap<P, Style>> {
        self.derived.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every style derived so far, in derivation order.
    pub fn members(&self) -> Vec<Style> {
        let mut members: Vec<Style> = self.snapshot().values().cloned().collect();
        members.sort_by_key(Style::id);
        members
    }

    /// Number of derived styles cached so far.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
