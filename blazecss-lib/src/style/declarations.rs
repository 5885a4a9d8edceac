use crate::value::Value;
use log::trace;

static ABSENT: Value = Value::EMPTY;

/// One `property: value` pair, e.g. "color" => "red".
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: Value,
}

/// The ordered declarations of one rule. Overwriting a property keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    entries: Vec<Declaration>,
}

impl Declarations {
    pub fn new() -> Self {
        Declarations {
            entries: Vec::new(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|decl| decl.property == name)
    }

    /// Inserts or overwrites `name`. Setting the empty value does nothing.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if value.is_empty() {
            trace!("ignoring empty value for `{}`", name);
            return;
        }
        match self.position(&name) {
            Some(index) => self.entries[index].value = value,
            None => self.entries.push(Declaration {
                property: name,
                value,
            }),
        }
    }

    /// Appends `value` to the existing entry using `separator`, or inserts
    /// it when `name` is absent.
    pub fn set_joined(&mut self, name: impl Into<String>, value: impl Into<Value>, separator: &str) {
        let name = name.into();
        let joined = self.get(&name).clone().join(separator, value);
        self.set(name, joined);
    }

    /// Never fails: an absent property yields [`Value::EMPTY`].
    pub fn get(&self, name: &str) -> &Value {
        match self.position(name) {
            Some(index) => &self.entries[index].value,
            None => &ABSENT,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.position(name)
            .map(|index| self.entries.remove(index).value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }

    /// Writes `shorthand` as the space-joined values of `names`, filling
    /// absent members with `default`. Nothing is written when none of
    /// `names` is present; longhands are kept either way.
    pub fn compact_to(&mut self, shorthand: &str, default: &str, names: &[&str]) {
        if !names.iter().any(|name| self.contains(name)) {
            return;
        }
        let mut compacted = Value::EMPTY;
        for name in names {
            let member = match self.get(name) {
                value if value.is_empty() => Value::of(default),
                value => value.clone(),
            };
            compacted = compacted.join(" ", member);
        }
        self.set(shorthand, compacted);
    }

    /// Replaces every property name with `rename(old)`; order and values
    /// are unchanged.
    pub fn rename<F>(&mut self, mut rename: F)
    where
        F: FnMut(&str) -> String,
    {
        for decl in &mut self.entries {
            decl.property = rename(&decl.property);
        }
    }

    /// Transforms the value of `name` when present.
    pub fn revalue<F>(&mut self, name: &str, revalue: F)
    where
        F: FnOnce(&Value) -> Value,
    {
        if let Some(index) = self.position(name) {
            let value = revalue(&self.entries[index].value);
            if value.is_empty() {
                self.entries.remove(index);
            } else {
                self.entries[index].value = value;
            }
        }
    }

    /// Overlays `other` on top of this set with [`Declarations::set`]
    /// semantics.
    pub fn merge(&mut self, other: &Declarations) {
        for decl in other.iter() {
            self.set(decl.property.clone(), decl.value.clone());
        }
    }
}
