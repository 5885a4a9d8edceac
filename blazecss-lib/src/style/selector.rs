use crate::error::{StyleError, StyleResult};
use crate::style::{builder, Style};
use log::warn;
use std::fmt;

/// ------------------------------
/// 1. Attribute Matchers
/// ------------------------------

/// Supported attribute selector operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOperator {
    /// [attr="value"]
    Exact,
    /// [attr~="value"]
    Includes,
    /// [attr^="value"]
    Prefix,
    /// [attr$="value"]
    Suffix,
    /// [attr*="value"]
    Substring,
    /// [attr|="value"]
    DashMatch,
}

impl AttributeOperator {
    fn symbol(self) -> &'static str {
        match self {
            AttributeOperator::Exact => "=",
            AttributeOperator::Includes => "~=",
            AttributeOperator::Prefix => "^=",
            AttributeOperator::Suffix => "$=",
            AttributeOperator::Substring => "*=",
            AttributeOperator::DashMatch => "|=",
        }
    }
}

/// Represents one attribute condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    /// None means only an existence check.
    pub operator: Option<(AttributeOperator, String)>,
    pub ignore_case: bool,
}

impl AttributeSelector {
    /// Adds the ` i` flag. Existence checks have no value to compare and
    /// ignore it.
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operator {
            None => write!(f, "[{}]", self.name),
            Some((operator, value)) => {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "[{}{}\"{}\"", self.name, operator.symbol(), escaped)?;
                if self.ignore_case {
                    f.write_str(" i")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Starts an attribute matcher: `attr("type").is("text")`.
pub fn attr(name: impl Into<String>) -> AttributeBuilder {
    AttributeBuilder { name: name.into() }
}

pub struct AttributeBuilder {
    name: String,
}

impl AttributeBuilder {
    fn compare(self, operator: AttributeOperator, value: impl Into<String>) -> AttributeSelector {
        AttributeSelector {
            name: self.name,
            operator: Some((operator, value.into())),
            ignore_case: false,
        }
    }

    pub fn exist(self) -> AttributeSelector {
        AttributeSelector {
            name: self.name,
            operator: None,
            ignore_case: false,
        }
    }

    pub fn is(self, value: impl Into<String>) -> AttributeSelector {
        self.compare(AttributeOperator::Exact, value)
    }

    pub fn contains_word(self, value: impl Into<String>) -> AttributeSelector {
        self.compare(AttributeOperator::Includes, value)
    }

    pub fn starts_with(self, value: impl Into<String>) -> AttributeSelector {
        self.compare(AttributeOperator::Prefix, value)
    }

    pub fn ends_with(self, value: impl Into<String>) -> AttributeSelector {
        self.compare(AttributeOperator::Suffix, value)
    }

    pub fn contains(self, value: impl Into<String>) -> AttributeSelector {
        self.compare(AttributeOperator::Substring, value)
    }

    pub fn starts_with_dash(self, value: impl Into<String>) -> AttributeSelector {
        self.compare(AttributeOperator::DashMatch, value)
    }
}

/// ------------------------------
/// 2. Compounds & Combinators
/// ------------------------------

/// Supported combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (a space).
    Descendant,
    /// Child combinator (`>`).
    Child,
    /// Adjacent sibling combinator (`+`).
    AdjacentSibling,
    /// General sibling combinator (`~`).
    GeneralSibling,
}

impl Combinator {
    fn symbol(self) -> &'static str {
        match self {
            Combinator::Descendant => " ",
            Combinator::Child => ">",
            Combinator::AdjacentSibling => "+",
            Combinator::GeneralSibling => "~",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Base {
    /// `$`: the rule's own compound, filled in at resolution.
    Own,
    /// `*`: another compound, filled by `with()` or left universal.
    Placeholder,
    Text(String),
}

/// A single selector term with its attribute, pseudo-class and
/// pseudo-element suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    base: Base,
    /// Compounds of other styles joined onto the base by `with()`.
    joined: Vec<String>,
    attributes: Vec<AttributeSelector>,
    pseudo_classes: Vec<String>,
    pseudo_element: Option<String>,
}

impl CompoundSelector {
    fn new(base: Base) -> Self {
        CompoundSelector {
            base,
            joined: Vec::new(),
            attributes: Vec::new(),
            pseudo_classes: Vec::new(),
            pseudo_element: None,
        }
    }

    pub fn pseudo_classes(&self) -> &[String] {
        &self.pseudo_classes
    }

    pub fn pseudo_element(&self) -> Option<&str> {
        self.pseudo_element.as_deref()
    }

    /// Seeds a child's own compound with this (parent) compound: the parent
    /// base is kept, parent suffixes come first and the child's
    /// pseudo-element wins when it has one.
    fn refined_by(&self, child: &CompoundSelector) -> CompoundSelector {
        let mut joined = self.joined.clone();
        joined.extend(child.joined.iter().cloned());
        let mut attributes = self.attributes.clone();
        attributes.extend(child.attributes.iter().cloned());
        let mut pseudo_classes = self.pseudo_classes.clone();
        pseudo_classes.extend(child.pseudo_classes.iter().cloned());
        CompoundSelector {
            base: self.base.clone(),
            joined,
            attributes,
            pseudo_classes,
            pseudo_element: child
                .pseudo_element
                .clone()
                .or_else(|| self.pseudo_element.clone()),
        }
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            Base::Own => f.write_str("$")?,
            Base::Placeholder => f.write_str("*")?,
            Base::Text(text) => f.write_str(text)?,
        }
        for compound in &self.joined {
            f.write_str(compound)?;
        }
        for attribute in &self.attributes {
            write!(f, "{}", attribute)?;
        }
        for pseudo in &self.pseudo_classes {
            write!(f, ":{}", pseudo)?;
        }
        if let Some(pseudo) = &self.pseudo_element {
            write!(f, "::{}", pseudo)?;
        }
        Ok(())
    }
}

/// ------------------------------
/// 3. Selector Composition
/// ------------------------------

/// A selector expression built around the rule's own compound.
///
/// Combinators add a compound next to the focused one and move the focus to
/// it; attribute and pseudo suffixes always apply to the focused compound.
/// A fresh selector is just `$`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<CompoundSelector>,
    /// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
    combinators: Vec<Combinator>,
    own: usize,
    focus: usize,
}

impl Default for Selector {
    fn default() -> Self {
        Selector::new()
    }
}

macro_rules! pseudo_classes {
    ($($method:ident => $name:literal),* $(,)?) => {
        $(
            pub fn $method(self) -> Self {
                self.pseudo_class($name)
            }
        )*
    };
}

macro_rules! pseudo_elements {
    ($($method:ident => $name:literal),* $(,)?) => {
        $(
            pub fn $method(self) -> Self {
                self.pseudo_element($name)
            }
        )*
    };
}

impl Selector {
    pub fn new() -> Self {
        Selector {
            compounds: vec![CompoundSelector::new(Base::Own)],
            combinators: Vec::new(),
            own: 0,
            focus: 0,
        }
    }

    fn insert_before(mut self, combinator: Combinator, base: Base) -> Self {
        let at = self.focus;
        self.compounds.insert(at, CompoundSelector::new(base));
        self.combinators.insert(at, combinator);
        if self.own >= at {
            self.own += 1;
        }
        self.focus = at;
        self
    }

    fn insert_after(mut self, combinator: Combinator, base: Base) -> Self {
        let at = self.focus;
        self.compounds.insert(at + 1, CompoundSelector::new(base));
        self.combinators.insert(at, combinator);
        if self.own > at {
            self.own += 1;
        }
        self.focus = at + 1;
        self
    }

    /// `*+$`
    pub fn prev(self) -> Self {
        self.insert_before(Combinator::AdjacentSibling, Base::Placeholder)
    }

    /// `$+*`
    pub fn next(self) -> Self {
        self.insert_after(Combinator::AdjacentSibling, Base::Placeholder)
    }

    /// `$>*`
    pub fn child(self) -> Self {
        self.insert_after(Combinator::Child, Base::Placeholder)
    }

    /// `*>$`
    pub fn parent(self) -> Self {
        self.insert_before(Combinator::Child, Base::Placeholder)
    }

    /// `$ *`
    pub fn descendant(self) -> Self {
        self.insert_after(Combinator::Descendant, Base::Placeholder)
    }

    /// `* $`
    pub fn ancestor(self) -> Self {
        self.insert_before(Combinator::Descendant, Base::Placeholder)
    }

    /// `*~$`
    pub fn prevs(self) -> Self {
        self.insert_before(Combinator::GeneralSibling, Base::Placeholder)
    }

    /// `$~*`
    pub fn nexts(self) -> Self {
        self.insert_after(Combinator::GeneralSibling, Base::Placeholder)
    }

    /// `$ <sub>`
    pub fn select(self, sub: impl Into<String>) -> Self {
        self.insert_after(Combinator::Descendant, Base::Text(sub.into()))
    }

    /// `$+<text>`
    pub fn next_to(self, text: impl Into<String>) -> Self {
        self.insert_after(Combinator::AdjacentSibling, Base::Text(text.into()))
    }

    /// `<text>+$`
    pub fn prev_to(self, text: impl Into<String>) -> Self {
        self.insert_before(Combinator::AdjacentSibling, Base::Text(text.into()))
    }

    /// `$~<text>`
    pub fn nexts_to(self, text: impl Into<String>) -> Self {
        self.insert_after(Combinator::GeneralSibling, Base::Text(text.into()))
    }

    /// `<text>~$`
    pub fn prevs_to(self, text: impl Into<String>) -> Self {
        self.insert_before(Combinator::GeneralSibling, Base::Text(text.into()))
    }

    /// `$><text>`
    pub fn child_to(self, text: impl Into<String>) -> Self {
        self.insert_after(Combinator::Child, Base::Text(text.into()))
    }

    /// `<text>>$`
    pub fn parent_to(self, text: impl Into<String>) -> Self {
        self.insert_before(Combinator::Child, Base::Text(text.into()))
    }

    /// `<text> $`
    pub fn ancestor_to(self, text: impl Into<String>) -> Self {
        self.insert_before(Combinator::Descendant, Base::Text(text.into()))
    }

    /// Composes the own compound of `style` into the focused compound. A
    /// focused placeholder is replaced; anything else gets the compound
    /// joined right after its base, ahead of its suffixes.
    pub fn with(mut self, style: &Style) -> Self {
        if style.is_none() {
            return self;
        }
        let focused = &mut self.compounds[self.focus];
        if focused.base == Base::Placeholder {
            focused.base = Base::Text(style.compound());
        } else {
            focused.joined.push(style.compound());
        }
        self
    }

    pub fn attribute(mut self, attribute: AttributeSelector) -> Self {
        self.compounds[self.focus].attributes.push(attribute);
        self
    }

    pub fn pseudo_class(mut self, name: impl Into<String>) -> Self {
        self.compounds[self.focus].pseudo_classes.push(name.into());
        self
    }

    /// Sets the single pseudo-element of the focused compound, replacing
    /// any earlier one.
    pub fn pseudo_element(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let compound = &mut self.compounds[self.focus];
        if let Some(previous) = compound.pseudo_element.replace(name.clone()) {
            warn!("pseudo-element `{}` replaced by `{}`", previous, name);
        }
        self
    }

    pseudo_classes! {
        hover => "hover",
        focus => "focus",
        focus_within => "focus-within",
        focus_visible => "focus-visible",
        active => "active",
        visited => "visited",
        link => "link",
        checked => "checked",
        disabled => "disabled",
        enabled => "enabled",
        required => "required",
        optional => "optional",
        invalid => "invalid",
        valid => "valid",
        empty => "empty",
        first_child => "first-child",
        last_child => "last-child",
        only_child => "only-child",
        first_of_type => "first-of-type",
        last_of_type => "last-of-type",
        only_of_type => "only-of-type",
    }

    pub fn nth_child(self, expression: &str) -> Self {
        self.pseudo_class(format!("nth-child({})", expression))
    }

    pub fn nth_of_type(self, expression: &str) -> Self {
        self.pseudo_class(format!("nth-of-type({})", expression))
    }

    pub fn not(self, sub: &str) -> Self {
        self.pseudo_class(format!("not({})", sub))
    }

    pseudo_elements! {
        before => "before",
        after => "after",
        placeholder => "placeholder",
        selection => "selection",
        first_line => "first-line",
        first_letter => "first-letter",
        marker => "marker",
    }

    pub fn own_compound(&self) -> &CompoundSelector {
        &self.compounds[self.own]
    }

    /// True once `$` has been replaced by real selector text.
    pub fn is_resolved(&self) -> bool {
        self.own_compound().base != Base::Own
    }

    /// Resolves `$` for a new rule. Under a parent rule the parent's own
    /// compound is refined and the parent's combinators wrap this
    /// selector's; at the root `$` becomes `identity`.
    pub fn resolve(&self, parent: Option<&Selector>, identity: &str) -> Selector {
        let parent = match parent {
            Some(parent) => parent,
            None => {
                let mut resolved = self.clone();
                if resolved.compounds[resolved.own].base == Base::Own {
                    resolved.compounds[resolved.own].base = Base::Text(identity.to_string());
                }
                resolved.focus = resolved.own;
                return resolved;
            }
        };

        let merged = parent.own_compound().refined_by(self.own_compound());
        let mut compounds = Vec::with_capacity(parent.compounds.len() + self.compounds.len() - 1);
        compounds.extend(parent.compounds[..parent.own].iter().cloned());
        compounds.extend(self.compounds[..self.own].iter().cloned());
        let own = compounds.len();
        compounds.push(merged);
        compounds.extend(self.compounds[self.own + 1..].iter().cloned());
        compounds.extend(parent.compounds[parent.own + 1..].iter().cloned());

        let mut combinators = Vec::with_capacity(compounds.len() - 1);
        combinators.extend_from_slice(&parent.combinators[..parent.own]);
        combinators.extend_from_slice(&self.combinators);
        combinators.extend_from_slice(&parent.combinators[parent.own..]);

        Selector {
            compounds,
            combinators,
            own,
            focus: own,
        }
    }

    /// Evaluates `body` as a nested rule under this selector. Only valid
    /// while another style is being evaluated.
    pub fn declare<F>(self, body: F) -> StyleResult<()>
    where
        F: Fn() -> StyleResult<()> + Send + Sync + 'static,
    {
        if builder::current().is_none() {
            return Err(StyleError::NoActiveRule {
                property: self.to_string(),
            });
        }
        builder::create(self, &Style::anonymous(body)).map(|_| ())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, compound) in self.compounds.iter().enumerate() {
            if index > 0 {
                f.write_str(self.combinators[index - 1].symbol())?;
            }
            write!(f, "{}", compound)?;
        }
        Ok(())
    }
}
