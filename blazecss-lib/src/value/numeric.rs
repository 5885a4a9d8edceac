use super::Vendor;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

/// Units a numeric value can carry. `Number` is the unitless case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Number,
    Px,
    Em,
    Rem,
    Ex,
    Ch,
    Percent,
    Vw,
    Vh,
    Vmin,
    Vmax,
    Cm,
    Mm,
    In,
    Pt,
    Pc,
    Deg,
    Turn,
    S,
    Ms,
    Fr,
}

impl Unit {
    /// The text appended after the magnitude.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Number => "",
            Unit::Px => "px",
            Unit::Em => "em",
            Unit::Rem => "rem",
            Unit::Ex => "ex",
            Unit::Ch => "ch",
            Unit::Percent => "%",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Vmin => "vmin",
            Unit::Vmax => "vmax",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::In => "in",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
            Unit::Deg => "deg",
            Unit::Turn => "turn",
            Unit::S => "s",
            Unit::Ms => "ms",
            Unit::Fr => "fr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
        }
    }

    fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Op::Add => left + right,
            Op::Sub => left - right,
            Op::Mul => left * right,
            Op::Div => left / right,
        }
    }
}

/// A magnitude with a unit, or a `calc()` expression when two operands
/// could not be combined numerically.
#[derive(Debug, Clone)]
pub struct Numeric {
    size: f64,
    unit: Unit,
    /// Body of a `calc()` expression, without the function name.
    expression: Option<Arc<str>>,
}

impl Numeric {
    /// Degree magnitudes are normalized into `[0, 360)`.
    pub fn new(size: f64, unit: Unit) -> Self {
        let size = if unit == Unit::Deg {
            // Tiny negative angles round up to exactly 360.0.
            let wrapped = size.rem_euclid(360.0);
            if wrapped >= 360.0 {
                0.0
            } else {
                wrapped
            }
        } else {
            size
        };
        Numeric {
            size,
            unit,
            expression: None,
        }
    }

    pub fn number(size: f64) -> Self {
        Self::new(size, Unit::Number)
    }

    pub fn px(size: f64) -> Self {
        Self::new(size, Unit::Px)
    }

    pub fn em(size: f64) -> Self {
        Self::new(size, Unit::Em)
    }

    pub fn rem(size: f64) -> Self {
        Self::new(size, Unit::Rem)
    }

    pub fn percent(size: f64) -> Self {
        Self::new(size, Unit::Percent)
    }

    pub fn deg(size: f64) -> Self {
        Self::new(size, Unit::Deg)
    }

    pub fn seconds(size: f64) -> Self {
        Self::new(size, Unit::S)
    }

    pub fn millis(size: f64) -> Self {
        Self::new(size, Unit::Ms)
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// True when this value is a `calc()` expression.
    pub fn is_calc(&self) -> bool {
        self.expression.is_some()
    }

    /// Vendors that need their own rendering of this value.
    pub fn vendors(&self) -> BTreeSet<Vendor> {
        let mut vendors = BTreeSet::new();
        if self.is_calc() {
            vendors.insert(Vendor::Webkit);
        }
        vendors
    }

    /// Renders this value for a vendor. Only `calc()` expressions differ
    /// between vendors: webkit gets `-webkit-calc(...)`.
    pub fn value_for(&self, vendor: Vendor) -> String {
        match &self.expression {
            Some(expression) if vendor == Vendor::Webkit => {
                format!("{}calc({})", vendor.prefix(), expression)
            }
            Some(expression) => format!("calc({})", expression),
            None => render_size(self.size, self.unit),
        }
    }

    /// Same as [`Numeric::value_for`] but drops the leading zero of
    /// fractional magnitudes when minifying.
    pub(crate) fn format_for(&self, vendor: Vendor, minify: bool) -> String {
        let text = self.value_for(vendor);
        if !minify || self.is_calc() {
            return text;
        }
        if let Some(rest) = text.strip_prefix("0.") {
            format!(".{}", rest)
        } else if let Some(rest) = text.strip_prefix("-0.") {
            format!("-.{}", rest)
        } else {
            text
        }
    }

    /// Operand text inside a `calc()` body.
    fn term(&self) -> String {
        match &self.expression {
            Some(expression) => format!("({})", expression),
            None => render_size(self.size, self.unit),
        }
    }

    fn calc(left: &Numeric, op: Op, right: &Numeric) -> Numeric {
        let expression = format!("{} {} {}", left.term(), op.symbol(), right.term());
        Numeric {
            size: 0.0,
            unit: left.unit,
            expression: Some(Arc::from(expression)),
        }
    }

    fn combine(self, op: Op, rhs: Numeric) -> Numeric {
        if self.is_calc() || rhs.is_calc() {
            return Self::calc(&self, op, &rhs);
        }
        if op == Op::Div && rhs.size == 0.0 {
            return Self::calc(&self, op, &rhs);
        }
        if self.unit == rhs.unit {
            return Numeric::new(op.apply(self.size, rhs.size), self.unit);
        }
        // Scaling by a unitless number keeps the other operand's unit.
        match op {
            Op::Mul | Op::Div if rhs.unit == Unit::Number => {
                Numeric::new(op.apply(self.size, rhs.size), self.unit)
            }
            Op::Mul if self.unit == Unit::Number => {
                Numeric::new(op.apply(self.size, rhs.size), rhs.unit)
            }
            _ => Self::calc(&self, op, &rhs),
        }
    }
}

fn render_size(size: f64, unit: Unit) -> String {
    if size == 0.0 {
        return "0".to_string();
    }
    if size.fract() == 0.0 && size.abs() < 1e15 {
        format!("{}{}", size as i64, unit.suffix())
    } else {
        format!("{}{}", size, unit.suffix())
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value_for(Vendor::Standard))
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        match (&self.expression, &other.expression) {
            (Some(left), Some(right)) => left == right,
            (None, None) => self.unit == other.unit && self.size == other.size,
            _ => false,
        }
    }
}

impl Eq for Numeric {}

impl Hash for Numeric {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.expression {
            Some(expression) => expression.hash(state),
            None => {
                self.unit.hash(state);
                // 0.0 and -0.0 compare equal, so they must hash alike.
                let size = if self.size == 0.0 { 0.0 } else { self.size };
                size.to_bits().hash(state);
            }
        }
    }
}

impl Add for Numeric {
    type Output = Numeric;

    fn add(self, rhs: Numeric) -> Numeric {
        self.combine(Op::Add, rhs)
    }
}

impl Sub for Numeric {
    type Output = Numeric;

    fn sub(self, rhs: Numeric) -> Numeric {
        self.combine(Op::Sub, rhs)
    }
}

impl Mul for Numeric {
    type Output = Numeric;

    fn mul(self, rhs: Numeric) -> Numeric {
        self.combine(Op::Mul, rhs)
    }
}

impl Div for Numeric {
    type Output = Numeric;

    fn div(self, rhs: Numeric) -> Numeric {
        self.combine(Op::Div, rhs)
    }
}

impl Mul<f64> for Numeric {
    type Output = Numeric;

    fn mul(self, rhs: f64) -> Numeric {
        self.combine(Op::Mul, Numeric::number(rhs))
    }
}

impl Div<f64> for Numeric {
    type Output = Numeric;

    fn div(self, rhs: f64) -> Numeric {
        self.combine(Op::Div, Numeric::number(rhs))
    }
}

impl Neg for Numeric {
    type Output = Numeric;

    fn neg(self) -> Numeric {
        if self.is_calc() {
            return Numeric::calc(&Numeric::number(-1.0), Op::Mul, &self);
        }
        Numeric::new(-self.size, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_wraps_into_circle() {
        assert_eq!(Numeric::deg(-100.0).size(), 260.0);
        assert_eq!(Numeric::deg(400.0).size(), 40.0);
        assert_eq!(Numeric::deg(0.0).size(), 0.0);
        assert_eq!(Numeric::deg(359.5).size(), 359.5);
        assert_eq!(Numeric::deg(360.0).size(), 0.0);
        assert_eq!(Numeric::deg(-800.0).size(), 280.0);
        assert_eq!(Numeric::deg(-1e-14).size(), 0.0);
        assert_eq!(Numeric::deg(-1e-14).to_string(), "0");
    }

    #[test]
    fn test_rendering() {
        assert_eq!(Numeric::px(0.0).to_string(), "0");
        assert_eq!(Numeric::px(-0.0).to_string(), "0");
        assert_eq!(Numeric::px(10.0).to_string(), "10px");
        assert_eq!(Numeric::em(1.25).to_string(), "1.25em");
        assert_eq!(Numeric::percent(50.0).to_string(), "50%");
        assert_eq!(Numeric::number(3.0).to_string(), "3");
        assert_eq!(Numeric::px(-4.0).to_string(), "-4px");
    }

    #[test]
    fn test_same_unit_arithmetic() {
        assert_eq!((Numeric::px(10.0) + Numeric::px(5.0)).to_string(), "15px");
        assert_eq!((Numeric::px(10.0) - Numeric::px(15.0)).to_string(), "-5px");
        assert_eq!((Numeric::em(2.0) * Numeric::em(3.0)).to_string(), "6em");
        assert_eq!((Numeric::em(3.0) / Numeric::em(2.0)).to_string(), "1.5em");
        assert_eq!((-Numeric::px(3.0)).to_string(), "-3px");
        assert_eq!((Numeric::deg(350.0) + Numeric::deg(20.0)).to_string(), "10deg");
    }

    #[test]
    fn test_cross_unit_arithmetic_becomes_calc() {
        let sum = Numeric::px(10.0) + Numeric::em(1.0);
        assert_eq!(sum.to_string(), "calc(10px + 1em)");
        assert_eq!(sum.value_for(Vendor::Webkit), "-webkit-calc(10px + 1em)");
        assert!(sum.vendors().contains(&Vendor::Webkit));

        assert_eq!((Numeric::px(10.0) - Numeric::em(1.0)).to_string(), "calc(10px - 1em)");
        assert_eq!((Numeric::px(10.0) * Numeric::em(1.0)).to_string(), "calc(10px * 1em)");
        assert_eq!((Numeric::px(10.0) / Numeric::em(1.0)).to_string(), "calc(10px / 1em)");
    }

    #[test]
    fn test_scaling_and_nested_calc() {
        assert_eq!((Numeric::px(10.0) * 2.0).to_string(), "20px");
        assert_eq!((Numeric::number(2.0) * Numeric::em(3.0)).to_string(), "6em");
        assert_eq!((Numeric::px(10.0) / 4.0).to_string(), "2.5px");
        assert_eq!((Numeric::px(10.0) / 0.0).to_string(), "calc(10px / 0)");

        let nested = (Numeric::percent(100.0) - Numeric::px(20.0)) / 2.0;
        assert_eq!(nested.to_string(), "calc((100% - 20px) / 2)");
        let negated = -(Numeric::percent(100.0) - Numeric::px(20.0));
        assert_eq!(negated.to_string(), "calc(-1 * (100% - 20px))");
    }

    #[test]
    fn test_minified_fraction() {
        assert_eq!(Numeric::em(0.5).format_for(Vendor::Standard, true), ".5em");
        assert_eq!(Numeric::em(-0.5).format_for(Vendor::Standard, true), "-.5em");
        assert_eq!(Numeric::em(0.5).format_for(Vendor::Standard, false), "0.5em");
    }

    #[test]
    fn test_equality_ignores_signed_zero() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Numeric::px(0.0));
        assert!(set.contains(&Numeric::px(-0.0)));
        assert_ne!(Numeric::px(1.0), Numeric::em(1.0));
    }
}
