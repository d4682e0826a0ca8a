use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
};

/// A number can be either an integer or a floating point value.  Integer arithmetic stays integral
/// for as long as the result fits, overflowing results are promoted to floating point.
#[derive(Clone, Copy)]
pub enum Number {
    /// We're holding an integer value.
    Int(i64),

    /// We're holding a floating point value.
    Float(f64),
}

/// Numbers compare by value, so `1` and `1.0` are equal.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,

            (Number::Float(a), Number::Int(b)) => *a == *b as f64,
            (Number::Int(a), Number::Float(b)) => *a as f64 == *b,
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.partial_cmp(b),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(b),

            (Number::Float(a), Number::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Number::Int(a), Number::Float(b)) => (*a as f64).partial_cmp(b),
        }
    }
}

/// Floats always print with a fractional part so that the lexer reads them back as floats.
impl Display for Number {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Number::Int(num) => write!(f, "{}", num),
            Number::Float(num) if num.is_finite() && num.fract() == 0.0 => write!(f, "{:.1}", num),
            Number::Float(num) => write!(f, "{}", num),
        }
    }
}

impl Debug for Number {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Number::Int(num) => write!(f, "{} i", num),
            Number::Float(num) => write!(f, "{} f", num),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Number {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Number {
        Number::Float(value)
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Number {
        match i64::try_from(value) {
            Ok(value) => Number::Int(value),
            Err(_) => Number::Float(value as f64),
        }
    }
}

impl Number {
    /// Get the value as a float, converting integers as needed.
    pub fn as_float(&self) -> f64 {
        match self {
            Number::Int(num) => *num as f64,
            Number::Float(num) => *num,
        }
    }

    /// Get the value as an integer if it is one, or if it is a float without a fractional part.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Number::Int(num) => Some(*num),
            Number::Float(num) if num.is_finite() && num.fract() == 0.0 => Some(*num as i64),
            Number::Float(_) => None,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Zero and NaN are the falsy numbers.
    pub fn is_truthy(&self) -> bool {
        match self {
            Number::Int(num) => *num != 0,
            Number::Float(num) => *num != 0.0 && !num.is_nan(),
        }
    }

    /// Apply an integer operation when both sides are integers, falling back to the float
    /// operation when either side is a float or the integer operation overflows.
    fn arithmetic(
        self,
        other: Number,
        iop: fn(i64, i64) -> Option<i64>,
        fop: fn(f64, f64) -> f64,
    ) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match iop(a, b) {
                Some(result) => Number::Int(result),
                None => Number::Float(fop(a as f64, b as f64)),
            },

            (a, b) => Number::Float(fop(a.as_float(), b.as_float())),
        }
    }

    pub fn add(self, other: Number) -> Number {
        self.arithmetic(other, i64::checked_add, |a, b| a + b)
    }

    pub fn sub(self, other: Number) -> Number {
        self.arithmetic(other, i64::checked_sub, |a, b| a - b)
    }

    pub fn mul(self, other: Number) -> Number {
        self.arithmetic(other, i64::checked_mul, |a, b| a * b)
    }

    /// Divide, staying integral when two integers divide exactly.  Returns None for an integer
    /// division by zero; float division follows IEEE rules.
    pub fn checked_div(self, other: Number) -> Option<Number> {
        match (self, other) {
            (Number::Int(_), Number::Int(0)) => None,

            (Number::Int(a), Number::Int(b)) if a.checked_rem(b) == Some(0) => {
                Some(self.arithmetic(other, i64::checked_div, |a, b| a / b))
            }

            (Number::Int(a), Number::Int(b)) => Some(Number::Float(a as f64 / b as f64)),

            (a, b) => Some(Number::Float(a.as_float() / b.as_float())),
        }
    }

    /// The remainder of a division, with the sign of the dividend.  Returns None for an integer
    /// modulo by zero.
    pub fn checked_rem(self, other: Number) -> Option<Number> {
        match (self, other) {
            (Number::Int(_), Number::Int(0)) => None,

            (a, b) => Some(a.arithmetic(b, i64::checked_rem, |a, b| a % b)),
        }
    }
}
