// ============================================================================
// Value Coercion
// Map heterogeneous row values onto the canonical fixed-width representation
// ============================================================================

use super::array_decimal::ArrayDecimal;
use super::errors::{DecimalError, DecimalResult};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;

/// A value as handed over by a column selector.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalValue {
    /// Missing value
    Null,
    /// Arbitrary-precision decimal
    BigDecimal(BigDecimal),
    /// 96-bit decimal from API boundaries
    Decimal(rust_decimal::Decimal),
    /// 64-bit integer
    Long(i64),
    /// 32-bit integer
    Int(i32),
    /// Double-precision float
    Double(f64),
    /// Single-precision float
    Float(f32),
    /// Textual decimal
    Text(String),
    /// Already canonical
    Canonical(ArrayDecimal),
    /// Boolean
    Bool(bool),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Multi-value row
    List(Vec<ExternalValue>),
}

impl ExternalValue {
    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ExternalValue::Null => "null",
            ExternalValue::BigDecimal(_) => "BigDecimal",
            ExternalValue::Decimal(_) => "Decimal",
            ExternalValue::Long(_) => "i64",
            ExternalValue::Int(_) => "i32",
            ExternalValue::Double(_) => "f64",
            ExternalValue::Float(_) => "f32",
            ExternalValue::Text(_) => "String",
            ExternalValue::Canonical(_) => "ArrayDecimal",
            ExternalValue::Bool(_) => "bool",
            ExternalValue::Bytes(_) => "bytes",
            ExternalValue::List(_) => "list",
        }
    }
}

/// Convert `value` into an [`ArrayDecimal`] at its natural width and scale.
///
/// `Null` maps to `None`; a canonical value is passed through untouched.
/// Floats go through their shortest decimal rendering, with `f32` widened to
/// `f64` first (so `0.1f32` becomes `0.10000000149011612`).
///
/// # Errors
/// - `UnsupportedType` for booleans, bytes and lists
/// - `InvalidInput` for text that is not a decimal literal, or whose
///   exponent is beyond the supported magnitude
/// - `NonFinite` for NaN or infinite floats
pub fn to_fixed_width(value: ExternalValue) -> DecimalResult<Option<ArrayDecimal>> {
    let decimal = match value {
        ExternalValue::Null => return Ok(None),
        ExternalValue::Canonical(canonical) => return Ok(Some(canonical)),
        ExternalValue::BigDecimal(d) => d,
        ExternalValue::Decimal(d) => BigDecimal::new(BigInt::from(d.mantissa()), i64::from(d.scale())),
        ExternalValue::Long(v) => BigDecimal::from(v),
        ExternalValue::Int(v) => BigDecimal::from(v),
        ExternalValue::Double(v) => from_f64(v)?,
        ExternalValue::Float(v) => from_f64(f64::from(v))?,
        ExternalValue::Text(text) => {
            let trimmed = text.trim();
            BigDecimal::from_str(trimmed)
                .map_err(|_| DecimalError::InvalidInput(trimmed.to_string()))?
        },
        other => return Err(DecimalError::UnsupportedType(other.kind())),
    };
    ArrayDecimal::from_big_decimal(&decimal).map(Some)
}

fn from_f64(value: f64) -> DecimalResult<BigDecimal> {
    if !value.is_finite() {
        return Err(DecimalError::NonFinite);
    }
    // Display for f64 never uses exponent notation and round-trips.
    let text = value.to_string();
    BigDecimal::from_str(&text).map_err(|_| DecimalError::InvalidInput(text))
}

// ============================================================================
// Conversions Into ExternalValue
// ============================================================================

impl From<BigDecimal> for ExternalValue {
    fn from(v: BigDecimal) -> Self {
        ExternalValue::BigDecimal(v)
    }
}

impl From<rust_decimal::Decimal> for ExternalValue {
    fn from(v: rust_decimal::Decimal) -> Self {
        ExternalValue::Decimal(v)
    }
}

impl From<i64> for ExternalValue {
    fn from(v: i64) -> Self {
        ExternalValue::Long(v)
    }
}

impl From<i32> for ExternalValue {
    fn from(v: i32) -> Self {
        ExternalValue::Int(v)
    }
}

impl From<f64> for ExternalValue {
    fn from(v: f64) -> Self {
        ExternalValue::Double(v)
    }
}

impl From<f32> for ExternalValue {
    fn from(v: f32) -> Self {
        ExternalValue::Float(v)
    }
}

impl From<&str> for ExternalValue {
    fn from(v: &str) -> Self {
        ExternalValue::Text(v.to_string())
    }
}

impl From<String> for ExternalValue {
    fn from(v: String) -> Self {
        ExternalValue::Text(v)
    }
}

impl From<ArrayDecimal> for ExternalValue {
    fn from(v: ArrayDecimal) -> Self {
        ExternalValue::Canonical(v)
    }
}

impl From<bool> for ExternalValue {
    fn from(v: bool) -> Self {
        ExternalValue::Bool(v)
    }
}

impl<T: Into<ExternalValue>> From<Option<T>> for ExternalValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ExternalValue::Null, Into::into)
    }
}
