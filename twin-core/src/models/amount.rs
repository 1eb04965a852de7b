use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};

/// A single raw amount exactly as the user supplied it.
///
/// Form fields hand over text, sliders hand over floats, and a cleared
/// field hands over nothing. Validation happens in
/// [`crate::request_builder::build`], never here.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawAmount {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

/// Largest integer every `f64` holds exactly (2^53).
const MAX_EXACT_F64_INT: u64 = 1 << 53;

impl RawAmount {
    /// Integers an `f64` cannot hold exactly are kept as their digits.
    fn from_integer<T: Into<i128> + fmt::Display + Copy>(value: T) -> Self {
        let wide: i128 = value.into();
        if wide.unsigned_abs() <= u128::from(MAX_EXACT_F64_INT) {
            Self::Number(wide as f64)
        } else {
            Self::Text(value.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<RawAmount>> From<Option<T>> for RawAmount {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl fmt::Display for RawAmount {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("<empty>"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "'{s}'"),
        }
    }
}

struct RawAmountVisitor;

impl<'de> Visitor<'de> for RawAmountVisitor {
    type Value = RawAmount;

    fn expecting(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("a number, a numeric string, or nothing")
    }

    fn visit_f64<E: de::Error>(
        self,
        v: f64,
    ) -> Result<Self::Value, E> {
        Ok(RawAmount::Number(v))
    }

    fn visit_i64<E: de::Error>(
        self,
        v: i64,
    ) -> Result<Self::Value, E> {
        Ok(RawAmount::from_integer(v))
    }

    fn visit_u64<E: de::Error>(
        self,
        v: u64,
    ) -> Result<Self::Value, E> {
        Ok(RawAmount::from_integer(v))
    }

    fn visit_str<E: de::Error>(
        self,
        v: &str,
    ) -> Result<Self::Value, E> {
        Ok(RawAmount::Text(v.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawAmount::Empty)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawAmount::Empty)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawAmountVisitor)
    }
}
