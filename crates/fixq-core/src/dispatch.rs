// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tag-keyed conversion for hosts that pick the target type at runtime.
//!
//! [`TypeTag`] is the closed set of targets a host may request, [`Value`] the
//! boxed result. Hosts that know the target statically should use
//! [`FixedPoint::to_num`] instead.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use half::f16;
use rust_decimal::Decimal;

use crate::error::FixedError;
use crate::fixed::{Fix16, FixedPoint, UFix16, UFix8};
use crate::format::NumberFormat;
use crate::kind::Kind;

/// A requested conversion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `bool`
    Boolean,
    /// `i8`
    SByte,
    /// `u8`
    Byte,
    /// `i16`
    Int16,
    /// `u16`
    UInt16,
    /// `i32`
    Int32,
    /// `u32`
    UInt32,
    /// `i64`
    Int64,
    /// `u64`
    UInt64,
    /// `half::f16`
    Half,
    /// `f32`
    Single,
    /// `f64`
    Double,
    /// `rust_decimal::Decimal`
    Decimal,
    /// Text in the requested culture.
    String,
    /// A single character; never convertible.
    Char,
    /// A calendar timestamp; never convertible.
    DateTime,
    /// [`Fix16`]
    Fix16,
    /// [`UFix16`]
    UFix16,
    /// [`UFix8`]
    UFix8,
}

impl TypeTag {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::Boolean,
        Self::SByte,
        Self::Byte,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Half,
        Self::Single,
        Self::Double,
        Self::Decimal,
        Self::String,
        Self::Char,
        Self::DateTime,
        Self::Fix16,
        Self::UFix16,
        Self::UFix8,
    ];

    /// Display name of the target type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Half => "Half",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::Char => "Char",
            Self::DateTime => "DateTime",
            Self::Fix16 => "Fix16",
            Self::UFix16 => "UFix16",
            Self::UFix8 => "UFix8",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeTag {
    type Err = FixedError;

    /// Case-insensitive match on [`TypeTag::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FixedError::Parse(format!("unknown type tag `{s}`")))
    }
}

/// A converted value, boxed by its runtime type.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Value {
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Half(f16),
    Single(f32),
    Double(f64),
    Decimal(Decimal),
    String(String),
    Fix16(Fix16),
    UFix16(UFix16),
    UFix8(UFix8),
}

impl Value {
    /// The tag this value answers to.
    pub const fn type_tag(&self) -> TypeTag {
        match self {
            Self::Boolean(_) => TypeTag::Boolean,
            Self::SByte(_) => TypeTag::SByte,
            Self::Byte(_) => TypeTag::Byte,
            Self::Int16(_) => TypeTag::Int16,
            Self::UInt16(_) => TypeTag::UInt16,
            Self::Int32(_) => TypeTag::Int32,
            Self::UInt32(_) => TypeTag::UInt32,
            Self::Int64(_) => TypeTag::Int64,
            Self::UInt64(_) => TypeTag::UInt64,
            Self::Half(_) => TypeTag::Half,
            Self::Single(_) => TypeTag::Single,
            Self::Double(_) => TypeTag::Double,
            Self::Decimal(_) => TypeTag::Decimal,
            Self::String(_) => TypeTag::String,
            Self::Fix16(_) => TypeTag::Fix16,
            Self::UFix16(_) => TypeTag::UFix16,
            Self::UFix8(_) => TypeTag::UFix8,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => v.fmt(f),
            Self::SByte(v) => v.fmt(f),
            Self::Byte(v) => v.fmt(f),
            Self::Int16(v) => v.fmt(f),
            Self::UInt16(v) => v.fmt(f),
            Self::Int32(v) => v.fmt(f),
            Self::UInt32(v) => v.fmt(f),
            Self::Int64(v) => v.fmt(f),
            Self::UInt64(v) => v.fmt(f),
            Self::Half(v) => v.fmt(f),
            Self::Single(v) => v.fmt(f),
            Self::Double(v) => v.fmt(f),
            Self::Decimal(v) => v.fmt(f),
            Self::String(v) => v.fmt(f),
            Self::Fix16(v) => v.fmt(f),
            Self::UFix16(v) => v.fmt(f),
            Self::UFix8(v) => v.fmt(f),
        }
    }
}

impl<K: Kind> FixedPoint<K> {
    /// Custom numeric type code of this kind: 100 (`Fix16`), 101 (`UFix16`),
    /// 102 (`UFix8`).
    pub fn type_code(self) -> u8 {
        K::TYPE_CODE
    }

    /// Converts to the type named by `target`, boxed.
    ///
    /// Numeric targets saturate like [`FixedPoint::to_num`]; `String` renders
    /// the general format in `culture`.
    ///
    /// # Errors
    /// - [`FixedError::ArgumentNull`] when `target` is `None`.
    /// - [`FixedError::InvalidCast`] for `Char` and `DateTime`.
    pub fn to_type(
        self,
        target: Option<TypeTag>,
        culture: &NumberFormat,
    ) -> Result<Value, FixedError> {
        let target = target.ok_or(FixedError::ArgumentNull {
            param: "conversion_type",
        })?;
        let value = match target {
            TypeTag::Boolean => Value::Boolean(self.to_num()),
            TypeTag::SByte => Value::SByte(self.to_num()),
            TypeTag::Byte => Value::Byte(self.to_num()),
            TypeTag::Int16 => Value::Int16(self.to_num()),
            TypeTag::UInt16 => Value::UInt16(self.to_num()),
            TypeTag::Int32 => Value::Int32(self.to_num()),
            TypeTag::UInt32 => Value::UInt32(self.to_num()),
            TypeTag::Int64 => Value::Int64(self.to_num()),
            TypeTag::UInt64 => Value::UInt64(self.to_num()),
            TypeTag::Half => Value::Half(self.to_num()),
            TypeTag::Single => Value::Single(self.to_num()),
            TypeTag::Double => Value::Double(self.to_num()),
            TypeTag::Decimal => Value::Decimal(self.to_num()),
            TypeTag::String => Value::String(self.format_with("G", culture)?),
            TypeTag::Char | TypeTag::DateTime => {
                return Err(FixedError::InvalidCast {
                    from: K::NAME,
                    to: target.name(),
                })
            }
            TypeTag::Fix16 => Value::Fix16(self.convert()),
            TypeTag::UFix16 => Value::UFix16(self.convert()),
            TypeTag::UFix8 => Value::UFix8(self.convert()),
        };
        Ok(value)
    }

    /// Boxes `self` into its own [`Value`] variant.
    pub fn to_value(self) -> Value {
        K::boxed(self)
    }

    /// Orders `self` against a boxed value of the same kind.
    ///
    /// An absent value orders below every fixed-point value.
    ///
    /// # Errors
    /// [`FixedError::TypeMismatch`] when `other` holds a different type, even
    /// another fixed-point kind.
    pub fn compare_to(self, other: Option<&Value>) -> Result<Ordering, FixedError> {
        let Some(other) = other else {
            return Ok(Ordering::Greater);
        };
        K::unbox(other)
            .map(|o| self.cmp(&o))
            .ok_or(FixedError::TypeMismatch { expected: K::NAME })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_round_trip() {
        for tag in TypeTag::ALL {
            assert_eq!(tag.name().parse::<TypeTag>(), Ok(tag));
        }
        assert_eq!("uint16".parse::<TypeTag>(), Ok(TypeTag::UInt16));
        assert!("Guid".parse::<TypeTag>().is_err());
    }

    #[test]
    fn boxed_values_report_their_tag() {
        assert_eq!(UFix8::ONE.to_value().type_tag(), TypeTag::UFix8);
        assert_eq!(Value::Int32(1).type_tag(), TypeTag::Int32);
    }
}
