// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::diagnostic;
use crate::{Error, Fragment};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Bool,
    Int1,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Utf8,
    Date,
    Time,
    DateTime,
}

impl Type {
    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::Float4 | Type::Float8)
    }

    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Type::Date | Type::Time | Type::DateTime)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Bool => "BOOL",
            Type::Int1 => "INT1",
            Type::Int2 => "INT2",
            Type::Int4 => "INT4",
            Type::Int8 => "INT8",
            Type::Float4 => "FLOAT4",
            Type::Float8 => "FLOAT8",
            Type::Utf8 => "UTF8",
            Type::Date => "DATE",
            Type::Time => "TIME",
            Type::DateTime => "DATETIME",
        };
        f.write_str(name)
    }
}

/// A typed literal. Temporal values keep their lexical form, validation
/// happens in the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Undefined,
    Bool(bool),
    Int1(i8),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Float8(f64),
    Utf8(String),
    Date(String),
    Time(String),
    DateTime(String),
}

impl Value {
    pub fn ty(&self) -> Option<Type> {
        match self {
            Value::Undefined => None,
            Value::Bool(_) => Some(Type::Bool),
            Value::Int1(_) => Some(Type::Int1),
            Value::Int2(_) => Some(Type::Int2),
            Value::Int4(_) => Some(Type::Int4),
            Value::Int8(_) => Some(Type::Int8),
            Value::Float4(_) => Some(Type::Float4),
            Value::Float8(_) => Some(Type::Float8),
            Value::Utf8(_) => Some(Type::Utf8),
            Value::Date(_) => Some(Type::Date),
            Value::Time(_) => Some(Type::Time),
            Value::DateTime(_) => Some(Type::DateTime),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Int1(_) | Value::Int2(_) | Value::Int4(_) | Value::Int8(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int1(v) => Some(*v as i64),
            Value::Int2(v) => Some(*v as i64),
            Value::Int4(v) => Some(*v as i64),
            Value::Int8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int1(v) => Some(*v as f64),
            Value::Int2(v) => Some(*v as f64),
            Value::Int4(v) => Some(*v as f64),
            Value::Int8(v) => Some(*v as f64),
            Value::Float4(v) => Some(*v as f64),
            Value::Float8(v) => Some(*v),
            _ => None,
        }
    }

    /// Convert the literal to the given column type. Integer literals widen
    /// freely and narrow only when the value fits; integers promote to
    /// floats; everything else must already match.
    pub fn coerce_to(&self, target: Type, fragment: &Fragment) -> crate::Result<Value> {
        if self.is_undefined() {
            return Ok(Value::Undefined);
        }
        if self.ty() == Some(target) {
            return Ok(self.clone());
        }
        if let Some(v) = self.as_i64() {
            let coerced = match target {
                Type::Int1 => i8::try_from(v).ok().map(Value::Int1),
                Type::Int2 => i16::try_from(v).ok().map(Value::Int2),
                Type::Int4 => i32::try_from(v).ok().map(Value::Int4),
                Type::Int8 => Some(Value::Int8(v)),
                Type::Float4 => Some(Value::Float4(v as f32)),
                Type::Float8 => Some(Value::Float8(v as f64)),
                _ => None,
            };
            if let Some(value) = coerced {
                return Ok(value);
            }
        }
        if let (Some(v), true) = (self.as_f64(), target.is_float()) {
            return Ok(match target {
                Type::Float4 => Value::Float4(v as f32),
                _ => Value::Float8(v),
            });
        }
        Err(Error(diagnostic::ddl::literal_type_mismatch(
            fragment.clone(),
            self,
            target,
        )))
    }

    /// Negate a numeric literal, for `-N` dimension bounds.
    pub fn negate(&self, fragment: &Fragment) -> crate::Result<Value> {
        match self {
            Value::Int1(v) => Ok(Value::Int1(-v)),
            Value::Int2(v) => Ok(Value::Int2(-v)),
            Value::Int4(v) => Ok(Value::Int4(-v)),
            Value::Int8(v) => Ok(Value::Int8(-v)),
            Value::Float4(v) => Ok(Value::Float4(-v)),
            Value::Float8(v) => Ok(Value::Float8(-v)),
            _ => Err(Error(diagnostic::ddl::literal_not_numeric(fragment.clone(), self))),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => f.write_str("NULL"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int1(v) => write!(f, "{}", v),
            Value::Int2(v) => write!(f, "{}", v),
            Value::Int4(v) => write!(f, "{}", v),
            Value::Int8(v) => write!(f, "{}", v),
            Value::Float4(v) => write!(f, "{}", v),
            Value::Float8(v) => write!(f, "{}", v),
            Value::Utf8(v) => write!(f, "'{}'", v),
            Value::Date(v) => write!(f, "DATE '{}'", v),
            Value::Time(v) => write!(f, "TIME '{}'", v),
            Value::DateTime(v) => write!(f, "DATETIME '{}'", v),
        }
    }
}
