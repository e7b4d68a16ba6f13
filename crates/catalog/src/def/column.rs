// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::id::ColumnId;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use tessera_type::{Type, Value};

#[repr(transparent)]
#[derive(
    Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize,
)]
pub struct ColumnIndex(pub u16);

impl Deref for ColumnIndex {
    type Target = u16;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq<u16> for ColumnIndex {
    fn eq(&self, other: &u16) -> bool {
        self.0.eq(other)
    }
}

/// Range of a dimension column. Any endpoint may be unbound; a fully bound
/// dimension makes the enclosing array materializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DimensionDef {
    pub start: Option<Value>,
    pub step: Option<Value>,
    pub stop: Option<Value>,
}

impl DimensionDef {
    pub fn is_fixed(&self) -> bool {
        self.start.is_some() && self.step.is_some() && self.stop.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub name: String,
    pub ty: Type,
    pub nullable: bool,
    pub default: Option<Value>,
    pub index: ColumnIndex,
    pub dimension: Option<DimensionDef>,
}

impl ColumnDef {
    pub fn is_dimension(&self) -> bool {
        self.dimension.is_some()
    }
}
