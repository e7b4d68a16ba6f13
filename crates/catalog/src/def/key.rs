// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::id::{ColumnId, KeyId, TableId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RefAction {
    #[default]
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeyKind {
    Primary,
    Unique,
    Foreign {
        referenced_table: TableId,
        referenced_key: KeyId,
        on_update: RefAction,
        on_delete: RefAction,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDef {
    pub id: KeyId,
    pub name: String,
    pub kind: KeyKind,
    pub columns: Vec<ColumnId>,
}

impl KeyDef {
    pub fn is_primary(&self) -> bool {
        matches!(self.kind, KeyKind::Primary)
    }

    /// Primary and unique keys can be referenced by foreign keys.
    pub fn is_referenceable(&self) -> bool {
        matches!(self.kind, KeyKind::Primary | KeyKind::Unique)
    }

    pub fn references(&self, column: ColumnId) -> bool {
        self.columns.contains(&column)
    }
}
