// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::def::{ColumnDef, KeyDef};
use crate::id::{ColumnId, SchemaId, TableId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    Table,
    View,
    Merge,
    Replica,
    Remote { location: String },
    Stream,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persistence {
    Persistent,
    GlobalTemporary,
    LocalTemporary,
    Declared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitAction {
    Commit,
    Delete,
    Preserve,
    Drop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    pub id: TableId,
    pub schema: SchemaId,
    pub name: String,
    pub kind: TableKind,
    pub persistence: Persistence,
    pub commit_action: CommitAction,
    pub columns: Vec<ColumnDef>,
    pub keys: Vec<KeyDef>,
    /// Child tables of a merge or replica table.
    pub children: Vec<TableId>,
    pub readonly: bool,
    pub system: bool,
    /// Declared dimension columns of an array.
    pub dimension_count: usize,
    /// True while every declared dimension has bound start, step and stop.
    pub fixed: bool,
}

impl TableDef {
    pub fn is_view(&self) -> bool {
        matches!(self.kind, TableKind::View)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TableKind::Array)
    }

    /// Merge and replica tables only aggregate child tables.
    pub fn is_partitioned(&self) -> bool {
        matches!(self.kind, TableKind::Merge | TableKind::Replica)
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self.persistence, Persistence::Persistent)
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TableKind::Table => "TABLE",
            TableKind::View => "VIEW",
            TableKind::Merge => "MERGE TABLE",
            TableKind::Replica => "REPLICA TABLE",
            TableKind::Remote { .. } => "REMOTE TABLE",
            TableKind::Stream => "STREAM TABLE",
            TableKind::Array => "ARRAY",
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnDef> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn column_by_id(&self, id: ColumnId) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn key(&self, name: &str) -> Option<&KeyDef> {
        self.keys.iter().find(|k| k.name == name)
    }

    pub fn primary_key(&self) -> Option<&KeyDef> {
        self.keys.iter().find(|k| k.is_primary())
    }

    pub fn dimension_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.is_dimension())
    }
}
