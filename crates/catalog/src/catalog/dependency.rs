// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::Catalog;
use crate::id::{ColumnId, TableId};

impl Catalog {
    /// Mark a column as depended upon by an external object (view, routine,
    /// trigger). Dropping the column then requires CASCADE.
    pub fn register_column_dependency(&mut self, table: TableId, column: ColumnId) {
        self.column_dependencies.insert((table, column));
    }

    pub fn has_column_dependency(&self, table: TableId, column: ColumnId) -> bool {
        self.column_dependencies.contains(&(table, column))
    }

    pub fn drop_column_dependencies(&mut self, table: TableId, column: ColumnId) {
        self.column_dependencies.remove(&(table, column));
    }
}
