// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

mod auth;
mod column;
mod key;
mod schema;
mod table;

pub use auth::{AuthDef, AuthKind};
pub use column::{ColumnDef, ColumnIndex, DimensionDef};
pub use key::{KeyDef, KeyKind, RefAction};
pub use schema::SchemaDef;
pub use table::{CommitAction, Persistence, TableDef, TableKind};
