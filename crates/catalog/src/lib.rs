// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

mod catalog;
pub mod def;
mod id;

pub use catalog::{
    AuthToCreate, Catalog, DEFAULT_SCHEMA, SYSADMIN_ROLE, SYSTEM_USER, SchemaToCreate,
    TEMPORARY_SCHEMA,
};
pub use def::{
    AuthDef, AuthKind, ColumnDef, ColumnIndex, CommitAction, DimensionDef, KeyDef, KeyKind,
    Persistence, RefAction, SchemaDef, TableDef, TableKind,
};
pub use id::{AuthId, ColumnId, KeyId, SchemaId, TableId};

pub use tessera_type::{Error, Result};
