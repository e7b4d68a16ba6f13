// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

mod auth;
mod dependency;
mod key;
mod schema;
mod table;

pub use auth::AuthToCreate;
pub use schema::SchemaToCreate;

use crate::def::{AuthDef, SchemaDef, TableDef};
use crate::id::{AuthId, ColumnId, KeyId, SchemaId, TableId};
use indexmap::IndexMap;
use std::collections::HashSet;

pub const SYSTEM_USER: &str = "tsdb";
pub const SYSADMIN_ROLE: &str = "sysadmin";
pub const DEFAULT_SCHEMA: &str = "sys";
pub const TEMPORARY_SCHEMA: &str = "tmp";

/// In-memory catalog. Descriptors live in insertion-ordered maps keyed by
/// their ids; cross-references between descriptors are ids, never owned
/// subtrees.
#[derive(Debug)]
pub struct Catalog {
    pub(crate) schemas: IndexMap<SchemaId, SchemaDef>,
    pub(crate) tables: IndexMap<TableId, TableDef>,
    pub(crate) auths: IndexMap<AuthId, AuthDef>,
    pub(crate) column_dependencies: HashSet<(TableId, ColumnId)>,
    next_schema_id: u64,
    next_table_id: u64,
    next_column_id: u64,
    next_key_id: u64,
    next_auth_id: u64,
    read_only: bool,
}

impl Catalog {
    pub fn new() -> Self {
        let mut catalog = Catalog {
            schemas: IndexMap::new(),
            tables: IndexMap::new(),
            auths: IndexMap::new(),
            column_dependencies: HashSet::new(),
            next_schema_id: 1,
            next_table_id: 1,
            next_column_id: 1,
            next_key_id: 1,
            next_auth_id: 1,
            read_only: false,
        };
        catalog.bootstrap();
        catalog
    }

    fn bootstrap(&mut self) {
        use crate::def::AuthKind;

        let role = self.next_auth_id();
        self.auths.insert(
            role,
            AuthDef {
                id: role,
                name: SYSADMIN_ROLE.to_string(),
                kind: AuthKind::Role,
                sysadmin: true,
            },
        );

        let user = self.next_auth_id();
        self.auths.insert(
            user,
            AuthDef {
                id: user,
                name: SYSTEM_USER.to_string(),
                kind: AuthKind::User,
                sysadmin: true,
            },
        );

        for (name, system) in [(DEFAULT_SCHEMA, true), (TEMPORARY_SCHEMA, true)] {
            let id = self.next_schema_id();
            self.schemas.insert(
                id,
                SchemaDef {
                    id,
                    name: name.to_string(),
                    owner: user,
                    auth: role,
                    tables: vec![],
                    system,
                },
            );
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn next_schema_id(&mut self) -> SchemaId {
        let id = self.next_schema_id;
        self.next_schema_id += 1;
        SchemaId(id)
    }

    pub fn next_table_id(&mut self) -> TableId {
        let id = self.next_table_id;
        self.next_table_id += 1;
        TableId(id)
    }

    pub fn next_column_id(&mut self) -> ColumnId {
        let id = self.next_column_id;
        self.next_column_id += 1;
        ColumnId(id)
    }

    pub fn next_key_id(&mut self) -> KeyId {
        let id = self.next_key_id;
        self.next_key_id += 1;
        KeyId(id)
    }

    pub fn next_auth_id(&mut self) -> AuthId {
        let id = self.next_auth_id;
        self.next_auth_id += 1;
        AuthId(id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_schemas() {
        let catalog = Catalog::new();
        assert!(catalog.find_schema_by_name(DEFAULT_SCHEMA).is_some());
        assert!(catalog.find_schema_by_name(TEMPORARY_SCHEMA).is_some());
    }

    #[test]
    fn test_bootstrap_auths() {
        let catalog = Catalog::new();
        let user = catalog.find_auth_by_name(SYSTEM_USER).unwrap();
        assert!(user.sysadmin);
        assert!(catalog.find_auth_by_name(SYSADMIN_ROLE).is_some());
    }
}
