// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::Catalog;
use crate::def::SchemaDef;
use crate::id::{AuthId, SchemaId};
use tessera_type::diagnostic::catalog::schema_already_exists;
use tessera_type::{Fragment, return_error, return_internal_error};
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct SchemaToCreate {
    pub fragment: Fragment,
    pub name: String,
    pub owner: AuthId,
    pub auth: AuthId,
}

impl Catalog {
    pub fn find_schema_by_name(&self, name: &str) -> Option<&SchemaDef> {
        self.schemas.values().find(|s| s.name == name)
    }

    pub fn get_schema(&self, id: SchemaId) -> crate::Result<&SchemaDef> {
        let Some(schema) = self.schemas.get(&id) else {
            return_internal_error!("schema {} not in catalog", *id);
        };
        Ok(schema)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &SchemaDef> {
        self.schemas.values()
    }

    #[instrument(skip_all, fields(schema = %to_create.name))]
    pub fn create_schema(&mut self, to_create: SchemaToCreate) -> crate::Result<SchemaId> {
        if let Some(schema) = self.find_schema_by_name(&to_create.name) {
            return_error!(schema_already_exists(to_create.fragment, &schema.name));
        }

        let id = self.next_schema_id();
        self.schemas.insert(
            id,
            SchemaDef {
                id,
                name: to_create.name,
                owner: to_create.owner,
                auth: to_create.auth,
                tables: vec![],
                system: false,
            },
        );
        Ok(id)
    }

    /// Remove a schema and everything it contains.
    #[instrument(skip(self))]
    pub fn drop_schema(&mut self, id: SchemaId) -> crate::Result<()> {
        let Some(schema) = self.schemas.shift_remove(&id) else {
            return_internal_error!("schema {} not in catalog", *id);
        };
        for table in schema.tables {
            self.tables.shift_remove(&table);
            self.column_dependencies.retain(|(t, _)| *t != table);
        }
        Ok(())
    }
}
