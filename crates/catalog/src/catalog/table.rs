// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::Catalog;
use crate::def::TableDef;
use crate::id::{SchemaId, TableId};
use tessera_type::diagnostic::catalog::table_already_exists;
use tessera_type::{Fragment, return_error, return_internal_error};
use tracing::instrument;

impl Catalog {
    pub fn find_table_by_name(&self, schema: SchemaId, name: &str) -> Option<&TableDef> {
        self.tables.values().find(|t| t.schema == schema && t.name == name)
    }

    pub fn get_table(&self, id: TableId) -> crate::Result<&TableDef> {
        let Some(table) = self.tables.get(&id) else {
            return_internal_error!("table {} not in catalog", *id);
        };
        Ok(table)
    }

    pub fn tables(&self, schema: SchemaId) -> impl Iterator<Item = &TableDef> {
        self.tables.values().filter(move |t| t.schema == schema)
    }

    /// Add a fully built table to the catalog. The descriptor keeps the id
    /// it was built with.
    #[instrument(skip_all, fields(table = %table.name))]
    pub fn register_table(&mut self, fragment: Fragment, table: TableDef) -> crate::Result<TableId> {
        let schema = self.get_schema(table.schema)?;
        if let Some(existing) = self.find_table_by_name(table.schema, &table.name) {
            return_error!(table_already_exists(fragment, &schema.name, &existing.name));
        }

        let id = table.id;
        let schema_id = table.schema;
        self.tables.insert(id, table);
        self.schemas.get_mut(&schema_id).unwrap().tables.push(id);
        Ok(id)
    }

    #[instrument(skip(self))]
    pub fn drop_table(&mut self, id: TableId) -> crate::Result<()> {
        let Some(table) = self.tables.shift_remove(&id) else {
            return_internal_error!("table {} not in catalog", *id);
        };
        if let Some(schema) = self.schemas.get_mut(&table.schema) {
            schema.tables.retain(|t| *t != id);
        }
        self.column_dependencies.retain(|(t, _)| *t != id);
        Ok(())
    }

    /// Swap in an altered descriptor. The shadow copy must keep the original
    /// table id. Dependency records of columns the shadow no longer carries
    /// are dropped here, not earlier: until the commit the original
    /// descriptor stays authoritative.
    #[instrument(skip_all, fields(table = %table.name))]
    pub fn commit_table(&mut self, table: TableDef) -> crate::Result<()> {
        let Some(old) = self.tables.get(&table.id) else {
            return_internal_error!("table {} not in catalog", *table.id);
        };
        let removed: Vec<_> = old
            .columns
            .iter()
            .filter(|c| table.column_by_id(c.id).is_none())
            .map(|c| c.id)
            .collect();
        for column in removed {
            self.column_dependencies.remove(&(table.id, column));
        }
        self.tables.insert(table.id, table);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::{DEFAULT_SCHEMA, SYSTEM_USER};
    use crate::def::{CommitAction, Persistence, TableKind};

    pub(crate) fn empty_table(catalog: &mut Catalog, schema: SchemaId, name: &str) -> TableDef {
        TableDef {
            id: catalog.next_table_id(),
            schema,
            name: name.to_string(),
            kind: TableKind::Table,
            persistence: Persistence::Persistent,
            commit_action: CommitAction::Commit,
            columns: vec![],
            keys: vec![],
            children: vec![],
            readonly: false,
            system: false,
            dimension_count: 0,
            fixed: true,
        }
    }

    fn default_schema(catalog: &Catalog) -> SchemaId {
        catalog.find_schema_by_name(DEFAULT_SCHEMA).unwrap().id
    }

    #[test]
    fn test_register_table() {
        let mut catalog = Catalog::new();
        let schema = default_schema(&catalog);

        let table = empty_table(&mut catalog, schema, "orders");
        let id = catalog.register_table(Fragment::None, table).unwrap();

        let table = catalog.get_table(id).unwrap();
        assert_eq!(table.name, "orders");
        assert!(catalog.get_schema(schema).unwrap().tables.contains(&id));
    }

    #[test]
    fn test_register_table_duplicate() {
        let mut catalog = Catalog::new();
        let schema = default_schema(&catalog);

        let table = empty_table(&mut catalog, schema, "orders");
        catalog.register_table(Fragment::None, table).unwrap();

        let table = empty_table(&mut catalog, schema, "orders");
        let err = catalog.register_table(Fragment::None, table).unwrap_err();
        assert_eq!(err.diagnostic().code, "42S01");
    }

    #[test]
    fn test_same_name_in_other_schema() {
        let mut catalog = Catalog::new();
        let schema = default_schema(&catalog);
        let auth = catalog.find_auth_by_name(SYSTEM_USER).unwrap().id;

        let other = catalog
            .create_schema(crate::catalog::SchemaToCreate {
                fragment: Fragment::None,
                name: "shop".to_string(),
                owner: auth,
                auth,
            })
            .unwrap();

        let table = empty_table(&mut catalog, schema, "orders");
        catalog.register_table(Fragment::None, table).unwrap();

        let table = empty_table(&mut catalog, other, "orders");
        assert!(catalog.register_table(Fragment::None, table).is_ok());
    }

    #[test]
    fn test_commit_table_swaps_descriptor() {
        let mut catalog = Catalog::new();
        let schema = default_schema(&catalog);

        let table = empty_table(&mut catalog, schema, "orders");
        let id = catalog.register_table(Fragment::None, table).unwrap();

        let mut shadow = catalog.get_table(id).unwrap().clone();
        shadow.readonly = true;
        catalog.commit_table(shadow).unwrap();

        assert!(catalog.get_table(id).unwrap().readonly);
    }

    #[test]
    fn test_commit_table_clears_dropped_column_dependencies() {
        let mut catalog = Catalog::new();
        let schema = default_schema(&catalog);

        let mut table = empty_table(&mut catalog, schema, "orders");
        let column = crate::def::ColumnDef {
            id: catalog.next_column_id(),
            name: "total".to_string(),
            ty: tessera_type::Type::Float8,
            nullable: true,
            default: None,
            index: crate::def::ColumnIndex(0),
            dimension: None,
        };
        let column_id = column.id;
        table.columns.push(column);
        let id = catalog.register_table(Fragment::None, table).unwrap();
        catalog.register_column_dependency(id, column_id);

        // a shadow that keeps the column keeps the record
        let shadow = catalog.get_table(id).unwrap().clone();
        catalog.commit_table(shadow).unwrap();
        assert!(catalog.has_column_dependency(id, column_id));

        let mut shadow = catalog.get_table(id).unwrap().clone();
        shadow.columns.clear();
        catalog.commit_table(shadow).unwrap();
        assert!(!catalog.has_column_dependency(id, column_id));
    }

    #[test]
    fn test_drop_table() {
        let mut catalog = Catalog::new();
        let schema = default_schema(&catalog);

        let table = empty_table(&mut catalog, schema, "orders");
        let id = catalog.register_table(Fragment::None, table).unwrap();

        catalog.drop_table(id).unwrap();
        assert!(catalog.find_table_by_name(schema, "orders").is_none());
        assert!(catalog.get_schema(schema).unwrap().tables.is_empty());
    }
}
