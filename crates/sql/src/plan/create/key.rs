// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::SessionContext;
use crate::ast::{AstTableConstraint, Ident, QualifiedName};
use crate::plan::Compiler;
use tessera_catalog::{Catalog, ColumnId, KeyDef, KeyId, KeyKind, SchemaDef, TableDef, TableId};
use tessera_type::diagnostic::{catalog as catalog_diag, ddl};
use tessera_type::{Fragment, return_error};

impl Compiler {
    /// Attach a key to a table under construction (or to an ALTER shadow).
    /// The table may not be registered yet, so every check runs against both
    /// the catalog and the in-progress descriptor.
    pub(crate) fn add_key(
        catalog: &mut Catalog,
        session: &SessionContext,
        schema: &SchemaDef,
        table: &mut TableDef,
        name: Option<Ident>,
        constraint: AstTableConstraint,
        fragment: Fragment,
    ) -> crate::Result<()> {
        match constraint {
            AstTableConstraint::PrimaryKey(columns) => {
                if table.primary_key().is_some() {
                    return_error!(ddl::primary_key_already_exists(fragment, &table.name));
                }
                let key_name = Self::key_name(name, table, &columns, "pkey");
                Self::check_key_name(catalog, schema, table, &key_name, &fragment)?;
                let columns = Self::resolve_key_columns(table, &columns)?;
                // Primary key columns are implicitly NOT NULL.
                for id in &columns {
                    if let Some(column) =
                        table.columns.iter_mut().find(|c| c.id == *id)
                    {
                        column.nullable = false;
                    }
                }
                table.keys.push(KeyDef {
                    id: catalog.next_key_id(),
                    name: key_name,
                    kind: KeyKind::Primary,
                    columns,
                });
            }
            AstTableConstraint::Unique(columns) => {
                let key_name = Self::key_name(name, table, &columns, "unique");
                Self::check_key_name(catalog, schema, table, &key_name, &fragment)?;
                let columns = Self::resolve_key_columns(table, &columns)?;
                table.keys.push(KeyDef {
                    id: catalog.next_key_id(),
                    name: key_name,
                    kind: KeyKind::Unique,
                    columns,
                });
            }
            AstTableConstraint::ForeignKey { columns, table: target, ref_columns, on_update, on_delete } => {
                let key_name = Self::key_name(name, table, &columns, "fkey");
                Self::check_key_name(catalog, schema, table, &key_name, &fragment)?;
                let local = Self::resolve_key_columns(table, &columns)?;
                let (referenced_table, referenced_key, referenced_len) = Self::resolve_referenced_key(
                    catalog,
                    session,
                    schema,
                    table,
                    &target,
                    ref_columns.as_deref(),
                )?;
                // Local and referenced columns pair positionally.
                if local.len() != referenced_len {
                    return_error!(ddl::foreign_key_column_count_mismatch(fragment, &key_name));
                }
                table.keys.push(KeyDef {
                    id: catalog.next_key_id(),
                    name: key_name,
                    kind: KeyKind::Foreign {
                        referenced_table,
                        referenced_key,
                        on_update,
                        on_delete,
                    },
                    columns: local,
                });
            }
        }
        Ok(())
    }

    fn key_name(name: Option<Ident>, table: &TableDef, columns: &[Ident], suffix: &str) -> String {
        match name {
            Some(ident) => ident.text,
            None => {
                let mut out = table.name.clone();
                for column in columns {
                    out.push('_');
                    out.push_str(&column.text);
                }
                out.push('_');
                out.push_str(suffix);
                out
            }
        }
    }

    fn check_key_name(
        catalog: &Catalog,
        schema: &SchemaDef,
        table: &TableDef,
        name: &str,
        fragment: &Fragment,
    ) -> crate::Result<()> {
        if catalog.find_key_by_name(schema.id, name).is_some() || table.key(name).is_some() {
            return_error!(catalog_diag::key_already_exists(fragment.clone(), &schema.name, name));
        }
        Ok(())
    }

    fn resolve_key_columns(table: &TableDef, columns: &[Ident]) -> crate::Result<Vec<ColumnId>> {
        let mut out = Vec::with_capacity(columns.len());
        for ident in columns {
            let Some(column) = table.column(&ident.text) else {
                return_error!(catalog_diag::column_not_found(
                    ident.fragment.clone(),
                    &table.name,
                    &ident.text
                ));
            };
            out.push(column.id);
        }
        Ok(out)
    }

    /// Find the table and key a FOREIGN KEY points at. Lookup order: the
    /// table under construction, the statement schema, the session's current
    /// schema.
    fn resolve_referenced_key(
        catalog: &Catalog,
        session: &SessionContext,
        schema: &SchemaDef,
        table: &TableDef,
        target: &QualifiedName,
        ref_columns: Option<&[Ident]>,
    ) -> crate::Result<(TableId, KeyId, usize)> {
        let self_reference = target.name.text == table.name
            && target.schema.as_ref().map(|s| s.text == schema.name).unwrap_or(true);

        let referenced: &TableDef = if self_reference {
            table
        } else if let Some(qualifier) = &target.schema {
            let Some(target_schema) = catalog.find_schema_by_name(&qualifier.text) else {
                return_error!(catalog_diag::schema_not_found(
                    qualifier.fragment.clone(),
                    &qualifier.text
                ));
            };
            let Some(found) = catalog.find_table_by_name(target_schema.id, &target.name.text)
            else {
                return_error!(catalog_diag::table_not_found(
                    target.name.fragment.clone(),
                    &target_schema.name,
                    &target.name.text
                ));
            };
            found
        } else {
            let in_statement_schema = catalog.find_table_by_name(schema.id, &target.name.text);
            let found = match in_statement_schema {
                Some(found) => Some(found),
                None => catalog.find_table_by_name(session.schema, &target.name.text),
            };
            let Some(found) = found else {
                return_error!(catalog_diag::table_not_found(
                    target.name.fragment.clone(),
                    &schema.name,
                    &target.name.text
                ));
            };
            found
        };

        let key = match ref_columns {
            // An explicit column list must name a primary or unique key's
            // columns, in order.
            Some(idents) => referenced.keys.iter().find(|key| {
                key.is_referenceable()
                    && key.columns.len() == idents.len()
                    && key.columns.iter().zip(idents).all(|(id, ident)| {
                        referenced
                            .column_by_id(*id)
                            .map(|c| c.name == ident.text)
                            .unwrap_or(false)
                    })
            }),
            None => referenced.primary_key(),
        };
        let Some(key) = key else {
            return_error!(catalog_diag::no_referenceable_key(
                target.name.fragment.clone(),
                &referenced.name
            ));
        };

        Ok((referenced.id, key.id, key.columns.len()))
    }
}
