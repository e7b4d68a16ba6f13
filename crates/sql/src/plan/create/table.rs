// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::SessionContext;
use crate::ast::{
    AstCommitAction, AstCreateTable, AstTableKind, AstTableSource, AstTemporaryScope, Ident,
    QualifiedName, TableElement,
};
use crate::plan::{CatalogOp, Compiler, Operand, OperationNode, RowSource};
use tessera_catalog::{
    Catalog, ColumnDef, ColumnIndex, CommitAction, Persistence, SchemaDef, TEMPORARY_SCHEMA,
    TableDef, TableKind,
};
use tessera_type::diagnostic::{catalog as catalog_diag, ddl};
use tessera_type::{return_error, return_internal_error};

impl Compiler {
    pub(crate) fn compile_create_table(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstCreateTable,
    ) -> crate::Result<Vec<OperationNode>> {
        let fragment = ast.name.name.fragment.clone();
        let name = ast.name.name.text.clone();
        let temporary = ast.temporary != AstTemporaryScope::None;

        // Temporary tables always land in the tmp schema.
        let schema: SchemaDef = if temporary {
            if let Some(qualifier) = &ast.name.schema {
                if qualifier.text != TEMPORARY_SCHEMA {
                    return_error!(ddl::temporary_table_schema(
                        qualifier.fragment.clone(),
                        &qualifier.text
                    ));
                }
            }
            catalog
                .find_schema_by_name(TEMPORARY_SCHEMA)
                .expect("bootstrap temporary schema")
                .clone()
        } else {
            let schema = Self::resolve_schema(catalog, session, ast.name.schema.as_ref())?.clone();
            Self::check_schema_privilege(catalog, session, &schema, &fragment, "create a table")?;
            schema
        };

        if catalog.find_table_by_name(schema.id, &name).is_some() {
            return_error!(catalog_diag::table_already_exists(fragment, &schema.name, &name));
        }

        let kind = match ast.kind {
            AstTableKind::Table => TableKind::Table,
            AstTableKind::Array => TableKind::Array,
            AstTableKind::Merge => TableKind::Merge,
            AstTableKind::Replica => TableKind::Replica,
            AstTableKind::Remote { location } => TableKind::Remote { location },
            AstTableKind::Stream => TableKind::Stream,
        };
        let is_array = matches!(kind, TableKind::Array);

        let persistence = match ast.temporary {
            AstTemporaryScope::None => Persistence::Persistent,
            AstTemporaryScope::Local => Persistence::LocalTemporary,
            AstTemporaryScope::Global => Persistence::GlobalTemporary,
        };
        let mut commit_action = match ast.commit_action {
            None | Some(AstCommitAction::Commit) => CommitAction::Commit,
            Some(AstCommitAction::DeleteRows) => CommitAction::Delete,
            Some(AstCommitAction::PreserveRows) => CommitAction::Preserve,
            Some(AstCommitAction::Drop) => CommitAction::Drop,
        };
        // A temporary table that would commit its rows empties them instead.
        if persistence != Persistence::Persistent && commit_action == CommitAction::Commit {
            commit_action = CommitAction::Delete;
        }

        let mut table = TableDef {
            id: catalog.next_table_id(),
            schema: schema.id,
            name,
            kind,
            persistence,
            commit_action,
            columns: vec![],
            keys: vec![],
            children: vec![],
            readonly: false,
            system: false,
            dimension_count: 0,
            fixed: true,
        };

        match ast.source {
            AstTableSource::Elements(elements) => {
                for element in elements {
                    match element {
                        TableElement::Column(column) => Self::compile_column(
                            catalog, session, &schema, &mut table, column, is_array,
                        )?,
                        TableElement::Constraint { name, constraint, fragment } => Self::add_key(
                            catalog, session, &schema, &mut table, name, constraint, fragment,
                        )?,
                        TableElement::Like(source) => {
                            Self::copy_columns_like(catalog, session, &mut table, &source)?
                        }
                        other => {
                            return_internal_error!("unexpected element in CREATE TABLE: {:?}", other)
                        }
                    }
                }

                table.dimension_count = table.dimension_columns().count();
                let fixed = table
                    .dimension_columns()
                    .all(|c| c.dimension.as_ref().is_some_and(|d| d.is_fixed()));
                table.fixed = fixed;
                if is_array && table.dimension_count == 0 {
                    return_error!(ddl::array_requires_dimension(fragment, &table.name));
                }

                let op = if is_array { CatalogOp::CreateArray } else { CatalogOp::CreateTable };
                let create = OperationNode::new(
                    op,
                    vec![
                        Operand::Str(schema.name.clone()),
                        Operand::Table(Box::new(table.clone())),
                    ],
                );
                let node = if is_array && table.fixed {
                    // A fully bound array springs into existence filled.
                    let source = Self::materialize_array(&table, &fragment)?;
                    OperationNode::with_input(
                        CatalogOp::Insert,
                        vec![
                            Operand::Str(schema.name.clone()),
                            Operand::Str(table.name.clone()),
                            Operand::Source(source),
                        ],
                        create,
                    )
                } else {
                    create
                };

                catalog.register_table(fragment, table)?;
                Ok(vec![node])
            }
            AstTableSource::Query { query, columns, with_data } => {
                if let Some(rename) = &columns {
                    if rename.len() != query.columns.len() {
                        return_error!(ddl::column_count_mismatch(
                            fragment,
                            query.columns.len(),
                            rename.len()
                        ));
                    }
                }

                for (i, projected) in query.columns.iter().enumerate() {
                    let column: &Ident = match &columns {
                        Some(rename) => &rename[i],
                        None => &projected.name,
                    };
                    if table.column(&column.text).is_some() {
                        return_error!(catalog_diag::column_already_exists(
                            column.fragment.clone(),
                            &table.name,
                            &column.text
                        ));
                    }
                    table.columns.push(ColumnDef {
                        id: catalog.next_column_id(),
                        name: column.text.clone(),
                        ty: projected.ty,
                        nullable: true,
                        default: None,
                        index: ColumnIndex(i as u16),
                        dimension: None,
                    });
                }

                let create = OperationNode::new(
                    CatalogOp::CreateTable,
                    vec![
                        Operand::Str(schema.name.clone()),
                        Operand::Table(Box::new(table.clone())),
                    ],
                );
                let node = if with_data {
                    OperationNode::with_input(
                        CatalogOp::Insert,
                        vec![
                            Operand::Str(schema.name.clone()),
                            Operand::Str(table.name.clone()),
                            Operand::Source(RowSource::Query(query)),
                        ],
                        create,
                    )
                } else {
                    create
                };

                catalog.register_table(fragment, table)?;
                Ok(vec![node])
            }
        }
    }

    fn copy_columns_like(
        catalog: &mut Catalog,
        session: &SessionContext,
        table: &mut TableDef,
        source: &QualifiedName,
    ) -> crate::Result<()> {
        let src = Self::resolve_table(catalog, session, source)?.clone();
        for column in src.columns {
            if table.column(&column.name).is_some() {
                return_error!(catalog_diag::column_already_exists(
                    source.name.fragment.clone(),
                    &table.name,
                    &column.name
                ));
            }
            // Names and types only. Keys, defaults and dimensions stay behind.
            table.columns.push(ColumnDef {
                id: catalog.next_column_id(),
                name: column.name,
                ty: column.ty,
                nullable: true,
                default: None,
                index: ColumnIndex(table.columns.len() as u16),
                dimension: None,
            });
        }
        Ok(())
    }
}
