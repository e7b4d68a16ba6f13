// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::SessionContext;
use crate::ast::AstCreateView;
use crate::plan::{CatalogOp, Compiler, Operand, OperationNode, RowSource};
use tessera_catalog::{
    Catalog, ColumnDef, ColumnIndex, CommitAction, Persistence, TableDef, TableKind,
};
use tessera_type::diagnostic::{catalog as catalog_diag, ddl};
use tessera_type::return_error;

impl Compiler {
    pub(crate) fn compile_create_view(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstCreateView,
    ) -> crate::Result<Vec<OperationNode>> {
        let fragment = ast.name.name.fragment.clone();
        let name = ast.name.name.text.clone();

        let schema = Self::resolve_schema(catalog, session, ast.name.schema.as_ref())?.clone();
        Self::check_schema_privilege(catalog, session, &schema, &fragment, "create a view")?;

        if catalog.find_table_by_name(schema.id, &name).is_some() {
            return_error!(catalog_diag::table_already_exists(fragment, &schema.name, &name));
        }

        // Reject a malformed defining query before anything is staged.
        if ast.query.has_order_by {
            return_error!(ddl::view_order_by_not_allowed(ast.query.fragment.clone(), &name));
        }
        if ast.query.has_limit {
            return_error!(ddl::view_limit_not_allowed(ast.query.fragment.clone(), &name));
        }

        if let Some(rename) = &ast.columns {
            if rename.len() != ast.query.columns.len() {
                return_error!(ddl::column_lists_do_not_match(fragment));
            }
        }

        let mut view = TableDef {
            id: catalog.next_table_id(),
            schema: schema.id,
            name,
            kind: TableKind::View,
            persistence: Persistence::Persistent,
            commit_action: CommitAction::Commit,
            columns: vec![],
            keys: vec![],
            children: vec![],
            readonly: false,
            system: false,
            dimension_count: 0,
            fixed: true,
        };

        for (i, projected) in ast.query.columns.iter().enumerate() {
            let column = match &ast.columns {
                Some(rename) => &rename[i],
                None => &projected.name,
            };
            if view.column(&column.text).is_some() {
                return_error!(catalog_diag::column_already_exists(
                    column.fragment.clone(),
                    &view.name,
                    &column.text
                ));
            }
            view.columns.push(ColumnDef {
                id: catalog.next_column_id(),
                name: column.text.clone(),
                ty: projected.ty,
                nullable: true,
                default: None,
                index: ColumnIndex(i as u16),
                dimension: None,
            });
        }

        let node = OperationNode::new(
            CatalogOp::CreateView,
            vec![
                Operand::Str(schema.name.clone()),
                Operand::Table(Box::new(view.clone())),
                Operand::Source(RowSource::Query(ast.query)),
            ],
        );
        catalog.register_table(fragment, view)?;
        Ok(vec![node])
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::plan::CatalogOp;
    use crate::plan::tests::{compile, compile_err, session};
    use tessera_catalog::{Catalog, TableKind};
    use tessera_type::Type;

    fn view_statement(name: &str, columns: Option<Vec<Ident>>, query: AstQuery) -> Statement {
        Statement::CreateView(AstCreateView {
            name: QualifiedName::bare(name),
            columns,
            query,
        })
    }

    fn query(order_by: bool, limit: bool) -> AstQuery {
        AstQuery {
            columns: vec![
                AstQueryColumn { name: "id".into(), ty: Type::Int8 },
                AstQueryColumn { name: "total".into(), ty: Type::Float8 },
            ],
            has_order_by: order_by,
            has_limit: limit,
            fragment: Default::default(),
        }
    }

    #[test]
    fn test_create_view() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let nodes =
            compile(&mut catalog, &ctx, view_statement("totals", None, query(false, false)));

        assert_eq!(nodes[0].op, CatalogOp::CreateView);
        let view = catalog.find_table_by_name(ctx.schema, "totals").unwrap();
        assert_eq!(view.kind, TableKind::View);
        assert_eq!(view.columns.len(), 2);
    }

    #[test]
    fn test_view_rejects_order_by_before_mutation() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let err =
            compile_err(&mut catalog, &ctx, view_statement("totals", None, query(true, false)));
        assert_eq!(err.diagnostic().code, "42000");
        assert!(catalog.find_table_by_name(ctx.schema, "totals").is_none());
    }

    #[test]
    fn test_view_rejects_limit() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let err =
            compile_err(&mut catalog, &ctx, view_statement("totals", None, query(false, true)));
        assert_eq!(err.diagnostic().code, "42000");
    }

    #[test]
    fn test_view_column_rename() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        compile(
            &mut catalog,
            &ctx,
            view_statement(
                "totals",
                Some(vec!["order_id".into(), "amount".into()]),
                query(false, false),
            ),
        );

        let view = catalog.find_table_by_name(ctx.schema, "totals").unwrap();
        assert_eq!(view.columns[0].name, "order_id");
        assert_eq!(view.columns[1].name, "amount");
    }

    #[test]
    fn test_view_column_rename_mismatch() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let err = compile_err(
            &mut catalog,
            &ctx,
            view_statement("totals", Some(vec!["order_id".into()]), query(false, false)),
        );
        assert_eq!(err.diagnostic().code, "M0M03");
    }

    #[test]
    fn test_duplicate_view_name() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        compile(&mut catalog, &ctx, view_statement("totals", None, query(false, false)));
        let err =
            compile_err(&mut catalog, &ctx, view_statement("totals", None, query(false, false)));
        assert_eq!(err.diagnostic().code, "42S01");
    }
}
