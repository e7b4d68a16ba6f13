// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::SessionContext;
use crate::ast::{AstDropIndex, AstDropObject, AstDropSchema};
use crate::plan::{CatalogOp, Compiler, Operand, OperationNode};
use tessera_catalog::Catalog;
use tessera_type::diagnostic::{catalog as catalog_diag, ddl};
use tessera_type::return_error;

impl Compiler {
    pub(crate) fn compile_drop_schema(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstDropSchema,
    ) -> crate::Result<Vec<OperationNode>> {
        let Some(schema) = catalog.find_schema_by_name(&ast.name.text) else {
            return_error!(catalog_diag::schema_not_found(
                ast.name.fragment.clone(),
                &ast.name.text
            ));
        };
        if schema.system {
            return_error!(ddl::system_schema_immutable(ast.name.fragment, &schema.name));
        }
        let schema = schema.clone();
        Self::check_schema_privilege(catalog, session, &schema, &ast.name.fragment, "drop a schema")?;

        catalog.drop_schema(schema.id)?;
        Ok(vec![OperationNode::new(
            CatalogOp::DropSchema,
            vec![Operand::Str(schema.name), Operand::Int(ast.cascade as i64)],
        )])
    }

    pub(crate) fn compile_drop_table(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstDropObject,
    ) -> crate::Result<Vec<OperationNode>> {
        Self::compile_drop_relation(catalog, session, ast, CatalogOp::DropTable)
    }

    pub(crate) fn compile_drop_array(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstDropObject,
    ) -> crate::Result<Vec<OperationNode>> {
        Self::compile_drop_relation(catalog, session, ast, CatalogOp::DropArray)
    }

    pub(crate) fn compile_drop_view(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstDropObject,
    ) -> crate::Result<Vec<OperationNode>> {
        Self::compile_drop_relation(catalog, session, ast, CatalogOp::DropView)
    }

    /// DROP TABLE, DROP ARRAY and DROP VIEW each insist on their own kind:
    /// dropping a view with DROP TABLE is an error, and so on.
    fn compile_drop_relation(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstDropObject,
        op: CatalogOp,
    ) -> crate::Result<Vec<OperationNode>> {
        let fragment = ast.name.name.fragment.clone();
        let table = Self::resolve_table(catalog, session, &ast.name)?;

        let (verb, matches) = match op {
            CatalogOp::DropView => ("DROP VIEW", table.is_view()),
            CatalogOp::DropArray => ("DROP ARRAY", table.is_array()),
            _ => ("DROP TABLE", !table.is_view() && !table.is_array()),
        };
        if !matches {
            return_error!(ddl::cannot_drop_kind(
                fragment,
                verb,
                &table.name,
                table.kind_name()
            ));
        }
        if table.system {
            return_error!(ddl::system_table_immutable(fragment, &table.name));
        }

        let table = table.clone();
        let schema = catalog.get_schema(table.schema)?.clone();
        Self::check_schema_privilege(catalog, session, &schema, &fragment, "drop a table")?;

        catalog.drop_table(table.id)?;
        Ok(vec![OperationNode::new(
            op,
            vec![
                Operand::Str(schema.name),
                Operand::Str(table.name),
                Operand::Int(ast.cascade as i64),
            ],
        )])
    }

    pub(crate) fn compile_drop_index(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstDropIndex,
    ) -> crate::Result<Vec<OperationNode>> {
        let schema = Self::resolve_schema(catalog, session, ast.name.schema.as_ref())?;
        Ok(vec![OperationNode::new(
            CatalogOp::DropIndex,
            vec![Operand::Str(schema.name.clone()), Operand::Str(ast.name.name.text)],
        )])
    }
}
