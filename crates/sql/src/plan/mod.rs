// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

mod alter;
mod array;
mod create;
mod drop;
mod operation;
mod principal;
mod typedef;

pub use operation::{CatalogOp, Operand, OperationNode, RowSource};

use crate::SessionContext;
use crate::ast::{Ident, QualifiedName, Statement};
use tessera_catalog::{Catalog, SchemaDef, TableDef};
use tessera_type::diagnostic::{catalog as catalog_diag, ddl};
use tessera_type::{Fragment, return_error};
use tracing::instrument;

pub(crate) struct Compiler;

/// Compile one statement against the catalog. On success the catalog
/// reflects created objects and the returned nodes describe the operations
/// for the executor, in order.
#[instrument(skip_all)]
pub fn compile_statement(
    catalog: &mut Catalog,
    session: &SessionContext,
    statement: Statement,
) -> crate::Result<Vec<OperationNode>> {
    if catalog.is_read_only()
        && !matches!(statement, Statement::CreateTable(_) | Statement::CreateView(_))
    {
        return_error!(ddl::database_read_only(Fragment::None));
    }
    Compiler::compile(catalog, session, statement)
}

impl Compiler {
    fn compile(
        catalog: &mut Catalog,
        session: &SessionContext,
        statement: Statement,
    ) -> crate::Result<Vec<OperationNode>> {
        match statement {
            Statement::CreateSchema(node) => Self::compile_create_schema(catalog, session, node),
            Statement::DropSchema(node) => Self::compile_drop_schema(catalog, session, node),
            Statement::CreateTable(node) => Self::compile_create_table(catalog, session, node),
            Statement::CreateView(node) => Self::compile_create_view(catalog, session, node),
            Statement::DropTable(node) => Self::compile_drop_table(catalog, session, node),
            Statement::DropArray(node) => Self::compile_drop_array(catalog, session, node),
            Statement::DropView(node) => Self::compile_drop_view(catalog, session, node),
            Statement::AlterTable(node) => Self::compile_alter_table(catalog, session, node),
            Statement::CreateIndex(node) => Self::compile_create_index(catalog, session, node),
            Statement::DropIndex(node) => Self::compile_drop_index(catalog, session, node),
            Statement::CreateType(node) => Self::compile_create_type(catalog, session, node),
            Statement::DropType(node) => Self::compile_drop_type(catalog, session, node),
            Statement::Grant(node) => Self::compile_grant(catalog, session, node, false),
            Statement::Revoke(node) => Self::compile_grant(catalog, session, node, true),
            Statement::GrantRoles(node) => Self::compile_role_grant(catalog, node, false),
            Statement::RevokeRoles(node) => Self::compile_role_grant(catalog, node, true),
            Statement::CreateRole(node) => Self::compile_create_role(catalog, node),
            Statement::DropRole(node) => Self::compile_drop_role(catalog, node),
            Statement::CreateUser(node) => Self::compile_create_user(catalog, node),
            Statement::DropUser(node) => Self::compile_drop_user(catalog, node),
            Statement::AlterUser(node) => Self::compile_alter_user(catalog, node),
            Statement::RenameUser(node) => Self::compile_rename_user(catalog, node),
        }
    }

    /// Bind the explicit schema qualifier, falling back to the session's
    /// current schema.
    pub(crate) fn resolve_schema<'a>(
        catalog: &'a Catalog,
        session: &SessionContext,
        name: Option<&Ident>,
    ) -> crate::Result<&'a SchemaDef> {
        match name {
            Some(ident) => {
                let Some(schema) = catalog.find_schema_by_name(&ident.text) else {
                    return_error!(catalog_diag::schema_not_found(
                        ident.fragment.clone(),
                        &ident.text
                    ));
                };
                Ok(schema)
            }
            None => catalog.get_schema(session.schema),
        }
    }

    /// Bind a possibly qualified table name against the session.
    pub(crate) fn resolve_table<'a>(
        catalog: &'a Catalog,
        session: &SessionContext,
        name: &QualifiedName,
    ) -> crate::Result<&'a TableDef> {
        let schema = Self::resolve_schema(catalog, session, name.schema.as_ref())?;
        let Some(table) = catalog.find_table_by_name(schema.id, &name.name.text) else {
            return_error!(catalog_diag::table_not_found(
                name.name.fragment.clone(),
                &schema.name,
                &name.name.text
            ));
        };
        Ok(table)
    }

    pub(crate) fn check_schema_privilege(
        catalog: &Catalog,
        session: &SessionContext,
        schema: &SchemaDef,
        fragment: &Fragment,
        action: &str,
    ) -> crate::Result<()> {
        if catalog.check_schema_privilege(session.user, schema)
            || catalog.check_schema_privilege(session.role, schema)
        {
            return Ok(());
        }
        let user = catalog.get_auth(session.user)?;
        return_error!(ddl::insufficient_privileges(fragment.clone(), &user.name, action));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ast::{
        AstColumn, AstCreateTable, AstDimension, AstTableKind, AstTableSource, AstTemporaryScope,
        ColumnOption, TableElement,
    };
    use tessera_type::{Error, Type};

    pub(crate) fn session(catalog: &Catalog) -> SessionContext {
        SessionContext::system(catalog)
    }

    pub(crate) fn compile(
        catalog: &mut Catalog,
        session: &SessionContext,
        statement: Statement,
    ) -> Vec<OperationNode> {
        compile_statement(catalog, session, statement).unwrap()
    }

    pub(crate) fn compile_err(
        catalog: &mut Catalog,
        session: &SessionContext,
        statement: Statement,
    ) -> Error {
        compile_statement(catalog, session, statement).unwrap_err()
    }

    pub(crate) fn column(name: &str, ty: Type, options: Vec<ColumnOption>) -> TableElement {
        TableElement::Column(AstColumn { name: name.into(), ty, options, dimension: None })
    }

    pub(crate) fn dimension_column(name: &str, ty: Type, dimension: AstDimension) -> TableElement {
        TableElement::Column(AstColumn {
            name: name.into(),
            ty,
            options: vec![],
            dimension: Some(dimension),
        })
    }

    pub(crate) fn statement_create_table(name: &str, elements: Vec<TableElement>) -> Statement {
        Statement::CreateTable(AstCreateTable {
            kind: AstTableKind::Table,
            temporary: AstTemporaryScope::None,
            commit_action: None,
            name: crate::ast::QualifiedName::bare(name),
            source: AstTableSource::Elements(elements),
        })
    }

    pub(crate) fn statement_create_array(name: &str, elements: Vec<TableElement>) -> Statement {
        Statement::CreateTable(AstCreateTable {
            kind: AstTableKind::Array,
            temporary: AstTemporaryScope::None,
            commit_action: None,
            name: crate::ast::QualifiedName::bare(name),
            source: AstTableSource::Elements(elements),
        })
    }
}
