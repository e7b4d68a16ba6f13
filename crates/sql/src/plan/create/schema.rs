// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::SessionContext;
use crate::ast::{AstCreateSchema, Statement};
use crate::plan::{CatalogOp, Compiler, Operand, OperationNode};
use tessera_catalog::{Catalog, SchemaToCreate};
use tessera_type::diagnostic::{catalog as catalog_diag, ddl};
use tessera_type::{Fragment, return_error, return_internal_error};

impl Compiler {
    /// CREATE SCHEMA with optional inline elements. The schema is staged so
    /// the elements can bind against it; if any element fails the stage is
    /// rolled back and nothing of the statement survives.
    pub(crate) fn compile_create_schema(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstCreateSchema,
    ) -> crate::Result<Vec<OperationNode>> {
        let auth = match &ast.authorization {
            Some(ident) => {
                let Some(auth) = catalog.find_auth_by_name(&ident.text) else {
                    return_error!(catalog_diag::auth_not_found(
                        ident.fragment.clone(),
                        &ident.text
                    ));
                };
                auth.clone()
            }
            None => catalog.get_auth(session.user)?.clone(),
        };

        // The schema name defaults to the authorization name.
        let (name, fragment) = match &ast.name {
            Some(ident) => (ident.text.clone(), ident.fragment.clone()),
            None => (auth.name.clone(), Fragment::None),
        };

        let user = catalog.get_auth(session.user)?;
        let role = catalog.get_auth(session.role).ok();
        if !user.sysadmin && !role.map(|r| r.sysadmin).unwrap_or(false) {
            let user = user.name.clone();
            return_error!(ddl::insufficient_privileges(fragment, &user, "create a schema"));
        }

        if catalog.find_schema_by_name(&name).is_some() {
            return_error!(catalog_diag::schema_already_exists(fragment, &name));
        }

        let schema = catalog.create_schema(SchemaToCreate {
            fragment,
            name: name.clone(),
            owner: session.user,
            auth: auth.id,
        })?;

        let mut nodes = vec![OperationNode::new(
            CatalogOp::CreateSchema,
            vec![Operand::Str(name), Operand::Str(auth.name)],
        )];

        // Elements compile against the new schema.
        let ctx = session.with_schema(schema);
        for element in ast.elements {
            if !matches!(
                element,
                Statement::CreateTable(_)
                    | Statement::CreateView(_)
                    | Statement::CreateIndex(_)
                    | Statement::Grant(_)
            ) {
                catalog.drop_schema(schema)?;
                return_internal_error!("unexpected element in CREATE SCHEMA: {:?}", element);
            }
            match Self::compile(catalog, &ctx, element) {
                Ok(mut compiled) => nodes.append(&mut compiled),
                Err(err) => {
                    catalog.drop_schema(schema)?;
                    return Err(err);
                }
            }
        }

        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::plan::tests::{column, compile, compile_err, session, statement_create_table};
    use crate::plan::{CatalogOp, compile_statement};
    use tessera_catalog::Catalog;
    use tessera_type::Type;

    fn schema_statement(name: &str, elements: Vec<Statement>) -> Statement {
        Statement::CreateSchema(AstCreateSchema {
            name: Some(name.into()),
            authorization: None,
            elements,
        })
    }

    #[test]
    fn test_create_schema() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let nodes = compile(&mut catalog, &ctx, schema_statement("shop", vec![]));
        assert_eq!(nodes[0].op, CatalogOp::CreateSchema);
        assert!(catalog.find_schema_by_name("shop").is_some());
    }

    #[test]
    fn test_schema_name_defaults_to_authorization() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let statement = Statement::CreateSchema(AstCreateSchema {
            name: None,
            authorization: Some("sysadmin".into()),
            elements: vec![],
        });
        compile(&mut catalog, &ctx, statement);
        assert!(catalog.find_schema_by_name("sysadmin").is_some());
    }

    #[test]
    fn test_unknown_authorization() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let statement = Statement::CreateSchema(AstCreateSchema {
            name: Some("shop".into()),
            authorization: Some("nobody".into()),
            elements: vec![],
        });
        let err = compile_err(&mut catalog, &ctx, statement);
        assert_eq!(err.diagnostic().code, "28000");
    }

    #[test]
    fn test_elements_bind_against_new_schema() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let nodes = compile(
            &mut catalog,
            &ctx,
            schema_statement(
                "shop",
                vec![statement_create_table("orders", vec![column("id", Type::Int8, vec![])])],
            ),
        );

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].op, CatalogOp::CreateTable);
        let schema = catalog.find_schema_by_name("shop").unwrap().id;
        assert!(catalog.find_table_by_name(schema, "orders").is_some());
    }

    #[test]
    fn test_failing_element_rolls_back_schema() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let statement = schema_statement(
            "shop",
            vec![
                statement_create_table("orders", vec![column("id", Type::Int8, vec![])]),
                statement_create_table(
                    "bad",
                    vec![column("x", Type::Int8, vec![]), column("x", Type::Int8, vec![])],
                ),
            ],
        );
        let err = compile_statement(&mut catalog, &ctx, statement).unwrap_err();
        assert_eq!(err.diagnostic().code, "42S21");
        // nothing survives
        assert!(catalog.find_schema_by_name("shop").is_none());
    }

    #[test]
    fn test_duplicate_schema() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        compile(&mut catalog, &ctx, schema_statement("shop", vec![]));
        let err = compile_err(&mut catalog, &ctx, schema_statement("shop", vec![]));
        assert_eq!(err.diagnostic().code, "3F000");
    }
}
