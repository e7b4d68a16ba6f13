// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

//! User defined types only pass through the compiler. They are registered
//! by the executor against the type subsystem, so both operations reduce
//! to a node carrying the resolved names.

use crate::SessionContext;
use crate::ast::{AstCreateType, AstDropType};
use crate::plan::{CatalogOp, Compiler, Operand, OperationNode};
use tessera_catalog::Catalog;

impl Compiler {
    pub(crate) fn compile_create_type(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstCreateType,
    ) -> crate::Result<Vec<OperationNode>> {
        let schema = Self::resolve_schema(catalog, session, ast.name.schema.as_ref())?.clone();
        Self::check_schema_privilege(
            catalog,
            session,
            &schema,
            &ast.name.name.fragment,
            "create a type",
        )?;
        Ok(vec![OperationNode::new(
            CatalogOp::CreateType,
            vec![
                Operand::Str(schema.name),
                Operand::Str(ast.name.name.text),
                Operand::Str(ast.external.text),
            ],
        )])
    }

    pub(crate) fn compile_drop_type(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstDropType,
    ) -> crate::Result<Vec<OperationNode>> {
        let schema = Self::resolve_schema(catalog, session, ast.name.schema.as_ref())?.clone();
        Self::check_schema_privilege(
            catalog,
            session,
            &schema,
            &ast.name.name.fragment,
            "drop a type",
        )?;
        Ok(vec![OperationNode::new(
            CatalogOp::DropType,
            vec![
                Operand::Str(schema.name),
                Operand::Str(ast.name.name.text),
                Operand::Int(ast.cascade as i64),
            ],
        )])
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::plan::CatalogOp;
    use crate::plan::tests::{compile, compile_err, session};
    use tessera_catalog::Catalog;

    #[test]
    fn test_create_type() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let nodes = compile(
            &mut catalog,
            &ctx,
            Statement::CreateType(AstCreateType {
                name: QualifiedName::bare("inet"),
                external: "inet_impl".into(),
            }),
        );
        assert_eq!(nodes[0].op, CatalogOp::CreateType);
        assert_eq!(nodes[0].operands[0].as_str(), Some("sys"));
        assert_eq!(nodes[0].operands[2].as_str(), Some("inet_impl"));
    }

    #[test]
    fn test_drop_type_unknown_schema() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let err = compile_err(
            &mut catalog,
            &ctx,
            Statement::DropType(AstDropType {
                name: QualifiedName::qualified("nope", "inet"),
                cascade: false,
            }),
        );
        assert_eq!(err.diagnostic().code, "3F000");
    }
}
