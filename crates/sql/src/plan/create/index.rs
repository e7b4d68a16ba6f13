// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::SessionContext;
use crate::ast::AstCreateIndex;
use crate::plan::{CatalogOp, Compiler, Operand, OperationNode};
use tessera_catalog::Catalog;
use tessera_type::diagnostic::catalog as catalog_diag;
use tessera_type::return_error;

impl Compiler {
    pub(crate) fn compile_create_index(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstCreateIndex,
    ) -> crate::Result<Vec<OperationNode>> {
        let table = Self::resolve_table(catalog, session, &ast.table)?;
        let schema = catalog.get_schema(table.schema)?;

        let mut operands = vec![
            Operand::Str(ast.name.text),
            Operand::Int(ast.unique as i64),
            Operand::Str(schema.name.clone()),
            Operand::Str(table.name.clone()),
        ];
        for column in &ast.columns {
            if table.column(&column.text).is_none() {
                return_error!(catalog_diag::column_not_found(
                    column.fragment.clone(),
                    &table.name,
                    &column.text
                ));
            }
            operands.push(Operand::Str(column.text.clone()));
        }

        Ok(vec![OperationNode::new(CatalogOp::CreateIndex, operands)])
    }
}
