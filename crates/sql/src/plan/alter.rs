// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::SessionContext;
use crate::ast::{AstAlterTable, TableElement};
use crate::plan::{CatalogOp, Compiler, Operand, OperationNode};
use tessera_catalog::{Catalog, TableDef};
use tessera_type::diagnostic::{catalog as catalog_diag, ddl};
use tessera_type::{Fragment, return_error, return_internal_error};

impl Compiler {
    /// ALTER TABLE works on a shadow copy of the descriptor. The emitted
    /// node carries the altered shadow; the live catalog entry is only
    /// replaced when the executor commits it.
    pub(crate) fn compile_alter_table(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstAlterTable,
    ) -> crate::Result<Vec<OperationNode>> {
        let fragment = ast.name.name.fragment.clone();
        let schema = Self::resolve_schema(catalog, session, ast.name.schema.as_ref())?.clone();
        let Some(table) = catalog.find_table_by_name(schema.id, &ast.name.name.text) else {
            return_error!(catalog_diag::table_not_found(
                fragment,
                &schema.name,
                &ast.name.name.text
            ));
        };

        if table.system {
            return_error!(ddl::system_table_immutable(fragment, &table.name));
        }

        let mut shadow = table.clone();
        let mut nodes = vec![];

        if ast.elements.is_empty() {
            shadow.readonly = !shadow.readonly;
        }

        for element in ast.elements {
            Self::check_alter_element(&shadow, &element, &fragment)?;
            match element {
                TableElement::Column(column) => {
                    let is_array = shadow.is_array();
                    Self::compile_column(catalog, session, &schema, &mut shadow, column, is_array)?;
                    shadow.dimension_count = shadow.dimension_columns().count();
                    let fixed = shadow
                        .dimension_columns()
                        .all(|c| c.dimension.as_ref().is_some_and(|d| d.is_fixed()));
                    shadow.fixed = fixed;
                }
                TableElement::Constraint { name, constraint, fragment } => {
                    Self::add_key(catalog, session, &schema, &mut shadow, name, constraint, fragment)?;
                }
                TableElement::SetDefault { column, value } => {
                    let ty = Self::shadow_column(&shadow, &column)?.ty;
                    let coerced = value.value.coerce_to(ty, &value.fragment)?;
                    shadow.column_mut(&column.text).unwrap().default = Some(coerced);
                }
                TableElement::DropDefault { column } => {
                    Self::shadow_column(&shadow, &column)?;
                    shadow.column_mut(&column.text).unwrap().default = None;
                }
                TableElement::SetNull { column, nullable } => {
                    Self::shadow_column(&shadow, &column)?;
                    shadow.column_mut(&column.text).unwrap().nullable = nullable;
                }
                TableElement::DropColumn { column, cascade } => {
                    Self::drop_column(catalog, &mut shadow, &column, cascade)?;
                }
                TableElement::DropConstraint { name, cascade } => {
                    if catalog.find_key_by_name(schema.id, &name.text).is_none()
                        && shadow.key(&name.text).is_none()
                    {
                        return_error!(catalog_diag::key_not_found(
                            name.fragment.clone(),
                            &schema.name,
                            &name.text
                        ));
                    }
                    shadow.keys.retain(|k| k.name != name.text);
                    nodes.push(OperationNode::new(
                        CatalogOp::DropConstraint,
                        vec![
                            Operand::Str(schema.name.clone()),
                            Operand::Str(name.text),
                            Operand::Int(cascade as i64),
                        ],
                    ));
                }
                TableElement::AddChild(child) => {
                    let child = Self::resolve_table(catalog, session, &child)?;
                    if shadow.children.contains(&child.id) {
                        return_error!(ddl::merge_child_already_present(
                            fragment.clone(),
                            &shadow.name,
                            &child.name
                        ));
                    }
                    shadow.children.push(child.id);
                }
                TableElement::DropChild { table: child, cascade: _ } => {
                    let child = Self::resolve_table(catalog, session, &child)?;
                    if !shadow.children.contains(&child.id) {
                        return_error!(ddl::merge_child_missing(
                            fragment.clone(),
                            &shadow.name,
                            &child.name
                        ));
                    }
                    let id = child.id;
                    shadow.children.retain(|c| *c != id);
                }
                TableElement::SetReadonly(readonly) => {
                    shadow.readonly = readonly;
                }
                TableElement::Like(_) => {
                    return_internal_error!("LIKE is not a valid ALTER TABLE element");
                }
            }
        }

        nodes.push(OperationNode::new(
            CatalogOp::AlterTable,
            vec![Operand::Str(schema.name.clone()), Operand::Table(Box::new(shadow))],
        ));
        Ok(nodes)
    }

    /// What a table kind tolerates under ALTER: views nothing, merge and
    /// replica tables only child changes, everything else anything but
    /// child changes.
    fn check_alter_element(
        table: &TableDef,
        element: &TableElement,
        fragment: &Fragment,
    ) -> crate::Result<()> {
        let is_child_op =
            matches!(element, TableElement::AddChild(_) | TableElement::DropChild { .. });
        if table.is_view() {
            return_error!(ddl::view_not_alterable(fragment.clone(), &table.name));
        }
        if table.is_partitioned() && !is_child_op {
            return_error!(ddl::alter_element_not_supported(
                fragment.clone(),
                &table.name,
                "anything besides adding or dropping child tables"
            ));
        }
        if !table.is_partitioned() && is_child_op {
            return_error!(ddl::alter_element_not_supported(
                fragment.clone(),
                &table.name,
                "adding or dropping child tables"
            ));
        }
        Ok(())
    }

    fn shadow_column<'a>(
        shadow: &'a TableDef,
        column: &crate::ast::Ident,
    ) -> crate::Result<&'a tessera_catalog::ColumnDef> {
        let Some(found) = shadow.column(&column.text) else {
            return_error!(catalog_diag::column_not_found(
                column.fragment.clone(),
                &shadow.name,
                &column.text
            ));
        };
        Ok(found)
    }

    /// Drops only touch the shadow. Dependency records for vanished columns
    /// are cleared by `Catalog::commit_table`, so a later failure in the
    /// same statement leaves the registry intact.
    fn drop_column(
        catalog: &Catalog,
        shadow: &mut TableDef,
        column: &crate::ast::Ident,
        cascade: bool,
    ) -> crate::Result<()> {
        let found = Self::shadow_column(shadow, column)?;
        let id = found.id;

        if shadow.columns.len() == 1 {
            return_error!(ddl::drop_last_column(column.fragment.clone(), &shadow.name));
        }

        let has_dependents = catalog.has_column_dependency(shadow.id, id)
            || shadow.keys.iter().any(|k| k.references(id));
        if has_dependents {
            if !cascade {
                return_error!(catalog_diag::column_in_use(
                    column.fragment.clone(),
                    &shadow.name,
                    &column.text
                ));
            }
            shadow.keys.retain(|k| !k.references(id));
        }

        shadow.columns.retain(|c| c.id != id);
        Ok(())
    }
}
