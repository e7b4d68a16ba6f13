// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::SessionContext;
use crate::ast::{AstColumn, AstColumnConstraint, AstDimension, AstLiteral, AstTableConstraint, ColumnOption, Ident};
use crate::plan::Compiler;
use tessera_catalog::{Catalog, ColumnDef, ColumnIndex, DimensionDef, SchemaDef, TableDef};
use tessera_type::diagnostic::{catalog as catalog_diag, ddl};
use tessera_type::{Fragment, Type, Value, return_error, return_internal_error};

impl Compiler {
    pub(crate) fn compile_column(
        catalog: &mut Catalog,
        session: &SessionContext,
        schema: &SchemaDef,
        table: &mut TableDef,
        ast: AstColumn,
        is_array: bool,
    ) -> crate::Result<()> {
        if table.column(&ast.name.text).is_some() {
            return_error!(catalog_diag::column_already_exists(
                ast.name.fragment.clone(),
                &table.name,
                &ast.name.text
            ));
        }

        let dimension = match ast.dimension {
            Some(range) => {
                if !is_array {
                    return_error!(ddl::dimension_outside_array(
                        ast.name.fragment.clone(),
                        &ast.name.text
                    ));
                }
                Some(Self::compile_dimension(&ast.name, ast.ty, range)?)
            }
            None => None,
        };

        table.columns.push(ColumnDef {
            id: catalog.next_column_id(),
            name: ast.name.text.clone(),
            ty: ast.ty,
            nullable: true,
            default: None,
            index: ColumnIndex(table.columns.len() as u16),
            dimension,
        });

        // Options apply in order; the first failing option aborts the column
        // and with it the whole statement.
        for option in ast.options {
            match option {
                ColumnOption::Default(literal) => {
                    let value = literal.value.coerce_to(ast.ty, &literal.fragment)?;
                    table.column_mut(&ast.name.text).unwrap().default = Some(value);
                }
                ColumnOption::NotNull => {
                    table.column_mut(&ast.name.text).unwrap().nullable = false;
                }
                ColumnOption::Null => {
                    table.column_mut(&ast.name.text).unwrap().nullable = true;
                }
                ColumnOption::Constraint { name, constraint, fragment } => {
                    let constraint = match constraint {
                        AstColumnConstraint::PrimaryKey => {
                            AstTableConstraint::PrimaryKey(vec![ast.name.clone()])
                        }
                        AstColumnConstraint::Unique => {
                            AstTableConstraint::Unique(vec![ast.name.clone()])
                        }
                        AstColumnConstraint::ForeignKey {
                            table: target,
                            columns,
                            on_update,
                            on_delete,
                        } => AstTableConstraint::ForeignKey {
                            columns: vec![ast.name.clone()],
                            table: target,
                            ref_columns: columns,
                            on_update,
                            on_delete,
                        },
                    };
                    Self::add_key(catalog, session, schema, table, name, constraint, fragment)?;
                }
            }
        }

        Ok(())
    }

    /// Turn a parsed dimension range into bound `start`, `step` and `stop`
    /// values of the column's type.
    fn compile_dimension(
        column: &Ident,
        ty: Type,
        range: AstDimension,
    ) -> crate::Result<DimensionDef> {
        let coerce = |literal: &AstLiteral| literal.value.coerce_to(ty, &literal.fragment);
        let coerce_opt = |literal: &Option<AstLiteral>| -> crate::Result<Option<Value>> {
            literal.as_ref().map(&coerce).transpose()
        };

        match range {
            AstDimension::Unbounded { .. } => Ok(DimensionDef::default()),
            AstDimension::Size(literal) => {
                // [N] is sugar for [0:1:N] and only works for integers.
                if !ty.is_integer() || !literal.value.is_integer() {
                    return_error!(ddl::dimension_requires_integer_column(
                        literal.fragment.clone(),
                        &column.text,
                        ty
                    ));
                }
                Ok(DimensionDef {
                    start: Some(Value::Int8(0).coerce_to(ty, &literal.fragment)?),
                    step: Some(Value::Int8(1).coerce_to(ty, &literal.fragment)?),
                    stop: Some(coerce(&literal)?),
                })
            }
            AstDimension::NegativeSize(literal) => {
                if !ty.is_integer() || !literal.value.is_integer() {
                    return_error!(ddl::dimension_requires_integer_column(
                        literal.fragment.clone(),
                        &column.text,
                        ty
                    ));
                }
                let stop = coerce(&literal)?.negate(&literal.fragment)?;
                Ok(DimensionDef {
                    start: Some(Value::Int8(0).coerce_to(ty, &literal.fragment)?),
                    step: Some(Value::Int8(-1).coerce_to(ty, &literal.fragment)?),
                    stop: Some(stop),
                })
            }
            AstDimension::Range { start, stop, fragment } => {
                // Without an explicit step, integers count by one and
                // everything else stays unbound.
                let step = if ty.is_integer() {
                    Some(Value::Int8(1).coerce_to(ty, &fragment)?)
                } else {
                    None
                };
                Ok(DimensionDef { start: coerce_opt(&start)?, step, stop: coerce_opt(&stop)? })
            }
            AstDimension::SteppedRange { start, step, stop, fragment } => {
                if step.is_some() && (ty == Type::Utf8 || ty.is_temporal()) {
                    return_error!(ddl::dimension_step_not_supported(fragment, ty));
                }
                Ok(DimensionDef {
                    start: coerce_opt(&start)?,
                    step: coerce_opt(&step)?,
                    stop: coerce_opt(&stop)?,
                })
            }
        }
    }
}
