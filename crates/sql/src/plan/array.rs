// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::plan::{Compiler, RowSource};
use tessera_catalog::TableDef;
use tessera_type::diagnostic::ddl;
use tessera_type::{Fragment, Value, return_error, return_internal_error};

impl Compiler {
    /// Build the row source that fills a fully bound array. Every dimension
    /// contributes one value series; the cross product falls out of repeat
    /// and tile factors: a dimension's values each repeat once per cell of
    /// the dimensions declared after it, and the whole series tiles once per
    /// cell of the dimensions declared before it. Non-dimension columns are
    /// filled with their default.
    pub(crate) fn materialize_array(
        table: &TableDef,
        fragment: &Fragment,
    ) -> crate::Result<RowSource> {
        let dimensions: Vec<_> = table.dimension_columns().collect();
        if dimensions.len() != table.dimension_count || dimensions.is_empty() {
            return_internal_error!(
                "array `{}` asked to materialize with unbound dimensions",
                table.name
            );
        }

        let mut bounds = Vec::with_capacity(dimensions.len());
        let mut counts = Vec::with_capacity(dimensions.len());
        for column in &dimensions {
            if !column.ty.is_number() {
                return_error!(ddl::dimension_type_not_supported(fragment.clone(), column.ty));
            }
            let dimension = column.dimension.as_ref();
            let bound = dimension.and_then(|d| {
                Some((d.start.clone()?, d.step.clone()?, d.stop.clone()?))
            });
            let Some((start, step, stop)) = bound else {
                return_internal_error!(
                    "array `{}` asked to materialize with unbound dimensions",
                    table.name
                );
            };
            let numeric = (start.as_f64(), step.as_f64(), stop.as_f64());
            let (Some(start_n), Some(step_n), Some(stop_n)) = numeric else {
                return_error!(ddl::dimension_type_not_supported(fragment.clone(), column.ty));
            };
            let count = if step_n == 0.0 {
                0
            } else {
                ((stop_n - start_n) / step_n).ceil().max(0.0) as u64
            };
            bounds.push((start, step, stop));
            counts.push(count);
        }

        let mut sources = Vec::with_capacity(table.columns.len());
        let mut dimension_index = 0;
        for column in &table.columns {
            let source = if column.is_dimension() {
                let i = dimension_index;
                dimension_index += 1;
                let (start, step, stop) = bounds[i].clone();
                RowSource::DimensionSeries {
                    column: column.name.clone(),
                    ty: column.ty,
                    start,
                    step,
                    stop,
                    repeat: counts[i + 1..].iter().product(),
                    tile: counts[..i].iter().product(),
                }
            } else {
                RowSource::ConstantFiller {
                    column: column.name.clone(),
                    ty: column.ty,
                    count: counts.iter().product(),
                    value: column.default.clone().unwrap_or(Value::Undefined),
                }
            };
            sources.push(source);
        }

        let mut sources = sources.into_iter();
        let Some(mut joined) = sources.next() else {
            return_internal_error!("array `{}` has no columns", table.name);
        };
        for right in sources {
            joined = RowSource::RowIdJoin { left: Box::new(joined), right: Box::new(right) };
        }
        Ok(RowSource::Project {
            input: Box::new(joined),
            columns: table.columns.iter().map(|c| c.name.clone()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::plan::tests::{
        column, compile, dimension_column, session, statement_create_array,
    };
    use crate::plan::{CatalogOp, Operand, RowSource};
    use tessera_catalog::Catalog;
    use tessera_type::{Type, Value};

    fn range(start: i64, stop: i64) -> AstDimension {
        AstDimension::Range {
            start: Some(start.into()),
            stop: Some(stop.into()),
            fragment: Default::default(),
        }
    }

    fn materialized(nodes: &[crate::plan::OperationNode]) -> &RowSource {
        assert_eq!(nodes[0].op, CatalogOp::Insert);
        assert_eq!(nodes[0].inputs[0].op, CatalogOp::CreateArray);
        nodes[0].operands[2].as_source().unwrap()
    }

    fn series<'a>(source: &'a RowSource, column: &str) -> &'a RowSource {
        match source {
            RowSource::Project { input, .. } => series(input, column),
            RowSource::RowIdJoin { left, right } => {
                if let Some(found) = try_series(left, column) {
                    return found;
                }
                try_series(right, column).unwrap()
            }
            other => try_series(other, column).unwrap(),
        }
    }

    fn try_series<'a>(source: &'a RowSource, name: &str) -> Option<&'a RowSource> {
        match source {
            RowSource::DimensionSeries { column, .. } if column == name => Some(source),
            RowSource::ConstantFiller { column, .. } if column == name => Some(source),
            RowSource::RowIdJoin { left, right } => {
                try_series(left, name).or_else(|| try_series(right, name))
            }
            _ => None,
        }
    }

    #[test]
    fn test_two_dimensional_array() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        // 3 rows by 4 columns
        let nodes = compile(
            &mut catalog,
            &ctx,
            statement_create_array(
                "grid",
                vec![
                    dimension_column("x", Type::Int4, range(0, 3)),
                    dimension_column("y", Type::Int4, range(0, 4)),
                    column("v", Type::Float8, vec![]),
                ],
            ),
        );

        let source = materialized(&nodes);
        assert_eq!(source.row_count(), Some(12));

        let RowSource::DimensionSeries { repeat, tile, .. } = series(source, "x") else {
            panic!("x is a dimension");
        };
        assert_eq!((*repeat, *tile), (4, 1));

        let RowSource::DimensionSeries { repeat, tile, .. } = series(source, "y") else {
            panic!("y is a dimension");
        };
        assert_eq!((*repeat, *tile), (1, 3));

        let RowSource::ConstantFiller { count, value, .. } = series(source, "v") else {
            panic!("v is a filler");
        };
        assert_eq!(*count, 12);
        assert_eq!(*value, Value::Undefined);
    }

    #[test]
    fn test_filler_uses_column_default() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let nodes = compile(
            &mut catalog,
            &ctx,
            statement_create_array(
                "grid",
                vec![
                    dimension_column("x", Type::Int4, AstDimension::Size(5i64.into())),
                    column("v", Type::Float8, vec![ColumnOption::Default(1i64.into())]),
                ],
            ),
        );

        let source = materialized(&nodes);
        let RowSource::ConstantFiller { count, value, .. } = series(source, "v") else {
            panic!("v is a filler");
        };
        assert_eq!(*count, 5);
        assert_eq!(*value, Value::Float8(1.0));
    }

    #[test]
    fn test_fractional_step_rounds_up() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        // [0 : 0.4 : 1) holds 0, 0.4 and 0.8
        let half = AstLiteral { value: Value::Float8(0.4), fragment: Default::default() };
        let nodes = compile(
            &mut catalog,
            &ctx,
            statement_create_array(
                "line",
                vec![dimension_column(
                    "x",
                    Type::Float8,
                    AstDimension::SteppedRange {
                        start: Some(0i64.into()),
                        step: Some(half),
                        stop: Some(1i64.into()),
                        fragment: Default::default(),
                    },
                )],
            ),
        );

        assert_eq!(materialized(&nodes).row_count(), Some(3));
    }

    #[test]
    fn test_negative_size_counts_downwards() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        // [-4] is [0 : -1 : -4), four values going down
        let nodes = compile(
            &mut catalog,
            &ctx,
            statement_create_array(
                "line",
                vec![dimension_column("x", Type::Int4, AstDimension::NegativeSize(4i64.into()))],
            ),
        );

        assert_eq!(materialized(&nodes).row_count(), Some(4));
    }

    #[test]
    fn test_unbound_array_is_not_materialized() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let nodes = compile(
            &mut catalog,
            &ctx,
            statement_create_array(
                "stream",
                vec![
                    dimension_column(
                        "x",
                        Type::Int4,
                        AstDimension::Unbounded { fragment: Default::default() },
                    ),
                    column("v", Type::Float8, vec![]),
                ],
            ),
        );

        // bare CreateArray, no insert wrapper
        assert_eq!(nodes[0].op, CatalogOp::CreateArray);
        assert!(nodes[0].inputs.is_empty());
        assert!(!nodes[0].table().unwrap().fixed);
    }

    #[test]
    fn test_three_dimensions_compose() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let nodes = compile(
            &mut catalog,
            &ctx,
            statement_create_array(
                "cube",
                vec![
                    dimension_column("x", Type::Int4, range(0, 2)),
                    dimension_column("y", Type::Int4, range(0, 3)),
                    dimension_column("z", Type::Int4, range(0, 4)),
                ],
            ),
        );

        let source = materialized(&nodes);
        assert_eq!(source.row_count(), Some(24));

        let RowSource::DimensionSeries { repeat, tile, .. } = series(source, "y") else {
            panic!("y is a dimension");
        };
        // middle dimension repeats per z value and tiles per x value
        assert_eq!((*repeat, *tile), (4, 2));
    }

    #[test]
    fn test_operand_shape() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let nodes = compile(
            &mut catalog,
            &ctx,
            statement_create_array(
                "grid",
                vec![dimension_column("x", Type::Int4, range(0, 2))],
            ),
        );

        assert_eq!(nodes[0].operands[0], Operand::Str("sys".to_string()));
        assert_eq!(nodes[0].operands[1], Operand::Str("grid".to_string()));
        assert!(matches!(nodes[0].operands[2], Operand::Source(RowSource::Project { .. })));
    }
}
