// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::ast::AstQuery;
use tessera_catalog::TableDef;
use tessera_type::{Type, Value};

/// Catalog operation tag. One per DDL effect the executor can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOp {
    CreateSchema,
    DropSchema,
    CreateTable,
    CreateArray,
    CreateView,
    DropTable,
    DropArray,
    DropView,
    AlterTable,
    DropConstraint,
    CreateIndex,
    DropIndex,
    CreateType,
    DropType,
    Grant,
    Revoke,
    GrantRoles,
    RevokeRoles,
    CreateRole,
    DropRole,
    CreateUser,
    DropUser,
    AlterUser,
    RenameUser,
    Insert,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Int(i64),
    Str(String),
    Value(Value),
    Table(Box<TableDef>),
    Source(RowSource),
}

impl Operand {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Operand::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Operand::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableDef> {
        match self {
            Operand::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_source(&self) -> Option<&RowSource> {
        match self {
            Operand::Source(s) => Some(s),
            _ => None,
        }
    }
}

/// Row producing subplan attached to an operation. Arrays are filled by
/// joining per-column generators on the synthesized row id.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSource {
    /// `start, start + step, ...` up to but excluding `stop`, each value
    /// repeated `repeat` times, the whole sequence tiled `tile` times.
    DimensionSeries {
        column: String,
        ty: Type,
        start: Value,
        step: Value,
        stop: Value,
        repeat: u64,
        tile: u64,
    },
    /// `count` copies of one value.
    ConstantFiller { column: String, ty: Type, count: u64, value: Value },
    RowIdJoin { left: Box<RowSource>, right: Box<RowSource> },
    Project { input: Box<RowSource>, columns: Vec<String> },
    Query(AstQuery),
}

impl RowSource {
    pub fn row_count(&self) -> Option<u64> {
        match self {
            RowSource::DimensionSeries { start, step, stop, repeat, tile, .. } => {
                let (start, step, stop) = (start.as_f64()?, step.as_f64()?, stop.as_f64()?);
                let count = ((stop - start) / step).ceil().max(0.0) as u64;
                Some(count * repeat * tile)
            }
            RowSource::ConstantFiller { count, .. } => Some(*count),
            RowSource::RowIdJoin { left, .. } => left.row_count(),
            RowSource::Project { input, .. } => input.row_count(),
            RowSource::Query(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationNode {
    pub op: CatalogOp,
    pub operands: Vec<Operand>,
    pub inputs: Vec<OperationNode>,
}

impl OperationNode {
    pub fn new(op: CatalogOp, operands: Vec<Operand>) -> Self {
        OperationNode { op, operands, inputs: vec![] }
    }

    pub fn with_input(op: CatalogOp, operands: Vec<Operand>, input: OperationNode) -> Self {
        OperationNode { op, operands, inputs: vec![input] }
    }

    pub fn table(&self) -> Option<&TableDef> {
        self.operands.iter().find_map(|o| o.as_table())
    }
}
