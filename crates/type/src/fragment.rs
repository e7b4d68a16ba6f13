// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use serde::{Deserialize, Serialize};
use std::ops::Deref;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatementLine(pub u32);

impl Deref for StatementLine {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq<i32> for StatementLine {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other as u32
    }
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatementColumn(pub u32);

impl Deref for StatementColumn {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq<i32> for StatementColumn {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other as u32
    }
}

/// Source attribution for diagnostics. `Statement` fragments point back into
/// the submitted statement text, `Internal` fragments are synthesized by the
/// engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fragment {
    None,
    Statement { text: String, line: StatementLine, column: StatementColumn },
    Internal { text: String },
}

impl Fragment {
    pub fn statement(text: impl Into<String>, line: u32, column: u32) -> Self {
        Fragment::Statement {
            text: text.into(),
            line: StatementLine(line),
            column: StatementColumn(column),
        }
    }

    pub fn internal(text: impl Into<String>) -> Self {
        Fragment::Internal { text: text.into() }
    }

    pub fn value(&self) -> &str {
        match self {
            Fragment::None => "",
            Fragment::Statement { text, .. } => text,
            Fragment::Internal { text } => text,
        }
    }

    pub fn line(&self) -> StatementLine {
        match self {
            Fragment::Statement { line, .. } => *line,
            _ => StatementLine(1),
        }
    }

    pub fn column(&self) -> StatementColumn {
        match self {
            Fragment::Statement { column, .. } => *column,
            _ => StatementColumn(0),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Fragment::None)
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Fragment::None
    }
}
