// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

pub mod diagnostic;
mod error;
mod fragment;
mod value;

pub use error::{Diagnostic, DiagnosticColumn, Error};
pub use fragment::{Fragment, StatementColumn, StatementLine};
pub use value::{Type, Value};

pub type Result<T> = std::result::Result<T, Error>;
