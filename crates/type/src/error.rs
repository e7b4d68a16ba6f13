// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::{Fragment, Type};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};

/// A structured error report. `code` carries the five character status code
/// handed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub statement: Option<String>,
    pub message: String,
    pub column: Option<DiagnosticColumn>,
    pub fragment: Fragment,
    pub label: Option<String>,
    pub help: Option<String>,
    pub notes: Vec<String>,
    pub cause: Option<Box<Diagnostic>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticColumn {
    pub name: String,
    pub ty: Type,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.code))
    }
}

#[derive(Debug, PartialEq)]
pub struct Error(pub Diagnostic);

impl Deref for Error {
    type Target = Diagnostic;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Error {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}!{}", self.0.code, self.0.message)?;
        if let Some(label) = &self.0.label {
            if !self.0.fragment.is_none() {
                write!(f, "\n  `{}`: {}", self.0.fragment.value(), label)?;
            } else {
                write!(f, "\n  {}", label)?;
            }
        }
        Ok(())
    }
}

impl Error {
    pub fn diagnostic(self) -> Diagnostic {
        self.0
    }
}

impl std::error::Error for Error {}

#[macro_export]
macro_rules! error {
    ($diagnostic:expr) => {
        $crate::Error($diagnostic)
    };
}

#[macro_export]
macro_rules! return_error {
    ($diagnostic:expr) => {
        return Err($crate::Error($diagnostic))
    };
}
