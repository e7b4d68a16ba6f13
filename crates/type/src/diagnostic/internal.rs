// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::{Diagnostic, Fragment};

/// Internal invariant violation with source location.
pub fn internal_with_location(
    reason: impl Into<String>,
    file: &str,
    line: u32,
    column: u32,
) -> Diagnostic {
    let reason = reason.into();
    Diagnostic {
        code: "M0M03".to_string(),
        statement: None,
        message: format!("internal error: {}", reason),
        column: None,
        fragment: Fragment::None,
        label: Some(format!("invariant violated at {}:{}:{}", file, line, column)),
        help: Some(
            "this should never occur in normal operation, please file a bug report".to_string(),
        ),
        notes: vec![],
        cause: None,
    }
}

pub fn internal(reason: impl Into<String>) -> Diagnostic {
    internal_with_location(reason, "unknown", 0, 0)
}

#[macro_export]
macro_rules! internal_error {
    ($reason:expr) => {
        $crate::diagnostic::internal::internal_with_location(
            $reason,
            file!(),
            line!(),
            column!(),
        )
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::diagnostic::internal::internal_with_location(
            format!($fmt, $($arg)*),
            file!(),
            line!(),
            column!(),
        )
    };
}

#[macro_export]
macro_rules! return_internal_error {
    ($reason:expr) => {
        return Err($crate::Error($crate::internal_error!($reason)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error($crate::internal_error!($fmt, $($arg)*)))
    };
}
