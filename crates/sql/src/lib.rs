// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

pub mod ast;
pub mod plan;
mod session;

pub use session::SessionContext;
pub use tessera_type::{Error, Result};
