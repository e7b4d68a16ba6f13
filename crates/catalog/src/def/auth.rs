// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::id::AuthId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthKind {
    User,
    Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthDef {
    pub id: AuthId,
    pub name: String,
    pub kind: AuthKind,
    pub sysadmin: bool,
}
