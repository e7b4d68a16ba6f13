// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::id::{AuthId, SchemaId, TableId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDef {
    pub id: SchemaId,
    pub name: String,
    /// Creating authorization.
    pub owner: AuthId,
    /// Authorization granted control over the schema's objects.
    pub auth: AuthId,
    pub tables: Vec<TableId>,
    pub system: bool,
}
