// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::Catalog;
use crate::def::KeyDef;
use crate::id::SchemaId;

impl Catalog {
    /// Constraint names are unique per schema, so the lookup scans every
    /// table of the schema.
    pub fn find_key_by_name(&self, schema: SchemaId, name: &str) -> Option<&KeyDef> {
        self.tables(schema).flat_map(|t| t.keys.iter()).find(|k| k.name == name)
    }
}
