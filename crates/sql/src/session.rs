// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use tessera_catalog::{AuthId, Catalog, DEFAULT_SCHEMA, SYSADMIN_ROLE, SYSTEM_USER, SchemaId};

/// Per-session binding context. Passed explicitly to every compile so that
/// nested compilations (CREATE SCHEMA elements) can rebind the current
/// schema on a copy instead of mutating shared session state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionContext {
    pub user: AuthId,
    pub role: AuthId,
    pub schema: SchemaId,
}

impl SessionContext {
    pub fn new(user: AuthId, role: AuthId, schema: SchemaId) -> Self {
        SessionContext { user, role, schema }
    }

    /// Context of the bootstrap system user, bound to the default schema.
    pub fn system(catalog: &Catalog) -> Self {
        let user = catalog.find_auth_by_name(SYSTEM_USER).expect("bootstrap user").id;
        let role = catalog.find_auth_by_name(SYSADMIN_ROLE).expect("bootstrap role").id;
        let schema = catalog.find_schema_by_name(DEFAULT_SCHEMA).expect("bootstrap schema").id;
        SessionContext { user, role, schema }
    }

    pub fn with_schema(&self, schema: SchemaId) -> Self {
        SessionContext { schema, ..*self }
    }
}
