// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::Catalog;
use crate::def::{AuthDef, AuthKind, SchemaDef};
use crate::id::AuthId;
use tessera_type::diagnostic::catalog::auth_already_exists;
use tessera_type::{Fragment, return_error, return_internal_error};
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct AuthToCreate {
    pub fragment: Fragment,
    pub name: String,
    pub kind: AuthKind,
    pub sysadmin: bool,
}

impl Catalog {
    pub fn find_auth_by_name(&self, name: &str) -> Option<&AuthDef> {
        self.auths.values().find(|a| a.name == name)
    }

    pub fn get_auth(&self, id: AuthId) -> crate::Result<&AuthDef> {
        let Some(auth) = self.auths.get(&id) else {
            return_internal_error!("authorization {} not in catalog", *id);
        };
        Ok(auth)
    }

    #[instrument(skip_all, fields(auth = %to_create.name))]
    pub fn create_auth(&mut self, to_create: AuthToCreate) -> crate::Result<AuthId> {
        if self.find_auth_by_name(&to_create.name).is_some() {
            return_error!(auth_already_exists(to_create.fragment, &to_create.name));
        }

        let id = self.next_auth_id();
        self.auths.insert(
            id,
            AuthDef {
                id,
                name: to_create.name,
                kind: to_create.kind,
                sysadmin: to_create.sysadmin,
            },
        );
        Ok(id)
    }

    #[instrument(skip(self))]
    pub fn drop_auth(&mut self, id: AuthId) -> crate::Result<()> {
        if self.auths.shift_remove(&id).is_none() {
            return_internal_error!("authorization {} not in catalog", *id);
        }
        Ok(())
    }

    #[instrument(skip(self, name))]
    pub fn rename_auth(&mut self, id: AuthId, name: impl Into<String>) -> crate::Result<()> {
        let name = name.into();
        if self.find_auth_by_name(&name).is_some() {
            return_error!(auth_already_exists(Fragment::None, &name));
        }
        let Some(auth) = self.auths.get_mut(&id) else {
            return_internal_error!("authorization {} not in catalog", *id);
        };
        auth.name = name;
        Ok(())
    }

    /// Schema-level control: sysadmins, the schema owner and the schema's
    /// authorization may change its objects.
    pub fn check_schema_privilege(&self, auth: AuthId, schema: &SchemaDef) -> bool {
        if schema.owner == auth || schema.auth == auth {
            return true;
        }
        self.auths.get(&auth).map(|a| a.sysadmin).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DEFAULT_SCHEMA, SYSTEM_USER};

    #[test]
    fn test_create_auth_duplicate() {
        let mut catalog = Catalog::new();
        let err = catalog
            .create_auth(AuthToCreate {
                fragment: Fragment::None,
                name: SYSTEM_USER.to_string(),
                kind: AuthKind::User,
                sysadmin: false,
            })
            .unwrap_err();
        assert_eq!(err.diagnostic().code, "42000");
    }

    #[test]
    fn test_schema_privilege() {
        let mut catalog = Catalog::new();
        let sysadmin = catalog.find_auth_by_name(SYSTEM_USER).unwrap().id;
        let plain = catalog
            .create_auth(AuthToCreate {
                fragment: Fragment::None,
                name: "alice".to_string(),
                kind: AuthKind::User,
                sysadmin: false,
            })
            .unwrap();

        let schema = catalog.find_schema_by_name(DEFAULT_SCHEMA).unwrap().clone();
        assert!(catalog.check_schema_privilege(sysadmin, &schema));
        assert!(!catalog.check_schema_privilege(plain, &schema));
    }
}
