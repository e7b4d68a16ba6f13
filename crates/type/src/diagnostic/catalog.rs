// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::{Diagnostic, Fragment};

pub fn schema_not_found(fragment: Fragment, schema: &str) -> Diagnostic {
    Diagnostic {
        code: "3F000".to_string(),
        statement: None,
        message: format!("schema `{}` does not exist", schema),
        column: None,
        fragment,
        label: Some("unknown schema".to_string()),
        help: Some("check the schema name or create it with CREATE SCHEMA".to_string()),
        notes: vec![],
        cause: None,
    }
}

pub fn schema_already_exists(fragment: Fragment, schema: &str) -> Diagnostic {
    Diagnostic {
        code: "3F000".to_string(),
        statement: None,
        message: format!("schema `{}` already exists", schema),
        column: None,
        fragment,
        label: Some("name already in use".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn table_not_found(fragment: Fragment, schema: &str, table: &str) -> Diagnostic {
    Diagnostic {
        code: "42S02".to_string(),
        statement: None,
        message: format!("no such table `{}`.`{}`", schema, table),
        column: None,
        fragment,
        label: Some("unknown table".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn table_already_exists(fragment: Fragment, schema: &str, table: &str) -> Diagnostic {
    Diagnostic {
        code: "42S01".to_string(),
        statement: None,
        message: format!("name `{}` already in use in schema `{}`", table, schema),
        column: None,
        fragment,
        label: Some("name already in use".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn column_not_found(fragment: Fragment, table: &str, column: &str) -> Diagnostic {
    Diagnostic {
        code: "42S22".to_string(),
        statement: None,
        message: format!("no such column `{}` in table `{}`", column, table),
        column: None,
        fragment,
        label: Some("unknown column".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn column_already_exists(fragment: Fragment, table: &str, column: &str) -> Diagnostic {
    Diagnostic {
        code: "42S21".to_string(),
        statement: None,
        message: format!("column `{}` specified more than once in table `{}`", column, table),
        column: None,
        fragment,
        label: Some("duplicate column".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn key_already_exists(fragment: Fragment, schema: &str, key: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("key `{}` already exists in schema `{}`", key, schema),
        column: None,
        fragment,
        label: Some("constraint name already in use".to_string()),
        help: Some("constraint names are unique within a schema".to_string()),
        notes: vec![],
        cause: None,
    }
}

pub fn key_not_found(fragment: Fragment, schema: &str, key: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("no such constraint `{}` in schema `{}`", key, schema),
        column: None,
        fragment,
        label: Some("unknown constraint".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn no_referenceable_key(fragment: Fragment, table: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("table `{}` has no matching PRIMARY KEY or UNIQUE constraint", table),
        column: None,
        fragment,
        label: Some("nothing to reference".to_string()),
        help: Some(
            "a FOREIGN KEY must reference the primary key or a named unique constraint"
                .to_string(),
        ),
        notes: vec![],
        cause: None,
    }
}

pub fn auth_not_found(fragment: Fragment, name: &str) -> Diagnostic {
    Diagnostic {
        code: "28000".to_string(),
        statement: None,
        message: format!("no such user or role `{}`", name),
        column: None,
        fragment,
        label: Some("unknown authorization".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn auth_already_exists(fragment: Fragment, name: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("user or role `{}` already exists", name),
        column: None,
        fragment,
        label: Some("name already in use".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn column_in_use(fragment: Fragment, table: &str, column: &str) -> Diagnostic {
    Diagnostic {
        code: "2BM37".to_string(),
        statement: None,
        message: format!("cannot drop column `{}`.`{}`, objects depend on it", table, column),
        column: None,
        fragment,
        label: Some("column has dependents".to_string()),
        help: Some("use DROP ... CASCADE to drop the dependents as well".to_string()),
        notes: vec![],
        cause: None,
    }
}
