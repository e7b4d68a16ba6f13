// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::{Diagnostic, Fragment, Type, Value};

pub fn database_read_only(fragment: Fragment) -> Diagnostic {
    Diagnostic {
        code: "25006".to_string(),
        statement: None,
        message: "schema statements cannot be executed on a readonly database".to_string(),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn insufficient_privileges(fragment: Fragment, user: &str, action: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("insufficient privileges for user `{}` to {}", user, action),
        column: None,
        fragment,
        label: Some("access denied".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn view_not_alterable(fragment: Fragment, view: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("cannot alter view `{}`", view),
        column: None,
        fragment,
        label: Some("views cannot be altered".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn alter_element_not_supported(fragment: Fragment, table: &str, element: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("{} is not supported on table `{}`", element, table),
        column: None,
        fragment,
        label: Some("unsupported alteration".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn drop_last_column(fragment: Fragment, table: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("cannot drop the only column of table `{}`", table),
        column: None,
        fragment,
        label: Some("tables need at least one column".to_string()),
        help: Some("drop the table instead".to_string()),
        notes: vec![],
        cause: None,
    }
}

pub fn system_table_immutable(fragment: Fragment, table: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("cannot modify system table `{}`", table),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn system_schema_immutable(fragment: Fragment, schema: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("cannot drop system schema `{}`", schema),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn primary_key_already_exists(fragment: Fragment, table: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("table `{}` already has a primary key", table),
        column: None,
        fragment,
        label: Some("only one PRIMARY KEY per table".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn column_count_mismatch(fragment: Fragment, expected: usize, got: usize) -> Diagnostic {
    Diagnostic {
        code: "21S02".to_string(),
        statement: None,
        message: format!("number of columns does not match, expected {} got {}", expected, got),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn column_lists_do_not_match(fragment: Fragment) -> Diagnostic {
    Diagnostic {
        code: "M0M03".to_string(),
        statement: None,
        message: "column lists do not match".to_string(),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn foreign_key_column_count_mismatch(fragment: Fragment, key: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!(
            "FOREIGN KEY `{}`: the number of referenced columns does not match",
            key
        ),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn view_order_by_not_allowed(fragment: Fragment, view: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("view `{}` cannot have an ORDER BY clause", view),
        column: None,
        fragment,
        label: None,
        help: Some("order the query selecting from the view instead".to_string()),
        notes: vec![],
        cause: None,
    }
}

pub fn view_limit_not_allowed(fragment: Fragment, view: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("view `{}` cannot have a LIMIT clause", view),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn array_requires_dimension(fragment: Fragment, table: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("array `{}` must declare at least one dimension column", table),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn dimension_outside_array(fragment: Fragment, column: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("column `{}` declares a dimension outside of a CREATE ARRAY", column),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn dimension_requires_integer_column(fragment: Fragment, column: &str, ty: Type) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!(
            "dimension size shorthand on column `{}` requires an integer type, found `{}`",
            column, ty
        ),
        column: None,
        fragment,
        label: None,
        help: Some("use an explicit [start:step:stop] range instead".to_string()),
        notes: vec![],
        cause: None,
    }
}

pub fn dimension_step_not_supported(fragment: Fragment, ty: Type) -> Diagnostic {
    Diagnostic {
        code: "0A000".to_string(),
        statement: None,
        message: format!("dimension step is not supported for type `{}`", ty),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn dimension_type_not_supported(fragment: Fragment, ty: Type) -> Diagnostic {
    Diagnostic {
        code: "0A000".to_string(),
        statement: None,
        message: format!("arrays cannot be materialized over dimension type `{}`", ty),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn temporary_table_schema(fragment: Fragment, schema: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!(
            "temporary tables are stored in the `tmp` schema, not in `{}`",
            schema
        ),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn execute_on_table(fragment: Fragment, table: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("cannot grant EXECUTE on table `{}`", table),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn column_privilege_not_allowed(fragment: Fragment, privilege: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("cannot grant {} on a column list", privilege),
        column: None,
        fragment,
        label: Some("only SELECT and UPDATE take column lists".to_string()),
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn literal_type_mismatch(fragment: Fragment, value: &Value, target: Type) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("literal {} cannot be converted to type `{}`", value, target),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn literal_not_numeric(fragment: Fragment, value: &Value) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("literal {} is not numeric", value),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn cannot_drop_kind(fragment: Fragment, op: &str, table: &str, actual: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("{}: `{}` is a {}", op, table, actual),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn merge_child_already_present(fragment: Fragment, table: &str, child: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("table `{}` is already a child of `{}`", child, table),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}

pub fn merge_child_missing(fragment: Fragment, table: &str, child: &str) -> Diagnostic {
    Diagnostic {
        code: "42000".to_string(),
        statement: None,
        message: format!("table `{}` is not a child of `{}`", child, table),
        column: None,
        fragment,
        label: None,
        help: None,
        notes: vec![],
        cause: None,
    }
}
