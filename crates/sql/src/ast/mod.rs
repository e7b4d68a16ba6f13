// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

//! Statement tree handed over by the parser. Every statement kind is its own
//! variant carrying exactly the fields that kind needs.

use tessera_catalog::RefAction;
use tessera_type::{Fragment, Type, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub text: String,
    pub fragment: Fragment,
}

impl Ident {
    pub fn new(text: impl Into<String>, fragment: Fragment) -> Self {
        Ident { text: text.into(), fragment }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Ident {
    fn from(text: &str) -> Self {
        Ident { text: text.to_string(), fragment: Fragment::internal(text) }
    }
}

/// Object name with an optional schema qualifier.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedName {
    pub schema: Option<Ident>,
    pub name: Ident,
}

impl QualifiedName {
    pub fn bare(name: impl Into<Ident>) -> Self {
        QualifiedName { schema: None, name: name.into() }
    }

    pub fn qualified(schema: impl Into<Ident>, name: impl Into<Ident>) -> Self {
        QualifiedName { schema: Some(schema.into()), name: name.into() }
    }
}

/// A typed literal together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AstLiteral {
    pub value: Value,
    pub fragment: Fragment,
}

impl From<i64> for AstLiteral {
    fn from(value: i64) -> Self {
        AstLiteral { value: Value::Int8(value), fragment: Fragment::internal(value.to_string()) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateSchema(AstCreateSchema),
    DropSchema(AstDropSchema),
    CreateTable(AstCreateTable),
    CreateView(AstCreateView),
    DropTable(AstDropObject),
    DropArray(AstDropObject),
    DropView(AstDropObject),
    AlterTable(AstAlterTable),
    CreateIndex(AstCreateIndex),
    DropIndex(AstDropIndex),
    CreateType(AstCreateType),
    DropType(AstDropType),
    Grant(AstPrivilegeGrant),
    Revoke(AstPrivilegeGrant),
    GrantRoles(AstRoleGrant),
    RevokeRoles(AstRoleGrant),
    CreateRole(AstCreateRole),
    DropRole(AstDropRole),
    CreateUser(AstCreateUser),
    DropUser(AstDropUser),
    AlterUser(AstAlterUser),
    RenameUser(AstRenameUser),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstCreateSchema {
    /// Defaults to the authorization name when omitted.
    pub name: Option<Ident>,
    pub authorization: Option<Ident>,
    pub elements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstDropSchema {
    pub name: Ident,
    pub cascade: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstTemporaryScope {
    None,
    Local,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstCommitAction {
    Commit,
    DeleteRows,
    PreserveRows,
    Drop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstTableKind {
    Table,
    Array,
    Merge,
    Replica,
    Remote { location: String },
    Stream,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstCreateTable {
    pub kind: AstTableKind,
    pub temporary: AstTemporaryScope,
    pub commit_action: Option<AstCommitAction>,
    pub name: QualifiedName,
    pub source: AstTableSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstTableSource {
    Elements(Vec<TableElement>),
    Query { query: AstQuery, columns: Option<Vec<Ident>>, with_data: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableElement {
    Column(AstColumn),
    Constraint { name: Option<Ident>, constraint: AstTableConstraint, fragment: Fragment },
    /// Copy column names and types of another table. Nothing else.
    Like(QualifiedName),
    SetDefault { column: Ident, value: AstLiteral },
    DropDefault { column: Ident },
    SetNull { column: Ident, nullable: bool },
    DropColumn { column: Ident, cascade: bool },
    DropConstraint { name: Ident, cascade: bool },
    AddChild(QualifiedName),
    DropChild { table: QualifiedName, cascade: bool },
    SetReadonly(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstColumn {
    pub name: Ident,
    pub ty: Type,
    pub options: Vec<ColumnOption>,
    pub dimension: Option<AstDimension>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOption {
    Constraint { name: Option<Ident>, constraint: AstColumnConstraint, fragment: Fragment },
    Default(AstLiteral),
    NotNull,
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstColumnConstraint {
    PrimaryKey,
    Unique,
    ForeignKey {
        table: QualifiedName,
        columns: Option<Vec<Ident>>,
        on_update: RefAction,
        on_delete: RefAction,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstTableConstraint {
    PrimaryKey(Vec<Ident>),
    Unique(Vec<Ident>),
    ForeignKey {
        columns: Vec<Ident>,
        table: QualifiedName,
        ref_columns: Option<Vec<Ident>>,
        on_update: RefAction,
        on_delete: RefAction,
    },
}

/// Dimension range of an array column.
///
/// `[*]` leaves everything unbound, `[N]` is shorthand for `[0:1:N]`,
/// `[-N]` for `[0:-1:-N]`. Two and three part ranges bind whichever
/// endpoints are given.
#[derive(Debug, Clone, PartialEq)]
pub enum AstDimension {
    Unbounded { fragment: Fragment },
    Size(AstLiteral),
    NegativeSize(AstLiteral),
    Range { start: Option<AstLiteral>, stop: Option<AstLiteral>, fragment: Fragment },
    SteppedRange {
        start: Option<AstLiteral>,
        step: Option<AstLiteral>,
        stop: Option<AstLiteral>,
        fragment: Fragment,
    },
}

/// Stand-in for a compiled query expression. Exposes the projection the
/// binder needs; execution of the query itself happens elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct AstQuery {
    pub columns: Vec<AstQueryColumn>,
    pub has_order_by: bool,
    pub has_limit: bool,
    pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstQueryColumn {
    pub name: Ident,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstCreateView {
    pub name: QualifiedName,
    pub columns: Option<Vec<Ident>>,
    pub query: AstQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstDropObject {
    pub name: QualifiedName,
    pub cascade: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstAlterTable {
    pub name: QualifiedName,
    /// An empty list toggles the table between read only and read write.
    pub elements: Vec<TableElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstCreateIndex {
    pub name: Ident,
    pub unique: bool,
    pub table: QualifiedName,
    pub columns: Vec<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstDropIndex {
    pub name: QualifiedName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstCreateType {
    pub name: QualifiedName,
    pub external: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstDropType {
    pub name: QualifiedName,
    pub cascade: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    Select,
    Insert,
    Update,
    Delete,
    Execute,
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstPrivilege {
    pub privilege: Privilege,
    pub columns: Vec<Ident>,
    pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstPrivilegeGrant {
    /// Empty means ALL PRIVILEGES.
    pub privileges: Vec<AstPrivilege>,
    pub object: QualifiedName,
    /// `None` is PUBLIC.
    pub grantees: Vec<Option<Ident>>,
    pub grant_option: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstRoleGrant {
    pub roles: Vec<Ident>,
    pub grantees: Vec<Option<Ident>>,
    pub admin_option: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstCreateRole {
    pub name: Ident,
    pub admin: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstDropRole {
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstCreateUser {
    pub name: Ident,
    pub password: String,
    pub encrypted: bool,
    pub schema: Ident,
    pub fullname: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstDropUser {
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstAlterUser {
    pub name: Ident,
    pub password: Option<String>,
    pub encrypted: bool,
    pub schema: Option<Ident>,
    pub old_password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstRenameUser {
    pub from: Ident,
    pub to: Ident,
}
