// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::SessionContext;
use crate::ast::{
    AstAlterUser, AstCreateRole, AstCreateUser, AstDropRole, AstDropUser, AstPrivilege,
    AstPrivilegeGrant, AstRenameUser, AstRoleGrant, Privilege,
};
use crate::plan::{CatalogOp, Compiler, Operand, OperationNode};
use tessera_catalog::{AuthKind, AuthToCreate, Catalog, TableDef};
use tessera_type::diagnostic::{catalog as catalog_diag, ddl};
use tessera_type::{Fragment, Value, return_error};

pub const PRIV_SELECT: i64 = 1;
pub const PRIV_UPDATE: i64 = 2;
pub const PRIV_INSERT: i64 = 4;
pub const PRIV_DELETE: i64 = 8;
pub const PRIV_ALL: i64 = PRIV_SELECT | PRIV_UPDATE | PRIV_INSERT | PRIV_DELETE;

/// Name used when no grantee is given.
pub const PUBLIC_GRANTEE: &str = "public";

impl Compiler {
    /// GRANT and REVOKE share one shape: one node per privilege, column and
    /// grantee combination. A column list fans out to one node per column;
    /// without one a single node covers the whole table. An empty privilege
    /// list stands for ALL PRIVILEGES.
    pub(crate) fn compile_grant(
        catalog: &mut Catalog,
        session: &SessionContext,
        ast: AstPrivilegeGrant,
        revoke: bool,
    ) -> crate::Result<Vec<OperationNode>> {
        let table = Self::resolve_table(catalog, session, &ast.object)?.clone();
        let schema = catalog.get_schema(table.schema)?.clone();
        let op = if revoke { CatalogOp::Revoke } else { CatalogOp::Grant };

        let privileges = if ast.privileges.is_empty() {
            vec![AstPrivilege {
                privilege: Privilege::All,
                columns: vec![],
                fragment: Fragment::None,
            }]
        } else {
            ast.privileges
        };

        let mut nodes = vec![];
        for privilege in &privileges {
            let bit = Self::privilege_bit(privilege, &table)?;
            for column in &privilege.columns {
                if table.column(&column.text).is_none() {
                    return_error!(catalog_diag::column_not_found(
                        column.fragment.clone(),
                        &table.name,
                        &column.text
                    ));
                }
            }
            let columns: Vec<Option<&str>> = if privilege.columns.is_empty() {
                vec![None]
            } else {
                privilege.columns.iter().map(|c| Some(c.text.as_str())).collect()
            };
            for column in columns {
                for grantee in &ast.grantees {
                    let grantee = Self::resolve_grantee(catalog, grantee.as_ref())?;
                    let mut operands = vec![
                        Operand::Str(schema.name.clone()),
                        Operand::Str(table.name.clone()),
                        Operand::Int(bit),
                        Operand::Str(grantee),
                        Operand::Int(ast.grant_option as i64),
                    ];
                    if let Some(column) = column {
                        operands.push(Operand::Str(column.to_string()));
                    }
                    nodes.push(OperationNode::new(op, operands));
                }
            }
        }
        Ok(nodes)
    }

    fn privilege_bit(privilege: &AstPrivilege, table: &TableDef) -> crate::Result<i64> {
        let bit = match privilege.privilege {
            Privilege::Select => PRIV_SELECT,
            Privilege::Update => PRIV_UPDATE,
            Privilege::Insert => PRIV_INSERT,
            Privilege::Delete => PRIV_DELETE,
            Privilege::All => PRIV_ALL,
            Privilege::Execute => {
                return_error!(ddl::execute_on_table(privilege.fragment.clone(), &table.name));
            }
        };
        // only SELECT and UPDATE narrow to a column list
        if !privilege.columns.is_empty() && !matches!(bit, PRIV_SELECT | PRIV_UPDATE) {
            let name = match privilege.privilege {
                Privilege::Insert => "INSERT",
                Privilege::Delete => "DELETE",
                _ => "ALL PRIVILEGES",
            };
            return_error!(ddl::column_privilege_not_allowed(privilege.fragment.clone(), name));
        }
        Ok(bit)
    }

    fn resolve_grantee(
        catalog: &Catalog,
        grantee: Option<&crate::ast::Ident>,
    ) -> crate::Result<String> {
        match grantee {
            None => Ok(PUBLIC_GRANTEE.to_string()),
            Some(ident) => {
                if catalog.find_auth_by_name(&ident.text).is_none() {
                    return_error!(catalog_diag::auth_not_found(
                        ident.fragment.clone(),
                        &ident.text
                    ));
                }
                Ok(ident.text.clone())
            }
        }
    }

    pub(crate) fn compile_role_grant(
        catalog: &mut Catalog,
        ast: AstRoleGrant,
        revoke: bool,
    ) -> crate::Result<Vec<OperationNode>> {
        let op = if revoke { CatalogOp::RevokeRoles } else { CatalogOp::GrantRoles };

        let mut nodes = vec![];
        for role in &ast.roles {
            let found = catalog.find_auth_by_name(&role.text);
            if !found.is_some_and(|a| a.kind == AuthKind::Role) {
                return_error!(catalog_diag::auth_not_found(role.fragment.clone(), &role.text));
            }
            for grantee in &ast.grantees {
                let grantee = Self::resolve_grantee(catalog, grantee.as_ref())?;
                nodes.push(OperationNode::new(
                    op,
                    vec![
                        Operand::Str(role.text.clone()),
                        Operand::Str(grantee),
                        Operand::Int(ast.admin_option as i64),
                    ],
                ));
            }
        }
        Ok(nodes)
    }

    pub(crate) fn compile_create_role(
        catalog: &mut Catalog,
        ast: AstCreateRole,
    ) -> crate::Result<Vec<OperationNode>> {
        catalog.create_auth(AuthToCreate {
            fragment: ast.name.fragment.clone(),
            name: ast.name.text.clone(),
            kind: AuthKind::Role,
            sysadmin: ast.admin,
        })?;
        Ok(vec![OperationNode::new(
            CatalogOp::CreateRole,
            vec![Operand::Str(ast.name.text), Operand::Int(ast.admin as i64)],
        )])
    }

    pub(crate) fn compile_drop_role(
        catalog: &mut Catalog,
        ast: AstDropRole,
    ) -> crate::Result<Vec<OperationNode>> {
        let id = match catalog.find_auth_by_name(&ast.name.text) {
            Some(auth) if auth.kind == AuthKind::Role => auth.id,
            _ => {
                return_error!(catalog_diag::auth_not_found(
                    ast.name.fragment.clone(),
                    &ast.name.text
                ));
            }
        };
        catalog.drop_auth(id)?;
        Ok(vec![OperationNode::new(CatalogOp::DropRole, vec![Operand::Str(ast.name.text)])])
    }

    pub(crate) fn compile_create_user(
        catalog: &mut Catalog,
        ast: AstCreateUser,
    ) -> crate::Result<Vec<OperationNode>> {
        if catalog.find_schema_by_name(&ast.schema.text).is_none() {
            return_error!(catalog_diag::schema_not_found(
                ast.schema.fragment.clone(),
                &ast.schema.text
            ));
        }
        catalog.create_auth(AuthToCreate {
            fragment: ast.name.fragment.clone(),
            name: ast.name.text.clone(),
            kind: AuthKind::User,
            sysadmin: false,
        })?;
        Ok(vec![OperationNode::new(
            CatalogOp::CreateUser,
            vec![
                Operand::Str(ast.name.text),
                Operand::Str(ast.password),
                Operand::Int(ast.encrypted as i64),
                Operand::Str(ast.schema.text),
                Operand::Str(ast.fullname),
            ],
        )])
    }

    pub(crate) fn compile_drop_user(
        catalog: &mut Catalog,
        ast: AstDropUser,
    ) -> crate::Result<Vec<OperationNode>> {
        let id = match catalog.find_auth_by_name(&ast.name.text) {
            Some(auth) if auth.kind == AuthKind::User => auth.id,
            _ => {
                return_error!(catalog_diag::auth_not_found(
                    ast.name.fragment.clone(),
                    &ast.name.text
                ));
            }
        };
        catalog.drop_auth(id)?;
        Ok(vec![OperationNode::new(CatalogOp::DropUser, vec![Operand::Str(ast.name.text)])])
    }

    pub(crate) fn compile_alter_user(
        catalog: &mut Catalog,
        ast: AstAlterUser,
    ) -> crate::Result<Vec<OperationNode>> {
        if catalog.find_auth_by_name(&ast.name.text).is_none() {
            return_error!(catalog_diag::auth_not_found(
                ast.name.fragment.clone(),
                &ast.name.text
            ));
        }
        if let Some(schema) = &ast.schema {
            if catalog.find_schema_by_name(&schema.text).is_none() {
                return_error!(catalog_diag::schema_not_found(
                    schema.fragment.clone(),
                    &schema.text
                ));
            }
        }

        let optional = |value: Option<String>| match value {
            Some(v) => Operand::Value(Value::Utf8(v)),
            None => Operand::Value(Value::Undefined),
        };
        Ok(vec![OperationNode::new(
            CatalogOp::AlterUser,
            vec![
                Operand::Str(ast.name.text),
                optional(ast.password),
                Operand::Int(ast.encrypted as i64),
                optional(ast.schema.map(|s| s.text)),
                optional(ast.old_password),
            ],
        )])
    }

    pub(crate) fn compile_rename_user(
        catalog: &mut Catalog,
        ast: AstRenameUser,
    ) -> crate::Result<Vec<OperationNode>> {
        let id = match catalog.find_auth_by_name(&ast.from.text) {
            Some(auth) if auth.kind == AuthKind::User => auth.id,
            _ => {
                return_error!(catalog_diag::auth_not_found(
                    ast.from.fragment.clone(),
                    &ast.from.text
                ));
            }
        };
        if catalog.find_auth_by_name(&ast.to.text).is_some() {
            return_error!(catalog_diag::auth_already_exists(
                ast.to.fragment.clone(),
                &ast.to.text
            ));
        }
        catalog.rename_auth(id, ast.to.text.clone())?;
        Ok(vec![OperationNode::new(
            CatalogOp::RenameUser,
            vec![Operand::Str(ast.from.text), Operand::Str(ast.to.text)],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::{PRIV_ALL, PRIV_SELECT, PUBLIC_GRANTEE};
    use crate::ast::*;
    use crate::plan::tests::{column, compile, compile_err, session, statement_create_table};
    use crate::plan::{CatalogOp, Operand};
    use tessera_catalog::Catalog;
    use tessera_type::Type;

    fn privilege(privilege: Privilege, columns: Vec<Ident>) -> AstPrivilege {
        AstPrivilege { privilege, columns, fragment: Default::default() }
    }

    fn grant(
        privileges: Vec<AstPrivilege>,
        grantees: Vec<Option<Ident>>,
        revoke: bool,
    ) -> Statement {
        let ast = AstPrivilegeGrant {
            privileges,
            object: QualifiedName::bare("orders"),
            grantees,
            grant_option: false,
        };
        if revoke { Statement::Revoke(ast) } else { Statement::Grant(ast) }
    }

    fn orders(catalog: &mut Catalog, ctx: &crate::SessionContext) {
        compile(
            catalog,
            ctx,
            statement_create_table(
                "orders",
                vec![column("id", Type::Int8, vec![]), column("total", Type::Float8, vec![])],
            ),
        );
    }

    fn create_role(catalog: &mut Catalog, ctx: &crate::SessionContext, name: &str) {
        compile(
            catalog,
            ctx,
            Statement::CreateRole(AstCreateRole { name: name.into(), admin: false }),
        );
    }

    #[test]
    fn test_grant_expands_privileges_times_grantees() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);
        orders(&mut catalog, &ctx);
        create_role(&mut catalog, &ctx, "clerk");
        create_role(&mut catalog, &ctx, "auditor");

        let nodes = compile(
            &mut catalog,
            &ctx,
            grant(
                vec![
                    privilege(Privilege::Select, vec![]),
                    privilege(Privilege::Insert, vec![]),
                    privilege(Privilege::Delete, vec![]),
                ],
                vec![Some("clerk".into()), Some("auditor".into())],
                false,
            ),
        );

        assert_eq!(nodes.len(), 6);
        assert!(nodes.iter().all(|n| n.op == CatalogOp::Grant));
        assert_eq!(nodes[0].operands[2], Operand::Int(PRIV_SELECT));
        assert_eq!(nodes[0].operands[3].as_str(), Some("clerk"));
        assert_eq!(nodes[1].operands[3].as_str(), Some("auditor"));
    }

    #[test]
    fn test_empty_privilege_list_means_all() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);
        orders(&mut catalog, &ctx);

        let nodes = compile(&mut catalog, &ctx, grant(vec![], vec![None], false));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].operands[2], Operand::Int(PRIV_ALL));
        assert_eq!(nodes[0].operands[3].as_str(), Some(PUBLIC_GRANTEE));
    }

    #[test]
    fn test_revoke_emits_revoke_nodes() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);
        orders(&mut catalog, &ctx);

        let nodes = compile(
            &mut catalog,
            &ctx,
            grant(vec![privilege(Privilege::Select, vec![])], vec![None], true),
        );
        assert_eq!(nodes[0].op, CatalogOp::Revoke);
    }

    #[test]
    fn test_grant_execute_on_table_fails() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);
        orders(&mut catalog, &ctx);

        let err = compile_err(
            &mut catalog,
            &ctx,
            grant(vec![privilege(Privilege::Execute, vec![])], vec![None], false),
        );
        assert_eq!(err.diagnostic().code, "42000");
    }

    #[test]
    fn test_column_list_only_for_select_and_update() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);
        orders(&mut catalog, &ctx);

        let nodes = compile(
            &mut catalog,
            &ctx,
            grant(vec![privilege(Privilege::Select, vec!["total".into()])], vec![None], false),
        );
        assert_eq!(nodes[0].operands[5].as_str(), Some("total"));

        let err = compile_err(
            &mut catalog,
            &ctx,
            grant(vec![privilege(Privilege::Insert, vec!["total".into()])], vec![None], false),
        );
        assert_eq!(err.diagnostic().code, "42000");
    }

    #[test]
    fn test_column_list_fans_out_per_column() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);
        orders(&mut catalog, &ctx);
        create_role(&mut catalog, &ctx, "clerk");
        create_role(&mut catalog, &ctx, "auditor");

        // SELECT(id, total) and UPDATE(id) for two grantees: (2 + 1) * 2 nodes
        let nodes = compile(
            &mut catalog,
            &ctx,
            grant(
                vec![
                    privilege(Privilege::Select, vec!["id".into(), "total".into()]),
                    privilege(Privilege::Update, vec!["id".into()]),
                ],
                vec![Some("clerk".into()), Some("auditor".into())],
                false,
            ),
        );

        assert_eq!(nodes.len(), 6);
        assert!(nodes.iter().all(|n| n.operands.len() == 6));
        assert_eq!(nodes[0].operands[5].as_str(), Some("id"));
        assert_eq!(nodes[0].operands[3].as_str(), Some("clerk"));
        assert_eq!(nodes[1].operands[5].as_str(), Some("id"));
        assert_eq!(nodes[1].operands[3].as_str(), Some("auditor"));
        assert_eq!(nodes[2].operands[5].as_str(), Some("total"));
        assert_eq!(nodes[4].operands[2], Operand::Int(super::PRIV_UPDATE));
    }

    #[test]
    fn test_grant_unknown_column() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);
        orders(&mut catalog, &ctx);

        let err = compile_err(
            &mut catalog,
            &ctx,
            grant(vec![privilege(Privilege::Select, vec!["nope".into()])], vec![None], false),
        );
        assert_eq!(err.diagnostic().code, "42S22");
    }

    #[test]
    fn test_grant_unknown_grantee() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);
        orders(&mut catalog, &ctx);

        let err = compile_err(
            &mut catalog,
            &ctx,
            grant(vec![privilege(Privilege::Select, vec![])], vec![Some("nobody".into())], false),
        );
        assert_eq!(err.diagnostic().code, "28000");
    }

    #[test]
    fn test_grant_roles() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);
        create_role(&mut catalog, &ctx, "clerk");

        compile(
            &mut catalog,
            &ctx,
            Statement::CreateUser(AstCreateUser {
                name: "alice".into(),
                password: "secret".to_string(),
                encrypted: false,
                schema: "sys".into(),
                fullname: "Alice".to_string(),
            }),
        );

        let nodes = compile(
            &mut catalog,
            &ctx,
            Statement::GrantRoles(AstRoleGrant {
                roles: vec!["clerk".into()],
                grantees: vec![Some("alice".into()), None],
                admin_option: true,
            }),
        );
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].op, CatalogOp::GrantRoles);
        assert_eq!(nodes[0].operands[0].as_str(), Some("clerk"));
        assert_eq!(nodes[1].operands[1].as_str(), Some(PUBLIC_GRANTEE));
    }

    #[test]
    fn test_grant_user_as_role_fails() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        // tsdb is a user, not a role
        let err = compile_err(
            &mut catalog,
            &ctx,
            Statement::GrantRoles(AstRoleGrant {
                roles: vec!["tsdb".into()],
                grantees: vec![None],
                admin_option: false,
            }),
        );
        assert_eq!(err.diagnostic().code, "28000");
    }

    #[test]
    fn test_create_and_drop_role() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        create_role(&mut catalog, &ctx, "clerk");
        assert!(catalog.find_auth_by_name("clerk").is_some());

        let err = compile_err(
            &mut catalog,
            &ctx,
            Statement::CreateRole(AstCreateRole { name: "clerk".into(), admin: false }),
        );
        assert_eq!(err.diagnostic().code, "42000");

        compile(&mut catalog, &ctx, Statement::DropRole(AstDropRole { name: "clerk".into() }));
        assert!(catalog.find_auth_by_name("clerk").is_none());
    }

    #[test]
    fn test_create_user_unknown_schema() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let err = compile_err(
            &mut catalog,
            &ctx,
            Statement::CreateUser(AstCreateUser {
                name: "alice".into(),
                password: "secret".to_string(),
                encrypted: false,
                schema: "nope".into(),
                fullname: "Alice".to_string(),
            }),
        );
        assert_eq!(err.diagnostic().code, "3F000");
    }

    #[test]
    fn test_rename_user() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        compile(
            &mut catalog,
            &ctx,
            Statement::CreateUser(AstCreateUser {
                name: "alice".into(),
                password: "secret".to_string(),
                encrypted: false,
                schema: "sys".into(),
                fullname: "Alice".to_string(),
            }),
        );
        compile(
            &mut catalog,
            &ctx,
            Statement::RenameUser(AstRenameUser { from: "alice".into(), to: "alicia".into() }),
        );
        assert!(catalog.find_auth_by_name("alice").is_none());
        assert!(catalog.find_auth_by_name("alicia").is_some());

        let err = compile_err(
            &mut catalog,
            &ctx,
            Statement::RenameUser(AstRenameUser { from: "alicia".into(), to: "tsdb".into() }),
        );
        assert_eq!(err.diagnostic().code, "42000");
    }

    #[test]
    fn test_alter_user_carries_optionals() {
        let mut catalog = Catalog::new();
        let ctx = session(&catalog);

        let nodes = compile(
            &mut catalog,
            &ctx,
            Statement::AlterUser(AstAlterUser {
                name: "tsdb".into(),
                password: Some("changed".to_string()),
                encrypted: true,
                schema: None,
                old_password: None,
            }),
        );
        assert_eq!(nodes[0].op, CatalogOp::AlterUser);
        assert_eq!(
            nodes[0].operands[1],
            Operand::Value(tessera_type::Value::Utf8("changed".to_string()))
        );
        assert_eq!(nodes[0].operands[3], Operand::Value(tessera_type::Value::Undefined));
    }
}
