//! `storctl user`: inspect, list and create accounts.

use std::io::Write;

use async_trait::async_trait;
use serde_json::Value;
use storctl_api::types::UserCreateOptions;
use storctl_api::{Client, Reference};
use tracing::info;

use crate::cli::{UserCmd, UserCreateArgs};
use crate::commands::Terminal;
use crate::error::{CliError, Result};
use crate::inspect::{inspect, list, to_values, InspectSource};
use crate::prompt::prompt_new_password;

const ROLES: [&str; 2] = ["user", "admin"];

/// Accounts; addressed and listed by username.
pub struct UserSource<'a> {
    client: &'a Client,
}

impl<'a> UserSource<'a> {
    /// Reads through `client`.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> InspectSource for UserSource<'a> {
    fn scoped(&self) -> bool {
        false
    }

    async fn fetch_one(&self, reference: &Reference) -> Result<Value> {
        Ok(serde_json::to_value(self.client.user(&reference.name).await?)?)
    }

    async fn fetch_all(&self) -> Result<Vec<Value>> {
        to_values(self.client.user_list().await?)
    }

    fn columns(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("ID", "id"),
            ("USERNAME", "username"),
            ("ROLE", "role"),
            ("GROUPS", "groups"),
        ]
    }

    fn display_ref(&self, item: &Value) -> String {
        item.get("username")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

/// Runs a `user` subcommand. `create` may prompt on `term.input`.
pub async fn run(client: &Client, cmd: &UserCmd, term: &mut Terminal<'_>) -> Result<()> {
    let source = UserSource::new(client);
    match cmd {
        UserCmd::Create(args) => create(client, args, term).await,
        UserCmd::Inspect(args) => inspect(&source, &args.targets, &args.format, term.out).await,
        UserCmd::Ls(args) => list(&source, args.quiet, args.format.as_deref(), term.out).await,
    }
}

async fn create(client: &Client, args: &UserCreateArgs, term: &mut Terminal<'_>) -> Result<()> {
    let username = match (&args.name, &args.username) {
        (Some(_), Some(_)) => return Err(CliError::ConflictingArgs { flag: "username" }),
        (Some(name), None) | (None, Some(name)) => name.clone(),
        (None, None) => String::new(),
    };

    let password = if args.password {
        prompt_new_password(term.input, term.err)?
    } else {
        String::new()
    };

    let role = args.role.to_lowercase();
    if !verify(&username, &args.groups, &role, term.err)? {
        return Err(CliError::InputVerification);
    }

    let opts = UserCreateOptions {
        username,
        password,
        groups: args.groups.clone(),
        role,
    };
    let user = client.user_create(&opts).await?;
    info!(username = %user.username, role = %user.role, "user created");
    writeln!(term.out, "NewUser {}/{}", user.uuid, user.username)?;
    Ok(())
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Reports every violation on `err`; true when the input is acceptable.
fn verify(username: &str, groups: &[String], role: &str, err: &mut dyn Write) -> Result<bool> {
    let mut ok = true;

    if !is_identifier(username) {
        ok = false;
        writeln!(err, "Username doesn't follow format \"[a-zA-Z0-9]+\"")?;
    }
    if let Some(index) = groups.iter().position(|g| !is_identifier(g)) {
        ok = false;
        writeln!(err, "Group element {index} doesn't follow format \"[a-zA-Z0-9]+\"")?;
    }
    if !ROLES.contains(&role) {
        ok = false;
        writeln!(err, "Role must be \"user\" or \"admin\", not {role}")?;
    }
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(username: &str, groups: &[&str], role: &str) -> (bool, String) {
        let groups: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
        let mut err = Vec::new();
        let ok = verify(username, &groups, role, &mut err).unwrap();
        (ok, String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_valid_input() {
        let (ok, err) = check("alice", &["ops", "dev2"], "admin");
        assert!(ok);
        assert!(err.is_empty());
    }

    #[test]
    fn test_username_must_be_alphanumeric() {
        assert!(!check("", &[], "user").0);
        assert!(!check("bad-name", &[], "user").0);
        assert!(!check("bad name", &[], "user").0);
        assert!(check("Alice01", &[], "user").0);
    }

    #[test]
    fn test_reports_first_bad_group() {
        let (ok, err) = check("alice", &["ok", "not ok", "x-y"], "user");
        assert!(!ok);
        assert_eq!(err, "Group element 1 doesn't follow format \"[a-zA-Z0-9]+\"\n");
    }

    #[test]
    fn test_every_violation_is_reported() {
        let (ok, err) = check("a/b", &[""], "root");
        assert!(!ok);
        assert_eq!(err.lines().count(), 3);
        assert!(err.contains("not root"));
    }

    #[test]
    fn test_role_is_case_sensitive_after_lowering() {
        assert!(check("alice", &[], "user").0);
        assert!(!check("alice", &[], "User").0);
    }
}
