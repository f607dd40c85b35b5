//! Users and teams

use serde::Deserialize;

use crate::catalog::{ParamSpec, ToolDescriptor};
use crate::dispatch::{parse_args, resolve_lookup, Lookup, RemoteCallSpec, RuleError};
use super::{JsonObject, ToolDefinition};

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            ToolDescriptor::new("list_users", "List users")
                .param(ParamSpec::number("team_id", "Only members of this team")),
            list_users,
        ),
        ToolDefinition::new(
            ToolDescriptor::new(
                "get_user",
                "Get a user by id or by email. The id is used when both are given",
            )
            .param(ParamSpec::number("user_id", "User id"))
            .param(ParamSpec::string("email", "User email")),
            get_user,
        ),
        ToolDefinition::new(ToolDescriptor::new("list_teams", "List teams"), list_teams),
    ]
}

#[derive(Deserialize)]
struct TeamFilter {
    team_id: Option<u64>,
}

fn list_users(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: TeamFilter = parse_args(args)?;
    Ok(RemoteCallSpec::get("/users").query("teamId", args.team_id))
}

#[derive(Deserialize)]
struct UserRef {
    user_id: Option<u64>,
    email: Option<String>,
}

fn get_user(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: UserRef = parse_args(args)?;
    Ok(match resolve_lookup(args.user_id, args.email.as_deref(), "user_id", "email")? {
        Lookup::Id(id) => RemoteCallSpec::get(format!("/users/{}", id)),
        Lookup::Label(email) => RemoteCallSpec::get("/users").query("email", Some(email)),
    })
}

fn list_teams(_args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    Ok(RemoteCallSpec::get("/teams"))
}

#[cfg(test)]
mod tests {
    use crate::tools::resolve;
    use serde_json::json;

    #[test]
    fn test_get_user_by_email_uses_query() {
        let spec = resolve("get_user", json!({ "email": "ana@example.com" })).unwrap();
        assert_eq!(spec.path, "/users");
        assert_eq!(spec.query["email"], "ana@example.com");
    }

    #[test]
    fn test_get_user_by_id() {
        let spec = resolve("get_user", json!({ "user_id": 11, "email": "ana@example.com" })).unwrap();
        assert_eq!(spec.path, "/users/11");
        assert!(spec.query.is_empty());
    }

    #[test]
    fn test_list_users_by_team() {
        let spec = resolve("list_users", json!({ "team_id": 2 })).unwrap();
        assert_eq!(spec.query["teamId"], "2");
    }
}
