//! Compliance obligations derived from regulations

use serde::{Deserialize, Serialize};

use crate::catalog::{ParamKind, ParamSpec, ToolDescriptor};
use crate::dispatch::{non_empty, parse_args, resolve_lookup, Lookup, RemoteCallSpec, RuleError};
use super::{JsonObject, ToolDefinition};

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            ToolDescriptor::new("list_obligations", "List compliance obligations")
                .param(ParamSpec::number("regulation_id", "Only obligations from this regulation"))
                .param(ParamSpec::string("status", "open, in_progress, met or waived"))
                .param(ParamSpec::number("owner_id", "Only obligations owned by this user")),
            list_obligations,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("get_obligation", "Get an obligation by id")
                .param(ParamSpec::number("obligation_id", "Obligation id").required()),
            get_obligation,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("create_obligation", "Record a compliance obligation for a regulation")
                .param(ParamSpec::number("regulation_id", "Source regulation id").required())
                .param(ParamSpec::string("title", "Short statement of the obligation").required())
                .param(ParamSpec::string("description", "Details"))
                .param(ParamSpec::number("owner_id", "Responsible user id"))
                .param(ParamSpec::string("due_date", "ISO date the obligation must be met by")),
            create_obligation,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("create_obligations_bulk", "Record several obligations at once")
                .param(
                    ParamSpec::array(
                        "obligations",
                        ParamKind::Object,
                        "Entries of {regulation_id, title, description?, owner_id?, due_date?}",
                    )
                    .required(),
                ),
            create_obligations_bulk,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("update_obligation_status", "Change the status of an obligation")
                .param(ParamSpec::number("obligation_id", "Obligation id").required())
                .param(ParamSpec::string("status", "open, in_progress, met or waived").required())
                .param(ParamSpec::string("comment", "Reason for the change")),
            update_obligation_status,
        ),
        ToolDefinition::new(
            ToolDescriptor::new(
                "assign_obligation",
                "Assign an obligation to a user by id or email. The id is used when both are given",
            )
            .param(ParamSpec::number("obligation_id", "Obligation id").required())
            .param(ParamSpec::number("assignee_id", "User id"))
            .param(ParamSpec::string("assignee_email", "User email")),
            assign_obligation,
        ),
    ]
}

#[derive(Deserialize)]
struct ListArgs {
    regulation_id: Option<u64>,
    status: Option<String>,
    owner_id: Option<u64>,
}

fn list_obligations(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: ListArgs = parse_args(args)?;
    Ok(RemoteCallSpec::get("/obligations")
        .query("regulationId", args.regulation_id)
        .query("status", args.status)
        .query("ownerId", args.owner_id))
}

#[derive(Deserialize)]
struct ObligationRef {
    obligation_id: u64,
}

fn get_obligation(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: ObligationRef = parse_args(args)?;
    Ok(RemoteCallSpec::get(format!("/obligations/{}", args.obligation_id)))
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
struct NewObligation {
    regulation_id: u64,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
}

fn create_obligation(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let obligation: NewObligation = parse_args(args)?;
    Ok(RemoteCallSpec::post("/obligations").json_body(&[obligation])?)
}

#[derive(Deserialize)]
struct BulkArgs {
    obligations: Vec<NewObligation>,
}

fn create_obligations_bulk(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: BulkArgs = parse_args(args)?;
    let obligations = non_empty(args.obligations, "obligations")?;
    Ok(RemoteCallSpec::post("/obligations").json_body(&obligations)?)
}

#[derive(Deserialize)]
struct StatusArgs {
    obligation_id: u64,
    status: String,
    comment: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_comment: Option<String>,
}

fn update_obligation_status(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: StatusArgs = parse_args(args)?;
    let body = StatusBody {
        status: args.status,
        status_comment: args.comment,
    };
    Ok(RemoteCallSpec::patch(format!("/obligations/{}", args.obligation_id)).json_body(&body)?)
}

#[derive(Deserialize)]
struct AssignArgs {
    obligation_id: u64,
    assignee_id: Option<u64>,
    assignee_email: Option<String>,
}

fn assign_obligation(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: AssignArgs = parse_args(args)?;
    let body = match resolve_lookup(
        args.assignee_id,
        args.assignee_email.as_deref(),
        "assignee_id",
        "assignee_email",
    )? {
        Lookup::Id(id) => serde_json::json!({ "assigneeId": id }),
        Lookup::Label(email) => serde_json::json!({ "assigneeEmail": email }),
    };
    Ok(RemoteCallSpec::put(format!("/obligations/{}/assignee", args.obligation_id)).body(body))
}

#[cfg(test)]
mod tests {
    use crate::dispatch::DispatchError;
    use crate::tools::resolve;
    use crate::transport::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_create_obligation_wraps_and_renames() {
        let spec = resolve(
            "create_obligation",
            json!({ "regulation_id": 4, "title": "Appoint a DPO", "due_date": "2025-05-25" }),
        )
        .unwrap();
        assert_eq!(spec.path, "/obligations");
        assert_eq!(
            spec.body,
            Some(json!([{ "regulationId": 4, "title": "Appoint a DPO", "dueDate": "2025-05-25" }]))
        );
    }

    #[test]
    fn test_bulk_rejects_malformed_element() {
        let err = resolve(
            "create_obligations_bulk",
            json!({ "obligations": [{ "title": "missing regulation" }] }),
        )
        .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidInput { .. }));
    }

    #[test]
    fn test_update_status_renames_comment() {
        let spec = resolve(
            "update_obligation_status",
            json!({ "obligation_id": 6, "status": "met", "comment": "audited" }),
        )
        .unwrap();
        assert_eq!(spec.method, HttpMethod::Patch);
        assert_eq!(spec.body, Some(json!({ "status": "met", "statusComment": "audited" })));
    }

    #[test]
    fn test_assign_prefers_id() {
        let spec = resolve(
            "assign_obligation",
            json!({ "obligation_id": 6, "assignee_id": 12, "assignee_email": "kim@example.com" }),
        )
        .unwrap();
        assert_eq!(spec.path, "/obligations/6/assignee");
        assert_eq!(spec.body, Some(json!({ "assigneeId": 12 })));
    }

    #[test]
    fn test_assign_by_email() {
        let spec = resolve(
            "assign_obligation",
            json!({ "obligation_id": 6, "assignee_email": "kim@example.com" }),
        )
        .unwrap();
        assert_eq!(spec.body, Some(json!({ "assigneeEmail": "kim@example.com" })));
    }

    #[test]
    fn test_assign_requires_assignee() {
        let err = resolve("assign_obligation", json!({ "obligation_id": 6 })).unwrap_err();
        assert!(matches!(err, DispatchError::AmbiguousIdentifier { .. }));
    }
}
