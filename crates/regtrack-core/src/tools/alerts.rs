//! Regulatory change alerts

use serde::{Deserialize, Serialize};

use crate::catalog::{ParamKind, ParamSpec, ToolDescriptor};
use crate::dispatch::{non_empty, parse_args, RemoteCallSpec, RuleError};
use super::{JsonObject, ToolDefinition};

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            ToolDescriptor::new("list_alerts", "List alerts about regulatory changes")
                .param(ParamSpec::string("since", "ISO timestamp; only newer alerts"))
                .param(ParamSpec::string("severity", "info, warning or critical"))
                .param(ParamSpec::boolean("unread_only", "Only unread alerts"))
                .param(ParamSpec::number("limit", "Maximum number of alerts")),
            list_alerts,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("get_alert", "Get an alert by id")
                .param(ParamSpec::number("alert_id", "Alert id").required()),
            get_alert,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("mark_alert_read", "Mark one alert as read")
                .param(ParamSpec::number("alert_id", "Alert id").required()),
            mark_alert_read,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("mark_alerts_read", "Mark several alerts as read")
                .param(ParamSpec::array("alert_ids", ParamKind::Number, "Alert ids").required()),
            mark_alerts_read,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("dismiss_alert", "Dismiss an alert as not relevant")
                .param(ParamSpec::number("alert_id", "Alert id").required())
                .param(ParamSpec::string("reason", "Why the alert is dismissed")),
            dismiss_alert,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Deserialize)]
struct ListArgs {
    since: Option<String>,
    severity: Option<Severity>,
    unread_only: Option<bool>,
    limit: Option<u32>,
}

fn list_alerts(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: ListArgs = parse_args(args)?;
    Ok(RemoteCallSpec::get("/alerts")
        .query("since", args.since)
        .query("severity", args.severity.as_ref().map(Severity::as_str))
        .query("unreadOnly", args.unread_only)
        .query("limit", args.limit))
}

#[derive(Deserialize)]
struct AlertRef {
    alert_id: u64,
}

fn get_alert(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: AlertRef = parse_args(args)?;
    Ok(RemoteCallSpec::get(format!("/alerts/{}", args.alert_id)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadMark {
    alert_id: u64,
    read: bool,
}

impl ReadMark {
    fn read(alert_id: u64) -> Self {
        Self { alert_id, read: true }
    }
}

fn mark_alert_read(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: AlertRef = parse_args(args)?;
    Ok(RemoteCallSpec::patch("/alerts").json_body(&[ReadMark::read(args.alert_id)])?)
}

#[derive(Deserialize)]
struct AlertIds {
    alert_ids: Vec<u64>,
}

fn mark_alerts_read(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: AlertIds = parse_args(args)?;
    let marks: Vec<ReadMark> = non_empty(args.alert_ids, "alert_ids")?
        .into_iter()
        .map(ReadMark::read)
        .collect();
    Ok(RemoteCallSpec::patch("/alerts").json_body(&marks)?)
}

#[derive(Deserialize)]
struct DismissArgs {
    alert_id: u64,
    reason: Option<String>,
}

#[derive(Serialize)]
struct DismissBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn dismiss_alert(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: DismissArgs = parse_args(args)?;
    Ok(RemoteCallSpec::post(format!("/alerts/{}/dismiss", args.alert_id))
        .json_body(&DismissBody { reason: args.reason })?)
}
