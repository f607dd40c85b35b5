//! Remediation tasks and reminders

use serde::{Deserialize, Serialize};

use crate::catalog::{ParamSpec, ToolDescriptor};
use crate::dispatch::{parse_args, RemoteCallSpec, RuleError};
use super::{DurationUnit, JsonObject, RelativeDuration, ToolDefinition};

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            ToolDescriptor::new("list_tasks", "List remediation tasks")
                .param(ParamSpec::number("assignee_id", "Only tasks assigned to this user"))
                .param(ParamSpec::string("status", "todo, in_progress or done"))
                .param(ParamSpec::string("due_before", "ISO date upper bound for the due date")),
            list_tasks,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("create_task", "Create a remediation task")
                .param(ParamSpec::string("title", "Task title").required())
                .param(ParamSpec::string("description", "Details"))
                .param(ParamSpec::number("assignee_id", "Assigned user id"))
                .param(ParamSpec::number("obligation_id", "Obligation the task contributes to"))
                .param(ParamSpec::number("due_in", "Due this many units from now"))
                .param(ParamSpec::string("due_unit", "hours, days, weeks or months (default days)")),
            create_task,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("update_task", "Update a task; omitted fields are unchanged")
                .param(ParamSpec::number("task_id", "Task id").required())
                .param(ParamSpec::string("title", "New title"))
                .param(ParamSpec::string("description", "New description"))
                .param(ParamSpec::string("status", "todo, in_progress or done"))
                .param(ParamSpec::number("assignee_id", "New assignee id")),
            update_task,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("complete_task", "Mark a task as done")
                .param(ParamSpec::number("task_id", "Task id").required())
                .param(ParamSpec::string("note", "Completion note")),
            complete_task,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("set_task_reminder", "Schedule a reminder before a task is due")
                .param(ParamSpec::number("task_id", "Task id").required())
                .param(ParamSpec::number("offset", "How long before the due date").required())
                .param(ParamSpec::string("offset_unit", "hours, days, weeks or months (default days)"))
                .param(ParamSpec::string("channel", "email, slack or sms (default email)")),
            set_task_reminder,
        ),
    ]
}

#[derive(Deserialize)]
struct ListArgs {
    assignee_id: Option<u64>,
    status: Option<String>,
    due_before: Option<String>,
}

fn list_tasks(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: ListArgs = parse_args(args)?;
    Ok(RemoteCallSpec::get("/tasks")
        .query("assigneeId", args.assignee_id)
        .query("status", args.status)
        .query("dueBefore", args.due_before))
}

#[derive(Deserialize)]
struct CreateArgs {
    title: String,
    description: Option<String>,
    assignee_id: Option<u64>,
    obligation_id: Option<u64>,
    due_in: Option<u32>,
    due_unit: Option<DurationUnit>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewTask {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    obligation_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_in: Option<RelativeDuration>,
}

fn create_task(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: CreateArgs = parse_args(args)?;
    let task = NewTask {
        title: args.title,
        description: args.description,
        assignee_id: args.assignee_id,
        obligation_id: args.obligation_id,
        due_in: args
            .due_in
            .map(|value| RelativeDuration::with_default(value, args.due_unit, DurationUnit::Days)),
    };
    Ok(RemoteCallSpec::post("/tasks").json_body(&[task])?)
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
struct TaskChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee_id: Option<u64>,
}

#[derive(Deserialize)]
struct UpdateArgs {
    task_id: u64,
    #[serde(flatten)]
    changes: TaskChanges,
}

fn update_task(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: UpdateArgs = parse_args(args)?;
    Ok(RemoteCallSpec::patch(format!("/tasks/{}", args.task_id)).json_body(&args.changes)?)
}

#[derive(Deserialize)]
struct CompleteArgs {
    task_id: u64,
    note: Option<String>,
}

#[derive(Serialize)]
struct CompleteBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

fn complete_task(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: CompleteArgs = parse_args(args)?;
    Ok(RemoteCallSpec::post(format!("/tasks/{}/complete", args.task_id))
        .json_body(&CompleteBody { note: args.note })?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Channel {
    #[default]
    Email,
    Slack,
    Sms,
}

#[derive(Deserialize)]
struct ReminderArgs {
    task_id: u64,
    offset: u32,
    offset_unit: Option<DurationUnit>,
    channel: Option<Channel>,
}

#[derive(Serialize)]
struct Reminder {
    offset: RelativeDuration,
    channel: Channel,
}

fn set_task_reminder(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: ReminderArgs = parse_args(args)?;
    let reminder = Reminder {
        offset: RelativeDuration::with_default(args.offset, args.offset_unit, DurationUnit::Days),
        channel: args.channel.unwrap_or_default(),
    };
    Ok(RemoteCallSpec::post(format!("/tasks/{}/reminders", args.task_id)).json_body(&[reminder])?)
}
