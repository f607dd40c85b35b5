//! Regulation lookup, search and tracking

use serde::{Deserialize, Serialize};

use crate::catalog::{ParamKind, ParamSpec, ToolDescriptor};
use crate::dispatch::{non_empty, parse_args, RemoteCallSpec, RuleError};
use super::{JsonObject, Priority, ToolDefinition};

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            ToolDescriptor::new("list_regulations", "List regulations, optionally filtered by jurisdiction and status")
                .param(ParamSpec::string("jurisdiction", "Jurisdiction code, e.g. EU or US-CA"))
                .param(ParamSpec::string("status", "Lifecycle status: proposed, adopted, in_force or repealed"))
                .param(ParamSpec::number("page", "1-based page number"))
                .param(ParamSpec::number("page_size", "Results per page")),
            list_regulations,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("get_regulation", "Get a regulation by id")
                .param(ParamSpec::number("regulation_id", "Regulation id").required()),
            get_regulation,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("search_regulations", "Full-text search over regulation titles and summaries")
                .param(ParamSpec::string("query", "Search terms").required())
                .param(ParamSpec::string("jurisdiction", "Restrict to a jurisdiction code"))
                .param(ParamSpec::string("published_after", "ISO date lower bound"))
                .param(ParamSpec::string("published_before", "ISO date upper bound"))
                .param(ParamSpec::number("limit", "Maximum number of results")),
            search_regulations,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("get_regulation_history", "List the published versions of a regulation")
                .param(ParamSpec::number("regulation_id", "Regulation id").required()),
            get_regulation_history,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("compare_regulation_versions", "Diff two versions of a regulation")
                .param(ParamSpec::number("regulation_id", "Regulation id").required())
                .param(ParamSpec::string("from_version", "Older version label").required())
                .param(ParamSpec::string("to_version", "Newer version label").required()),
            compare_regulation_versions,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("track_regulation", "Start tracking a regulation")
                .param(ParamSpec::number("regulation_id", "Regulation id").required())
                .param(ParamSpec::string("priority", "low, medium or high"))
                .param(ParamSpec::string("notes", "Why the regulation matters")),
            track_regulation,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("track_regulations_bulk", "Start tracking several regulations at once")
                .param(
                    ParamSpec::array(
                        "regulations",
                        ParamKind::Object,
                        "Entries of {regulation_id, priority?, notes?}",
                    )
                    .required(),
                ),
            track_regulations_bulk,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("list_tracked_regulations", "List tracked regulations")
                .param(ParamSpec::number("owner_id", "Only regulations tracked by this user"))
                .param(ParamSpec::string("priority", "low, medium or high")),
            list_tracked_regulations,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("untrack_regulation", "Stop tracking a regulation")
                .param(ParamSpec::number("regulation_id", "Regulation id").required()),
            untrack_regulation,
        ),
    ]
}

#[derive(Deserialize)]
struct ListArgs {
    jurisdiction: Option<String>,
    status: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

fn list_regulations(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: ListArgs = parse_args(args)?;
    Ok(RemoteCallSpec::get("/regulations")
        .query("jurisdiction", args.jurisdiction)
        .query("status", args.status)
        .query("page", args.page)
        .query("pageSize", args.page_size))
}

#[derive(Deserialize)]
struct RegulationRef {
    regulation_id: u64,
}

fn get_regulation(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: RegulationRef = parse_args(args)?;
    Ok(RemoteCallSpec::get(format!("/regulations/{}", args.regulation_id)))
}

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
    jurisdiction: Option<String>,
    published_after: Option<String>,
    published_before: Option<String>,
    limit: Option<u32>,
}

fn search_regulations(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: SearchArgs = parse_args(args)?;
    Ok(RemoteCallSpec::get("/regulations/search")
        .query("q", Some(args.query))
        .query("jurisdiction", args.jurisdiction)
        .query("publishedAfter", args.published_after)
        .query("publishedBefore", args.published_before)
        .query("limit", args.limit))
}

fn get_regulation_history(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: RegulationRef = parse_args(args)?;
    Ok(RemoteCallSpec::get(format!("/regulations/{}/versions", args.regulation_id)))
}

#[derive(Deserialize)]
struct CompareArgs {
    regulation_id: u64,
    from_version: String,
    to_version: String,
}

fn compare_regulation_versions(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: CompareArgs = parse_args(args)?;
    Ok(RemoteCallSpec::get(format!("/regulations/{}/diff", args.regulation_id))
        .query("from", Some(args.from_version))
        .query("to", Some(args.to_version)))
}

/// One tracking request; snake_case in, camelCase out
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
struct TrackEntry {
    regulation_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

fn track_regulation(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let entry: TrackEntry = parse_args(args)?;
    Ok(RemoteCallSpec::post("/tracked-regulations").json_body(&[entry])?)
}

#[derive(Deserialize)]
struct TrackBulkArgs {
    regulations: Vec<TrackEntry>,
}

fn track_regulations_bulk(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: TrackBulkArgs = parse_args(args)?;
    let entries = non_empty(args.regulations, "regulations")?;
    Ok(RemoteCallSpec::post("/tracked-regulations").json_body(&entries)?)
}

#[derive(Deserialize)]
struct TrackedArgs {
    owner_id: Option<u64>,
    priority: Option<Priority>,
}

fn list_tracked_regulations(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: TrackedArgs = parse_args(args)?;
    Ok(RemoteCallSpec::get("/tracked-regulations")
        .query("ownerId", args.owner_id)
        .query("priority", args.priority.as_ref().map(Priority::as_str)))
}

fn untrack_regulation(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: RegulationRef = parse_args(args)?;
    Ok(RemoteCallSpec::delete(format!("/tracked-regulations/{}", args.regulation_id)))
}
