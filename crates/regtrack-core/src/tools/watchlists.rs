//! Keyword and jurisdiction watchlists

use serde::{Deserialize, Serialize};

use crate::catalog::{ParamKind, ParamSpec, ToolDescriptor};
use crate::dispatch::{escape_segment, parse_args, resolve_lookup, Lookup, RemoteCallSpec, RuleError};
use super::{JsonObject, ToolDefinition};

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            ToolDescriptor::new("list_watchlists", "List watchlists"),
            list_watchlists,
        ),
        ToolDefinition::new(
            ToolDescriptor::new(
                "get_watchlist",
                "Get a watchlist by id or by name. The id is used when both are given",
            )
            .param(ParamSpec::number("watchlist_id", "Watchlist id"))
            .param(ParamSpec::string("watchlist_name", "Watchlist name")),
            get_watchlist,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("create_watchlist", "Create a watchlist")
                .param(ParamSpec::string("name", "Watchlist name").required())
                .param(ParamSpec::string("description", "What the watchlist covers"))
                .param(ParamSpec::array("keywords", ParamKind::String, "Keywords to match"))
                .param(ParamSpec::array("jurisdiction_codes", ParamKind::String, "Jurisdiction codes to match")),
            create_watchlist,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("update_watchlist", "Update a watchlist; omitted fields are unchanged")
                .param(ParamSpec::number("watchlist_id", "Watchlist id").required())
                .param(ParamSpec::string("name", "New name"))
                .param(ParamSpec::string("description", "New description"))
                .param(ParamSpec::array("keywords", ParamKind::String, "Replacement keywords"))
                .param(ParamSpec::array("jurisdiction_codes", ParamKind::String, "Replacement jurisdiction codes")),
            update_watchlist,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("delete_watchlist", "Delete a watchlist")
                .param(ParamSpec::number("watchlist_id", "Watchlist id").required()),
            delete_watchlist,
        ),
        ToolDefinition::new(
            ToolDescriptor::new(
                "add_regulation_to_watchlist",
                "Add a regulation to a watchlist addressed by id or name. The id is used when both are given",
            )
            .param(ParamSpec::number("watchlist_id", "Watchlist id"))
            .param(ParamSpec::string("watchlist_name", "Watchlist name"))
            .param(ParamSpec::number("regulation_id", "Regulation id").required()),
            add_regulation_to_watchlist,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("remove_regulation_from_watchlist", "Remove a regulation from a watchlist")
                .param(ParamSpec::number("watchlist_id", "Watchlist id").required())
                .param(ParamSpec::number("regulation_id", "Regulation id").required()),
            remove_regulation_from_watchlist,
        ),
    ]
}

fn list_watchlists(_args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    Ok(RemoteCallSpec::get("/watchlists"))
}

#[derive(Deserialize)]
struct WatchlistLookup {
    watchlist_id: Option<u64>,
    watchlist_name: Option<String>,
}

impl WatchlistLookup {
    fn path(&self) -> Result<String, RuleError> {
        let lookup = resolve_lookup(
            self.watchlist_id,
            self.watchlist_name.as_deref(),
            "watchlist_id",
            "watchlist_name",
        )?;
        Ok(match lookup {
            Lookup::Id(id) => format!("/watchlists/{}", id),
            Lookup::Label(name) => format!("/watchlists/by-name/{}", escape_segment(name)),
        })
    }
}

fn get_watchlist(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let lookup: WatchlistLookup = parse_args(args)?;
    Ok(RemoteCallSpec::get(lookup.path()?))
}

/// Watchlist fields; snake_case in, camelCase out
#[derive(Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
struct WatchlistFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    jurisdiction_codes: Option<Vec<String>>,
}

fn create_watchlist(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let fields: WatchlistFields = parse_args(args)?;
    Ok(RemoteCallSpec::post("/watchlists").json_body(&fields)?)
}

#[derive(Deserialize)]
struct UpdateArgs {
    watchlist_id: u64,
    #[serde(flatten)]
    fields: WatchlistFields,
}

fn update_watchlist(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: UpdateArgs = parse_args(args)?;
    Ok(RemoteCallSpec::put(format!("/watchlists/{}", args.watchlist_id)).json_body(&args.fields)?)
}

#[derive(Deserialize)]
struct WatchlistRef {
    watchlist_id: u64,
}

fn delete_watchlist(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: WatchlistRef = parse_args(args)?;
    Ok(RemoteCallSpec::delete(format!("/watchlists/{}", args.watchlist_id)))
}

#[derive(Deserialize)]
struct AddArgs {
    #[serde(flatten)]
    watchlist: WatchlistLookup,
    regulation_id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegulationEntry {
    regulation_id: u64,
}

fn add_regulation_to_watchlist(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: AddArgs = parse_args(args)?;
    let path = format!("{}/regulations", args.watchlist.path()?);
    Ok(RemoteCallSpec::post(path).json_body(&[RegulationEntry {
        regulation_id: args.regulation_id,
    }])?)
}

#[derive(Deserialize)]
struct RemoveArgs {
    watchlist_id: u64,
    regulation_id: u64,
}

fn remove_regulation_from_watchlist(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: RemoveArgs = parse_args(args)?;
    Ok(RemoteCallSpec::delete(format!(
        "/watchlists/{}/regulations/{}",
        args.watchlist_id, args.regulation_id
    )))
}

#[cfg(test)]
mod tests {
    use crate::dispatch::DispatchError;
    use crate::tools::resolve;
    use crate::transport::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_create_watchlist_body() {
        let spec = resolve(
            "create_watchlist",
            json!({ "name": "AI rules", "keywords": ["ai", "model"], "jurisdiction_codes": ["EU"] }),
        )
        .unwrap();
        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(
            spec.body,
            Some(json!({ "name": "AI rules", "keywords": ["ai", "model"], "jurisdictionCodes": ["EU"] }))
        );
    }

    #[test]
    fn test_update_watchlist_partial() {
        let spec = resolve("update_watchlist", json!({ "watchlist_id": 3, "description": "narrowed" })).unwrap();
        assert_eq!(spec.method, HttpMethod::Put);
        assert_eq!(spec.path, "/watchlists/3");
        assert_eq!(spec.body, Some(json!({ "description": "narrowed" })));
    }

    #[test]
    fn test_add_by_name() {
        let spec = resolve(
            "add_regulation_to_watchlist",
            json!({ "watchlist_name": "Privacy & Data", "regulation_id": 10 }),
        )
        .unwrap();
        assert_eq!(spec.path, "/watchlists/by-name/Privacy%20%26%20Data/regulations");
        assert_eq!(spec.body, Some(json!([{ "regulationId": 10 }])));
    }

    #[test]
    fn test_add_requires_watchlist() {
        let err = resolve("add_regulation_to_watchlist", json!({ "regulation_id": 10 })).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::AmbiguousIdentifier { ref first, .. } if first == "watchlist_id"
        ));
    }

    #[test]
    fn test_remove_regulation() {
        let spec = resolve(
            "remove_regulation_from_watchlist",
            json!({ "watchlist_id": 2, "regulation_id": 9 }),
        )
        .unwrap();
        assert_eq!(spec.method, HttpMethod::Delete);
        assert_eq!(spec.path, "/watchlists/2/regulations/9");
    }
}
