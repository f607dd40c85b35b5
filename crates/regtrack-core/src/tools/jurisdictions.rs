//! Jurisdictions and regulatory agencies

use serde::Deserialize;

use crate::catalog::{ParamSpec, ToolDescriptor};
use crate::dispatch::{escape_segment, parse_args, resolve_lookup, Lookup, RemoteCallSpec, RuleError};
use super::{JsonObject, ToolDefinition};

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            ToolDescriptor::new("list_jurisdictions", "List jurisdictions known to the tracker")
                .param(ParamSpec::string("country", "ISO country code")),
            list_jurisdictions,
        ),
        ToolDefinition::new(
            ToolDescriptor::new(
                "get_jurisdiction",
                "Get a jurisdiction by id or by code. Provide jurisdiction_id or code; the id is used when both are given",
            )
            .param(ParamSpec::number("jurisdiction_id", "Jurisdiction id"))
            .param(ParamSpec::string("code", "Jurisdiction code, e.g. EU or US-NY")),
            get_jurisdiction,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("list_agencies", "List regulatory agencies")
                .param(ParamSpec::string("jurisdiction", "Jurisdiction code")),
            list_agencies,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("get_agency", "Get a regulatory agency by id")
                .param(ParamSpec::number("agency_id", "Agency id").required()),
            get_agency,
        ),
    ]
}

#[derive(Deserialize)]
struct CountryFilter {
    country: Option<String>,
}

fn list_jurisdictions(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: CountryFilter = parse_args(args)?;
    Ok(RemoteCallSpec::get("/jurisdictions").query("country", args.country))
}

#[derive(Deserialize)]
struct JurisdictionRef {
    jurisdiction_id: Option<u64>,
    code: Option<String>,
}

fn get_jurisdiction(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: JurisdictionRef = parse_args(args)?;
    let path = match resolve_lookup(args.jurisdiction_id, args.code.as_deref(), "jurisdiction_id", "code")? {
        Lookup::Id(id) => format!("/jurisdictions/{}", id),
        Lookup::Label(code) => format!("/jurisdictions/by-code/{}", escape_segment(code)),
    };
    Ok(RemoteCallSpec::get(path))
}

#[derive(Deserialize)]
struct AgencyFilter {
    jurisdiction: Option<String>,
}

fn list_agencies(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: AgencyFilter = parse_args(args)?;
    Ok(RemoteCallSpec::get("/agencies").query("jurisdiction", args.jurisdiction))
}

#[derive(Deserialize)]
struct AgencyRef {
    agency_id: u64,
}

fn get_agency(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: AgencyRef = parse_args(args)?;
    Ok(RemoteCallSpec::get(format!("/agencies/{}", args.agency_id)))
}
