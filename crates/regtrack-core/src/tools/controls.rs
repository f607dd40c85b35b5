//! Internal controls and their mapping to obligations

use serde::{Deserialize, Serialize};

use crate::catalog::{ParamSpec, ToolDescriptor};
use crate::dispatch::{parse_args, RemoteCallSpec, RuleError};
use super::{DurationUnit, JsonObject, ToolDefinition};

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            ToolDescriptor::new("list_controls", "List internal controls")
                .param(ParamSpec::string("framework", "Control framework, e.g. SOC2 or ISO27001")),
            list_controls,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("get_control", "Get a control by id")
                .param(ParamSpec::number("control_id", "Control id").required()),
            get_control,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("create_control", "Define an internal control")
                .param(ParamSpec::string("name", "Control name").required())
                .param(ParamSpec::string("description", "What the control checks"))
                .param(ParamSpec::string("framework", "Control framework"))
                .param(ParamSpec::number("test_every", "Test the control every N units"))
                .param(ParamSpec::string("test_unit", "hours, days, weeks or months (default months)")),
            create_control,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("map_control_to_obligation", "Link a control to the obligation it satisfies")
                .param(ParamSpec::number("obligation_id", "Obligation id").required())
                .param(ParamSpec::number("control_id", "Control id").required()),
            map_control_to_obligation,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("unmap_control_from_obligation", "Remove a control from an obligation")
                .param(ParamSpec::number("obligation_id", "Obligation id").required())
                .param(ParamSpec::number("control_id", "Control id").required()),
            unmap_control_from_obligation,
        ),
    ]
}

#[derive(Deserialize)]
struct FrameworkFilter {
    framework: Option<String>,
}

fn list_controls(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: FrameworkFilter = parse_args(args)?;
    Ok(RemoteCallSpec::get("/controls").query("framework", args.framework))
}

#[derive(Deserialize)]
struct ControlRef {
    control_id: u64,
}

fn get_control(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: ControlRef = parse_args(args)?;
    Ok(RemoteCallSpec::get(format!("/controls/{}", args.control_id)))
}

#[derive(Deserialize)]
struct CreateArgs {
    name: String,
    description: Option<String>,
    framework: Option<String>,
    test_every: Option<u32>,
    test_unit: Option<DurationUnit>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewControl {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    framework: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_frequency: Option<TestFrequency>,
}

#[derive(Serialize)]
struct TestFrequency {
    every: u32,
    unit: DurationUnit,
}

fn create_control(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: CreateArgs = parse_args(args)?;
    let test_frequency = args.test_every.map(|every| TestFrequency {
        every,
        unit: args.test_unit.unwrap_or(DurationUnit::Months),
    });
    let control = NewControl {
        name: args.name,
        description: args.description,
        framework: args.framework,
        test_frequency,
    };
    Ok(RemoteCallSpec::post("/controls").json_body(&[control])?)
}

#[derive(Deserialize)]
struct MappingArgs {
    obligation_id: u64,
    control_id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ControlEntry {
    control_id: u64,
}

fn map_control_to_obligation(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: MappingArgs = parse_args(args)?;
    Ok(RemoteCallSpec::post(format!("/obligations/{}/controls", args.obligation_id))
        .json_body(&[ControlEntry {
            control_id: args.control_id,
        }])?)
}

fn unmap_control_from_obligation(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: MappingArgs = parse_args(args)?;
    Ok(RemoteCallSpec::delete(format!(
        "/obligations/{}/controls/{}",
        args.obligation_id, args.control_id
    )))
}
