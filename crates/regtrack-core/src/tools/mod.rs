//! Built-in regulatory tool catalog
//!
//! Each area module declares its tools as [`ToolDefinition`]s: a descriptor
//! for discovery and validation, plus a transform rule that reads the typed
//! arguments and produces the remote call.
//!
//! Remote payloads use camelCase field names. Optional fields left unset by
//! the caller are omitted from bodies and query strings.

mod alerts;
mod collaboration;
mod controls;
mod directory;
mod jurisdictions;
mod obligations;
mod regulations;
mod reports;
mod tasks;
mod watchlists;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::ToolDescriptor;
use crate::dispatch::{RemoteCallSpec, RuleError};

/// Raw argument object handed to a transform rule
pub type JsonObject = Map<String, Value>;

/// Builds the remote call for one tool from validated arguments
pub type TransformRule = fn(&JsonObject) -> Result<RemoteCallSpec, RuleError>;

/// A tool's descriptor together with its transform rule
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub descriptor: ToolDescriptor,
    pub rule: TransformRule,
}

impl ToolDefinition {
    pub fn new(descriptor: ToolDescriptor, rule: TransformRule) -> Self {
        Self { descriptor, rule }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

static BUILTIN: Lazy<Vec<ToolDefinition>> = Lazy::new(|| {
    let mut tools = Vec::new();
    tools.extend(regulations::definitions());
    tools.extend(jurisdictions::definitions());
    tools.extend(alerts::definitions());
    tools.extend(watchlists::definitions());
    tools.extend(obligations::definitions());
    tools.extend(controls::definitions());
    tools.extend(tasks::definitions());
    tools.extend(collaboration::definitions());
    tools.extend(directory::definitions());
    tools.extend(reports::definitions());
    tools
});

/// The built-in tool definitions in declaration order
pub fn builtin_tools() -> &'static [ToolDefinition] {
    &BUILTIN
}

/// Unit of a relative duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Hours,
    Days,
    Weeks,
    Months,
}

/// A relative duration as the remote API expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelativeDuration {
    pub value: u32,
    pub unit: DurationUnit,
}

impl RelativeDuration {
    /// Build from caller input, applying `default_unit` when no unit was given
    pub fn with_default(value: u32, unit: Option<DurationUnit>, default_unit: DurationUnit) -> Self {
        Self {
            value,
            unit: unit.unwrap_or(default_unit),
        }
    }
}

/// Priority of a tracked regulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[cfg(test)]
pub(crate) fn resolve(name: &str, arguments: Value) -> crate::dispatch::DispatchResult<RemoteCallSpec> {
    use crate::dispatch::Dispatcher;
    use crate::logging::NoOpLogger;
    use std::sync::Arc;

    let dispatcher = Dispatcher::builtin(Arc::new(NoOpLogger::new())).unwrap();
    dispatcher.resolve(name, arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_names_unique() {
        let mut seen = HashSet::new();
        for tool in builtin_tools() {
            assert!(seen.insert(tool.name()), "duplicate tool {}", tool.name());
        }
        assert_eq!(seen.len(), builtin_tools().len());
    }

    #[test]
    fn test_builtin_order_starts_with_regulations() {
        let names: Vec<_> = builtin_tools().iter().take(3).map(|t| t.name()).collect();
        assert_eq!(names, vec!["list_regulations", "get_regulation", "search_regulations"]);
        assert_eq!(
            builtin_tools().last().map(|t| t.name()),
            Some("get_dashboard_summary")
        );
    }

    #[test]
    fn test_every_tool_described() {
        for tool in builtin_tools() {
            assert!(!tool.descriptor.description.is_empty(), "{} has no description", tool.name());
            for param in &tool.descriptor.params {
                assert!(!param.description.is_empty(), "{}.{} has no description", tool.name(), param.name);
            }
        }
    }

    #[test]
    fn test_id_wins_over_label_for_every_alternative_tool() {
        // (tool, arguments carrying both alternatives, expected path, expected body)
        let cases = [
            ("get_jurisdiction", json!({ "jurisdiction_id": 2, "code": "EU" }), "/jurisdictions/2", None),
            ("get_watchlist", json!({ "watchlist_id": 3, "watchlist_name": "EU privacy" }), "/watchlists/3", None),
            (
                "add_regulation_to_watchlist",
                json!({ "watchlist_id": 3, "watchlist_name": "EU privacy", "regulation_id": 9 }),
                "/watchlists/3/regulations",
                Some(json!([{ "regulationId": 9 }])),
            ),
            (
                "assign_obligation",
                json!({ "obligation_id": 4, "assignee_id": 5, "assignee_email": "ana@example.com" }),
                "/obligations/4/assignee",
                Some(json!({ "assigneeId": 5 })),
            ),
            (
                "tag_regulation",
                json!({ "regulation_id": 1, "tag_id": 6, "tag_label": "high risk" }),
                "/regulations/1/tags",
                Some(json!([{ "tagId": 6 }])),
            ),
            (
                "untag_regulation",
                json!({ "regulation_id": 1, "tag_id": 6, "tag_label": "high risk" }),
                "/regulations/1/tags/6",
                None,
            ),
            ("get_user", json!({ "user_id": 11, "email": "ana@example.com" }), "/users/11", None),
        ];

        for (name, arguments, path, body) in cases {
            let tool = builtin_tools().iter().find(|t| t.name() == name).unwrap();
            assert!(
                tool.descriptor.description.contains("id is used when both are given"),
                "{} does not document which alternative wins",
                name
            );

            let spec = resolve(name, arguments).unwrap();
            assert_eq!(spec.path, path, "{}", name);
            assert_eq!(spec.body, body, "{}", name);
        }
    }

    #[test]
    fn test_relative_duration_default() {
        let d = RelativeDuration::with_default(3, None, DurationUnit::Days);
        assert_eq!(serde_json::to_value(d).unwrap(), serde_json::json!({ "value": 3, "unit": "days" }));

        let d = RelativeDuration::with_default(2, Some(DurationUnit::Weeks), DurationUnit::Days);
        assert_eq!(d.unit, DurationUnit::Weeks);
    }
}
