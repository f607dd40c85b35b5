//! Compliance reports and the dashboard summary

use serde::{Deserialize, Serialize};

use crate::catalog::{ParamSpec, ToolDescriptor};
use crate::dispatch::{parse_args, RemoteCallSpec, RuleError};
use super::{JsonObject, ToolDefinition};

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            ToolDescriptor::new("generate_compliance_report", "Generate a compliance report")
                .param(ParamSpec::string("jurisdiction", "Limit the report to a jurisdiction code"))
                .param(ParamSpec::string("from_date", "ISO start date"))
                .param(ParamSpec::string("to_date", "ISO end date"))
                .param(ParamSpec::string("format", "json, csv or pdf (default json)")),
            generate_compliance_report,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("get_report", "Get a generated report by id")
                .param(ParamSpec::number("report_id", "Report id").required()),
            get_report,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("get_dashboard_summary", "Counts of open alerts, obligations and tasks"),
            get_dashboard_summary,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ReportFormat {
    #[default]
    Json,
    Csv,
    Pdf,
}

#[derive(Deserialize)]
struct ReportArgs {
    jurisdiction: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
    format: Option<ReportFormat>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_date: Option<String>,
    format: ReportFormat,
}

fn generate_compliance_report(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: ReportArgs = parse_args(args)?;
    let request = ReportRequest {
        jurisdiction: args.jurisdiction,
        from_date: args.from_date,
        to_date: args.to_date,
        format: args.format.unwrap_or_default(),
    };
    Ok(RemoteCallSpec::post("/reports").json_body(&request)?)
}

#[derive(Deserialize)]
struct ReportRef {
    report_id: u64,
}

fn get_report(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: ReportRef = parse_args(args)?;
    Ok(RemoteCallSpec::get(format!("/reports/{}", args.report_id)))
}

fn get_dashboard_summary(_args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    Ok(RemoteCallSpec::get("/dashboard/summary"))
}

#[cfg(test)]
mod tests {
    use crate::tools::resolve;
    use crate::transport::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_report_default_format() {
        let spec = resolve("generate_compliance_report", json!({ "jurisdiction": "EU" })).unwrap();
        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(spec.body, Some(json!({ "jurisdiction": "EU", "format": "json" })));
    }

    #[test]
    fn test_report_explicit_format_and_dates() {
        let spec = resolve(
            "generate_compliance_report",
            json!({ "format": "pdf", "from_date": "2024-01-01", "to_date": "2024-12-31" }),
        )
        .unwrap();
        assert_eq!(
            spec.body,
            Some(json!({ "fromDate": "2024-01-01", "toDate": "2024-12-31", "format": "pdf" }))
        );
    }

    #[test]
    fn test_dashboard_summary() {
        let spec = resolve("get_dashboard_summary", json!(null)).unwrap();
        assert_eq!(spec.path, "/dashboard/summary");
        assert!(spec.body.is_none());
    }
}
