//! Helpers shared by transform rules

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::validation::Violation;
use super::error::RuleError;

/// Read validated raw arguments into a typed per-tool struct
pub fn parse_args<T: DeserializeOwned>(args: &Map<String, Value>) -> Result<T, RuleError> {
    Ok(serde_json::from_value(Value::Object(args.clone()))?)
}

/// An entity addressed either by numeric id or by a human label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Id(u64),
    Label(&'a str),
}

/// Resolve an exclusive id-or-label pair
///
/// When both are supplied the id wins. A blank label counts as absent.
pub fn resolve_lookup<'a>(
    id: Option<u64>,
    label: Option<&'a str>,
    id_field: &'static str,
    label_field: &'static str,
) -> Result<Lookup<'a>, RuleError> {
    match (id, label.filter(|l| !l.trim().is_empty())) {
        (Some(id), _) => Ok(Lookup::Id(id)),
        (None, Some(label)) => Ok(Lookup::Label(label)),
        (None, None) => Err(RuleError::Ambiguous {
            first: id_field,
            second: label_field,
        }),
    }
}

/// Escape a label for use as a single path segment
pub fn escape_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Reject an empty bulk payload
pub fn non_empty<T>(items: Vec<T>, field: &str) -> Result<Vec<T>, RuleError> {
    if items.is_empty() {
        return Err(RuleError::Invalid(Violation::MissingField {
            field: field.to_string(),
            hint: "at least one element is required".to_string(),
        }));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Args {
        regulation_id: u64,
        notes: Option<String>,
    }

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_args() {
        let args: Args = parse_args(&map(json!({ "regulation_id": 9, "notes": null, "extra": 1 }))).unwrap();
        assert_eq!(args.regulation_id, 9);
        assert!(args.notes.is_none());
    }

    #[test]
    fn test_parse_args_rejects_fractional_id() {
        let err = parse_args::<Args>(&map(json!({ "regulation_id": 9.5 }))).unwrap_err();
        assert!(matches!(err, RuleError::Invalid(Violation::Malformed { .. })));
    }

    #[test]
    fn test_lookup_id_wins() {
        assert_eq!(
            resolve_lookup(Some(3), Some("privacy"), "tag_id", "tag_label").unwrap(),
            Lookup::Id(3)
        );
        assert_eq!(
            resolve_lookup(None, Some("privacy"), "tag_id", "tag_label").unwrap(),
            Lookup::Label("privacy")
        );
    }

    #[test]
    fn test_lookup_neither() {
        let err = resolve_lookup(None, Some("  "), "tag_id", "tag_label").unwrap_err();
        assert_eq!(
            err,
            RuleError::Ambiguous {
                first: "tag_id",
                second: "tag_label"
            }
        );
    }

    #[test]
    fn test_escape_segment() {
        assert_eq!(escape_segment("EU/AI Act"), "EU%2FAI%20Act");
        assert_eq!(escape_segment("gdpr"), "gdpr");
    }

    #[test]
    fn test_non_empty() {
        assert!(non_empty(Vec::<u64>::new(), "regulations").is_err());
        assert_eq!(non_empty(vec![1, 2], "regulations").unwrap(), vec![1, 2]);
    }
}
