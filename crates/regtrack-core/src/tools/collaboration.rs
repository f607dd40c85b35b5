//! Comments, tags and documents attached to tracked entities

use serde::{Deserialize, Serialize};

use crate::catalog::{ParamSpec, ToolDescriptor};
use crate::dispatch::{escape_segment, parse_args, resolve_lookup, Lookup, RemoteCallSpec, RuleError};
use super::{JsonObject, ToolDefinition};

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            ToolDescriptor::new("list_comments", "List comments on an entity")
                .param(ParamSpec::string("entity_type", "regulation, obligation, control or task"))
                .param(ParamSpec::number("entity_id", "Entity id")),
            list_comments,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("add_comment", "Comment on an entity")
                .param(ParamSpec::string("entity_type", "regulation, obligation, control or task").required())
                .param(ParamSpec::number("entity_id", "Entity id").required())
                .param(ParamSpec::string("text", "Comment text").required()),
            add_comment,
        ),
        ToolDefinition::new(ToolDescriptor::new("list_tags", "List tags"), list_tags),
        ToolDefinition::new(
            ToolDescriptor::new("create_tag", "Create a tag")
                .param(ParamSpec::string("label", "Tag label").required())
                .param(ParamSpec::string("color", "Hex color, e.g. #2d7ff9")),
            create_tag,
        ),
        ToolDefinition::new(
            ToolDescriptor::new(
                "tag_regulation",
                "Tag a regulation by tag id or tag label. The id is used when both are given",
            )
            .param(ParamSpec::number("regulation_id", "Regulation id").required())
            .param(ParamSpec::number("tag_id", "Tag id"))
            .param(ParamSpec::string("tag_label", "Tag label")),
            tag_regulation,
        ),
        ToolDefinition::new(
            ToolDescriptor::new(
                "untag_regulation",
                "Remove a tag from a regulation by tag id or tag label. The id is used when both are given",
            )
            .param(ParamSpec::number("regulation_id", "Regulation id").required())
            .param(ParamSpec::number("tag_id", "Tag id"))
            .param(ParamSpec::string("tag_label", "Tag label")),
            untag_regulation,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("list_documents", "List supporting documents")
                .param(ParamSpec::number("regulation_id", "Only documents for this regulation"))
                .param(ParamSpec::string("entity_type", "Entity type the document is attached to"))
                .param(ParamSpec::number("entity_id", "Entity id the document is attached to")),
            list_documents,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("get_document", "Get a document by id")
                .param(ParamSpec::number("document_id", "Document id").required()),
            get_document,
        ),
        ToolDefinition::new(
            ToolDescriptor::new("attach_document", "Attach a document link to an entity")
                .param(ParamSpec::string("entity_type", "regulation, obligation, control or task").required())
                .param(ParamSpec::number("entity_id", "Entity id").required())
                .param(ParamSpec::string("url", "Document URL").required())
                .param(ParamSpec::string("title", "Display title")),
            attach_document,
        ),
    ]
}

#[derive(Deserialize)]
struct EntityFilter {
    entity_type: Option<String>,
    entity_id: Option<u64>,
}

fn list_comments(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: EntityFilter = parse_args(args)?;
    Ok(RemoteCallSpec::get("/comments")
        .query("entityType", args.entity_type)
        .query("entityId", args.entity_id))
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
struct NewComment {
    entity_type: String,
    entity_id: u64,
    text: String,
}

fn add_comment(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let comment: NewComment = parse_args(args)?;
    Ok(RemoteCallSpec::post("/comments").json_body(&[comment])?)
}

fn list_tags(_args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    Ok(RemoteCallSpec::get("/tags"))
}

#[derive(Deserialize, Serialize)]
struct NewTag {
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

fn create_tag(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let tag: NewTag = parse_args(args)?;
    Ok(RemoteCallSpec::post("/tags").json_body(&[tag])?)
}

#[derive(Deserialize)]
struct TagArgs {
    regulation_id: u64,
    tag_id: Option<u64>,
    tag_label: Option<String>,
}

impl TagArgs {
    fn lookup(&self) -> Result<Lookup<'_>, RuleError> {
        resolve_lookup(self.tag_id, self.tag_label.as_deref(), "tag_id", "tag_label")
    }
}

fn tag_regulation(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: TagArgs = parse_args(args)?;
    let entry = match args.lookup()? {
        Lookup::Id(id) => serde_json::json!({ "tagId": id }),
        Lookup::Label(label) => serde_json::json!({ "tagLabel": label }),
    };
    Ok(RemoteCallSpec::post(format!("/regulations/{}/tags", args.regulation_id)).body(serde_json::json!([entry])))
}

fn untag_regulation(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: TagArgs = parse_args(args)?;
    let path = match args.lookup()? {
        Lookup::Id(id) => format!("/regulations/{}/tags/{}", args.regulation_id, id),
        Lookup::Label(label) => format!(
            "/regulations/{}/tags/by-label/{}",
            args.regulation_id,
            escape_segment(label)
        ),
    };
    Ok(RemoteCallSpec::delete(path))
}

#[derive(Deserialize)]
struct DocumentFilter {
    regulation_id: Option<u64>,
    entity_type: Option<String>,
    entity_id: Option<u64>,
}

fn list_documents(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: DocumentFilter = parse_args(args)?;
    Ok(RemoteCallSpec::get("/documents")
        .query("regulationId", args.regulation_id)
        .query("entityType", args.entity_type)
        .query("entityId", args.entity_id))
}

#[derive(Deserialize)]
struct DocumentRef {
    document_id: u64,
}

fn get_document(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let args: DocumentRef = parse_args(args)?;
    Ok(RemoteCallSpec::get(format!("/documents/{}", args.document_id)))
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
struct NewDocument {
    entity_type: String,
    entity_id: u64,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

fn attach_document(args: &JsonObject) -> Result<RemoteCallSpec, RuleError> {
    let document: NewDocument = parse_args(args)?;
    Ok(RemoteCallSpec::post("/documents").json_body(&[document])?)
}

#[cfg(test)]
mod tests {
    use crate::dispatch::DispatchError;
    use crate::tools::resolve;
    use crate::transport::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_add_comment_body() {
        let spec = resolve(
            "add_comment",
            json!({ "entity_type": "obligation", "entity_id": 7, "text": "Legal signed off" }),
        )
        .unwrap();
        assert_eq!(
            spec.body,
            Some(json!([{ "entityType": "obligation", "entityId": 7, "text": "Legal signed off" }]))
        );
    }

    #[test]
    fn test_tag_by_id_and_label() {
        let spec = resolve("tag_regulation", json!({ "regulation_id": 1, "tag_id": 5 })).unwrap();
        assert_eq!(spec.path, "/regulations/1/tags");
        assert_eq!(spec.body, Some(json!([{ "tagId": 5 }])));

        let spec = resolve("tag_regulation", json!({ "regulation_id": 1, "tag_label": "privacy" })).unwrap();
        assert_eq!(spec.body, Some(json!([{ "tagLabel": "privacy" }])));
    }

    #[test]
    fn test_tag_both_prefers_id() {
        let spec = resolve(
            "tag_regulation",
            json!({ "regulation_id": 1, "tag_id": 5, "tag_label": "privacy" }),
        )
        .unwrap();
        assert_eq!(spec.body, Some(json!([{ "tagId": 5 }])));
    }

    #[test]
    fn test_tag_neither_is_ambiguous() {
        let err = resolve("tag_regulation", json!({ "regulation_id": 1 })).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::AmbiguousIdentifier { ref first, ref second, .. }
                if first == "tag_id" && second == "tag_label"
        ));
    }

    #[test]
    fn test_untag_by_label_escapes() {
        let spec = resolve(
            "untag_regulation",
            json!({ "regulation_id": 1, "tag_label": "high risk" }),
        )
        .unwrap();
        assert_eq!(spec.method, HttpMethod::Delete);
        assert_eq!(spec.path, "/regulations/1/tags/by-label/high%20risk");
    }

    #[test]
    fn test_attach_document() {
        let spec = resolve(
            "attach_document",
            json!({ "entity_type": "regulation", "entity_id": 2, "url": "https://example.com/a.pdf" }),
        )
        .unwrap();
        assert_eq!(
            spec.body,
            Some(json!([{ "entityType": "regulation", "entityId": 2, "url": "https://example.com/a.pdf" }]))
        );
    }
}
