//! Tool descriptor and parameter schema types

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::types::Tool;

/// Primitive kind of a declared parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParamKind {
    /// JSON Schema `type` keyword for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::Array => "array",
            ParamKind::Object => "object",
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of a single tool parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Caller-facing parameter name (snake_case)
    pub name: String,
    /// Declared primitive kind
    pub kind: ParamKind,
    /// Whether the parameter must be present and non-null
    #[serde(default)]
    pub required: bool,
    /// Human description, also used as a hint in validation messages
    pub description: String,
    /// Element kind for array parameters (schema rendering only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ParamKind>,
}

impl ParamSpec {
    /// Create an optional parameter of the given kind
    pub fn new(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            description: description.into(),
            items: None,
        }
    }

    /// Optional string parameter
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::String, description)
    }

    /// Optional number parameter
    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Number, description)
    }

    /// Optional boolean parameter
    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Boolean, description)
    }

    /// Optional array parameter with the given element kind
    pub fn array(name: impl Into<String>, items: ParamKind, description: impl Into<String>) -> Self {
        let mut spec = Self::new(name, ParamKind::Array, description);
        spec.items = Some(items);
        spec
    }

    /// Optional object parameter
    pub fn object(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Object, description)
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn json_schema(&self) -> Value {
        let mut schema = json!({
            "type": self.kind.as_str(),
            "description": self.description,
        });
        if let Some(items) = self.items {
            schema["items"] = json!({ "type": items.as_str() });
        }
        schema
    }
}

/// Descriptor of one tool: identity, description and parameter schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool name
    pub name: String,
    /// Human-readable description shown to models and clients
    pub description: String,
    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    /// Create a descriptor without parameters
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Look up a parameter by name
    pub fn find_param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Required parameters in declaration order
    pub fn required_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.required)
    }

    /// Render the parameter schema as a JSON Schema object
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.clone(), p.json_schema()))
            .collect();
        let required: Vec<&str> = self.required_params().map(|p| p.name.as_str()).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Convert into the tool definition handed to a model
    pub fn to_tool(&self) -> Tool {
        Tool::new(&self.name, &self.description).with_schema(self.input_schema())
    }
}
