//! Ordered, immutable collection of tool descriptors

use std::collections::HashMap;

use thiserror::Error;

use super::descriptor::ToolDescriptor;
use crate::types::Tool;

/// Errors raised while assembling a catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A descriptor had an empty name
    #[error("tool name cannot be empty")]
    EmptyName,

    /// Two descriptors share a name
    #[error("tool `{0}` is declared more than once")]
    DuplicateTool(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Tool catalog
///
/// Keeps descriptors in declaration order for discovery and indexes them by
/// name for lookup. A lookup miss is `None`; callers decide how to report it.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    /// Build a catalog, rejecting empty or duplicate names
    pub fn new(descriptors: impl IntoIterator<Item = ToolDescriptor>) -> CatalogResult<Self> {
        let mut tools = Vec::new();
        let mut index = HashMap::new();

        for descriptor in descriptors {
            if descriptor.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if index.contains_key(&descriptor.name) {
                return Err(CatalogError::DuplicateTool(descriptor.name));
            }
            index.insert(descriptor.name.clone(), tools.len());
            tools.push(descriptor);
        }

        Ok(Self { tools, index })
    }

    /// All descriptors in declaration order
    pub fn list_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Find a descriptor by name
    pub fn find_tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Tool definitions for a model, in declaration order
    pub fn model_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDescriptor::to_tool).collect()
    }

    /// Number of tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the catalog has no tools
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ParamSpec;

    fn tool(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, format!("{} tool", name))
            .param(ParamSpec::number("id", "identifier").required())
    }

    #[test]
    fn test_catalog_keeps_declaration_order() {
        let catalog = ToolCatalog::new(vec![tool("zeta"), tool("alpha"), tool("mid")]).unwrap();
        let names: Vec<_> = catalog.list_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_find_tool_miss_is_none() {
        let catalog = ToolCatalog::new(vec![tool("get_widget")]).unwrap();
        assert!(catalog.find_tool("get_widget").is_some());
        assert!(catalog.find_tool("missing").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = ToolCatalog::new(vec![tool("a"), tool("a")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateTool("a".to_string()));

        let err = ToolCatalog::new(vec![tool(" ")]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyName);
    }

    #[test]
    fn test_model_tools() {
        let catalog = ToolCatalog::new(vec![tool("a"), tool("b")]).unwrap();
        let tools = catalog.model_tools();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[1].name, "b");
    }
}
