//! Tool catalog
//!
//! Declarative descriptors for every operation exposed to protocol clients
//! and models. The catalog is built once and never mutated afterwards.

mod descriptor;
mod registry;

pub use descriptor::{ParamKind, ParamSpec, ToolDescriptor};
pub use registry::{CatalogError, CatalogResult, ToolCatalog};
