//! Configuration
//!
//! Supports two settings sources:
//! - `MemoryConfigProvider`: In-memory for testing and embedding
//! - `FileConfigProvider`: YAML file (~/.config/regtrack/config.yaml)

mod file;
mod memory;
mod settings;
mod traits;

pub use file::FileConfigProvider;
pub use memory::MemoryConfigProvider;
pub use settings::{AgentSettings, ApiSettings, RegtrackConfig};
pub use traits::{ConfigError, ConfigResult, SettingsProvider};
