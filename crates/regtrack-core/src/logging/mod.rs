//! Logging abstractions for runtime-agnostic logging
//!
//! Every component takes an `Arc<dyn Logger>` so the host decides where
//! messages go. There is no global logger.

mod traits;
mod noop;
mod console;

pub use traits::Logger;
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
