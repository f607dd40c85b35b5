//! Tool dispatch pipeline
//!
//! Turns a tool name plus loosely-typed arguments into a remote call:
//! catalog lookup, validation, a per-tool transform rule producing a
//! [`RemoteCallSpec`], and finally the transport.

mod args;
mod dispatcher;
mod error;
mod remote;

pub use args::{escape_segment, non_empty, parse_args, resolve_lookup, Lookup};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult, RuleError};
pub use remote::RemoteCallSpec;
