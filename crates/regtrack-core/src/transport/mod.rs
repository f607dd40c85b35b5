//! Transport port for the remote regulatory API
//!
//! The dispatcher never talks HTTP directly. It hands a resolved
//! `(path, query, method, body)` to a [`Transport`] supplied by the caller.
//!
//! Implementations:
//! - `HttpTransport`: reqwest-backed adapter for a real deployment
//! - `MockTransport`: recording test double with scripted responses

mod error;
mod http;
mod mock;
mod traits;

pub use error::{TransportError, TransportResult};
pub use http::HttpTransport;
pub use mock::{MockTransport, RecordedCall};
pub use traits::{HttpMethod, QueryParams, RequestOptions, Transport};
