//! Open Food Facts client
//!
//! Read-only access to the public nutrition database: exact-code lookup and
//! full-text search, behind an injectable HTTP client.

pub mod fake;
pub mod http;
pub mod payload;
pub mod resolver;
pub mod search;

pub use fake::FakeClient;
pub use http::{HttpClient, HttpResponse, ReqwestClient, TransportError};
pub use resolver::resolve_by_upc;
pub use search::{search_by_text, total_pages, SearchOptions};
