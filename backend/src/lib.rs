//! Backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped correlation identifier.
pub use domain::TraceId;
/// Request tracing middleware, re-exported for server wiring and tests.
pub use middleware::Trace;
