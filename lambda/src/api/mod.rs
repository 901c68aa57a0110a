//! API Gateway adapter: event model, request parsing, response building and
//! the handler wrapper itself.

pub mod event;
pub mod handler;
pub mod helpers;
pub mod parsing;

// Re-export the main entry points for convenience
pub use event::ProxyEvent;
pub use handler::{ApiGatewayHandler, HandlerInput, api_gateway, run};
pub use helpers::Response;
