//! Request dispatch: the middleware chain, view invocation and renderers.
//!
//! Dispatch wraps a matched view in an onion of middleware. The queue is
//! assembled per request from three layers, outermost first:
//!
//! 1. application-wide middleware,
//! 2. middleware attached to the matched route (group middleware included),
//! 3. middleware the view itself declares.
//!
//! Inside the onion, before-hooks thread the request, the view runs, and
//! after-hooks thread its output. A view that returns a full response is
//! passed through untouched; bare output is turned into a response by the
//! route's renderer.

mod app;
mod chain;
mod logging;
mod render;
mod view;

pub use app::App;
pub use chain::MiddlewareChain;
pub use logging::LoggingMiddleware;
pub use render::{HtmlRenderer, JsonRenderer, Renderer, RendererRegistry};
