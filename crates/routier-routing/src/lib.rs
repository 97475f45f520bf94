//! URL routing: pattern compilation, route registry, groups and endpoints.
//!
//! The pieces fit together like this:
//!
//! - [`PathPattern`] compiles a route template such as `/albums/{name}` or
//!   `/files/...path` into an anchored regex and extracts named arguments
//!   from request paths.
//! - [`Route`] pairs a template with the view to invoke, the HTTP methods
//!   it answers to, and per-route middleware, hooks and renderer settings.
//! - [`Router`] holds routes in per-method buckets, matches requests in
//!   registration order, distinguishes 404 from 405, and builds URLs back
//!   from route names.
//! - [`Group`] nests routes under shared pattern/name prefixes, a shared
//!   controller, and shared middleware and hooks.
//! - [`Endpoint`] expands a controller into the standard set of CRUD
//!   routes.

mod endpoint;
mod group;
mod pattern;
mod route;
mod router;

pub use endpoint::Endpoint;
pub use group::{AddsRoutes, Group, GroupScope, RouteAdder};
pub use pattern::PathPattern;
pub use route::{ControllerRef, IntoViewRef, Route, ViewRef};
pub use router::{RouteMatch, Router};
