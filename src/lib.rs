//! routier — URL routing and request dispatch.
//!
//! routier matches request paths against compiled route templates,
//! resolves the route's view (a closure or a controller method constructed
//! through a dependency registry), and runs it inside an onion of
//! middleware with before/after hooks on either side of the view.
//!
//! # Example
//!
//! ```
//! use routier::prelude::*;
//! use hyper::{Method, Uri};
//!
//! # tokio_test::block_on(async {
//! let mut router = Router::new();
//! router
//!     .add_route(
//!         Route::get(
//!             "/albums/{name}",
//!             view(|_req: Request, args: RouteArgs| async move {
//!                 Ok::<_, routier::Error>(format!(
//!                     "album: {}",
//!                     args.get("name").unwrap_or("")
//!                 ))
//!             }),
//!             "albums-show",
//!         )
//!         .render("html", vec![]),
//!     )
//!     .unwrap();
//!
//! let app = App::new(router);
//! let response = app
//!     .dispatch(Request::new(Method::GET, Uri::from_static("/albums/leprosy")))
//!     .await
//!     .unwrap();
//! assert_eq!(response.body_text(), "album: leprosy");
//! # });
//! ```

pub use routier_core::{
	After, Before, Controller, Error, FunctionView, Handler, Middleware, ParamKind, RendererConfig,
	Request, Response, Result, RouteArgs, View, ViewOutput, merge_after, merge_before,
	merge_handlers, view,
};
pub use routier_di::{FromRegistry, Registry};
pub use routier_dispatch::{
	App, HtmlRenderer, JsonRenderer, LoggingMiddleware, MiddlewareChain, Renderer,
	RendererRegistry,
};
pub use routier_routing::{
	AddsRoutes, ControllerRef, Endpoint, Group, GroupScope, IntoViewRef, PathPattern, Route,
	RouteAdder, RouteMatch, Router, ViewRef,
};

/// The names most applications need.
pub mod prelude {
	pub use routier_core::{
		After, Before, Controller, Error, Handler, Middleware, ParamKind, Request, Response,
		Result, RouteArgs, View, ViewOutput, view,
	};
	pub use routier_di::{FromRegistry, Registry};
	pub use routier_dispatch::{App, LoggingMiddleware, Renderer};
	pub use routier_routing::{AddsRoutes, ControllerRef, Endpoint, Group, Route, Router};
}
