//! Views, controllers and the values they produce.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::args::RouteArgs;
use crate::exception::Result;
use crate::handler::Middleware;
use crate::request::Request;
use crate::response::Response;

/// The value a view returns.
///
/// A view may build a full [`Response`] itself, or return bare data and let
/// the route's renderer (or the first after-hook) turn it into a response.
#[derive(Debug, Clone)]
pub enum ViewOutput {
	/// A complete response, passed through dispatch untouched.
	Response(Response),
	/// Plain text, rendered by the route's renderer.
	Text(String),
	/// Structured data, rendered by the route's renderer.
	Json(serde_json::Value),
	/// No payload. Renders to an empty body.
	Empty,
}

impl From<Response> for ViewOutput {
	fn from(response: Response) -> Self {
		ViewOutput::Response(response)
	}
}

impl From<String> for ViewOutput {
	fn from(text: String) -> Self {
		ViewOutput::Text(text)
	}
}

impl From<&str> for ViewOutput {
	fn from(text: &str) -> Self {
		ViewOutput::Text(text.to_string())
	}
}

impl From<serde_json::Value> for ViewOutput {
	fn from(value: serde_json::Value) -> Self {
		ViewOutput::Json(value)
	}
}

impl From<()> for ViewOutput {
	fn from(_: ()) -> Self {
		ViewOutput::Empty
	}
}

/// Renderer configuration attached to a route.
///
/// Names a renderer registered with the dispatcher plus any arguments the
/// renderer takes.
#[derive(Debug, Clone)]
pub struct RendererConfig {
	pub name: String,
	pub args: Vec<serde_json::Value>,
}

impl RendererConfig {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			args: Vec::new(),
		}
	}

	pub fn with_args(mut self, args: Vec<serde_json::Value>) -> Self {
		self.args = args;
		self
	}
}

/// A callable invoked for a matched route.
///
/// Views receive the request and the arguments captured from the path, and
/// may declare middleware of their own, which runs innermost in the
/// pipeline.
#[async_trait]
pub trait View: Send + Sync {
	async fn call(&self, request: Request, args: &RouteArgs) -> Result<ViewOutput>;

	/// Middleware this view brings along. Runs after route middleware.
	fn middleware(&self) -> Vec<Arc<dyn Middleware>> {
		Vec::new()
	}
}

/// A set of related views addressed by method name.
///
/// Controllers are constructed from the dependency registry at dispatch
/// time and invoked with the method name the route was bound to.
#[async_trait]
pub trait Controller: Send + Sync {
	async fn call(&self, method: &str, request: Request, args: &RouteArgs) -> Result<ViewOutput>;

	/// The method names this controller can be bound to.
	fn methods() -> &'static [&'static str]
	where
		Self: Sized;

	/// Middleware a specific controller method brings along.
	fn middleware(&self, _method: &str) -> Vec<Arc<dyn Middleware>> {
		Vec::new()
	}
}

/// Adapter turning an async closure into a [`View`].
pub struct FunctionView<F> {
	func: F,
}

impl<F> FunctionView<F> {
	pub fn new(func: F) -> Self {
		Self { func }
	}
}

#[async_trait]
impl<F, Fut, Out> View for FunctionView<F>
where
	F: Fn(Request, RouteArgs) -> Fut + Send + Sync,
	Fut: Future<Output = Result<Out>> + Send,
	Out: Into<ViewOutput>,
{
	async fn call(&self, request: Request, args: &RouteArgs) -> Result<ViewOutput> {
		(self.func)(request, args.clone()).await.map(Into::into)
	}
}

/// Wrap an async closure as a shareable view.
///
/// # Examples
///
/// ```
/// use routier_core::{view, Request, RouteArgs, Result};
///
/// let index = view(|_request: Request, _args: RouteArgs| async move {
///     Ok::<_, routier_core::Error>("hello")
/// });
/// # let _ = index;
/// ```
pub fn view<F, Fut, Out>(func: F) -> Arc<dyn View>
where
	F: Fn(Request, RouteArgs) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Out>> + Send + 'static,
	Out: Into<ViewOutput> + 'static,
{
	Arc::new(FunctionView::new(func))
}
