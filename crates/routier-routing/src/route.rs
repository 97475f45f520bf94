use hyper::Method;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

use routier_core::{
	After, Before, Controller, Error, Middleware, ParamKind, RendererConfig, Result, RouteArgs,
	View,
};
use routier_di::{FromRegistry, Registry};

use crate::pattern::PathPattern;

/// A handle to a controller type: its name, the method names it offers,
/// and a constructor that builds an instance from the dependency registry.
///
/// Constructed once with [`ControllerRef::of`] and cloned into every route
/// that binds to the controller. The instance itself is only built at
/// dispatch time, so a missing dependency surfaces when the route first
/// matches, not at registration.
#[derive(Clone)]
pub struct ControllerRef {
	type_name: &'static str,
	methods: &'static [&'static str],
	construct: Arc<dyn Fn(&Registry) -> Result<Arc<dyn Controller>> + Send + Sync>,
}

impl ControllerRef {
	pub fn of<C>() -> Self
	where
		C: Controller + FromRegistry + Send + Sync + 'static,
	{
		Self {
			type_name: std::any::type_name::<C>(),
			methods: C::methods(),
			construct: Arc::new(|registry| {
				Ok(Arc::new(C::from_registry(registry)?) as Arc<dyn Controller>)
			}),
		}
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn methods(&self) -> &'static [&'static str] {
		self.methods
	}

	/// Whether the controller offers a method under this name.
	pub fn provides(&self, method: &str) -> bool {
		self.methods.contains(&method)
	}

	/// Build an instance from the registry.
	pub fn construct(&self, registry: &Registry) -> Result<Arc<dyn Controller>> {
		(self.construct)(registry)
	}
}

impl fmt::Debug for ControllerRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ControllerRef")
			.field("type_name", &self.type_name)
			.field("methods", &self.methods)
			.finish()
	}
}

/// What a route invokes when it matches.
///
/// A route starts out as either a standalone [`View`] or a bare method
/// name. Method names are placeholders: a group with a controller binds
/// them into [`ViewRef::Controller`] when the route is added, and a method
/// name that never gets bound is a dispatch error.
#[derive(Clone)]
pub enum ViewRef {
	/// A standalone view callable.
	Handler(Arc<dyn View>),
	/// A method on a controller, resolved through the registry.
	Controller {
		controller: ControllerRef,
		method: String,
	},
	/// A bare method name awaiting a controller from an enclosing group.
	MethodName(String),
}

impl fmt::Debug for ViewRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ViewRef::Handler(_) => f.write_str("ViewRef::Handler"),
			ViewRef::Controller { controller, method } => f
				.debug_struct("ViewRef::Controller")
				.field("controller", &controller.type_name())
				.field("method", method)
				.finish(),
			ViewRef::MethodName(name) => {
				f.debug_tuple("ViewRef::MethodName").field(name).finish()
			}
		}
	}
}

/// Conversion into a [`ViewRef`], so route constructors accept a view,
/// a `(controller, method)` pair, or a bare method name string.
pub trait IntoViewRef {
	fn into_view_ref(self) -> ViewRef;
}

impl IntoViewRef for ViewRef {
	fn into_view_ref(self) -> ViewRef {
		self
	}
}

impl IntoViewRef for Arc<dyn View> {
	fn into_view_ref(self) -> ViewRef {
		ViewRef::Handler(self)
	}
}

impl IntoViewRef for (ControllerRef, &str) {
	fn into_view_ref(self) -> ViewRef {
		ViewRef::Controller {
			controller: self.0,
			method: self.1.to_string(),
		}
	}
}

impl IntoViewRef for &str {
	fn into_view_ref(self) -> ViewRef {
		ViewRef::MethodName(self.to_string())
	}
}

impl IntoViewRef for String {
	fn into_view_ref(self) -> ViewRef {
		ViewRef::MethodName(self)
	}
}

/// A single route: a template, the methods it answers to, the view it
/// invokes, and the middleware, hooks and renderer wrapped around it.
///
/// Routes are built fluently and handed to a
/// [`Router`](crate::Router) or [`Group`](crate::Group):
///
/// ```
/// use routier_routing::Route;
/// use routier_core::{view, Request, RouteArgs};
///
/// let route = Route::get(
///     "/albums/{name}",
///     view(|_req: Request, args: RouteArgs| async move {
///         Ok::<_, routier_core::Error>(format!("album {}", args.get("name").unwrap_or("")))
///     }),
///     "albums-show",
/// );
/// assert_eq!(route.name(), "albums-show");
/// ```
pub struct Route {
	template: String,
	pattern: OnceCell<PathPattern>,
	methods: Vec<Method>,
	name: String,
	view: ViewRef,
	middleware: Vec<Arc<dyn Middleware>>,
	before: Vec<Arc<dyn Before>>,
	after: Vec<Arc<dyn After>>,
	renderer: Option<RendererConfig>,
	params: Vec<(String, ParamKind)>,
}

impl Route {
	/// A route answering every HTTP method.
	pub fn any(template: &str, view: impl IntoViewRef, name: &str) -> Self {
		Self {
			template: template.to_string(),
			pattern: OnceCell::new(),
			methods: Vec::new(),
			name: name.to_string(),
			view: view.into_view_ref(),
			middleware: Vec::new(),
			before: Vec::new(),
			after: Vec::new(),
			renderer: None,
			params: Vec::new(),
		}
	}

	pub fn get(template: &str, view: impl IntoViewRef, name: &str) -> Self {
		Self::any(template, view, name).method(Method::GET)
	}

	pub fn post(template: &str, view: impl IntoViewRef, name: &str) -> Self {
		Self::any(template, view, name).method(Method::POST)
	}

	pub fn put(template: &str, view: impl IntoViewRef, name: &str) -> Self {
		Self::any(template, view, name).method(Method::PUT)
	}

	pub fn patch(template: &str, view: impl IntoViewRef, name: &str) -> Self {
		Self::any(template, view, name).method(Method::PATCH)
	}

	pub fn delete(template: &str, view: impl IntoViewRef, name: &str) -> Self {
		Self::any(template, view, name).method(Method::DELETE)
	}

	pub fn head(template: &str, view: impl IntoViewRef, name: &str) -> Self {
		Self::any(template, view, name).method(Method::HEAD)
	}

	pub fn options(template: &str, view: impl IntoViewRef, name: &str) -> Self {
		Self::any(template, view, name).method(Method::OPTIONS)
	}

	/// Add an HTTP method the route answers to. A route with no explicit
	/// methods answers all of them.
	pub fn method(mut self, method: Method) -> Self {
		self.methods.push(method);
		self
	}

	/// Attach middleware. Runs in the order attached, after any group
	/// middleware.
	pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middleware.push(middleware);
		self
	}

	/// Attach a before-hook.
	pub fn before(mut self, handler: Arc<dyn Before>) -> Self {
		self.before.push(handler);
		self
	}

	/// Attach an after-hook.
	pub fn after(mut self, handler: Arc<dyn After>) -> Self {
		self.after.push(handler);
		self
	}

	/// Select the renderer that turns the view's output into a response.
	pub fn render(mut self, name: &str, args: Vec<serde_json::Value>) -> Self {
		self.renderer = Some(RendererConfig::new(name).with_args(args));
		self
	}

	/// Declare the type of a path parameter. Dispatch validates the
	/// captured text against it before invoking the view.
	pub fn param(mut self, name: &str, kind: ParamKind) -> Self {
		self.params.push((name.to_string(), kind));
		self
	}

	/// Prepend a pattern prefix and, when the route is named, a name
	/// prefix. Used by groups when a route is registered through them.
	pub fn prefix(mut self, pattern_prefix: &str, name_prefix: &str) -> Self {
		if !pattern_prefix.is_empty() {
			self.template = format!("{pattern_prefix}{}", self.template);
			// The compiled matcher belongs to the old template.
			self.pattern.take();
		}

		if !name_prefix.is_empty() && !self.name.is_empty() {
			self.name = format!("{name_prefix}{}", self.name);
		}

		self
	}

	/// Bind a controller to a route declared with a bare method name.
	///
	/// Only method-name views can be bound; a closure view or a view that
	/// is already bound to a controller is a configuration error.
	pub fn controller(mut self, controller: &ControllerRef) -> Result<Self> {
		match self.view {
			ViewRef::MethodName(method) => {
				if !controller.provides(&method) {
					return Err(Error::View(format!(
						"controller {} has no view method '{method}'",
						controller.type_name()
					)));
				}
				self.view = ViewRef::Controller {
					controller: controller.clone(),
					method,
				};
				Ok(self)
			}
			view => Err(Error::View(format!(
				"cannot add controller to a view that is not a bare method name: {view:?}"
			))),
		}
	}

	/// Compile the template, memoizing the result.
	pub fn compiled(&self) -> Result<&PathPattern> {
		self.pattern
			.get_or_try_init(|| PathPattern::compile(&self.template))
	}

	/// Match a decoded request path against this route.
	pub fn match_path(&self, path: &str) -> Result<Option<RouteArgs>> {
		Ok(self.compiled()?.match_path(path))
	}

	pub fn template(&self) -> &str {
		&self.template
	}

	pub fn methods(&self) -> &[Method] {
		&self.methods
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn view(&self) -> &ViewRef {
		&self.view
	}

	pub fn middleware_stack(&self) -> &[Arc<dyn Middleware>] {
		&self.middleware
	}

	pub fn before_handlers(&self) -> &[Arc<dyn Before>] {
		&self.before
	}

	pub fn after_handlers(&self) -> &[Arc<dyn After>] {
		&self.after
	}

	pub fn renderer(&self) -> Option<&RendererConfig> {
		self.renderer.as_ref()
	}

	pub fn params(&self) -> &[(String, ParamKind)] {
		&self.params
	}

	pub(crate) fn set_middleware(&mut self, middleware: Vec<Arc<dyn Middleware>>) {
		self.middleware = middleware;
	}

	pub(crate) fn set_before_handlers(&mut self, before: Vec<Arc<dyn Before>>) {
		self.before = before;
	}

	pub(crate) fn set_after_handlers(&mut self, after: Vec<Arc<dyn After>>) {
		self.after = after;
	}

	pub(crate) fn take_for_merge(
		&mut self,
	) -> (Vec<Arc<dyn Middleware>>, Vec<Arc<dyn Before>>, Vec<Arc<dyn After>>) {
		(
			std::mem::take(&mut self.middleware),
			std::mem::take(&mut self.before),
			std::mem::take(&mut self.after),
		)
	}
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("template", &self.template)
			.field("methods", &self.methods)
			.field("name", &self.name)
			.field("view", &self.view)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use routier_core::{Request, view};

	fn noop() -> Arc<dyn View> {
		view(|_req: Request, _args: RouteArgs| async move { Ok::<_, Error>(()) })
	}

	#[test]
	fn no_methods_means_any_method() {
		let route = Route::any("/", noop(), "index");
		assert!(route.methods().is_empty());

		let route = Route::get("/", noop(), "index").method(Method::POST);
		assert_eq!(route.methods(), &[Method::GET, Method::POST]);
	}

	#[test]
	fn prefix_prepends_template_and_name() {
		let route = Route::get("/albums", noop(), "albums").prefix("/media", "media-");
		assert_eq!(route.template(), "/media/albums");
		assert_eq!(route.name(), "media-albums");
	}

	#[test]
	fn prefix_leaves_unnamed_routes_unnamed() {
		let route = Route::get("/albums", noop(), "").prefix("/media", "media-");
		assert_eq!(route.name(), "");
	}

	#[test]
	fn prefix_invalidates_the_compiled_matcher() {
		let route = Route::get("/albums", noop(), "albums");
		assert!(route.match_path("/albums").unwrap().is_some());

		let route = route.prefix("/media", "");
		assert!(route.match_path("/albums").unwrap().is_none());
		assert!(route.match_path("/media/albums").unwrap().is_some());
	}

	#[test]
	fn controller_binding_requires_a_method_name_view() {
		let route = Route::get("/albums", noop(), "albums");

		struct Stub;

		#[async_trait::async_trait]
		impl Controller for Stub {
			async fn call(
				&self,
				_method: &str,
				_request: Request,
				_args: &RouteArgs,
			) -> Result<routier_core::ViewOutput> {
				Ok(routier_core::ViewOutput::Empty)
			}

			fn methods() -> &'static [&'static str] {
				&["list"]
			}
		}

		impl FromRegistry for Stub {
			fn from_registry(_registry: &Registry) -> Result<Self> {
				Ok(Stub)
			}
		}

		let controller = ControllerRef::of::<Stub>();
		assert!(route.controller(&controller).is_err());

		let route = Route::get("/albums", "list", "albums")
			.controller(&controller)
			.unwrap();
		assert!(matches!(route.view(), ViewRef::Controller { .. }));

		let route = Route::get("/albums", "purge", "albums");
		assert!(route.controller(&controller).is_err());
	}
}
