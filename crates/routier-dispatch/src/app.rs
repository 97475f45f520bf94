use std::sync::Arc;

use routier_core::{Error, Middleware, Request, Response, Result};
use routier_di::Registry;
use routier_routing::{Router, ViewRef};

use crate::chain::MiddlewareChain;
use crate::render::{Renderer, RendererRegistry};
use crate::view::{ResolvedView, ViewHandler};

/// Ties a [`Router`], a dependency [`Registry`] and the renderer table
/// together into a dispatchable application.
///
/// # Examples
///
/// ```
/// use routier_dispatch::App;
/// use routier_routing::{Route, Router};
/// use routier_core::{view, Request, RouteArgs};
/// use hyper::{Method, Uri};
///
/// # tokio_test::block_on(async {
/// let mut router = Router::new();
/// router
///     .add_route(
///         Route::get(
///             "/",
///             view(|_req: Request, _args: RouteArgs| async move {
///                 Ok::<_, routier_core::Error>("home")
///             }),
///             "index",
///         )
///         .render("html", vec![]),
///     )
///     .unwrap();
///
/// let app = App::new(router);
/// let response = app
///     .dispatch(Request::new(Method::GET, Uri::from_static("/")))
///     .await
///     .unwrap();
/// assert_eq!(response.body_text(), "home");
/// # });
/// ```
pub struct App {
	router: Router,
	registry: Registry,
	renderers: Arc<RendererRegistry>,
	middleware: Vec<Arc<dyn Middleware>>,
}

impl App {
	pub fn new(router: Router) -> Self {
		Self {
			router,
			registry: Registry::new(),
			renderers: Arc::new(RendererRegistry::new()),
			middleware: Vec::new(),
		}
	}

	/// Application-wide middleware. Runs outermost, in the order added.
	pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middleware.push(middleware);
		self
	}

	/// Add a service controllers can pull out of the registry.
	pub fn register<T: Send + Sync + 'static>(mut self, value: T) -> Self {
		self.registry.add(value);
		self
	}

	/// Add a named renderer routes can select with
	/// [`Route::render`](routier_routing::Route::render).
	pub fn renderer(mut self, name: &str, renderer: Arc<dyn Renderer>) -> Self {
		// Builder methods take self by value, so the registry cannot be
		// shared with an in-flight dispatch here.
		if let Some(registry) = Arc::get_mut(&mut self.renderers) {
			registry.register(name, renderer);
		}
		self
	}

	pub fn router(&self) -> &Router {
		&self.router
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Match the request, assemble the middleware chain and run it.
	pub async fn dispatch(&self, request: Request) -> Result<Response> {
		let matched = self.router.match_request(&request)?;

		let resolved = match matched.route.view() {
			ViewRef::Handler(view) => ResolvedView::Function(Arc::clone(view)),
			ViewRef::Controller { controller, method } => ResolvedView::Controller {
				instance: controller.construct(&self.registry)?,
				method: method.clone(),
			},
			ViewRef::MethodName(name) => {
				return Err(Error::View(format!(
					"method name view '{name}' was never bound to a controller"
				)));
			}
		};

		let mut queue = self.middleware.clone();
		queue.extend(matched.route.middleware_stack().iter().cloned());
		queue.extend(resolved.middleware());

		let handler = ViewHandler::new(matched, resolved, Arc::clone(&self.renderers));
		MiddlewareChain::new(queue, Arc::new(handler)).run(request).await
	}
}
