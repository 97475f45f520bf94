use hyper::Method;
use std::sync::Arc;

use routier_core::{Middleware, RendererConfig, Result};

use crate::group::RouteAdder;
use crate::route::{ControllerRef, Route, ViewRef};

/// Expands a controller into the standard set of CRUD routes.
///
/// For a path `/albums` and the default `id` argument, every controller
/// method with a matching name produces one route:
///
/// | HTTP method | controller method | path            |
/// |-------------|-------------------|-----------------|
/// | DELETE      | `delete_list`     | `/albums`       |
/// | DELETE      | `delete`          | `/albums/{id}`  |
/// | GET         | `list`            | `/albums`       |
/// | GET         | `get`             | `/albums/{id}`  |
/// | HEAD        | `head_list`       | `/albums`       |
/// | HEAD        | `head`            | `/albums/{id}`  |
/// | OPTIONS     | `options_list`    | `/albums`       |
/// | OPTIONS     | `options`         | `/albums/{id}`  |
/// | PATCH       | `patch`           | `/albums/{id}`  |
/// | POST        | `post`            | `/albums`       |
/// | PUT         | `put`             | `/albums/{id}`  |
///
/// Methods the controller does not offer are skipped. Routes default to
/// the `json` renderer and, when the endpoint is named, get names of the
/// form `{name}-{method}`.
pub struct Endpoint {
	plural: String,
	singular_base: String,
	controller: ControllerRef,
	args: Vec<String>,
	name: String,
	renderer: RendererConfig,
	middleware: Vec<Arc<dyn Middleware>>,
}

impl Endpoint {
	pub fn new(path: &str, controller: ControllerRef) -> Self {
		Self {
			plural: path.to_string(),
			singular_base: path.to_string(),
			controller,
			args: vec!["id".to_string()],
			name: String::new(),
			renderer: RendererConfig::new("json"),
			middleware: Vec::new(),
		}
	}

	/// Use a different base path for the single-item routes.
	pub fn singular(mut self, path: &str) -> Self {
		self.singular_base = path.to_string();
		self
	}

	/// Replace the default `id` path argument. Multiple arguments become
	/// consecutive path segments.
	pub fn args(mut self, args: &[&str]) -> Self {
		self.args = args.iter().map(|a| a.to_string()).collect();
		self
	}

	/// Name the endpoint. Route names become `{name}-{method}`.
	pub fn name(mut self, name: &str) -> Self {
		self.name = name.to_string();
		self
	}

	/// Replace the default `json` renderer.
	pub fn render(mut self, renderer: &str, args: Vec<serde_json::Value>) -> Self {
		self.renderer = RendererConfig::new(renderer).with_args(args);
		self
	}

	/// Middleware attached to every route the endpoint produces.
	pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middleware.push(middleware);
		self
	}

	/// Register the routes.
	pub fn add(self, adder: &mut dyn RouteAdder) -> Result<()> {
		let item_args: String = self
			.args
			.iter()
			.map(|arg| format!("/{{{arg}}}"))
			.collect();
		let singular = format!("{}{item_args}", self.singular_base);

		let table: [(Method, &str, &str); 11] = [
			(Method::DELETE, "delete_list", &self.plural),
			(Method::DELETE, "delete", &singular),
			(Method::GET, "list", &self.plural),
			(Method::GET, "get", &singular),
			(Method::HEAD, "head_list", &self.plural),
			(Method::HEAD, "head", &singular),
			(Method::OPTIONS, "options_list", &self.plural),
			(Method::OPTIONS, "options", &singular),
			(Method::PATCH, "patch", &singular),
			(Method::POST, "post", &self.plural),
			(Method::PUT, "put", &singular),
		];

		for (http_method, view_method, path) in table {
			if !self.controller.provides(view_method) {
				continue;
			}

			let name = if self.name.is_empty() {
				String::new()
			} else {
				format!("{}-{view_method}", self.name)
			};

			let view = ViewRef::Controller {
				controller: self.controller.clone(),
				method: view_method.to_string(),
			};

			let mut route = Route::any(path, view, &name)
				.method(http_method)
				.render(&self.renderer.name, self.renderer.args.clone());
			for middleware in &self.middleware {
				route = route.middleware(Arc::clone(middleware));
			}

			adder.add_route(route)?;
		}

		Ok(())
	}
}
