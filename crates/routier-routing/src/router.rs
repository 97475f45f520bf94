use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

use routier_core::{Error, Request, Result, RouteArgs};

use crate::group::{Group, RouteAdder};
use crate::route::Route;

// Bucket key for routes registered without explicit methods.
const ALL: &str = "ALL";

/// A matched route together with the arguments captured from the path.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	pub route: Arc<Route>,
	pub args: RouteArgs,
}

/// The route registry.
///
/// Routes live in per-method buckets and are tried in registration order:
/// first the bucket of the request method, then the bucket of method-less
/// routes. The first route whose pattern matches wins. When no route
/// matches but one would under a different method, matching fails with
/// [`Error::MethodNotAllowed`] instead of [`Error::NotFound`].
///
/// # Examples
///
/// ```
/// use routier_routing::{Route, Router};
/// use routier_core::{view, Request, RouteArgs};
/// use hyper::{Method, Uri};
///
/// let mut router = Router::new();
/// router
///     .add_route(Route::get(
///         "/albums/{name}",
///         view(|_req: Request, args: RouteArgs| async move {
///             Ok::<_, routier_core::Error>(args.get("name").unwrap_or("").to_string())
///         }),
///         "albums-show",
///     ))
///     .unwrap();
///
/// let request = Request::new(Method::GET, Uri::from_static("/albums/leprosy"));
/// let matched = router.match_request(&request).unwrap();
/// assert_eq!(matched.args.get("name"), Some("leprosy"));
/// ```
#[derive(Default)]
pub struct Router {
	buckets: HashMap<String, Vec<Arc<Route>>>,
	names: HashMap<String, Arc<Route>>,
}

impl Router {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a route.
	///
	/// The template is compiled eagerly, so a broken pattern fails here
	/// rather than on the first matching request. Registering a second
	/// route under an already-taken name fails with
	/// [`Error::DuplicateRoute`] and leaves the registry untouched.
	pub fn add_route(&mut self, route: Route) -> Result<()> {
		route.compiled()?;

		let name = route.name().to_string();
		if !name.is_empty() && self.names.contains_key(&name) {
			return Err(Error::DuplicateRoute(name));
		}

		let route = Arc::new(route);

		if !name.is_empty() {
			self.names.insert(name, Arc::clone(&route));
		}

		if route.methods().is_empty() {
			self.bucket(ALL).push(route);
		} else {
			for method in route.methods().to_vec() {
				self.bucket(method.as_str()).push(Arc::clone(&route));
			}
		}

		Ok(())
	}

	/// Register a group of routes. Prefixes, controller bindings and
	/// shared middleware/hooks are applied as the group unfolds.
	pub fn add_group(&mut self, group: &mut Group) -> Result<()> {
		group.create(self)
	}

	/// Match a request against the registry.
	pub fn match_request(&self, request: &Request) -> Result<RouteMatch> {
		let path = request.decoded_path();
		let method = request.method.as_str();

		for bucket in [method, ALL] {
			for route in self.buckets.get(bucket).into_iter().flatten() {
				if let Some(args) = route.match_path(&path)? {
					tracing::debug!(
						template = route.template(),
						name = route.name(),
						%path,
						"route matched"
					);
					return Ok(RouteMatch {
						route: Arc::clone(route),
						args,
					});
				}
			}
		}

		// No match under this method. If the path matches under another
		// method the request is answerable in principle, which is a 405
		// rather than a 404.
		for (bucket, routes) in &self.buckets {
			if bucket == method || bucket == ALL {
				continue;
			}
			for route in routes {
				if route.match_path(&path)?.is_some() {
					return Err(Error::MethodNotAllowed(format!("{method} {path}")));
				}
			}
		}

		Err(Error::NotFound(format!("{method} {path}")))
	}

	/// Look up a named route.
	pub fn route(&self, name: &str) -> Option<&Arc<Route>> {
		self.names.get(name)
	}

	/// Build a URL for a named route, substituting the given arguments
	/// into its placeholders. Values are percent-encoded.
	///
	/// ```
	/// # use routier_routing::{Route, Router};
	/// # use routier_core::{view, Request, RouteArgs};
	/// # let mut router = Router::new();
	/// # router.add_route(Route::get(
	/// #     "/albums/{name}",
	/// #     view(|_req: Request, _args: RouteArgs| async move { Ok::<_, routier_core::Error>(()) }),
	/// #     "albums-show",
	/// # )).unwrap();
	/// let url = router.route_url("albums-show", &[("name", "sgt pepper")]).unwrap();
	/// assert_eq!(url, "/albums/sgt%20pepper");
	/// ```
	pub fn route_url(&self, name: &str, args: &[(&str, &str)]) -> Result<String> {
		let route = self
			.names
			.get(name)
			.ok_or_else(|| Error::NotFound(format!("route not found: {name}")))?;

		// Hide braces nested in custom regexes so a lazy placeholder match
		// cannot stop at an inner closing brace.
		let normalized = format!("/{}", route.template().trim_start_matches('/'));
		let mut url = crate::pattern::hide_inner_braces(&normalized, route.template())?;

		for (arg, value) in args {
			let encoded = utf8_percent_encode(value, NON_ALPHANUMERIC).to_string();

			let placeholder = Regex::new(&format!(r"\{{{}(:.*?)?\}}", regex::escape(arg)))
				.map_err(|e| Error::Pattern(format!("'{arg}' is not a valid argument name: {e}")))?;
			url = placeholder.replace_all(&url, encoded.as_str()).to_string();
			url = url.replace(&format!("...{arg}"), &encoded);
		}

		Ok(crate::pattern::restore_inner_braces(&url))
	}
}

impl Router {
	fn bucket(&mut self, key: &str) -> &mut Vec<Arc<Route>> {
		self.buckets.entry(key.to_string()).or_default()
	}
}

impl RouteAdder for Router {
	fn add_route(&mut self, route: Route) -> Result<()> {
		Router::add_route(self, route)
	}
}
