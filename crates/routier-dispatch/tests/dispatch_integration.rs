use async_trait::async_trait;
use hyper::{Method, StatusCode, Uri};
use std::sync::Arc;

use routier_core::{
	After, Before, Controller, Error, Handler, Middleware, ParamKind, Request, Response, Result,
	RouteArgs, View, ViewOutput, view,
};
use routier_di::{FromRegistry, Registry};
use routier_dispatch::App;
use routier_routing::{ControllerRef, Group, Route, RouteAdder, Router};

fn request(method: Method, path: &str) -> Request {
	Request::new(method, path.parse::<Uri>().unwrap())
}

fn text(body: &'static str) -> Arc<dyn View> {
	view(move |_req: Request, _args: RouteArgs| async move { Ok::<_, Error>(body) })
}

struct Tag(&'static str);

#[async_trait]
impl Middleware for Tag {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let response = next.handle(request).await?;
		Ok(response.append_body(format!("<{}", self.0)))
	}
}

struct Deny;

#[async_trait]
impl Middleware for Deny {
	async fn process(&self, _request: Request, _next: Arc<dyn Handler>) -> Result<Response> {
		Ok(Response::new(StatusCode::FORBIDDEN).with_body("denied"))
	}
}

struct RenderText;

#[async_trait]
impl After for RenderText {
	async fn handle(&self, output: ViewOutput) -> Result<ViewOutput> {
		match output {
			ViewOutput::Text(body) => Ok(ViewOutput::Response(
				Response::ok()
					.with_header(
						hyper::header::CONTENT_TYPE,
						hyper::header::HeaderValue::from_static("text/plain"),
					)
					.with_body(body),
			)),
			other => Ok(other),
		}
	}
}

struct Stamp(&'static str);

#[async_trait]
impl Before for Stamp {
	async fn handle(&self, request: Request) -> Result<Request> {
		Ok(request.with_attribute("stamp", self.0))
	}

	fn slot(&self) -> Option<&'static str> {
		Some("stamp")
	}
}

#[tokio::test]
async fn a_text_view_with_an_after_hook_renders_plain_text() {
	let mut router = Router::new();
	router
		.add_route(Route::get("/", text("home"), "index").after(Arc::new(RenderText)))
		.unwrap();

	let app = App::new(router);
	let response = app.dispatch(request(Method::GET, "/")).await.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.header("content-type"), Some("text/plain"));
	assert_eq!(response.body_text(), "home");
}

#[tokio::test]
async fn middleware_layers_run_global_then_route_then_view() {
	struct Declaring;

	#[async_trait]
	impl View for Declaring {
		async fn call(&self, _request: Request, _args: &RouteArgs) -> Result<ViewOutput> {
			Ok(ViewOutput::Response(Response::ok().with_body("view")))
		}

		fn middleware(&self) -> Vec<Arc<dyn Middleware>> {
			vec![Arc::new(Tag("view-mw"))]
		}
	}

	let mut router = Router::new();
	router
		.add_route(
			Route::get("/", Arc::new(Declaring) as Arc<dyn View>, "index")
				.middleware(Arc::new(Tag("route-mw"))),
		)
		.unwrap();

	let app = App::new(router).middleware(Arc::new(Tag("global-mw")));
	let response = app.dispatch(request(Method::GET, "/")).await.unwrap();

	// Appended on the way out: innermost layer first.
	assert_eq!(response.body_text(), "view<view-mw<route-mw<global-mw");
}

#[tokio::test]
async fn short_circuiting_middleware_skips_the_view() {
	let mut router = Router::new();
	router
		.add_route(Route::get("/", text("unreached"), "index").middleware(Arc::new(Deny)))
		.unwrap();

	let app = App::new(router);
	let response = app.dispatch(request(Method::GET, "/")).await.unwrap();

	assert_eq!(response.status, StatusCode::FORBIDDEN);
	assert_eq!(response.body_text(), "denied");
}

#[tokio::test]
async fn before_hooks_thread_the_request_into_the_view() {
	let echo_stamp = view(|req: Request, _args: RouteArgs| async move {
		let stamp = req
			.attribute("stamp")
			.and_then(|v| v.as_str())
			.unwrap_or("unset")
			.to_string();
		Ok::<_, Error>(Response::ok().with_body(stamp))
	});

	let mut router = Router::new();
	router
		.add_route(Route::get("/", echo_stamp, "index").before(Arc::new(Stamp("sealed"))))
		.unwrap();

	let app = App::new(router);
	let response = app.dispatch(request(Method::GET, "/")).await.unwrap();
	assert_eq!(response.body_text(), "sealed");
}

#[tokio::test]
async fn a_route_hook_replaces_the_group_hook_in_place() {
	let echo_stamp = view(|req: Request, _args: RouteArgs| async move {
		let stamp = req
			.attribute("stamp")
			.and_then(|v| v.as_str())
			.unwrap_or("unset")
			.to_string();
		Ok::<_, Error>(Response::ok().with_body(stamp))
	});

	let mut group = Group::new("/api", move |scope| {
		scope.add_route(
			Route::get("/albums", echo_stamp, "albums").before(Arc::new(Stamp("route"))),
		)
	})
	.before(Arc::new(Stamp("group")));

	let mut router = Router::new();
	router.add_group(&mut group).unwrap();

	let app = App::new(router);
	let response = app
		.dispatch(request(Method::GET, "/api/albums"))
		.await
		.unwrap();
	assert_eq!(response.body_text(), "route");
}

#[tokio::test]
async fn declared_int_params_reject_non_numeric_captures() {
	let mut router = Router::new();
	router
		.add_route(
			Route::get("/albums/{id}", text("album"), "album").param("id", ParamKind::Int),
		)
		.unwrap();

	let app = App::new(router);
	let err = app
		.dispatch(request(Method::GET, "/albums/leprosy"))
		.await
		.unwrap_err();

	assert!(matches!(err, Error::Dispatch(_)));
	assert!(err.to_string().contains("cannot cast 'id' to int"));
}

#[tokio::test]
async fn bare_output_without_a_renderer_is_an_error() {
	let mut router = Router::new();
	router
		.add_route(Route::get("/", text("bare"), "index"))
		.unwrap();

	let app = App::new(router);
	let err = app.dispatch(request(Method::GET, "/")).await.unwrap_err();

	assert!(
		err.to_string()
			.contains("unable to determine a response handler")
	);
}

#[tokio::test]
async fn the_route_renderer_turns_bare_output_into_a_response() {
	let mut router = Router::new();
	router
		.add_route(
			Route::get(
				"/albums",
				view(|_req: Request, _args: RouteArgs| async move {
					Ok::<_, Error>(serde_json::json!(["leprosy", "symbolic"]))
				}),
				"albums",
			)
			.render("json", vec![]),
		)
		.unwrap();

	let app = App::new(router);
	let response = app.dispatch(request(Method::GET, "/albums")).await.unwrap();

	assert_eq!(response.header("content-type"), Some("application/json"));
	assert_eq!(response.body_text(), r#"["leprosy","symbolic"]"#);
}

struct AlbumStore {
	albums: Vec<&'static str>,
}

struct Albums {
	store: Arc<AlbumStore>,
}

#[async_trait]
impl Controller for Albums {
	async fn call(&self, method: &str, _request: Request, args: &RouteArgs) -> Result<ViewOutput> {
		match method {
			"list" => Ok(ViewOutput::Json(serde_json::json!(self.store.albums))),
			"get" => {
				let index = args.get_int("id")? as usize;
				match self.store.albums.get(index) {
					Some(album) => Ok(ViewOutput::Text(album.to_string())),
					None => Err(Error::NotFound(format!("album {index}"))),
				}
			}
			other => Err(Error::View(format!("unknown view method '{other}'"))),
		}
	}

	fn methods() -> &'static [&'static str] {
		&["list", "get"]
	}
}

impl FromRegistry for Albums {
	fn from_registry(registry: &Registry) -> Result<Self> {
		Ok(Self {
			store: registry.get::<AlbumStore>()?,
		})
	}
}

#[tokio::test]
async fn controllers_are_constructed_from_the_registry() {
	let mut group = Group::new("/albums", |scope| {
		scope.add_route(Route::get("", "list", "albums-list").render("json", vec![]))?;
		scope.add_route(Route::get("/{id}", "get", "albums-get").render("json", vec![]))
	})
	.controller(ControllerRef::of::<Albums>());

	let mut router = Router::new();
	router.add_group(&mut group).unwrap();

	let app = App::new(router).register(AlbumStore {
		albums: vec!["leprosy", "symbolic"],
	});

	let response = app.dispatch(request(Method::GET, "/albums")).await.unwrap();
	assert_eq!(response.body_text(), r#"["leprosy","symbolic"]"#);

	let response = app
		.dispatch(request(Method::GET, "/albums/1"))
		.await
		.unwrap();
	assert_eq!(response.body_text(), "\"symbolic\"");
}

#[tokio::test]
async fn missing_controller_dependencies_surface_unwrapped() {
	let mut group = Group::new("/albums", |scope| {
		scope.add_route(Route::get("", "list", "albums-list").render("json", vec![]))
	})
	.controller(ControllerRef::of::<Albums>());

	let mut router = Router::new();
	router.add_group(&mut group).unwrap();

	// No AlbumStore registered.
	let app = App::new(router);
	let err = app
		.dispatch(request(Method::GET, "/albums"))
		.await
		.unwrap_err();

	assert!(matches!(err, Error::DependencyNotFound(_)));
}

#[tokio::test]
async fn routing_errors_pass_through_dispatch() {
	let mut router = Router::new();
	router
		.add_route(Route::get("/albums", text("albums"), "albums"))
		.unwrap();

	let app = App::new(router);

	let err = app
		.dispatch(request(Method::POST, "/albums"))
		.await
		.unwrap_err();
	assert!(matches!(err, Error::MethodNotAllowed(_)));

	let err = app
		.dispatch(request(Method::GET, "/missing"))
		.await
		.unwrap_err();
	assert!(matches!(err, Error::NotFound(_)));
}
