use async_trait::async_trait;
use std::sync::Arc;

use crate::exception::Result;
use crate::request::Request;
use crate::response::Response;

/// Asynchronous request handler.
///
/// Every stage of the dispatch pipeline — the matched view at the center
/// and each middleware wrapper around it — is a `Handler`.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use routier_core::{Handler, Request, Response, Result};
///
/// struct Pong;
///
/// #[async_trait]
/// impl Handler for Pong {
///     async fn handle(&self, _request: Request) -> Result<Response> {
///         Ok(Response::ok().with_body("pong"))
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

/// Middleware wraps a handler and decides whether and how to call it.
///
/// A middleware receives the request and a `next` handler representing the
/// remainder of the pipeline. It may transform the request before calling
/// `next`, transform the response afterwards, or short-circuit by not
/// calling `next` at all.
#[async_trait]
pub trait Middleware: Send + Sync {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use hyper::{Method, Uri};

	struct Echo;

	#[async_trait]
	impl Handler for Echo {
		async fn handle(&self, request: Request) -> Result<Response> {
			Ok(Response::ok().with_body(request.path().to_string()))
		}
	}

	struct Tagger;

	#[async_trait]
	impl Middleware for Tagger {
		async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
			let response = next.handle(request).await?;
			Ok(response.append_body("-tagged"))
		}
	}

	#[tokio::test]
	async fn arc_handlers_delegate() {
		let handler: Arc<dyn Handler> = Arc::new(Echo);
		let request = Request::new(Method::GET, Uri::from_static("/ping"));
		let response = handler.handle(request).await.unwrap();
		assert_eq!(response.body_text(), "/ping");
	}

	#[tokio::test]
	async fn middleware_wraps_the_inner_handler() {
		let inner: Arc<dyn Handler> = Arc::new(Echo);
		let request = Request::new(Method::GET, Uri::from_static("/ping"));
		let response = Tagger.process(request, inner).await.unwrap();
		assert_eq!(response.body_text(), "/ping-tagged");
	}
}
