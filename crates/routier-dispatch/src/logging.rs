use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use routier_core::{Handler, Middleware, Request, Response, Result};

/// Logs one line per request with method, path, status and duration.
///
/// Usually installed as the outermost application middleware so the
/// measured duration covers the whole pipeline.
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let method = request.method.clone();
		let path = request.path().to_string();
		let start = Instant::now();

		let result = next.handle(request).await;
		let elapsed = start.elapsed();

		match &result {
			Ok(response) => {
				tracing::info!(
					%method,
					%path,
					status = response.status.as_u16(),
					elapsed_ms = elapsed.as_millis() as u64,
					"request handled"
				);
			}
			Err(error) => {
				tracing::warn!(
					%method,
					%path,
					%error,
					elapsed_ms = elapsed.as_millis() as u64,
					"request failed"
				);
			}
		}

		result
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use hyper::{Method, Uri};

	struct Terminal;

	#[async_trait]
	impl Handler for Terminal {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Ok(Response::ok())
		}
	}

	#[tokio::test]
	async fn logging_is_transparent_to_the_response() {
		let request = Request::new(Method::GET, Uri::from_static("/albums"));
		let response = LoggingMiddleware
			.process(request, Arc::new(Terminal))
			.await
			.unwrap();
		assert_eq!(response.status, hyper::StatusCode::OK);
	}
}
