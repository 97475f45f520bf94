use bytes::{Bytes, BytesMut};
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use hyper::{HeaderMap, StatusCode};
use serde::Serialize;

use crate::exception::{Error, Result};

/// HTTP response representation.
///
/// # Examples
///
/// ```
/// use routier_core::Response;
/// use hyper::StatusCode;
///
/// let response = Response::ok().with_body("hello");
/// assert_eq!(response.status, StatusCode::OK);
/// assert_eq!(response.body_text(), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new response with the given status code.
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// HTTP 200 OK.
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// HTTP 201 Created.
	pub fn created() -> Self {
		Self::new(StatusCode::CREATED)
	}

	/// HTTP 204 No Content.
	pub fn no_content() -> Self {
		Self::new(StatusCode::NO_CONTENT)
	}

	/// HTTP 404 Not Found.
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// HTTP 405 Method Not Allowed.
	pub fn method_not_allowed() -> Self {
		Self::new(StatusCode::METHOD_NOT_ALLOWED)
	}

	/// HTTP 500 Internal Server Error.
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Replace the body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Append to the existing body. Used by after-hooks that post-process
	/// an already-built response.
	pub fn append_body(mut self, chunk: impl AsRef<[u8]>) -> Self {
		let mut buf = BytesMut::with_capacity(self.body.len() + chunk.as_ref().len());
		buf.extend_from_slice(&self.body);
		buf.extend_from_slice(chunk.as_ref());
		self.body = buf.freeze();
		self
	}

	/// Serialize `data` as the JSON body and set the content type.
	pub fn with_json<T: Serialize>(mut self, data: &T) -> Result<Self> {
		let body = serde_json::to_vec(data)
			.map_err(|e| Error::Dispatch(format!("cannot serialize response body: {e}")))?;
		self.headers
			.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		self.body = Bytes::from(body);
		Ok(self)
	}

	/// Insert a header.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// Look up a header value as a string, if present and valid UTF-8.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	/// The body interpreted as UTF-8 text.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).to_string()
	}
}
