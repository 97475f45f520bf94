use bytes::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, Uri};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::collections::HashMap;

/// HTTP request representation.
///
/// Carries the method, URI, headers and body plus an attribute bag that
/// [`Before`](crate::Before) hooks use to hand data down the pipeline.
/// Transformation methods consume and return the request, so hooks can
/// derive a new request without touching shared state.
///
/// # Examples
///
/// ```
/// use routier_core::Request;
/// use hyper::{Method, Uri};
///
/// let request = Request::new(Method::GET, Uri::from_static("/albums/leprosy"))
///     .with_attribute("first", "first-value");
///
/// assert_eq!(request.path(), "/albums/leprosy");
/// assert_eq!(*request.attribute("first").unwrap(), "first-value");
/// ```
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub headers: HeaderMap,
	pub body: Bytes,
	attributes: HashMap<String, Value>,
}

impl Request {
	/// Create a request with empty headers, body and attributes.
	pub fn new(method: Method, uri: Uri) -> Self {
		Self {
			method,
			uri,
			headers: HeaderMap::new(),
			body: Bytes::new(),
			attributes: HashMap::new(),
		}
	}

	/// Replace the body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Insert a header.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// Attach an attribute. Attributes are the channel through which
	/// before-hooks pass derived data to the view.
	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.attributes.insert(key.into(), value.into());
		self
	}

	/// Look up an attribute set by an earlier hook.
	pub fn attribute(&self, key: &str) -> Option<&Value> {
		self.attributes.get(key)
	}

	pub fn attributes(&self) -> &HashMap<String, Value> {
		&self.attributes
	}

	/// The raw (still percent-encoded) request path.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// The percent-decoded request path. Route matching always runs
	/// against the decoded form.
	pub fn decoded_path(&self) -> String {
		percent_decode_str(self.uri.path())
			.decode_utf8_lossy()
			.to_string()
	}
}
