use hyper::header::{CONTENT_TYPE, HeaderValue};
use std::collections::HashMap;
use std::sync::Arc;

use routier_core::{Error, Response, Result, ViewOutput};

/// Turns a view's bare output into a response.
pub trait Renderer: Send + Sync {
	fn render(&self, output: &ViewOutput, args: &[serde_json::Value]) -> Result<Response>;
}

/// Serializes the output as JSON with an `application/json` content type.
///
/// Text becomes a JSON string, empty output becomes `null`.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
	fn render(&self, output: &ViewOutput, _args: &[serde_json::Value]) -> Result<Response> {
		let value = match output {
			ViewOutput::Json(value) => value.clone(),
			ViewOutput::Text(text) => serde_json::Value::String(text.clone()),
			ViewOutput::Empty => serde_json::Value::Null,
			ViewOutput::Response(_) => {
				return Err(Error::Dispatch(
					"json renderer received an already rendered response".into(),
				));
			}
		};

		Response::ok().with_json(&value)
	}
}

/// Emits text output verbatim with a `text/html` content type.
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
	fn render(&self, output: &ViewOutput, _args: &[serde_json::Value]) -> Result<Response> {
		let body = match output {
			ViewOutput::Text(text) => text.clone(),
			ViewOutput::Empty => String::new(),
			other => {
				return Err(Error::Dispatch(format!(
					"html renderer expects text output, got {other:?}"
				)));
			}
		};

		Ok(Response::ok()
			.with_header(CONTENT_TYPE, HeaderValue::from_static("text/html"))
			.with_body(body))
	}
}

/// Named renderers available to routes.
///
/// `json` and `html` are registered out of the box; applications add
/// their own with [`RendererRegistry::register`].
pub struct RendererRegistry {
	renderers: HashMap<String, Arc<dyn Renderer>>,
}

impl Default for RendererRegistry {
	fn default() -> Self {
		let mut registry = Self {
			renderers: HashMap::new(),
		};
		registry.register("json", Arc::new(JsonRenderer));
		registry.register("html", Arc::new(HtmlRenderer));
		registry
	}
}

impl RendererRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, name: &str, renderer: Arc<dyn Renderer>) {
		self.renderers.insert(name.to_string(), renderer);
	}

	pub fn get(&self, name: &str) -> Result<&Arc<dyn Renderer>> {
		self.renderers
			.get(name)
			.ok_or_else(|| Error::Dispatch(format!("unknown renderer: {name}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn json_renderer_wraps_text_as_a_json_string() {
		let response = JsonRenderer
			.render(&ViewOutput::Text("hello".into()), &[])
			.unwrap();
		assert_eq!(response.body_text(), "\"hello\"");
		assert_eq!(response.header("content-type"), Some("application/json"));
	}

	#[test]
	fn json_renderer_passes_structured_data_through() {
		let response = JsonRenderer
			.render(&ViewOutput::Json(serde_json::json!({"n": 1})), &[])
			.unwrap();
		assert_eq!(response.body_text(), r#"{"n":1}"#);
	}

	#[test]
	fn html_renderer_rejects_structured_data() {
		let err = HtmlRenderer
			.render(&ViewOutput::Json(serde_json::json!([])), &[])
			.unwrap_err();
		assert!(matches!(err, Error::Dispatch(_)));
	}

	#[test]
	fn unknown_renderer_is_a_dispatch_error() {
		let registry = RendererRegistry::new();
		assert!(registry.get("json").is_ok());
		assert!(matches!(registry.get("yaml"), Err(Error::Dispatch(_))));
	}
}
