use std::collections::HashMap;

use crate::exception::{Error, Result};

/// The type a view declares for one of its path parameters.
///
/// Captured path segments are always strings; a view that declares a
/// parameter as [`ParamKind::Int`] or [`ParamKind::Float`] asks dispatch to
/// coerce the captured text before invocation, failing the request when the
/// text does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
	Int,
	Float,
	Str,
}

/// Named path arguments captured by a matched route pattern.
///
/// # Examples
///
/// ```
/// use routier_core::RouteArgs;
///
/// let mut args = RouteArgs::new();
/// args.insert("id", "13");
/// assert_eq!(args.get("id"), Some("13"));
/// assert_eq!(args.get_int("id").unwrap(), 13);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteArgs {
	values: HashMap<String, String>,
}

impl RouteArgs {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.values.insert(name.into(), value.into());
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	/// The captured value coerced to an integer.
	pub fn get_int(&self, name: &str) -> Result<i64> {
		let value = self.require(name)?;
		value.parse().map_err(|_| {
			Error::Dispatch(format!(
				"view parameters cannot be resolved: cannot cast '{name}' to int"
			))
		})
	}

	/// The captured value coerced to a float.
	pub fn get_float(&self, name: &str) -> Result<f64> {
		let value = self.require(name)?;
		value.parse().map_err(|_| {
			Error::Dispatch(format!(
				"view parameters cannot be resolved: cannot cast '{name}' to float"
			))
		})
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	fn require(&self, name: &str) -> Result<&str> {
		self.get(name).ok_or_else(|| {
			Error::Dispatch(format!(
				"view parameters cannot be resolved: missing argument '{name}'"
			))
		})
	}
}

impl FromIterator<(String, String)> for RouteArgs {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		Self {
			values: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn int_coercion_fails_with_the_parameter_name() {
		let mut args = RouteArgs::new();
		args.insert("id", "symbolic");

		let err = args.get_int("id").unwrap_err();
		assert!(err.to_string().contains("cannot cast 'id' to int"));
	}

	#[test]
	fn float_coercion_accepts_integral_text() {
		let mut args = RouteArgs::new();
		args.insert("ratio", "7");
		assert_eq!(args.get_float("ratio").unwrap(), 7.0);
	}

	#[test]
	fn missing_argument_is_a_dispatch_error() {
		let args = RouteArgs::new();
		assert!(args.get_int("absent").is_err());
	}
}
