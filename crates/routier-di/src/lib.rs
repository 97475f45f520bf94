//! Type-keyed dependency registry.
//!
//! Controllers are constructed lazily at dispatch time, pulling their
//! collaborators out of a [`Registry`] the application populated at
//! startup. A missing dependency surfaces as
//! [`Error::DependencyNotFound`](routier_core::Error::DependencyNotFound)
//! and is never wrapped, so the host can tell a wiring mistake apart from
//! a routing failure.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use routier_core::{Error, Result};

/// Shared, type-keyed storage for application services.
///
/// # Examples
///
/// ```
/// use routier_di::Registry;
///
/// struct Config {
///     base_url: String,
/// }
///
/// let mut registry = Registry::new();
/// registry.add(Config { base_url: "https://example.com".into() });
///
/// let config = registry.get::<Config>().unwrap();
/// assert_eq!(config.base_url, "https://example.com");
/// ```
#[derive(Default)]
pub struct Registry {
	entries: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store a value under its own type.
	pub fn add<T: Send + Sync + 'static>(&mut self, value: T) {
		self.add_arc(Arc::new(value));
	}

	/// Store an already-shared value under its type. Later registrations
	/// for the same type overwrite earlier ones.
	pub fn add_arc<T: Send + Sync + 'static>(&mut self, value: Arc<T>) {
		self.entries.insert(TypeId::of::<T>(), value);
	}

	/// Look up a value by type.
	pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
		self.entries
			.get(&TypeId::of::<T>())
			.and_then(|entry| Arc::clone(entry).downcast::<T>().ok())
			.ok_or_else(|| Error::DependencyNotFound(type_name::<T>().to_string()))
	}

	pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
		self.entries.contains_key(&TypeId::of::<T>())
	}
}

/// Construct a value from the registry.
///
/// Controllers implement this to declare their dependencies; dispatch
/// calls it the first time a route bound to the controller matches.
pub trait FromRegistry: Sized {
	fn from_registry(registry: &Registry) -> Result<Self>;
}
