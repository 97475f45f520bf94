use thiserror::Error as ThisError;

/// Errors raised by routing, registration and dispatch.
///
/// The variants fall into three families:
///
/// - routing errors ([`Error::NotFound`], [`Error::MethodNotAllowed`]) are
///   expected control flow and are meant to be caught by the host
///   application to render 404/405 pages,
/// - configuration errors ([`Error::Pattern`], [`Error::DuplicateRoute`],
///   [`Error::View`]) surface at registration time and indicate a broken
///   route table,
/// - dispatch errors ([`Error::Dispatch`]) are fatal request-time failures
///   carrying diagnostic context.
///
/// [`Error::DependencyNotFound`] is deliberately its own variant and is
/// never wrapped into [`Error::Dispatch`], so callers can distinguish "a
/// dependency is missing" from "a route or view is missing".
#[derive(Debug, ThisError)]
pub enum Error {
	/// No route pattern matches the request path under any method.
	#[error("not found: {0}")]
	NotFound(String),

	/// A route pattern matches the path, but not under the request method.
	#[error("method not allowed: {0}")]
	MethodNotAllowed(String),

	/// A route template could not be compiled.
	#[error("invalid route pattern: {0}")]
	Pattern(String),

	/// A non-empty route name was registered twice. The first registration
	/// is unaffected.
	#[error(
		"duplicate route: {0}. If you want to use the same url pattern \
		 with different methods, you have to create routes with names."
	)]
	DuplicateRoute(String),

	/// Illegal view configuration, e.g. binding a controller to a view
	/// that is already a closure or a resolved controller method.
	#[error("invalid view: {0}")]
	View(String),

	/// A type was requested from the dependency registry but never added.
	#[error("dependency not found: {0}")]
	DependencyNotFound(String),

	/// A request-time failure in the dispatch pipeline.
	#[error("dispatch failed: {0}")]
	Dispatch(String),
}

pub type Result<T> = std::result::Result<T, Error>;
