//! Route groups.
//!
//! A group collects routes under a shared pattern prefix, an optional name
//! prefix and controller, and shared middleware and hooks. Groups nest:
//! a subgroup's routes pass through the parent on their way to the
//! registry, so prefixes accumulate innermost-first and every enclosing
//! group's middleware and hooks are applied.
//!
//! Group middleware runs ahead of route middleware. Group hooks form the
//! base list and route hooks are merged in with replace semantics, see
//! [`merge_before`](routier_core::merge_before).

use std::sync::Arc;

use routier_core::{After, Before, Middleware, Result, merge_after, merge_before};

use crate::route::{ControllerRef, IntoViewRef, Route};

/// Anything routes can be registered with: the
/// [`Router`](crate::Router) itself, or a [`GroupScope`] during group
/// creation.
pub trait RouteAdder {
	fn add_route(&mut self, route: Route) -> Result<()>;
}

/// Convenience constructors for every HTTP method, available on any
/// [`RouteAdder`].
pub trait AddsRoutes: RouteAdder {
	fn route(&mut self, template: &str, view: impl IntoViewRef, name: &str) -> Result<()>
	where
		Self: Sized,
	{
		self.add_route(Route::any(template, view, name))
	}

	fn get(&mut self, template: &str, view: impl IntoViewRef, name: &str) -> Result<()>
	where
		Self: Sized,
	{
		self.add_route(Route::get(template, view, name))
	}

	fn post(&mut self, template: &str, view: impl IntoViewRef, name: &str) -> Result<()>
	where
		Self: Sized,
	{
		self.add_route(Route::post(template, view, name))
	}

	fn put(&mut self, template: &str, view: impl IntoViewRef, name: &str) -> Result<()>
	where
		Self: Sized,
	{
		self.add_route(Route::put(template, view, name))
	}

	fn patch(&mut self, template: &str, view: impl IntoViewRef, name: &str) -> Result<()>
	where
		Self: Sized,
	{
		self.add_route(Route::patch(template, view, name))
	}

	fn delete(&mut self, template: &str, view: impl IntoViewRef, name: &str) -> Result<()>
	where
		Self: Sized,
	{
		self.add_route(Route::delete(template, view, name))
	}

	fn head(&mut self, template: &str, view: impl IntoViewRef, name: &str) -> Result<()>
	where
		Self: Sized,
	{
		self.add_route(Route::head(template, view, name))
	}

	fn options(&mut self, template: &str, view: impl IntoViewRef, name: &str) -> Result<()>
	where
		Self: Sized,
	{
		self.add_route(Route::options(template, view, name))
	}
}

impl<T: RouteAdder> AddsRoutes for T {}

type GroupBuilder = Box<dyn FnOnce(&mut GroupScope) -> Result<()> + Send>;

/// A deferred collection of routes under shared prefixes and wrappers.
///
/// The builder closure runs when the group is registered, not when it is
/// declared; registering the same group twice is a no-op.
///
/// # Examples
///
/// ```
/// use routier_routing::{AddsRoutes, Group, Router};
/// use routier_core::{view, Request, RouteArgs};
///
/// let mut group = Group::new("/media", |scope| {
///     scope.get(
///         "/albums",
///         view(|_req: Request, _args: RouteArgs| async move {
///             Ok::<_, routier_core::Error>("albums")
///         }),
///         "albums",
///     )
/// })
/// .name_prefix("media-");
///
/// let mut router = Router::new();
/// router.add_group(&mut group).unwrap();
/// assert!(router.route("media-albums").is_some());
/// ```
pub struct Group {
	pattern_prefix: String,
	name_prefix: String,
	controller: Option<ControllerRef>,
	middleware: Vec<Arc<dyn Middleware>>,
	before: Vec<Arc<dyn Before>>,
	after: Vec<Arc<dyn After>>,
	subgroups: Vec<Group>,
	builder: Option<GroupBuilder>,
	created: bool,
}

impl Group {
	pub fn new<F>(pattern_prefix: &str, builder: F) -> Self
	where
		F: FnOnce(&mut GroupScope) -> Result<()> + Send + 'static,
	{
		Self {
			pattern_prefix: pattern_prefix.to_string(),
			name_prefix: String::new(),
			controller: None,
			middleware: Vec::new(),
			before: Vec::new(),
			after: Vec::new(),
			subgroups: Vec::new(),
			builder: Some(Box::new(builder)),
			created: false,
		}
	}

	/// Prefix prepended to the names of named routes in this group.
	pub fn name_prefix(mut self, prefix: &str) -> Self {
		self.name_prefix = prefix.to_string();
		self
	}

	/// Bind every method-name route in this group to a controller.
	pub fn controller(mut self, controller: ControllerRef) -> Self {
		self.controller = Some(controller);
		self
	}

	/// Middleware shared by every route in this group. Runs ahead of
	/// route middleware.
	pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middleware.push(middleware);
		self
	}

	/// A before-hook shared by every route in this group.
	pub fn before(mut self, handler: Arc<dyn Before>) -> Self {
		merge_before(&mut self.before, [handler]);
		self
	}

	/// An after-hook shared by every route in this group.
	pub fn after(mut self, handler: Arc<dyn After>) -> Self {
		merge_after(&mut self.after, [handler]);
		self
	}

	/// Run the builder and register the resulting routes with `adder`.
	///
	/// Deferred subgroups are created after the group's own routes, each
	/// with this group as its adder so prefixes and wrappers compose.
	pub fn create(&mut self, adder: &mut dyn RouteAdder) -> Result<()> {
		if self.created {
			return Ok(());
		}
		self.created = true;

		if let Some(builder) = self.builder.take() {
			let mut scope = GroupScope {
				group: &mut *self,
				adder: &mut *adder,
			};
			builder(&mut scope)?;
		}

		let mut subgroups = std::mem::take(&mut self.subgroups);
		for subgroup in &mut subgroups {
			let mut scope = GroupScope {
				group: &mut *self,
				adder: &mut *adder,
			};
			subgroup.create(&mut scope)?;
		}
		self.subgroups = subgroups;

		Ok(())
	}
}

/// The view of a [`Group`] handed to its builder closure.
///
/// Routes added through the scope get the group's prefixes, controller,
/// middleware and hooks applied, then flow onward to whatever the group
/// itself was registered with.
pub struct GroupScope<'a> {
	group: &'a mut Group,
	adder: &'a mut dyn RouteAdder,
}

impl GroupScope<'_> {
	/// Declare a nested subgroup. It is created after the enclosing
	/// group's own routes have been registered.
	pub fn group(&mut self, group: Group) {
		self.group.subgroups.push(group);
	}

	/// Register an externally built group as a subgroup, immediately.
	pub fn add_group(&mut self, group: &mut Group) -> Result<()> {
		group.create(self)
	}
}

impl RouteAdder for GroupScope<'_> {
	fn add_route(&mut self, route: Route) -> Result<()> {
		let mut route = route.prefix(&self.group.pattern_prefix, &self.group.name_prefix);

		if let Some(controller) = &self.group.controller {
			route = route.controller(controller)?;
		}

		let (middleware, before, after) = route.take_for_merge();

		let mut merged = self.group.middleware.clone();
		merged.extend(middleware);
		route.set_middleware(merged);

		let mut merged = self.group.before.clone();
		merge_before(&mut merged, before);
		route.set_before_handlers(merged);

		let mut merged = self.group.after.clone();
		merge_after(&mut merged, after);
		route.set_after_handlers(merged);

		self.adder.add_route(route)
	}
}
