//! Before- and after-hooks and the merge algorithm that composes them.
//!
//! Hooks differ from middleware: a [`Before`] transforms the request on its
//! way to the view, an [`After`] transforms the view's output on its way
//! out. They run in a flat sequence and cannot short-circuit.
//!
//! When a group and a route both declare hooks, the group's hooks form the
//! base list and the route's hooks are merged in. A route hook that
//! [`replaces`](Before::replaces) a group hook overwrites it in place,
//! keeping the group's position in the pipeline; otherwise it is appended.
//! This lets a route swap out a single group-provided hook without
//! re-declaring or re-ordering the rest.

use async_trait::async_trait;
use std::sync::Arc;

use crate::exception::Result;
use crate::request::Request;
use crate::view::ViewOutput;

/// Request-transforming hook, run before the view.
#[async_trait]
pub trait Before: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Request>;

	/// The slot this hook occupies. Two hooks with the same non-empty slot
	/// are considered interchangeable by the default
	/// [`replaces`](Before::replaces) implementation.
	fn slot(&self) -> Option<&'static str> {
		None
	}

	/// Whether this hook should overwrite `other` during a merge.
	fn replaces(&self, other: &dyn Before) -> bool {
		match (self.slot(), other.slot()) {
			(Some(mine), Some(theirs)) => mine == theirs,
			_ => false,
		}
	}
}

/// Output-transforming hook, run after the view.
///
/// By convention the first `After` in the pipeline is the one that turns a
/// bare [`ViewOutput`] into a response; later ones post-process it.
#[async_trait]
pub trait After: Send + Sync {
	async fn handle(&self, output: ViewOutput) -> Result<ViewOutput>;

	/// See [`Before::slot`].
	fn slot(&self) -> Option<&'static str> {
		None
	}

	/// Whether this hook should overwrite `other` during a merge.
	fn replaces(&self, other: &dyn After) -> bool {
		match (self.slot(), other.slot()) {
			(Some(mine), Some(theirs)) => mine == theirs,
			_ => false,
		}
	}
}

/// Merge `incoming` handlers into `base`.
///
/// For each incoming handler, the first base entry for which
/// `replaces(incoming, existing)` holds is overwritten in place, preserving
/// its position. Incoming handlers that replace nothing are appended in
/// their own order.
pub fn merge_handlers<T: ?Sized>(
	base: &mut Vec<Arc<T>>,
	incoming: impl IntoIterator<Item = Arc<T>>,
	replaces: impl Fn(&T, &T) -> bool,
) {
	for handler in incoming {
		match base.iter().position(|existing| replaces(&handler, existing)) {
			Some(index) => base[index] = handler,
			None => base.push(handler),
		}
	}
}

/// Merge route-level before-hooks into group-level ones.
pub fn merge_before(base: &mut Vec<Arc<dyn Before>>, incoming: impl IntoIterator<Item = Arc<dyn Before>>) {
	merge_handlers(base, incoming, |incoming, existing| incoming.replaces(existing));
}

/// Merge route-level after-hooks into group-level ones.
pub fn merge_after(base: &mut Vec<Arc<dyn After>>, incoming: impl IntoIterator<Item = Arc<dyn After>>) {
	merge_handlers(base, incoming, |incoming, existing| incoming.replaces(existing));
}
