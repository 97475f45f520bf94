use async_trait::async_trait;
use std::sync::Arc;

use routier_core::{Handler, Middleware, Request, Response, Result};

/// An immutable middleware queue wrapped around a terminal handler.
///
/// Each middleware receives the request and a handler representing the
/// remainder of the queue. Calling that handler advances a cursor; not
/// calling it short-circuits the rest of the chain, terminal handler
/// included.
pub struct MiddlewareChain {
	queue: Arc<[Arc<dyn Middleware>]>,
	terminal: Arc<dyn Handler>,
}

impl MiddlewareChain {
	pub fn new(queue: Vec<Arc<dyn Middleware>>, terminal: Arc<dyn Handler>) -> Self {
		Self {
			queue: queue.into(),
			terminal,
		}
	}

	/// Run the request through the chain.
	pub async fn run(&self, request: Request) -> Result<Response> {
		let next = ChainNext {
			queue: Arc::clone(&self.queue),
			terminal: Arc::clone(&self.terminal),
			index: 0,
		};
		next.handle(request).await
	}
}

// The remainder of a chain, starting at `index`. Cloned cheaply for each
// step since the queue itself is shared.
struct ChainNext {
	queue: Arc<[Arc<dyn Middleware>]>,
	terminal: Arc<dyn Handler>,
	index: usize,
}

#[async_trait]
impl Handler for ChainNext {
	async fn handle(&self, request: Request) -> Result<Response> {
		match self.queue.get(self.index) {
			Some(middleware) => {
				let next = Arc::new(ChainNext {
					queue: Arc::clone(&self.queue),
					terminal: Arc::clone(&self.terminal),
					index: self.index + 1,
				});
				middleware.process(request, next).await
			}
			None => self.terminal.handle(request).await,
		}
	}
}
