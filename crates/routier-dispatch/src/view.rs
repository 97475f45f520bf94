use async_trait::async_trait;
use std::sync::Arc;

use routier_core::{
	Controller, Error, Handler, Middleware, ParamKind, Request, Response, Result, RouteArgs, View,
	ViewOutput,
};
use routier_routing::RouteMatch;

use crate::render::RendererRegistry;

/// A view with its controller indirection resolved away.
pub(crate) enum ResolvedView {
	Function(Arc<dyn View>),
	Controller {
		instance: Arc<dyn Controller>,
		method: String,
	},
}

impl ResolvedView {
	pub(crate) fn middleware(&self) -> Vec<Arc<dyn Middleware>> {
		match self {
			ResolvedView::Function(view) => view.middleware(),
			ResolvedView::Controller { instance, method } => instance.middleware(method),
		}
	}

	async fn invoke(&self, request: Request, args: &RouteArgs) -> Result<ViewOutput> {
		match self {
			ResolvedView::Function(view) => view.call(request, args).await,
			ResolvedView::Controller { instance, method } => {
				instance.call(method, request, args).await
			}
		}
	}
}

/// The terminal handler of the middleware chain.
///
/// Runs the matched route's before-hooks over the request, validates
/// declared parameter types, invokes the view, runs the after-hooks over
/// its output, and renders whatever comes out the other end.
pub struct ViewHandler {
	matched: RouteMatch,
	resolved: ResolvedView,
	renderers: Arc<RendererRegistry>,
}

impl ViewHandler {
	pub(crate) fn new(
		matched: RouteMatch,
		resolved: ResolvedView,
		renderers: Arc<RendererRegistry>,
	) -> Self {
		Self {
			matched,
			resolved,
			renderers,
		}
	}

	fn validate_params(&self) -> Result<()> {
		for (name, kind) in self.matched.route.params() {
			match kind {
				ParamKind::Int => {
					self.matched.args.get_int(name)?;
				}
				ParamKind::Float => {
					self.matched.args.get_float(name)?;
				}
				ParamKind::Str => {
					self.matched.args.get(name).ok_or_else(|| {
						Error::Dispatch(format!(
							"view parameters cannot be resolved: missing argument '{name}'"
						))
					})?;
				}
			}
		}
		Ok(())
	}
}

#[async_trait]
impl Handler for ViewHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		let route = &self.matched.route;

		let mut request = request;
		for hook in route.before_handlers() {
			request = hook.handle(request).await?;
		}

		self.validate_params()?;

		let mut output = self.resolved.invoke(request, &self.matched.args).await?;
		for hook in route.after_handlers() {
			output = hook.handle(output).await?;
		}

		match output {
			ViewOutput::Response(response) => Ok(response),
			output => match route.renderer() {
				Some(config) => self.renderers.get(&config.name)?.render(&output, &config.args),
				None => Err(Error::Dispatch(
					"unable to determine a response handler for the returned value of the view"
						.into(),
				)),
			},
		}
	}
}
