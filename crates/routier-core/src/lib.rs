//! Core types shared by the routier crates.
//!
//! This crate defines the vocabulary the rest of the framework speaks:
//!
//! - [`Request`] and [`Response`] — plain HTTP value types built on
//!   `hyper`'s `Method`/`Uri`/`StatusCode`/`HeaderMap` and `bytes` bodies.
//! - [`Handler`] and [`Middleware`] — the async traits every stage of the
//!   dispatch pipeline implements.
//! - [`Before`] and [`After`] — request- and result-transforming hooks that
//!   run around view invocation, together with the merge-with-replace
//!   algorithm used when groups and routes contribute hooks to the same
//!   pipeline.
//! - [`View`] and [`Controller`] — the user-supplied callables a matched
//!   route ultimately invokes, and [`ViewOutput`], the value they produce.
//! - [`Error`] / [`Result`] — the single error type, with routing errors
//!   (`NotFound`, `MethodNotAllowed`) kept distinct from configuration and
//!   dispatch errors so hosts can render 404/405 pages.

mod args;
mod exception;
mod handler;
mod hooks;
mod request;
mod response;
mod view;

pub use args::{ParamKind, RouteArgs};
pub use exception::{Error, Result};
pub use handler::{Handler, Middleware};
pub use hooks::{After, Before, merge_after, merge_before, merge_handlers};
pub use request::Request;
pub use response::Response;
pub use view::{Controller, FunctionView, RendererConfig, View, ViewOutput, view};
