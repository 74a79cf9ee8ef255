//! Routing module
//!
//! Provides route registration and lookup:
//! - Route groups mounted under a URL prefix
//! - Exact path matching with method dispatch
//! - 404 / 405 discrimination for unmatched requests

mod route;
mod router;

pub use route::{Handler, Route, RouteGroup};
pub use router::{allow_header, RouteMatch, Router};
