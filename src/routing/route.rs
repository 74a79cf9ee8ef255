//! Route and route group definitions
//!
//! A `RouteGroup` is the unit an API area is written as: a name plus a list
//! of (method, path, handler) bindings relative to the prefix the group is
//! later mounted under.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::fmt;
use std::sync::Arc;

/// A request handler: buffered request in, complete response out
pub type Handler = Arc<dyn Fn(&Request<Bytes>) -> Response<Full<Bytes>> + Send + Sync>;

/// A single method + path binding
#[derive(Clone)]
pub struct Route {
    pub method: Method,
    pub path: String,
    handler: Handler,
}

impl Route {
    pub fn new<F>(method: Method, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request<Bytes>) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        Self {
            method,
            path: path.into(),
            handler: Arc::new(handler),
        }
    }

    /// Invoke the bound handler
    pub fn handle(&self, req: &Request<Bytes>) -> Response<Full<Bytes>> {
        (self.handler)(req)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Named collection of routes sharing a URL prefix
#[derive(Debug, Clone)]
pub struct RouteGroup {
    name: String,
    routes: Vec<Route>,
}

impl RouteGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes: Vec::new(),
        }
    }

    /// Add a route, path relative to the group prefix
    #[must_use]
    pub fn route<F>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(&Request<Bytes>) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.routes.push(Route::new(method, path, handler));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub(crate) fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}
