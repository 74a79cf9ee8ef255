//! Route table and lookup
//!
//! Routes are registered once at startup and matched by exact path. The
//! lookup distinguishes "no such path" (404) from "path exists, wrong
//! method" (405) so the caller can answer like any web framework would.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use super::route::{Route, RouteGroup};
use crate::error::ServerError;

/// Result of looking up a request in the route table
#[derive(Debug)]
pub enum RouteMatch<'a> {
    /// A route is bound to this method and path
    Found(&'a Route),
    /// The path is known but not for this method; carries the allowed set
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

/// Immutable-after-startup route table
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single route at an absolute path
    pub fn route<F>(&mut self, method: Method, path: &str, handler: F) -> Result<(), ServerError>
    where
        F: Fn(&Request<Bytes>) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.insert(Route::new(method, path, handler))
    }

    /// Mount every route of `group` under `prefix`
    pub fn register_group(&mut self, prefix: &str, group: RouteGroup) -> Result<(), ServerError> {
        let name = group.name().to_string();
        for mut route in group.into_routes() {
            route.path = join_path(prefix, &route.path)?;
            tracing::debug!(group = %name, method = %route.method, path = %route.path, "route registered");
            self.insert(route)?;
        }
        Ok(())
    }

    fn insert(&mut self, route: Route) -> Result<(), ServerError> {
        if !route.path.starts_with('/') {
            return Err(ServerError::InvalidPath(route.path));
        }
        if self
            .routes
            .iter()
            .any(|r| r.method == route.method && r.path == route.path)
        {
            return Err(ServerError::DuplicateRoute {
                method: route.method,
                path: route.path,
            });
        }
        self.routes.push(route);
        Ok(())
    }

    /// Find the route for a method and path
    ///
    /// `HEAD` is served by the `GET` route of the same path.
    pub fn match_route(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        let lookup = if *method == Method::HEAD {
            &Method::GET
        } else {
            method
        };

        if let Some(route) = self
            .routes
            .iter()
            .find(|r| r.method == *lookup && r.path == path)
        {
            return RouteMatch::Found(route);
        }

        let allowed = self.allowed_methods(path);
        if allowed.is_empty() {
            RouteMatch::NotFound
        } else {
            RouteMatch::MethodNotAllowed(allowed)
        }
    }

    /// Methods accepted at `path`, including implicit `HEAD` and `OPTIONS`
    ///
    /// Empty when nothing is registered at the path.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = self
            .routes
            .iter()
            .filter(|r| r.path == path)
            .map(|r| r.method.clone())
            .collect();

        if methods.is_empty() {
            return methods;
        }
        if methods.contains(&Method::GET) && !methods.contains(&Method::HEAD) {
            methods.push(Method::HEAD);
        }
        if !methods.contains(&Method::OPTIONS) {
            methods.push(Method::OPTIONS);
        }
        methods
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

/// Join a group prefix and a route path into one absolute path
fn join_path(prefix: &str, path: &str) -> Result<String, ServerError> {
    if !path.starts_with('/') {
        return Err(ServerError::InvalidPath(path.to_string()));
    }
    let prefix = prefix.trim_end_matches('/');
    if !prefix.is_empty() && !prefix.starts_with('/') {
        return Err(ServerError::InvalidPath(prefix.to_string()));
    }
    Ok(format!("{prefix}{path}"))
}

/// Render a method list as an `Allow` header value
pub fn allow_header(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(_: &Request<Bytes>) -> Response<Full<Bytes>> {
        Response::new(Full::new(Bytes::from("ok")))
    }

    fn make_router() -> Router {
        let mut router = Router::new();
        router.route(Method::GET, "/", ok).unwrap();
        router
            .register_group(
                "/api/disease",
                RouteGroup::new("disease").route(Method::POST, "/detect", ok),
            )
            .unwrap();
        router
            .register_group(
                "/api/ecommerce/",
                RouteGroup::new("ecommerce").route(Method::GET, "/products", ok),
            )
            .unwrap();
        router
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/api/disease", "/detect").unwrap(), "/api/disease/detect");
        assert_eq!(join_path("/api/disease/", "/detect").unwrap(), "/api/disease/detect");
        assert_eq!(join_path("", "/healthz").unwrap(), "/healthz");
        assert_eq!(join_path("/", "/").unwrap(), "/");
        assert!(join_path("/api", "detect").is_err());
        assert!(join_path("api", "/detect").is_err());
    }

    #[test]
    fn test_match_found() {
        let router = make_router();
        match router.match_route(&Method::POST, "/api/disease/detect") {
            RouteMatch::Found(route) => assert_eq!(route.path, "/api/disease/detect"),
            other => panic!("expected match, got {other:?}"),
        }
        assert!(matches!(
            router.match_route(&Method::GET, "/api/ecommerce/products"),
            RouteMatch::Found(_)
        ));
        assert!(matches!(
            router.match_route(&Method::GET, "/"),
            RouteMatch::Found(_)
        ));
    }

    #[test]
    fn test_head_uses_get_route() {
        let router = make_router();
        match router.match_route(&Method::HEAD, "/api/ecommerce/products") {
            RouteMatch::Found(route) => assert_eq!(route.method, Method::GET),
            other => panic!("expected match, got {other:?}"),
        }
        // No GET at this path, so HEAD is not allowed either
        assert!(matches!(
            router.match_route(&Method::HEAD, "/api/disease/detect"),
            RouteMatch::MethodNotAllowed(_)
        ));
    }

    #[test]
    fn test_not_found() {
        let router = make_router();
        assert!(matches!(
            router.match_route(&Method::GET, "/api/disease/unknown"),
            RouteMatch::NotFound
        ));
        assert!(matches!(
            router.match_route(&Method::GET, "/api/ecommerce/products/"),
            RouteMatch::NotFound
        ));
    }

    #[test]
    fn test_method_not_allowed() {
        let router = make_router();
        match router.match_route(&Method::POST, "/api/ecommerce/products") {
            RouteMatch::MethodNotAllowed(methods) => {
                assert_eq!(allow_header(&methods), "GET, HEAD, OPTIONS");
            }
            other => panic!("expected 405, got {other:?}"),
        }
        match router.match_route(&Method::GET, "/api/disease/detect") {
            RouteMatch::MethodNotAllowed(methods) => {
                assert_eq!(allow_header(&methods), "POST, OPTIONS");
            }
            other => panic!("expected 405, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut router = make_router();
        let err = router
            .register_group(
                "/api",
                RouteGroup::new("dup").route(Method::POST, "/disease/detect", ok),
            )
            .unwrap_err();
        assert!(matches!(err, ServerError::DuplicateRoute { .. }));

        // Same path with a different method is fine
        router
            .register_group(
                "/api",
                RouteGroup::new("extra").route(Method::GET, "/disease/detect", ok),
            )
            .unwrap();
        assert_eq!(router.routes().len(), 4);
    }
}
