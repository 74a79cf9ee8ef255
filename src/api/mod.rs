// API module entry
// Mounts the disease, e-commerce and health route groups

mod disease;
mod ecommerce;
mod health;
mod types;

use crate::config::RoutesConfig;
use crate::error::ServerError;
use crate::routing::Router;

pub use disease::DETECT_MESSAGE;
pub use types::{DetectResponse, Product, ProductList};

/// Group prefixes, relative to `routes.api_prefix`
pub const DISEASE_PREFIX: &str = "/disease";
pub const ECOMMERCE_PREFIX: &str = "/ecommerce";

/// Register every API route group on `router`
pub fn register(router: &mut Router, routes: &RoutesConfig) -> Result<(), ServerError> {
    let api_prefix = routes.api_root();

    router.register_group(&format!("{api_prefix}{DISEASE_PREFIX}"), disease::routes())?;
    router.register_group(&format!("{api_prefix}{ECOMMERCE_PREFIX}"), ecommerce::routes())?;

    if routes.health.enabled {
        router.register_group("", health::routes(&routes.health))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HealthConfig;
    use crate::routing::RouteMatch;
    use hyper::Method;

    fn routes_config(api_prefix: &str, health: bool) -> RoutesConfig {
        RoutesConfig {
            api_prefix: api_prefix.to_string(),
            homepage_template: "templates/index.html".to_string(),
            health: HealthConfig {
                enabled: health,
                ..HealthConfig::default()
            },
        }
    }

    #[test]
    fn test_default_layout() {
        let mut router = Router::new();
        register(&mut router, &routes_config("/api", true)).unwrap();

        assert!(matches!(
            router.match_route(&Method::POST, "/api/disease/detect"),
            RouteMatch::Found(_)
        ));
        assert!(matches!(
            router.match_route(&Method::GET, "/api/ecommerce/products"),
            RouteMatch::Found(_)
        ));
        assert!(matches!(
            router.match_route(&Method::GET, "/healthz"),
            RouteMatch::Found(_)
        ));
        assert!(matches!(
            router.match_route(&Method::GET, "/readyz"),
            RouteMatch::Found(_)
        ));
    }

    #[test]
    fn test_custom_prefix_without_health() {
        let mut router = Router::new();
        register(&mut router, &routes_config("/v2/", false)).unwrap();

        assert!(matches!(
            router.match_route(&Method::POST, "/v2/disease/detect"),
            RouteMatch::Found(_)
        ));
        assert!(matches!(
            router.match_route(&Method::POST, "/api/disease/detect"),
            RouteMatch::NotFound
        ));
        assert!(matches!(
            router.match_route(&Method::GET, "/healthz"),
            RouteMatch::NotFound
        ));
    }

    #[test]
    fn test_register_twice_fails() {
        let mut router = Router::new();
        let cfg = routes_config("/api", true);
        register(&mut router, &cfg).unwrap();
        assert!(matches!(
            register(&mut router, &cfg),
            Err(ServerError::DuplicateRoute { .. })
        ));
    }
}
