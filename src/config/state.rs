// Application state module
// Immutable state shared by every connection: configuration and route table

use crate::api;
use crate::error::ServerError;
use crate::handler::homepage;
use crate::routing::Router;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    pub router: Router,
}

impl AppState {
    /// Build the route table: homepage at `/`, then every API group
    ///
    /// Fails when two routes resolve to the same method and path.
    pub async fn new(config: Config) -> Result<Self, ServerError> {
        let page = homepage::load(&config.routes.homepage_template).await;

        let mut router = Router::new();
        homepage::register(&mut router, page)?;
        api::register(&mut router, &config.routes)?;

        tracing::info!(routes = router.routes().len(), "Route table built");
        for route in router.routes() {
            tracing::debug!("  {} {}", route.method, route.path);
        }

        Ok(Self { config, router })
    }
}
