// Liveness and readiness probes

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};

use super::types::HealthStatus;
use crate::config::HealthConfig;
use crate::http;
use crate::routing::RouteGroup;

pub fn routes(config: &HealthConfig) -> RouteGroup {
    RouteGroup::new("health")
        .route(Method::GET, &config.liveness_path, probe)
        // Readiness can include additional checks in the future
        .route(Method::GET, &config.readiness_path, probe)
}

fn probe(_req: &Request<Bytes>) -> Response<Full<Bytes>> {
    http::build_json_response(StatusCode::OK, &HealthStatus { status: "ok" })
}
