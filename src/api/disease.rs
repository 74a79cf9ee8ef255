// Disease detection API group

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};

use super::types::DetectResponse;
use crate::http;
use crate::routing::RouteGroup;

/// Reply of the detection endpoint until an inference backend exists
pub const DETECT_MESSAGE: &str = "Disease detection endpoint active.";

pub fn routes() -> RouteGroup {
    RouteGroup::new("disease").route(Method::POST, "/detect", detect)
}

/// `POST /detect`: the request body is accepted unvalidated and ignored
pub fn detect(req: &Request<Bytes>) -> Response<Full<Bytes>> {
    tracing::debug!(payload_bytes = req.body().len(), "disease detection requested");
    http::build_json_response(
        StatusCode::OK,
        &DetectResponse {
            message: DETECT_MESSAGE.to_string(),
        },
    )
}
