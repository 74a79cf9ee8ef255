//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body limits, route lookup,
//! framework-default answers (404, 405, OPTIONS, HEAD) and access logging.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{allow_header, RouteMatch, Router};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Generic over the body type so the same path serves hyper connections and
/// in-process callers.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_log = state.config.logging.access_log;
    let entry = access_log.then(|| access_entry(&req, peer_addr));
    let is_head = *req.method() == Method::HEAD;
    let http_config = &state.config.http;

    let mut response = match read_body(req, http_config.max_body_size).await {
        Ok(req) => dispatch(&state.router, &req, http_config.enable_cors),
        Err(resp) => resp,
    };

    http::apply_common_headers(&mut response, &http_config.server_name, http_config.enable_cors);
    if is_head {
        response = http::strip_body(response);
    }

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route a buffered request to its handler or a default answer
pub fn dispatch(router: &Router, req: &Request<Bytes>, enable_cors: bool) -> Response<Full<Bytes>> {
    let method = req.method();
    let path = req.uri().path();

    match router.match_route(method, path) {
        RouteMatch::Found(route) => route.handle(req),
        RouteMatch::MethodNotAllowed(allowed) => {
            let allow = allow_header(&allowed);
            if *method == Method::OPTIONS {
                http::build_options_response(&allow, enable_cors)
            } else {
                tracing::debug!("Method not allowed: {method} {path}");
                http::build_405_response(&allow)
            }
        }
        RouteMatch::NotFound => http::build_404_response(),
    }
}

/// Buffer the request body, enforcing `max_body_size`
///
/// The declared `Content-Length` is checked first so oversized uploads are
/// refused without reading them.
async fn read_body<B>(req: Request<B>, max_body_size: u64) -> Result<Request<Bytes>, Response<Full<Bytes>>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    if let Some(resp) = check_content_length(&req, max_body_size) {
        return Err(resp);
    }

    let (parts, body) = req.into_parts();
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(Request::from_parts(parts, collected.to_bytes())),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            tracing::warn!("Request body exceeded {max_body_size} bytes");
            Err(http::build_413_response())
        }
        Err(e) => {
            tracing::warn!("Failed to read request body: {e}");
            Err(http::build_400_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_content_length<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            tracing::warn!("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                tracing::warn!("Request body too large: {size} bytes (max: {max_body_size})");
                Some(http::build_413_response())
            }
            Err(_) => {
                tracing::warn!("Invalid Content-Length value: '{size_str}', skipping size check");
                None
            }
            _ => None,
        },
    )
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
