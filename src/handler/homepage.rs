//! Homepage module
//!
//! Loads the HTML page served at `/` once at startup and binds it to the
//! route table.

use hyper::Method;
use std::sync::Arc;
use tokio::fs;

use crate::error::ServerError;
use crate::http;
use crate::routing::Router;

/// Read the homepage template, falling back to the built-in page
pub async fn load(template_path: &str) -> Arc<str> {
    match fs::read_to_string(template_path).await {
        Ok(html) => {
            tracing::info!("Homepage loaded from {template_path} ({} bytes)", html.len());
            Arc::from(html)
        }
        Err(e) => {
            tracing::warn!("Homepage template {template_path} unavailable ({e}), serving built-in page");
            Arc::from(DEFAULT_HOMEPAGE)
        }
    }
}

/// Bind `GET /` to the loaded page
pub fn register(router: &mut Router, page: Arc<str>) -> Result<(), ServerError> {
    router.route(Method::GET, "/", move |_req| http::build_html_response(&page))
}

pub const DEFAULT_HOMEPAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>FarmAid AI</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif;
            background: #2E7D32;
            color: white;
            min-height: 100vh;
            margin: 0;
            display: flex;
            align-items: center;
            justify-content: center;
        }
        .container {
            text-align: center;
            padding: 40px;
            background: rgba(255, 255, 255, 0.1);
            border-radius: 20px;
            max-width: 600px;
        }
        code { color: #c8e6c9; }
    </style>
</head>
<body>
    <div class="container">
        <h1>FarmAid AI</h1>
        <p>AI-powered crop and livestock disease detection</p>
        <ul>
            <li><code>POST /api/disease/detect</code></li>
            <li><code>GET /api/ecommerce/products</code></li>
        </ul>
    </div>
</body>
</html>
"#;
