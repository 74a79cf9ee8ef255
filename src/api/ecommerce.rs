// E-commerce API group

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};

use super::types::ProductList;
use crate::http;
use crate::routing::RouteGroup;

pub fn routes() -> RouteGroup {
    RouteGroup::new("ecommerce").route(Method::GET, "/products", list_products)
}

/// `GET /products`: there is no catalog yet, so the listing is always empty
pub fn list_products(_req: &Request<Bytes>) -> Response<Full<Bytes>> {
    http::build_json_response(StatusCode::OK, &ProductList::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_list_is_empty_regardless_of_query() {
        for uri in [
            "/api/ecommerce/products",
            "/api/ecommerce/products?type=vaccine&minPrice=10",
        ] {
            let req = Request::builder().uri(uri).body(Bytes::new()).unwrap();
            let resp = list_products(&req);
            assert_eq!(resp.status(), StatusCode::OK);

            let bytes = resp.into_body().collect().await.unwrap().to_bytes();
            let list: ProductList = serde_json::from_slice(&bytes).unwrap();
            assert!(list.products.is_empty());
            assert_eq!(&bytes[..], br#"{"products":[]}"#);
        }
    }
}
