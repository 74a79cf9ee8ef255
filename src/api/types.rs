// API payload types
// Response bodies of the disease, e-commerce and health endpoints

use serde::{Deserialize, Serialize};

/// `{"message": ...}` body of the disease detection endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectResponse {
    pub message: String,
}

/// A marketplace product as the frontend renders it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Product category (treatment, vaccine, fertilizer, pesticide)
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

/// `{"products": [...]}` body of the product listing endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductList {
    pub products: Vec<Product>,
}

/// Health probe body
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}
