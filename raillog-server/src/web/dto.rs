//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query string for a rolling-stock lookup.
///
/// Both fields are optional at the wire level so that missing values get
/// our own 400 message rather than a generic extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingStockRequest {
    /// Train number, e.g. "G1"
    pub train_number: Option<String>,

    /// Travel date, `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Rolling-stock lookup result. An empty string means no provider knew.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingStockResponse {
    pub rolling_stock: String,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
