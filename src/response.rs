//!
//! # Response Envelope
//!
//! Every success response is `{success: true, message, data}` with an
//! optional `pagination` block for list endpoints. Errors use the
//! counterpart envelope built in `error.rs`.

use serde::Serialize;

/// Pagination metadata accompanying a page of results.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl Pagination {
    /// `total_pages = ceil(total / limit)`; zero rows means zero pages.
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
            pagination: None,
        }
    }

    pub fn paginated(message: &str, data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
            pagination: Some(pagination),
        }
    }
}
