use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON envelope for structured reads
///
/// ```
/// use users_api::common::ApiResponse;
///
/// let response = ApiResponse::success(vec![1, 2, 3]);
/// assert!(response.success);
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    pub success: bool,

    #[serde(skip)]
    pub http_status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// A 200 OK envelope around `data`.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            http_status: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success(vec!["a"])).unwrap();
        assert_eq!(body, serde_json::json!({ "data": ["a"], "success": true }));
    }
}
