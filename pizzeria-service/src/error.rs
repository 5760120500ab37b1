use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::models::ValidationError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The restaurant named in the path does not exist. Rendered as `{"error": ...}`.
    #[error("Restaurant not found")]
    RestaurantNotFound,
    /// A new listing references a missing restaurant. Rendered as `{"errors": [...]}`.
    #[error("Restaurant not found")]
    UnknownRestaurant,
    /// A new listing references a missing pizza. Rendered as `{"errors": [...]}`.
    #[error("Pizza not found")]
    UnknownPizza,
    #[error("validation errors")]
    Validation(#[from] ValidationError),
    #[error("Invalid request")]
    InvalidRequest,
    #[error("Internal server error")]
    Store(#[from] StoreError),
}

/// Body of a failed lookup by path id.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// Body of a rejected `POST /restaurant_pizzas`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorsResponse {
    pub errors: Vec<String>,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::RestaurantNotFound | ApiError::UnknownRestaurant | ApiError::UnknownPizza => {
                StatusCode::NOT_FOUND
            }
            ApiError::Validation(_) | ApiError::InvalidRequest => StatusCode::BAD_REQUEST,
            ApiError::Store(e) => {
                error!(error = %e, "store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        match self {
            ApiError::RestaurantNotFound => (
                status,
                Json(ApiErrorResponse {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            _ => (
                status,
                Json(ApiErrorsResponse {
                    errors: vec![self.to_string()],
                }),
            )
                .into_response(),
        }
    }
}
