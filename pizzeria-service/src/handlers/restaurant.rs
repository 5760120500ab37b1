use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::{info, instrument};

use crate::error::{ApiError, ApiErrorResponse};
use crate::serializer::{serialize_restaurant_detail, RestaurantDetail, RestaurantSummary};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let restaurants = state.store.list_restaurants().await?;
    Ok(Json(
        restaurants.into_iter().map(RestaurantSummary::from).collect(),
    ))
}

/// Keys are `i32`; any wider integer cannot name a stored restaurant.
fn restaurant_id(id: i64) -> Result<i32, ApiError> {
    i32::try_from(id).map_err(|_| ApiError::RestaurantNotFound)
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its pizzas", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i64, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let id = restaurant_id(id)?;
    let (restaurant, listings) = state
        .store
        .get_restaurant_with_pizzas(id)
        .await?
        .ok_or(ApiError::RestaurantNotFound)?;

    Ok(Json(serialize_restaurant_detail(restaurant, listings)))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its pizza prices deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i64, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = restaurant_id(id)?;
    if !state.store.delete_restaurant(id).await? {
        return Err(ApiError::RestaurantNotFound);
    }

    info!(restaurant_id = id, "restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}
