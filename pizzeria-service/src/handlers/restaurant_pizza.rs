use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorsResponse};
use crate::models::{parse_price, NewRestaurantPizza};
use crate::serializer::{serialize_restaurant_pizza, RestaurantPizzaCreated};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price in whole currency units, 1 to 30 inclusive
    #[schema(value_type = i64)]
    pub price: serde_json::Number,
    /// Pizza being priced
    pub pizza_id: i64,
    /// Restaurant charging the price
    pub restaurant_id: i64,
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Price listing created", body = RestaurantPizzaCreated),
        (status = 400, description = "Price out of range or malformed request", body = ApiErrorsResponse),
        (status = 404, description = "Restaurant or pizza not found", body = ApiErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaCreated>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected restaurant_pizza payload");
        ApiError::InvalidRequest
    })?;

    // Price is checked before either reference is looked up.
    let price = parse_price(&payload.price)?;

    // Keys are i32, so a wider id cannot reference a stored row.
    let restaurant_id =
        i32::try_from(payload.restaurant_id).map_err(|_| ApiError::UnknownRestaurant)?;
    let restaurant = state
        .store
        .get_restaurant(restaurant_id)
        .await?
        .ok_or(ApiError::UnknownRestaurant)?;
    let pizza_id = i32::try_from(payload.pizza_id).map_err(|_| ApiError::UnknownPizza)?;
    let pizza = state
        .store
        .get_pizza(pizza_id)
        .await?
        .ok_or(ApiError::UnknownPizza)?;

    let listing = NewRestaurantPizza::new(price, pizza.id, restaurant.id)?;
    let created = state.store.insert_restaurant_pizza(listing).await?;
    info!(
        restaurant_pizza_id = created.id,
        restaurant_id = created.restaurant_id,
        pizza_id = created.pizza_id,
        "restaurant_pizza created"
    );

    Ok((
        StatusCode::CREATED,
        Json(serialize_restaurant_pizza(created, pizza, restaurant)),
    ))
}
