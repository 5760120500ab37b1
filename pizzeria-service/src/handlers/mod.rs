pub mod index;
pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub use index::router as index_router;
pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{response::Json, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

/// Builds the complete HTTP application around a store handle.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(index_router())
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .route("/api-docs/openapi.json", get(openapi))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        index::index,
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::serializer::RestaurantSummary,
            crate::serializer::RestaurantDetail,
            crate::serializer::RestaurantPizzaEntry,
            crate::serializer::PizzaSummary,
            crate::serializer::RestaurantPizzaCreated,
            crate::handlers::restaurant_pizza::CreateRestaurantPizzaRequest,
            crate::error::ApiErrorResponse,
            crate::error::ApiErrorsResponse
        )
    ),
    tags(
        (name = "index", description = "Informational page"),
        (name = "restaurants", description = "Restaurant catalog endpoints"),
        (name = "pizzas", description = "Pizza catalog endpoints"),
        (name = "restaurant_pizzas", description = "Pizza pricing endpoints")
    ),
    info(
        title = "Pizza Restaurants API",
        description = "Restaurants, pizzas and the prices restaurants charge for them",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
