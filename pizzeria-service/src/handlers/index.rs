use axum::{response::Html, routing::get, Router};

use super::AppState;

pub const INDEX_PAGE: &str = "<h1>Pizza Restaurants</h1>";

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Informational page", body = String, content_type = "text/html"),
    ),
    tag = "index"
)]
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
