use axum::{Router, routing::get};

use infra::{
    AppState,
    http::handler::document::{category, document_type},
};

pub fn create_document_category_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(category::list))
        .route("/{lang_code}", get(category::by_lang_code))
        .route("/{code}/{lang_code}", get(category::by_code_and_lang_code))
        .with_state(app_state)
}

pub fn create_document_type_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/{category_code}/{lang_code}",
            get(document_type::valid_types),
        )
        // 末尾のスラッシュ付きのパスも受け付ける
        .route(
            "/{category_code}/{lang_code}/",
            get(document_type::valid_types),
        )
        .with_state(app_state)
}
