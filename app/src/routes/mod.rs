pub mod document;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use infra::{AppState, http::handler::health_check};

use crate::routes::document::{create_document_category_routes, create_document_type_routes};

/// ルーターを作成する。
///
/// # 引数
///
/// * `app_state`: アプリケーション設定とPostgreSQLコネクションプールを持つ状態
pub fn create_router(app_state: AppState) -> Router {
    axum::Router::new()
        .route("/health-check", get(health_check))
        .nest(
            "/documentcategories",
            create_document_category_routes(app_state.clone()),
        )
        .nest(
            "/documenttypes",
            create_document_type_routes(app_state.clone()),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
