use anyhow::Context as _;

use infra::AppState;

use app::{
    bind_address, create_pg_pool, get_subscriber, init_subscriber, load_app_settings,
    routes::create_router,
};

const APP_NAME: &str = "masterdata";

/// アプリケーションエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // アプリケーション設定を読み込み
    let app_settings = load_app_settings("app_settings.toml")?;

    // トレーシングを初期化
    let subscriber = get_subscriber(APP_NAME.into(), app_settings.log.level, std::io::stdout);
    init_subscriber(subscriber)?;

    // データベース接続プールを作成
    let pg_pool = create_pg_pool(&app_settings.database).await?;

    // HTTPサーバーを起動
    let (listener, port) = bind_address(&app_settings.http).await?;
    tracing::info!(
        "HTTP server is running on {}:{}",
        app_settings.http.host,
        port
    );
    let app_state = AppState {
        app_settings,
        pg_pool,
    };
    let router = create_router(app_state);
    axum::serve(listener, router)
        .await
        .context("Failed to start the HTTP server")?;

    Ok(())
}
