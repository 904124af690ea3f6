// 機能モジュール構造
pub mod features;
pub mod router;
pub mod shared;

use features::auth::{Session, SessionStore};
use features::bills::HttpBillsRepository;
use log::info;
use router::Router;
use shared::api_client::ApiClient;
use shared::config::{
    initialize_logging_system, load_environment_variables, session_store_path,
};
use shared::errors::AppResult;
use shared::ui::{HtmlRenderer, Route};
use std::sync::Arc;

/// アプリケーションを起動し、指定したパスの画面を表示する
///
/// # 引数
/// * `path` - 表示する画面のパス（省略時は一覧画面）
///
/// # 戻り値
/// 表示された画面のマークアップ
pub async fn run(path: Option<String>) -> AppResult<String> {
    // 環境変数を読み込んでからログシステムを初期化する
    load_environment_variables();
    initialize_logging_system();

    info!("アプリケーション初期化を開始します...");

    let store = SessionStore::open(session_store_path()?)?;
    let session = Arc::new(Session::from_store(&store)?);

    let api_client = ApiClient::new()?;
    info!("APIサーバー: {}", api_client.base_url());
    let repository = Arc::new(HttpBillsRepository::new(api_client, session.token.clone()));
    let renderer = Arc::new(HtmlRenderer::new()?);

    let mut router = Router::new(repository, renderer, session)?;
    let path = path.unwrap_or_else(|| Route::BILLS_PATH.to_string());
    router.navigate_path(&path).await?;

    let document = router.document();
    let mut output = document.markup().to_string();
    if let Some(modal) = document.modal() {
        output.push_str(modal);
    }

    info!("アプリケーション初期化完了");
    Ok(output)
}
