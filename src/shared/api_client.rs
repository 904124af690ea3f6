//! 汎用APIクライアント
//!
//! 経費ノートAPIサーバーとの通信を行う。リトライは行わず、
//! 失敗はすべて分類済みの `AppError` として呼び出し元へ返す。

use crate::shared::config::environment::{check_api_target, ApiConfig, EnvironmentConfig};
use crate::shared::errors::{AppError, AppResult};
use log::{debug, info, warn};
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIサーバーからの構造化エラーレスポンス
///
/// `{"error": {"message": ...}}`、`{"error": "..."}`、`{"message": "..."}`
/// のいずれの形にも対応する。
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorResponse {
    Detailed { error: ErrorDetail },
    Flat { error: String },
    Message { message: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

impl ErrorResponse {
    /// ユーザーに見せるメッセージ部分を取り出す
    pub fn message(&self) -> &str {
        match self {
            ErrorResponse::Detailed { error } => &error.message,
            ErrorResponse::Flat { error } => error,
            ErrorResponse::Message { message } => message,
        }
    }
}

/// 汎用APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 環境設定からAPIクライアントを作成
    pub fn new() -> AppResult<Self> {
        let config = ApiConfig::from_env();
        check_api_target(&EnvironmentConfig::from_env(), &config);
        Self::new_with_config(config)
    }

    /// 設定を指定してAPIクライアントを作成
    pub fn new_with_config(config: ApiConfig) -> AppResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// ベースURL
    pub fn base_url(&self) -> &str {
        self.config.normalized_base_url()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url())
    }

    fn with_auth(request: RequestBuilder, auth_token: Option<&str>) -> RequestBuilder {
        match auth_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str, auth_token: Option<&str>) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let request = Self::with_auth(self.client.get(self.url(endpoint)), auth_token);
        self.send(request, "GET", endpoint).await
    }

    /// JSONボディ付きPOSTリクエストを送信
    pub async fn post<B, T>(&self, endpoint: &str, body: &B, auth_token: Option<&str>) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");

        let request = Self::with_auth(self.client.post(self.url(endpoint)).json(body), auth_token);
        self.send(request, "POST", endpoint).await
    }

    /// JSONボディ付きPATCHリクエストを送信
    pub async fn patch<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        auth_token: Option<&str>,
    ) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("PATCHリクエスト送信: endpoint={endpoint}");

        let request = Self::with_auth(self.client.patch(self.url(endpoint)).json(body), auth_token);
        self.send(request, "PATCH", endpoint).await
    }

    /// マルチパートフォームをPOSTで送信
    pub async fn post_multipart<T>(
        &self,
        endpoint: &str,
        form: multipart::Form,
        auth_token: Option<&str>,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("マルチパートPOSTリクエスト送信: endpoint={endpoint}");

        let request = Self::with_auth(
            self.client.post(self.url(endpoint)).multipart(form),
            auth_token,
        );
        self.send(request, "POST", endpoint).await
    }

    /// リクエストを一度だけ送信し、レスポンスを分類する
    async fn send<T>(&self, request: RequestBuilder, method: &str, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            warn!("{method}リクエストの送信に失敗しました: endpoint={endpoint}, error={e}");
            classify_transport_error(&e)
        })?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        let result: T = response.json().await.map_err(|e| {
            warn!("レスポンス解析エラー: endpoint={endpoint}, error={e}");
            AppError::Server(format!("Réponse invalide du serveur: {e}"))
        })?;

        info!("{method}リクエスト成功: endpoint={endpoint}");
        Ok(result)
    }

    /// エラーレスポンスを `AppError` に変換する
    async fn handle_error_response(&self, response: Response) -> AppError {
        let status_code = response.status().as_u16();

        let response_text = response.text().await.unwrap_or_default();

        let backend_message = match serde_json::from_str::<ErrorResponse>(&response_text) {
            Ok(error_response) => {
                debug!(
                    "APIサーバーから構造化エラーレスポンスを受信: status={status_code}, message={}",
                    error_response.message()
                );
                error_response.message().to_string()
            }
            Err(_) => {
                debug!(
                    "APIサーバーから非構造化エラーレスポンス: status={status_code}, body={response_text}"
                );
                response_text
            }
        };

        let error = AppError::from_status(status_code, &backend_message);
        error.log("APIサーバーエラー");
        error
    }
}

/// 通信レベルのエラーをユーザー向けメッセージ付きで分類する
fn classify_transport_error(error: &reqwest::Error) -> AppError {
    if error.is_timeout() {
        AppError::Network("Délai d'attente du serveur dépassé".to_string())
    } else if error.is_connect() {
        AppError::Network("Serveur injoignable".to_string())
    } else {
        AppError::Network(format!("Erreur réseau: {error}"))
    }
}
