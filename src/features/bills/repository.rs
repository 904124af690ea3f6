//! 経費ノートのリポジトリ
//!
//! 一覧取得・領収書アップロード・作成/更新をひとつのインターフェースにまとめる。
//! どの実装もリトライは行わず、失敗はそのまま呼び出し元に返す。

use crate::features::bills::models::{Bill, CreateBillDto};
use crate::features::receipts::models::{ReceiptFile, UploadedReceipt};
use crate::features::receipts::validator::content_type_for;
use crate::shared::api_client::ApiClient;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::nanoid::generate_bill_id;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::multipart;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// 経費ノートAPIの抽象化
#[async_trait]
pub trait BillsRepository: Send + Sync {
    /// 経費ノートを保存順のまま取得する
    async fn list_bills(&self) -> AppResult<Vec<Bill>>;

    /// 領収書ファイルをアップロードする
    ///
    /// # 引数
    /// * `file` - 領収書ファイル
    /// * `email` - 所有者のメールアドレス
    async fn upload_file(&self, file: &ReceiptFile, email: &str) -> AppResult<UploadedReceipt>;

    /// 経費ノートを作成し、IDが割り当てられた経費ノートを返す
    async fn create_bill(&self, dto: CreateBillDto) -> AppResult<Bill>;

    /// 既存（下書き）の経費ノートの内容を置き換える
    async fn update_bill(&self, id: &str, dto: CreateBillDto) -> AppResult<Bill>;
}

/// エラーを送信処理の分類に付け替える（メッセージはそのまま）
fn as_upload_error(error: AppError) -> AppError {
    AppError::upload(error.user_message())
}

fn as_create_error(error: AppError) -> AppError {
    AppError::create(error.user_message())
}

/// REST APIサーバー経由のリポジトリ
pub struct HttpBillsRepository {
    api_client: ApiClient,
    auth_token: Option<String>,
}

impl HttpBillsRepository {
    /// 新しいHttpBillsRepositoryを作成する
    ///
    /// # 引数
    /// * `api_client` - APIクライアント
    /// * `auth_token` - セッションのJWT（あればAuthorizationヘッダーに付与）
    pub fn new(api_client: ApiClient, auth_token: Option<String>) -> Self {
        Self {
            api_client,
            auth_token,
        }
    }
}

#[async_trait]
impl BillsRepository for HttpBillsRepository {
    async fn list_bills(&self) -> AppResult<Vec<Bill>> {
        let bills: Vec<Bill> = self
            .api_client
            .get("/bills", self.auth_token.as_deref())
            .await?;

        let incomplete = bills.iter().filter(|b| b.is_incomplete()).count();
        if incomplete > 0 {
            warn!("未完成の経費ノートが含まれています: count={incomplete}");
        }

        info!("経費ノート一覧取得成功: count={}", bills.len());
        Ok(bills)
    }

    async fn upload_file(&self, file: &ReceiptFile, email: &str) -> AppResult<UploadedReceipt> {
        let file_name = file.file_name().to_string();
        let mime_type = if file.mime_type.is_empty() {
            content_type_for(&file_name)
        } else {
            file.mime_type.as_str()
        };

        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file_name.clone())
            .mime_str(mime_type)
            .map_err(|e| AppError::upload(format!("Type de fichier invalide: {e}")))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("email", email.to_string());

        let mut receipt: UploadedReceipt = self
            .api_client
            .post_multipart("/bills", form, self.auth_token.as_deref())
            .await
            .map_err(as_upload_error)?;

        if receipt.file_url.trim().is_empty() {
            return Err(AppError::upload(
                "Erreur d'envoi - URL du justificatif absente",
            ));
        }
        if receipt.file_name.is_empty() {
            receipt.file_name = file_name;
        }

        info!(
            "領収書アップロード成功: file_name={}, key={:?}",
            receipt.file_name, receipt.key
        );
        Ok(receipt)
    }

    async fn create_bill(&self, dto: CreateBillDto) -> AppResult<Bill> {
        // アップロード時に下書きが作られている場合はそれを確定させる
        if let Some(key) = dto.draft_key.clone() {
            return self.update_bill(&key, dto).await;
        }

        let bill: Bill = self
            .api_client
            .post("/bills", &dto, self.auth_token.as_deref())
            .await
            .map_err(as_create_error)?;

        info!("経費ノート作成成功: bill_id={}", bill.id);
        Ok(bill)
    }

    async fn update_bill(&self, id: &str, dto: CreateBillDto) -> AppResult<Bill> {
        let endpoint = format!("/bills/{}", urlencoding::encode(id));
        let bill: Bill = self
            .api_client
            .patch(&endpoint, &dto, self.auth_token.as_deref())
            .await
            .map_err(as_create_error)?;

        info!("経費ノート更新成功: bill_id={}", bill.id);
        Ok(bill)
    }
}

/// リポジトリの操作の種類（失敗注入と呼び出し記録に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    List,
    Upload,
    Create,
    Update,
}

/// メモリ上のリポジトリ
///
/// 開発・テスト用。失敗を一度だけ注入でき、呼び出し順を記録する。
#[derive(Clone, Default)]
pub struct InMemoryBillsRepository {
    bills: Arc<RwLock<Vec<Bill>>>,
    failures: Arc<Mutex<HashMap<RepositoryOperation, AppError>>>,
    calls: Arc<Mutex<Vec<RepositoryOperation>>>,
}

impl InMemoryBillsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の経費ノートを持つリポジトリを作成する
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills: Arc::new(RwLock::new(bills)),
            ..Self::default()
        }
    }

    /// 次の一回だけ指定した操作を失敗させる
    pub fn fail_next(&self, operation: RepositoryOperation, error: AppError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(operation, error);
        }
    }

    /// これまでの呼び出し順
    pub fn calls(&self) -> Vec<RepositoryOperation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// 保存されている経費ノートの件数
    pub fn len(&self) -> usize {
        self.bills.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 呼び出しを記録し、注入された失敗があれば返す
    fn enter(&self, operation: RepositoryOperation) -> AppResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(operation);
        }
        let injected = self
            .failures
            .lock()
            .ok()
            .and_then(|mut failures| failures.remove(&operation));
        match injected {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn lock_error() -> AppError {
        AppError::Server("Erreur 500 - stockage indisponible".to_string())
    }
}

#[async_trait]
impl BillsRepository for InMemoryBillsRepository {
    async fn list_bills(&self) -> AppResult<Vec<Bill>> {
        self.enter(RepositoryOperation::List)?;
        let bills = self.bills.read().map_err(|_| Self::lock_error())?;
        Ok(bills.clone())
    }

    async fn upload_file(&self, file: &ReceiptFile, email: &str) -> AppResult<UploadedReceipt> {
        self.enter(RepositoryOperation::Upload)
            .map_err(as_upload_error)?;

        let file_name = file.file_name().to_string();
        info!("領収書をメモリに保存しました: file_name={file_name}, email={email}");
        Ok(UploadedReceipt {
            file_url: format!("https://localhost:3456/images/{file_name}"),
            file_name,
            key: None,
        })
    }

    async fn create_bill(&self, dto: CreateBillDto) -> AppResult<Bill> {
        self.enter(RepositoryOperation::Create)
            .map_err(as_create_error)?;

        let bill = dto.into_bill(generate_bill_id());
        let mut bills = self.bills.write().map_err(|_| Self::lock_error())?;
        bills.push(bill.clone());
        Ok(bill)
    }

    async fn update_bill(&self, id: &str, dto: CreateBillDto) -> AppResult<Bill> {
        self.enter(RepositoryOperation::Update)
            .map_err(as_create_error)?;

        let mut bills = self.bills.write().map_err(|_| Self::lock_error())?;
        let slot = bills
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::create("Erreur 404"))?;
        let updated = dto.into_bill(id.to_string());
        *slot = updated.clone();
        Ok(updated)
    }
}
