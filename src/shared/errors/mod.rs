use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
///
/// 業務フロー上のエラー（バリデーション・一覧取得・送信）は
/// バックエンドまたは入力検証のメッセージをそのまま保持する。
#[derive(Debug, Error)]
pub enum AppError {
    /// バリデーション関連のエラー（ファイル形式・数値・日付）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 4xx系のレスポンス
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 5xx系のレスポンス
    #[error("サーバーエラー: {0}")]
    Server(String),

    /// 通信レベルの失敗（接続不可・タイムアウトなど）
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 領収書アップロードの失敗
    #[error("アップロードエラー: {0}")]
    Upload(String),

    /// 経費ノート作成の失敗
    #[error("作成エラー: {0}")]
    Create(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// セッション関連のエラー
    #[error("セッションエラー: {0}")]
    Session(String),

    /// 画面描画のエラー
    #[error("描画エラー: {0}")]
    Render(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（外部サービス一時的エラーなど）
    Medium,
    /// 高重要度（設定エラーなど）
    High,
}

impl AppError {
    /// ユーザーに表示するためのメッセージを取得
    ///
    /// 業務フローのエラーは元のメッセージをそのまま返す。
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Server(msg)
            | AppError::Network(msg)
            | AppError::Upload(msg)
            | AppError::Create(msg) => msg,
            AppError::Configuration(_) => "Erreur de configuration",
            AppError::Session(_) => "Session invalide, veuillez vous reconnecter",
            AppError::Render(_) => "Erreur d'affichage",
            AppError::Io(_) => "Erreur de lecture du fichier",
            AppError::Json(_) => "Réponse du serveur illisible",
        }
    }

    /// エラーの詳細情報を取得
    ///
    /// # 戻り値
    /// エラーの詳細情報（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    ///
    /// # 戻り値
    /// エラーの重要度レベル
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::NotFound(_) => ErrorSeverity::Low,
            AppError::Server(_) => ErrorSeverity::Medium,
            AppError::Network(_) => ErrorSeverity::Medium,
            AppError::Upload(_) => ErrorSeverity::Medium,
            AppError::Create(_) => ErrorSeverity::Medium,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Session(_) => ErrorSeverity::High,
            AppError::Render(_) => ErrorSeverity::High,
            AppError::Io(_) => ErrorSeverity::Medium,
            AppError::Json(_) => ErrorSeverity::Medium,
        }
    }

    /// 重要度に応じたレベルでエラーをログに出力する
    ///
    /// # 引数
    /// * `context` - エラーが発生した処理の名前
    pub fn log(&self, context: &str) {
        match self.severity() {
            ErrorSeverity::Low => log::warn!("{context}: {self}"),
            ErrorSeverity::Medium | ErrorSeverity::High => log::error!("{context}: {self}"),
        }
    }

    /// バリデーションエラーを作成するヘルパー関数
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// アップロードエラーを作成するヘルパー関数
    pub fn upload<S: Into<String>>(message: S) -> Self {
        AppError::Upload(message.into())
    }

    /// 作成エラーを作成するヘルパー関数
    pub fn create<S: Into<String>>(message: S) -> Self {
        AppError::Create(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// セッションエラーを作成するヘルパー関数
    pub fn session<S: Into<String>>(message: S) -> Self {
        AppError::Session(message.into())
    }

    /// HTTPステータスコードからエラーを分類する
    ///
    /// 4xx系は `NotFound`、それ以外は `Server` に分類する。
    /// メッセージは「Erreur <status>」で始まり、バックエンドの
    /// メッセージがあれば後ろに付与する。
    ///
    /// # 引数
    /// * `status` - HTTPステータスコード
    /// * `backend_message` - バックエンドが返したメッセージ（空の場合は付与しない）
    pub fn from_status(status: u16, backend_message: &str) -> Self {
        let backend_message = backend_message.trim();
        let message = if backend_message.is_empty() {
            format!("Erreur {status}")
        } else {
            format!("Erreur {status} - {backend_message}")
        };

        if (400..500).contains(&status) {
            AppError::NotFound(message)
        } else {
            AppError::Server(message)
        }
    }
}

/// AppErrorからStringへの変換
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message().to_string()
    }
}

/// tera::ErrorからAppErrorへの変換
impl From<tera::Error> for AppError {
    fn from(error: tera::Error) -> Self {
        AppError::Render(error.to_string())
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        // 各エラータイプの重要度をテスト
        assert_eq!(
            AppError::validation("テスト").severity(),
            ErrorSeverity::Low
        );
        assert_eq!(
            AppError::from_status(404, "").severity(),
            ErrorSeverity::Low
        );
        assert_eq!(
            AppError::from_status(500, "").severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(
            AppError::configuration("設定ファイル不正").severity(),
            ErrorSeverity::High
        );
    }

    #[test]
    fn test_from_status_classification() {
        // 4xx系はNotFound、5xx系はServerに分類される
        assert!(matches!(AppError::from_status(404, ""), AppError::NotFound(_)));
        assert!(matches!(AppError::from_status(403, ""), AppError::NotFound(_)));
        assert!(matches!(AppError::from_status(500, ""), AppError::Server(_)));
        assert!(matches!(AppError::from_status(503, ""), AppError::Server(_)));
    }

    #[test]
    fn test_from_status_message() {
        assert_eq!(AppError::from_status(404, "").user_message(), "Erreur 404");
        assert_eq!(
            AppError::from_status(500, "  base indisponible ").user_message(),
            "Erreur 500 - base indisponible"
        );
    }

    #[test]
    fn test_user_message_is_verbatim() {
        // 業務フローのエラーはメッセージをそのまま返す
        let upload_error = AppError::upload("Erreur 413");
        assert_eq!(upload_error.user_message(), "Erreur 413");

        let session_error = AppError::session("user manquant");
        assert_eq!(
            session_error.user_message(),
            "Session invalide, veuillez vous reconnecter"
        );
    }

    #[test]
    fn test_string_conversion() {
        let error = AppError::validation("Montant invalide");
        let error_string: String = error.into();
        assert_eq!(error_string, "Montant invalide");
    }

    #[test]
    fn test_error_details() {
        let error = AppError::create("Erreur 500");
        let details = error.details();
        assert!(details.contains("作成エラー"));
        assert!(details.contains("Erreur 500"));
    }
}
