use super::store::{SessionStore, SessionStoreKeys};
use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// ユーザーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// ストアに保存されたユーザー情報
#[derive(Debug, Clone, Deserialize)]
struct StoredUser {
    #[serde(rename = "type")]
    user_type: UserType,
    email: String,
}

/// ログイン中のセッション
///
/// 起動時に一度だけ組み立て、コントローラーに明示的に渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_type: UserType,
    pub email: String,
    /// APIの認証トークン
    pub token: Option<String>,
}

impl Session {
    /// 従業員のセッションを作成する
    pub fn employee<S: Into<String>>(email: S) -> Self {
        Self {
            user_type: UserType::Employee,
            email: email.into(),
            token: None,
        }
    }

    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    /// セッションストアからセッションを組み立てる
    ///
    /// `user` はオブジェクトでもJSON文字列でもよい。
    pub fn from_store(store: &SessionStore) -> AppResult<Self> {
        let user_value = store.get(SessionStoreKeys::USER).ok_or_else(|| {
            AppError::session(format!(
                "ログインユーザーが保存されていません: {}",
                store.path().display()
            ))
        })?;

        let user: StoredUser = match user_value {
            Value::String(raw) => serde_json::from_str(raw)?,
            other => serde_json::from_value(other.clone())?,
        };

        if user.email.trim().is_empty() {
            return Err(AppError::session("メールアドレスが空です"));
        }

        let token = store
            .get(SessionStoreKeys::JWT)
            .and_then(Value::as_str)
            .map(str::to_string);

        log::info!(
            "セッションを読み込みました: type={:?}, email={}",
            user.user_type,
            user.email
        );
        Ok(Self {
            user_type: user.user_type,
            email: user.email,
            token,
        })
    }

    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }
}
