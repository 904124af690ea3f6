//! セッションストアモジュール
//!
//! ログイン時に保存されたユーザー情報やJWTを、JSONのキー・バリュー
//! ファイルとして保存・取得します。

use crate::shared::errors::{AppError, AppResult};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// セッションストアのキー定義
pub struct SessionStoreKeys;

impl SessionStoreKeys {
    /// ログイン中のユーザー（`{"type": "Employee", "email": ...}`）のキー
    pub const USER: &'static str = "user";
    /// APIの認証トークンのキー
    pub const JWT: &'static str = "jwt";
}

/// JSONファイルのキー・バリューストア
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// ストアファイルのパス
    path: PathBuf,
    /// 読み込み済みの値
    entries: Map<String, Value>,
}

impl SessionStore {
    /// ストアファイルを開く
    ///
    /// ファイルが存在しない場合は空のストアとして扱う。
    ///
    /// # 引数
    /// * `path` - ストアファイルのパス
    ///
    /// # 戻り値
    /// SessionStoreインスタンス、またはファイルが壊れている場合はエラー
    pub fn open<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Map::new()
            } else {
                match serde_json::from_str::<Value>(&content)? {
                    Value::Object(map) => map,
                    _ => {
                        return Err(AppError::session(format!(
                            "ストアファイルの形式が不正です: {}",
                            path.display()
                        )))
                    }
                }
            }
        } else {
            log::debug!("ストアファイルが存在しません: {}", path.display());
            Map::new()
        };

        log::debug!(
            "セッションストアを開きました: path={}, entries={}",
            path.display(),
            entries.len()
        );
        Ok(Self { path, entries })
    }

    /// 値を取得する
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// 値を設定する（保存は `save` で行う）
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// 値を削除する
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// ストアファイルに書き込む
    pub fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;

        log::info!("セッションストアを保存しました: path={}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
