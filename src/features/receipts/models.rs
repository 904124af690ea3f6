use serde::{Deserialize, Serialize};

/// ファイル入力欄で選択された領収書ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    /// ファイル名（パスを含む場合は最後の要素だけを使う）
    pub name: String,
    /// ブラウザなどが申告したMIMEタイプ（空の場合あり）
    pub mime_type: String,
    /// ファイルの中身
    pub bytes: Vec<u8>,
}

impl ReceiptFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// パス区切り（`/` と `\`）を取り除いたファイル名
    pub fn file_name(&self) -> &str {
        self.name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.name.as_str())
    }

    /// 小文字化した拡張子
    pub fn extension(&self) -> Option<String> {
        let file_name = self.file_name();
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// アップロード成功時にストアが返す情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedReceipt {
    pub file_url: String,
    #[serde(default)]
    pub file_name: String,
    /// 下書きとして作成された経費ノートのID
    #[serde(default)]
    pub key: Option<String>,
}
