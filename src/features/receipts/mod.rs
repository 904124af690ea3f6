// 領収書機能モジュール
//
// - 選択された領収書ファイルの形式チェック
// - アップロード用のContent-Type推定

pub mod models;
pub mod validator;

pub use models::{ReceiptFile, UploadedReceipt};
pub use validator::{content_type_for, is_accepted_image, INVALID_FILE_MESSAGE};
