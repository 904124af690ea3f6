// 認証機能モジュール
//
// - セッションストア（JSONファイル）
// - ログイン中のセッション

pub mod session;
pub mod store;

pub use session::{Session, UserType};
pub use store::{SessionStore, SessionStoreKeys};
