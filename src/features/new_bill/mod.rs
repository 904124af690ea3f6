// 経費ノート作成機能モジュール
//
// - フォームの入力値と検証
// - 領収書アップロードから作成までの送信処理

pub mod controller;
pub mod form;

pub use controller::NewBillController;
pub use form::{FormEvent, FormField, NewBillForm, SubmissionState};
