// 経費ノート機能モジュール
//
// - 経費ノートのデータモデルと並べ替え
// - リポジトリ（REST API / メモリ）
// - 一覧画面のコントローラー

pub mod list_controller;
pub mod models;
pub mod repository;

#[cfg(test)]
pub(crate) mod fixtures;

pub use list_controller::BillsListController;
pub use models::{Bill, BillDraft, BillStatus, CreateBillDto, EXPENSE_TYPES};
pub use repository::{
    BillsRepository, HttpBillsRepository, InMemoryBillsRepository, RepositoryOperation,
};
