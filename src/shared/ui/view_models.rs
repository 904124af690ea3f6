use serde::Serialize;

/// 一覧の一行分（表示用に整形済み）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillRow {
    pub id: String,
    pub expense_type: String,
    pub name: String,
    /// 表示用の日付（例: `4 Avr. 04`）
    pub date: String,
    /// 並べ替えに使ったISO形式の日付
    pub iso_date: String,
    /// 表示用の金額（例: `400 €`）
    pub amount: String,
    /// 状態ラベル
    pub status: String,
    pub file_url: String,
}

/// 一覧画面の状態（一覧とエラーを同時には持たない）
#[derive(Debug, Clone, PartialEq)]
pub enum BillsPage {
    Loaded(Vec<BillRow>),
    Failed(String),
}

/// 作成フォーム画面
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBillFormView {
    pub expense_types: Vec<String>,
}
