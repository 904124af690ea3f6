use crate::features::bills::models::{BillDraft, EXPENSE_TYPES};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::ui::test_ids;
use crate::shared::utils::{normalize_date, optional_text, parse_amount, parse_pct};

/// 作成フォームの入力欄（ファイル以外）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ExpenseType,
    ExpenseName,
    Amount,
    Date,
    Vat,
    Pct,
    Commentary,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::ExpenseType,
        FormField::ExpenseName,
        FormField::Amount,
        FormField::Date,
        FormField::Vat,
        FormField::Pct,
        FormField::Commentary,
    ];

    /// 入力欄のテストID
    pub fn test_id(&self) -> &'static str {
        match self {
            FormField::ExpenseType => test_ids::EXPENSE_TYPE,
            FormField::ExpenseName => test_ids::EXPENSE_NAME,
            FormField::Amount => test_ids::AMOUNT,
            FormField::Date => test_ids::DATEPICKER,
            FormField::Vat => test_ids::VAT,
            FormField::Pct => test_ids::PCT,
            FormField::Commentary => test_ids::COMMENTARY,
        }
    }

    pub fn from_test_id(test_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.test_id() == test_id)
    }
}

/// フォームの入力値（入力されたままの文字列）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

impl Default for NewBillForm {
    fn default() -> Self {
        Self {
            // selectの最初の選択肢
            expense_type: EXPENSE_TYPES[0].to_string(),
            name: String::new(),
            amount: String::new(),
            date: String::new(),
            vat: String::new(),
            pct: String::new(),
            commentary: String::new(),
        }
    }
}

impl NewBillForm {
    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::ExpenseType => &mut self.expense_type,
            FormField::ExpenseName => &mut self.name,
            FormField::Amount => &mut self.amount,
            FormField::Date => &mut self.date,
            FormField::Vat => &mut self.vat,
            FormField::Pct => &mut self.pct,
            FormField::Commentary => &mut self.commentary,
        }
    }

    pub fn set(&mut self, field: FormField, value: &str) {
        *self.slot_mut(field) = value.to_string();
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ExpenseType => &self.expense_type,
            FormField::ExpenseName => &self.name,
            FormField::Amount => &self.amount,
            FormField::Date => &self.date,
            FormField::Vat => &self.vat,
            FormField::Pct => &self.pct,
            FormField::Commentary => &self.commentary,
        }
    }

    /// 入力値を検証し、アップロード前の経費ノートに変換する
    ///
    /// # 引数
    /// * `email` - セッションのメールアドレス
    pub fn to_draft(&self, email: &str) -> AppResult<BillDraft> {
        let expense_type = self.expense_type.trim();
        if !EXPENSE_TYPES.contains(&expense_type) {
            return Err(AppError::validation(format!(
                "Type de dépense inconnu: {expense_type}"
            )));
        }

        let amount = parse_amount(&self.amount)?;
        let date = normalize_date(&self.date)?;
        let pct = parse_pct(&self.pct)?;

        let vat = optional_text(&self.vat);
        if let Some(vat) = &vat {
            parse_amount(vat)
                .map_err(|_| AppError::validation(format!("TVA invalide: {vat}")))?;
        }

        Ok(BillDraft {
            email: email.to_string(),
            expense_type: expense_type.to_string(),
            name: self.name.trim().to_string(),
            amount,
            date,
            vat,
            pct,
            commentary: optional_text(&self.commentary),
        })
    }
}

/// 一回の送信の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Editing,
    Validating,
    /// 画像以外のファイルが選択された
    Rejected,
    Uploading,
    Submitting,
    Done,
}

impl SubmissionState {
    /// ネットワーク処理の途中かどうか
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Uploading | SubmissionState::Submitting)
    }
}

/// フォーム送信イベント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormEvent {
    default_prevented: bool,
}

impl FormEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既定の送信動作（ページ遷移）を抑止する
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
