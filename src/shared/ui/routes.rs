/// 画面のルート
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// 経費ノート一覧
    Bills,
    /// 経費ノート作成フォーム
    NewBill,
}

impl Route {
    pub const BILLS_PATH: &'static str = "#employee/bills";
    pub const NEW_BILL_PATH: &'static str = "#employee/bill/new";

    /// ルートに対応するパス
    pub fn path(&self) -> &'static str {
        match self {
            Route::Bills => Self::BILLS_PATH,
            Route::NewBill => Self::NEW_BILL_PATH,
        }
    }

    /// パスからルートを解決する
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim() {
            Self::BILLS_PATH => Some(Route::Bills),
            Self::NEW_BILL_PATH => Some(Route::NewBill),
            _ => None,
        }
    }

    /// レイアウトのアイコン強調に使う識別子
    pub fn key(&self) -> &'static str {
        match self {
            Route::Bills => "bills",
            Route::NewBill => "new_bill",
        }
    }
}

/// 外部から操作される要素の安定したテストID
pub mod test_ids {
    pub const ICON_WINDOW: &str = "icon-window";
    pub const ICON_MAIL: &str = "icon-mail";
    pub const ICON_EYE: &str = "icon-eye";
    pub const BTN_NEW_BILL: &str = "btn-new-bill";
    pub const BILL_ROW: &str = "bill-row";
    pub const BILL_DATE: &str = "bill-date";
    pub const ERROR_MESSAGE: &str = "error-message";
    pub const MODAL_FILE: &str = "modal-file";

    pub const FORM_NEW_BILL: &str = "form-new-bill";
    pub const EXPENSE_TYPE: &str = "expense-type";
    pub const EXPENSE_NAME: &str = "expense-name";
    pub const AMOUNT: &str = "amount";
    pub const DATEPICKER: &str = "datepicker";
    pub const VAT: &str = "vat";
    pub const PCT: &str = "pct";
    pub const COMMENTARY: &str = "commentary";
    pub const FILE: &str = "file";
    pub const ERROR_FILE: &str = "error-file";
    pub const ERROR_FORM: &str = "error-form";
    pub const BTN_SEND_BILL: &str = "btn-send-bill";
}
