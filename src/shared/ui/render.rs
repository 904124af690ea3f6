use super::routes::Route;
use super::view_models::{BillsPage, NewBillFormView};
use crate::features::bills::models::EXPENSE_TYPES;
use crate::shared::errors::AppResult;
use tera::{Context, Tera};

const LAYOUT_TEMPLATE: &str = include_str!("../../../templates/layout.html");
const BILLS_TEMPLATE: &str = include_str!("../../../templates/bills.html");
const NEW_BILL_TEMPLATE: &str = include_str!("../../../templates/new_bill.html");
const LOADING_TEMPLATE: &str = include_str!("../../../templates/loading.html");
const ERROR_TEMPLATE: &str = include_str!("../../../templates/error.html");
const RECEIPT_MODAL_TEMPLATE: &str = include_str!("../../../templates/receipt_modal.html");

/// モーダル内の領収書画像の幅（px）
const RECEIPT_IMAGE_WIDTH: u32 = 500;

/// 画面描画サービス
///
/// ビューモデルからマークアップを生成する純粋な変換のみを行う。
pub trait RenderingService: Send + Sync {
    /// 一覧画面（一覧またはエラー）
    fn render_list(&self, page: &BillsPage) -> AppResult<String>;

    /// 経費ノート作成フォーム
    fn render_form(&self) -> AppResult<String>;

    /// 読み込み中画面
    fn render_loading(&self) -> AppResult<String>;

    /// エラー画面
    fn render_error(&self, message: &str) -> AppResult<String>;

    /// 領収書プレビューのモーダル
    fn render_receipt_modal(&self, file_url: &str) -> AppResult<String>;
}

/// teraテンプレートによるHTML描画
#[derive(Debug)]
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    /// 組み込みテンプレートを読み込んでレンダラーを作成する
    pub fn new() -> AppResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", LAYOUT_TEMPLATE),
            ("bills.html", BILLS_TEMPLATE),
            ("new_bill.html", NEW_BILL_TEMPLATE),
            ("loading.html", LOADING_TEMPLATE),
            ("error.html", ERROR_TEMPLATE),
            ("receipt_modal.html", RECEIPT_MODAL_TEMPLATE),
        ])?;
        log::debug!("テンプレートを読み込みました");
        Ok(Self { tera })
    }

    fn layout_context(active: Route) -> Context {
        let mut context = Context::new();
        context.insert("active", active.key());
        context
    }
}

impl RenderingService for HtmlRenderer {
    fn render_list(&self, page: &BillsPage) -> AppResult<String> {
        match page {
            BillsPage::Loaded(rows) => {
                let mut context = Self::layout_context(Route::Bills);
                context.insert("rows", rows);
                Ok(self.tera.render("bills.html", &context)?)
            }
            BillsPage::Failed(message) => self.render_error(message),
        }
    }

    fn render_form(&self) -> AppResult<String> {
        let view = NewBillFormView {
            expense_types: EXPENSE_TYPES.iter().map(|t| t.to_string()).collect(),
        };
        let mut context = Self::layout_context(Route::NewBill);
        context.insert("expense_types", &view.expense_types);
        Ok(self.tera.render("new_bill.html", &context)?)
    }

    fn render_loading(&self) -> AppResult<String> {
        let context = Self::layout_context(Route::Bills);
        Ok(self.tera.render("loading.html", &context)?)
    }

    fn render_error(&self, message: &str) -> AppResult<String> {
        let mut context = Self::layout_context(Route::Bills);
        context.insert("message", message);
        Ok(self.tera.render("error.html", &context)?)
    }

    fn render_receipt_modal(&self, file_url: &str) -> AppResult<String> {
        let mut context = Context::new();
        context.insert("file_url", file_url);
        context.insert("width", &RECEIPT_IMAGE_WIDTH);
        Ok(self.tera.render("receipt_modal.html", &context)?)
    }
}
