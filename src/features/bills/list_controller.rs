use super::models::{sort_by_date_desc, Bill};
use super::repository::BillsRepository;
use crate::shared::errors::AppResult;
use crate::shared::ui::{
    test_ids, BillRow, BillsPage, Document, NavigationService, RenderingService, Route, UiAction,
};
use crate::shared::utils::{format_amount, format_date};
use std::sync::Arc;

/// 経費ノート一覧画面のコントローラー
pub struct BillsListController {
    repository: Arc<dyn BillsRepository>,
    renderer: Arc<dyn RenderingService>,
    navigator: Arc<dyn NavigationService>,
}

impl BillsListController {
    pub fn new(
        repository: Arc<dyn BillsRepository>,
        renderer: Arc<dyn RenderingService>,
        navigator: Arc<dyn NavigationService>,
    ) -> Self {
        Self {
            repository,
            renderer,
            navigator,
        }
    }

    /// 経費ノートを取得し、日付の新しい順に並べ替えて表示用に整形する
    pub async fn get_bills(&self) -> AppResult<Vec<BillRow>> {
        let mut bills = self.repository.list_bills().await?;
        sort_by_date_desc(&mut bills);
        Ok(bills.iter().map(to_row).collect())
    }

    /// 一覧画面を表示する
    ///
    /// 読み込み中画面を表示してから取得し、一覧またはエラー画面に置き換える。
    /// 取得の失敗は画面に表示し、描画の失敗だけを返す。
    pub async fn activate(&self, document: &mut Document) -> AppResult<()> {
        document.mount(Route::Bills, self.renderer.render_loading()?);

        let page = match self.get_bills().await {
            Ok(rows) => BillsPage::Loaded(rows),
            Err(e) => {
                e.log("経費ノート一覧取得エラー");
                BillsPage::Failed(e.user_message().to_string())
            }
        };

        document.mount(Route::Bills, self.renderer.render_list(&page)?);
        if let BillsPage::Loaded(rows) = &page {
            document.bind(test_ids::BTN_NEW_BILL, 0, UiAction::NewBill);
            for (index, row) in rows.iter().enumerate() {
                document.bind(
                    test_ids::ICON_EYE,
                    index,
                    UiAction::PreviewReceipt {
                        file_url: row.file_url.clone(),
                    },
                );
            }
            log::info!("経費ノート一覧を表示しました: count={}", rows.len());
        }
        Ok(())
    }

    /// 「新しい経費ノート」ボタン：作成フォームへ遷移するだけ
    pub fn handle_click_new_bill(&self) {
        self.navigator.on_navigate(Route::NewBill);
    }

    /// 目のアイコン：領収書をモーダルで表示する（画面遷移はしない）
    pub fn handle_click_icon_eye(&self, document: &mut Document, file_url: &str) -> AppResult<()> {
        let modal = self.renderer.render_receipt_modal(file_url)?;
        document.open_modal(modal);
        Ok(())
    }
}

fn to_row(bill: &Bill) -> BillRow {
    BillRow {
        id: bill.id.clone(),
        expense_type: bill.expense_type.clone(),
        name: bill.name.clone(),
        date: format_date(&bill.date),
        iso_date: bill.date.clone(),
        amount: format_amount(bill.amount),
        status: bill.status.label().to_string(),
        file_url: bill.file_url.clone(),
    }
}
