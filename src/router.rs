//! 画面ルーター
//!
//! ナビゲーターに積まれた遷移要求を取り出し、対応するコントローラーを
//! 作り直して画面を入れ替える。イベントは現在の画面のコントローラーにだけ渡す。

use crate::features::auth::Session;
use crate::features::bills::{Bill, BillsListController, BillsRepository};
use crate::features::new_bill::{FormEvent, FormField, NewBillController};
use crate::features::receipts::ReceiptFile;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::ui::{
    test_ids, Document, NavigationService, Navigator, RenderingService, Route, UiAction,
};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// 現在表示中の画面
enum ActiveView {
    Idle,
    Bills(BillsListController),
    NewBill(NewBillController),
}

/// フォーム送信の結果
#[derive(Debug)]
pub struct FormSubmission {
    pub event: FormEvent,
    /// 送信が無視された場合はNone
    pub outcome: Option<AppResult<Bill>>,
}

pub struct Router {
    repository: Arc<dyn BillsRepository>,
    renderer: Arc<dyn RenderingService>,
    session: Arc<Session>,
    navigator: Arc<Navigator>,
    receiver: UnboundedReceiver<Route>,
    document: Document,
    view: ActiveView,
}

impl Router {
    /// 従業員のセッションでルーターを作成する
    pub fn new(
        repository: Arc<dyn BillsRepository>,
        renderer: Arc<dyn RenderingService>,
        session: Arc<Session>,
    ) -> AppResult<Self> {
        if !session.is_employee() {
            return Err(AppError::session(format!(
                "従業員以外のユーザーです: {}",
                session.email
            )));
        }

        let (navigator, receiver) = Navigator::channel();
        Ok(Self {
            repository,
            renderer,
            session,
            navigator: Arc::new(navigator),
            receiver,
            document: Document::new(),
            view: ActiveView::Idle,
        })
    }

    /// 指定したルートへ遷移し、その後に積まれた遷移要求もすべて処理する
    pub async fn on_navigate(&mut self, route: Route) -> AppResult<()> {
        self.mount(route).await?;
        self.drain_navigation().await
    }

    /// パスで遷移する（不明なパスは一覧画面）
    pub async fn navigate_path(&mut self, path: &str) -> AppResult<()> {
        let route = Route::from_path(path).unwrap_or_else(|| {
            warn!("不明なパスです。一覧画面を表示します: path={path}");
            Route::Bills
        });
        self.on_navigate(route).await
    }

    pub fn current_route(&self) -> Option<Route> {
        self.document.route()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// 積まれている遷移要求を順に処理する
    pub async fn drain_navigation(&mut self) -> AppResult<()> {
        while let Ok(route) = self.receiver.try_recv() {
            self.mount(route).await?;
        }
        Ok(())
    }

    async fn mount(&mut self, route: Route) -> AppResult<()> {
        info!("画面を表示します: path={}", route.path());
        let navigator: Arc<dyn NavigationService> = self.navigator.clone();

        match route {
            Route::Bills => {
                let controller = BillsListController::new(
                    self.repository.clone(),
                    self.renderer.clone(),
                    navigator,
                );
                self.view = ActiveView::Idle;
                controller.activate(&mut self.document).await?;
                self.view = ActiveView::Bills(controller);
            }
            Route::NewBill => {
                let mut controller = NewBillController::new(
                    self.repository.clone(),
                    self.renderer.clone(),
                    navigator,
                    self.session.clone(),
                );
                controller.mount(&mut self.document)?;
                self.view = ActiveView::NewBill(controller);
            }
        }
        Ok(())
    }

    /// 要素のクリック
    ///
    /// # 戻り値
    /// クリックが処理された場合はtrue
    pub async fn click(&mut self, test_id: &str, index: usize) -> AppResult<bool> {
        let Some(action) = self.document.binding(test_id, index).cloned() else {
            debug!("紐付けのない要素のクリック: test_id={test_id}, index={index}");
            return Ok(false);
        };

        let handled = match (&self.view, action) {
            (ActiveView::Bills(controller), UiAction::NewBill) => {
                controller.handle_click_new_bill();
                true
            }
            (ActiveView::Bills(controller), UiAction::PreviewReceipt { file_url }) => {
                controller.handle_click_icon_eye(&mut self.document, &file_url)?;
                true
            }
            _ => false,
        };

        self.drain_navigation().await?;
        Ok(handled)
    }

    /// 入力欄の変更
    pub fn change_field(&mut self, test_id: &str, value: &str) -> bool {
        let (ActiveView::NewBill(controller), Some(field)) =
            (&mut self.view, FormField::from_test_id(test_id))
        else {
            debug!("フォーム以外の入力は無視します: test_id={test_id}");
            return false;
        };
        controller.handle_change_field(&mut self.document, field, value);
        true
    }

    /// ファイル入力欄の変更
    ///
    /// # 戻り値
    /// ファイルが受け付けられた場合はtrue
    pub fn change_file(&mut self, file: Option<ReceiptFile>) -> bool {
        if self.document.binding(test_ids::FILE, 0) != Some(&UiAction::ChangeFile) {
            debug!("ファイル入力欄がありません");
            return false;
        }
        match &mut self.view {
            ActiveView::NewBill(controller) => controller.handle_change_file(&mut self.document, file),
            _ => false,
        }
    }

    /// フォーム送信
    ///
    /// 送信ボタンが無効な間の送信は既定動作だけ抑止して無視する。
    pub async fn submit(&mut self) -> AppResult<FormSubmission> {
        let mut event = FormEvent::new();

        if self.document.binding(test_ids::FORM_NEW_BILL, 0) != Some(&UiAction::SubmitForm) {
            debug!("送信できるフォームがありません");
            return Ok(FormSubmission {
                event,
                outcome: None,
            });
        }

        let outcome = match &mut self.view {
            ActiveView::NewBill(controller) => {
                if controller.is_submitting() || self.document.is_disabled(test_ids::BTN_SEND_BILL)
                {
                    event.prevent_default();
                    warn!("送信中のため送信を無視します");
                    None
                } else {
                    Some(controller.handle_submit(&mut self.document, &mut event).await)
                }
            }
            _ => None,
        };

        self.drain_navigation().await?;
        Ok(FormSubmission { event, outcome })
    }
}
