use super::form::{FormEvent, FormField, NewBillForm, SubmissionState};
use crate::features::auth::Session;
use crate::features::bills::models::{Bill, CreateBillDto};
use crate::features::bills::repository::BillsRepository;
use crate::features::receipts::{
    is_accepted_image, ReceiptFile, UploadedReceipt, INVALID_FILE_MESSAGE,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::ui::{test_ids, Document, NavigationService, RenderingService, Route, UiAction};
use log::{info, warn};
use std::sync::Arc;

/// 経費ノート作成画面のコントローラー
///
/// 一回の送信を `Editing -> Validating -> Uploading -> Submitting -> Done`
/// の順に進める。領収書のアップロードが終わるまで作成は始めない。
pub struct NewBillController {
    repository: Arc<dyn BillsRepository>,
    renderer: Arc<dyn RenderingService>,
    navigator: Arc<dyn NavigationService>,
    session: Arc<Session>,
    form: NewBillForm,
    /// 検証を通った領収書
    receipt: Option<ReceiptFile>,
    /// アップロード済みの領収書。作成に失敗した再送信では再アップロードしない
    uploaded: Option<UploadedReceipt>,
    state: SubmissionState,
}

impl NewBillController {
    pub fn new(
        repository: Arc<dyn BillsRepository>,
        renderer: Arc<dyn RenderingService>,
        navigator: Arc<dyn NavigationService>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            repository,
            renderer,
            navigator,
            session,
            form: NewBillForm::default(),
            receipt: None,
            uploaded: None,
            state: SubmissionState::Editing,
        }
    }

    /// フォーム画面を表示し、ファイル入力欄と送信に紐付ける
    pub fn mount(&mut self, document: &mut Document) -> AppResult<()> {
        document.mount(Route::NewBill, self.renderer.render_form()?);
        document.bind(test_ids::FILE, 0, UiAction::ChangeFile);
        document.bind(test_ids::FORM_NEW_BILL, 0, UiAction::SubmitForm);
        for field in FormField::ALL {
            document.set_value(field.test_id(), self.form.get(field));
        }
        self.state = SubmissionState::Editing;
        Ok(())
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn form(&self) -> &NewBillForm {
        &self.form
    }

    /// 送信中かどうか
    pub fn is_submitting(&self) -> bool {
        self.state.is_in_flight()
    }

    /// 入力欄の変更
    pub fn handle_change_field(&mut self, document: &mut Document, field: FormField, value: &str) {
        if self.is_submitting() {
            warn!("送信中の入力は無視します: field={}", field.test_id());
            return;
        }
        self.form.set(field, value);
        document.set_value(field.test_id(), value);
        self.state = SubmissionState::Editing;
    }

    /// ファイル入力欄の変更
    ///
    /// 画像以外のファイルは入力欄には残るが、送信には使われない。
    ///
    /// # 戻り値
    /// ファイルを受け付けた場合はtrue
    pub fn handle_change_file(&mut self, document: &mut Document, file: Option<ReceiptFile>) -> bool {
        if self.is_submitting() {
            warn!("送信中のファイル変更は無視します");
            return false;
        }

        self.state = SubmissionState::Validating;
        document.set_file(file.clone());
        self.uploaded = None;

        if is_accepted_image(file.as_ref()) {
            document.clear_text(test_ids::ERROR_FILE);
            self.receipt = file;
            self.state = SubmissionState::Editing;
            true
        } else {
            let name = file.as_ref().map(|f| f.file_name().to_string()).unwrap_or_default();
            warn!("画像以外のファイルが選択されました: file_name={name}");
            document.set_text(test_ids::ERROR_FILE, INVALID_FILE_MESSAGE);
            self.receipt = None;
            self.state = SubmissionState::Rejected;
            false
        }
    }

    /// フォーム送信
    ///
    /// 既定の送信動作は必ず抑止する。失敗した場合はメッセージを表示して
    /// 入力値を保ったまま編集状態に戻る。成功した場合は一覧画面へ遷移する。
    pub async fn handle_submit(
        &mut self,
        document: &mut Document,
        event: &mut FormEvent,
    ) -> AppResult<Bill> {
        event.prevent_default();

        if self.is_submitting() || document.is_disabled(test_ids::BTN_SEND_BILL) {
            warn!("送信中のため送信を無視します: state={:?}", self.state);
            return Err(AppError::validation("Envoi déjà en cours"));
        }

        self.state = SubmissionState::Validating;
        document.clear_text(test_ids::ERROR_FORM);

        let Some(file) = self.receipt.clone() else {
            let error = AppError::validation(INVALID_FILE_MESSAGE);
            return Err(self.fail(document, test_ids::ERROR_FILE, error));
        };

        let draft = match self.form.to_draft(&self.session.email) {
            Ok(draft) => draft,
            Err(e) => return Err(self.fail(document, test_ids::ERROR_FORM, e)),
        };

        document.set_disabled(test_ids::BTN_SEND_BILL, true);

        let uploaded = match self.uploaded.clone() {
            Some(uploaded) => {
                info!("アップロード済みの領収書を再利用します: key={:?}", uploaded.key);
                uploaded
            }
            None => {
                self.state = SubmissionState::Uploading;
                let result = self.repository.upload_file(&file, &self.session.email).await;
                let uploaded = match result {
                    Ok(uploaded) => uploaded,
                    Err(e) => return Err(self.fail(document, test_ids::ERROR_FORM, e)),
                };
                info!("領収書をアップロードしました: file_url={}", uploaded.file_url);
                self.uploaded = Some(uploaded.clone());
                uploaded
            }
        };

        self.state = SubmissionState::Submitting;
        let dto = match CreateBillDto::new(draft, uploaded) {
            Ok(dto) => dto,
            Err(e) => {
                self.uploaded = None;
                return Err(self.fail(document, test_ids::ERROR_FORM, e));
            }
        };
        let created = self.repository.create_bill(dto).await;
        let bill = match created {
            Ok(bill) => bill,
            Err(e) => return Err(self.fail(document, test_ids::ERROR_FORM, e)),
        };

        self.uploaded = None;
        document.set_disabled(test_ids::BTN_SEND_BILL, false);
        self.state = SubmissionState::Done;
        info!("経費ノートを作成しました: id={}", bill.id);

        self.navigator.on_navigate(Route::Bills);
        Ok(bill)
    }

    /// 送信を中断してメッセージを表示し、編集状態に戻す
    fn fail(&mut self, document: &mut Document, target: &str, error: AppError) -> AppError {
        error.log("経費ノート送信エラー");
        document.set_text(target, error.user_message());
        document.set_disabled(test_ids::BTN_SEND_BILL, false);
        self.state = SubmissionState::Editing;
        error
    }
}
