//! 画面ドキュメントのアダプター
//!
//! コントローラーが画面を変更できるのはこの境界を通してだけ。
//! マウントされたマークアップ、動的なテキスト、イベントの紐付け、
//! 無効化された操作、ファイル入力欄の値、モーダルを保持する。

use super::routes::Route;
use crate::features::receipts::models::ReceiptFile;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// 要素に紐付けられる操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// 「新しい経費ノート」ボタン
    NewBill,
    /// 領収書のプレビュー（目のアイコン）
    PreviewReceipt { file_url: String },
    /// ファイル入力欄の変更
    ChangeFile,
    /// フォーム送信
    SubmitForm,
}

/// 画面ドキュメント
#[derive(Debug, Default)]
pub struct Document {
    route: Option<Route>,
    markup: String,
    bindings: HashMap<(String, usize), UiAction>,
    texts: HashMap<String, String>,
    values: HashMap<String, String>,
    disabled: HashSet<String>,
    file_input: Option<ReceiptFile>,
    modal: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// 画面全体を置き換える
    ///
    /// 以前の紐付け・テキスト・入力値・モーダルはすべて破棄される。
    pub fn mount(&mut self, route: Route, markup: String) {
        self.route = Some(route);
        self.markup = markup;
        self.bindings.clear();
        self.texts.clear();
        self.values.clear();
        self.disabled.clear();
        self.file_input = None;
        self.modal = None;
    }

    /// 現在マウントされている画面のルート
    pub fn route(&self) -> Option<Route> {
        self.route
    }

    /// 現在のマークアップ
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// 要素に操作を紐付ける（同じ要素への紐付けは置き換え）
    pub fn bind(&mut self, test_id: &str, index: usize, action: UiAction) {
        self.bindings.insert((test_id.to_string(), index), action);
    }

    /// 要素に紐付けられた操作
    pub fn binding(&self, test_id: &str, index: usize) -> Option<&UiAction> {
        self.bindings.get(&(test_id.to_string(), index))
    }

    /// 指定したテストIDの要素に紐付けられた操作の数
    pub fn binding_count(&self, test_id: &str) -> usize {
        self.bindings.keys().filter(|(id, _)| id == test_id).count()
    }

    /// 要素のテキストを設定する
    pub fn set_text(&mut self, test_id: &str, text: &str) {
        self.texts.insert(test_id.to_string(), text.to_string());
    }

    /// 要素のテキストを空にする
    pub fn clear_text(&mut self, test_id: &str) {
        self.texts.remove(test_id);
    }

    /// 要素のテキスト（未設定なら空文字列）
    pub fn text_content(&self, test_id: &str) -> &str {
        self.texts.get(test_id).map(String::as_str).unwrap_or("")
    }

    /// 入力欄の値を設定する
    pub fn set_value(&mut self, test_id: &str, value: &str) {
        self.values.insert(test_id.to_string(), value.to_string());
    }

    /// 入力欄の値（未設定なら空文字列）
    pub fn value(&self, test_id: &str) -> &str {
        self.values.get(test_id).map(String::as_str).unwrap_or("")
    }

    /// 操作の有効/無効を切り替える
    pub fn set_disabled(&mut self, test_id: &str, disabled: bool) {
        if disabled {
            self.disabled.insert(test_id.to_string());
        } else {
            self.disabled.remove(test_id);
        }
    }

    pub fn is_disabled(&self, test_id: &str) -> bool {
        self.disabled.contains(test_id)
    }

    /// ファイル入力欄の生の値を設定する
    pub fn set_file(&mut self, file: Option<ReceiptFile>) {
        self.file_input = file;
    }

    /// ファイル入力欄の生の値
    pub fn file(&self) -> Option<&ReceiptFile> {
        self.file_input.as_ref()
    }

    /// モーダルを開く（画面遷移はしない）
    pub fn open_modal(&mut self, body: String) {
        self.modal = Some(body);
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// 開いているモーダルの中身
    pub fn modal(&self) -> Option<&str> {
        self.modal.as_deref()
    }

    /// マークアップに指定した文字列が含まれるか
    pub fn contains_text(&self, text: &str) -> bool {
        self.markup.contains(text)
    }

    /// 指定したテストIDを持つ開始タグ
    fn tags(&self, test_id: &str) -> Vec<&str> {
        let pattern = format!(r#"<[^>]*\bdata-testid="{}"[^>]*>"#, regex::escape(test_id));
        match Regex::new(&pattern) {
            Ok(re) => re.find_iter(&self.markup).map(|m| m.as_str()).collect(),
            Err(e) => {
                log::warn!("要素の検索に失敗しました: test_id={test_id}, error={e}");
                Vec::new()
            }
        }
    }

    /// 指定したテストIDを持つ要素の数
    pub fn count_elements(&self, test_id: &str) -> usize {
        self.tags(test_id).len()
    }

    /// 指定したテストIDを持つ要素の属性値を出現順に返す
    pub fn attribute_values(&self, test_id: &str, attribute: &str) -> Vec<String> {
        let pattern = format!(r#"\b{}="([^"]*)""#, regex::escape(attribute));
        let Ok(re) = Regex::new(&pattern) else {
            return Vec::new();
        };
        self.tags(test_id)
            .into_iter()
            .filter_map(|tag| re.captures(tag).map(|caps| caps[1].to_string()))
            .collect()
    }

    /// 指定したテストIDの最初の要素がクラスを持つか
    pub fn has_class(&self, test_id: &str, class: &str) -> bool {
        self.attribute_values(test_id, "class")
            .first()
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r#"<div data-testid="icon-window" class="icon active-icon"></div>
<div data-testid="icon-mail" class=""></div>
<tr data-testid="bill-row"><td><time data-testid="bill-date" datetime="2004-04-04">4 Avr. 04</time></td></tr>
<tr data-testid="bill-row"><td><time data-testid="bill-date" datetime="2001-01-01">1 Jan. 01</time></td></tr>"#;

    fn mounted() -> Document {
        let mut document = Document::new();
        document.mount(Route::Bills, MARKUP.to_string());
        document
    }

    #[test]
    fn test_queries() {
        let document = mounted();
        assert_eq!(document.count_elements("bill-row"), 2);
        assert_eq!(
            document.attribute_values("bill-date", "datetime"),
            vec!["2004-04-04".to_string(), "2001-01-01".to_string()]
        );
        assert!(document.has_class("icon-window", "active-icon"));
        assert!(!document.has_class("icon-mail", "active-icon"));
        assert!(!document.has_class("missing", "active-icon"));
        assert!(document.contains_text("4 Avr. 04"));
    }

    #[test]
    fn test_bind_replaces_existing_binding() {
        let mut document = mounted();
        document.bind("btn-new-bill", 0, UiAction::NewBill);
        document.bind("btn-new-bill", 0, UiAction::NewBill);
        assert_eq!(document.binding_count("btn-new-bill"), 1);
        assert_eq!(document.binding("btn-new-bill", 0), Some(&UiAction::NewBill));
        assert_eq!(document.binding("btn-new-bill", 1), None);
    }

    #[test]
    fn test_mount_resets_dynamic_state() {
        let mut document = mounted();
        document.bind("icon-eye", 0, UiAction::PreviewReceipt {
            file_url: "https://example.com/a.jpg".to_string(),
        });
        document.set_text("error-file", "mauvais fichier");
        document.set_disabled("btn-send-bill", true);
        document.open_modal("<img>".to_string());

        document.mount(Route::NewBill, String::new());

        assert_eq!(document.route(), Some(Route::NewBill));
        assert_eq!(document.binding_count("icon-eye"), 0);
        assert_eq!(document.text_content("error-file"), "");
        assert!(!document.is_disabled("btn-send-bill"));
        assert!(document.modal().is_none());
    }

    #[test]
    fn test_text_toggle() {
        let mut document = mounted();
        document.set_text("error-file", "a");
        document.set_text("error-file", "b");
        assert_eq!(document.text_content("error-file"), "b");
        document.clear_text("error-file");
        assert_eq!(document.text_content("error-file").len(), 0);
    }
}
