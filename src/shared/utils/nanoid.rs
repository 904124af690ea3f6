use nanoid::nanoid;

/// 経費ノートID用のnanoIdを生成する
///
/// # 戻り値
/// 20文字のURL-safeなnanoId（バックエンドが払い出すIDと同じ長さ）
pub fn generate_bill_id() -> String {
    nanoid!(BILL_ID_LENGTH)
}

/// 経費ノートIDの長さ
pub const BILL_ID_LENGTH: usize = 20;

/// nanoIdが有効な形式かどうかを検証する
///
/// # 検証条件
/// - 長さが20文字
/// - URL-safe文字（A-Za-z0-9_-）のみを含む
pub fn is_valid_bill_id(id: &str) -> bool {
    id.len() == BILL_ID_LENGTH
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
