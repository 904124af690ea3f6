use super::models::ReceiptFile;

/// 受け付ける画像の拡張子
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// 画像以外が選択されたときに表示するメッセージ
pub const INVALID_FILE_MESSAGE: &str =
    "Seuls les fichiers images (jpg, jpeg ou png) sont acceptés";

/// 領収書ファイルが受け付け可能な画像かどうかを判定する
///
/// 拡張子（大文字小文字を区別しない）が jpg / jpeg / png のいずれか、
/// または申告されたMIMEタイプが `image/` で始まる場合にtrue。
/// ファイル未選択の場合はfalse。
pub fn is_accepted_image(file: Option<&ReceiptFile>) -> bool {
    let Some(file) = file else {
        return false;
    };

    let accepted_extension = file
        .extension()
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));

    accepted_extension || file.mime_type.to_lowercase().starts_with("image/")
}

/// ファイル名からContent-Typeを推定する
///
/// 申告されたMIMEタイプがない場合のアップロード用。
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
