pub mod nanoid;

use crate::shared::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// ISO形式（YYYY-MM-DD）の日付
static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(19|20)\d\d-(0[1-9]|1[012])-(0[1-9]|[12][0-9]|3[01])$")
        .expect("ISO日付の正規表現が不正です")
});

/// フランス式（DD/MM/YYYY）の日付
static FRENCH_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("日付の正規表現が不正です")
});

/// 月の短縮表記（表示用）
const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// 税率の既定値（%）
pub const DEFAULT_PCT: f64 = 20.0;

/// 入力された日付をISO形式に正規化する
///
/// # 引数
/// * `input` - 日付入力欄の値（YYYY-MM-DD または DD/MM/YYYY）
///
/// # 戻り値
/// ISO形式の日付文字列、または不正な場合はバリデーションエラー
pub fn normalize_date(input: &str) -> AppResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::validation("La date est obligatoire"));
    }

    let date = if ISO_DATE.is_match(input) {
        NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
    } else if let Some(caps) = FRENCH_DATE.captures(input) {
        let day = caps[1].parse::<u32>().ok();
        let month = caps[2].parse::<u32>().ok();
        let year = caps[3].parse::<i32>().ok();
        match (year, month, day) {
            (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d),
            _ => None,
        }
    } else {
        None
    };

    date.map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| AppError::validation(format!("Date invalide: {input}")))
}

/// ISO形式の日付を一覧表示用の短い形式に整形する（例: `4 Avr. 04`）
///
/// 解析できない場合は元の文字列をそのまま返す。
pub fn format_date(iso_date: &str) -> String {
    match NaiveDate::parse_from_str(iso_date, "%Y-%m-%d") {
        Ok(date) => format!(
            "{} {}. {:02}",
            date.day(),
            SHORT_MONTHS[date.month0() as usize],
            date.year().rem_euclid(100)
        ),
        Err(e) => {
            log::warn!("日付の整形に失敗しました。そのまま表示します: date={iso_date}, error={e}");
            iso_date.to_string()
        }
    }
}

/// 金額を表示用に整形する（例: `400 €`）
pub fn format_amount(amount: f64) -> String {
    format!("{amount} €")
}

/// 数値入力欄の値を解析する（小数点はカンマも受け付ける）
fn parse_number(input: &str) -> Option<f64> {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// 金額のバリデーションと変換
///
/// # 戻り値
/// 数値に変換した金額、または空・数値でない場合はバリデーションエラー
pub fn parse_amount(input: &str) -> AppResult<f64> {
    if input.trim().is_empty() {
        return Err(AppError::validation("Le montant est obligatoire"));
    }
    parse_number(input).ok_or_else(|| AppError::validation(format!("Montant invalide: {input}")))
}

/// 税率のバリデーションと変換
///
/// 空欄の場合は既定値20を返す。
pub fn parse_pct(input: &str) -> AppResult<f64> {
    if input.trim().is_empty() {
        return Ok(DEFAULT_PCT);
    }
    parse_number(input)
        .ok_or_else(|| AppError::validation(format!("Pourcentage invalide: {input}")))
}

/// 任意入力欄の値を正規化する（空欄はNone）
pub fn optional_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date_iso() {
        assert_eq!(normalize_date("2020-08-11").unwrap(), "2020-08-11");
        assert_eq!(normalize_date(" 2004-04-04 ").unwrap(), "2004-04-04");
    }

    #[test]
    fn test_normalize_date_french_form() {
        assert_eq!(normalize_date("11/08/2020").unwrap(), "2020-08-11");
        assert_eq!(normalize_date("1/2/2021").unwrap(), "2021-02-01");
    }

    #[test]
    fn test_normalize_date_invalid() {
        assert!(matches!(normalize_date(""), Err(AppError::Validation(_))));
        assert!(matches!(
            normalize_date("2020-02-30"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            normalize_date("31/02/2020"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            normalize_date("août 2020"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2004-04-04"), "4 Avr. 04");
        assert_eq!(format_date("2020-08-11"), "11 Aoû. 20");
        assert_eq!(format_date("2001-01-01"), "1 Jan. 01");
        assert_eq!(format_date("2023-12-25"), "25 Déc. 23");
    }

    #[test]
    fn test_format_date_keeps_unparsable_value() {
        assert_eq!(format_date("pas une date"), "pas une date");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(400.0), "400 €");
        assert_eq!(format_amount(180.5), "180.5 €");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("180").unwrap(), 180.0);
        assert_eq!(parse_amount("12,5").unwrap(), 12.5);
        assert!(matches!(parse_amount(""), Err(AppError::Validation(_))));
        assert!(matches!(parse_amount("abc"), Err(AppError::Validation(_))));
        assert!(matches!(parse_amount("inf"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_pct_defaults_to_20() {
        assert_eq!(parse_pct("").unwrap(), DEFAULT_PCT);
        assert_eq!(parse_pct("   ").unwrap(), DEFAULT_PCT);
        assert_eq!(parse_pct("10").unwrap(), 10.0);
        assert!(matches!(parse_pct("vingt"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(""), None);
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" 10 "), Some("10".to_string()));
    }
}
