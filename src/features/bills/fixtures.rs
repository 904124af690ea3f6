//! テスト用の経費ノートデータ

use super::models::{Bill, BillDraft, BillStatus};

#[allow(clippy::too_many_arguments)]
fn bill(
    id: &str,
    expense_type: &str,
    name: &str,
    amount: f64,
    date: &str,
    vat: Option<&str>,
    status: BillStatus,
    file_name: &str,
) -> Bill {
    Bill {
        id: id.to_string(),
        email: "a@a".to_string(),
        expense_type: expense_type.to_string(),
        name: name.to_string(),
        amount,
        date: date.to_string(),
        vat: vat.map(str::to_string),
        pct: 20.0,
        commentary: None,
        file_url: format!("https://test.storage.tld/v0/b/billable/o/justificatifs%2F{file_name}"),
        file_name: file_name.to_string(),
        status,
        comment_admin: None,
    }
}

/// 保存順（日付順ではない）に並んだ4件の経費ノート
pub fn fixture_bills() -> Vec<Bill> {
    vec![
        bill(
            "47qAXb6fIm2zOKkLzMro",
            "Hôtel et logement",
            "encore",
            400.0,
            "2004-04-04",
            Some("80"),
            BillStatus::Pending,
            "preview-facture-free-201801-pdf-1.jpg",
        ),
        bill(
            "BeKy5Mo4jkmdfPGYpTxZ",
            "Transports",
            "test1",
            100.0,
            "2001-01-01",
            None,
            BillStatus::Refused,
            "1592770761.jpeg",
        ),
        bill(
            "UIUZtnPQvnbFnB0ozvJh",
            "Services en ligne",
            "test3",
            300.0,
            "2003-03-03",
            Some("60"),
            BillStatus::Accepted,
            "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
        ),
        bill(
            "qcCK3SzECmaZAGRrHjaC",
            "Restaurants et bars",
            "test2",
            200.0,
            "2002-02-02",
            Some("40"),
            BillStatus::Refused,
            "preview-facture-free-201801-pdf-1.jpg",
        ),
    ]
}

/// 完全に入力されたフォームに相当する検証済みの値
pub fn valid_draft() -> BillDraft {
    BillDraft {
        email: "employee@test.tld".to_string(),
        expense_type: "Hôtel et logement".to_string(),
        name: "Lisa Hotel".to_string(),
        amount: 180.0,
        date: "2020-08-11".to_string(),
        vat: Some("10".to_string()),
        pct: 20.0,
        commentary: Some("...".to_string()),
    }
}
