use crate::features::receipts::models::UploadedReceipt;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::DEFAULT_PCT;
use serde::{Deserialize, Deserializer, Serialize};

/// 経費ノートの状態（バックオフィスが更新する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// 一覧に表示するラベル
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }
}

/// フォームで選択できる経費の種類
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// 経費ノートデータモデル
///
/// バックエンドにはアップロード直後の下書き（名前・金額・日付がnull）が
/// 残ることがあるため、nullは既定値として読み込む。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub expense_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    /// ISO形式（YYYY-MM-DD）
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub vat: Option<String>,
    #[serde(default = "default_pct", deserialize_with = "null_as_default_pct")]
    pub pct: f64,
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BillStatus,
    /// バックオフィスのコメント（読み取り専用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

impl Bill {
    /// 名前・日付・領収書のいずれかが欠けた記録（未確定の下書きなど）
    pub fn is_incomplete(&self) -> bool {
        self.name.trim().is_empty() || self.date.trim().is_empty() || self.file_url.trim().is_empty()
    }
}

fn default_pct() -> f64 {
    DEFAULT_PCT
}

/// nullを既定値として読み込む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_pct<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_PCT))
}

/// 数値・文字列のどちらで届いても文字列として保持する
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// 経費ノート作成用DTO
///
/// アップロード済みの領収書を必ず保持するため、領収書なしの
/// 経費ノートは構築できない。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillDto {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: Option<String>,
    pub pct: f64,
    pub commentary: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub status: BillStatus,
    /// 下書きID（アップロード時にバックエンドが払い出した場合）
    #[serde(skip)]
    pub draft_key: Option<String>,
}

impl CreateBillDto {
    /// 検証済みのフォーム値とアップロード済み領収書から作成DTOを組み立てる
    ///
    /// 領収書のURLまたはファイル名が空の場合はアップロードエラー。
    pub fn new(draft: BillDraft, receipt: UploadedReceipt) -> AppResult<Self> {
        if receipt.file_url.trim().is_empty() || receipt.file_name.trim().is_empty() {
            return Err(AppError::upload("Justificatif manquant: fichier non enregistré"));
        }

        Ok(Self {
            email: draft.email,
            expense_type: draft.expense_type,
            name: draft.name,
            amount: draft.amount,
            date: draft.date,
            vat: draft.vat,
            pct: draft.pct,
            commentary: draft.commentary,
            file_url: receipt.file_url,
            file_name: receipt.file_name,
            status: BillStatus::Pending,
            draft_key: receipt.key,
        })
    }

    /// IDを割り当てて経費ノートにする
    pub fn into_bill(self, id: String) -> Bill {
        Bill {
            id,
            email: self.email,
            expense_type: self.expense_type,
            name: self.name,
            amount: self.amount,
            date: self.date,
            vat: self.vat,
            pct: self.pct,
            commentary: self.commentary,
            file_url: self.file_url,
            file_name: self.file_name,
            status: self.status,
            comment_admin: None,
        }
    }
}

/// フォーム値を検証した結果（領収書アップロード前）
#[derive(Debug, Clone, PartialEq)]
pub struct BillDraft {
    pub email: String,
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: Option<String>,
    pub pct: f64,
    pub commentary: Option<String>,
}

/// 経費ノートを日付の降順（新しい順）に並べ替える
///
/// ISO形式の日付は文字列比較で時系列順になる。同じ日付は元の順序を保つ。
pub fn sort_by_date_desc(bills: &mut [Bill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn bill_dated(id: &str, date: &str) -> Bill {
        Bill {
            id: id.to_string(),
            email: "employee@test.tld".to_string(),
            expense_type: "Transports".to_string(),
            name: id.to_string(),
            amount: 10.0,
            date: date.to_string(),
            vat: None,
            pct: 20.0,
            commentary: None,
            file_url: "https://example.com/r.jpg".to_string(),
            file_name: "r.jpg".to_string(),
            status: BillStatus::Pending,
            comment_admin: None,
        }
    }

    #[test]
    fn test_bill_deserialization_from_backend() {
        let json = r#"{
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": 80,
            "fileUrl": "https://example.com/facture.jpg",
            "status": "pending",
            "type": "Hôtel et logement",
            "commentary": "séminaire billed",
            "name": "encore",
            "fileName": "facture.jpg",
            "date": "2004-04-04",
            "amount": 400,
            "commentAdmin": "ok",
            "email": "a@a"
        }"#;

        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.expense_type, "Hôtel et logement");
        assert_eq!(bill.vat, Some("80".to_string()));
        assert_eq!(bill.pct, 20.0);
        assert_eq!(bill.amount, 400.0);
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.comment_admin.as_deref(), Some("ok"));
    }

    #[test]
    fn test_empty_vat_is_none() {
        let json = r#"{"id":"x","email":"a@a","type":"Transports","name":"n","amount":1,
            "date":"2001-01-01","vat":"","fileUrl":"u","fileName":"f","status":"refused"}"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.vat, None);
        assert_eq!(bill.status, BillStatus::Refused);
    }

    #[test]
    fn test_create_dto_serialization_uses_wire_names() {
        let draft = BillDraft {
            email: "employee@test.tld".to_string(),
            expense_type: "Transports".to_string(),
            name: "Train".to_string(),
            amount: 42.0,
            date: "2021-03-01".to_string(),
            vat: Some("7".to_string()),
            pct: 20.0,
            commentary: None,
        };
        let receipt = UploadedReceipt {
            file_url: "https://example.com/billet.png".to_string(),
            file_name: "billet.png".to_string(),
            key: Some("draft-1".to_string()),
        };

        let dto = CreateBillDto::new(draft, receipt).unwrap();
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["type"], "Transports");
        assert_eq!(json["fileUrl"], "https://example.com/billet.png");
        assert_eq!(json["status"], "pending");
        // 下書きIDは送信しない
        assert!(json.get("draftKey").is_none());
        assert_eq!(dto.draft_key.as_deref(), Some("draft-1"));
    }

    #[test]
    fn test_draft_with_null_fields_is_readable() {
        let json = r#"{"id":"draft-1","email":"a@a","type":null,"name":null,"amount":null,
            "date":null,"vat":null,"pct":null,"commentary":null,
            "fileUrl":"https://example.com/f.png","fileName":"f.png","status":null}"#;

        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.name, "");
        assert_eq!(bill.amount, 0.0);
        assert_eq!(bill.date, "");
        assert_eq!(bill.pct, 20.0);
        assert_eq!(bill.status, BillStatus::Pending);
        assert!(bill.is_incomplete());
    }

    #[test]
    fn test_create_dto_requires_uploaded_file() {
        let draft = BillDraft {
            email: "employee@test.tld".to_string(),
            expense_type: "Transports".to_string(),
            name: "Train".to_string(),
            amount: 42.0,
            date: "2021-03-01".to_string(),
            vat: None,
            pct: 20.0,
            commentary: None,
        };
        let empty_url = UploadedReceipt {
            file_url: " ".to_string(),
            file_name: "billet.png".to_string(),
            key: None,
        };
        let empty_name = UploadedReceipt {
            file_url: "https://example.com/billet.png".to_string(),
            file_name: String::new(),
            key: None,
        };

        assert!(matches!(
            CreateBillDto::new(draft.clone(), empty_url),
            Err(AppError::Upload(_))
        ));
        assert!(matches!(
            CreateBillDto::new(draft, empty_name),
            Err(AppError::Upload(_))
        ));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(BillStatus::Pending.label(), "En attente");
        assert_eq!(BillStatus::Accepted.label(), "Accepté");
        assert_eq!(BillStatus::Refused.label(), "Refusé");
    }

    #[test]
    fn test_sort_is_antichronological_and_stable() {
        let mut bills = vec![
            bill_dated("a", "2001-01-01"),
            bill_dated("b", "2004-04-04"),
            bill_dated("c", "2001-01-01"),
            bill_dated("d", "2003-03-03"),
        ];
        sort_by_date_desc(&mut bills);

        let ids: Vec<&str> = bills.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[quickcheck]
    fn prop_sorted_dates_are_descending(days: Vec<u16>) -> bool {
        let epoch = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let mut bills: Vec<Bill> = days
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let date = epoch + chrono::Duration::days(i64::from(*d % 9000));
                bill_dated(&i.to_string(), &date.format("%Y-%m-%d").to_string())
            })
            .collect();
        sort_by_date_desc(&mut bills);

        bills.windows(2).all(|w| w[0].date >= w[1].date)
    }
}
