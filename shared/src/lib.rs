use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Default VAT percentage applied when the form leaves `pct` empty
pub const DEFAULT_PCT: u32 = 20;

/// Expense categories offered by the new bill form
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// An employee expense record as stored by the remote API.
///
/// Decoding is lenient field by field: a missing, null or oddly typed value
/// falls back to a default or to its raw text, so one damaged record never
/// fails a whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    /// Expense category, one of `EXPENSE_TYPES` for bills created here
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub expense_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    /// ISO date (`YYYY-MM-DD`) as typed in the date picker
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vat: String,
    #[serde(default = "default_pct", deserialize_with = "pct_or_default")]
    pub pct: u32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BillStatus,
    #[serde(default)]
    pub comment_admin: Option<String>,
}

fn default_pct() -> u32 {
    DEFAULT_PCT
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn pct_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u32>::deserialize(deserializer).map(|pct| pct.unwrap_or(DEFAULT_PCT))
}

/// Accept any scalar as text; null becomes an empty string
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientStringVisitor)
}

struct LenientStringVisitor;

impl<'de> Visitor<'de> for LenientStringVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, a number, a boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// Approval status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
    /// Any status string this client does not know about
    #[serde(other)]
    Other,
}

impl BillStatus {
    /// Label shown in the bills table
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused | BillStatus::Other => "Refused",
        }
    }
}

/// A bill with its date and status rewritten for display.
///
/// Derived from a [`Bill`] on every listing and never sent back to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedBill {
    pub id: String,
    pub email: String,
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    /// Short display date, or the raw value when it could not be parsed
    pub date: String,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: String,
}

impl FormattedBill {
    /// Build the display copy of `bill` using an already resolved date string
    pub fn new(bill: Bill, date: String) -> Self {
        Self {
            status: bill.status.label().to_string(),
            id: bill.id,
            email: bill.email,
            expense_type: bill.expense_type,
            name: bill.name,
            amount: bill.amount,
            date,
            vat: bill.vat,
            pct: bill.pct,
            commentary: bill.commentary,
            file_url: bill.file_url,
            file_name: bill.file_name,
        }
    }
}

/// Bill fields sent to the store when the new bill form is submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSubmission {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub status: BillStatus,
}

/// Response of the receipt upload call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReceipt {
    pub file_url: String,
    /// Store-assigned identifier of the bill being created
    pub key: String,
}

/// Kind of account stored in the session record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// Identity of the connected user, written to local storage at login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BillError {
    #[error("Invalid bill date: {0}")]
    InvalidDate(String),
    #[error("Unsupported receipt file: {0}")]
    UnsupportedReceipt(String),
}

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|date_time| date_time.date())
}

/// Format an ISO date as the short French display form, e.g. `2021-04-01` -> `1 Avr. 21`
pub fn format_date(raw: &str) -> Result<String, BillError> {
    let date = parse_bill_date(raw).ok_or_else(|| BillError::InvalidDate(raw.to_string()))?;
    let month = SHORT_MONTHS[date.month0() as usize];
    Ok(format!("{} {}. {:02}", date.day(), month, date.year().rem_euclid(100)))
}

/// Last segment of a selected file path, dropping any client-side directory prefix
pub fn receipt_file_name(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

/// Image formats accepted as receipts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptFormat {
    Jpg,
    Jpeg,
    Png,
}

impl ReceiptFormat {
    /// Detect the receipt format from the extension of `file_name` (case-insensitive)
    pub fn from_file_name(file_name: &str) -> Result<Self, BillError> {
        let name = receipt_file_name(file_name);
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "jpg" => Ok(ReceiptFormat::Jpg),
            "jpeg" => Ok(ReceiptFormat::Jpeg),
            "png" => Ok(ReceiptFormat::Png),
            _ => Err(BillError::UnsupportedReceipt(name.to_string())),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ReceiptFormat::Jpg | ReceiptFormat::Jpeg => "image/jpeg",
            ReceiptFormat::Png => "image/png",
        }
    }
}
