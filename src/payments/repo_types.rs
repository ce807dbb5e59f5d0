use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::{OffsetDateTime, PrimitiveDateTime};

/// On-disk and on-screen payment date layout.
pub const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

time::serde::format_description!(payment_date, PrimitiveDateTime, DATE_FORMAT);

/// Payment record in the wallet document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub user_id: String, // username of the payer, not checked
    #[serde(
        serialize_with = "serialize_amount",
        deserialize_with = "deserialize_amount"
    )]
    pub amount: Decimal,
    pub description: String,
    #[serde(with = "payment_date")]
    pub date: PrimitiveDateTime,
}

impl Payment {
    /// Builds a payment stamped with the current wall-clock second.
    pub fn new(user_id: impl Into<String>, amount: Decimal, description: impl Into<String>) -> Self {
        Self::with_date(user_id, amount, description, now_timestamp())
    }

    pub fn with_date(
        user_id: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
        date: PrimitiveDateTime,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            description: description.into(),
            date,
        }
    }
}

/// Local time when the offset is known, UTC otherwise, truncated to seconds.
pub fn now_timestamp() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let now = now.replace_nanosecond(0).unwrap_or(now);
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Parses `12.50`, `12.5` or `1.25e1` style amount text.
pub fn parse_amount(text: &str) -> Result<Decimal, rust_decimal::Error> {
    let text = text.trim();
    Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text))
}

// A JSON number when the float reads back as the same decimal, otherwise
// the exact decimal text.
fn serialize_amount<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match amount.to_f64() {
        Some(value) if parse_amount(&value.to_string()).ok() == Some(*amount) => {
            serializer.serialize_f64(value)
        }
        _ => serializer.serialize_str(&amount.to_string()),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

// Accepts a JSON number or numeric text.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(n) => n.to_string(),
        RawAmount::Text(s) => s,
    };
    parse_amount(&text).map_err(|e| de::Error::custom(format!("invalid amount `{text}`: {e}")))
}
