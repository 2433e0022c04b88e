use std::borrow::Cow;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::domain::currency::Currency;
use crate::domain::status::{StatusClass, classify};

/// `transaction_type` labels that mark a standalone refund transaction.
pub const REFUND_MARKERS: [&str; 2] = ["возврат средств", "refund"];

/// Backing table a unified payment was merged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum RawSource {
	/// Primary ledger; may carry `total_refunded`.
	#[serde(rename = "payments_v2")]
	PaymentsV2,
	/// Reconciliation queue; may carry standalone refund transactions.
	#[serde(rename = "queue")]
	Queue,
	#[default]
	#[serde(rename = "other", other)]
	Other,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UnifiedPayment {
	#[serde(default)]
	pub uid:                 Option<String>,
	#[serde(default, deserialize_with = "lenient_decimal")]
	pub amount:              Option<Decimal>,
	#[serde(default)]
	pub currency:            Option<String>,
	#[serde(default)]
	pub status_normalized:   Option<String>,
	#[serde(default, deserialize_with = "lenient_decimal")]
	pub total_refunded:      Option<Decimal>,
	#[serde(default)]
	pub transaction_type:    Option<String>,
	#[serde(rename = "rawSource", default)]
	pub raw_source:          RawSource,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub provider_response:   Option<Value>,
	#[serde(default, deserialize_with = "lenient_decimal")]
	pub provider_fee_amount: Option<Decimal>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payment_method_type: Option<String>,
	#[serde(
		with = "time::serde::rfc3339::option",
		skip_serializing_if = "Option::is_none",
		default
	)]
	pub created_at:          Option<OffsetDateTime>,
}

impl UnifiedPayment {
	pub fn currency(&self) -> Currency {
		Currency::parse(self.currency.as_deref())
	}

	pub fn status(&self) -> StatusClass {
		classify(self.status_normalized.as_deref().unwrap_or_default())
	}

	/// Positive amount, or `None` when missing, malformed or non-positive.
	pub fn amount(&self) -> Option<Decimal> {
		self.amount.filter(|amount| amount.is_sign_positive() && !amount.is_zero())
	}

	pub fn total_refunded(&self) -> Option<Decimal> {
		self.total_refunded
			.filter(|amount| amount.is_sign_positive() && !amount.is_zero())
	}

	pub fn provider_fee_amount(&self) -> Option<Decimal> {
		self.provider_fee_amount
			.filter(|amount| amount.is_sign_positive() && !amount.is_zero())
	}

	pub fn is_refund_transaction(&self) -> bool {
		self.transaction_type.as_deref().is_some_and(|label| {
			let label = label.trim().to_lowercase();
			REFUND_MARKERS.contains(&label.as_str())
		})
	}

	/// Identity used to deduplicate refunds; blank uids carry none.
	pub fn refund_key(&self) -> Option<&str> {
		self.uid
			.as_deref()
			.map(str::trim)
			.filter(|uid| !uid.is_empty())
	}

	/// Provider payload as an object. Some sources store it stringified.
	pub fn provider_response(&self) -> Option<Cow<'_, Value>> {
		match self.provider_response.as_ref()? {
			Value::Object(_) => self.provider_response.as_ref().map(Cow::Borrowed),
			Value::String(raw) => match serde_json::from_str::<Value>(raw) {
				Ok(parsed @ Value::Object(_)) => Some(Cow::Owned(parsed)),
				_ => None,
			},
			_ => None,
		}
	}
}

/// Reads a JSON number or numeric string as a decimal. Everything else is
/// absent.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
	match value {
		Value::Number(number) => {
			let raw = number.to_string();
			Decimal::from_str(&raw)
				.or_else(|_| Decimal::from_scientific(&raw))
				.ok()
		}
		Value::String(raw) => {
			let raw = raw.trim().replace(',', ".");
			if raw.is_empty() {
				return None;
			}
			Decimal::from_str(&raw)
				.or_else(|_| Decimal::from_scientific(&raw))
				.ok()
		}
		_ => None,
	}
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value.as_ref().and_then(decimal_from_value))
}
