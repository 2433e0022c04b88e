//! Typed accessors over the provider payload.
//!
//! Providers report the same datum at different depths depending on the
//! API version and transaction kind. Each accessor probes one location;
//! callers compose them first-match-wins, and a present but malformed value
//! falls through to the next accessor.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::payment::decimal_from_value;

type Accessor = fn(&Value) -> Option<&Value>;

fn transaction_fee(response: &Value) -> Option<&Value> {
	response.pointer("/transaction/fee")
}

fn transaction_processing_fee(response: &Value) -> Option<&Value> {
	response.pointer("/transaction/processing/fee")
}

fn transaction_payment_fee(response: &Value) -> Option<&Value> {
	response.pointer("/transaction/payment/fee")
}

fn top_level_fee(response: &Value) -> Option<&Value> {
	response.get("fee")
}

const FEE_ACCESSORS: [Accessor; 4] = [
	transaction_fee,
	transaction_processing_fee,
	transaction_payment_fee,
	top_level_fee,
];

fn transaction_credit_card_country(response: &Value) -> Option<&Value> {
	response.pointer("/transaction/credit_card/issuer_country")
}

fn transaction_card_country(response: &Value) -> Option<&Value> {
	response.pointer("/transaction/card/issuer_country")
}

fn credit_card_country(response: &Value) -> Option<&Value> {
	response.pointer("/credit_card/issuer_country")
}

const ISSUER_COUNTRY_ACCESSORS: [Accessor; 3] = [
	transaction_credit_card_country,
	transaction_card_country,
	credit_card_country,
];

/// Provider-reported fee in minor units, if any accessor yields a positive
/// number.
pub fn provider_fee_minor(response: &Value) -> Option<Decimal> {
	FEE_ACCESSORS.iter().find_map(|accessor| {
		accessor(response)
			.and_then(decimal_from_value)
			.filter(|fee| *fee > Decimal::ZERO)
	})
}

/// Two-letter issuer country, upper-cased.
pub fn issuer_country(response: &Value) -> Option<String> {
	ISSUER_COUNTRY_ACCESSORS.iter().find_map(|accessor| {
		accessor(response)
			.and_then(Value::as_str)
			.map(str::trim)
			.filter(|country| !country.is_empty())
			.map(str::to_uppercase)
	})
}
