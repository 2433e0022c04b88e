use std::collections::BTreeMap;
use std::fmt;

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Upper-case currency code. Missing or blank codes fall back to BYN.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
	pub const DEFAULT_CODE: &'static str = "BYN";

	pub fn parse(code: Option<&str>) -> Self {
		match code.map(str::trim) {
			Some(code) if !code.is_empty() => Currency(code.to_uppercase()),
			_ => Currency::default(),
		}
	}

	/// Currency as written in a fee-rule selector. Blank stays blank.
	pub fn selector(code: &str) -> Self {
		Currency(code.trim().to_uppercase())
	}

	pub fn is_blank(&self) -> bool {
		self.0.is_empty()
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for Currency {
	fn default() -> Self {
		Currency(Self::DEFAULT_CODE.to_string())
	}
}

impl fmt::Display for Currency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Currency {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let code = String::deserialize(deserializer)?;
		Ok(Currency::parse(Some(&code)))
	}
}

impl From<&str> for Currency {
	fn from(code: &str) -> Self {
		Currency::parse(Some(code))
	}
}

/// Running totals per currency, keyed by code so output order is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTotals(BTreeMap<Currency, Decimal>);

impl CurrencyTotals {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `amount` to the currency's total. Returns `false` and leaves the
	/// total untouched when the sum would overflow.
	pub fn add(&mut self, currency: &Currency, amount: Decimal) -> bool {
		let total = self.0.entry(currency.clone()).or_insert(Decimal::ZERO);
		match total.checked_add(amount) {
			Some(sum) => {
				*total = sum;
				true
			}
			None => {
				warn!("{currency} total overflowed adding {amount}, contribution dropped");
				false
			}
		}
	}

	pub fn get(&self, currency: &Currency) -> Decimal {
		self.0.get(currency).copied().unwrap_or(Decimal::ZERO)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Currency, &Decimal)> {
		self.0.iter()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use rust_decimal_macros::dec;

	use super::*;

	#[test]
	fn test_parse_defaults_blank_and_missing_to_byn() {
		assert_eq!(Currency::parse(None).as_str(), "BYN");
		assert_eq!(Currency::parse(Some("   ")).as_str(), "BYN");
		assert_eq!(Currency::parse(Some(" usd ")).as_str(), "USD");
	}

	#[test]
	fn test_totals_accumulate_per_currency() {
		let mut totals = CurrencyTotals::new();
		let byn = Currency::from("BYN");
		let usd = Currency::from("usd");

		totals.add(&byn, dec!(10.50));
		totals.add(&byn, dec!(4.50));
		totals.add(&usd, dec!(3));

		assert_eq!(totals.get(&byn), dec!(15.00));
		assert_eq!(totals.get(&usd), dec!(3));
		assert_eq!(totals.get(&Currency::from("EUR")), Decimal::ZERO);
	}

	#[test]
	fn test_totals_drop_overflowing_contribution() {
		let mut totals = CurrencyTotals::new();
		let byn = Currency::default();

		assert!(totals.add(&byn, Decimal::MAX));
		assert!(!totals.add(&byn, dec!(1)));
		assert_eq!(totals.get(&byn), Decimal::MAX);

		assert!(totals.add(&byn, dec!(-1)));
		assert_eq!(totals.get(&byn), Decimal::MAX - dec!(1));
	}

	#[test]
	fn test_totals_serialize_as_code_map() {
		let mut totals = CurrencyTotals::new();
		totals.add(&Currency::from("USD"), dec!(1.25));

		let json = serde_json::to_value(&totals).unwrap();
		assert_eq!(json, serde_json::json!({ "USD": "1.25" }));
	}
}
