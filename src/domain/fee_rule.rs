use derive_more::{Display, Error};
use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::currency::Currency;
use crate::domain::payment::UnifiedPayment;

const WALLET_METHODS: [&str; 4] = ["apple_pay", "google_pay", "samsung_pay", "token"];
const CARD_METHODS: [&str; 2] = ["credit_card", "card"];
const ERIP_MARKERS: [&str; 2] = ["erip", "ерип"];

/// Acquiring channel a payment went through, as far as fee rules care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
	Card,
	Erip,
	Wallet,
	Other,
}

impl Channel {
	pub fn derive(payment: &UnifiedPayment) -> Channel {
		let provider_response = payment.provider_response();
		let transaction = provider_response
			.as_deref()
			.and_then(|response| response.get("transaction"));

		let method = payment.payment_method_type.as_deref().or_else(|| {
			transaction
				.and_then(|tx| tx.get("payment_method_type"))
				.and_then(|method| method.as_str())
		});

		if let Some(channel) = method.and_then(Channel::from_method) {
			return channel;
		}

		if payment.transaction_type.as_deref().is_some_and(|label| {
			let label = label.to_lowercase();
			ERIP_MARKERS.iter().any(|marker| label.contains(marker))
		}) {
			return Channel::Erip;
		}

		if transaction.is_some_and(|tx| tx.get("credit_card").is_some_and(|card| card.is_object())) {
			return Channel::Card;
		}

		Channel::Other
	}

	fn from_method(method: &str) -> Option<Channel> {
		let method = method.trim().to_lowercase();
		if ERIP_MARKERS.contains(&method.as_str()) {
			Some(Channel::Erip)
		} else if WALLET_METHODS.contains(&method.as_str()) {
			Some(Channel::Wallet)
		} else if CARD_METHODS.contains(&method.as_str()) {
			Some(Channel::Card)
		} else {
			None
		}
	}
}

/// One fee formula. Missing selectors match anything.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRule {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub channel:        Option<Channel>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub issuer_country: Option<String>,
	#[serde(
		default,
		deserialize_with = "selector_currency",
		skip_serializing_if = "Option::is_none"
	)]
	pub currency:       Option<Currency>,
	/// Percentage of the amount, `2.5` meaning 2.5%.
	pub percent:        Decimal,
	#[serde(default)]
	pub fixed:          Decimal,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_fee:        Option<Decimal>,
}

impl FeeRule {
	fn matches(
		&self,
		channel: Channel,
		issuer_country: Option<&str>,
		currency: &Currency,
	) -> bool {
		let channel_ok = self.channel.is_none_or(|c| c == channel);
		let country_ok = match (&self.issuer_country, issuer_country) {
			(None, _) => true,
			(Some(expected), Some(actual)) => expected.eq_ignore_ascii_case(actual),
			(Some(_), None) => false,
		};
		let currency_ok = self.currency.as_ref().is_none_or(|c| c == currency);

		channel_ok && country_ok && currency_ok
	}

	fn specificity(&self) -> usize {
		[
			self.channel.is_some(),
			self.issuer_country.is_some(),
			self.currency.is_some(),
		]
		.into_iter()
		.filter(|selector| *selector)
		.count()
	}

	/// `max(amount * percent / 100 + fixed, min_fee)`, rounded to cents.
	/// `None` when the arithmetic overflows.
	pub fn apply(&self, amount: Decimal) -> Option<Decimal> {
		let Some(fee) = amount
			.checked_mul(self.percent)
			.and_then(|fee| fee.checked_div(Decimal::ONE_HUNDRED))
			.and_then(|fee| fee.checked_add(self.fixed))
		else {
			warn!("Fee rule overflowed on amount {amount}, no fallback fee");
			return None;
		};
		let fee = match self.min_fee {
			Some(min_fee) if fee < min_fee => min_fee,
			_ => fee,
		};
		Some(fee.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
	}
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum FeeRuleValidationError {
	#[display("Rule #{index}: percent must be between 0 and 100.")]
	PercentOutOfRange { index: usize },
	#[display("Rule #{index}: fixed and minimum fees cannot be negative.")]
	NegativeFee { index: usize },
	#[display("Rule #{index}: selectors cannot be blank.")]
	BlankSelector { index: usize },
}

/// Fallback fee formulas keyed by (channel, issuer country, currency).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FeeRuleTable {
	rules: Vec<FeeRule>,
}

impl FeeRuleTable {
	pub fn new(rules: Vec<FeeRule>) -> Self {
		Self { rules }
	}

	pub fn rules(&self) -> &[FeeRule] {
		&self.rules
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Most specific matching rule; earlier rules win ties.
	pub fn find(
		&self,
		channel: Channel,
		issuer_country: Option<&str>,
		currency: &Currency,
	) -> Option<&FeeRule> {
		self.rules
			.iter()
			.filter(|rule| rule.matches(channel, issuer_country, currency))
			.fold(None, |best: Option<&FeeRule>, rule| match best {
				Some(current) if current.specificity() >= rule.specificity() => {
					Some(current)
				}
				_ => Some(rule),
			})
	}

	pub fn fallback_fee(
		&self,
		amount: Decimal,
		currency: &Currency,
		channel: Channel,
		issuer_country: Option<&str>,
	) -> Option<Decimal> {
		let fee = self.find(channel, issuer_country, currency)?.apply(amount)?;
		(fee > Decimal::ZERO).then_some(fee)
	}

	pub fn validate(&self) -> Result<(), FeeRuleValidationError> {
		for (index, rule) in self.rules.iter().enumerate() {
			if rule.percent < Decimal::ZERO || rule.percent > Decimal::ONE_HUNDRED {
				return Err(FeeRuleValidationError::PercentOutOfRange { index });
			}
			if rule.fixed < Decimal::ZERO ||
				rule.min_fee.is_some_and(|min_fee| min_fee < Decimal::ZERO)
			{
				return Err(FeeRuleValidationError::NegativeFee { index });
			}
			if rule
				.issuer_country
				.as_deref()
				.is_some_and(|country| country.trim().is_empty()) ||
				rule.currency.as_ref().is_some_and(Currency::is_blank)
			{
				return Err(FeeRuleValidationError::BlankSelector { index });
			}
		}
		Ok(())
	}
}

/// Keeps a blank currency selector blank so validation can reject it.
fn selector_currency<'de, D>(deserializer: D) -> Result<Option<Currency>, D::Error>
where
	D: Deserializer<'de>,
{
	let code = Option::<String>::deserialize(deserializer)?;
	Ok(code.as_deref().map(Currency::selector))
}
