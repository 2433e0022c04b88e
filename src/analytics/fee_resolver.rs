use log::trace;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::provider_response::{issuer_country, provider_fee_minor};
use crate::domain::fee_rule::{Channel, FeeRuleTable};
use crate::domain::payment::UnifiedPayment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeSource {
	Provider,
	Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFee {
	pub amount: Decimal,
	pub source: FeeSource,
}

/// Resolves the processing fee of a successful payment.
///
/// Priority: fee reported inside the provider payload (minor units), then
/// the flat `provider_fee_amount`, then the fallback rule table. Returns
/// `None` when no step yields a positive fee; a missing rule table skips the
/// fallback step.
pub fn resolve_fee(
	payment: &UnifiedPayment,
	fee_rules: Option<&FeeRuleTable>,
) -> Option<ResolvedFee> {
	let provider_response = payment.provider_response();

	if let Some(fee_minor) = provider_response.as_deref().and_then(provider_fee_minor) {
		return Some(ResolvedFee {
			amount: fee_minor / Decimal::ONE_HUNDRED,
			source: FeeSource::Provider,
		});
	}

	if let Some(fee) = payment.provider_fee_amount() {
		return Some(ResolvedFee {
			amount: fee,
			source: FeeSource::Provider,
		});
	}

	let fee_rules = fee_rules?;
	let amount = payment.amount()?;
	let channel = Channel::derive(payment);
	let country = provider_response.as_deref().and_then(issuer_country);

	let fee = fee_rules.fallback_fee(
		amount,
		&payment.currency(),
		channel,
		country.as_deref(),
	);
	trace!(
		"Fallback fee for {:?} via {channel:?}/{country:?}: {fee:?}",
		payment.uid
	);

	fee.map(|amount| ResolvedFee {
		amount,
		source: FeeSource::Fallback,
	})
}
