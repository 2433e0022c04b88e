use std::collections::BTreeMap;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::currency_bucketer::pick_primary_currency;
use crate::analytics::fee_resolver::{FeeSource, resolve_fee};
use crate::analytics::refund_dedup::{RefundDeduplicator, is_queue_refund};
use crate::domain::currency::{Currency, CurrencyTotals};
use crate::domain::fee_rule::FeeRuleTable;
use crate::domain::payment::{RawSource, UnifiedPayment};
use crate::domain::status::StatusClass;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsSummary {
	pub successful:          CurrencyTotals,
	pub refunded:            CurrencyTotals,
	pub failed:              CurrencyTotals,
	pub fees:                CurrencyTotals,
	pub fees_known_count:    usize,
	pub fees_fallback_count: usize,
	/// Successful payments with no resolvable fee. Informational only.
	pub fees_unknown_count:  usize,
	pub primary_currency:    Currency,
}

impl PaymentsSummary {
	/// Successful minus refunded minus fees, in the primary currency only.
	/// Saturates at `Decimal::MIN` instead of overflowing.
	pub fn net_revenue(&self) -> Decimal {
		let currency = &self.primary_currency;
		self.successful
			.get(currency)
			.saturating_sub(self.refunded.get(currency))
			.saturating_sub(self.fees.get(currency))
	}

	/// Successful totals outside the primary currency, zero totals skipped.
	pub fn other_currencies(&self) -> BTreeMap<Currency, Decimal> {
		self.successful
			.iter()
			.filter(|(currency, total)| {
				**currency != self.primary_currency && !total.is_zero()
			})
			.map(|(currency, total)| (currency.clone(), *total))
			.collect()
	}
}

/// Folds a snapshot of unified payments into per-currency totals.
///
/// Never fails: malformed amounts contribute nothing, unclassified statuses
/// land in no bucket and an empty input yields zero totals in BYN.
pub fn build_summary(
	payments: &[UnifiedPayment],
	fee_rules: Option<&FeeRuleTable>,
) -> PaymentsSummary {
	let mut summary = PaymentsSummary {
		primary_currency: pick_primary_currency(payments),
		..Default::default()
	};
	let mut refunds = RefundDeduplicator::new(payments);

	for payment in payments {
		refunds.accumulate(payment, &mut summary.refunded);

		// Queue refund rows are money going back, not revenue or losses.
		if is_queue_refund(payment) {
			continue;
		}

		let currency = payment.currency();
		match payment.status() {
			StatusClass::Successful => {
				if let Some(amount) = payment.amount() {
					summary.successful.add(&currency, amount);
				}
				let fee = resolve_fee(payment, fee_rules);
				match fee.map(|fee| (summary.fees.add(&currency, fee.amount), fee.source)) {
					Some((true, FeeSource::Provider)) => summary.fees_known_count += 1,
					Some((true, FeeSource::Fallback)) => summary.fees_fallback_count += 1,
					_ => summary.fees_unknown_count += 1,
				}
			}
			StatusClass::Failed => {
				if let Some(amount) = payment.amount() {
					summary.failed.add(&currency, amount);
				}
			}
			StatusClass::Refunded | StatusClass::Unclassified => {}
		}
	}

	debug!(
		"Summarised {} payments: primary {}, fees known/fallback/unknown \
		 {}/{}/{}",
		payments.len(),
		summary.primary_currency,
		summary.fees_known_count,
		summary.fees_fallback_count,
		summary.fees_unknown_count
	);

	summary
}

/// Click-to-filter selection over the summary cards. Selecting a filter
/// only narrows the payment list shown next to the cards; totals are
/// unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFilter {
	Successful,
	Refunded,
	Failed,
	Fees,
	Net,
	#[default]
	None,
}

impl SummaryFilter {
	/// Clicking the active card clears the filter.
	pub fn toggle(self, clicked: SummaryFilter) -> SummaryFilter {
		if self == clicked {
			SummaryFilter::None
		} else {
			clicked
		}
	}

	pub fn matches(
		self,
		payment: &UnifiedPayment,
		fee_rules: Option<&FeeRuleTable>,
	) -> bool {
		let is_refund = is_queue_refund(payment);
		let has_refund = is_refund ||
			(payment.raw_source == RawSource::PaymentsV2 &&
				payment.total_refunded().is_some());
		let is_successful = !is_refund && payment.status() == StatusClass::Successful;

		match self {
			SummaryFilter::None => true,
			SummaryFilter::Successful => is_successful,
			SummaryFilter::Refunded => has_refund,
			SummaryFilter::Failed => {
				!is_refund && payment.status() == StatusClass::Failed
			}
			SummaryFilter::Fees => {
				is_successful && resolve_fee(payment, fee_rules).is_some()
			}
			SummaryFilter::Net => is_successful || has_refund,
		}
	}
}

#[cfg(test)]
mod tests {
	use rust_decimal_macros::dec;
	use serde_json::json;

	use super::*;
	use crate::domain::fee_rule::FeeRule;

	fn payment(
		uid: &str,
		amount: Decimal,
		currency: &str,
		status: &str,
		source: RawSource,
	) -> UnifiedPayment {
		UnifiedPayment {
			uid: Some(uid.to_string()),
			amount: Some(amount),
			currency: Some(currency.to_string()),
			status_normalized: Some(status.to_string()),
			raw_source: source,
			..Default::default()
		}
	}

	#[test]
	fn test_buckets_by_status_and_currency() {
		let payments = vec![
			UnifiedPayment {
				provider_fee_amount: Some(dec!(2)),
				..payment("a", dec!(100), "BYN", "successful", RawSource::PaymentsV2)
			},
			payment("b", dec!(50), "BYN", "succeeded", RawSource::Queue),
			payment("c", dec!(30), "USD", "successful", RawSource::PaymentsV2),
			payment("d", dec!(20), "BYN", "declined", RawSource::Queue),
			payment("e", dec!(999), "BYN", "processing", RawSource::PaymentsV2),
		];

		let summary = build_summary(&payments, None);
		let byn = Currency::from("BYN");
		let usd = Currency::from("USD");

		assert_eq!(summary.primary_currency, byn);
		assert_eq!(summary.successful.get(&byn), dec!(150));
		assert_eq!(summary.successful.get(&usd), dec!(30));
		assert_eq!(summary.failed.get(&byn), dec!(20));
		assert_eq!(summary.fees.get(&byn), dec!(2));
		assert_eq!(summary.fees_known_count, 1);
		assert_eq!(summary.fees_fallback_count, 0);
		assert_eq!(summary.fees_unknown_count, 2);
		assert_eq!(summary.net_revenue(), dec!(148));
	}

	#[test]
	fn test_refund_rows_stay_out_of_revenue_buckets() {
		let payments = vec![
			UnifiedPayment {
				total_refunded: Some(dec!(25)),
				provider_response: Some(json!({ "transaction": { "fee": 300 } })),
				..payment("tx-1", dec!(100), "BYN", "successful", RawSource::PaymentsV2)
			},
			UnifiedPayment {
				transaction_type: Some("refund".to_string()),
				..payment("tx-1", dec!(25), "BYN", "successful", RawSource::Queue)
			},
		];

		let summary = build_summary(&payments, None);
		let byn = Currency::default();

		assert_eq!(summary.successful.get(&byn), dec!(100));
		assert_eq!(summary.refunded.get(&byn), dec!(25));
		assert_eq!(summary.fees.get(&byn), dec!(3));
		assert_eq!(summary.fees_known_count, 1);
		assert_eq!(summary.net_revenue(), dec!(72));
	}

	#[test]
	fn test_other_currencies_skip_primary_and_zero_totals() {
		let payments = vec![
			payment("a", dec!(10), "BYN", "successful", RawSource::PaymentsV2),
			payment("b", dec!(10), "BYN", "successful", RawSource::PaymentsV2),
			payment("c", dec!(7), "EUR", "successful", RawSource::PaymentsV2),
			payment("d", dec!(5), "USD", "failed", RawSource::PaymentsV2),
		];

		let other = build_summary(&payments, None).other_currencies();
		assert_eq!(other.len(), 1);
		assert_eq!(other.get(&Currency::from("EUR")), Some(&dec!(7)));
	}

	#[test]
	fn test_net_revenue_may_go_negative() {
		let payments = vec![UnifiedPayment {
			total_refunded: Some(dec!(80)),
			..payment("a", dec!(50), "BYN", "refunded", RawSource::PaymentsV2)
		}];

		assert_eq!(build_summary(&payments, None).net_revenue(), dec!(-80));
	}

	#[test]
	fn test_overflowing_amounts_are_dropped() {
		let rules = FeeRuleTable::new(vec![FeeRule {
			channel:        None,
			issuer_country: None,
			currency:       None,
			percent:        dec!(100),
			fixed:          Decimal::ZERO,
			min_fee:        None,
		}]);
		let payments = vec![
			payment("a", Decimal::MAX, "BYN", "successful", RawSource::PaymentsV2),
			payment("b", Decimal::MAX, "BYN", "successful", RawSource::PaymentsV2),
			payment("c", dec!(10), "BYN", "successful", RawSource::Queue),
		];

		let summary = build_summary(&payments, Some(&rules));
		let byn = Currency::default();

		assert_eq!(summary.successful.get(&byn), Decimal::MAX);
		assert_eq!(summary.fees.get(&byn), dec!(10));
		assert_eq!(summary.fees_fallback_count, 1);
		assert_eq!(summary.fees_unknown_count, 2);
	}

	#[test]
	fn test_net_revenue_saturates() {
		let payments = vec![UnifiedPayment {
			total_refunded: Some(Decimal::MAX),
			provider_fee_amount: Some(Decimal::MAX),
			..payment("a", dec!(1), "BYN", "successful", RawSource::PaymentsV2)
		}];

		assert_eq!(build_summary(&payments, None).net_revenue(), Decimal::MIN);
	}

	#[test]
	fn test_refund_marker_outside_queue_is_classified_by_status() {
		let payments = vec![
			UnifiedPayment {
				transaction_type: Some("refund".to_string()),
				..payment("a", dec!(10), "BYN", "successful", RawSource::PaymentsV2)
			},
			UnifiedPayment {
				transaction_type: Some("Возврат средств".to_string()),
				..payment("b", dec!(4), "BYN", "declined", RawSource::Other)
			},
		];

		let summary = build_summary(&payments, None);
		let byn = Currency::default();

		assert_eq!(summary.successful.get(&byn), dec!(10));
		assert_eq!(summary.failed.get(&byn), dec!(4));
		assert!(summary.refunded.is_empty());
		assert_eq!(summary.fees_unknown_count, 1);
		assert!(SummaryFilter::Successful.matches(&payments[0], None));
		assert!(!SummaryFilter::Refunded.matches(&payments[0], None));
	}

	#[test]
	fn test_toggle_clears_active_filter() {
		let filter = SummaryFilter::None.toggle(SummaryFilter::Fees);
		assert_eq!(filter, SummaryFilter::Fees);
		assert_eq!(filter.toggle(SummaryFilter::Net), SummaryFilter::Net);
		assert_eq!(filter.toggle(SummaryFilter::Fees), SummaryFilter::None);
	}

	#[test]
	fn test_filter_matches_payment_kinds() {
		let successful = UnifiedPayment {
			provider_fee_amount: Some(dec!(1)),
			..payment("a", dec!(10), "BYN", "successful", RawSource::PaymentsV2)
		};
		let failed = payment("b", dec!(10), "BYN", "expired", RawSource::Queue);
		let refund = UnifiedPayment {
			transaction_type: Some("Возврат средств".to_string()),
			..payment("c", dec!(10), "BYN", "successful", RawSource::Queue)
		};

		assert!(SummaryFilter::Successful.matches(&successful, None));
		assert!(!SummaryFilter::Successful.matches(&refund, None));
		assert!(SummaryFilter::Failed.matches(&failed, None));
		assert!(SummaryFilter::Refunded.matches(&refund, None));
		assert!(SummaryFilter::Fees.matches(&successful, None));
		assert!(!SummaryFilter::Fees.matches(&failed, None));
		assert!(SummaryFilter::Net.matches(&refund, None));
		assert!(!SummaryFilter::Net.matches(&failed, None));
		assert!(SummaryFilter::None.matches(&failed, None));
	}
}
