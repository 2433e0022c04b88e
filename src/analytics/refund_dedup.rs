use std::collections::HashSet;

use log::debug;

use crate::domain::currency::CurrencyTotals;
use crate::domain::payment::{RawSource, UnifiedPayment};
use crate::domain::status::StatusClass;

/// Counts each refund once even when it shows up both as `total_refunded`
/// on a ledger payment and as a standalone refund row in the queue.
///
/// Ledger uids with a refund are indexed up front, so the outcome does not
/// depend on whether the ledger row or the queue row comes first.
#[derive(Debug, Default)]
pub struct RefundDeduplicator {
	ledger_refund_uids: HashSet<String>,
	counted_uids:       HashSet<String>,
}

impl RefundDeduplicator {
	pub fn new(payments: &[UnifiedPayment]) -> Self {
		let ledger_refund_uids = payments
			.iter()
			.filter(|payment| is_ledger_refund(payment))
			.filter_map(|payment| payment.refund_key())
			.map(str::to_string)
			.collect();

		Self {
			ledger_refund_uids,
			counted_uids: HashSet::new(),
		}
	}

	pub fn accumulate(&mut self, payment: &UnifiedPayment, refunded: &mut CurrencyTotals) {
		if is_ledger_refund(payment) {
			if let Some(refund) = payment.total_refunded() &&
				self.claim(payment.refund_key())
			{
				refunded.add(&payment.currency(), refund);
			}
			return;
		}

		if is_queue_refund(payment) {
			if payment
				.refund_key()
				.is_some_and(|uid| self.ledger_refund_uids.contains(uid))
			{
				debug!(
					"Queue refund {:?} already reported by the ledger, skipping",
					payment.uid
				);
				return;
			}

			if let Some(refund) = payment.amount.map(|amount| amount.abs()) &&
				!refund.is_zero() &&
				self.claim(payment.refund_key())
			{
				refunded.add(&payment.currency(), refund);
			}
		}
	}

	/// Marks a uid as counted. Returns `false` if it already was; rows
	/// without a uid are always counted.
	fn claim(&mut self, uid: Option<&str>) -> bool {
		match uid {
			Some(uid) => self.counted_uids.insert(uid.to_string()),
			None => true,
		}
	}
}

fn is_ledger_refund(payment: &UnifiedPayment) -> bool {
	payment.raw_source == RawSource::PaymentsV2 && payment.total_refunded().is_some()
}

pub fn is_queue_refund(payment: &UnifiedPayment) -> bool {
	payment.raw_source == RawSource::Queue &&
		(payment.is_refund_transaction() || payment.status() == StatusClass::Refunded)
}
