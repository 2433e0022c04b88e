use log::{info, warn};
use time::OffsetDateTime;

use crate::analytics::summary::build_summary;
use crate::domain::fee_rule::FeeRuleTable;
use crate::domain::payment::UnifiedPayment;
use crate::domain::repository::FeeRuleRepository;
use crate::use_cases::dto::{GetPaymentsAnalyticsQuery, PaymentsAnalyticsResult};

#[derive(Clone)]
pub struct GetPaymentsAnalyticsUseCase<R: FeeRuleRepository> {
	fee_rule_repo: R,
}

impl<R: FeeRuleRepository> GetPaymentsAnalyticsUseCase<R> {
	pub fn new(fee_rule_repo: R) -> Self {
		Self { fee_rule_repo }
	}

	/// Aggregation is total: an unreachable fee-rule store only disables the
	/// fallback fee step.
	pub async fn execute(
		&self,
		query: GetPaymentsAnalyticsQuery,
	) -> PaymentsAnalyticsResult {
		let GetPaymentsAnalyticsQuery {
			payments,
			fee_rules,
			filter,
			from,
			to,
		} = query;

		let fee_rules = match fee_rules {
			Some(table) => Some(table),
			None => self.load_fee_rules().await,
		};
		let fee_rules = fee_rules.filter(|table| !table.is_empty());

		let payments: Vec<UnifiedPayment> = payments
			.into_iter()
			.filter(|payment| within_window(payment, from, to))
			.collect();

		let summary = build_summary(&payments, fee_rules.as_ref());
		let filtered_records = payments
			.iter()
			.filter(|payment| filter.matches(payment, fee_rules.as_ref()))
			.count();

		info!(
			"Payments analytics over {} records: primary {}, net revenue {}",
			payments.len(),
			summary.primary_currency,
			summary.net_revenue()
		);

		PaymentsAnalyticsResult {
			net_revenue: summary.net_revenue(),
			other_currencies: summary.other_currencies(),
			fee_rules_applied: fee_rules.is_some(),
			total_records: payments.len(),
			filter,
			filtered_records,
			summary,
		}
	}

	async fn load_fee_rules(&self) -> Option<FeeRuleTable> {
		match self.fee_rule_repo.get().await {
			Ok(table) => table,
			Err(e) => {
				warn!("Fee rules unavailable, skipping fallback fees: {e}");
				None
			}
		}
	}
}

/// Payments without `created_at` were already scoped by the caller and are
/// kept.
fn within_window(
	payment: &UnifiedPayment,
	from: Option<OffsetDateTime>,
	to: Option<OffsetDateTime>,
) -> bool {
	let Some(created_at) = payment.created_at else {
		return true;
	};
	from.is_none_or(|from| created_at >= from) && to.is_none_or(|to| created_at <= to)
}
