use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::analytics::summary::{PaymentsSummary, SummaryFilter};
use crate::domain::currency::Currency;
use crate::domain::fee_rule::FeeRuleTable;
use crate::domain::payment::UnifiedPayment;

#[derive(Debug, Clone, Default)]
pub struct GetPaymentsAnalyticsQuery {
	pub payments:  Vec<UnifiedPayment>,
	/// Overrides the stored table when present.
	pub fee_rules: Option<FeeRuleTable>,
	pub filter:    SummaryFilter,
	pub from:      Option<OffsetDateTime>,
	pub to:        Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsAnalyticsResult {
	#[serde(flatten)]
	pub summary:           PaymentsSummary,
	pub net_revenue:       Decimal,
	pub other_currencies:  BTreeMap<Currency, Decimal>,
	pub fee_rules_applied: bool,
	pub total_records:     usize,
	pub filter:            SummaryFilter,
	pub filtered_records:  usize,
}
