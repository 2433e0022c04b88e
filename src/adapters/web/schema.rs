use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::analytics::summary::SummaryFilter;
use crate::domain::fee_rule::FeeRuleTable;
use crate::domain::payment::UnifiedPayment;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsAnalyticsRequest {
	pub payments:  Vec<UnifiedPayment>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fee_rules: Option<FeeRuleTable>,
	#[serde(default)]
	pub filter:    SummaryFilter,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AnalyticsWindowFilter {
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub from: Option<OffsetDateTime>,
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub to:   Option<OffsetDateTime>,
}
