use async_trait::async_trait;

use crate::domain::fee_rule::FeeRuleTable;

/// Integration-settings store holding the fallback fee-rule table.
#[async_trait]
pub trait FeeRuleRepository: Send + Sync + 'static {
	async fn get(
		&self,
	) -> Result<Option<FeeRuleTable>, Box<dyn std::error::Error + Send>>;
	async fn save(
		&self,
		table: FeeRuleTable,
	) -> Result<(), Box<dyn std::error::Error + Send>>;
	async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send>>;
}
