use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::fee_rule::FeeRuleTable;
use crate::domain::repository::FeeRuleRepository;

/// Process-local fee-rule store for tests and single-node setups.
#[derive(Clone, Default)]
pub struct InMemoryFeeRuleRepository {
	table: Arc<RwLock<Option<FeeRuleTable>>>,
}

impl InMemoryFeeRuleRepository {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl FeeRuleRepository for InMemoryFeeRuleRepository {
	async fn get(
		&self,
	) -> Result<Option<FeeRuleTable>, Box<dyn std::error::Error + Send>> {
		let table = self.table.read().unwrap_or_else(|e| e.into_inner());
		Ok(table.clone())
	}

	async fn save(
		&self,
		table: FeeRuleTable,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut stored = self.table.write().unwrap_or_else(|e| e.into_inner());
		*stored = Some(table);
		Ok(())
	}

	async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut stored = self.table.write().unwrap_or_else(|e| e.into_inner());
		*stored = None;
		Ok(())
	}
}
