use std::error::Error;

use log::info;

use crate::domain::fee_rule::FeeRuleTable;
use crate::domain::repository::FeeRuleRepository;

#[derive(Clone)]
pub struct GetFeeRulesUseCase<R: FeeRuleRepository> {
	repository: R,
}

impl<R: FeeRuleRepository> GetFeeRulesUseCase<R> {
	pub fn new(repository: R) -> Self {
		Self { repository }
	}

	pub async fn execute(&self) -> Result<FeeRuleTable, Box<dyn Error + Send>> {
		Ok(self.repository.get().await?.unwrap_or_default())
	}
}

#[derive(Clone)]
pub struct SaveFeeRulesUseCase<R: FeeRuleRepository> {
	repository: R,
}

impl<R: FeeRuleRepository> SaveFeeRulesUseCase<R> {
	pub fn new(repository: R) -> Self {
		Self { repository }
	}

	pub async fn execute(
		&self,
		table: FeeRuleTable,
	) -> Result<(), Box<dyn Error + Send>> {
		table
			.validate()
			.map_err(|e| Box::new(e) as Box<dyn Error + Send>)?;

		let rules = table.rules().len();
		self.repository.save(table).await?;
		info!("Stored {rules} fee rules");
		Ok(())
	}
}

#[derive(Clone)]
pub struct PurgeFeeRulesUseCase<R: FeeRuleRepository> {
	repository: R,
}

impl<R: FeeRuleRepository> PurgeFeeRulesUseCase<R> {
	pub fn new(repository: R) -> Self {
		Self { repository }
	}

	pub async fn execute(&self) -> Result<(), Box<dyn Error + Send>> {
		self.repository.clear().await
	}
}
