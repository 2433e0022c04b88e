use async_trait::async_trait;
use log::debug;
use redis::{AsyncCommands, Client};

use crate::domain::fee_rule::FeeRuleTable;
use crate::domain::repository::FeeRuleRepository;

/// Stores the fee-rule table as a single JSON document under `key`.
#[derive(Clone)]
pub struct RedisFeeRuleRepository {
	client: Client,
	key:    String,
}

impl RedisFeeRuleRepository {
	pub fn new(client: Client, key: String) -> Self {
		Self { client, key }
	}

	async fn connection(
		&self,
	) -> Result<redis::aio::MultiplexedConnection, Box<dyn std::error::Error + Send>>
	{
		self.client
			.get_multiplexed_async_connection()
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)
	}
}

#[async_trait]
impl FeeRuleRepository for RedisFeeRuleRepository {
	async fn get(
		&self,
	) -> Result<Option<FeeRuleTable>, Box<dyn std::error::Error + Send>> {
		let mut con = self.connection().await?;

		let raw: Option<String> = con
			.get(&self.key)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;

		let Some(raw) = raw else {
			debug!("No fee rules stored under {}", self.key);
			return Ok(None);
		};

		let table: FeeRuleTable = serde_json::from_str(&raw)
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;
		Ok(Some(table))
	}

	async fn save(
		&self,
		table: FeeRuleTable,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut con = self.connection().await?;

		let serialized = serde_json::to_string(&table)
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;

		let _: () = con
			.set(&self.key, serialized)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;
		Ok(())
	}

	async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut con = self.connection().await?;

		let _: () = con
			.del(&self.key)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;
		Ok(())
	}
}
