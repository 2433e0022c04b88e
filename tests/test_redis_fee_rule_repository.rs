use payments_analytics::config::DEFAULT_FEE_RULES_KEY;
use payments_analytics::domain::fee_rule::{Channel, FeeRule, FeeRuleTable};
use payments_analytics::domain::repository::FeeRuleRepository;
use payments_analytics::infrastructure::persistence::redis_fee_rule_repository::RedisFeeRuleRepository;
use redis::AsyncCommands;
use rust_decimal_macros::dec;

mod support;

use crate::support::redis_container::get_test_redis_client;

fn sample_table() -> FeeRuleTable {
	FeeRuleTable::new(vec![
		FeeRule {
			channel:        Some(Channel::Card),
			issuer_country: Some("BY".to_string()),
			currency:       None,
			percent:        dec!(1.8),
			fixed:          dec!(0),
			min_fee:        Some(dec!(0.2)),
		},
		FeeRule {
			channel:        None,
			issuer_country: None,
			currency:       None,
			percent:        dec!(2.5),
			fixed:          dec!(0.1),
			min_fee:        None,
		},
	])
}

#[tokio::test]
async fn test_get_returns_none_when_nothing_stored() {
	let redis_container = get_test_redis_client().await;
	let repo = RedisFeeRuleRepository::new(
		redis_container.client.clone(),
		DEFAULT_FEE_RULES_KEY.to_string(),
	);

	assert_eq!(repo.get().await.unwrap(), None);
}

#[tokio::test]
async fn test_save_then_get_round_trips_table() {
	let redis_container = get_test_redis_client().await;
	let repo = RedisFeeRuleRepository::new(
		redis_container.client.clone(),
		DEFAULT_FEE_RULES_KEY.to_string(),
	);

	repo.save(sample_table()).await.unwrap();

	assert_eq!(repo.get().await.unwrap(), Some(sample_table()));
}

#[tokio::test]
async fn test_reads_table_written_by_settings_page() {
	let redis_container = get_test_redis_client().await;
	let mut con = redis_container
		.client()
		.get_multiplexed_async_connection()
		.await
		.unwrap();
	let _: () = con
		.set(
			DEFAULT_FEE_RULES_KEY,
			r#"[{"channel":"erip","percent":"1.2","fixed":0.05}]"#,
		)
		.await
		.unwrap();

	let repo = RedisFeeRuleRepository::new(
		redis_container.client.clone(),
		DEFAULT_FEE_RULES_KEY.to_string(),
	);
	let table = repo.get().await.unwrap().unwrap();

	assert_eq!(table.rules().len(), 1);
	assert_eq!(table.rules()[0].channel, Some(Channel::Erip));
	assert_eq!(table.rules()[0].percent, dec!(1.2));
	assert_eq!(table.rules()[0].fixed, dec!(0.05));
}

#[tokio::test]
async fn test_clear_removes_table() {
	let redis_container = get_test_redis_client().await;
	let repo = RedisFeeRuleRepository::new(
		redis_container.client.clone(),
		DEFAULT_FEE_RULES_KEY.to_string(),
	);

	repo.save(sample_table()).await.unwrap();
	repo.clear().await.unwrap();

	assert_eq!(repo.get().await.unwrap(), None);

	let mut con = redis_container
		.client()
		.get_multiplexed_async_connection()
		.await
		.unwrap();
	let exists: bool = con.exists(DEFAULT_FEE_RULES_KEY).await.unwrap();
	assert!(!exists);
}

#[tokio::test]
async fn test_get_fails_on_corrupt_document() {
	let redis_container = get_test_redis_client().await;
	let mut con = redis_container
		.client()
		.get_multiplexed_async_connection()
		.await
		.unwrap();
	let _: () = con.set(DEFAULT_FEE_RULES_KEY, "not json").await.unwrap();

	let repo = RedisFeeRuleRepository::new(
		redis_container.client.clone(),
		DEFAULT_FEE_RULES_KEY.to_string(),
	);

	assert!(repo.get().await.is_err());
}
