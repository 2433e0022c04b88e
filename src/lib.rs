use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use log::info;

use crate::adapters::web::errors::{json_error_handler, query_error_handler};
use crate::adapters::web::routes::routes;
use crate::config::Config;
use crate::infrastructure::persistence::redis_fee_rule_repository::RedisFeeRuleRepository;
use crate::use_cases::fee_rules::{
	GetFeeRulesUseCase, PurgeFeeRulesUseCase, SaveFeeRulesUseCase,
};
use crate::use_cases::get_payments_analytics::GetPaymentsAnalyticsUseCase;

pub mod config;
pub mod adapters {
	pub mod web {
		pub mod errors;
		pub mod fee_rules_handler;
		pub mod payments_analytics_handler;
		pub mod routes;
		pub mod schema;
	}
}
pub mod analytics {
	pub mod currency_bucketer;
	pub mod fee_resolver;
	pub mod provider_response;
	pub mod refund_dedup;
	pub mod summary;
}
pub mod domain {
	pub mod currency;
	pub mod fee_rule;
	pub mod payment;
	pub mod repository;
	pub mod status;
}
pub mod infrastructure {
	pub mod persistence {
		pub mod in_memory_fee_rule_repository;
		pub mod redis_fee_rule_repository;
	}
}
pub mod use_cases {
	pub mod dto;
	pub mod fee_rules;
	pub mod get_payments_analytics;
}

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	let redis_client = redis::Client::open(config.redis_url.as_str())
		.map_err(std::io::Error::other)?;

	let fee_rule_repo =
		RedisFeeRuleRepository::new(redis_client, config.fee_rules_key.clone());

	let get_payments_analytics_use_case =
		GetPaymentsAnalyticsUseCase::new(fee_rule_repo.clone());
	let get_fee_rules_use_case = GetFeeRulesUseCase::new(fee_rule_repo.clone());
	let save_fee_rules_use_case = SaveFeeRulesUseCase::new(fee_rule_repo.clone());
	let purge_fee_rules_use_case = PurgeFeeRulesUseCase::new(fee_rule_repo);

	let max_payload_bytes = config.max_payload_bytes;

	info!(
		"Starting Actix-Web server on {}:{}...",
		config.server_host, config.server_port
	);
	HttpServer::new(move || {
		App::new()
			.app_data(
				web::JsonConfig::default()
					.limit(max_payload_bytes)
					.error_handler(json_error_handler),
			)
			.app_data(web::QueryConfig::default().error_handler(query_error_handler))
			.app_data(web::Data::new(get_payments_analytics_use_case.clone()))
			.app_data(web::Data::new(get_fee_rules_use_case.clone()))
			.app_data(web::Data::new(save_fee_rules_use_case.clone()))
			.app_data(web::Data::new(purge_fee_rules_use_case.clone()))
			.configure(routes::<RedisFeeRuleRepository>)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind((config.server_host.as_str(), config.server_port))?
	.run()
	.await
}
