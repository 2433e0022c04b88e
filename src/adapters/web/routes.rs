use actix_web::web;

use crate::adapters::web::fee_rules_handler::{
	get_fee_rules, purge_fee_rules, save_fee_rules,
};
use crate::adapters::web::payments_analytics_handler::payments_analytics;
use crate::domain::repository::FeeRuleRepository;

/// Registers every endpoint against use cases backed by `R`. The use cases
/// themselves are expected as app data.
pub fn routes<R: FeeRuleRepository>(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::resource("/payments-analytics")
			.route(web::post().to(payments_analytics::<R>)),
	)
	.service(
		web::resource("/fee-rules")
			.route(web::get().to(get_fee_rules::<R>))
			.route(web::put().to(save_fee_rules::<R>))
			.route(web::delete().to(purge_fee_rules::<R>)),
	);
}
