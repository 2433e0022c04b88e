use actix_web::{HttpResponse, Responder, ResponseError, web};
use log::{error, info};

use crate::adapters::web::errors::ApiError;
use crate::domain::fee_rule::FeeRuleTable;
use crate::domain::repository::FeeRuleRepository;
use crate::use_cases::fee_rules::{
	GetFeeRulesUseCase, PurgeFeeRulesUseCase, SaveFeeRulesUseCase,
};

pub async fn get_fee_rules<R: FeeRuleRepository>(
	get_fee_rules_use_case: web::Data<GetFeeRulesUseCase<R>>,
) -> impl Responder {
	match get_fee_rules_use_case.execute().await {
		Ok(table) => HttpResponse::Ok().json(table),
		Err(e) => {
			error!("Failed to load fee rules: {e}");
			ApiError::from(e).error_response()
		}
	}
}

pub async fn save_fee_rules<R: FeeRuleRepository>(
	payload: web::Json<FeeRuleTable>,
	save_fee_rules_use_case: web::Data<SaveFeeRulesUseCase<R>>,
) -> impl Responder {
	match save_fee_rules_use_case.execute(payload.into_inner()).await {
		Ok(_) => {
			info!("Fee rules updated");
			HttpResponse::NoContent().finish()
		}
		Err(e) => {
			error!("Failed to store fee rules: {e}");
			ApiError::from(e).error_response()
		}
	}
}

pub async fn purge_fee_rules<R: FeeRuleRepository>(
	purge_fee_rules_use_case: web::Data<PurgeFeeRulesUseCase<R>>,
) -> impl Responder {
	info!("Received request to purge fee rules");
	match purge_fee_rules_use_case.execute().await {
		Ok(_) => {
			info!("Fee rules purged successfully");
			HttpResponse::NoContent().finish()
		}
		Err(e) => {
			error!("Failed to purge fee rules: {e}");
			ApiError::from(e).error_response()
		}
	}
}
