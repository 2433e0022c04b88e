use actix_web::{HttpResponse, Responder, ResponseError, web};
use log::info;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{AnalyticsWindowFilter, PaymentsAnalyticsRequest};
use crate::domain::repository::FeeRuleRepository;
use crate::use_cases::dto::GetPaymentsAnalyticsQuery;
use crate::use_cases::get_payments_analytics::GetPaymentsAnalyticsUseCase;

pub async fn payments_analytics<R: FeeRuleRepository>(
	window: web::Query<AnalyticsWindowFilter>,
	payload: web::Json<PaymentsAnalyticsRequest>,
	get_payments_analytics_use_case: web::Data<GetPaymentsAnalyticsUseCase<R>>,
) -> impl Responder {
	if let (Some(from), Some(to)) = (window.from, window.to) &&
		from > to
	{
		return ApiError::BadClientDataError.error_response();
	}

	let request = payload.into_inner();
	info!(
		"Payments analytics requested for {} records",
		request.payments.len()
	);

	let query = GetPaymentsAnalyticsQuery {
		payments:  request.payments,
		fee_rules: request.fee_rules,
		filter:    request.filter,
		from:      window.from,
		to:        window.to,
	};

	let result = get_payments_analytics_use_case.execute(query).await;
	HttpResponse::Ok().json(result)
}
