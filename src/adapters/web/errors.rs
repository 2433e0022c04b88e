use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, error};
use derive_more::derive::{Display, Error};
use log::warn;
use serde::Serialize;

use crate::domain::fee_rule::FeeRuleValidationError;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
	#[display("Could not reach the settings store.")]
	StoreUnavailable,
	#[display("Fee rules are invalid: {reason}")]
	InvalidFeeRules {
		#[error(not(source))]
		reason: String,
	},
	#[display("Request data is invalid.")]
	BadClientDataError,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::StoreUnavailable => "Service Unavailable".to_string(),
			ApiError::InvalidFeeRules { .. } => "Unprocessable Entity".to_string(),
			ApiError::BadClientDataError => "Bad request".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
			ApiError::InvalidFeeRules { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			ApiError::BadClientDataError => StatusCode::BAD_REQUEST,
		}
	}
}

/// Use-case errors are either rule validation failures or store failures.
impl From<Box<dyn std::error::Error + Send>> for ApiError {
	fn from(err: Box<dyn std::error::Error + Send>) -> Self {
		match err.downcast_ref::<FeeRuleValidationError>() {
			Some(invalid) => ApiError::InvalidFeeRules {
				reason: invalid.to_string(),
			},
			None => ApiError::StoreUnavailable,
		}
	}
}

/// Renders body decoding failures with the API error envelope.
pub fn json_error_handler(
	err: error::JsonPayloadError,
	_req: &HttpRequest,
) -> actix_web::Error {
	warn!("Rejected request body: {err}");
	ApiError::BadClientDataError.into()
}

pub fn query_error_handler(
	err: error::QueryPayloadError,
	_req: &HttpRequest,
) -> actix_web::Error {
	warn!("Rejected query string: {err}");
	ApiError::BadClientDataError.into()
}
