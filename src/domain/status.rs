pub const SUCCESSFUL_STATUSES: [&str; 2] = ["successful", "succeeded"];
pub const FAILED_STATUSES: [&str; 5] =
	["failed", "canceled", "expired", "declined", "error"];
pub const REFUNDED_STATUS: &str = "refunded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
	Successful,
	Failed,
	/// Only meaningful for queue-side refund rows; never a revenue bucket.
	Refunded,
	Unclassified,
}

pub fn classify(status: &str) -> StatusClass {
	let status = status.trim().to_lowercase();

	if SUCCESSFUL_STATUSES.contains(&status.as_str()) {
		StatusClass::Successful
	} else if FAILED_STATUSES.contains(&status.as_str()) {
		StatusClass::Failed
	} else if status == REFUNDED_STATUS {
		StatusClass::Refunded
	} else {
		StatusClass::Unclassified
	}
}
