use crate::domain::currency::Currency;
use crate::domain::payment::UnifiedPayment;

/// Most frequent currency in the set; ties go to the one seen first.
/// An empty set yields BYN.
pub fn pick_primary_currency(payments: &[UnifiedPayment]) -> Currency {
	let mut counts: Vec<(Currency, usize)> = Vec::new();

	for payment in payments {
		let currency = payment.currency();
		match counts.iter_mut().find(|(seen, _)| *seen == currency) {
			Some((_, count)) => *count += 1,
			None => counts.push((currency, 1)),
		}
	}

	// Stable sort keeps first-seen order among equal counts.
	counts.sort_by(|(_, a), (_, b)| b.cmp(a));
	counts
		.into_iter()
		.next()
		.map(|(currency, _)| currency)
		.unwrap_or_default()
}
