use rust_decimal::Decimal;
use serde::Deserialize;

use crate::payments::repo_types::Payment;

/// Input collected by the payment form.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Recorded(Payment),
    AmountTooSmall { minimum: Decimal },
    /// The user's running total could not hold this amount.
    TotalOverflow,
}

/// Figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// `None` when the sum does not fit in a `Decimal`.
    pub total: Option<Decimal>,
    pub count: usize,
    pub latest: Option<Payment>,
}
