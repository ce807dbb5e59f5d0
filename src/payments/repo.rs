use tracing::debug;

use crate::error::StoreError;
use crate::payments::repo_types::Payment;
use crate::store::JsonStore;

impl JsonStore {
    /// Appends and persists. Neither the payer nor the amount is checked.
    pub fn add_payment(&mut self, payment: Payment) -> Result<(), StoreError> {
        debug!(user_id = %payment.user_id, amount = %payment.amount, "payment added");
        self.doc.payments.push(payment);
        self.persist()
    }

    /// All payments of `user_id` in insertion order.
    pub fn payments_for(&self, user_id: &str) -> Vec<&Payment> {
        self.doc
            .payments
            .iter()
            .filter(|p| p.user_id == user_id)
            .collect()
    }
}
