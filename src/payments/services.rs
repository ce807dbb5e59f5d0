use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::error::StoreError;
use crate::payments::dto::{Dashboard, PaymentOutcome, PaymentRequest};
use crate::payments::repo_types::Payment;
use crate::store::JsonStore;

/// Smallest amount the payment form accepts.
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[instrument(skip(store, req), fields(amount = %req.amount))]
pub fn make_payment(
    store: &mut JsonStore,
    user_id: &str,
    req: PaymentRequest,
) -> Result<PaymentOutcome, StoreError> {
    if req.amount < MIN_AMOUNT {
        warn!("payment amount below minimum");
        return Ok(PaymentOutcome::AmountTooSmall {
            minimum: MIN_AMOUNT,
        });
    }

    let new_total = total_of(store.payments_for(user_id))
        .and_then(|total| total.checked_add(req.amount));
    if new_total.is_none() {
        warn!("payment would overflow the running total");
        return Ok(PaymentOutcome::TotalOverflow);
    }

    let payment = Payment::new(user_id, req.amount, req.description.trim());
    store.add_payment(payment.clone())?;
    info!("payment recorded");
    Ok(PaymentOutcome::Recorded(payment))
}

pub fn dashboard(store: &JsonStore, user_id: &str) -> Dashboard {
    let payments = store.payments_for(user_id);
    let total = total_of(payments.iter().copied());
    // Earliest inserted wins among equal dates.
    let latest = payments
        .iter()
        .copied()
        .reduce(|best, p| if p.date > best.date { p } else { best })
        .cloned();
    Dashboard {
        total,
        count: payments.len(),
        latest,
    }
}

/// Sum of the amounts, `None` on overflow.
fn total_of<'a, I>(payments: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Payment>,
{
    payments
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.amount))
}

/// The user's payments, newest first. Equal dates keep insertion order.
pub fn history(store: &JsonStore, user_id: &str) -> Vec<Payment> {
    let mut payments: Vec<Payment> = store.payments_for(user_id).into_iter().cloned().collect();
    payments.sort_by(|a, b| b.date.cmp(&a.date));
    payments
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;
    use time::macros::datetime;

    fn scratch_store() -> (TempDir, JsonStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::open(dir.path().join("data.json"));
        (dir, store)
    }

    fn seeded() -> (TempDir, JsonStore) {
        let (dir, mut store) = scratch_store();
        let rows = [
            ("alice", dec!(12.50), "coffee", datetime!(2024-03-01 08:15:00)),
            ("alice", dec!(40.10), "books", datetime!(2024-03-02 18:30:45)),
            ("bob", dec!(999), "rent", datetime!(2024-03-03 00:00:00)),
            ("alice", dec!(3.40), "bus", datetime!(2024-03-02 18:30:45)),
            ("alice", dec!(1), "gum", datetime!(2024-02-28 12:00:00)),
        ];
        for (user, amount, desc, date) in rows {
            store.add_payment(Payment::with_date(user, amount, desc, date)).unwrap();
        }
        (dir, store)
    }

    fn req(amount: Decimal, description: &str) -> PaymentRequest {
        PaymentRequest {
            amount,
            description: description.into(),
        }
    }

    #[test]
    fn test_min_amount_is_one_cent() {
        assert_eq!(MIN_AMOUNT, dec!(0.01));
    }

    #[test]
    fn test_make_payment_records() {
        let (_dir, mut store) = scratch_store();
        let outcome = make_payment(&mut store, "alice", req(dec!(12.50), " coffee ")).unwrap();
        let PaymentOutcome::Recorded(payment) = outcome else {
            panic!("expected a recorded payment");
        };
        assert_eq!(payment.description, "coffee");
        assert_eq!(store.payments_for("alice"), vec![&payment]);
    }

    #[test]
    fn test_make_payment_rejects_small_amounts() {
        let (_dir, mut store) = scratch_store();
        for amount in [dec!(0), dec!(0.009), dec!(-4)] {
            let outcome = make_payment(&mut store, "alice", req(amount, "x")).unwrap();
            assert_eq!(outcome, PaymentOutcome::AmountTooSmall { minimum: dec!(0.01) });
        }
        assert!(store.document().payments.is_empty());

        let outcome = make_payment(&mut store, "alice", req(dec!(0.01), "x")).unwrap();
        assert!(matches!(outcome, PaymentOutcome::Recorded(_)));
    }

    #[test]
    fn test_dashboard_totals_and_latest() {
        let (_dir, store) = seeded();
        let dash = dashboard(&store, "alice");
        assert_eq!(dash.total, Some(dec!(57.00)));
        assert_eq!(dash.count, 4);
        // books and bus share a date; books was inserted first
        assert_eq!(dash.latest.unwrap().description, "books");
    }

    #[test]
    fn test_dashboard_empty() {
        let (_dir, store) = seeded();
        let dash = dashboard(&store, "carol");
        assert_eq!(dash.total, Some(Decimal::ZERO));
        assert_eq!(dash.count, 0);
        assert!(dash.latest.is_none());
    }

    #[test]
    fn test_dashboard_reports_overflowing_total() {
        let (_dir, mut store) = scratch_store();
        let half = dec!(50000000000000000000000000000);
        store.add_payment(Payment::new("alice", half, "a")).unwrap();
        store.add_payment(Payment::new("alice", half, "b")).unwrap();

        let dash = dashboard(&store, "alice");
        assert_eq!(dash.total, None);
        assert_eq!(dash.count, 2);
        assert!(dash.latest.is_some());
    }

    #[test]
    fn test_make_payment_rejects_overflowing_total() {
        let (_dir, mut store) = scratch_store();
        let half = dec!(50000000000000000000000000000);
        let first = make_payment(&mut store, "alice", req(half, "a")).unwrap();
        assert!(matches!(first, PaymentOutcome::Recorded(_)));

        let second = make_payment(&mut store, "alice", req(half, "b")).unwrap();
        assert_eq!(second, PaymentOutcome::TotalOverflow);
        assert_eq!(store.payments_for("alice").len(), 1);

        // other users keep their own totals
        let other = make_payment(&mut store, "bob", req(half, "c")).unwrap();
        assert!(matches!(other, PaymentOutcome::Recorded(_)));
        assert_eq!(dashboard(&store, "alice").total, Some(half));
    }

    #[test]
    fn test_history_latest_first_and_stable() {
        let (_dir, store) = seeded();
        let names: Vec<_> = history(&store, "alice")
            .into_iter()
            .map(|p| p.description)
            .collect();
        assert_eq!(names, ["books", "bus", "coffee", "gum"]);
        assert!(history(&store, "carol").is_empty());
    }
}
