//! Random generator producing synthetic transactions.

use crate::catalog::{random_payment_type, random_product_id, random_store_id};
use crate::id::TransactionIdClock;
use crate::transaction::SyntheticTransaction;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Inclusive quantity bounds.
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 5;

/// Unit price bounds in cents: 1.00 inclusive up to 200.00 exclusive.
pub const MIN_UNIT_PRICE_CENTS: u32 = 100;
pub const MAX_UNIT_PRICE_CENTS: u32 = 20_000;

/// Generator that produces independent synthetic transactions.
///
/// [`TransactionGenerator::new`] seeds from OS entropy, so two runs never
/// produce the same sequence. Pass a seeded RNG to
/// [`TransactionGenerator::with_rng`] when reproducibility matters.
pub struct TransactionGenerator<R = StdRng> {
    rng: R,
    ids: TransactionIdClock,
}

impl TransactionGenerator<StdRng> {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for TransactionGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TransactionGenerator<R> {
    /// Create a generator drawing from the given RNG.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            ids: TransactionIdClock::new(),
        }
    }

    /// Generate the next transaction, stamped with the current time.
    pub fn next_transaction(&mut self) -> SyntheticTransaction {
        let now = Utc::now();
        let transaction_id = self.ids.next_id_at(now.timestamp_millis());

        let cents = self
            .rng
            .gen_range(MIN_UNIT_PRICE_CENTS..MAX_UNIT_PRICE_CENTS);

        SyntheticTransaction {
            transaction_id,
            datetime: SyntheticTransaction::format_datetime(now),
            store_id: random_store_id(&mut self.rng),
            product_id: random_product_id(&mut self.rng),
            quantity: self.rng.gen_range(MIN_QUANTITY..=MAX_QUANTITY),
            unit_price: f64::from(cents) / 100.0,
            payment_type: random_payment_type(&mut self.rng),
        }
    }

    /// Lazily generate `count` transactions.
    pub fn transactions(&mut self, count: usize) -> TransactionIterator<'_, R> {
        TransactionIterator {
            generator: self,
            remaining: count,
        }
    }
}

/// Iterator that lazily generates transactions.
pub struct TransactionIterator<'a, R> {
    generator: &'a mut TransactionGenerator<R>,
    remaining: usize,
}

impl<R: Rng> Iterator for TransactionIterator<'_, R> {
    type Item = SyntheticTransaction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.next_transaction())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng> ExactSizeIterator for TransactionIterator<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{product_ids, store_ids, PAYMENT_TYPES};
    use crate::id::TRANSACTION_ID_PREFIX;
    use std::collections::HashSet;

    fn seeded() -> TransactionGenerator<StdRng> {
        TransactionGenerator::with_rng(StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_fields_stay_in_range() {
        let stores: HashSet<String> = store_ids().into_iter().collect();
        let products: HashSet<String> = product_ids().into_iter().collect();
        let mut generator = seeded();

        for txn in generator.transactions(5_000) {
            assert!(stores.contains(&txn.store_id), "bad store {}", txn.store_id);
            assert!(
                products.contains(&txn.product_id),
                "bad product {}",
                txn.product_id
            );
            assert!(PAYMENT_TYPES.contains(&txn.payment_type));
            assert!((1..=5).contains(&txn.quantity));
            assert!(txn.unit_price >= 1.0 && txn.unit_price < 200.0);

            let cents = txn.unit_price * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6, "price {}", txn.unit_price);
        }
    }

    #[test]
    fn test_quantity_covers_full_range() {
        let mut generator = seeded();
        let seen: HashSet<u32> = generator.transactions(500).map(|t| t.quantity).collect();
        assert_eq!(seen, (1..=5).collect::<HashSet<u32>>());
    }

    #[test]
    fn test_transaction_id_prefix() {
        let mut generator = seeded();
        let txn = generator.next_transaction();
        assert!(txn.transaction_id.len() > TRANSACTION_ID_PREFIX.len());
        assert!(txn.transaction_id.starts_with(TRANSACTION_ID_PREFIX));
    }

    #[test]
    fn test_transaction_ids_do_not_decrease() {
        let mut generator = seeded();
        let millis: Vec<i64> = generator
            .transactions(200)
            .map(|t| t.transaction_id[TRANSACTION_ID_PREFIX.len()..].parse().unwrap())
            .collect();
        assert!(millis.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_datetime_is_utc_iso8601() {
        let mut generator = seeded();
        let txn = generator.next_transaction();
        let parsed =
            chrono::NaiveDateTime::parse_from_str(&txn.datetime, "%Y-%m-%dT%H:%M:%S%.f");
        assert!(parsed.is_ok(), "unparseable datetime {}", txn.datetime);
        assert!(!txn.datetime.ends_with('Z'));
    }

    #[test]
    fn test_iterator_is_exact_size() {
        let mut generator = seeded();
        let iter = generator.transactions(50);
        assert_eq!(iter.len(), 50);
        assert_eq!(iter.count(), 50);
    }

    #[test]
    fn test_entropy_seeded_generators_differ() {
        let mut a = TransactionGenerator::new();
        let mut b = TransactionGenerator::new();
        let left: Vec<_> = a
            .transactions(20)
            .map(|t| (t.store_id, t.product_id, t.quantity, t.unit_price))
            .collect();
        let right: Vec<_> = b
            .transactions(20)
            .map(|t| (t.store_id, t.product_id, t.quantity, t.unit_price))
            .collect();
        assert_ne!(left, right);
    }
}
