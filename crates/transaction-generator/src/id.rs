//! Millisecond-timestamp transaction identifiers.

/// Constant tag every transaction id starts with.
pub const TRANSACTION_ID_PREFIX: &str = "live-";

/// Issues `live-<millis>` identifiers.
///
/// The millisecond component never goes backwards, even when the wall clock
/// is stepped back. Two ids issued within the same millisecond are equal;
/// that collision is accepted.
#[derive(Debug, Default, Clone)]
pub struct TransactionIdClock {
    last_millis: i64,
}

impl TransactionIdClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue an id for the given epoch millisecond.
    pub fn next_id_at(&mut self, now_millis: i64) -> String {
        self.last_millis = self.last_millis.max(now_millis);
        format!("{TRANSACTION_ID_PREFIX}{}", self.last_millis)
    }

    /// Millisecond component of the most recently issued id.
    pub fn last_millis(&self) -> i64 {
        self.last_millis
    }
}
