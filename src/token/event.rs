//! Transfer notifications
//!
//! Events are fire-and-forget. The ledger hands them to a sink only after
//! the invocation that produced them has committed.

use crate::core::Address;
use chrono::{DateTime, Utc};
use num::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transfer event (emitted on transfer and on mint)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferEvent {
    /// Sender; `None` marks newly issued points
    pub from: Option<Address>,
    pub to: Address,
    pub amount: BigInt,
    pub timestamp: DateTime<Utc>,
}

impl TransferEvent {
    pub fn new(from: Option<Address>, to: Address, amount: BigInt) -> Self {
        Self {
            from,
            to,
            amount,
            timestamp: Utc::now(),
        }
    }

    /// True if this event records issuance rather than a movement
    pub fn is_mint(&self) -> bool {
        self.from.is_none()
    }
}

impl fmt::Display for TransferEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.from {
            Some(from) => write!(f, "transfer {} -> {}: {}", from, self.to, self.amount),
            None => write!(f, "transfer (mint) -> {}: {}", self.to, self.amount),
        }
    }
}

/// Receiver of ledger notifications
pub trait EventSink {
    fn emit(&mut self, event: TransferEvent);
}

/// Collects events in memory
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<TransferEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TransferEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: TransferEvent) {
        self.events.push(event);
    }
}

/// Writes every event to the log at info level
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: TransferEvent) {
        log::info!("Event: {}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_collects() {
        let mut log = EventLog::new();
        let to = Address::new([2u8; 20]);
        log.emit(TransferEvent::new(None, to, BigInt::from(10)));
        log.emit(TransferEvent::new(Some(to), Address::new([3u8; 20]), BigInt::from(4)));

        assert_eq!(log.len(), 2);
        assert!(log.events()[0].is_mint());
        assert!(!log.events()[1].is_mint());
        assert_eq!(log.events()[1].amount, BigInt::from(4));
    }

    #[test]
    fn test_display() {
        let to = Address::new([2u8; 20]);
        let event = TransferEvent::new(None, to, BigInt::from(10));
        assert!(event.to_string().contains("mint"));
        assert!(event.to_string().ends_with(": 10"));
    }
}
