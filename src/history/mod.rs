//! Caller-owned log of settled bets.
//!
//! The engine never writes here; front ends record what they settled.

use crate::core::bet::BetRequest;
use crate::core::outcome::SettlementResult;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;
use uuid::Uuid;

/// Number of items kept when no capacity is given.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// One settled bet as recorded by a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub request: BetRequest,
    pub result: SettlementResult,
}

/// Append-only history, newest first, bounded to a fixed capacity.
///
/// Items are never edited. Once the log is full the oldest item is
/// dropped for each new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawHistoryLog")]
pub struct HistoryLog {
    capacity: usize,
    items: VecDeque<HistoryItem>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("History capacity must be positive")]
    ZeroCapacity,
}

#[derive(Deserialize)]
struct RawHistoryLog {
    capacity: usize,
    items: VecDeque<HistoryItem>,
}

impl TryFrom<RawHistoryLog> for HistoryLog {
    type Error = HistoryError;

    fn try_from(raw: RawHistoryLog) -> Result<Self, Self::Error> {
        if raw.capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        let mut items = raw.items;
        items.truncate(raw.capacity);
        Ok(Self {
            capacity: raw.capacity,
            items,
        })
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "History capacity must be positive");
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a settled bet and return the stored item.
    pub fn record(&mut self, request: BetRequest, result: SettlementResult) -> &HistoryItem {
        self.push(HistoryItem {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            request,
            result,
        })
    }

    /// Record an item built elsewhere (useful for testing / replay).
    pub fn push(&mut self, item: HistoryItem) -> &HistoryItem {
        self.items.push_front(item);
        self.items.truncate(self.capacity);
        &self.items[0]
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items, newest first.
    pub fn items(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&HistoryItem> {
        self.items.front()
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of net profit over the retained items.
    pub fn total_net_profit(&self) -> Decimal {
        self.items.iter().map(|i| i.result.net_profit()).sum()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bet::Score;
    use crate::core::handicap::{HandicapLine, HandicapType, Selection};
    use crate::settlement::engine::settle;
    use rust_decimal_macros::dec;

    fn bet(home: u32) -> BetRequest {
        BetRequest::new(
            HandicapType::Asian,
            Score::new(home, 0),
            HandicapLine::new(dec!(-0.5)),
            Selection::Home,
        )
        .with_odds(dec!(2))
        .with_stake(dec!(10))
    }

    #[test]
    fn test_record_newest_first() {
        let mut log = HistoryLog::new();
        let first = bet(0);
        let second = bet(1);
        log.record(first.clone(), settle(&first));
        let id = log.record(second.clone(), settle(&second)).id;

        assert_eq!(log.len(), 2);
        assert_eq!(log.latest().unwrap().id, id);
        assert_eq!(log.latest().unwrap().request, second);
        assert!(log.get(id).is_some());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = HistoryLog::with_capacity(3);
        for home in 0..5 {
            let req = bet(home);
            log.record(req.clone(), settle(&req));
        }
        assert_eq!(log.len(), 3);
        let homes: Vec<u32> = log.items().map(|i| i.request.score.home).collect();
        assert_eq!(homes, vec![4, 3, 2]);
    }

    #[test]
    fn test_total_net_profit() {
        let mut log = HistoryLog::new();
        let lose = bet(0);
        let win = bet(1);
        log.record(lose.clone(), settle(&lose));
        log.record(win.clone(), settle(&win));
        // -10 + 10
        assert_eq!(log.total_net_profit(), Decimal::ZERO);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_deserialize_checks_capacity() {
        let err = serde_json::from_str::<HistoryLog>(r#"{"capacity": 0, "items": []}"#)
            .unwrap_err();
        assert!(err.to_string().contains("must be positive"));

        let mut log = HistoryLog::with_capacity(3);
        for home in 0..3 {
            let req = bet(home);
            log.record(req.clone(), settle(&req));
        }
        let mut json = serde_json::to_value(&log).unwrap();
        json["capacity"] = 1.into();

        let mut restored: HistoryLog = serde_json::from_value(json).unwrap();
        assert_eq!(restored.capacity(), 1);
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.latest().unwrap().request.score.home, 2);

        let req = bet(5);
        restored.record(req.clone(), settle(&req));
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.latest().unwrap().request, req);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_zero_capacity() {
        HistoryLog::with_capacity(0);
    }
}
