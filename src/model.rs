use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::limits::*;

pub type StoreId = u32;
pub type RequestId = u64;
pub type ProductId = String;

/// Hour component of a clock time. Store hours stay within `0..=24`; a
/// request may name a later hour, which no window contains. Also the
/// capacity bucket key.
pub type Hour = u8;

/// Minutes since midnight — the only time type used for window checks.
pub type Minutes = u16;

/// Wall-clock `HH:MM` as written on a request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: Hour,
    pub minute: u8,
}

impl ClockTime {
    pub fn new(hour: Hour, minute: u8) -> Self {
        debug_assert!(minute < MINUTES_PER_HOUR, "minute out of range");
        Self { hour, minute }
    }

    pub fn minutes_since_midnight(&self) -> Minutes {
        Minutes::from(self.hour) * Minutes::from(MINUTES_PER_HOUR) + Minutes::from(self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Half-open interval `[start, end)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteSpan {
    pub start: Minutes,
    pub end: Minutes,
}

impl MinuteSpan {
    pub fn new(start: Minutes, end: Minutes) -> Self {
        debug_assert!(start < end, "MinuteSpan start must be before end");
        Self { start, end }
    }

    pub fn contains_instant(&self, t: Minutes) -> bool {
        self.start <= t && t < self.end
    }
}

/// A pickup store. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub open_hour: Hour,
    pub close_hour: Hour,
    /// Max pickups admitted per clock hour. Exclusive ceiling on the count.
    pub hourly_limit: u32,
}

impl Store {
    pub fn new(id: StoreId, open_hour: Hour, close_hour: Hour, hourly_limit: u32) -> Self {
        debug_assert!(open_hour < close_hour, "store must open before it closes");
        Self {
            id,
            open_hour,
            close_hour,
            hourly_limit,
        }
    }

    /// Operating window; the opening minute is included, the closing one is not.
    pub fn window(&self) -> MinuteSpan {
        let per_hour = Minutes::from(MINUTES_PER_HOUR);
        MinuteSpan::new(
            Minutes::from(self.open_hour) * per_hour,
            Minutes::from(self.close_hour) * per_hour,
        )
    }
}

/// Initial stock for one store, as listed on its inventory line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryLine {
    pub store_id: StoreId,
    pub items: Vec<(ProductId, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub id: RequestId,
    pub store_id: StoreId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub time: ClockTime,
}

/// Why a reservation was refused. Declaration order is check priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailReason {
    /// Unknown store id.
    Store,
    /// Outside the store's operating window.
    Time,
    /// The hour's pickup capacity is used up.
    Full,
    /// Not enough stock of the product.
    Stock,
}

impl FailReason {
    pub const ALL: [FailReason; 4] = [
        FailReason::Store,
        FailReason::Time,
        FailReason::Full,
        FailReason::Stock,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FailReason::Store => "STORE",
            FailReason::Time => "TIME",
            FailReason::Full => "FULL",
            FailReason::Stock => "STOCK",
        }
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Ok,
    Fail(FailReason),
}

impl Decision {
    pub fn is_ok(&self) -> bool {
        matches!(self, Decision::Ok)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationOutcome {
    pub request_id: RequestId,
    #[serde(flatten)]
    pub decision: Decision,
}

/// Renders the output line, without the trailing newline.
impl fmt::Display for ReservationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decision {
            Decision::Ok => write!(f, "{},OK", self.request_id),
            Decision::Fail(reason) => write!(f, "{},FAIL,{}", self.request_id, reason),
        }
    }
}

/// A fully parsed input batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchInput {
    pub stores: Vec<Store>,
    pub inventory: Vec<InventoryLine>,
    pub requests: Vec<ReservationRequest>,
}

/// Result of processing a batch: one outcome per request, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ReservationOutcome>,
    pub success_count: u64,
}

impl BatchReport {
    pub fn failure_count(&self) -> u64 {
        self.outcomes.len() as u64 - self.success_count
    }

    /// Failure tallies keyed by reason, in priority order. Reasons that never
    /// occurred are reported as zero.
    pub fn failures_by_reason(&self) -> BTreeMap<FailReason, u64> {
        let mut tally: BTreeMap<FailReason, u64> =
            FailReason::ALL.iter().map(|r| (*r, 0)).collect();
        for outcome in &self.outcomes {
            if let Decision::Fail(reason) = outcome.decision {
                *tally.entry(reason).or_default() += 1;
            }
        }
        tally
    }
}

// ── Snapshot types ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLevel {
    pub store_id: StoreId,
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickupLoad {
    pub store_id: StoreId,
    pub hour: Hour,
    pub count: u32,
}
