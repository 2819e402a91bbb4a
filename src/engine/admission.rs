use crate::model::*;

use super::{InventoryLedger, PickupCounter};

/// Everything a check may look at for one request. The store is resolved
/// once up front; checks after STORE see `None` only for unknown stores,
/// which never reach them through [`first_violation`].
pub struct Admission<'a> {
    pub request: &'a ReservationRequest,
    pub store: Option<&'a Store>,
    pub ledger: &'a InventoryLedger,
    pub counter: &'a PickupCounter,
}

/// A named admission predicate. `admits` returns false when the request
/// violates the constraint that `reason` names.
pub struct AdmissionCheck {
    pub reason: FailReason,
    pub admits: fn(&Admission<'_>) -> bool,
}

/// Evaluated top to bottom; the first failure is the reported reason.
pub const ADMISSION_CHECKS: [AdmissionCheck; 4] = [
    AdmissionCheck {
        reason: FailReason::Store,
        admits: store_exists,
    },
    AdmissionCheck {
        reason: FailReason::Time,
        admits: within_opening_hours,
    },
    AdmissionCheck {
        reason: FailReason::Full,
        admits: hour_has_capacity,
    },
    AdmissionCheck {
        reason: FailReason::Stock,
        admits: stock_sufficient,
    },
];

pub fn first_violation(a: &Admission<'_>) -> Option<FailReason> {
    ADMISSION_CHECKS
        .iter()
        .find(|check| !(check.admits)(a))
        .map(|check| check.reason)
}

/// Every violated constraint, in priority order. Does not stop early.
pub fn violations(a: &Admission<'_>) -> Vec<FailReason> {
    ADMISSION_CHECKS
        .iter()
        .filter(|check| !(check.admits)(a))
        .map(|check| check.reason)
        .collect()
}

fn store_exists(a: &Admission<'_>) -> bool {
    a.store.is_some()
}

fn within_opening_hours(a: &Admission<'_>) -> bool {
    a.store
        .is_some_and(|s| s.window().contains_instant(a.request.time.minutes_since_midnight()))
}

/// Buckets by the hour component only; minutes don't matter here.
fn hour_has_capacity(a: &Admission<'_>) -> bool {
    a.store.is_some_and(|s| {
        a.counter.count_at(s.id, a.request.time.hour) < s.hourly_limit
    })
}

fn stock_sufficient(a: &Admission<'_>) -> bool {
    a.store.is_some_and(|s| {
        a.ledger.stock_of(s.id, &a.request.product_id) >= a.request.quantity
    })
}
