use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::engine::ReservationProcessor;
use crate::model::*;

/// Outcome lines in request order, then the admitted total. Every line,
/// the total included, ends with `\n`; the total is terminated like the
/// outcome lines rather than left as a bare final number.
pub fn render_text(report: &BatchReport) -> String {
    let mut out = String::with_capacity(report.outcomes.len() * 12 + 8);
    for outcome in &report.outcomes {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{outcome}");
    }
    let _ = writeln!(out, "{}", report.success_count);
    out
}

/// End-of-run JSON summary.
#[derive(Debug, Serialize)]
pub struct SummaryReport<'a> {
    pub success_count: u64,
    pub failure_count: u64,
    pub failures_by_reason: BTreeMap<FailReason, u64>,
    pub outcomes: &'a [ReservationOutcome],
    pub remaining_stock: Vec<StockLevel>,
    pub pickup_loads: Vec<PickupLoad>,
}

impl<'a> SummaryReport<'a> {
    pub fn new(report: &'a BatchReport, processor: &ReservationProcessor) -> Self {
        Self {
            success_count: report.success_count,
            failure_count: report.failure_count(),
            failures_by_reason: report.failures_by_reason(),
            outcomes: &report.outcomes,
            remaining_stock: processor.stock_levels(),
            pickup_loads: processor.pickup_loads(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
