mod admission;
mod catalog;
mod counter;
mod ledger;
mod queries;

pub use admission::{first_violation, violations, Admission, AdmissionCheck, ADMISSION_CHECKS};
pub use catalog::StoreCatalog;
pub use counter::PickupCounter;
pub use ledger::InventoryLedger;

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::model::*;
use crate::observability;

/// Admits or refuses reservations one at a time, in arrival order.
///
/// Owns the only mutable state of a run: the inventory ledger and the
/// per-hour pickup counter. A request's checks and its mutations happen in a
/// single `process` call, so the next request always sees their effect.
pub struct ReservationProcessor {
    catalog: StoreCatalog,
    ledger: InventoryLedger,
    counter: PickupCounter,
    success_count: u64,
}

impl ReservationProcessor {
    pub fn new(catalog: StoreCatalog, ledger: InventoryLedger) -> Self {
        Self {
            catalog,
            ledger,
            counter: PickupCounter::new(),
            success_count: 0,
        }
    }

    /// Build catalog and ledger from a parsed batch. Requests are not touched.
    pub fn load(batch: &BatchInput) -> Self {
        let catalog = StoreCatalog::from_stores(batch.stores.iter().cloned());
        for line in &batch.inventory {
            if !catalog.contains(line.store_id) {
                warn!(
                    "inventory listed for unknown store {}; its requests will fail STORE",
                    line.store_id
                );
            }
        }
        if catalog.is_empty() && !batch.requests.is_empty() {
            warn!("batch defines no stores; every request will fail STORE");
        }
        let ledger = InventoryLedger::from_lines(&batch.inventory);

        info!(
            "loaded {} store(s), {} inventory line(s)",
            catalog.len(),
            batch.inventory.len()
        );
        metrics::gauge!(observability::STORES_LOADED).set(catalog.len() as f64);
        Self::new(catalog, ledger)
    }

    /// Resolve one request: refuse with the highest-priority violated
    /// constraint, or admit it and commit its stock and capacity usage.
    pub fn process(&mut self, request: &ReservationRequest) -> ReservationOutcome {
        metrics::counter!(observability::REQUESTS_TOTAL).increment(1);

        let admission = Admission {
            request,
            store: self.catalog.lookup(request.store_id),
            ledger: &self.ledger,
            counter: &self.counter,
        };

        let decision = match first_violation(&admission) {
            Some(reason) => {
                debug!(
                    "request {} refused: {reason} (store {}, product {}, qty {}, at {})",
                    request.id, request.store_id, request.product_id, request.quantity, request.time
                );
                metrics::counter!(
                    observability::RESERVATIONS_TOTAL,
                    "status" => "fail",
                    "reason" => reason.code()
                )
                .increment(1);
                Decision::Fail(reason)
            }
            None => {
                self.commit(request);
                debug!(
                    "request {} admitted (store {}, product {}, qty {}, at {})",
                    request.id, request.store_id, request.product_id, request.quantity, request.time
                );
                metrics::counter!(observability::RESERVATIONS_TOTAL, "status" => "ok").increment(1);
                Decision::Ok
            }
        };

        ReservationOutcome {
            request_id: request.id,
            decision,
        }
    }

    fn commit(&mut self, request: &ReservationRequest) {
        self.ledger
            .decrement(request.store_id, &request.product_id, request.quantity);
        self.counter.increment(request.store_id, request.time.hour);
        self.success_count += 1;
    }

    /// Process every request in order and collect the outcomes. The report
    /// counts only this call's admissions; `success_count()` is cumulative.
    pub fn run(&mut self, requests: &[ReservationRequest]) -> BatchReport {
        let start = Instant::now();
        let outcomes: Vec<ReservationOutcome> = requests.iter().map(|r| self.process(r)).collect();
        metrics::histogram!(observability::BATCH_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());

        let success_count = outcomes.iter().filter(|o| o.decision.is_ok()).count() as u64;
        let report = BatchReport {
            outcomes,
            success_count,
        };
        info!(
            "processed {} request(s): {} admitted, {} refused",
            report.outcomes.len(),
            report.success_count,
            report.failure_count()
        );
        report
    }

    pub fn success_count(&self) -> u64 {
        self.success_count
    }

    pub fn catalog(&self) -> &StoreCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    pub fn counter(&self) -> &PickupCounter {
        &self.counter
    }
}

/// Load a batch and process all of its requests.
pub fn process_batch(batch: &BatchInput) -> BatchReport {
    ReservationProcessor::load(batch).run(&batch.requests)
}
