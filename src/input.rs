use std::iter::Enumerate;
use std::str::{FromStr, Lines};

use tracing::warn;

use crate::limits::*;
use crate::model::*;

/// Parse a whole batch: header, store lines, inventory lines, request lines.
///
/// Any structural defect aborts with an [`InputError`] naming the 1-based
/// line. Domain problems (unknown stores, odd times) are left to the engine.
pub fn parse_batch(text: &str) -> Result<BatchInput, InputError> {
    let mut records = Records::new(text);

    let (line, header) = records.next_record().ok_or(InputError::Empty)?;
    expect_arity("header", line, &header, 2)?;
    let store_count: usize = parse_num("store count", line, header[0])?;
    let request_count: usize = parse_num("request count", line, header[1])?;

    let mut stores = Vec::with_capacity(store_count.min(MAX_PREALLOC_RECORDS));
    for _ in 0..store_count {
        let (line, fields) = records.require("store", store_count)?;
        stores.push(parse_store(line, &fields)?);
    }

    let mut inventory = Vec::with_capacity(store_count.min(MAX_PREALLOC_RECORDS));
    for _ in 0..store_count {
        let (line, fields) = records.require("inventory", store_count)?;
        inventory.push(parse_inventory(line, &fields)?);
    }

    let mut requests = Vec::with_capacity(request_count.min(MAX_PREALLOC_RECORDS));
    for _ in 0..request_count {
        let (line, fields) = records.require("request", request_count)?;
        requests.push(parse_request(line, &fields)?);
    }

    let trailing = records.remaining();
    if trailing > 0 {
        warn!("ignoring {trailing} line(s) after the last declared request");
    }

    Ok(BatchInput {
        stores,
        inventory,
        requests,
    })
}

/// Parse an `HH:MM` pickup time. Hours past the end of the day are accepted
/// here; no store window contains them, so they fail TIME downstream.
pub fn parse_clock(raw: &str) -> Result<ClockTime, String> {
    let (h, m) = raw
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got {raw:?}"))?;
    let hour: u8 = h
        .trim()
        .parse()
        .map_err(|_| format!("bad hour in {raw:?}"))?;
    let minute: u8 = m
        .trim()
        .parse()
        .map_err(|_| format!("bad minute in {raw:?}"))?;
    if minute >= MINUTES_PER_HOUR {
        return Err(format!("minute {minute} out of range in {raw:?}"));
    }
    Ok(ClockTime::new(hour, minute))
}

fn parse_store(line: usize, fields: &[&str]) -> Result<Store, InputError> {
    expect_arity("store", line, fields, 4)?;
    let id: StoreId = parse_num("store id", line, fields[0])?;
    let open_hour: Hour = parse_num("open hour", line, fields[1])?;
    let close_hour: Hour = parse_num("close hour", line, fields[2])?;
    let hourly_limit: u32 = parse_num("hourly limit", line, fields[3])?;

    if open_hour >= HOURS_PER_DAY {
        return Err(InputError::InvalidStore { line, id, reason: "open hour must be below 24" });
    }
    if close_hour > HOURS_PER_DAY {
        return Err(InputError::InvalidStore { line, id, reason: "close hour must be at most 24" });
    }
    if open_hour >= close_hour {
        return Err(InputError::InvalidStore { line, id, reason: "open hour must be before close hour" });
    }
    Ok(Store::new(id, open_hour, close_hour, hourly_limit))
}

fn parse_inventory(line: usize, fields: &[&str]) -> Result<InventoryLine, InputError> {
    let store_id: StoreId = parse_num("store id", line, fields[0])?;
    let mut items = Vec::with_capacity(fields.len() - 1);
    for token in &fields[1..] {
        // "-" marks a store with no stock; empty tokens come from trailing commas.
        if token.is_empty() || *token == "-" {
            continue;
        }
        let (product, qty) = token.split_once(':').ok_or_else(|| InputError::Parse {
            line,
            msg: format!("expected product:qty, got {token:?}"),
        })?;
        let product = product.trim();
        if product.is_empty() {
            return Err(InputError::Parse {
                line,
                msg: format!("empty product id in {token:?}"),
            });
        }
        if product.len() > MAX_PRODUCT_ID_LEN {
            return Err(InputError::LimitExceeded { line, what: "product id too long" });
        }
        let qty: u32 = parse_num("stock quantity", line, qty)?;
        items.push((product.to_string(), qty));
    }
    Ok(InventoryLine { store_id, items })
}

fn parse_request(line: usize, fields: &[&str]) -> Result<ReservationRequest, InputError> {
    expect_arity("request", line, fields, 5)?;
    let id: RequestId = parse_num("request id", line, fields[0])?;
    let store_id: StoreId = parse_num("store id", line, fields[1])?;
    let product_id = fields[2];
    if product_id.len() > MAX_PRODUCT_ID_LEN {
        return Err(InputError::LimitExceeded { line, what: "product id too long" });
    }
    let quantity: u32 = parse_num("quantity", line, fields[3])?;
    let time = parse_clock(fields[4]).map_err(|msg| InputError::Parse { line, msg })?;
    Ok(ReservationRequest {
        id,
        store_id,
        product_id: product_id.to_string(),
        quantity,
        time,
    })
}

fn parse_num<T: FromStr>(what: &'static str, line: usize, raw: &str) -> Result<T, InputError> {
    raw.trim().parse().map_err(|_| InputError::Parse {
        line,
        msg: format!("{what}: expected unsigned integer, got {raw:?}"),
    })
}

fn expect_arity(
    record: &'static str,
    line: usize,
    fields: &[&str],
    expected: usize,
) -> Result<(), InputError> {
    if fields.len() != expected {
        return Err(InputError::WrongArity {
            line,
            record,
            expected,
            got: fields.len(),
        });
    }
    Ok(())
}

// ── Line cursor ──────────────────────────────────────────────

/// Walks non-blank lines, splitting each on commas with fields trimmed.
struct Records<'a> {
    lines: Enumerate<Lines<'a>>,
    /// Records handed out per kind, for truncation errors.
    seen: usize,
    current: &'static str,
}

impl<'a> Records<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            seen: 0,
            current: "",
        }
    }

    fn next_record(&mut self) -> Option<(usize, Vec<&'a str>)> {
        for (idx, raw) in self.lines.by_ref() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let fields = trimmed.split(',').map(str::trim).collect();
            return Some((idx + 1, fields));
        }
        None
    }

    /// Next record of a declared section; running out of lines is fatal.
    fn require(
        &mut self,
        record: &'static str,
        expected: usize,
    ) -> Result<(usize, Vec<&'a str>), InputError> {
        if self.current != record {
            self.current = record;
            self.seen = 0;
        }
        match self.next_record() {
            Some(rec) => {
                self.seen += 1;
                Ok(rec)
            }
            None => Err(InputError::Truncated {
                record,
                expected,
                got: self.seen,
            }),
        }
    }

    fn remaining(&mut self) -> usize {
        self.lines.by_ref().filter(|(_, l)| !l.trim().is_empty()).count()
    }
}

// ── Errors ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    Parse {
        line: usize,
        msg: String,
    },
    WrongArity {
        line: usize,
        record: &'static str,
        expected: usize,
        got: usize,
    },
    Truncated {
        record: &'static str,
        expected: usize,
        got: usize,
    },
    InvalidStore {
        line: usize,
        id: StoreId,
        reason: &'static str,
    },
    LimitExceeded {
        line: usize,
        what: &'static str,
    },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Empty => write!(f, "empty input: missing header line"),
            InputError::Parse { line, msg } => write!(f, "line {line}: parse error: {msg}"),
            InputError::WrongArity {
                line,
                record,
                expected,
                got,
            } => write!(f, "line {line}: {record}: expected {expected} fields, got {got}"),
            InputError::Truncated {
                record,
                expected,
                got,
            } => write!(f, "input ended early: expected {expected} {record} lines, got {got}"),
            InputError::InvalidStore { line, id, reason } => {
                write!(f, "line {line}: store {id}: {reason}")
            }
            InputError::LimitExceeded { line, what } => {
                write!(f, "line {line}: limit exceeded: {what}")
            }
        }
    }
}

impl std::error::Error for InputError {}
