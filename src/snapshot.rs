// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Full-state JSON snapshot: ledger, goals, commission table, catalog and
//! reservation notes. This is also the on-disk session format.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesError};
use crate::ledger::Ledger;
use crate::models::{Catalog, SaleRecord, Session, Settings};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    exported_at: NaiveDateTime,
    #[serde(default)]
    catalog: Catalog,
    #[serde(default)]
    sales: Vec<SaleRecord>,
    #[serde(default)]
    goals: BTreeMap<String, u32>,
    #[serde(default)]
    commissions: BTreeMap<String, Decimal>,
    /// reservation number -> note
    #[serde(default)]
    notes: BTreeMap<String, String>,
}

/// Reservation-keyed view of the per-record notes; the first note seen wins.
pub fn notes_by_reservation(records: &[SaleRecord]) -> BTreeMap<String, String> {
    let mut notes = BTreeMap::new();
    for r in records {
        if let Some(note) = &r.note {
            notes
                .entry(r.reservation_number.clone())
                .or_insert_with(|| note.clone());
        }
    }
    notes
}

pub fn export_full(session: &Session, exported_at: NaiveDateTime) -> Result<String> {
    let records = session.ledger.records();
    let snap = Snapshot {
        version: SNAPSHOT_VERSION,
        exported_at,
        catalog: session.settings.catalog.clone(),
        sales: records.to_vec(),
        goals: session.settings.monthly_goals.clone(),
        commissions: session.settings.commission_rates.clone(),
        notes: notes_by_reservation(records),
    };
    Ok(serde_json::to_string_pretty(&snap)?)
}

/// Parses a snapshot into a fresh session without touching any existing one.
pub fn parse_full(text: &str) -> Result<Session> {
    let snap: Snapshot = serde_json::from_str(text.trim_start_matches('\u{feff}'))
        .map_err(|e| SalesError::Parse(format!("snapshot: {}", e)))?;
    if snap.version != SNAPSHOT_VERSION {
        return Err(SalesError::UnsupportedVersion(snap.version));
    }
    let mut seen = HashSet::new();
    for r in &snap.sales {
        if !seen.insert(r.id) {
            return Err(SalesError::DuplicateId(r.id));
        }
    }

    // Older snapshots kept notes only in the reservation map.
    let noted: HashSet<String> = snap
        .sales
        .iter()
        .filter(|r| r.note.is_some())
        .map(|r| r.reservation_number.clone())
        .collect();
    let mut sales = snap.sales;
    for r in sales.iter_mut() {
        if noted.contains(&r.reservation_number) {
            continue;
        }
        if let Some(note) = snap.notes.get(&r.reservation_number) {
            r.note = Some(note.clone());
        }
    }

    Ok(Session {
        ledger: Ledger::from_records(sales),
        settings: Settings {
            catalog: snap.catalog,
            monthly_goals: snap.goals,
            commission_rates: snap.commissions,
        },
    })
}

/// Replaces the whole session with the snapshot. On error the session is
/// left exactly as it was.
pub fn import_full(session: &mut Session, text: &str) -> Result<()> {
    let imported = parse_full(text)?;
    log::info!(
        "imported snapshot with {} record(s)",
        imported.ledger.len()
    );
    *session = imported;
    Ok(())
}
