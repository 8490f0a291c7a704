// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One-row-per-sale CSV export, and header-driven CSV import.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Result, SalesError};
use crate::ledger::Ledger;
use crate::models::SaleRecord;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const HEADER: [&str; 9] = [
    "id",
    "timestamp",
    "employee",
    "client",
    "reservation_number",
    "product_type",
    "commission_amount",
    "month",
    "note",
];

#[derive(Serialize)]
struct TabularRow<'a> {
    id: u64,
    timestamp: String,
    employee: &'a str,
    client: &'a str,
    reservation_number: &'a str,
    product_type: &'a str,
    commission_amount: String,
    month: String,
    note: &'a str,
}

pub fn export_tabular(records: &[SaleRecord]) -> Result<String> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    if records.is_empty() {
        wtr.write_record(HEADER)?;
    }
    for r in records {
        wtr.serialize(TabularRow {
            id: r.id,
            timestamp: r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            employee: &r.employee,
            client: &r.client_name,
            reservation_number: &r.reservation_number,
            product_type: &r.product_type,
            commission_amount: r.commission_amount.to_string(),
            month: r.month(),
            note: r.note.as_deref().unwrap_or(""),
        })?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| SalesError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| SalesError::Parse(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Timestamp,
    Employee,
    Client,
    Reservation,
    Product,
    Commission,
    Note,
}

impl Column {
    fn label(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Timestamp => "timestamp",
            Column::Employee => "employee",
            Column::Client => "client",
            Column::Reservation => "reservation_number",
            Column::Product => "product_type",
            Column::Commission => "commission_amount",
            Column::Note => "note",
        }
    }

    fn from_header(raw: &str) -> Option<Column> {
        let key = raw
            .trim_start_matches('\u{feff}')
            .trim()
            .to_lowercase()
            .replace([' ', '-'], "_");
        // French aliases match exports of the earlier form-based tool.
        match key.as_str() {
            "id" => Some(Column::Id),
            "timestamp" | "date" | "datetime" => Some(Column::Timestamp),
            "employee" | "employé" | "employe" => Some(Column::Employee),
            "client" | "client_name" => Some(Column::Client),
            "reservation_number" | "reservation" | "numéro_de_réservation"
            | "numero_de_reservation" => Some(Column::Reservation),
            "product_type" | "product" | "type_d'assurance" | "type_d_assurance" => {
                Some(Column::Product)
            }
            "commission_amount" | "commission" => Some(Column::Commission),
            "note" => Some(Column::Note),
            _ => None,
        }
    }
}

struct Layout {
    columns: Vec<(Column, usize)>,
}

impl Layout {
    fn infer(headers: &StringRecord) -> Result<Layout> {
        let mut columns: Vec<(Column, usize)> = Vec::new();
        for (idx, h) in headers.iter().enumerate() {
            if let Some(col) = Column::from_header(h) {
                if !columns.iter().any(|(c, _)| *c == col) {
                    columns.push((col, idx));
                }
            }
        }
        let layout = Layout { columns };
        for required in [
            Column::Timestamp,
            Column::Employee,
            Column::Client,
            Column::Reservation,
            Column::Product,
        ] {
            if layout.index(required).is_none() {
                return Err(SalesError::Parse(format!(
                    "missing '{}' column",
                    required.label()
                )));
            }
        }
        Ok(layout)
    }

    fn index(&self, col: Column) -> Option<usize> {
        self.columns.iter().find(|(c, _)| *c == col).map(|(_, i)| *i)
    }

    fn cell<'r>(&self, rec: &'r StringRecord, col: Column) -> Option<&'r str> {
        self.index(col)
            .and_then(|i| rec.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn required<'r>(&self, rec: &'r StringRecord, col: Column, line: u64) -> Result<&'r str> {
        self.cell(rec, col).ok_or_else(|| {
            SalesError::Parse(format!("line {}: {} is empty", line, col.label()))
        })
    }
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        TIMESTAMP_FORMAT,
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Reads every row into records. Fails as a whole on the first bad row.
///
/// Rows without an `id` get fresh ids after the largest explicit one; a
/// missing `commission_amount` reads as zero.
pub fn parse_tabular(text: &str) -> Result<Vec<SaleRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let layout = Layout::infer(rdr.headers()?)?;

    let mut rows: Vec<(Option<u64>, SaleRecord)> = Vec::new();
    let mut explicit = HashSet::new();
    for result in rdr.records() {
        let rec = result?;
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        if rec.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        let id = match layout.cell(&rec, Column::Id) {
            Some(raw) => {
                let id = raw.parse::<u64>().map_err(|_| {
                    SalesError::Parse(format!("line {}: invalid id '{}'", line, raw))
                })?;
                if !explicit.insert(id) {
                    return Err(SalesError::DuplicateId(id));
                }
                Some(id)
            }
            None => None,
        };
        let ts_raw = layout.required(&rec, Column::Timestamp, line)?;
        let timestamp = parse_timestamp(ts_raw).ok_or_else(|| {
            SalesError::Parse(format!("line {}: invalid timestamp '{}'", line, ts_raw))
        })?;
        let commission_amount = match layout.cell(&rec, Column::Commission) {
            Some(raw) => raw.parse::<Decimal>().map_err(|_| {
                SalesError::Parse(format!("line {}: invalid commission '{}'", line, raw))
            })?,
            None => Decimal::ZERO,
        };

        rows.push((
            id,
            SaleRecord {
                id: 0,
                timestamp,
                employee: layout.required(&rec, Column::Employee, line)?.to_string(),
                client_name: layout.required(&rec, Column::Client, line)?.to_string(),
                reservation_number: layout
                    .required(&rec, Column::Reservation, line)?
                    .to_string(),
                product_type: layout.required(&rec, Column::Product, line)?.to_string(),
                commission_amount,
                note: layout.cell(&rec, Column::Note).map(str::to_string),
            },
        ));
    }

    let mut next = explicit.iter().copied().max().unwrap_or(0).checked_add(1);
    let mut records = Vec::with_capacity(rows.len());
    for (id, mut record) in rows {
        record.id = match id {
            Some(id) => id,
            None => {
                let fresh = next.ok_or_else(|| {
                    SalesError::Parse("no id left for rows without one".to_string())
                })?;
                next = fresh.checked_add(1);
                fresh
            }
        };
        records.push(record);
    }
    Ok(records)
}

/// Replaces the ledger with the CSV contents; the ledger is untouched on error.
pub fn import_tabular(ledger: &mut Ledger, text: &str) -> Result<usize> {
    let records = parse_tabular(text)?;
    let count = records.len();
    ledger.replace(records);
    Ok(count)
}
