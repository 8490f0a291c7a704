// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use crate::models::{SaleRecord, Session};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(session: &Session) -> Result<()> {
    let rows = issues(session);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Names outside the catalog (usually from a CSV import) and reservation
/// numbers shared by more than one submission.
pub fn issues(session: &Session) -> Vec<Vec<String>> {
    let catalog = &session.settings.catalog;
    let records = session.ledger.records();
    let mut rows = Vec::new();

    // 1) Unknown employees / products
    for r in records {
        if !catalog.has_employee(&r.employee) {
            rows.push(vec![
                "unknown_employee".into(),
                format!("#{} {}", r.id, r.employee),
            ]);
        }
        if !catalog.has_product(&r.product_type) {
            rows.push(vec![
                "unknown_product".into(),
                format!("#{} {}", r.id, r.product_type),
            ]);
        }
    }

    // 2) One reservation number, several submissions
    let mut by_reservation: BTreeMap<&str, Vec<&SaleRecord>> = BTreeMap::new();
    for r in records {
        by_reservation
            .entry(r.reservation_number.as_str())
            .or_default()
            .push(r);
    }
    for (reservation, group) in by_reservation {
        let first = group[0];
        let split = group.iter().any(|r| {
            r.client_name != first.client_name
                || r.employee != first.employee
                || r.timestamp != first.timestamp
        });
        if split {
            rows.push(vec!["reused_reservation".into(), reservation.to_string()]);
        }
    }
    rows
}
