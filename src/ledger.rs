// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDateTime;

use crate::error::{Result, SalesError};
use crate::models::{SaleRecord, Settings, Submission};

/// Ordered collection of sale records, in entry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: Vec<SaleRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Entry,
    NewestFirst,
    OldestFirst,
}

/// Search criteria for [`Ledger::find`].
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Case-insensitive substring matched against employee, client and reservation.
    pub query: Option<String>,
    pub employee: Option<String>,
    pub month: Option<String>,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

/// Ids selected for deletion but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    ids: BTreeSet<u64>,
}

impl PendingDeletion {
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drops the selection. The ledger is untouched.
    pub fn cancel(self) {
        log::debug!("deletion of {} record(s) cancelled", self.ids.len());
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&SaleRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// One past the largest id in use, or `None` once `u64::MAX` is taken.
    pub fn next_id(&self) -> Option<u64> {
        self.records
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    pub fn contains_reservation(&self, reservation: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.reservation_number == reservation)
    }

    /// Records one sale per selected product and returns the new ids.
    ///
    /// Nothing is appended unless every check passes: client, reservation and
    /// product list must be non-empty, the employee and every product must be
    /// in the catalog, and the reservation number must not already be used.
    /// Each record snapshots the current commission rate of its product.
    pub fn add(
        &mut self,
        settings: &Settings,
        submission: &Submission,
        at: NaiveDateTime,
    ) -> Result<Vec<u64>> {
        let employee = submission.employee.trim();
        let client = submission.client_name.trim();
        let reservation = submission.reservation_number.trim();

        if employee.is_empty() {
            return Err(SalesError::EmptyField("employee"));
        }
        if client.is_empty() {
            return Err(SalesError::EmptyField("client name"));
        }
        if reservation.is_empty() {
            return Err(SalesError::EmptyField("reservation number"));
        }
        if submission.products.is_empty() {
            return Err(SalesError::NoProducts);
        }
        if !settings.catalog.has_employee(employee) {
            return Err(SalesError::UnknownEmployee(employee.to_string()));
        }
        let mut seen = HashSet::new();
        for product in &submission.products {
            if !settings.catalog.has_product(product) {
                return Err(SalesError::UnknownProduct(product.clone()));
            }
            if !seen.insert(product.as_str()) {
                return Err(SalesError::DuplicateProduct(product.clone()));
            }
        }
        if self.contains_reservation(reservation) {
            log::warn!("rejected duplicate reservation {}", reservation);
            return Err(SalesError::DuplicateReservation(reservation.to_string()));
        }

        let note = submission
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let first = self
            .next_id()
            .ok_or(SalesError::IdsExhausted(u64::MAX))?;
        let ids: Vec<u64> = (0..submission.products.len() as u64)
            .map(|offset| first.checked_add(offset))
            .collect::<Option<_>>()
            .ok_or(SalesError::IdsExhausted(u64::MAX))?;
        for (product, &id) in submission.products.iter().zip(&ids) {
            self.records.push(SaleRecord {
                id,
                timestamp: at,
                employee: employee.to_string(),
                client_name: client.to_string(),
                reservation_number: reservation.to_string(),
                product_type: product.clone(),
                commission_amount: settings.rate_for(product),
                note: note.clone(),
            });
        }
        log::info!(
            "recorded {} sale(s) for {} on reservation {}",
            ids.len(),
            employee,
            reservation
        );
        Ok(ids)
    }

    /// Stages the ids that currently exist; unknown ids are dropped silently.
    pub fn stage_delete<I: IntoIterator<Item = u64>>(&self, ids: I) -> PendingDeletion {
        let ids = ids
            .into_iter()
            .filter(|id| self.get(*id).is_some())
            .collect();
        PendingDeletion { ids }
    }

    pub fn confirm(&mut self, pending: PendingDeletion) -> usize {
        self.delete(pending.ids)
    }

    /// Removes matching records and returns how many went away.
    pub fn delete<I: IntoIterator<Item = u64>>(&mut self, ids: I) -> usize {
        let ids: HashSet<u64> = ids.into_iter().collect();
        if ids.is_empty() {
            return 0;
        }
        let before = self.records.len();
        self.records.retain(|r| !ids.contains(&r.id));
        let removed = before - self.records.len();
        log::info!("deleted {} record(s)", removed);
        removed
    }

    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        log::info!("cleared {} record(s)", count);
        count
    }

    pub fn replace(&mut self, records: Vec<SaleRecord>) {
        log::info!(
            "replacing {} record(s) with {}",
            self.records.len(),
            records.len()
        );
        self.records = records;
    }

    pub fn in_month(&self, month: &str) -> Vec<SaleRecord> {
        self.records
            .iter()
            .filter(|r| r.month() == month)
            .cloned()
            .collect()
    }

    pub fn find(&self, filter: &Filter) -> Vec<&SaleRecord> {
        let query = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        let mut out: Vec<&SaleRecord> = self
            .records
            .iter()
            .filter(|r| match &query {
                Some(q) => {
                    r.employee.to_lowercase().contains(q)
                        || r.client_name.to_lowercase().contains(q)
                        || r.reservation_number.to_lowercase().contains(q)
                }
                None => true,
            })
            .filter(|r| filter.employee.as_deref().is_none_or(|e| r.employee == e))
            .filter(|r| filter.month.as_deref().is_none_or(|m| r.month() == m))
            .collect();
        // stable sorts keep entry order among equal timestamps
        match filter.sort {
            SortOrder::Entry => {}
            SortOrder::OldestFirst => out.sort_by_key(|r| r.timestamp),
            SortOrder::NewestFirst => out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        }
        if let Some(limit) = filter.limit {
            out.truncate(limit);
        }
        out
    }
}
