// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a ledger snapshot. Nothing here mutates state, and an
//! empty slice always yields zero-valued results.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{SaleRecord, Settings};

pub const TOTAL_LABEL: &str = "Total";

/// Employee × product sale counts with margin totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub employees: Vec<String>,
    pub products: Vec<String>,
    /// `counts[row][col]`, indexed like `employees` and `products`.
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    pub fn count(&self, employee: &str, product: &str) -> usize {
        match (self.row_index(employee), self.col_index(product)) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn row_total(&self, employee: &str) -> usize {
        self.row_index(employee)
            .map(|r| self.counts[r].iter().sum())
            .unwrap_or(0)
    }

    pub fn column_total(&self, product: &str) -> usize {
        self.col_index(product)
            .map(|c| self.counts.iter().map(|row| row[c]).sum())
            .unwrap_or(0)
    }

    pub fn grand_total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Header plus body rows with a trailing "Total" column and row, ready
    /// for a table or a sheet.
    pub fn to_rows(&self) -> (Vec<String>, Vec<Vec<String>>) {
        let mut header = vec!["Employee".to_string()];
        header.extend(self.products.iter().cloned());
        header.push(TOTAL_LABEL.to_string());

        let mut rows = Vec::with_capacity(self.employees.len() + 1);
        for (r, employee) in self.employees.iter().enumerate() {
            let mut row = vec![employee.clone()];
            row.extend(self.counts[r].iter().map(|n| n.to_string()));
            row.push(self.counts[r].iter().sum::<usize>().to_string());
            rows.push(row);
        }
        let mut totals = vec![TOTAL_LABEL.to_string()];
        totals.extend(self.products.iter().map(|p| self.column_total(p).to_string()));
        totals.push(self.grand_total().to_string());
        rows.push(totals);
        (header, rows)
    }

    fn row_index(&self, employee: &str) -> Option<usize> {
        self.employees.iter().position(|e| e == employee)
    }

    fn col_index(&self, product: &str) -> Option<usize> {
        self.products.iter().position(|p| p == product)
    }
}

/// Per-employee figures shown on the team report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub employee: String,
    pub sales: usize,
    pub goal: u32,
    pub attainment_pct: f64,
    pub commission: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Today,
    ThisWeek,
}

/// Catalog entries first, then anything else seen in the data in first
/// appearance order, so margins always add up to the record count.
fn ordered_axis<'a, F>(configured: &[String], records: &'a [SaleRecord], key: F) -> Vec<String>
where
    F: Fn(&'a SaleRecord) -> &'a str,
{
    let mut axis: Vec<String> = configured.to_vec();
    for r in records {
        let k = key(r);
        if !axis.iter().any(|a| a == k) {
            axis.push(k.to_string());
        }
    }
    axis
}

pub fn counts_by_employee_and_product(records: &[SaleRecord], settings: &Settings) -> CrossTab {
    let employees = ordered_axis(&settings.catalog.employees, records, |r| r.employee.as_str());
    let products = ordered_axis(&settings.catalog.products, records, |r| r.product_type.as_str());
    let mut counts = vec![vec![0usize; products.len()]; employees.len()];
    for r in records {
        let row = employees.iter().position(|e| *e == r.employee);
        let col = products.iter().position(|p| *p == r.product_type);
        if let (Some(row), Some(col)) = (row, col) {
            counts[row][col] += 1;
        }
    }
    log::debug!(
        "cross-tab over {} record(s): {}x{}",
        records.len(),
        employees.len(),
        products.len()
    );
    CrossTab {
        employees,
        products,
        counts,
    }
}

pub fn totals_by_employee(records: &[SaleRecord], settings: &Settings) -> Vec<(String, usize)> {
    let employees = ordered_axis(&settings.catalog.employees, records, |r| r.employee.as_str());
    let mut tally: HashMap<&str, usize> = HashMap::new();
    for r in records {
        *tally.entry(r.employee.as_str()).or_insert(0) += 1;
    }
    employees
        .into_iter()
        .map(|e| {
            let n = tally.get(e.as_str()).copied().unwrap_or(0);
            (e, n)
        })
        .collect()
}

fn sales_for(records: &[SaleRecord], employee: &str) -> usize {
    records.iter().filter(|r| r.employee == employee).count()
}

/// `100 * sales / goal`, uncapped; 0 when no goal is set.
pub fn goal_attainment(records: &[SaleRecord], settings: &Settings, employee: &str) -> f64 {
    let goal = settings.goal_for(employee);
    if goal == 0 {
        return 0.0;
    }
    100.0 * sales_for(records, employee) as f64 / goal as f64
}

/// Sums the commission snapshots stored on the employee's records.
pub fn commission_total(records: &[SaleRecord], employee: &str) -> Decimal {
    records
        .iter()
        .filter(|r| r.employee == employee)
        .map(|r| r.commission_amount)
        .sum()
}

pub fn employee_summaries(records: &[SaleRecord], settings: &Settings) -> Vec<EmployeeSummary> {
    totals_by_employee(records, settings)
        .into_iter()
        .map(|(employee, sales)| EmployeeSummary {
            goal: settings.goal_for(&employee),
            attainment_pct: goal_attainment(records, settings, &employee),
            commission: commission_total(records, &employee),
            employee,
            sales,
        })
        .collect()
}

/// Most recent Monday on or before `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

pub fn time_window_count(records: &[SaleRecord], window: TimeWindow, today: NaiveDate) -> usize {
    match window {
        TimeWindow::Today => records.iter().filter(|r| r.date() == today).count(),
        TimeWindow::ThisWeek => {
            let monday = week_start(today);
            records.iter().filter(|r| r.date() >= monday).count()
        }
    }
}

/// Highest total; ties go to whoever is listed first in the catalog.
pub fn top_employee(records: &[SaleRecord], settings: &Settings) -> Option<String> {
    if records.is_empty() {
        return None;
    }
    let mut best: Option<(String, usize)> = None;
    for (employee, n) in totals_by_employee(records, settings) {
        if best.as_ref().is_none_or(|(_, top)| n > *top) {
            best = Some((employee, n));
        }
    }
    best.map(|(e, _)| e)
}

/// Highest count; ties go to the product that appears first in the data.
pub fn most_sold_product(records: &[SaleRecord]) -> Option<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut tally: HashMap<&str, usize> = HashMap::new();
    for r in records {
        let entry = tally.entry(r.product_type.as_str()).or_insert_with(|| {
            order.push(r.product_type.as_str());
            0
        });
        *entry += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for product in order {
        let n = tally[product];
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((product, n));
        }
    }
    best.map(|(p, _)| p.to_string())
}

pub fn duplicate_reservation_check(records: &[SaleRecord], reservation: &str) -> bool {
    records.iter().any(|r| r.reservation_number == reservation)
}

/// Sale counts per `YYYY-MM`, oldest month first.
pub fn counts_by_month(records: &[SaleRecord]) -> Vec<(String, usize)> {
    let mut map: BTreeMap<String, usize> = BTreeMap::new();
    for r in records {
        *map.entry(r.month()).or_insert(0) += 1;
    }
    map.into_iter().collect()
}
