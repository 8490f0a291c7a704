// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesError};
use crate::ledger::Ledger;

pub const DEFAULT_EMPLOYEES: [&str; 3] = ["Julie", "Sherman", "Alvin"];
pub const DEFAULT_PRODUCTS: [&str; 4] = [
    "Tire",
    "Glass Breakage",
    "Additional Driver",
    "Partial Deductible Buyback",
];

/// One insurance product sold on one reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: u64,
    pub timestamp: NaiveDateTime,
    pub employee: String,
    pub client_name: String,
    pub reservation_number: String,
    pub product_type: String,
    pub commission_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SaleRecord {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// `YYYY-MM` bucket the sale counts towards.
    pub fn month(&self) -> String {
        self.timestamp.format("%Y-%m").to_string()
    }
}

/// A single data-entry form submission; expands into one record per product.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub employee: String,
    pub client_name: String,
    pub reservation_number: String,
    pub products: Vec<String>,
    pub note: Option<String>,
}

/// The team and product enumerations. Ledger validation and report ordering
/// both read from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub employees: Vec<String>,
    pub products: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            employees: DEFAULT_EMPLOYEES.iter().map(|s| s.to_string()).collect(),
            products: DEFAULT_PRODUCTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Catalog {
    pub fn has_employee(&self, name: &str) -> bool {
        self.employees.iter().any(|e| e == name)
    }

    pub fn has_product(&self, name: &str) -> bool {
        self.products.iter().any(|p| p == name)
    }

    /// Case-insensitive lookup returning the catalog spelling.
    pub fn canonical_employee(&self, name: &str) -> Result<String> {
        find_ignore_case(&self.employees, name)
            .ok_or_else(|| SalesError::UnknownEmployee(name.trim().to_string()))
    }

    pub fn canonical_product(&self, name: &str) -> Result<String> {
        find_ignore_case(&self.products, name)
            .ok_or_else(|| SalesError::UnknownProduct(name.trim().to_string()))
    }
}

fn find_ignore_case(list: &[String], name: &str) -> Option<String> {
    let needle = name.trim().to_lowercase();
    list.iter()
        .find(|candidate| candidate.to_lowercase() == needle)
        .cloned()
}

/// Monthly goals, commission price table, and the catalog they are keyed by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub monthly_goals: BTreeMap<String, u32>,
    #[serde(default)]
    pub commission_rates: BTreeMap<String, Decimal>,
}

impl Default for Settings {
    fn default() -> Self {
        let catalog = Catalog::default();
        let monthly_goals = catalog.employees.iter().map(|e| (e.clone(), 0)).collect();
        let commission_rates = catalog
            .products
            .iter()
            .map(|p| (p.clone(), Decimal::ZERO))
            .collect();
        Self {
            catalog,
            monthly_goals,
            commission_rates,
        }
    }
}

impl Settings {
    pub fn goal_for(&self, employee: &str) -> u32 {
        self.monthly_goals.get(employee).copied().unwrap_or(0)
    }

    pub fn rate_for(&self, product: &str) -> Decimal {
        self.commission_rates
            .get(product)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn set_goal(&mut self, employee: &str, target: u32) -> Result<()> {
        if !self.catalog.has_employee(employee) {
            return Err(SalesError::UnknownEmployee(employee.to_string()));
        }
        self.monthly_goals.insert(employee.to_string(), target);
        log::info!("monthly goal for {} set to {}", employee, target);
        Ok(())
    }

    /// Later sales pick up the new rate; stored records keep their snapshot.
    pub fn set_commission(&mut self, product: &str, rate: Decimal) -> Result<()> {
        if !self.catalog.has_product(product) {
            return Err(SalesError::UnknownProduct(product.to_string()));
        }
        if rate < Decimal::ZERO {
            return Err(SalesError::InvalidRate(rate.to_string()));
        }
        self.commission_rates.insert(product.to_string(), rate);
        log::info!("commission for {} set to {}", product, rate);
        Ok(())
    }

    pub fn add_employee(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SalesError::EmptyField("employee"));
        }
        if find_ignore_case(&self.catalog.employees, name).is_some() {
            return Err(SalesError::AlreadyListed(name.to_string()));
        }
        self.catalog.employees.push(name.to_string());
        self.monthly_goals.entry(name.to_string()).or_insert(0);
        Ok(())
    }

    pub fn add_product(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SalesError::EmptyField("product type"));
        }
        if find_ignore_case(&self.catalog.products, name).is_some() {
            return Err(SalesError::AlreadyListed(name.to_string()));
        }
        self.catalog.products.push(name.to_string());
        self.commission_rates
            .entry(name.to_string())
            .or_insert(Decimal::ZERO);
        Ok(())
    }
}

/// Everything a running session owns. Handlers borrow it; nothing is global.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub ledger: Ledger,
    pub settings: Settings,
}
