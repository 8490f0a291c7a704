// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::aggregator::{
    counts_by_employee_and_product, employee_summaries, CrossTab, TOTAL_LABEL,
};
use crate::error::Result;
use crate::models::{SaleRecord, Settings};
use crate::tabular::{HEADER, TIMESTAMP_FORMAT};

pub const SALES_SHEET: &str = "Sales";
pub const SUMMARY_SHEET: &str = "Summary";
pub const EMPLOYEES_SHEET: &str = "Employees";

fn write_header(sheet: &mut Worksheet, header: &[&str], bold: &Format) -> Result<()> {
    for (col, title) in header.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, bold)?;
    }
    Ok(())
}

/// Summary sheet body: one row per employee with its total, then the column
/// totals and the grand total under [`TOTAL_LABEL`].
pub fn summary_rows(tab: &CrossTab) -> Vec<(String, Vec<usize>)> {
    let mut rows: Vec<(String, Vec<usize>)> = tab
        .employees
        .iter()
        .zip(&tab.counts)
        .map(|(employee, counts)| {
            let mut cells = counts.clone();
            cells.push(tab.row_total(employee));
            (employee.clone(), cells)
        })
        .collect();
    let mut totals: Vec<usize> = tab.products.iter().map(|p| tab.column_total(p)).collect();
    totals.push(tab.grand_total());
    rows.push((TOTAL_LABEL.to_string(), totals));
    rows
}

/// Builds an XLSX workbook: raw records, the employee × product cross-tab,
/// and per-employee goal and commission figures.
pub fn export_spreadsheet(records: &[SaleRecord], settings: &Settings) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SALES_SHEET)?;
        write_header(sheet, &HEADER, &bold)?;
        for (i, r) in records.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_number(row, 0, r.id as f64)?;
            sheet.write_string(row, 1, r.timestamp.format(TIMESTAMP_FORMAT).to_string())?;
            sheet.write_string(row, 2, r.employee.as_str())?;
            sheet.write_string(row, 3, r.client_name.as_str())?;
            sheet.write_string(row, 4, r.reservation_number.as_str())?;
            sheet.write_string(row, 5, r.product_type.as_str())?;
            sheet.write_number(row, 6, r.commission_amount.to_f64().unwrap_or(0.0))?;
            sheet.write_string(row, 7, r.month())?;
            sheet.write_string(row, 8, r.note.as_deref().unwrap_or(""))?;
        }
        sheet.autofit();
    }

    {
        let tab = counts_by_employee_and_product(records, settings);
        let sheet = workbook.add_worksheet();
        sheet.set_name(SUMMARY_SHEET)?;
        let mut titles = vec!["Employee"];
        titles.extend(tab.products.iter().map(String::as_str));
        titles.push(TOTAL_LABEL);
        write_header(sheet, &titles, &bold)?;

        for (i, (label, counts)) in summary_rows(&tab).iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_string_with_format(row, 0, label.as_str(), &bold)?;
            for (c, n) in counts.iter().enumerate() {
                sheet.write_number(row, (c + 1) as u16, *n as f64)?;
            }
        }
        sheet.autofit();
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(EMPLOYEES_SHEET)?;
        write_header(
            sheet,
            &["Employee", "Sales", "Monthly goal", "Attainment %", "Commission"],
            &bold,
        )?;
        for (i, s) in employee_summaries(records, settings).iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_string(row, 0, s.employee.as_str())?;
            sheet.write_number(row, 1, s.sales as f64)?;
            sheet.write_number(row, 2, s.goal as f64)?;
            sheet.write_number(row, 3, (s.attainment_pct * 10.0).round() / 10.0)?;
            sheet.write_number(row, 4, s.commission.to_f64().unwrap_or(0.0))?;
        }
        sheet.autofit();
    }

    let bytes = workbook.save_to_buffer()?;
    log::debug!("spreadsheet built, {} bytes", bytes.len());
    Ok(bytes)
}
