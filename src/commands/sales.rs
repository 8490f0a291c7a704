// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{Filter, SortOrder};
use crate::models::{SaleRecord, Session, Submission};
use crate::store;
use crate::tabular::TIMESTAMP_FORMAT;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        Some(("clear", sub)) => clear(session, sub)?,
        Some(("check", sub)) => check(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let catalog = &session.settings.catalog;
    let employee = catalog.canonical_employee(sub.get_one::<String>("employee").unwrap())?;
    let products = sub
        .get_many::<String>("product")
        .unwrap()
        .map(|p| catalog.canonical_product(p))
        .collect::<Result<Vec<_>, _>>()?;
    let submission = Submission {
        employee,
        client_name: sub.get_one::<String>("client").unwrap().to_string(),
        reservation_number: sub.get_one::<String>("reservation").unwrap().to_string(),
        products,
        note: sub.get_one::<String>("note").map(|s| s.to_string()),
    };

    let ids = session
        .ledger
        .add(&session.settings, &submission, store::now())?;
    println!(
        "Recorded {} sale(s) for {} on reservation {} (ids {})",
        ids.len(),
        submission.employee,
        submission.reservation_number.trim(),
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

fn list(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let total = data.len();
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.timestamp,
                    r.employee,
                    r.client,
                    r.reservation_number,
                    r.product_type,
                    r.commission,
                    r.note,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Date",
                    "Employee",
                    "Client",
                    "Reservation",
                    "Product",
                    "Commission",
                    "Note",
                ],
                rows,
            )
        );
        println!("{} sale(s) shown, {} recorded", total, session.ledger.len());
    }
    Ok(())
}

#[derive(Serialize)]
pub struct SaleRow {
    pub id: u64,
    pub timestamp: String,
    pub employee: String,
    pub client: String,
    pub reservation_number: String,
    pub product_type: String,
    pub commission: String,
    pub note: String,
}

impl From<&SaleRecord> for SaleRow {
    fn from(r: &SaleRecord) -> Self {
        SaleRow {
            id: r.id,
            timestamp: r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            employee: r.employee.clone(),
            client: r.client_name.clone(),
            reservation_number: r.reservation_number.clone(),
            product_type: r.product_type.clone(),
            commission: fmt_money(&r.commission_amount),
            note: r.note.clone().unwrap_or_default(),
        }
    }
}

pub fn query_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<SaleRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m.trim())?),
        None => None,
    };
    let sort = match sub.get_one::<String>("sort").map(String::as_str) {
        Some("entry") => SortOrder::Entry,
        Some("oldest") => SortOrder::OldestFirst,
        _ => SortOrder::NewestFirst,
    };
    let filter = Filter {
        query: sub.get_one::<String>("search").cloned(),
        employee: match sub.get_one::<String>("employee") {
            Some(e) => Some(session.settings.catalog.canonical_employee(e)?),
            None => None,
        },
        month,
        sort,
        limit: sub.get_one::<usize>("limit").copied(),
    };
    Ok(session
        .ledger
        .find(&filter)
        .into_iter()
        .map(SaleRow::from)
        .collect())
}

fn remove(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let requested: Vec<u64> = sub.get_many::<u64>("id").unwrap().copied().collect();
    let pending = session.ledger.stage_delete(requested);
    if pending.is_empty() {
        println!("No matching sales; nothing deleted");
        return Ok(());
    }
    if !sub.get_flag("yes") {
        let rows: Vec<Vec<String>> = pending
            .ids()
            .filter_map(|id| session.ledger.get(id))
            .map(|r| {
                let row = SaleRow::from(r);
                vec![
                    row.id.to_string(),
                    row.employee,
                    row.client,
                    row.reservation_number,
                    row.product_type,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Employee", "Client", "Reservation", "Product"], rows)
        );
        println!(
            "{} sale(s) selected; re-run with --yes to delete them",
            pending.len()
        );
        pending.cancel();
        return Ok(());
    }
    let removed = session.ledger.confirm(pending);
    println!("Deleted {} sale(s)", removed);
    Ok(())
}

fn clear(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    if session.ledger.is_empty() {
        println!("No sales to delete");
        return Ok(());
    }
    if !sub.get_flag("yes") {
        println!(
            "{} sale(s) recorded; re-run with --yes to delete all of them",
            session.ledger.len()
        );
        return Ok(());
    }
    let removed = session.ledger.clear();
    println!("Deleted all {} sale(s)", removed);
    Ok(())
}

fn check(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let reservation = sub.get_one::<String>("reservation").unwrap().trim();
    let records = session.ledger.records();
    if crate::aggregator::duplicate_reservation_check(records, reservation) {
        let n = records
            .iter()
            .filter(|r| r.reservation_number == reservation)
            .count();
        println!(
            "Reservation {} is already recorded ({} sale(s))",
            reservation, n
        );
    } else {
        println!("Reservation {} is not recorded yet", reservation);
    }
    Ok(())
}
