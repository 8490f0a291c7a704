// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{
    counts_by_employee_and_product, counts_by_month, employee_summaries, most_sold_product,
    time_window_count, top_employee, EmployeeSummary, TimeWindow,
};
use crate::models::Session;
use crate::store;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, parse_date, parse_month, pretty_table, scoped};
use anyhow::Result;
use serde::Serialize;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("crosstab", sub)) => crosstab(session, sub)?,
        Some(("employees", sub)) => employees(session, sub)?,
        Some(("months", sub)) => months(session, sub)?,
        Some(("activity", sub)) => activity(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_scope(sub: &clap::ArgMatches) -> Result<Option<String>> {
    match sub.get_one::<String>("month") {
        Some(m) => Ok(Some(parse_month(m.trim())?)),
        None => Ok(None),
    }
}

fn crosstab(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_scope(sub)?;
    let records = scoped(session.ledger.records(), month.as_deref());
    let tab = counts_by_employee_and_product(&records, &session.settings);
    if !maybe_print_json(json_flag, jsonl_flag, &tab)? {
        let (header, rows) = tab.to_rows();
        let titles: Vec<&str> = header.iter().map(String::as_str).collect();
        println!("{}", pretty_table(&titles, rows));
    }
    Ok(())
}

/// Per-employee figures for `--month`, or the current month when omitted.
pub fn summaries_for(
    session: &Session,
    sub: &clap::ArgMatches,
) -> Result<Vec<EmployeeSummary>> {
    let month = match month_scope(sub)? {
        Some(m) => m,
        None => store::now().format("%Y-%m").to_string(),
    };
    let records = scoped(session.ledger.records(), Some(month.as_str()));
    Ok(employee_summaries(&records, &session.settings))
}

fn employees(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = summaries_for(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|s| {
                vec![
                    s.employee,
                    s.sales.to_string(),
                    s.goal.to_string(),
                    fmt_pct(s.attainment_pct),
                    fmt_money(&s.commission),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Employee", "Sales", "Monthly goal", "Attainment", "Commission"],
                rows
            )
        );
    }
    Ok(())
}

fn months(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = counts_by_month(session.ledger.records());
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|(m, n)| vec![m, n.to_string()])
            .collect();
        println!("{}", pretty_table(&["Month", "Sales"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Activity {
    pub date: String,
    pub today: usize,
    pub this_week: usize,
    pub total: usize,
    pub top_employee: Option<String>,
    pub most_sold_product: Option<String>,
}

pub fn activity_for(session: &Session, sub: &clap::ArgMatches) -> Result<Activity> {
    let today = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d.trim())?,
        None => store::now().date(),
    };
    let month = month_scope(sub)?;
    let all = session.ledger.records();
    let records = scoped(all, month.as_deref());
    Ok(Activity {
        date: today.to_string(),
        today: time_window_count(all, TimeWindow::Today, today),
        this_week: time_window_count(all, TimeWindow::ThisWeek, today),
        total: records.len(),
        top_employee: top_employee(&records, &session.settings),
        most_sold_product: most_sold_product(&records),
    })
}

fn activity(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let a = activity_for(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &a)? {
        let dash = || "-".to_string();
        let rows = vec![
            vec![format!("Today ({})", a.date), a.today.to_string()],
            vec!["This week".into(), a.this_week.to_string()],
            vec!["Total".into(), a.total.to_string()],
            vec!["Top employee".into(), a.top_employee.clone().unwrap_or_else(dash)],
            vec![
                "Most sold product".into(),
                a.most_sold_product.clone().unwrap_or_else(dash),
            ],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}
