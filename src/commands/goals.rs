// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::employee_summaries;
use crate::models::Session;
use crate::store;
use crate::utils::{fmt_pct, maybe_print_json, pretty_table, scoped};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let employee = session
        .settings
        .catalog
        .canonical_employee(sub.get_one::<String>("employee").unwrap())?;
    let target = *sub.get_one::<u32>("target").unwrap();
    session.settings.set_goal(&employee, target)?;
    println!("Monthly goal for {} = {}", employee, target);
    Ok(())
}

/// Goals against sales recorded in the current month.
fn list(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = store::now().format("%Y-%m").to_string();
    let records = scoped(session.ledger.records(), Some(month.as_str()));
    let data = employee_summaries(&records, &session.settings);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|s| {
                vec![
                    s.employee,
                    s.goal.to_string(),
                    s.sales.to_string(),
                    fmt_pct(s.attainment_pct),
                ]
            })
            .collect();
        let sold = format!("Sold ({})", month);
        println!(
            "{}",
            pretty_table(&["Employee", "Monthly goal", &sold, "Attainment"], rows)
        );
    }
    Ok(())
}
