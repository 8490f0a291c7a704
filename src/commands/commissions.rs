// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Session;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let product = session
                .settings
                .catalog
                .canonical_product(sub.get_one::<String>("product").unwrap())?;
            let rate = parse_decimal(sub.get_one::<String>("rate").unwrap().trim())?;
            session.settings.set_commission(&product, rate)?;
            println!(
                "Commission for {} = {} (applies to new sales only)",
                product,
                fmt_money(&rate)
            );
        }
        Some(("list", sub)) => {
            let settings = &session.settings;
            let data: Vec<(String, String)> = settings
                .catalog
                .products
                .iter()
                .map(|p| (p.clone(), fmt_money(&settings.rate_for(p))))
                .collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data.into_iter().map(|(p, r)| vec![p, r]).collect();
                println!("{}", pretty_table(&["Product", "Commission"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
