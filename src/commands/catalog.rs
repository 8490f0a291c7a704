// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Session;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let catalog = &session.settings.catalog;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), catalog)? {
                let mut rows = Vec::new();
                for e in &catalog.employees {
                    rows.push(vec!["employee".to_string(), e.clone()]);
                }
                for p in &catalog.products {
                    rows.push(vec!["product".to_string(), p.clone()]);
                }
                println!("{}", pretty_table(&["Kind", "Name"], rows));
            }
        }
        Some(("add-employee", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            session.settings.add_employee(name)?;
            println!("Added employee '{}'", name.trim());
        }
        Some(("add-product", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            session.settings.add_product(name)?;
            println!("Added product type '{}'", name.trim());
        }
        _ => {}
    }
    Ok(())
}
