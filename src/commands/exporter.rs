// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Session;
use crate::{snapshot, spreadsheet, store, tabular};
use anyhow::{Context, Result};

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("full", sub)) => {
            let out = sub.get_one::<String>("out").unwrap().trim();
            let text = snapshot::export_full(session, store::now())?;
            std::fs::write(out, text).with_context(|| format!("Write {}", out))?;
            println!("Exported session ({} sale(s)) to {}", session.ledger.len(), out);
        }
        Some(("csv", sub)) => {
            let out = sub.get_one::<String>("out").unwrap().trim();
            let text = tabular::export_tabular(session.ledger.records())?;
            std::fs::write(out, text).with_context(|| format!("Write {}", out))?;
            println!("Exported {} sale(s) to {}", session.ledger.len(), out);
        }
        Some(("xlsx", sub)) => {
            let out = sub.get_one::<String>("out").unwrap().trim();
            let bytes =
                spreadsheet::export_spreadsheet(session.ledger.records(), &session.settings)?;
            std::fs::write(out, bytes).with_context(|| format!("Write {}", out))?;
            println!("Exported {} sale(s) to {}", session.ledger.len(), out);
        }
        _ => {}
    }
    Ok(())
}
