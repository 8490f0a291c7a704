// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Session;
use crate::store::read_import;
use crate::{snapshot, tabular};
use anyhow::{Context, Result};

/// Imports replace state wholesale; a file that fails to parse changes nothing.
pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("full", sub)) => import_full(session, sub),
        Some(("csv", sub)) => import_csv(session, sub),
        _ => Ok(()),
    }
}

fn import_full(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let text = read_import(path)?;
    snapshot::import_full(session, &text)
        .with_context(|| format!("Import snapshot {}", path))?;
    println!(
        "Imported session with {} sale(s) from {}",
        session.ledger.len(),
        path
    );
    Ok(())
}

fn import_csv(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let text = read_import(path)?;
    let count = tabular::import_tabular(&mut session.ledger, &text)
        .with_context(|| format!("Import CSV {}", path))?;
    println!("Imported {} sale(s) from {}", count, path);
    Ok(())
}
