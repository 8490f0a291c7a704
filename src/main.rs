// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use salestrack::{cli, commands, store};

fn main() -> Result<()> {
    env_logger::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = store::data_path(matches.get_one::<String>("data").map(String::as_str))?;
    let mut session = store::open_or_init(&path)?;
    let before = session.clone();

    match matches.subcommand() {
        Some(("init", _)) => {
            store::save(&session, &path)?;
            println!("Session initialized at {}", path.display());
        }
        Some(("sale", sub)) => commands::sales::handle(&mut session, sub)?,
        Some(("report", sub)) => commands::reports::handle(&session, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut session, sub)?,
        Some(("commission", sub)) => commands::commissions::handle(&mut session, sub)?,
        Some(("catalog", sub)) => commands::catalog::handle(&mut session, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&session)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    if session != before {
        store::save(&session, &path)?;
        log::debug!("session saved to {}", path.display());
    }
    Ok(())
}
