// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use salestrack::models::Session;
use salestrack::{cli, commands::sales};

fn run(session: &mut Session, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["salestrack", "sale"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("sale", sale_m)) = matches.subcommand() {
        sales::handle(session, sale_m)
    } else {
        panic!("no sale subcommand");
    }
}

fn seeded() -> Session {
    let mut session = Session::default();
    run(
        &mut session,
        &[
            "add", "--employee", "julie", "--client", "Jean Dupont", "--reservation", "RES1",
            "--product", "tire", "--product", "Glass Breakage",
        ],
    )
    .unwrap();
    run(
        &mut session,
        &[
            "add", "-e", "Alvin", "-c", "Marie Curie", "-r", "RES2", "-p", "Additional Driver",
        ],
    )
    .unwrap();
    session
}

#[test]
fn add_canonicalises_names_and_expands_products() {
    let session = seeded();
    assert_eq!(session.ledger.len(), 3);
    let first = &session.ledger.records()[0];
    assert_eq!(first.employee, "Julie");
    assert_eq!(first.product_type, "Tire");
    assert_eq!(first.id, 1);
}

#[test]
fn add_rejects_reused_reservation() {
    let mut session = seeded();
    let res = run(
        &mut session,
        &["add", "-e", "Sherman", "-c", "X", "-r", "RES1", "-p", "Tire"],
    );
    assert!(res.is_err());
    assert_eq!(session.ledger.len(), 3);
}

#[test]
fn add_rejects_unknown_employee() {
    let mut session = seeded();
    let res = run(
        &mut session,
        &["add", "-e", "Bob", "-c", "X", "-r", "RES9", "-p", "Tire"],
    );
    assert!(res.is_err());
    assert_eq!(session.ledger.len(), 3);
}

#[test]
fn list_filters_and_limits() {
    let session = seeded();
    let matches = cli::build_cli().get_matches_from([
        "salestrack", "sale", "list", "--search", "dupont", "--sort", "entry", "--limit", "1",
    ]);
    if let Some(("sale", sale_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = sale_m.subcommand() {
            let rows = sales::query_rows(&session, list_m).unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].id, 1);
            assert_eq!(rows[0].client, "Jean Dupont");
            assert_eq!(rows[0].commission, "0.00");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no sale subcommand");
    }
}

#[test]
fn rm_needs_confirmation() {
    let mut session = seeded();
    run(&mut session, &["rm", "--id", "1", "--id", "2"]).unwrap();
    assert_eq!(session.ledger.len(), 3);

    run(&mut session, &["rm", "--id", "1", "--id", "2", "--yes"]).unwrap();
    assert_eq!(session.ledger.len(), 1);
    assert_eq!(session.ledger.records()[0].id, 3);

    run(&mut session, &["rm", "--id", "1", "--yes"]).unwrap();
    assert_eq!(session.ledger.len(), 1);
}

#[test]
fn clear_needs_confirmation() {
    let mut session = seeded();
    run(&mut session, &["clear"]).unwrap();
    assert_eq!(session.ledger.len(), 3);
    run(&mut session, &["clear", "-y"]).unwrap();
    assert!(session.ledger.is_empty());
}
