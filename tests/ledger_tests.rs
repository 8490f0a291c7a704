// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use salestrack::error::SalesError;
use salestrack::ledger::{Filter, Ledger, SortOrder};
use salestrack::models::{SaleRecord, Settings, Submission};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn submission(employee: &str, client: &str, reservation: &str, products: &[&str]) -> Submission {
    Submission {
        employee: employee.into(),
        client_name: client.into(),
        reservation_number: reservation.into(),
        products: products.iter().map(|p| p.to_string()).collect(),
        note: None,
    }
}

#[test]
fn julie_scenario_add_reject_delete() {
    let settings = Settings::default();
    let mut ledger = Ledger::new();

    let ids = ledger
        .add(
            &settings,
            &submission("Julie", "Jean Dupont", "RES1", &["Tire", "Glass Breakage"]),
            at(10, 9),
        )
        .unwrap();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(ledger.len(), 2);

    let err = ledger
        .add(
            &settings,
            &submission("Alvin", "Someone Else", "RES1", &["Additional Driver"]),
            at(10, 10),
        )
        .unwrap_err();
    assert!(matches!(err, SalesError::DuplicateReservation(ref r) if r == "RES1"));
    assert_eq!(ledger.len(), 2);

    assert_eq!(ledger.delete([1]), 1);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.records()[0].id, 2);
    assert_eq!(ledger.delete([1]), 0);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn one_submission_creates_one_record_per_product() {
    let settings = Settings::default();
    let mut ledger = Ledger::new();
    let products = ["Tire", "Glass Breakage", "Additional Driver"];
    let mut sub = submission("Sherman", "Ana Ruiz", "R-77", &products);
    sub.note = Some("  paid at counter ".into());
    ledger.add(&settings, &sub, at(11, 14)).unwrap();

    assert_eq!(ledger.len(), 3);
    for (r, product) in ledger.records().iter().zip(products) {
        assert_eq!(r.employee, "Sherman");
        assert_eq!(r.client_name, "Ana Ruiz");
        assert_eq!(r.reservation_number, "R-77");
        assert_eq!(r.timestamp, at(11, 14));
        assert_eq!(r.product_type, product);
        assert_eq!(r.note.as_deref(), Some("paid at counter"));
    }
}

#[test]
fn ids_stay_unique_and_increasing_after_deletes() {
    let settings = Settings::default();
    let mut ledger = Ledger::new();
    ledger
        .add(&settings, &submission("Julie", "A", "R1", &["Tire"]), at(3, 9))
        .unwrap();
    ledger
        .add(
            &settings,
            &submission("Alvin", "B", "R2", &["Tire", "Additional Driver"]),
            at(3, 10),
        )
        .unwrap();
    // deleting an earlier id does not free it for reuse
    ledger.delete([1]);
    let ids = ledger
        .add(&settings, &submission("Julie", "C", "R3", &["Tire"]), at(3, 11))
        .unwrap();
    assert_eq!(ids, vec![4]);

    let all: Vec<u64> = ledger.records().iter().map(|r| r.id).collect();
    assert!(all.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn rejected_submissions_leave_ledger_untouched() {
    let settings = Settings::default();
    let mut ledger = Ledger::new();
    let cases = [
        (submission("Julie", "  ", "R1", &["Tire"]), "client"),
        (submission("Julie", "A", "", &["Tire"]), "reservation"),
        (submission("Julie", "A", "R1", &[]), "products"),
        (submission("Nobody", "A", "R1", &["Tire"]), "employee"),
        (submission("Julie", "A", "R1", &["Pet Cover"]), "product"),
        (submission("Julie", "A", "R1", &["Tire", "Tire"]), "repeat"),
    ];
    for (sub, label) in cases {
        assert!(ledger.add(&settings, &sub, at(5, 9)).is_err(), "{}", label);
    }
    assert!(ledger.is_empty());
    assert_eq!(ledger.next_id(), Some(1));
}

#[test]
fn delete_of_nothing_or_absent_ids_is_a_no_op() {
    let settings = Settings::default();
    let mut ledger = Ledger::new();
    ledger
        .add(&settings, &submission("Julie", "A", "R1", &["Tire"]), at(5, 9))
        .unwrap();
    assert_eq!(ledger.delete(Vec::<u64>::new()), 0);
    assert_eq!(ledger.delete([42]), 0);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn staged_deletion_can_be_cancelled_or_confirmed() {
    let settings = Settings::default();
    let mut ledger = Ledger::new();
    ledger
        .add(
            &settings,
            &submission("Julie", "A", "R1", &["Tire", "Glass Breakage"]),
            at(5, 9),
        )
        .unwrap();

    let pending = ledger.stage_delete([1, 99]);
    assert_eq!(pending.ids().collect::<Vec<_>>(), vec![1]);
    pending.cancel();
    assert_eq!(ledger.len(), 2);

    let pending = ledger.stage_delete([1, 2]);
    assert_eq!(ledger.confirm(pending), 2);
    assert!(ledger.is_empty());
}

#[test]
fn clear_reports_previous_count() {
    let settings = Settings::default();
    let mut ledger = Ledger::new();
    ledger
        .add(
            &settings,
            &submission("Alvin", "A", "R1", &["Tire", "Glass Breakage"]),
            at(5, 9),
        )
        .unwrap();
    assert_eq!(ledger.clear(), 2);
    assert_eq!(ledger.clear(), 0);
}

#[test]
fn commission_is_snapshotted_at_entry() {
    let mut settings = Settings::default();
    settings
        .set_commission("Tire", Decimal::new(500, 2))
        .unwrap();
    let mut ledger = Ledger::new();
    ledger
        .add(&settings, &submission("Julie", "A", "R1", &["Tire"]), at(5, 9))
        .unwrap();

    settings
        .set_commission("Tire", Decimal::new(750, 2))
        .unwrap();
    ledger
        .add(&settings, &submission("Julie", "B", "R2", &["Tire"]), at(5, 10))
        .unwrap();

    let amounts: Vec<Decimal> = ledger
        .records()
        .iter()
        .map(|r| r.commission_amount)
        .collect();
    assert_eq!(amounts, vec![Decimal::new(500, 2), Decimal::new(750, 2)]);
}

#[test]
fn negative_commission_rate_is_rejected() {
    let mut settings = Settings::default();
    assert!(matches!(
        settings.set_commission("Tire", Decimal::new(-1, 0)),
        Err(SalesError::InvalidRate(_))
    ));
    assert_eq!(settings.rate_for("Tire"), Decimal::ZERO);
}

#[test]
fn find_matches_case_insensitively_and_sorts_on_request() {
    let settings = Settings::default();
    let mut ledger = Ledger::new();
    ledger
        .add(&settings, &submission("Julie", "Jean Dupont", "AB-1", &["Tire"]), at(3, 9))
        .unwrap();
    ledger
        .add(&settings, &submission("Alvin", "Marie Curie", "CD-2", &["Tire"]), at(20, 9))
        .unwrap();
    ledger
        .add(&settings, &submission("Julie", "Paul Dupond", "EF-3", &["Tire"]), at(12, 9))
        .unwrap();

    let hits = ledger.find(&Filter {
        query: Some("DUPON".into()),
        ..Filter::default()
    });
    let ids: Vec<u64> = hits.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let newest = ledger.find(&Filter {
        sort: SortOrder::NewestFirst,
        limit: Some(2),
        ..Filter::default()
    });
    let ids: Vec<u64> = newest.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3]);

    let by_reservation = ledger.find(&Filter {
        query: Some("cd-".into()),
        employee: Some("Alvin".into()),
        month: Some("2025-03".into()),
        ..Filter::default()
    });
    assert_eq!(by_reservation.len(), 1);
    assert_eq!(by_reservation[0].client_name, "Marie Curie");
}

fn imported(id: u64) -> SaleRecord {
    SaleRecord {
        id,
        timestamp: at(1, 8),
        employee: "Julie".into(),
        client_name: "Imported".into(),
        reservation_number: format!("IMP-{}", id),
        product_type: "Tire".into(),
        commission_amount: Decimal::ZERO,
        note: None,
    }
}

#[test]
fn add_refuses_when_ids_run_out() {
    let settings = Settings::default();
    let mut ledger = Ledger::from_records(vec![imported(u64::MAX)]);
    assert_eq!(ledger.next_id(), None);
    let res = ledger.add(&settings, &submission("Julie", "A", "R1", &["Tire"]), at(5, 9));
    assert!(matches!(res, Err(SalesError::IdsExhausted(_))));
    assert_eq!(ledger.len(), 1);

    // room for one id, not two
    let mut ledger = Ledger::from_records(vec![imported(u64::MAX - 1)]);
    let two = submission("Julie", "A", "R1", &["Tire", "Glass Breakage"]);
    assert!(matches!(
        ledger.add(&settings, &two, at(5, 9)),
        Err(SalesError::IdsExhausted(_))
    ));
    assert_eq!(ledger.len(), 1);
    let ids = ledger
        .add(&settings, &submission("Julie", "A", "R1", &["Tire"]), at(5, 9))
        .unwrap();
    assert_eq!(ids, vec![u64::MAX]);
}
