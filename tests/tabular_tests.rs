// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use salestrack::ledger::Ledger;
use salestrack::models::SaleRecord;
use salestrack::tabular::{export_tabular, import_tabular, parse_tabular};

fn record(id: u64, client: &str, note: Option<&str>) -> SaleRecord {
    SaleRecord {
        id,
        timestamp: NaiveDate::from_ymd_opt(2025, 5, 6)
            .unwrap()
            .and_hms_opt(14, 3, 9)
            .unwrap(),
        employee: "Julie".into(),
        client_name: client.into(),
        reservation_number: "RES9".into(),
        product_type: "Glass Breakage".into(),
        commission_amount: Decimal::new(1200, 2),
        note: note.map(str::to_string),
    }
}

#[test]
fn export_writes_header_and_one_row_per_sale() {
    let csv = export_tabular(&[record(1, "Jean Dupont", None)]).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("id,timestamp,employee,client,reservation_number,product_type,commission_amount,month,note")
    );
    assert_eq!(
        lines.next(),
        Some("1,2025-05-06 14:03:09,Julie,Jean Dupont,RES9,Glass Breakage,12.00,2025-05,")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn export_of_empty_ledger_is_header_only() {
    let csv = export_tabular(&[]).unwrap();
    assert_eq!(csv.lines().count(), 1);
    assert!(csv.starts_with("id,timestamp,"));
}

#[test]
fn export_quotes_embedded_delimiters() {
    let csv = export_tabular(&[record(1, "Dupont, \"JD\"", Some("a,b"))]).unwrap();
    assert!(csv.contains("\"Dupont, \"\"JD\"\"\""));
    assert!(csv.ends_with("\"a,b\"\n"));
}

#[test]
fn exported_csv_imports_back() {
    let original = vec![record(3, "Dupont, \"JD\"", Some("window seat")), record(7, "Ana", None)];
    let csv = export_tabular(&original).unwrap();
    assert_eq!(parse_tabular(&csv).unwrap(), original);
}

#[test]
fn missing_id_and_commission_columns_get_defaults() {
    let csv = "timestamp,employee,client,reservation_number,product_type\n\
               2025-05-01 09:00:00,Julie,A,R1,Tire\n\
               2025-05-01 09:00:00,Julie,A,R1,Glass Breakage\n";
    let records = parse_tabular(csv).unwrap();
    assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(records.iter().all(|r| r.commission_amount == Decimal::ZERO));
}

#[test]
fn blank_ids_are_generated_after_the_largest_explicit_one() {
    let csv = "id,timestamp,employee,client,reservation_number,product_type\n\
               ,2025-05-01,Julie,A,R1,Tire\n\
               10,2025-05-01,Julie,B,R2,Tire\n";
    let records = parse_tabular(csv).unwrap();
    assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![11, 10]);
}

#[test]
fn largest_possible_id_imports_when_every_row_has_one() {
    let csv = "id,timestamp,employee,client,reservation_number,product_type\n\
               18446744073709551615,2025-03-01 10:00:00,Julie,A,R1,Tire\n";
    let records = parse_tabular(csv).unwrap();
    assert_eq!(records[0].id, u64::MAX);

    let with_blank = "id,timestamp,employee,client,reservation_number,product_type\n\
                      18446744073709551615,2025-03-01 10:00:00,Julie,A,R1,Tire\n\
                      ,2025-03-01 10:00:00,Julie,B,R2,Tire\n";
    assert!(parse_tabular(with_blank).is_err());
}

#[test]
fn earlier_tool_exports_with_french_headers_import() {
    let csv = "\u{feff}Date,Employé,Client,Numéro de réservation,Type d'assurance,Mois\n\
               2025-01-15 10:12:00,Sherman,Luc Petit,B-552,Pneumatique,2025-01\n";
    let records = parse_tabular(csv).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].employee, "Sherman");
    assert_eq!(records[0].reservation_number, "B-552");
    assert_eq!(records[0].product_type, "Pneumatique");
    assert_eq!(records[0].month(), "2025-01");
}

#[test]
fn bad_rows_abort_the_whole_import() {
    let mut ledger = Ledger::from_records(vec![record(1, "Kept", None)]);
    let bad_time = "timestamp,employee,client,reservation_number,product_type\n\
                    2025-05-01,Julie,A,R1,Tire\n\
                    yesterday,Julie,B,R2,Tire\n";
    assert!(import_tabular(&mut ledger, bad_time).is_err());

    let missing_column = "timestamp,employee,client,product_type\n2025-05-01,Julie,A,Tire\n";
    assert!(import_tabular(&mut ledger, missing_column).is_err());

    let duplicate_ids = "id,timestamp,employee,client,reservation_number,product_type\n\
                         4,2025-05-01,Julie,A,R1,Tire\n\
                         4,2025-05-01,Julie,B,R2,Tire\n";
    assert!(import_tabular(&mut ledger, duplicate_ids).is_err());

    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.records()[0].client_name, "Kept");
}

#[test]
fn import_replaces_ledger_wholesale() {
    let mut ledger = Ledger::from_records(vec![record(1, "Old", None)]);
    let csv = "timestamp,employee,client,reservation_number,product_type,commission_amount\n\
               2025-06-02 08:00:00,Alvin,New,R5,Tire,3.5\n";
    assert_eq!(import_tabular(&mut ledger, csv).unwrap(), 1);
    assert_eq!(ledger.records()[0].client_name, "New");
    assert_eq!(ledger.records()[0].commission_amount, Decimal::new(35, 1));
}
