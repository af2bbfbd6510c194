//! End-to-end runs of the wizard against canned backend responses.

use common::error::{ApiError, ValidationError};
use common::model::connection::ConnectionConfig;
use common::model::direction::Direction;
use common::model::file::UploadedFile;
use common::model::transfer::{TransferOutcome, TransferReceipt};
use common::requests::{PreviewRequest, TransferPlan};
use common::responses;
use common::wizard::{Step, Wizard};
use pretty_assertions::assert_eq;
use serde_json::json;

fn db1() -> ConnectionConfig {
    ConnectionConfig {
        host: "db1".to_string(),
        port: 8123,
        database: "analytics".to_string(),
        username: "u".to_string(),
        password: String::new(),
    }
}

#[test]
fn file_to_database_ingest() {
    let mut wizard = Wizard::new();
    wizard.change_direction(Direction::FileToDatabase);

    responses::parse_test_connection(200, r#"{"success":true}"#).unwrap();
    wizard.adopt_connection(db1()).unwrap();
    assert_eq!(wizard.step(), Step::SelectingTable);

    let tables = responses::parse_tables(200, r#"["events"]"#).unwrap();
    wizard.select_table(&tables[0]).unwrap();
    assert!(wizard.advance());
    assert_eq!(wizard.step(), Step::SelectingFile);

    let content = b"a,b,c\n1,2,3\n".to_vec();
    wizard
        .select_file(UploadedFile::detect("events.csv", content.clone()))
        .unwrap();
    assert!(wizard.columns().is_all_selected());
    assert!(wizard.advance());
    assert_eq!(wizard.step(), Step::Previewing);

    let preview = wizard.file_preview().unwrap();
    assert_eq!(preview.header(), ["a", "b", "c"]);
    assert_eq!(preview.rows(), [vec!["1", "2", "3"]]);

    let (ticket, plan) = wizard.begin_transfer().unwrap();
    let TransferPlan::Ingest(request) = plan else {
        panic!("expected an ingest plan");
    };
    assert_eq!(request.config, db1());
    assert_eq!(request.table_name, "events");
    assert_eq!(request.columns, ["a", "b", "c"]);
    assert_eq!(request.file_bytes, content);
    assert_eq!(request.file_name, "events.csv");

    let records = responses::parse_ingest(200, r#"{"records": 1}"#).unwrap();
    assert!(wizard.finish_transfer(ticket, Ok(TransferReceipt::Ingested { records })));

    assert_eq!(wizard.step(), Step::Terminal);
    let outcome = wizard.outcome().unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.to_string(), "Successfully transferred 1 records");
}

#[test]
fn database_to_file_export() {
    let mut wizard = Wizard::new();
    wizard.change_direction(Direction::DatabaseToFile);
    wizard.adopt_connection(db1()).unwrap();
    wizard.select_table("events").unwrap();
    assert!(wizard.advance());
    assert_eq!(wizard.step(), Step::SelectingColumns);

    let columns = responses::parse_columns(200, r#"["a","b","c"]"#).unwrap();
    assert!(wizard.columns_loaded("events", columns));
    wizard.toggle_column("c");
    assert!(wizard.advance());

    wizard.set_export_file_name("events_export.csv");
    let (ticket, plan) = wizard.begin_transfer().unwrap();
    let TransferPlan::Export(request) = plan else {
        panic!("expected an export plan");
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "config": serde_json::to_value(db1()).unwrap(),
            "tableName": "events",
            "columns": ["a", "b"],
            "fileName": "events_export.csv"
        })
    );

    assert!(wizard.finish_transfer(ticket, Ok(TransferReceipt::Exported { bytes: 12 })));
    assert_eq!(
        wizard.outcome(),
        Some(&TransferOutcome::Exported {
            table: "events".to_string(),
            file_name: "events_export.csv".to_string(),
            bytes: 12,
        })
    );
}

#[test]
fn export_preview_request_mirrors_export_body() {
    let mut wizard = Wizard::new();
    wizard.change_direction(Direction::DatabaseToFile);
    wizard.adopt_connection(db1()).unwrap();
    wizard.select_table("events").unwrap();
    wizard.advance();
    wizard.columns_loaded("events", responses::parse_columns(200, r#"{"a":"UInt8"}"#).unwrap());
    wizard.advance();

    let request = wizard.preview_request().unwrap();
    assert_eq!(request.table_name, "events");
    assert_eq!(request.columns, ["a"]);
    match wizard.transfer_plan().unwrap() {
        TransferPlan::Export(export) => assert_eq!(PreviewRequest::from(&export), request),
        other => panic!("expected an export plan, got {:?}", other),
    }

    wizard.set_export_file_name("");
    assert_eq!(wizard.preview_request(), Some(request));
}

#[test]
fn rejected_connection_test_leaves_config_unset() {
    let mut wizard = Wizard::new();
    wizard.change_direction(Direction::DatabaseToFile);

    let result = responses::parse_test_connection(
        401,
        r#"{"message":"Authentication failed","code":"AUTH"}"#,
    );
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Authentication failed");

    assert_eq!(wizard.connection(), None);
    assert!(!wizard.advance());
    assert_eq!(wizard.step(), Step::ConfiguringConnection);
}

#[test]
fn rejected_table_listing_leaves_table_unset() {
    let mut wizard = Wizard::new();
    wizard.change_direction(Direction::FileToDatabase);
    wizard.adopt_connection(db1()).unwrap();

    let err = responses::parse_tables(500, "DB::Exception: timeout").unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(wizard.table(), None);
    assert_eq!(wizard.check_step(), Err(ValidationError::NoTableSelected));
}

#[test]
fn rejected_column_listing_leaves_columns_unset() {
    let mut wizard = Wizard::new();
    wizard.change_direction(Direction::DatabaseToFile);
    wizard.adopt_connection(db1()).unwrap();
    wizard.select_table("events").unwrap();
    assert!(wizard.advance());
    assert_eq!(wizard.step(), Step::SelectingColumns);

    let err = responses::parse_columns(500, "DB::Exception: Table analytics.events doesn't exist")
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(wizard.columns().available().is_empty());
    assert_eq!(wizard.check_step(), Err(ValidationError::NoColumnsSelected));
    assert!(!wizard.advance());
    assert_eq!(wizard.preview_request(), None);
}

#[test]
fn rejected_ingest_becomes_terminal_failure() {
    let mut wizard = Wizard::new();
    wizard.change_direction(Direction::FileToDatabase);
    wizard.adopt_connection(db1()).unwrap();
    wizard.select_table("events").unwrap();
    wizard.advance();
    wizard
        .select_file(UploadedFile::new("e.csv", b"a\n1\n".to_vec(), ','))
        .unwrap();
    wizard.advance();

    let (ticket, _) = wizard.begin_transfer().unwrap();
    let result: Result<u64, ApiError> =
        responses::parse_ingest(400, r#"{"message":"Column a is not in table events"}"#);
    wizard.finish_transfer(ticket, result.map(|records| TransferReceipt::Ingested { records }));

    assert_eq!(wizard.step(), Step::Terminal);
    assert_eq!(
        wizard.outcome().map(ToString::to_string).as_deref(),
        Some("Transfer failed: Column a is not in table events")
    );
}
