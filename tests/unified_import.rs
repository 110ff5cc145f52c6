use chrono::NaiveDate;

use sheet_import::commit::MemoryStore;
use sheet_import::ingestion::{
    decode_file, import_file, import_files, try_import_file, CsvMode, FileFormat, ImportOptions,
};
use sheet_import::types::{ActorId, ProcessingResult, UploadedFile};
use sheet_import::ImportError;

fn actor() -> ActorId {
    ActorId::new("user-1")
}

fn fixed_day() -> ImportOptions {
    ImportOptions {
        today: NaiveDate::from_ymd_opt(2024, 6, 30),
        ..Default::default()
    }
}

fn csv_file(name: &str, body: &str) -> UploadedFile {
    UploadedFile::new(name, Some("text/csv"), body)
}

#[test]
fn inventory_fixture_end_to_end() {
    let file = UploadedFile::from_path("tests/fixtures/inventory.csv").unwrap();
    assert_eq!(file.name, "inventory.csv");
    assert_eq!(file.media_type, None);

    let mut store = MemoryStore::new();
    let result = import_file(&file, Some(&actor()), &mut store, &ImportOptions::default());

    assert!(result.success);
    assert_eq!(result.records_processed, Some(2));
    assert_eq!(
        result.errors,
        Some(vec!["row 3: missing required field 'product_name'".to_string()])
    );

    let names: Vec<&str> = store.inventory().iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(names, vec!["Widget", "Gadget"]);
    assert_eq!(store.inventory()[0].quantity, 10);
    assert_eq!(store.inventory()[0].minimum_level, 5);
    assert_eq!(store.inventory()[1].quantity, 0);
    assert_eq!(store.inventory()[1].category, "Electronics");
    assert!(store.employees().is_empty());
}

#[test]
fn portuguese_employee_fixture_is_stamped_with_actor() {
    let file = UploadedFile::from_path("tests/fixtures/employees_pt.csv").unwrap();
    let mut store = MemoryStore::new();
    let result = import_file(&file, Some(&actor()), &mut store, &fixed_day());

    assert!(result.success);
    assert_eq!(result.records_processed, Some(2));
    // The blank line is discarded before numbering, so the nameless row is row 4.
    assert_eq!(
        result.errors,
        Some(vec!["row 4: missing required field 'name'".to_string()])
    );

    let employees = store.employees();
    assert_eq!(employees[0].name, "Ada Lovelace");
    assert_eq!(employees[0].position, "Engenheira");
    assert_eq!(employees[0].hire_date, "2023-04-01");
    assert_eq!(employees[1].position, "Funcionário");
    assert_eq!(employees[1].hire_date, "2024-06-30");
    assert!(employees.iter().all(|e| e.actor_id == actor()));
}

#[test]
fn header_only_and_empty_files_are_rejected() {
    for body in ["", "product,quantity\n", "\n\n"] {
        let mut store = MemoryStore::new();
        let result = import_file(&csv_file("x.csv", body), Some(&actor()), &mut store, &ImportOptions::default());
        assert!(!result.success);
        assert_eq!(result.records_processed, None);
        assert_eq!(result.errors, None);
        assert!(store.is_empty());
    }

    let err = try_import_file(
        &csv_file("x.csv", "product\n"),
        Some(&actor()),
        &mut MemoryStore::new(),
        &ImportOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ImportError::EmptyFile));
}

#[test]
fn unrecognized_headers_commit_nothing() {
    let mut store = MemoryStore::new();
    let err = try_import_file(
        &csv_file("x.csv", "foo,bar\n1,2\n"),
        Some(&actor()),
        &mut store,
        &ImportOptions::default(),
    )
    .unwrap_err();

    match err {
        ImportError::UnrecognizedSchema { headers } => assert_eq!(headers, vec!["foo", "bar"]),
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.is_empty());
}

#[test]
fn portuguese_product_header_is_an_unrecognized_file() {
    let file = csv_file("estoque.csv", "Produto,Preco\nParafuso,3\nMartelo,9\n");
    let mut store = MemoryStore::new();
    let result = import_file(&file, Some(&actor()), &mut store, &ImportOptions::default());

    assert!(!result.success);
    assert!(result.message.starts_with("unrecognized spreadsheet layout"));
    assert_eq!(result.records_processed, None);
    assert_eq!(result.errors, None);
    assert!(store.is_empty());
}

#[test]
fn missing_or_blank_actor_is_fatal_for_both_kinds() {
    let inventory = csv_file("stock.csv", "product,quantity\nWidget,1\n");
    let employees = csv_file("team.csv", "name,position\nAda,Engineer\n");
    let blank = ActorId::new("   ");

    for file in [&inventory, &employees] {
        for actor in [None, Some(&blank)] {
            let mut store = MemoryStore::new();
            let err = try_import_file(file, actor, &mut store, &ImportOptions::default()).unwrap_err();
            assert!(matches!(err, ImportError::ActorUnauthenticated));
            assert!(store.is_empty());
        }
    }
}

#[test]
fn unsupported_format_is_rejected() {
    let file = UploadedFile::new("notes.txt", Some("text/plain"), "product\nWidget\n");
    let result = import_file(&file, Some(&actor()), &mut MemoryStore::new(), &ImportOptions::default());
    assert!(!result.success);
    assert!(result.message.contains("unsupported file format for 'notes.txt'"));
    assert!(result.message.contains("text/plain"));
}

#[test]
fn forced_format_overrides_detection() {
    let file = UploadedFile::new("upload", None, "product,quantity\nWidget,1\n");
    let opts = ImportOptions {
        format: Some(FileFormat::Csv),
        ..Default::default()
    };
    let result = import_file(&file, Some(&actor()), &mut MemoryStore::new(), &opts);
    assert_eq!(result.records_processed, Some(1));
}

#[test]
fn format_detection_prefers_extension() {
    assert_eq!(FileFormat::detect("a.CSV", None), Some(FileFormat::Csv));
    assert_eq!(
        FileFormat::detect("a.csv", Some("application/vnd.ms-excel")),
        Some(FileFormat::Csv)
    );
    assert_eq!(FileFormat::detect("book.xlsx", None), Some(FileFormat::Workbook));
    assert_eq!(FileFormat::detect("book.ods", None), Some(FileFormat::Workbook));
    assert_eq!(
        FileFormat::detect("upload", Some("text/csv; charset=utf-8")),
        Some(FileFormat::Csv)
    );
    assert_eq!(
        FileFormat::detect(
            "upload",
            Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        ),
        Some(FileFormat::Workbook)
    );
    assert_eq!(FileFormat::detect("upload.txt", Some("text/plain")), None);
}

#[test]
fn quoted_mode_keeps_commas_in_product_names() {
    let file = csv_file("stock.csv", "product,quantity\n\"Bolts, M6\",40\n");

    let mut store = MemoryStore::new();
    import_file(&file, Some(&actor()), &mut store, &ImportOptions::default());
    assert_eq!(store.inventory()[0].product_name, "Bolts");
    assert_eq!(store.inventory()[0].quantity, 0);

    let mut store = MemoryStore::new();
    let opts = ImportOptions {
        csv_mode: CsvMode::Quoted,
        ..Default::default()
    };
    import_file(&file, Some(&actor()), &mut store, &opts);
    assert_eq!(store.inventory()[0].product_name, "Bolts, M6");
    assert_eq!(store.inventory()[0].quantity, 40);
}

#[test]
fn decode_file_returns_the_raw_grid() {
    let grid = decode_file(&csv_file("x.csv", "a,b\n1,2\n"), &ImportOptions::default()).unwrap();
    assert_eq!(grid.headers().unwrap(), ["a", "b"]);
    assert_eq!(grid.data_rows().len(), 1);
}

#[test]
fn multiple_files_are_processed_in_order_and_independently() {
    let files = vec![
        csv_file("stock.csv", "product,quantity\nWidget,1\nGadget,2\n"),
        csv_file("broken.csv", "foo,bar\n1,2\n"),
        csv_file("team.csv", "name,position\nAda,Engineer\n"),
    ];
    let mut store = MemoryStore::new();
    let outcomes = import_files(&files, Some(&actor()), &mut store, &ImportOptions::default());

    let names: Vec<&str> = outcomes.iter().map(|o| o.file_name.as_str()).collect();
    assert_eq!(names, vec!["stock.csv", "broken.csv", "team.csv"]);
    assert_eq!(outcomes[0].result.records_processed, Some(2));
    assert!(!outcomes[1].result.success);
    assert_eq!(outcomes[2].result.records_processed, Some(1));
    assert_eq!(store.len(), 3);
}

#[test]
fn processing_result_serializes_with_external_field_names() {
    let file = UploadedFile::from_path("tests/fixtures/inventory.csv").unwrap();
    let result = import_file(&file, Some(&actor()), &mut MemoryStore::new(), &ImportOptions::default());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["recordsProcessed"], 2);
    assert_eq!(json["errors"][0], "row 3: missing required field 'product_name'");

    let failed = ProcessingResult::from_error(&ImportError::EmptyFile);
    let json = serde_json::to_value(&failed).unwrap();
    assert_eq!(json["success"], false);
    assert!(json.get("recordsProcessed").is_none());
    assert!(json.get("errors").is_none());

    let back: ProcessingResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, failed);
}
