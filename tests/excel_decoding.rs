#![cfg(feature = "excel_test_writer")]

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

use sheet_import::commit::MemoryStore;
use sheet_import::ingestion::excel::decode_workbook;
use sheet_import::ingestion::{import_file, ImportOptions};
use sheet_import::types::{ActorId, UploadedFile};

const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn inventory_workbook() -> Vec<u8> {
    let mut wb = Workbook::new();

    let ws = wb.add_worksheet();
    ws.set_name("Estoque").unwrap();
    ws.write_string(0, 0, "Product").unwrap();
    ws.write_string(0, 1, "Quantidade").unwrap();
    ws.write_string(0, 2, "Estoque Minimo").unwrap();
    ws.write_string(0, 3, "Categoria").unwrap();

    ws.write_string(1, 0, "Parafuso").unwrap();
    ws.write_number(1, 1, 120).unwrap();
    ws.write_number(1, 2, 20).unwrap();
    ws.write_string(1, 3, "Ferragens").unwrap();

    // row 2 left entirely empty

    ws.write_string(3, 0, "  ").unwrap();
    ws.write_number(3, 1, 5).unwrap();

    ws.write_string(4, 0, "Martelo").unwrap();
    ws.write_string(4, 1, "7").unwrap();

    // Later sheets are never read.
    let other = wb.add_worksheet();
    other.set_name("Notas").unwrap();
    other.write_string(0, 0, "foo").unwrap();

    wb.save_to_buffer().unwrap()
}

fn employee_workbook() -> Vec<u8> {
    let mut wb = Workbook::new();
    let date_fmt = Format::new().set_num_format("yyyy-mm-dd");

    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "Name").unwrap();
    ws.write_string(0, 1, "Position").unwrap();
    ws.write_string(0, 2, "Hire Date").unwrap();

    ws.write_string(1, 0, "Ada").unwrap();
    ws.write_string(1, 1, "Engineer").unwrap();
    let hired = ExcelDateTime::from_ymd(2023, 4, 1).unwrap();
    ws.write_datetime_with_format(1, 2, &hired, &date_fmt).unwrap();

    wb.save_to_buffer().unwrap()
}

#[test]
fn decode_reads_first_sheet_and_drops_empty_rows() {
    let grid = decode_workbook(&inventory_workbook()).unwrap();

    assert_eq!(grid.row_count(), 4);
    assert_eq!(grid.rows[0], vec!["Product", "Quantidade", "Estoque Minimo", "Categoria"]);
    assert_eq!(grid.rows[1], vec!["Parafuso", "120", "20", "Ferragens"]);
    assert_eq!(grid.rows[3][0], "Martelo");
}

#[test]
fn workbook_import_end_to_end() {
    let file = UploadedFile::new("estoque.xlsx", Some(XLSX), inventory_workbook());
    let mut store = MemoryStore::new();
    let result = import_file(&file, Some(&ActorId::new("u")), &mut store, &ImportOptions::default());

    assert!(result.success);
    assert_eq!(result.records_processed, Some(2));
    assert_eq!(
        result.errors,
        Some(vec!["row 3: missing required field 'product_name'".to_string()])
    );

    let items = store.inventory();
    assert_eq!(items[0].product_name, "Parafuso");
    assert_eq!(items[0].quantity, 120);
    assert_eq!(items[0].minimum_level, 20);
    assert_eq!(items[0].category, "Ferragens");
    assert_eq!(items[1].product_name, "Martelo");
    assert_eq!(items[1].quantity, 7);
    assert_eq!(items[1].category, "Geral");
}

#[test]
fn workbook_dates_render_as_iso_days() {
    let file = UploadedFile::new("team.xlsx", None, employee_workbook());
    let mut store = MemoryStore::new();
    let result = import_file(&file, Some(&ActorId::new("u")), &mut store, &ImportOptions::default());

    assert_eq!(result.records_processed, Some(1));
    assert_eq!(store.employees()[0].hire_date, "2023-04-01");
}
