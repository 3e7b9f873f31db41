use calamine::{Data, Reader, Xlsx, open_workbook};
use cryptosheet::application::market_data::analyzer::analyze;
use cryptosheet::application::market_data::transformer::transform;
use cryptosheet::domain::market::{MarketRecord, MarketTable};
use cryptosheet::domain::ports::ReportSink;
use cryptosheet::infrastructure::excel::xlsx_writer::{
    ANALYSIS_SHEET, DATA_HEADERS, DATA_SHEET, SUMMARY_BLOCK_ROW, TOP_BLOCK_ROW, XlsxReportWriter,
};
use serde_json::{Value, json};
use std::path::Path;

fn coins(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let change = if i == 3 {
                Value::Null
            } else {
                json!(i as f64 - 10.5)
            };
            json!({
                "name": format!("Coin {i}"),
                "symbol": format!("c{i}"),
                "current_price": 1000.0 / (i as f64 + 1.0),
                "market_cap": 1.0e9 - i as f64 * 1.0e6,
                "total_volume": 5.0e6 + i as f64,
                "price_change_percentage_24h": change
            })
        })
        .collect()
}

fn table_from(raw: &[Value]) -> MarketTable {
    transform(Some(raw)).unwrap().unwrap()
}

fn string_at(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected string at ({row}, {col}), got {:?}", other),
    }
}

fn number_at(range: &calamine::Range<Data>, row: u32, col: u32) -> f64 {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        other => panic!("expected number at ({row}, {col}), got {:?}", other),
    }
}

fn is_blank(range: &calamine::Range<Data>, row: u32, col: u32) -> bool {
    matches!(range.get_value((row, col)), None | Some(Data::Empty))
}

fn read_sheet(path: &Path, sheet: &str) -> calamine::Range<Data> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.worksheet_range(sheet).unwrap()
}

#[tokio::test]
async fn test_live_sheet_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crypto_data.xlsx");
    let writer = XlsxReportWriter::new(path.clone());

    let table = table_from(&coins(50));
    let summary = analyze(&table).unwrap();
    writer.write_report(&table, &summary).await.unwrap();

    let range = read_sheet(&path, DATA_SHEET);
    for (col, header) in DATA_HEADERS.iter().enumerate() {
        assert_eq!(string_at(&range, 0, col as u32), *header);
    }

    let rows: Vec<MarketRecord> = (1..=50u32)
        .map(|row| MarketRecord {
            name: string_at(&range, row, 0),
            symbol: string_at(&range, row, 1),
            current_price: number_at(&range, row, 2),
            market_cap: number_at(&range, row, 3),
            total_volume: number_at(&range, row, 4),
            price_change_percentage_24h: (!is_blank(&range, row, 5))
                .then(|| number_at(&range, row, 5)),
        })
        .collect();

    assert_eq!(rows.len(), table.len());
    assert_eq!(rows, table.records());
    assert!(is_blank(&range, 51, 0));
}

#[tokio::test]
async fn test_analysis_sheet_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crypto_data.xlsx");
    let writer = XlsxReportWriter::new(path.clone());

    let raw = vec![
        json!({"name": "Bitcoin", "symbol": "btc", "current_price": 50000,
               "market_cap": 900000000000u64, "total_volume": 20000000000u64,
               "price_change_percentage_24h": 2.5}),
        json!({"name": "Ethereum", "symbol": "eth", "current_price": 3000,
               "market_cap": 400000000000u64, "total_volume": 10000000000u64,
               "price_change_percentage_24h": -1.234}),
    ];
    let table = table_from(&raw);
    let summary = analyze(&table).unwrap();
    writer.write_report(&table, &summary).await.unwrap();

    let range = read_sheet(&path, ANALYSIS_SHEET);
    let top = TOP_BLOCK_ROW;
    assert!(is_blank(&range, 0, 0));
    assert_eq!(string_at(&range, top, 0), "Top 5 by Market Cap");
    assert_eq!(string_at(&range, top, 1), "Market Cap");
    assert_eq!(string_at(&range, top + 1, 0), "Bitcoin");
    assert_eq!(number_at(&range, top + 1, 1), 900000000000.0);
    assert_eq!(string_at(&range, top + 2, 0), "Ethereum");
    assert!(is_blank(&range, top + 3, 0));

    let s = SUMMARY_BLOCK_ROW;
    assert_eq!(string_at(&range, s, 0), "Metric");
    assert_eq!(string_at(&range, s, 1), "Value");
    assert_eq!(string_at(&range, s + 1, 0), "Average Price (USD)");
    assert_eq!(string_at(&range, s + 1, 1), "$26500.00");
    assert_eq!(string_at(&range, s + 2, 0), "Highest 24h Change");
    assert_eq!(string_at(&range, s + 2, 1), "Bitcoin: 2.50%");
    assert_eq!(string_at(&range, s + 3, 0), "Lowest 24h Change");
    assert_eq!(string_at(&range, s + 3, 1), "Ethereum: -1.23%");
}

#[tokio::test]
async fn test_each_write_replaces_previous_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crypto_data.xlsx");
    let writer = XlsxReportWriter::new(path.clone());

    let big = table_from(&coins(10));
    writer
        .write_report(&big, &analyze(&big).unwrap())
        .await
        .unwrap();

    let small = table_from(&coins(2));
    writer
        .write_report(&small, &analyze(&small).unwrap())
        .await
        .unwrap();

    let range = read_sheet(&path, DATA_SHEET);
    assert_eq!(string_at(&range, 2, 0), "Coin 1");
    assert!(is_blank(&range, 3, 0));

    let analysis = read_sheet(&path, ANALYSIS_SHEET);
    assert!(is_blank(&analysis, TOP_BLOCK_ROW + 3, 0));
}
