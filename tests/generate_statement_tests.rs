use statement::cancel::CancelToken;
use statement::error::{ErrorKind, RecordError, StatementError};
use statement::filter::{DateRange, Period, Selection};
use statement::generate_statement;
use std::fs;
use tempfile::NamedTempFile;
use time::macros::date;

const JANUARY_CSV: &str = r#"date,amount,content
2025/01/05,2000,Salary
2025/01/09,-300,Grocery
2025/01/01,100,Gift
2025/01/15,-150,Transport"#;

fn csv_file(content: &str) -> NamedTempFile {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, content).unwrap();
    temp_file
}

fn period(year: i32, month: u8) -> Selection {
    Selection::Period(Period::new(year, month).unwrap())
}

#[test]
fn test_generate_statement_for_month() {
    let temp_file = csv_file(JANUARY_CSV);

    let statement = generate_statement(
        temp_file.path().to_str().unwrap(),
        &period(2025, 1),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(statement.period, "2025/01");
    assert_eq!(statement.total_income, 2100);
    assert_eq!(statement.total_expenditure, -450);
    assert_eq!(statement.transaction_count, 4);

    let dates: Vec<&str> = statement
        .transactions
        .iter()
        .map(|tx| tx.date.as_str())
        .collect();
    assert_eq!(dates, vec!["2025/01/15", "2025/01/09", "2025/01/05", "2025/01/01"]);
}

#[test]
fn test_generate_statement_for_empty_month() {
    let temp_file = csv_file(JANUARY_CSV);

    let statement = generate_statement(
        temp_file.path().to_str().unwrap(),
        &period(2025, 2),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(statement.period, "2025/02");
    assert_eq!(statement.total_income, 0);
    assert_eq!(statement.total_expenditure, 0);
    assert!(statement.transactions.is_empty());
}

#[test]
fn test_generate_statement_for_date_range() {
    let temp_file = csv_file(
        r#"date,amount,content
2025/01/15,1000,Range start
2025/01/20,-200,Dinner
2025/02/01,3000,Salary
2025/02/15,-400,Range end
2025/03/01,-50,Outside"#,
    );
    let range = DateRange::new(date!(2025 - 01 - 15), date!(2025 - 02 - 15));

    let statement = generate_statement(
        temp_file.path().to_str().unwrap(),
        &Selection::Range(range),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(statement.period, "2025/01/15-2025/02/15");
    assert_eq!(statement.transaction_count, 4);
    assert_eq!(statement.total_income, 4000);
    assert_eq!(statement.total_expenditure, -600);
    assert!(statement.transactions.iter().all(|tx| tx.content != "Outside"));
    assert_eq!(statement.transactions[0].content, "Range end");
    assert_eq!(statement.transactions[3].content, "Range start");
}

#[test]
fn test_generate_statement_is_idempotent() {
    let temp_file = csv_file(JANUARY_CSV);
    let path = temp_file.path().to_str().unwrap();

    let first = generate_statement(path, &period(2025, 1), &CancelToken::new()).unwrap();
    let second = generate_statement(path, &period(2025, 1), &CancelToken::new()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_generate_statement_from_file_uri() {
    let temp_file = csv_file(JANUARY_CSV);
    let uri = format!("file://{}", temp_file.path().display());

    let statement = generate_statement(&uri, &period(2025, 1), &CancelToken::new()).unwrap();
    assert_eq!(statement.transaction_count, 4);
}

#[test]
fn test_generate_statement_with_bom_and_quotes() {
    let temp_file = csv_file(
        "\u{feff}date,amount,content\n2025/01/05,2000,\"Salary, January\"\n",
    );

    let statement = generate_statement(
        temp_file.path().to_str().unwrap(),
        &period(2025, 1),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(statement.transactions[0].content, "Salary, January");
}

#[test]
fn test_generate_statement_missing_column() {
    let temp_file = csv_file(
        r#"date,amount,content
2025/01/05,2000,Salary
2025/01/01,1000"#,
    );

    let err = generate_statement(
        temp_file.path().to_str().unwrap(),
        &period(2025, 1),
        &CancelToken::new(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Malformed);
    match err {
        StatementError::Row {
            row,
            source: RecordError::MalformedRow { expected, actual },
        } => {
            assert_eq!(row, 3);
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("Expected MalformedRow error, got {other:?}"),
    }
}

#[test]
fn test_generate_statement_large_file_one_bad_row() {
    let mut csv_content = String::from("date,amount,content\n");
    for i in 1..=10_000 {
        csv_content.push_str(&format!("2025/01/{:02},{},Row {}\n", i % 28 + 1, i, i));
    }
    csv_content.push_str("2025/01/10,ten,Bad amount\n");
    let temp_file = csv_file(&csv_content);

    let err = generate_statement(
        temp_file.path().to_str().unwrap(),
        &period(2025, 1),
        &CancelToken::new(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_generate_statement_invalid_file() {
    let err = generate_statement("nonexistent_file.csv", &period(2025, 1), &CancelToken::new())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_generate_statement_cancelled() {
    let temp_file = csv_file(JANUARY_CSV);
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = generate_statement(temp_file.path().to_str().unwrap(), &period(2025, 1), &cancel)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[test]
fn test_concurrent_generations_are_independent() {
    let january = csv_file(JANUARY_CSV);
    let february = csv_file("date,amount,content\n2025/02/03,-75,Books\n");

    let handles: Vec<_> = [
        (january.path().to_str().unwrap().to_string(), period(2025, 1)),
        (february.path().to_str().unwrap().to_string(), period(2025, 2)),
    ]
    .into_iter()
    .map(|(path, selection)| {
        std::thread::spawn(move || generate_statement(&path, &selection, &CancelToken::new()))
    })
    .collect();

    let counts: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().unwrap().transaction_count)
        .collect();

    assert_eq!(counts, vec![4, 1]);
}
