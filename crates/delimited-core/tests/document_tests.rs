/// Document construction, mutation and serialization tests.
use delimited_core::{
    parse_document, Cell, DelimitedError, Document, Matrix, ParserConfig, QuotingRule,
};

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

fn sample() -> Document {
    Document::parse("name,qty\napple,3\npear,5\n").unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn new_fills_every_cell() {
    let doc = Document::new(2, 3, Cell::Integer(0));
    assert_eq!(doc.row_count(), 2);
    assert_eq!(doc.column_count(), 3);
    assert!(doc.rows().all(|row| row.iter().all(|c| *c == Cell::Integer(0))));
}

#[test]
fn new_never_builds_an_empty_table() {
    let doc = Document::new(0, 0, Cell::Empty);
    assert_eq!((doc.row_count(), doc.column_count()), (1, 1));
    assert_eq!(Document::default(), doc);
}

#[test]
fn with_headers_converts_cells_to_headers() {
    let doc = Document::with_headers(&[text("id"), Cell::Integer(2024)], 3);
    assert_eq!(doc.row_count(), 3);
    assert_eq!(doc[(0, 0)], Cell::Header("id".to_string()));
    assert_eq!(doc[(0, 1)], Cell::Header("2024".to_string()));
    assert_eq!(doc[(1, 0)], Cell::Empty);
}

#[test]
fn from_matrix_keeps_content() {
    let matrix = Matrix::from_rows(vec![vec![Cell::Integer(1), Cell::Integer(2)]]).unwrap();
    let doc = Document::from_matrix(matrix.clone());
    assert_eq!(doc.matrix(), &matrix);
    assert_eq!(Document::from(matrix.clone()).into_matrix(), matrix);
}

#[test]
fn parse_uses_primary_separators_for_output() {
    let config = ParserConfig::default()
        .with_value_separators([';', ','])
        .with_row_separators(['|']);
    let doc = parse_document("a;b|1,2|", &config).unwrap();
    assert_eq!(doc.value_separator(), ";");
    assert_eq!(doc.row_separator(), "|");
    assert_eq!(doc.to_delimited_string(), "a;b|1;2|");
}

#[test]
fn from_str_parses_with_defaults() {
    let doc: Document = "x,y\n1,2".parse().unwrap();
    assert_eq!(doc[(1, 1)], Cell::Integer(2));
}

#[test]
fn ragged_input_drops_rows() {
    let doc = Document::parse("a,b,c\n1,2,3\n4,5\n6,7,8\n").unwrap();
    assert_eq!(doc.row_count(), 3);
    assert_eq!(doc.column_count(), 3);
}

// ============================================================================
// Cell, row and column access
// ============================================================================

#[test]
fn get_and_set_cell() {
    let mut doc = sample();
    assert_eq!(doc.cell(1, 0), Some(&text("apple")));
    assert_eq!(doc.cell(9, 0), None);
    doc.set_cell(1, 1, Cell::Decimal(2.5)).unwrap();
    assert_eq!(doc[(1, 1)], Cell::Decimal(2.5));
    doc[(2, 0)] = text("plum");
    assert_eq!(doc.cell(2, 0), Some(&text("plum")));
}

#[test]
fn set_cell_out_of_bounds_is_an_error() {
    let mut doc = sample();
    let err = doc.set_cell(0, 5, Cell::Empty).unwrap_err();
    assert!(matches!(err, DelimitedError::IndexOutOfBounds { index: 5, len: 2 }));
}

#[test]
fn rows_and_columns() {
    let mut doc = sample();
    assert_eq!(doc.row(2), Some(&[text("pear"), Cell::Integer(5)][..]));
    assert_eq!(
        doc.column(1),
        Some(vec![text("qty"), Cell::Integer(3), Cell::Integer(5)])
    );
    assert_eq!(doc.column(2), None);

    doc.set_row(1, vec![text("fig"), Cell::Integer(1)]).unwrap();
    doc.set_column(1, vec![text("n"), Cell::Integer(10), Cell::Integer(20)])
        .unwrap();
    assert_eq!(doc.to_delimited_string(), "name,n\nfig,10\npear,20\n");
}

#[test]
fn wrong_width_row_is_rejected() {
    let mut doc = sample();
    let err = doc.append_row(vec![text("only")]).unwrap_err();
    assert!(matches!(err, DelimitedError::Shape { expected: 2, found: 1 }));
    assert_eq!(doc.row_count(), 3);
}

#[test]
fn insert_append_remove_rows() {
    let mut doc = sample();
    doc.insert_row(1, vec![text("kiwi"), Cell::Integer(9)]).unwrap();
    doc.append_row(vec![text("lime"), Cell::Empty]).unwrap();
    assert_eq!(doc.row_count(), 5);
    assert_eq!(doc[(1, 0)], text("kiwi"));
    assert_eq!(doc[(4, 0)], text("lime"));

    let removed = doc.remove_row(1).unwrap();
    assert_eq!(removed, vec![text("kiwi"), Cell::Integer(9)]);
    assert_eq!(doc.row_count(), 4);
}

#[test]
fn insert_append_remove_columns() {
    let mut doc = sample();
    doc.insert_column(0, vec![Cell::Header("#".to_string()), Cell::Integer(1), Cell::Integer(2)])
        .unwrap();
    doc.append_column(vec![text("ok"), text("y"), text("n")]).unwrap();
    assert_eq!(doc.column_count(), 4);
    assert!(doc.rows().all(|row| row.len() == 4));
    assert_eq!(doc.to_delimited_string(), "#,name,qty,ok\n1,apple,3,y\n2,pear,5,n\n");

    doc.remove_column(0).unwrap();
    assert_eq!(doc.column_count(), 3);
    assert!(doc.rows().all(|row| row.len() == 3));
}

#[test]
fn cannot_remove_last_row_or_column() {
    let mut doc = Document::new(1, 1, Cell::Empty);
    assert!(matches!(doc.remove_row(0), Err(DelimitedError::WouldBeEmpty)));
    assert!(matches!(doc.remove_column(0), Err(DelimitedError::WouldBeEmpty)));
}

#[test]
fn swap_rows_twice_is_identity() {
    let original = sample();
    let mut doc = original.clone();
    doc.swap_rows(0, 2).unwrap();
    assert_ne!(doc, original);
    assert_eq!(doc[(0, 0)], text("pear"));
    doc.swap_rows(0, 2).unwrap();
    assert_eq!(doc, original);
}

#[test]
fn swap_columns_twice_is_identity() {
    let original = sample();
    let mut doc = original.clone();
    doc.swap_columns(0, 1).unwrap();
    assert_eq!(doc.row(1), Some(&[Cell::Integer(3), text("apple")][..]));
    doc.swap_columns(1, 0).unwrap();
    assert_eq!(doc, original);
}

#[test]
fn swap_with_bad_index_fails_without_change() {
    let original = sample();
    let mut doc = original.clone();
    assert!(doc.swap_rows(0, 3).is_err());
    assert!(doc.swap_columns(2, 0).is_err());
    assert_eq!(doc, original);
}

// ============================================================================
// Serialization and quoting rules
// ============================================================================

fn mixed() -> Document {
    let mut doc = Document::with_headers(&[text("label"), text("n")], 1);
    doc.append_row(vec![text("plain"), Cell::Integer(1)]).unwrap();
    doc.append_row(vec![text("a,b"), Cell::Decimal(2.5)]).unwrap();
    doc.append_row(vec![text("two\nlines"), Cell::Empty]).unwrap();
    doc
}

#[test]
fn necessary_text_fields_quotes_only_colliding_text() {
    let doc = mixed();
    assert_eq!(doc.quoting_rule(), QuotingRule::NecessaryTextFields);
    assert_eq!(
        doc.to_delimited_string(),
        "label,n\nplain,1\n\"a,b\",2.5\n\"two\nlines\",\n"
    );
}

#[test]
fn all_text_fields_quotes_text_and_headers() {
    let doc = mixed().with_quoting_rule(QuotingRule::AllTextFields);
    assert_eq!(
        doc.to_delimited_string(),
        "\"label\",\"n\"\n\"plain\",1\n\"a,b\",2.5\n\"two\nlines\",\n"
    );
}

#[test]
fn all_fields_quotes_everything() {
    let doc = mixed().with_quoting_rule(QuotingRule::AllFields);
    assert_eq!(
        doc.to_delimited_string(),
        "\"label\",\"n\"\n\"plain\",\"1\"\n\"a,b\",\"2.5\"\n\"two\nlines\",\"\"\n"
    );
}

#[test]
fn none_never_quotes() {
    let doc = mixed().with_quoting_rule(QuotingRule::None);
    assert_eq!(
        doc.to_delimited_string(),
        "label,n\nplain,1\na,b,2.5\ntwo\nlines,\n"
    );
}

#[test]
fn last_column_is_quoted_too() {
    let mut doc = Document::new(1, 2, Cell::Empty);
    doc.set_cell(0, 1, text("x,y")).unwrap();
    assert_eq!(doc.to_delimited_string(), ",\"x,y\"\n");
}

#[test]
fn embedded_quotes_are_doubled() {
    let mut doc = Document::new(1, 2, Cell::Empty);
    doc.set_cell(0, 0, text(r#"say "hi""#)).unwrap();
    doc.set_cell(0, 1, Cell::Integer(1)).unwrap();
    assert_eq!(doc.to_delimited_string(), "\"say \"\"hi\"\"\",1\n");

    let back = Document::parse(&doc.to_delimited_string()).unwrap();
    assert_eq!(back[(0, 0)], text(r#"say "hi""#));
}

#[test]
fn custom_separators_and_quote() {
    let mut doc = Document::new(1, 2, Cell::Empty)
        .with_value_separator("\t")
        .with_row_separator("\r\n")
        .with_quote('\'');
    doc.set_cell(0, 0, text("a\tb")).unwrap();
    doc.set_cell(0, 1, text("it's")).unwrap();
    assert_eq!(doc.to_delimited_string(), "'a\tb'\t'it''s'\r\n");
}

#[test]
fn serialization_is_idempotent() {
    let doc = mixed();
    assert_eq!(doc.to_delimited_string(), doc.to_delimited_string());
}

#[test]
fn byte_encodings() {
    let doc = Document::parse("a,1").unwrap();
    assert_eq!(doc.to_bytes(), b"a,1\n".to_vec());
    assert_eq!(
        doc.to_utf16_bytes(),
        vec![0xFF, 0xFE, b'a', 0, b',', 0, b'1', 0, b'\n', 0]
    );
}

#[test]
fn display_lists_rows() {
    let doc = Document::parse("a,1\nb,2.5").unwrap();
    assert_eq!(doc.to_string(), "[[a, 1], [b, 2.5]]");
}

#[test]
fn round_trip_preserves_cells() {
    let input = "id,name,price,added\n1,Widget,9.99,2024-01-15\n2,\"Gadget, large\",12.0,2024-02-01 08:00:00\n3,,0.5,\n";
    let doc = Document::parse(input).unwrap();
    let again = Document::parse(&doc.to_delimited_string()).unwrap();
    assert_eq!(again, doc);
    assert_eq!(doc[(2, 1)], text("Gadget, large"));
    assert_eq!(doc[(2, 2)], Cell::Decimal(12.0));
    assert_eq!(doc[(1, 3)].type_name(), "Date");
}

#[test]
fn secondary_value_separator_is_quoted() {
    let config = ParserConfig::default().with_value_separators([',', ';']);
    let doc = Document::parse_with("name,qty\n\"x;y\",3\n", &config).unwrap();
    assert_eq!(doc[(1, 0)], text("x;y"));

    let out = doc.to_delimited_string();
    assert_eq!(out, "name,qty\n\"x;y\",3\n");
    let back = Document::parse_with(&out, &config).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn secondary_quote_character_is_quoted() {
    let config = ParserConfig::default().with_quote_characters(['"', '\'']);
    let doc = Document::parse_with("who,n\n\"it's\",1\n", &config).unwrap();
    assert_eq!(doc[(1, 0)], text("it's"));

    let out = doc.to_delimited_string();
    assert_eq!(out, "who,n\n\"it's\",1\n");
    let back = Document::parse_with(&out, &config).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn custom_date_format_round_trips() {
    let config = ParserConfig::default().with_date_formats(["%Y%m%d"]);
    let doc = Document::parse_with("d,n\n20240115,1\n", &config).unwrap();
    assert_eq!(doc[(1, 0)].type_name(), "Date");

    let out = doc.to_delimited_string();
    assert_eq!(out, "d,n\n2024-01-15,1\n");
    let back = Document::parse_with(&out, &config).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn reserved_characters_cover_every_set() {
    let config = ParserConfig::default()
        .with_value_separators([',', ';', ','])
        .with_quote_characters(['"', '\'']);
    assert_eq!(config.reserved_characters(), vec![',', ';', '\n', '\r', '"', '\'']);
}

#[test]
fn row_and_column_mutators_report_index_and_shape_errors() {
    let mut doc = sample();
    assert!(matches!(
        doc.set_row(3, vec![text("a"), text("b")]),
        Err(DelimitedError::IndexOutOfBounds { index: 3, len: 3 })
    ));
    assert!(matches!(
        doc.set_row(0, vec![text("a")]),
        Err(DelimitedError::Shape { expected: 2, found: 1 })
    ));
    assert!(matches!(
        doc.insert_column(3, vec![Cell::Empty; 3]),
        Err(DelimitedError::IndexOutOfBounds { index: 3, len: 2 })
    ));
    assert!(matches!(
        doc.insert_column(2, vec![Cell::Empty; 2]),
        Err(DelimitedError::Shape { expected: 3, found: 2 })
    ));
    assert_eq!(doc, sample());
}
