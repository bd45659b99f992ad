// Cross-scanner conformance and scenario tests
//
// Scenario tests cover the documented policy matrix for malformed input.
// Cross-scanner checks run inputs that both engines accept (no empty fields,
// known field count) through FieldScanner and RowScanner and assert they
// agree, pinpointing which engine diverges when a scenario fails.

use std::io::Cursor;

use delimscan::{FieldScanner, RowScanner, ScanError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_strings(fields: &[Vec<u8>]) -> Vec<String> {
    fields
        .iter()
        .map(|f| String::from_utf8_lossy(f).to_string())
        .collect()
}

fn field_scan(input: &[u8], delimiter: u8, requested: usize) -> Vec<String> {
    let mut scanner = FieldScanner::new();
    scanner.set_delimiters(&[delimiter]).unwrap();
    let mut cursor = Cursor::new(input.to_vec());
    let mut fields = Vec::new();
    scanner.scan(&mut cursor, &mut fields, requested).unwrap();
    to_strings(&fields)
}

fn row_scan(input: &[u8], delimiter: u8) -> Vec<String> {
    let mut scanner = RowScanner::new();
    scanner.set_delimiter(delimiter);
    let mut cursor = Cursor::new(input.to_vec());
    let mut row = Vec::new();
    scanner.scan(&mut cursor, &mut row).unwrap();
    to_strings(&row)
}

// ---------------------------------------------------------------------------
// Cross-scanner conformance
// ---------------------------------------------------------------------------

/// Runs one row through both engines and asserts they agree on `expected`.
/// The field scanner is given the exact field count as its quota.
macro_rules! conformance {
    ($name:ident, input: $input:expr, sep: $sep:expr, expected: $expected:expr) => {
        #[test]
        fn $name() {
            let input: &[u8] = $input;
            let expected: Vec<String> =
                $expected.iter().map(|s: &&str| s.to_string()).collect();

            assert_eq!(
                field_scan(input, $sep, expected.len()),
                expected,
                "FieldScanner diverged"
            );
            assert_eq!(row_scan(input, $sep), expected, "RowScanner diverged");
        }
    };
}

conformance!(conformance_single_field, input: b"alone\n", sep: b',', expected: ["alone"]);
conformance!(conformance_simple_row, input: b"a,b,c\n", sep: b',', expected: ["a", "b", "c"]);
conformance!(conformance_tab_separated, input: b"x\ty\tz\n", sep: b'\t', expected: ["x", "y", "z"]);
conformance!(conformance_no_trailing_newline, input: b"a;b", sep: b';', expected: ["a", "b"]);
conformance!(conformance_long_fields,
    input: b"first field with spaces,second-field\n",
    sep: b',',
    expected: ["first field with spaces", "second-field"]);

// ---------------------------------------------------------------------------
// FieldScanner scenarios
// ---------------------------------------------------------------------------

#[test]
fn field_scanner_stops_at_quota_and_resumes() {
    let mut scanner = FieldScanner::new();
    scanner.set_delimiters(b",").unwrap();
    let mut input = Cursor::new(&b"foo,bar,baz\nqux,quux"[..]);
    let mut fields = Vec::new();

    scanner.scan(&mut input, &mut fields, 2).unwrap();
    assert_eq!(to_strings(&fields), ["foo", "bar"]);

    // next call picks up right after "bar"'s delimiter
    scanner.scan(&mut input, &mut fields, 1).unwrap();
    assert_eq!(to_strings(&fields), ["baz"]);

    let outcome = scanner.scan(&mut input, &mut fields, 2).unwrap();
    assert_eq!(to_strings(&fields), ["qux", "quux"]);
    assert!(outcome.eof);
}

#[test]
fn field_scanner_quota_policy_matrix() {
    let input = b"a,b\n";

    // enforce on (default): MissingFields, output untouched
    let mut scanner = FieldScanner::new();
    scanner.set_delimiters(b",").unwrap();
    let mut fields = vec![b"before".to_vec()];
    let err = scanner
        .scan(&mut Cursor::new(&input[..]), &mut fields, 3)
        .unwrap_err();
    assert!(matches!(err, ScanError::MissingFields { found: 2, expected: 3 }));
    assert_eq!(to_strings(&fields), ["before"]);

    // enforce off, ignore on (default leniency): success, output untouched
    scanner.set_enforce_field_number(false);
    let outcome = scanner
        .scan(&mut Cursor::new(&input[..]), &mut fields, 3)
        .unwrap();
    assert!(!outcome.stored);
    assert_eq!(to_strings(&fields), ["before"]);

    // enforce off, ignore off: short result stored
    scanner.set_ignore_underfull_data(false);
    let outcome = scanner
        .scan(&mut Cursor::new(&input[..]), &mut fields, 3)
        .unwrap();
    assert!(outcome.stored);
    assert_eq!(to_strings(&fields), ["a", "b"]);
}

#[test]
fn field_scanner_rejects_empty_fields_everywhere() {
    for (input, column) in [
        (&b",a\n"[..], 1usize),   // leading delimiter
        (&b"a,,b\n"[..], 2),      // consecutive delimiters
        (&b"a,b,\n"[..], 3),      // delimiter right before terminator
    ] {
        let mut scanner = FieldScanner::new();
        scanner.set_delimiters(b",").unwrap();
        let mut fields = Vec::new();
        let err = scanner
            .scan(&mut Cursor::new(input), &mut fields, 3)
            .unwrap_err();
        match err {
            ScanError::EmptyField { column: c } => assert_eq!(c, column),
            other => panic!("expected EmptyField for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn field_scanner_masked_bytes_are_invisible() {
    let mut scanner = FieldScanner::new();
    scanner.set_delimiters(b",").unwrap();
    scanner.set_masked(b"\r\"").unwrap();
    let mut input = Cursor::new(&b"\"a\",\"b\"\r\n"[..]);
    let mut fields = Vec::new();

    scanner.scan(&mut input, &mut fields, 2).unwrap();
    assert_eq!(to_strings(&fields), ["a", "b"]);
}

#[test]
fn field_scanner_transform_at_column_one() {
    let mut scanner = FieldScanner::new();
    scanner.set_delimiters(b",").unwrap();
    scanner.set_transform(1, |field: &mut Vec<u8>| {
        field.extend_from_slice(b"_1");
        Ok(())
    });
    let mut input = Cursor::new(&b"a,b"[..]);
    let mut fields = Vec::new();

    scanner.scan(&mut input, &mut fields, 2).unwrap();
    assert_eq!(to_strings(&fields), ["a_1", "b"]);
}

#[test]
fn field_scanner_invalid_quota() {
    let scanner = FieldScanner::new();
    let mut input = Cursor::new(&b"a\tb\n"[..]);
    let mut fields = vec![b"before".to_vec()];

    let err = scanner.scan(&mut input, &mut fields, 0).unwrap_err();
    assert!(matches!(err, ScanError::InvalidArgument(_)));
    assert_eq!(to_strings(&fields), ["before"]);
    assert_eq!(input.position(), 0);
}

#[test]
fn field_scanner_overlapping_sets_rejected() {
    let mut scanner = FieldScanner::new();
    assert!(scanner.set_terminators(b"\t").is_err());
    assert!(scanner.set_masked(b"\n").is_err());
    // a valid reassignment frees the byte for another class
    scanner.set_delimiters(b",").unwrap();
    scanner.set_masked(b"\t").unwrap();
}

// ---------------------------------------------------------------------------
// RowScanner scenarios
// ---------------------------------------------------------------------------

#[test]
fn row_scanner_truncates_overfull_row() {
    let mut scanner = RowScanner::new();
    scanner.set_delimiter(b',');
    scanner.set_min_fields(3);
    scanner.set_max_fields(3);
    scanner.set_enforce_max_fields(false);
    scanner.set_ignore_overfull_row(false);
    let mut input = Cursor::new(&b"one,two,three,four,five\n"[..]);
    let mut row = Vec::new();

    scanner.scan(&mut input, &mut row).unwrap();
    assert_eq!(to_strings(&row), ["one", "two", "three"]);
}

#[test]
fn row_scanner_bound_policy_matrix() {
    let input = b"a,b,c\n";

    // enforce max (default): UnexpectedFields, output untouched
    let mut scanner = RowScanner::new();
    scanner.set_delimiter(b',');
    scanner.set_max_fields(2);
    let mut row = vec![b"before".to_vec()];
    let err = scanner.scan(&mut Cursor::new(&input[..]), &mut row).unwrap_err();
    assert!(matches!(err, ScanError::UnexpectedFields { max: 2 }));
    assert_eq!(to_strings(&row), ["before"]);

    // skip overfull (enforce off, ignore on): success, output untouched
    scanner.set_enforce_max_fields(false);
    let outcome = scanner.scan(&mut Cursor::new(&input[..]), &mut row).unwrap();
    assert!(!outcome.stored);
    assert_eq!(to_strings(&row), ["before"]);

    // store truncated (enforce off, ignore off)
    scanner.set_ignore_overfull_row(false);
    let outcome = scanner.scan(&mut Cursor::new(&input[..]), &mut row).unwrap();
    assert!(outcome.stored);
    assert_eq!(to_strings(&row), ["a", "b"]);

    // min bound: MissingFields with found/expected counts
    let mut scanner = RowScanner::new();
    scanner.set_delimiter(b',');
    scanner.set_min_fields(5);
    let mut row = vec![b"before".to_vec()];
    let err = scanner.scan(&mut Cursor::new(&input[..]), &mut row).unwrap_err();
    assert!(matches!(err, ScanError::MissingFields { found: 3, expected: 5 }));
    assert_eq!(to_strings(&row), ["before"]);
}

#[test]
fn row_scanner_keeps_empty_fields() {
    assert_eq!(row_scan(b"a,,b,\n", b','), ["a", "", "b", ""]);
}

#[test]
fn row_scanner_column_transforms() {
    let mut scanner = RowScanner::new();
    scanner.set_delimiter(b',');
    scanner.set_transform(1, |f: &mut Vec<u8>| {
        f.make_ascii_uppercase();
        Ok(())
    });
    scanner.set_transform(3, |f: &mut Vec<u8>| {
        f.reverse();
        Ok(())
    });
    let mut input = Cursor::new(&b"ab,cd,ef\n"[..]);
    let mut row = Vec::new();

    scanner.scan(&mut input, &mut row).unwrap();
    assert_eq!(to_strings(&row), ["AB", "cd", "fe"]);
}

#[test]
fn row_scanner_transform_lookup_not_found() {
    let scanner = RowScanner::new();
    assert!(matches!(scanner.transform(4), Err(ScanError::NotFound(4))));
}

#[test]
fn row_scanner_mutable_between_scans() {
    let mut scanner = RowScanner::new();
    scanner.set_delimiter(b',');
    let mut input = Cursor::new(&b"a,b\nx;y\n"[..]);
    let mut row = Vec::new();

    scanner.scan(&mut input, &mut row).unwrap();
    assert_eq!(to_strings(&row), ["a", "b"]);

    scanner.set_delimiter(b';');
    scanner.scan(&mut input, &mut row).unwrap();
    assert_eq!(to_strings(&row), ["x", "y"]);
}

#[test]
fn scan_whole_file_row_by_row() {
    let mut scanner = RowScanner::new();
    scanner.set_delimiter(b',');
    scanner.set_min_fields(2);
    scanner.set_enforce_min_fields(false);
    let mut input = Cursor::new(&b"h1,h2\nshort\nv1,v2\n"[..]);
    let mut row = Vec::new();
    let mut rows = Vec::new();

    loop {
        let outcome = scanner.scan(&mut input, &mut row).unwrap();
        if outcome.stored {
            rows.push(to_strings(&row));
        }
        if outcome.eof {
            break;
        }
    }
    // the underfull "short" row and the final empty row are skipped
    assert_eq!(rows, vec![vec!["h1", "h2"], vec!["v1", "v2"]]);
}
