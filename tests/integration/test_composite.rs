//! Integration tests for paired sinks

use crate::fixtures::{read, write_file_sync};
use gradfs::services::format::display;
use gradfs::{CompositeSink, Error, Init, SinkConfig, auto_save_two};
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

#[test]
fn test_both_destinations_written() {
    let temp_dir = TempDir::new().unwrap();
    let x = temp_dir.path().join("X.txt");
    let y = temp_dir.path().join("Y.txt");

    let mut pair = CompositeSink::open(
        &x,
        SinkConfig::<Vec<String>>::lines(),
        &y,
        SinkConfig::<Vec<String>>::lines(),
    )
    .unwrap();

    let (a, b) = pair.accumulators_mut();
    a.push("a".to_string());
    b.push("b".to_string());
    pair.close().unwrap();

    assert_eq!(read(&x), "a\n");
    assert_eq!(read(&y), "b\n");
}

#[test]
fn test_first_is_fully_written_before_second() {
    let temp_dir = TempDir::new().unwrap();
    let x = temp_dir.path().join("X.txt");
    let y = temp_dir.path().join("Y.txt");
    write_file_sync(&x, b"OLD").unwrap();

    // The second sink's selector runs as its flush begins; record what the
    // first destination holds at that moment.
    let seen: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let seen_in_selector = Rc::clone(&seen);
    let x_in_selector = x.clone();
    let second = SinkConfig::with_selector(
        Init::<Vec<String>>::default(),
        move |acc: &Vec<String>| {
            *seen_in_selector.borrow_mut() = fs::read_to_string(&x_in_selector).ok();
            acc.clone()
        },
        display::<String>,
    );

    auto_save_two(&x, SinkConfig::<Vec<String>>::lines(), &y, second, |a, b| {
        a.push("a".to_string());
        b.push("b".to_string());
        Ok::<_, Error>(())
    })
    .unwrap();

    assert_eq!(seen.borrow().as_deref(), Some("a\n"));
    assert_eq!(read(&y), "b\n");
}

#[test]
fn test_drop_flushes_both_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let x = temp_dir.path().join("X.txt");
    let y = temp_dir.path().join("Y.txt");

    {
        let mut pair =
            CompositeSink::open(&x, SinkConfig::<Vec<i32>>::lines(), &y, SinkConfig::<Vec<i32>>::lines())
                .unwrap();
        let (a, b) = pair.accumulators_mut();
        a.push(1);
        b.push(2);
    }

    assert_eq!(read(&x), "1\n");
    assert_eq!(read(&y), "2\n");
}

#[test]
fn test_missing_paths_are_reported() {
    let both = CompositeSink::open("", SinkConfig::<Vec<i32>>::lines(), "", SinkConfig::<Vec<i32>>::lines());
    let err = both.err().unwrap();
    assert!(err.to_string().contains("Both file path arguments"));

    let temp_dir = TempDir::new().unwrap();
    let x = temp_dir.path().join("X.txt");

    let second_missing =
        CompositeSink::open(&x, SinkConfig::<Vec<i32>>::lines(), "", SinkConfig::<Vec<i32>>::lines());
    let err = second_missing.err().unwrap();
    assert!(matches!(err, Error::Validation(ref m) if m.contains("second")));
    // The first destination is left untouched when the pair never opened
    assert!(!x.exists());

    let first_missing =
        CompositeSink::open("", SinkConfig::<Vec<i32>>::lines(), &x, SinkConfig::<Vec<i32>>::lines());
    let err = first_missing.err().unwrap();
    assert!(matches!(err, Error::Validation(ref m) if m.contains("first")));
}

#[test]
fn test_first_failure_does_not_prevent_second_flush() {
    let temp_dir = TempDir::new().unwrap();
    let bad = temp_dir.path().join("no_such_dir/X.txt");
    let y = temp_dir.path().join("Y.txt");

    let mut pair =
        CompositeSink::open(&bad, SinkConfig::<Vec<i32>>::lines(), &y, SinkConfig::<Vec<i32>>::lines())
            .unwrap();
    pair.accumulators_mut().1.push(5);

    let err = pair.close().unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    assert_eq!(read(&y), "5\n");
}

#[test]
fn test_both_failures_are_aggregated() {
    let temp_dir = TempDir::new().unwrap();
    let bad_x = temp_dir.path().join("no_such_dir/X.txt");
    let bad_y = temp_dir.path().join("no_such_dir/Y.txt");

    let pair = CompositeSink::open(
        &bad_x,
        SinkConfig::<Vec<i32>>::lines(),
        &bad_y,
        SinkConfig::<Vec<i32>>::lines(),
    )
    .unwrap();

    match pair.close() {
        Err(Error::BothSinksFailed { first, second }) => {
            assert_eq!(first.io_kind(), Some(std::io::ErrorKind::NotFound));
            assert_eq!(second.io_kind(), Some(std::io::ErrorKind::NotFound));
        }
        other => panic!("expected BothSinksFailed, got {other:?}"),
    }
}

#[test]
fn test_auto_save_two_flushes_when_body_fails() {
    let temp_dir = TempDir::new().unwrap();
    let x = temp_dir.path().join("X.txt");
    let y = temp_dir.path().join("Y.txt");

    let result: Result<(), Error> = auto_save_two(
        &x,
        SinkConfig::<Vec<i32>>::lines(),
        &y,
        SinkConfig::<Vec<i32>>::lines(),
        |a, _b| {
            a.push(1);
            Err(Error::Validation("second never filled".to_string()))
        },
    );

    assert!(result.is_err());
    assert_eq!(read(&x), "1\n");
    assert_eq!(read(&y), "");
}
