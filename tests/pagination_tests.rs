//! Tests for the pagination cursor contract.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use reqwest::Url;

use tycho::error::TychoError;
use tycho::types::{Order, PageRequest};

#[test]
fn limit_above_range_is_rejected() {
    let page = PageRequest::new().limit(101);
    match page.validate() {
        Err(TychoError::InvalidArgument(message)) => {
            assert!(message.contains("limit"), "unexpected message: {message}")
        }
        other => panic!("expected invalid argument, got {other:?}"),
    }
}

#[test]
fn limit_within_range_is_accepted() {
    for limit in [0, 1, 50, 100] {
        PageRequest::new().limit(limit).validate().unwrap();
    }
}

#[test]
fn empty_cursor_is_rejected() {
    assert!(PageRequest::new().after("").validate().is_err());
    assert!(PageRequest::new().before("").validate().is_err());
}

#[test]
fn order_parsing_accepts_only_the_fixed_set() {
    assert_eq!("asc".parse::<Order>().unwrap(), Order::Asc);
    assert_eq!("desc".parse::<Order>().unwrap(), Order::Desc);
    assert!("newest".parse::<Order>().is_err());
    assert!("ASC".parse::<Order>().is_err());
}

#[test]
fn default_page_serializes_nothing() {
    assert!(PageRequest::new().query_pairs().is_empty());
}

#[test]
fn zero_limit_is_omitted_from_the_query() {
    let pairs = PageRequest::new().limit(0).query_pairs();
    assert!(pairs.is_empty());
}

#[test]
fn query_round_trip_reproduces_values() {
    let page = PageRequest::new().limit(10).order(Order::Desc).after("x");
    page.validate().unwrap();

    let mut url = Url::parse("https://example.test/assistants").unwrap();
    url.query_pairs_mut()
        .extend_pairs(page.query_pairs().iter().map(|(k, v)| (*k, v.as_str())));

    let parsed: HashMap<String, String> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    assert_eq!(parsed.get("limit").map(String::as_str), Some("10"));
    assert_eq!(parsed.get("order").map(String::as_str), Some("desc"));
    assert_eq!(parsed.get("after").map(String::as_str), Some("x"));
    assert!(!parsed.contains_key("before"));
}
