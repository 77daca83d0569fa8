#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![cfg(feature = "opaque")]

//! With the `opaque` feature no expression can be named.

mod common;

use common::Thing;
use guardian::{expr, Expression, Guard, GuardConfig, GuardError, Parameter};
use pretty_assertions::assert_eq;

#[test]
fn test_member_reports_unknown() {
    let thing = &Thing::default();
    let err = Guard::new(GuardConfig::loose())
        .null(&expr!(&thing.field))
        .unwrap_err();
    assert_eq!(err.parameter(), Some(&Parameter::Unknown));
    assert_eq!(Expression::parse(&expr!(&thing.field)), Ok(None));
}

#[test]
fn test_strict_rejects_everything() {
    let thing = &Thing::default();
    assert_eq!(
        Guard::new(GuardConfig::strict()).positive(&expr!(thing.count)),
        Err(GuardError::UnsupportedExpression)
    );
}
