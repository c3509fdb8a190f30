use orderdesk_core::{error_chain, HttpError};
use orderdesk_data::DataError;

#[test]
fn database_cause_appears_once_in_chain() {
    let err: DataError = sqlx::Error::PoolTimedOut.into();
    let cause = sqlx::Error::PoolTimedOut.to_string();

    assert_eq!(err.to_string(), "Database error");
    let chain = error_chain(&err);
    assert_eq!(chain, format!("Database error\ncaused by: {cause}"));
    assert_eq!(chain.matches(cause.as_str()).count(), 1);
}

#[test]
fn other_has_no_source() {
    let err = DataError::Other("product 99 does not exist".into());
    assert_eq!(error_chain(&err), "Data error: product 99 does not exist");
}

#[test]
fn not_found_becomes_http_not_found() {
    let http = HttpError::from(DataError::NotFound("Order 7 not found".into()));
    assert!(matches!(http, HttpError::NotFound(msg) if msg == "Order 7 not found"));
}
