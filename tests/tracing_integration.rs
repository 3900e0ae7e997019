#![cfg(feature = "tracing")]

use tracing_test::traced_test;
use verdict::adapter::{attempt, from_future, from_json};
use verdict::Outcome;

#[test]
#[traced_test]
fn test_captured_panic_is_logged() {
    let outcome = attempt(|| -> u8 { panic!("worker died") });
    assert!(outcome.is_failure());
    assert!(logs_contain("captured panic"));
    assert!(logs_contain("worker died"));
}

#[test]
#[traced_test]
fn test_rejected_record_is_logged() {
    let result = from_json::<u8, String>(r#"{"ok":true,"value":1,"error":"x"}"#);
    assert!(result.is_err());
    assert!(logs_contain("rejected outcome record"));
}

#[tokio::test]
#[traced_test]
async fn test_rejected_future_is_logged() {
    let outcome = from_future(async { Err::<u8, _>("refused") }).await;
    assert_eq!(outcome, Outcome::Failure("refused"));
    assert!(logs_contain("pending outcome settled as failure"));
}

#[test]
#[traced_test]
fn test_success_paths_are_quiet() {
    assert!(attempt(|| 1).is_success());
    assert!(from_json::<u8, String>(r#"{"ok":true,"value":1}"#).is_ok());
    assert!(!logs_contain("captured panic"));
    assert!(!logs_contain("rejected outcome record"));
}
