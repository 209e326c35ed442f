//! # Draft Comparison
//!
//! Names the fields where a replayed draft differs from the stored one, as
//! `Section.Field` paths over the event document.

use serde_json::{Map, Value};
use shared_types::EventDraft;

/// Paths of differing fields, sorted. Empty when the drafts agree.
pub fn draft_differences(expected: &EventDraft, actual: &EventDraft) -> Vec<String> {
    let mut paths = Vec::new();
    match (serde_json::to_value(expected), serde_json::to_value(actual)) {
        (Ok(expected), Ok(actual)) => collect_differences("", &expected, &actual, &mut paths),
        _ if expected != actual => paths.push("<document>".to_string()),
        _ => {}
    }
    paths.sort();
    paths
}

fn collect_differences(prefix: &str, expected: &Value, actual: &Value, out: &mut Vec<String>) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            for key in union_keys(expected, actual) {
                let path = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{}.{}", prefix, key)
                };
                match (expected.get(key), actual.get(key)) {
                    (Some(left), Some(right)) => collect_differences(&path, left, right, out),
                    _ => out.push(path),
                }
            }
        }
        _ if expected != actual => out.push(prefix.to_string()),
        _ => {}
    }
}

fn union_keys<'a>(left: &'a Map<String, Value>, right: &'a Map<String, Value>) -> Vec<&'a str> {
    let mut keys: Vec<&str> = left.keys().chain(right.keys()).map(String::as_str).collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::test_utils::make_test_draft;
    use shared_types::{ClockSyncStatus, GapKind, ReconciliationGap};

    #[test]
    fn test_identical_drafts() {
        let draft = make_test_draft(4);
        assert!(draft_differences(&draft, &draft.clone()).is_empty());
    }

    #[test]
    fn test_named_paths() {
        let expected = make_test_draft(1);
        let mut actual = expected.clone();
        actual.trade.price = Some(185.51);
        actual.header.clock_sync_status = ClockSyncStatus::Unreliable;
        actual.trade.order_id = Some("9".into());

        assert_eq!(
            draft_differences(&expected, &actual),
            vec![
                "Header.ClockSyncStatus".to_string(),
                "Trade.OrderID".to_string(),
                "Trade.Price".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_section() {
        let expected = make_test_draft(1);
        let mut actual = expected.clone();
        actual.reconciliation = Some(ReconciliationGap {
            kind: GapKind::UnknownOrderReference,
            detail: "x".into(),
        });
        assert_eq!(draft_differences(&expected, &actual), vec!["Reconciliation"]);
    }
}
