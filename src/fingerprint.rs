use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::models::Query;

// Canonical JSON of every field that affects the response.
// Keys come out of the BTreeMap sorted, and an absent context is always `null`.
fn canonical(query: &Query) -> String {
    let mut fields: BTreeMap<&str, Value> = BTreeMap::new();
    fields.insert("text", Value::from(query.text.as_str()));
    fields.insert("task_type", Value::from(query.task_type.as_str()));
    fields.insert("context", query.context.as_deref().map_or(Value::Null, Value::from));
    fields.insert("model_provider", Value::from(query.model_provider.as_str()));
    fields.insert("temperature", Value::from(query.temperature));

    Value::Object(fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect()).to_string()
}

// hex SHA-256 of the canonical form
pub fn fingerprint(query: &Query) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical(query).as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QueryRequest, TaskType};

    fn base() -> Query {
        Query::new("hi")
            .with_task_type(TaskType::Analysis)
            .with_context("ctx")
            .with_model_provider("openai")
            .with_temperature(0.7)
    }

    #[test]
    fn canonical_form_is_sorted_json() {
        assert_eq!(
            canonical(&base()),
            r#"{"context":"ctx","model_provider":"openai","task_type":"analysis","temperature":0.7,"text":"hi"}"#
        );
        assert!(canonical(&Query::new("hi")).starts_with(r#"{"context":null,"#));
    }

    #[test]
    fn equal_queries_share_a_fingerprint() {
        assert_eq!(fingerprint(&base()), fingerprint(&base()));
        let key = fingerprint(&base());
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn construction_order_does_not_matter() {
        let reordered = Query::new("hi")
            .with_temperature(0.7)
            .with_model_provider("openai")
            .with_context("ctx")
            .with_task_type(TaskType::Analysis);
        assert_eq!(fingerprint(&base()), fingerprint(&reordered));

        let from_payload = Query::try_from(QueryRequest {
            temperature: Some(0.7),
            context: Some("ctx".into()),
            model_provider: Some("openai".into()),
            task_type: Some("analysis".into()),
            text: "hi".into(),
        })
        .unwrap();
        assert_eq!(fingerprint(&base()), fingerprint(&from_payload));
    }

    #[test]
    fn every_field_changes_the_fingerprint() {
        let key = fingerprint(&base());
        let variants = [
            base().with_context("other"),
            Query { context: None, ..base() },
            base().with_task_type(TaskType::Creative),
            base().with_model_provider("anthropic"),
            base().with_temperature(0.70000001),
            base().with_temperature(0.9),
            Query { text: "hello".into(), ..base() },
        ];
        for variant in &variants {
            assert_ne!(key, fingerprint(variant), "{variant:?}");
        }
    }

    #[test]
    fn omitted_defaults_match_explicit_defaults() {
        let implicit = Query::try_from(QueryRequest {
            text: "hi".into(),
            ..Default::default()
        })
        .unwrap();
        let explicit = Query::try_from(QueryRequest {
            text: "hi".into(),
            task_type: Some("general".into()),
            model_provider: Some("openai".into()),
            temperature: Some(0.7),
            context: None,
        })
        .unwrap();
        assert_eq!(fingerprint(&implicit), fingerprint(&explicit));
    }

    #[test]
    fn unknown_task_type_shares_the_general_entry() {
        let unknown = Query::new("hi").with_task_type(TaskType::from("poetry"));
        assert_eq!(fingerprint(&unknown), fingerprint(&Query::new("hi")));
    }

    #[test]
    fn text_is_not_confused_with_context() {
        let a = Query::new("ab").with_context("c");
        let b = Query::new("a").with_context("bc");
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }
}
