use serde_json::Value;

const PRIVATE_FIELDS: &[&str] = &["password"];

/// Drop credential fields before a stored document leaves the API.
pub fn strip_private_fields(mut document: Value) -> Value {
    if let Value::Object(map) = &mut document {
        for field in PRIVATE_FIELDS {
            map.remove(*field);
        }
    }
    document
}

/// String view of a field; missing and `null` render as an empty string,
/// non-string scalars use their JSON text.
pub fn text_field(document: &Value, field: &str) -> String {
    match document.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_passwords_only() {
        let doc = strip_private_fields(json!({"doctorId": "D1", "password": "secret"}));
        assert_eq!(doc, json!({"doctorId": "D1"}));
    }

    #[test]
    fn renders_text_fields() {
        let doc = json!({"name": "Dr. Rao", "age": 40, "status": null});
        assert_eq!(text_field(&doc, "name"), "Dr. Rao");
        assert_eq!(text_field(&doc, "age"), "40");
        assert_eq!(text_field(&doc, "status"), "");
        assert_eq!(text_field(&doc, "missing"), "");
    }
}
