use serde_json::Value;

/// Conjunction of field-equality conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: &str) -> Self {
        Self::new().eq("id", id)
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// A missing field matches only a `null` condition.
    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            document.get(field).unwrap_or(&Value::Null) == expected
        })
    }

    /// PostgREST horizontal filter pairs, e.g. `("doctor_id", "eq.D-1")`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.conditions
            .iter()
            .map(|(field, value)| {
                let rendered = match value {
                    Value::Null => return (field.clone(), "is.null".to_string()),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (field.clone(), format!("eq.{}", rendered))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_all_conditions() {
        let doc = json!({"doctor_id": "D1", "date": "2025-03-01", "time": "09:00 AM"});

        assert!(Filter::new().matches(&doc));
        assert!(Filter::new().eq("doctor_id", "D1").eq("date", "2025-03-01").matches(&doc));
        assert!(!Filter::new().eq("doctor_id", "D1").eq("date", "2025-03-02").matches(&doc));
        assert!(!Filter::new().eq("status", "Pending").matches(&doc));
        assert!(Filter::new().eq("status", Value::Null).matches(&doc));
    }

    #[test]
    fn renders_postgrest_pairs() {
        let filter = Filter::new().eq("doctorId", "DOC-1").eq("age", 42).eq("notes", Value::Null);
        assert_eq!(
            filter.to_query_pairs(),
            vec![
                ("doctorId".to_string(), "eq.DOC-1".to_string()),
                ("age".to_string(), "eq.42".to_string()),
                ("notes".to_string(), "is.null".to_string()),
            ]
        );
    }
}
