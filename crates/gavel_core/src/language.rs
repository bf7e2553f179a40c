use serde::{Deserialize, Serialize};

/// A runtime supported by the judging service, e.g. `Python (3.8.1)`.
///
/// Fetched from the service, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: u32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_round_trip() {
        let language = Language {
            id: 71,
            name: "Python (3.8.1)".into(),
        };
        let value = serde_json::to_value(&language).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 71, "name": "Python (3.8.1)"})
        );
        let back: Language = serde_json::from_value(value).unwrap();
        assert_eq!(back, language);
    }

    #[test]
    fn extra_wire_fields_are_ignored() {
        let value = serde_json::json!({"id": 54, "name": "C++ (GCC 9.2.0)", "is_archived": false});
        let language: Language = serde_json::from_value(value).unwrap();
        assert_eq!(language.id, 54);
    }
}
