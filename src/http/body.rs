//! Request body decoding for `/toDo`.
//!
//! JSON keys are mapped to entity fields through [`FIELDS`] rather than a
//! derived deserializer, so each key gets its own null and type handling and
//! unknown keys are skipped.

use serde_json::{Map, Value};

use crate::domain::todo::{NewToDo, ToDoPatch, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field { Title, Description, DueDate }

const FIELDS: &[(&str, Field)] = &[
    ("title", Field::Title),
    ("description", Field::Description),
    ("dueDate", Field::DueDate),
];

fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ValidationError::Body("expected a JSON object".into())),
        Err(e) => Err(ValidationError::Body(e.to_string())),
    }
}

/// Text fields take strings, and numbers and booleans in their JSON spelling.
fn text(name: &'static str, value: Value) -> Result<Option<String>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ValidationError::FieldType { field: name, expected: "a string or null" }),
    }
}

const DUE_DATE_TYPE: ValidationError = ValidationError::FieldType { field: "dueDate", expected: "a date-time string" };

/// Decodes the body of a partial update: only keys present in the body are set.
pub fn patch(bytes: &[u8]) -> Result<ToDoPatch, ValidationError> {
    let map = parse_object(bytes)?;
    let mut patch = ToDoPatch::default();
    for (key, value) in map {
        let Some(&(name, field)) = FIELDS.iter().find(|(name, _)| *name == key) else { continue };
        match field {
            Field::Title => patch.title = Some(text(name, value)?),
            Field::Description => patch.description = Some(text(name, value)?),
            Field::DueDate => match value {
                Value::String(s) => patch.set_due_date(&s)?,
                _ => return Err(DUE_DATE_TYPE),
            },
        }
    }
    Ok(patch)
}

/// Decodes the body of a create.
pub fn new_to_do(bytes: &[u8]) -> Result<NewToDo, ValidationError> {
    let map = parse_object(bytes)?;
    let mut fields = NewToDo::default();
    for (key, value) in map {
        let Some(&(name, field)) = FIELDS.iter().find(|(name, _)| *name == key) else { continue };
        match field {
            Field::Title => fields.title = text(name, value)?,
            Field::Description => fields.description = text(name, value)?,
            Field::DueDate => match value {
                Value::String(s) => fields.set_due_date(&s)?,
                _ => return Err(DUE_DATE_TYPE),
            },
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_with_all_fields() {
        let body = br#"{"title": "be born", "description":"It's your birthday!", "dueDate":"1985-01-08T08:00:00"}"#;
        let fields = new_to_do(body).unwrap();
        assert_eq!(fields.title.as_deref(), Some("be born"));
        assert_eq!(fields.description.as_deref(), Some("It's your birthday!"));
        assert_eq!(fields.due_date.unwrap().to_string(), "1985-01-08T08:00:00");
    }

    #[test]
    fn create_body_fields_are_optional_and_unknown_keys_ignored() {
        let fields = new_to_do(br#"{ "title": "myTitle", "id": 12, "colour": "red"}"#).unwrap();
        assert_eq!(fields, NewToDo { title: Some("myTitle".into()), ..Default::default() });
    }

    #[test]
    fn invalid_due_date_rejects_the_body() {
        let err = new_to_do(br#"{"title": "be born", "dueDate":"invalid due date"}"#).unwrap_err();
        assert_eq!(err, ValidationError::DueDate("invalid due date".into()));
        assert!(patch(br#"{"dueDate":"invalid due date"}"#).is_err());
    }

    #[test]
    fn null_due_date_is_rejected() {
        assert!(matches!(new_to_do(br#"{"dueDate": null}"#), Err(ValidationError::FieldType { field: "dueDate", .. })));
        assert!(patch(br#"{"dueDate": null}"#).is_err());
    }

    #[test]
    fn malformed_json_and_non_objects_are_rejected() {
        let bodies: [&[u8]; 4] = [b"{\"title\": ", b"", b"[1, 2]", b"\"title\""];
        for body in bodies {
            assert!(matches!(new_to_do(body), Err(ValidationError::Body(_))));
        }
    }

    #[test]
    fn structured_text_values_are_rejected() {
        assert!(matches!(patch(br#"{"title": [5]}"#), Err(ValidationError::FieldType { field: "title", .. })));
        assert!(matches!(new_to_do(br#"{"description": {"a": 1}}"#), Err(ValidationError::FieldType { field: "description", .. })));
    }

    #[test]
    fn scalar_text_values_are_coerced() {
        let fields = new_to_do(br#"{"title": 5, "description": true}"#).unwrap();
        assert_eq!(fields.title.as_deref(), Some("5"));
        assert_eq!(fields.description.as_deref(), Some("true"));
        assert_eq!(patch(br#"{"title": 2.5}"#).unwrap().title, Some(Some("2.5".into())));
    }

    #[test]
    fn patch_due_date_uses_the_strict_grammar() {
        let p = patch(br#"{"dueDate": "2017-07-06T00:00:00"}"#).unwrap();
        assert_eq!(p.due_date.flatten().map(|d| d.to_string()).as_deref(), Some("2017-07-06T00:00:00"));
        assert_eq!(patch(br#"{"dueDate": "2017-7-6T00:00:00"}"#), Err(ValidationError::DueDate("2017-7-6T00:00:00".into())));
        assert!(matches!(patch(br#"{"dueDate": 20170706}"#), Err(ValidationError::FieldType { field: "dueDate", .. })));
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let p = patch(br#"{"description": "myNewDescription", "title": null}"#).unwrap();
        assert_eq!(p.title, Some(None));
        assert_eq!(p.description, Some(Some("myNewDescription".into())));
        assert_eq!(p.due_date, None);
        assert!(patch(b"{}").unwrap().is_empty());
    }
}
