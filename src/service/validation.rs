//! Request validation against static field schemas.

use crate::error::AppError;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// String whose length, in characters, lies in `min..=max`.
    Str { min: usize, max: usize },
    /// Integer in `min..=max`. Integral floats and decimal strings are coerced.
    Int { min: i64, max: i64 },
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// An ordered set of required fields. Fields not listed are ignored.
#[derive(Clone, Copy, Debug)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

pub const ITEM_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule {
            name: "title",
            kind: FieldKind::Str { min: 1, max: 64 },
        },
        FieldRule {
            name: "description",
            kind: FieldKind::Str { min: 1, max: 1024 },
        },
        FieldRule {
            name: "price",
            kind: FieldKind::Int { min: 1, max: 1_000_000 },
        },
    ],
};

pub const REVIEW_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule {
            name: "text",
            kind: FieldKind::Str { min: 1, max: 1024 },
        },
        FieldRule {
            name: "grade",
            kind: FieldKind::Int { min: 1, max: 10 },
        },
    ],
};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a parsed body, rewriting coerced integer fields in place so the
    /// body deserializes into the typed payload. The first violated rule, in
    /// schema order, is reported.
    pub fn validate(body: &mut Value, schema: &Schema) -> Result<(), AppError> {
        let map = body
            .as_object_mut()
            .ok_or_else(|| AppError::Validation("body must be a JSON object".into()))?;
        for rule in schema.fields {
            match map.get_mut(rule.name) {
                None | Some(Value::Null) => {
                    return Err(AppError::Validation(format!("{} is required", rule.name)));
                }
                Some(v) => validate_field(rule, v)?,
            }
        }
        Ok(())
    }
}

/// `5`, `5.0`, `"5"` and `" 5 "` all read as 5. Booleans, fractional numbers
/// and non-numeric strings do not.
fn coerce_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn validate_field(rule: &FieldRule, v: &mut Value) -> Result<(), AppError> {
    let col = rule.name;
    match rule.kind {
        FieldKind::Str { min, max } => {
            let s = v
                .as_str()
                .ok_or_else(|| AppError::Validation(format!("{} must be a string", col)))?;
            let len = s.chars().count();
            if len < min {
                return Err(AppError::Validation(format!("{} must be at least {} characters", col, min)));
            }
            if len > max {
                return Err(AppError::Validation(format!("{} must be at most {} characters", col, max)));
            }
        }
        FieldKind::Int { min, max } => {
            let n = coerce_int(v).ok_or_else(|| AppError::Validation(format!("{} must be an integer", col)))?;
            if n < min {
                return Err(AppError::Validation(format!("{} must be at least {}", col, min)));
            }
            if n > max {
                return Err(AppError::Validation(format!("{} must be at most {}", col, max)));
            }
            *v = Value::from(n);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(mut doc: Value, schema: &Schema) -> Result<Value, AppError> {
        RequestValidator::validate(&mut doc, schema).map(|()| doc)
    }

    fn message(result: Result<Value, AppError>) -> String {
        match result {
            Err(AppError::Validation(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_bounds() {
        check(json!({"title": "M", "description": "d".repeat(1024), "price": 1_000_000}), &ITEM_SCHEMA).unwrap();
        check(json!({"text": "t", "grade": 1, "extra": [1, 2]}), &REVIEW_SCHEMA).unwrap();
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let title: String = "ж".repeat(64);
        check(json!({"title": title, "description": "d", "price": 5}), &ITEM_SCHEMA).unwrap();
    }

    #[test]
    fn integral_floats_and_numeric_strings_are_coerced() {
        for grade in [json!(3), json!(3.0), json!("3"), json!(" 3 ")] {
            let doc = check(json!({"text": "ok", "grade": grade}), &REVIEW_SCHEMA).unwrap();
            assert_eq!(doc["grade"], json!(3));
            assert!(doc["grade"].is_i64());
        }
        let m = message(check(json!({"title": "Mug", "description": "x", "price": "0"}), &ITEM_SCHEMA));
        assert_eq!(m, "price must be at least 1");
    }

    #[test]
    fn rejects_out_of_range_and_empty() {
        let m = message(check(json!({"title": "Mug", "description": "x", "price": 0}), &ITEM_SCHEMA));
        assert_eq!(m, "price must be at least 1");
        let m = message(check(json!({"title": "", "description": "x", "price": 5}), &ITEM_SCHEMA));
        assert_eq!(m, "title must be at least 1 characters");
        let m = message(check(json!({"title": "t".repeat(65), "description": "x", "price": 5}), &ITEM_SCHEMA));
        assert_eq!(m, "title must be at most 64 characters");
        let m = message(check(json!({"text": "ok", "grade": 11}), &REVIEW_SCHEMA));
        assert_eq!(m, "grade must be at most 10");
        let m = message(check(json!({"text": "ok", "grade": 1e300}), &REVIEW_SCHEMA));
        assert_eq!(m, "grade must be an integer");
    }

    #[test]
    fn rejects_missing_null_and_wrong_types() {
        assert_eq!(message(check(json!({"text": "ok"}), &REVIEW_SCHEMA)), "grade is required");
        assert_eq!(message(check(json!({"text": null, "grade": 3}), &REVIEW_SCHEMA)), "text is required");
        for grade in [json!(3.5), json!(true), json!("abc"), json!("3.5"), json!(""), json!([3])] {
            assert_eq!(
                message(check(json!({"text": "ok", "grade": grade.clone()}), &REVIEW_SCHEMA)),
                "grade must be an integer",
                "{}",
                grade
            );
        }
        assert_eq!(message(check(json!({"text": 7, "grade": 3}), &REVIEW_SCHEMA)), "text must be a string");
        assert_eq!(message(check(json!([1, 2]), &REVIEW_SCHEMA)), "body must be a JSON object");
    }
}
