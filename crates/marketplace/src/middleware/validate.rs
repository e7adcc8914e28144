use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use validator::{Validate, ValidationError, ValidationErrors};

/// JSON body that must also pass its `validator` rules. Failures render in
/// the error envelope with per-field details.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(json_value) =
            axum::Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    let payload = json!({
                        "success": false,
                        "error": format!("Invalid JSON: {}", rejection.body_text()),
                    });
                    (rejection.status(), axum::Json(payload))
                })?;

        json_value.validate().map_err(|e| validation_rejection(&e))?;

        Ok(Self(json_value))
    }
}

/// Query string counterpart of [`SimpleValidatedJson`], used for paging filters.
pub struct SimpleValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for SimpleValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let payload = json!({
                    "success": false,
                    "error": format!("Invalid query: {}", rejection.body_text()),
                });
                (rejection.status(), axum::Json(payload))
            })?;

        params.validate().map_err(|e| validation_rejection(&e))?;

        Ok(Self(params))
    }
}

fn validation_rejection(errors: &ValidationErrors) -> (StatusCode, axum::Json<Value>) {
    let payload = json!({
        "success": false,
        "error": format_validation_errors(errors),
        "details": format_validation_errors_detailed(errors),
    });
    (StatusCode::BAD_REQUEST, axum::Json(payload))
}

fn describe(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match error.code.as_ref() {
            "email" => "Invalid email format".to_string(),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            "must_match" => "Values do not match".to_string(),
            _ => format!("Invalid {field}"),
        })
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut error_messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            error_messages.push(format!("{field}: {}", describe(&field, error)));
        }
    }

    if error_messages.is_empty() {
        "Validation failed".to_string()
    } else {
        error_messages.sort();
        error_messages.join("; ")
    }
}

fn format_validation_errors_detailed(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| describe(&field, e))
            .collect();
        error_map.insert(field.to_string(), json!(messages));
    }

    Value::Object(error_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct Berth {
        #[validate(length(min = 2, message = "Name is too short"))]
        name: String,
        #[validate(range(min = 1))]
        length_m: i32,
    }

    #[test]
    fn lists_every_failing_field() {
        let errors = Berth {
            name: "A".into(),
            length_m: 0,
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            format_validation_errors(&errors),
            "length_m: Value out of range; name: Name is too short"
        );

        let details = format_validation_errors_detailed(&errors);
        assert_eq!(details["name"][0], "Name is too short");
    }
}
