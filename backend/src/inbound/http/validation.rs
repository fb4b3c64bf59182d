//! Request field validation shared by the user handlers.
//!
//! Bodies distinguish three states per field: absent, `null`, and a value.
//! Fields are declared `Option<Option<T>>` with [`present`] so a `null`
//! deserialises as `Some(None)` instead of collapsing into "absent".

use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::domain::{Error, UserField, UserValidationError};

/// Deserialise a field that was present in the body, possibly as `null`.
///
/// Pair with `#[serde(default)]` so a missing field stays `None`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A field that must be supplied with a value.
pub(crate) fn required<T>(field: UserField, value: Option<Option<T>>) -> Result<T, UserValidationError> {
    match value {
        None => Err(UserValidationError::MissingField { field }),
        Some(None) => Err(UserValidationError::NullField { field }),
        Some(Some(value)) => Ok(value),
    }
}

/// A field that may be omitted but never set to `null`.
pub(crate) fn optional<T>(
    field: UserField,
    value: Option<Option<T>>,
) -> Result<Option<T>, UserValidationError> {
    match value {
        None => Ok(None),
        Some(None) => Err(UserValidationError::NullField { field }),
        Some(Some(value)) => Ok(Some(value)),
    }
}

/// Convert a validation failure into a 400 with field details.
pub(crate) fn map_validation_error(err: UserValidationError) -> Error {
    let details = match err.field() {
        Some(field) => json!({ "field": field.as_str(), "code": err.code() }),
        None => json!({ "code": err.code() }),
    };
    Error::invalid_request(err.to_string()).with_details(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "present")]
        value: Option<Option<i32>>,
    }

    #[rstest]
    #[case("{}", None)]
    #[case(r#"{"value":null}"#, Some(None))]
    #[case(r#"{"value":4}"#, Some(Some(4)))]
    fn present_keeps_null_apart_from_absent(#[case] body: &str, #[case] expected: Option<Option<i32>>) {
        let sample: Sample = serde_json::from_str(body).expect("valid sample body");
        assert_eq!(sample.value, expected);
    }

    #[rstest]
    #[case(None, UserValidationError::MissingField { field: UserField::Role })]
    #[case(Some(None), UserValidationError::NullField { field: UserField::Role })]
    fn required_rejects_absent_and_null(
        #[case] value: Option<Option<String>>,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(required(UserField::Role, value), Err(expected));
    }

    #[rstest]
    fn optional_allows_absent_but_not_null() {
        assert_eq!(optional::<i32>(UserField::Efficiency, None), Ok(None));
        assert_eq!(optional(UserField::Efficiency, Some(Some(3))), Ok(Some(3)));
        assert_eq!(
            optional::<i32>(UserField::Efficiency, Some(None)),
            Err(UserValidationError::NullField {
                field: UserField::Efficiency
            })
        );
    }

    #[rstest]
    fn validation_errors_carry_field_details() {
        let err = map_validation_error(UserValidationError::EmptyField {
            field: UserField::FullName,
        });
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "full_name must not be empty");
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "full_name");
        assert_eq!(details["code"], "empty_field");
    }
}
