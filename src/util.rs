use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

lazy_static::lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// Reads every run of digits in `text` as a decimal character code and joins the characters.
pub fn char_codes_to_string(text: &str) -> Result<String> {
    DIGITS
        .find_iter(text)
        .map(|m| {
            m.as_str()
                .parse::<u32>()
                .ok()
                .and_then(std::char::from_u32)
                .ok_or_else(|| Error::InvalidCharCode(m.as_str().to_owned()))
        })
        .collect()
}

/// Unwraps the service's `{"d": "<json>"}` envelope into a list of records.
///
/// A `null` or empty `d` is an empty list.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    Ok(records(body)?.unwrap_or_default())
}

/// Like [`decode_envelope`], but a `null` or empty `d` is an error.
pub fn decode_required_envelope<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    records(body)?.ok_or_else(|| Error::EmptyPayload(body.chars().take(200).collect()))
}

fn records<T: DeserializeOwned>(body: &str) -> Result<Option<Vec<T>>> {
    match payload(body)? {
        Value::Null => Ok(None),
        Value::String(inner) if inner.trim().is_empty() => Ok(None),
        Value::String(inner) => Ok(serde_json::from_str::<Option<Vec<T>>>(&inner)?),
        other => Err(Error::UnexpectedPayload(other.to_string())),
    }
}

/// Reads the `d` field as a plain string, as the login call answers.
pub fn decode_scalar(body: &str) -> Result<String> {
    match payload(body)? {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::String(_) | Value::Null => Err(Error::EmptySessionId),
        other => Err(Error::UnexpectedPayload(other.to_string())),
    }
}

fn payload(body: &str) -> Result<Value> {
    let mut outer: Value = serde_json::from_str(body)?;
    outer
        .get_mut("d")
        .map(Value::take)
        .ok_or_else(|| Error::MissingPayload(body.chars().take(200).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        #[serde(rename = "Kod")]
        code: String,
        #[serde(rename = "Nazwa")]
        name: String,
    }

    #[test]
    fn test_char_codes() {
        assert_eq!(char_codes_to_string("x(65, 98,99)").unwrap(), "Abc");
        assert_eq!(char_codes_to_string("no digits").unwrap(), "");
        assert_eq!(
            char_codes_to_string("String.fromCharCode(322,243)").unwrap(),
            "łó"
        );
    }

    #[test]
    fn test_char_codes_invalid() {
        assert!(matches!(
            char_codes_to_string("55296"),
            Err(Error::InvalidCharCode(code)) if code == "55296"
        ));
        assert!(char_codes_to_string("99999999999").is_err());
    }

    #[test]
    fn test_char_codes_ascii_digits_only() {
        assert_eq!(char_codes_to_string("f(65,\u{663})").unwrap(), "A");
        assert_eq!(char_codes_to_string("\u{966}66").unwrap(), "B");
    }

    #[test]
    fn test_envelope_records() {
        let body = r#"{"d": "[{\"Kod\":\"01\",\"Nazwa\":\"Foo\"}]"}"#;
        let records: Vec<Record> = decode_envelope(body).unwrap();
        assert_eq!(
            records,
            vec![Record {
                code: "01".into(),
                name: "Foo".into()
            }]
        );
    }

    #[test]
    fn test_envelope_empty_payloads() {
        for body in [r#"{"d": null}"#, r#"{"d": ""}"#, r#"{"d": "null"}"#, r#"{"d": "[]"}"#].iter() {
            let records: Vec<Record> = decode_envelope(body).unwrap();
            assert!(records.is_empty(), "{}", body);
        }
    }

    #[test]
    fn test_required_envelope() {
        let body = r#"{"d": "[{\"Kod\":\"02\",\"Nazwa\":\"Bar\"}]"}"#;
        let records: Vec<Record> = decode_required_envelope(body).unwrap();
        assert_eq!(records.len(), 1);

        let records: Vec<Record> = decode_required_envelope(r#"{"d": "[]"}"#).unwrap();
        assert!(records.is_empty());

        for body in [r#"{"d": null}"#, r#"{"d": ""}"#, r#"{"d": "null"}"#].iter() {
            assert!(
                matches!(
                    decode_required_envelope::<Record>(body),
                    Err(Error::EmptyPayload(_))
                ),
                "{}",
                body
            );
        }
    }

    #[test]
    fn test_envelope_malformed() {
        assert!(matches!(
            decode_envelope::<Record>(r#"{"x": 1}"#),
            Err(Error::MissingPayload(_))
        ));
        assert!(matches!(
            decode_envelope::<Record>(r#"{"d": 5}"#),
            Err(Error::UnexpectedPayload(_))
        ));
        assert!(matches!(
            decode_envelope::<Record>("<html>"),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            decode_envelope::<Record>(r#"{"d": "[{\"Kod\":"}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_scalar() {
        assert_eq!(decode_scalar(r#"{"d":"abc123"}"#).unwrap(), "abc123");
        assert!(matches!(
            decode_scalar(r#"{"d":""}"#),
            Err(Error::EmptySessionId)
        ));
        assert!(matches!(
            decode_scalar(r#"{"d":null}"#),
            Err(Error::EmptySessionId)
        ));
    }
}
