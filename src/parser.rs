//! Response parsing strategies.
//!
//! An endpoint either answers with JSON metadata (a single descriptor object
//! or an array of them) or redirects straight to the media resource, in
//! which case the effective response URL is the locator.

use crate::error::FetchError;
use crate::model::MediaDescriptor;
use serde_json::Value;

/// What the transport hands back for one request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// Effective URL after redirects.
    pub url: String,
    /// Body text, only present when the parser asked for it.
    pub body: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseParser {
    Json,
    Identity,
}

/// Result of a parser before shape normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedResponse {
    Single(Value),
    Sequence(Vec<Value>),
    Located(String),
}

impl ResponseParser {
    pub fn reads_body(self) -> bool {
        matches!(self, ResponseParser::Json)
    }

    pub fn parse(self, raw: RawResponse) -> Result<ParsedResponse, FetchError> {
        match self {
            ResponseParser::Json => {
                let body = raw
                    .body
                    .ok_or_else(|| FetchError::Decode("missing body".to_string()))?;
                match serde_json::from_str::<Value>(&body) {
                    Ok(Value::Array(items)) => Ok(ParsedResponse::Sequence(items)),
                    Ok(v @ Value::Object(_)) => Ok(ParsedResponse::Single(v)),
                    Ok(other) => Err(FetchError::Decode(format!(
                        "expected object or array, got {}",
                        other
                    ))),
                    Err(e) => Err(FetchError::Decode(e.to_string())),
                }
            }
            ResponseParser::Identity => Ok(ParsedResponse::Located(raw.url)),
        }
    }
}

impl ParsedResponse {
    /// Normalizes the API shape down to one descriptor: element 0 of a
    /// sequence, or the value itself.
    pub fn resolve(self) -> Result<MediaDescriptor, FetchError> {
        let value = match self {
            ParsedResponse::Located(url) => {
                if url.is_empty() {
                    return Err(FetchError::MissingUrl);
                }
                return Ok(MediaDescriptor { url });
            }
            ParsedResponse::Single(v) => v,
            ParsedResponse::Sequence(items) => items
                .into_iter()
                .next()
                .ok_or(FetchError::EmptySequence)?,
        };
        match value.get("url").and_then(Value::as_str) {
            Some(url) if !url.is_empty() => Ok(MediaDescriptor {
                url: url.to_string(),
            }),
            _ => Err(FetchError::MissingUrl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(s: &str) -> RawResponse {
        RawResponse {
            url: "http://api/endpoint".to_string(),
            body: Some(s.to_string()),
        }
    }

    #[test]
    fn json_array_uses_first_element() {
        let parsed = ResponseParser::Json
            .parse(body(r#"[{"url":"http://x/a.png"},{"url":"http://x/b.png"}]"#))
            .unwrap();
        assert_eq!(parsed.resolve().unwrap().url, "http://x/a.png");
    }

    #[test]
    fn json_object_used_directly() {
        let parsed = ResponseParser::Json
            .parse(body(r#"{"fileSizeBytes":1234,"url":"http://x/dog.webm"}"#))
            .unwrap();
        assert!(matches!(parsed, ParsedResponse::Single(_)));
        assert_eq!(parsed.resolve().unwrap().url, "http://x/dog.webm");
    }

    #[test]
    fn json_errors_are_classified() {
        assert!(matches!(
            ResponseParser::Json.parse(body("<html>")),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(
            ResponseParser::Json.parse(body("42")),
            Err(FetchError::Decode(_))
        ));
        assert_eq!(
            ResponseParser::Json.parse(body("[]")).unwrap().resolve(),
            Err(FetchError::EmptySequence)
        );
        assert_eq!(
            ResponseParser::Json
                .parse(body(r#"[{"id":"abc"}]"#))
                .unwrap()
                .resolve(),
            Err(FetchError::MissingUrl)
        );
        assert_eq!(
            ResponseParser::Json
                .parse(body(r#"{"url":7}"#))
                .unwrap()
                .resolve(),
            Err(FetchError::MissingUrl)
        );
    }

    #[test]
    fn json_without_body_is_decode_error() {
        let raw = RawResponse {
            url: "http://api".to_string(),
            body: None,
        };
        assert!(matches!(
            ResponseParser::Json.parse(raw),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn identity_uses_effective_url() {
        let raw = RawResponse {
            url: "http://y/pic.jpg".to_string(),
            body: None,
        };
        let d = ResponseParser::Identity.parse(raw).unwrap().resolve().unwrap();
        assert_eq!(d.url, "http://y/pic.jpg");
        assert!(!ResponseParser::Identity.reads_body());
        assert!(ResponseParser::Json.reads_body());
    }
}
