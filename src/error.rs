use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can stop a single grid cell from being filled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("endpoint url is empty")]
    EmptyEndpoint,
    #[error("no global `window` available")]
    NoWindow,
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected http status {0}")]
    Status(u16),
    #[error("could not decode response body: {0}")]
    Decode(String),
    #[error("response contained an empty list of descriptors")]
    EmptySequence,
    #[error("descriptor has no `url` string")]
    MissingUrl,
}

impl FetchError {
    pub fn network(value: JsValue) -> Self {
        FetchError::Network(describe_js(&value))
    }
}

pub fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
