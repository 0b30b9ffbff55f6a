use crate::error::FetchError;
use crate::parser::RawResponse;
use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Network boundary for the populator. One call per grid cell.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, url: &str, read_body: bool) -> Result<RawResponse, FetchError>;
}

/// `window.fetch` based transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn get(&self, url: &str, read_body: bool) -> Result<RawResponse, FetchError> {
        let window = web_sys::window().ok_or(FetchError::NoWindow)?;
        let request: js_sys::Promise = window.fetch_with_str(url);
        let value = JsFuture::from(request)
            .await
            .map_err(FetchError::network)?;
        let response: Response = value
            .dyn_into()
            .map_err(|_| FetchError::Network("fetch did not yield a Response".to_string()))?;
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }
        let body = if read_body {
            let text = JsFuture::from(response.text().map_err(FetchError::network)?)
                .await
                .map_err(FetchError::network)?;
            Some(
                text.as_string()
                    .ok_or_else(|| FetchError::Decode("body is not text".to_string()))?,
            )
        } else {
            None
        };
        Ok(RawResponse {
            url: response.url(),
            body,
        })
    }
}
