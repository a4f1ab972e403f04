//! [`FragmentSource`] over `window.fetch`.

use std::future::Future;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomParser, Response, SupportedType, Window};

use super::js_error;
use crate::error::NavError;
use crate::routing::FragmentSource;

/// Fetches fragments from the serving origin.
pub struct FetchSource {
    window: Window,
}

impl FetchSource {
    /// Fetch through `window`.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FragmentSource for FetchSource {
    fn fetch(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<String, NavError>> {
        let window = self.window.clone();
        let path = path.to_owned();
        async move { fetch_text(&window, &path).await }
    }

    /// Parses the fragment the way the browser would and reads the
    /// region's `innerHTML`.
    fn extract_region(&self, markup: &str, region_id: &str) -> Option<String> {
        let parser = match DomParser::new() {
            Ok(parser) => parser,
            Err(e) => {
                log::warn!("DOMParser unavailable: {}", js_error(&e));
                return None;
            }
        };
        let document = parser
            .parse_from_string(markup, SupportedType::TextHtml)
            .inspect_err(|e| {
                log::warn!("failed to parse fragment: {}", js_error(e));
            })
            .ok()?;
        document
            .get_element_by_id(region_id)
            .map(|region| region.inner_html())
    }
}

async fn fetch_text(window: &Window, path: &str) -> Result<String, NavError> {
    let response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| NavError::Network(js_error(&e)))?;
    let response: Response = response.dyn_into().map_err(|_| {
        NavError::Network(format!("fetch of {path} did not yield a Response"))
    })?;
    if !response.ok() {
        return Err(NavError::FetchStatus {
            path: path.to_owned(),
            status: response.status(),
        });
    }

    let body = response
        .text()
        .map_err(|e| NavError::Network(js_error(&e)))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|e| NavError::Network(js_error(&e)))?;
    text.as_string()
        .ok_or_else(|| NavError::Network(format!("{path} body is not text")))
}
