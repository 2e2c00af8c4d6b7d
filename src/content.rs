//! Network loading for the diagram assets and the bias descriptions.
//!
//! The diagram ships as one inline-able SVG file per language; the
//! descriptions come from a single pre-extracted HTML document whose
//! `.bias` sections are parsed into a [`BiasCatalog`] once at startup.

use gloo_net::http::Request;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomParser, SupportedType};

use crate::model::{BiasCatalog, Language};
use crate::util::clog;

const CONTENT_URL: &str = "biases_wikipedia.html";

fn asset_url(language: Language) -> String {
    format!("assets/images/cognitive_bias_codex_{}.svg", language.code())
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "HTTP {} fetching {url}",
            response.status()
        )));
    }
    response
        .text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Fetches the SVG diagram for `language`, falling back to English when
/// a translation is missing. Returns the markup together with the
/// language it actually belongs to.
pub async fn load_diagram(language: Language) -> Result<(String, Language), JsValue> {
    match fetch_text(&asset_url(language)).await {
        Ok(markup) => Ok((markup, language)),
        Err(err) if language != Language::En => {
            clog(&format!(
                "no diagram for '{}', falling back to English: {err:?}",
                language.code()
            ));
            fetch_text(&asset_url(Language::En))
                .await
                .map(|markup| (markup, Language::En))
        }
        Err(err) => Err(err),
    }
}

/// Fetches and parses the Wikipedia extract document into a catalog.
pub async fn load_catalog() -> Result<BiasCatalog, JsValue> {
    let html = fetch_text(CONTENT_URL).await?;
    parse_catalog(&html)
}

/// Pulls every `.bias` section (an `h2` title plus a `.content` body)
/// out of the extract document. Sections missing either part are
/// dropped by the catalog.
fn parse_catalog(html: &str) -> Result<BiasCatalog, JsValue> {
    let parser = DomParser::new()?;
    let doc = parser.parse_from_string(html, SupportedType::TextHtml)?;
    let sections = doc.query_selector_all(".bias")?;

    let mut catalog = BiasCatalog::default();
    for i in 0..sections.length() {
        let Some(section) = sections
            .item(i)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        let name = section
            .query_selector("h2")
            .ok()
            .flatten()
            .and_then(|h| h.text_content())
            .unwrap_or_default();
        let content_html = section
            .query_selector(".content")
            .ok()
            .flatten()
            .map(|c| c.inner_html())
            .unwrap_or_default();
        catalog.push(&name, content_html);
    }
    Ok(catalog)
}
