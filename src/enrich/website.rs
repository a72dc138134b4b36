// website.rs
use crate::enrich::EnrichError;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Fetches a listing's own website.
pub trait PageFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, EnrichError>;
}

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self, EnrichError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| EnrichError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, EnrichError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(EnrichError::Network(format!("{url} answered HTTP {status}")));
        }
        Ok(resp.text()?)
    }
}

/// Human-visible text of a page plus its meta description, whitespace collapsed.
pub fn visible_text(html: &str) -> Result<String, EnrichError> {
    let document = Html::parse_document(html);
    let meta = Selector::parse(r#"meta[name="description"]"#)
        .map_err(|e| EnrichError::HtmlParse(e.to_string()))?;

    let mut text = String::new();

    for element in document.select(&meta) {
        if let Some(content) = element.value().attr("content") {
            text.push_str(content);
            text.push(' ');
        }
    }

    for node in document.tree.nodes() {
        let Some(t) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element())
            .map(|e| matches!(e.name(), "script" | "style" | "noscript" | "title"))
            .unwrap_or(false);
        if !hidden {
            text.push_str(t);
            text.push(' ');
        }
    }

    Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
}
