//! Discovery of the latest radar snapshots from the upstream directory
//! listing. Filenames are time-sortable strings, so lexical order doubles
//! as chronological order.

use crate::radar::error::RadarError;
use log::info;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// File extension of the published radar snapshots.
const IMAGE_EXTENSION: &str = ".png";

/// Extracts all image hrefs from a directory-listing page, deduplicated in
/// first-seen order.
pub(crate) fn image_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").expect("CSS selector should be valid");

    let mut seen = HashSet::new();
    let mut hrefs = Vec::new();
    for anchor in document.select(&anchors) {
        if let Some(href) = anchor.value().attr("href") {
            if href.ends_with(IMAGE_EXTENSION) && seen.insert(href.to_string()) {
                hrefs.push(href.to_string());
            }
        }
    }
    hrefs
}

/// Keeps the `count` lexically-largest (newest) filenames and returns them
/// in ascending order, oldest first.
pub(crate) fn select_latest(mut hrefs: Vec<String>, count: usize) -> Vec<String> {
    hrefs.sort_unstable_by(|a, b| b.cmp(a));
    hrefs.truncate(count);
    hrefs.sort_unstable();
    hrefs
}

/// Fetches the directory listing and returns absolute URLs of the `count`
/// most recent snapshots, oldest first. An empty listing is not an error.
pub(crate) async fn list_latest(
    client: &Client,
    base_url: &str,
    count: usize,
) -> Result<Vec<String>, RadarError> {
    let response = client
        .get(base_url)
        .send()
        .await
        .map_err(|e| RadarError::NetworkRequest(base_url.to_string(), e))?;

    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            return Err(if let Some(status) = e.status() {
                RadarError::HttpStatus {
                    url: base_url.to_string(),
                    status,
                    source: e,
                }
            } else {
                RadarError::NetworkRequest(base_url.to_string(), e)
            });
        }
    };

    let html = response
        .text()
        .await
        .map_err(|e| RadarError::NetworkRequest(base_url.to_string(), e))?;

    let latest = select_latest(image_hrefs(&html), count);
    info!("Radar listing yielded {} of {count} requested frames", latest.len());
    Ok(latest
        .into_iter()
        .map(|filename| format!("{base_url}{filename}"))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
    <html><body>
        <a href="image_003.png">Image 3</a>
        <a href="image_001.png">Image 1</a>
        <a href="image_002.png">Image 2</a>
        <a href="not_an_image.txt">Not an image</a>
        <a href="image_002.png">Image 2 again</a>
        <a>No href</a>
    </body></html>
    "#;

    #[test]
    fn hrefs_are_filtered_and_deduplicated() {
        let hrefs = image_hrefs(LISTING);
        assert_eq!(hrefs, ["image_003.png", "image_001.png", "image_002.png"]);
    }

    #[test]
    fn latest_selection_is_chronological() {
        let hrefs = image_hrefs(LISTING);
        assert_eq!(
            select_latest(hrefs.clone(), 3),
            ["image_001.png", "image_002.png", "image_003.png"]
        );
        assert_eq!(
            select_latest(hrefs, 2),
            ["image_002.png", "image_003.png"]
        );
    }

    #[test]
    fn empty_listing_yields_empty_selection() {
        let hrefs = image_hrefs("<html><body><a href='readme.txt'>x</a></body></html>");
        assert!(select_latest(hrefs, 6).is_empty());
    }
}
