//! Extraction of result rows from an index search page.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::TorrentCandidate;

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

static ROW: Lazy<Selector> = Lazy::new(|| selector("tbody tr"));
static CATEGORY: Lazy<Selector> = Lazy::new(|| selector("td:nth-child(1) a"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("td:nth-child(2) a:not(.comments)"));
static MAGNET: Lazy<Selector> = Lazy::new(|| selector(r#"td:nth-child(3) a[href^="magnet:"]"#));
static SIZE: Lazy<Selector> = Lazy::new(|| selector("td:nth-child(4)"));
static DATE: Lazy<Selector> = Lazy::new(|| selector("td:nth-child(5)"));
static SEEDERS: Lazy<Selector> = Lazy::new(|| selector("td:nth-child(6)"));
static LEECHERS: Lazy<Selector> = Lazy::new(|| selector("td:nth-child(7)"));
static DOWNLOADS: Lazy<Selector> = Lazy::new(|| selector("td:nth-child(8)"));

/// Parse every result row of a search page.
///
/// Rows missing a magnet link or a title are skipped. Relative page links are
/// joined to `base_url`.
pub fn parse_search_page(html: &str, base_url: &str) -> Vec<TorrentCandidate> {
    let document = Html::parse_document(html);
    document
        .select(&ROW)
        .filter_map(|row| parse_row(row, base_url))
        .collect()
}

fn parse_row(row: ElementRef<'_>, base_url: &str) -> Option<TorrentCandidate> {
    // The title cell can hold a comment-count anchor; the release link is the last one
    let title_anchor = row.select(&TITLE).last();
    let title = title_anchor.map(element_text).unwrap_or_default();
    let magnet_uri = row
        .select(&MAGNET)
        .next()
        .and_then(|a| a.value().attr("href"))
        .unwrap_or_default();

    if title.is_empty() || magnet_uri.is_empty() {
        return None;
    }

    let link = title_anchor
        .and_then(|a| a.value().attr("href"))
        .map(|href| join_url(base_url, href))
        .unwrap_or_default();

    let category = row
        .select(&CATEGORY)
        .next()
        .and_then(|a| a.value().attr("title"))
        .unwrap_or_default()
        .to_string();

    let date_cell = row.select(&DATE).next();
    let published_at = date_cell
        .and_then(|td| td.value().attr("data-timestamp"))
        .and_then(|ts| ts.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

    Some(TorrentCandidate {
        title,
        category,
        link,
        magnet_uri: magnet_uri.to_string(),
        size: cell_text(row, &SIZE),
        date: date_cell.map(element_text).unwrap_or_default(),
        published_at,
        seeders: parse_count(&cell_text(row, &SEEDERS)),
        leechers: parse_count(&cell_text(row, &LEECHERS)),
        downloads: parse_count(&cell_text(row, &DOWNLOADS)),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn cell_text(row: ElementRef<'_>, selector: &Selector) -> String {
    row.select(selector).next().map(element_text).unwrap_or_default()
}

/// Leading decimal digits of a cell; anything unparseable counts as 0.
fn parse_count(text: &str) -> u32 {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

fn join_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}
