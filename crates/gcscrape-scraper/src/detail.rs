//! Field extraction from a cache detail page.
//!
//! Three fixed anchors on the page carry everything the detail stage needs:
//!
//! | field | anchor |
//! |---|---|
//! | description | `<span id="ctl00_ContentBody_LongDescription">` |
//! | hint (encoded) | `<div id="div_hint">` |
//! | log totals | `<ul class="LogTotals">`, text like `"1,234 56"` |
//!
//! A missing description or hint is normal (many caches have neither) and
//! yields an empty string. Missing log totals mean the page is not a cache
//! page at all (login wall, error page) and is reported as malformed.

use std::sync::LazyLock;

use gcscrape_core::{decode_hint, CacheDetail};
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span#ctl00_ContentBody_LongDescription").expect("valid selector")
});
static HINT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#div_hint").expect("valid selector"));
static LOG_TOTALS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.LogTotals").expect("valid selector"));

/// Extracts description, decoded hint and log totals from a detail page.
///
/// `code` is only used to label errors.
///
/// # Errors
///
/// Returns [`ScraperError::MalformedDetailPage`] if the log totals anchor is
/// absent, holds fewer than two tokens, or a token is not a count.
pub fn parse_detail_page(html: &str, code: &str) -> Result<CacheDetail, ScraperError> {
    let document = Html::parse_document(html);

    let description = document
        .select(&DESCRIPTION)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let hint = document
        .select(&HINT)
        .next()
        .map(|el| decode_hint(&element_text(el)))
        .unwrap_or_default();

    let totals = document
        .select(&LOG_TOTALS)
        .next()
        .ok_or_else(|| ScraperError::MalformedDetailPage {
            code: code.to_owned(),
            reason: "log totals not found".to_owned(),
        })?;
    let (total_found, total_did_not_find) = parse_log_totals(&element_text(totals), code)?;

    Ok(CacheDetail {
        description,
        hint,
        total_found,
        total_did_not_find,
    })
}

/// Text nodes joined with a space, so `<br>` and block tags separate words,
/// then whitespace collapsed.
fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

/// Runs of whitespace, line breaks and non-breaking spaces become one space.
fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses `"1,234 56"` into `(1234, 56)`. Thousands separators are dropped,
/// tokens are split on any whitespace, and only the first two are used.
fn parse_log_totals(text: &str, code: &str) -> Result<(u32, u32), ScraperError> {
    let cleaned = text.replace(',', "").replace('\u{a0}', " ");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let [found, did_not_find, ..] = tokens.as_slice() else {
        return Err(ScraperError::MalformedDetailPage {
            code: code.to_owned(),
            reason: format!(
                "log totals \"{}\" has {} token(s), expected at least 2",
                text.trim(),
                tokens.len()
            ),
        });
    };

    let count = |token: &str| {
        token
            .parse::<u32>()
            .map_err(|_| ScraperError::MalformedDetailPage {
                code: code.to_owned(),
                reason: format!("log totals token \"{token}\" is not a count"),
            })
    };

    Ok((count(found)?, count(did_not_find)?))
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
