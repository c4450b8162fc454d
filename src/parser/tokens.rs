use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// The calendar has no id or class; it is the only table on the page with this
// exact attribute combination.
static CALENDAR_TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"table[cellpadding="3"][cellspacing="1"][align="center"][width="100%"]"#)
        .unwrap()
});
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Pull the leaf text of every cell in the calendar table, in document order.
///
/// Each cell contributes its first child: bare text directly, or one level of
/// descent when the value is wrapped in markup (usually an <a>). A wrapper
/// with nothing inside contributes no token at all, so it cannot shift record
/// grouping downstream.
pub fn leaf_tokens(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let Some(table) = doc.select(&CALENDAR_TABLE).next() else {
        bail!("Calendar table not found in page");
    };

    let mut tokens = Vec::new();
    for cell in table.select(&CELL) {
        let Some(first) = cell.children().next() else {
            continue;
        };
        match first.value() {
            Node::Text(text) => tokens.push(clean(text)),
            Node::Element(_) => {
                let Some(wrapper) = ElementRef::wrap(first) else {
                    continue;
                };
                let Some(inner) = wrapper.children().next() else {
                    continue; // empty wrapper: no slot consumed
                };
                match inner.value() {
                    Node::Text(text) => tokens.push(clean(text)),
                    Node::Element(_) => {
                        if let Some(el) = ElementRef::wrap(inner) {
                            tokens.push(clean(&el.text().collect::<String>()));
                        }
                    }
                    _ => {}
                }
            }
            _ => {} // comments and the like
        }
    }

    Ok(tokens)
}

fn clean(raw: &str) -> String {
    WS_RE.replace_all(raw.trim(), " ").to_string()
}

// ── Tests ──
