//! Quote link extraction from a dealer page.
//!
//! The page is searched with an ordered list of [`SelectorRule`]s, most
//! specific first, so a markup change (class renamed, href rewritten) falls back
//! to a looser rule instead of failing outright. For each rule only the first
//! matching element is considered; if it carries no usable `href`, the next rule
//! is tried.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Host and path prefix of the vendor's quote flow.
pub const QUOTE_PATH: &str = "insurance.toyota.com.au/quote/quote-new";

/// Looser prefix used together with the button class.
pub const QUOTE_PREFIX: &str = "insurance.toyota.com.au/quote";

/// CSS class of the call-to-action button around the quote link.
pub const BUTTON_CLASS: &str = "button-solid";

/// Visible text of the quote link.
pub const QUOTE_TEXT: &str = "Get a Quote";

/// One matcher over a parsed document: a CSS selector, optionally narrowed to
/// elements whose visible text equals a given label.
pub struct SelectorRule {
    pub name: &'static str,
    selector: Selector,
    text: Option<&'static str>,
}

impl SelectorRule {
    fn new(name: &'static str, css: &str, text: Option<&'static str>) -> Self {
        Self {
            name,
            selector: Selector::parse(css).expect("quote link selectors are static and valid"),
            text,
        }
    }

    /// Returns the first element in document order that satisfies the rule.
    pub fn first_match<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document
            .select(&self.selector)
            .find(|element| self.text.is_none_or(|text| visible_text_equals(element, text)))
    }
}

/// Rules in decreasing specificity.
pub static QUOTE_LINK_RULES: LazyLock<[SelectorRule; 4]> = LazyLock::new(|| {
    [
        SelectorRule::new("quote_path_href", &format!(r#"a[href*="{QUOTE_PATH}"]"#), None),
        SelectorRule::new(
            "button_quote_href",
            &format!(r#"a.{BUTTON_CLASS}[href*="{QUOTE_PREFIX}"]"#),
            None,
        ),
        SelectorRule::new("quote_text", "a", Some(QUOTE_TEXT)),
        SelectorRule::new("button_quote_text", &format!("a.{BUTTON_CLASS}"), Some(QUOTE_TEXT)),
    ]
});

/// Compares an element's text content to `expected`, collapsing runs of
/// whitespace and ignoring ASCII case.
fn visible_text_equals(element: &ElementRef<'_>, expected: &str) -> bool {
    let text = element.text().collect::<Vec<_>>().join(" ");
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    normalized.eq_ignore_ascii_case(expected)
}

/// Searches `html` for the quote link and returns its href.
///
/// Relative hrefs are resolved against `page_url`. An href that cannot be
/// joined at all is returned verbatim.
///
/// An `href` that is empty or only a fragment (`#`, `#top`) points back at
/// the page itself and does not count as a link.
///
/// Returns `None` if no rule yields an element with a usable `href`.
pub fn extract_quote_link(html: &str, page_url: &Url) -> Option<String> {
    let document = Html::parse_document(html);

    for rule in QUOTE_LINK_RULES.iter() {
        let Some(element) = rule.first_match(&document) else {
            continue;
        };

        let href = element
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|href| is_usable_href(href));

        match href {
            Some(href) => {
                debug!(rule = rule.name, href, "Quote link matched");
                return Some(resolve_href(page_url, href));
            }
            None => debug!(rule = rule.name, "First match has no usable href, trying next rule"),
        }
    }

    None
}

fn is_usable_href(href: &str) -> bool {
    !href.is_empty() && !href.starts_with('#')
}

fn resolve_href(page_url: &Url, href: &str) -> String {
    page_url
        .join(href)
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse(
            "https://acme.dealer.toyota.com.au/finance/car-insurance?src=menunavigation",
        )
        .unwrap()
    }

    #[test]
    fn test_extracts_button_anchor() {
        let html = r#"<html><body>
            <a class="button-solid" href="https://insurance.toyota.com.au/quote/quote-new?utm_campaign=x&utm_term=y">Get a Quote</a>
        </body></html>"#;

        assert_eq!(
            extract_quote_link(html, &page_url()).as_deref(),
            Some("https://insurance.toyota.com.au/quote/quote-new?utm_campaign=x&utm_term=y")
        );
    }

    #[test]
    fn test_href_rule_beats_text_rule_regardless_of_order() {
        let html = r#"
            <a href="https://elsewhere.example/contact">Get a Quote</a>
            <a href="https://insurance.toyota.com.au/quote/quote-new?dealer=1">Start</a>
        "#;

        assert_eq!(
            extract_quote_link(html, &page_url()).as_deref(),
            Some("https://insurance.toyota.com.au/quote/quote-new?dealer=1")
        );
    }

    #[test]
    fn test_button_prefix_rule() {
        let html = r#"
            <a href="https://insurance.toyota.com.au/quote/other">Plain</a>
            <a class="button-solid" href="https://insurance.toyota.com.au/quote/renew">Renew</a>
        "#;

        assert_eq!(
            extract_quote_link(html, &page_url()).as_deref(),
            Some("https://insurance.toyota.com.au/quote/renew")
        );
    }

    #[test]
    fn test_text_fallback_normalizes_whitespace_and_case() {
        let html = r#"<a href="https://quotes.example/start">
            <span>Get   a</span>
            quote
        </a>"#;

        assert_eq!(
            extract_quote_link(html, &page_url()).as_deref(),
            Some("https://quotes.example/start")
        );
    }

    #[test]
    fn test_text_must_equal_label() {
        let html = r#"<a href="https://quotes.example/start">Get a Quote today</a>"#;
        assert_eq!(extract_quote_link(html, &page_url()), None);
    }

    #[test]
    fn test_relative_href_resolved_against_page() {
        let html = r#"<a class="button-solid" href="/quote/quote-new?utm_campaign=x">Get a Quote</a>"#;

        assert_eq!(
            extract_quote_link(html, &page_url()).as_deref(),
            Some("https://acme.dealer.toyota.com.au/quote/quote-new?utm_campaign=x")
        );
    }

    #[test]
    fn test_missing_href_falls_through_to_next_rule() {
        let html = r#"
            <a>Get a Quote</a>
            <a class="button-solid" href="/quote/start">Get a Quote</a>
        "#;

        assert_eq!(
            extract_quote_link(html, &page_url()).as_deref(),
            Some("https://acme.dealer.toyota.com.au/quote/start")
        );
    }

    #[test]
    fn test_empty_href_is_skipped() {
        let html = r#"<a href="  ">Get a Quote</a>"#;
        assert_eq!(extract_quote_link(html, &page_url()), None);
    }

    #[test]
    fn test_fragment_only_href_is_skipped() {
        assert_eq!(extract_quote_link(r##"<a href="#">Get a Quote</a>"##, &page_url()), None);
        assert_eq!(
            extract_quote_link(r##"<a href=" #quote ">Get a Quote</a>"##, &page_url()),
            None
        );
    }

    #[test]
    fn test_fragment_only_href_falls_through_to_next_rule() {
        let html = r##"
            <a href="#">Get a Quote</a>
            <a class="button-solid" href="/quote/start">Get a Quote</a>
        "##;

        assert_eq!(
            extract_quote_link(html, &page_url()).as_deref(),
            Some("https://acme.dealer.toyota.com.au/quote/start")
        );
    }

    #[test]
    fn test_no_anchor_returns_none() {
        let html = r#"<html><body><p>Finance options</p><a href="/contact">Contact</a></body></html>"#;
        assert_eq!(extract_quote_link(html, &page_url()), None);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract_quote_link("", &page_url()), None);
    }

    #[test]
    fn test_rules_are_ordered() {
        let names: Vec<_> = QUOTE_LINK_RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(
            names,
            [
                "quote_path_href",
                "button_quote_href",
                "quote_text",
                "button_quote_text"
            ]
        );
    }
}
