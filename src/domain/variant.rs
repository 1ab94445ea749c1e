//! Campaign variants of a quote link.

use std::fmt;
use url::Url;

/// Query key holding the campaign tag.
pub const CAMPAIGN_PARAM: &str = "utm_campaign";

/// Query key of the tracking term, dropped from every variant.
pub const TRACKING_TERM_PARAM: &str = "utm_term";

/// Traffic source a variant link is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Campaign {
    Service,
    Parts,
}

impl Campaign {
    pub const ALL: [Campaign; 2] = [Campaign::Service, Campaign::Parts];

    /// Value written into [`CAMPAIGN_PARAM`].
    pub fn tag(self) -> &'static str {
        match self {
            Campaign::Service => "service_LP",
            Campaign::Parts => "parts_LP",
        }
    }
}

impl fmt::Display for Campaign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Rewrites `quote_link` for a campaign.
///
/// Sets [`CAMPAIGN_PARAM`] to `campaign_tag`, keeping the position of its
/// first occurrence and dropping any duplicates (appended if absent). Every
/// [`TRACKING_TERM_PARAM`] pair is removed. Other pairs keep their order.
///
/// Input that does not parse as an absolute URL is returned unchanged.
///
/// # Examples
///
/// ```
/// use dealer_quote_links::domain::variant::derive_variant;
///
/// let link = "https://insurance.toyota.com.au/quote/quote-new?utm_campaign=x&utm_term=y";
/// assert_eq!(
///     derive_variant(link, "service_LP"),
///     "https://insurance.toyota.com.au/quote/quote-new?utm_campaign=service_LP"
/// );
/// ```
pub fn derive_variant(quote_link: &str, campaign_tag: &str) -> String {
    let Ok(mut url) = Url::parse(quote_link) else {
        return quote_link.to_string();
    };

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut campaign_written = false;

    for (key, value) in url.query_pairs() {
        if key == TRACKING_TERM_PARAM {
            continue;
        }
        if key == CAMPAIGN_PARAM {
            if !campaign_written {
                pairs.push((CAMPAIGN_PARAM.to_string(), campaign_tag.to_string()));
                campaign_written = true;
            }
            continue;
        }
        pairs.push((key.into_owned(), value.into_owned()));
    }

    if !campaign_written {
        pairs.push((CAMPAIGN_PARAM.to_string(), campaign_tag.to_string()));
    }

    url.query_pairs_mut().clear().extend_pairs(&pairs);

    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://insurance.toyota.com.au/quote/quote-new?utm_campaign=x&utm_term=y";

    #[test]
    fn test_campaign_tags() {
        assert_eq!(Campaign::Service.tag(), "service_LP");
        assert_eq!(Campaign::Parts.tag(), "parts_LP");
        assert_eq!(Campaign::Parts.to_string(), "parts_LP");
    }

    #[test]
    fn test_service_and_parts_differ_only_in_tag() {
        let service = derive_variant(LINK, Campaign::Service.tag());
        let parts = derive_variant(LINK, Campaign::Parts.tag());

        assert_eq!(
            service,
            "https://insurance.toyota.com.au/quote/quote-new?utm_campaign=service_LP"
        );
        assert_eq!(
            parts,
            "https://insurance.toyota.com.au/quote/quote-new?utm_campaign=parts_LP"
        );
        assert_eq!(service.replace("service_LP", "parts_LP"), parts);
    }

    #[test]
    fn test_idempotent() {
        let once = derive_variant(LINK, "service_LP");
        let twice = derive_variant(&once, "service_LP");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_removes_every_tracking_term() {
        let link = "https://q.example/start?utm_term=a&dealer=7&utm_term=b";
        let variant = derive_variant(link, "parts_LP");

        assert!(!variant.contains("utm_term"));
        assert_eq!(variant, "https://q.example/start?dealer=7&utm_campaign=parts_LP");
    }

    #[test]
    fn test_never_reintroduces_tracking_term() {
        let variant = derive_variant("https://q.example/start?dealer=7", "service_LP");
        assert!(!variant.contains("utm_term"));
    }

    #[test]
    fn test_appends_campaign_when_absent() {
        assert_eq!(
            derive_variant("https://q.example/start", "service_LP"),
            "https://q.example/start?utm_campaign=service_LP"
        );
    }

    #[test]
    fn test_keeps_first_campaign_position_and_drops_duplicates() {
        let link = "https://q.example/start?a=1&utm_campaign=x&b=2&utm_campaign=z";
        assert_eq!(
            derive_variant(link, "service_LP"),
            "https://q.example/start?a=1&utm_campaign=service_LP&b=2"
        );
    }

    #[test]
    fn test_preserves_fragment_and_path() {
        assert_eq!(
            derive_variant("https://q.example/a/b?utm_campaign=x#step-2", "parts_LP"),
            "https://q.example/a/b?utm_campaign=parts_LP#step-2"
        );
    }

    #[test]
    fn test_unparseable_input_returned_unchanged() {
        assert_eq!(derive_variant("not a url", "service_LP"), "not a url");
        assert_eq!(
            derive_variant("/quote/quote-new?utm_term=y", "service_LP"),
            "/quote/quote-new?utm_term=y"
        );
    }
}
