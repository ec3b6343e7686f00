//! Headline variant resolution.
//!
//! A headline template may carry several interchangeable phrasings separated
//! by `;` ("Low Prices; Best Prices"). Each ad of an ad group picks exactly one
//! of them by rotating on its ad index, so connected variants never land on the
//! same ad but still spread across the group's ads.

use std::fmt;

use serde::{Deserialize, Serialize};

const DELIMITER: char = ';';

/// An ordered list of trimmed, non-empty phrasings for one headline.
///
/// The `;` syntax is only interpreted by [`HeadlineTemplate::parse`]; the rest
/// of the engine works on the parsed list. On the wire (the persisted session
/// file) the template round-trips as its raw delimited string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct HeadlineTemplate {
    variants: Vec<String>,
}

impl HeadlineTemplate {
    /// Split `raw` on `;`, trim every segment and drop the empty ones.
    pub fn parse(raw: &str) -> Self {
        let variants = raw
            .split(DELIMITER)
            .map(str::trim)
            .filter(|variant| !variant.is_empty())
            .map(str::to_string)
            .collect();
        Self { variants }
    }

    /// Build a template from already separated phrasings. Entries are trimmed
    /// and empty ones dropped, same as [`HeadlineTemplate::parse`].
    pub fn from_variants<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let variants = variants
            .into_iter()
            .map(|v| v.as_ref().trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        Self { variants }
    }

    /// The phrasing used by the ad at `ad_index` (0-based): variant
    /// `ad_index mod k`, or `""` when the template has no variants.
    pub fn variant_for(&self, ad_index: usize) -> &str {
        if self.variants.is_empty() {
            return "";
        }
        &self.variants[ad_index % self.variants.len()]
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// True when different ads of a group will see different phrasings.
    pub fn is_rotating(&self) -> bool {
        self.variants.len() > 1
    }
}

impl fmt::Display for HeadlineTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.variants.join("; "))
    }
}

impl From<String> for HeadlineTemplate {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for HeadlineTemplate {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<HeadlineTemplate> for String {
    fn from(template: HeadlineTemplate) -> Self {
        template.to_string()
    }
}

/// Resolve the phrasing of a raw `;`-delimited template for one ad.
///
/// Total over every input: templates with no non-empty segment resolve to `""`.
pub fn resolve(template: &str, ad_index: usize) -> String {
    HeadlineTemplate::parse(template)
        .variant_for(ad_index)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_variants_alternate() {
        assert_eq!(resolve("A;B", 0), "A");
        assert_eq!(resolve("A;B", 1), "B");
        assert_eq!(resolve("A;B", 2), "A");
    }

    #[test]
    fn test_single_variant_never_rotates() {
        for i in 0..10 {
            assert_eq!(resolve("A", i), "A");
        }
    }

    #[test]
    fn test_empty_templates_resolve_to_empty() {
        for i in 0..5 {
            assert_eq!(resolve("", i), "");
            assert_eq!(resolve("  ;  ", i), "");
            assert_eq!(resolve(";;;", i), "");
        }
    }

    #[test]
    fn test_segments_are_trimmed_and_blank_ones_dropped() {
        let template = HeadlineTemplate::parse("  Low Price ; ; Best Price  ;");
        assert_eq!(template.variants(), ["Low Price", "Best Price"]);
        assert!(template.is_rotating());
        assert_eq!(template.variant_for(3), "Best Price");
    }

    #[test]
    fn test_display_and_serde_use_delimited_form() {
        let template = HeadlineTemplate::parse("Fast;Free Shipping");
        assert_eq!(template.to_string(), "Fast; Free Shipping");

        let json = serde_json::to_string(&template).unwrap();
        assert_eq!(json, "\"Fast; Free Shipping\"");
        let back: HeadlineTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, template);
    }

    #[test]
    fn test_from_variants_matches_parse() {
        let a = HeadlineTemplate::from_variants(["Save 20% ", "", "Save Big"]);
        let b = HeadlineTemplate::parse("Save 20%;;Save Big");
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn rotation_is_periodic(
            variants in proptest::collection::vec("[A-Za-z0-9 ]{1,12}", 1..6),
            ad_index in 0usize..1000,
        ) {
            let raw = variants.join(";");
            let template = HeadlineTemplate::parse(&raw);
            prop_assume!(!template.is_empty());
            let k = template.len();
            prop_assert_eq!(resolve(&raw, ad_index), resolve(&raw, ad_index + k));
        }

        #[test]
        fn resolved_phrasing_is_one_of_the_variants(
            raw in "[A-Za-z ;]{0,40}",
            ad_index in 0usize..100,
        ) {
            let template = HeadlineTemplate::parse(&raw);
            let picked = resolve(&raw, ad_index);
            if template.is_empty() {
                prop_assert_eq!(picked, "");
            } else {
                prop_assert!(template.variants().contains(&picked));
            }
        }
    }
}
