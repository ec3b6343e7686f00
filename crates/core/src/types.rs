use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::variant::HeadlineTemplate;

/// Headline slots in one Responsive Search Ad.
pub const MAX_HEADLINES: usize = 15;
/// Description slots in one Responsive Search Ad.
pub const MAX_DESCRIPTIONS: usize = 4;
pub const HEADLINE_MAX_CHARS: usize = 30;
pub const DESCRIPTION_MAX_CHARS: usize = 90;
pub const PATH_MAX_CHARS: usize = 15;
/// Ads generated for a new ad group unless told otherwise.
pub const DEFAULT_ADS_COUNT: u32 = 2;

// ─── Campaign ───────────────────────────────────────────────────────────────

/// Campaign-wide settings shared by every ad.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignConfig {
    pub campaign_name: String,
    pub base_domain: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub descriptions: [String; MAX_DESCRIPTIONS],
}

impl CampaignConfig {
    /// Non-empty descriptions in slot order.
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.descriptions
            .iter()
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }
}

// ─── Headline Banks ─────────────────────────────────────────────────────────

/// Persuasive category of a bank headline. Purely classificatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadlineCategory {
    Benefit,
    Offer,
    Feature,
    Trust,
    Cta,
    Utility,
}

impl HeadlineCategory {
    /// Order in which bank pools are flattened into an ad's headline list.
    pub const ALL: [HeadlineCategory; 6] = [
        HeadlineCategory::Benefit,
        HeadlineCategory::Offer,
        HeadlineCategory::Feature,
        HeadlineCategory::Trust,
        HeadlineCategory::Cta,
        HeadlineCategory::Utility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadlineCategory::Benefit => "benefit",
            HeadlineCategory::Offer => "offer",
            HeadlineCategory::Feature => "feature",
            HeadlineCategory::Trust => "trust",
            HeadlineCategory::Cta => "cta",
            HeadlineCategory::Utility => "utility",
        }
    }

    /// One-line hint on what belongs in the category.
    pub fn guidance(&self) -> &'static str {
        match self {
            HeadlineCategory::Benefit => "What the customer gains from choosing you.",
            HeadlineCategory::Offer => "Prices, discounts, and time-limited deals.",
            HeadlineCategory::Feature => "Concrete product or service characteristics.",
            HeadlineCategory::Trust => "Reviews, guarantees, and credentials.",
            HeadlineCategory::Cta => "Direct calls to action.",
            HeadlineCategory::Utility => "Practical details such as location or delivery.",
        }
    }
}

impl fmt::Display for HeadlineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeadlineCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeadlineCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown headline category '{s}'"))
    }
}

/// A reusable bank headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineItem {
    pub id: Uuid,
    pub category: HeadlineCategory,
    pub template: HeadlineTemplate,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HeadlineItem {
    pub fn new(category: HeadlineCategory, template: impl Into<HeadlineTemplate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            template: template.into(),
            pinned: false,
            notes: None,
        }
    }
}

/// Campaign-wide headline pools, one ordered list per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineBanks {
    #[serde(default)]
    pub benefit: Vec<HeadlineItem>,
    #[serde(default)]
    pub offer: Vec<HeadlineItem>,
    #[serde(default)]
    pub feature: Vec<HeadlineItem>,
    #[serde(default)]
    pub trust: Vec<HeadlineItem>,
    #[serde(default)]
    pub cta: Vec<HeadlineItem>,
    #[serde(default)]
    pub utility: Vec<HeadlineItem>,
}

impl HeadlineBanks {
    pub fn get(&self, category: HeadlineCategory) -> &[HeadlineItem] {
        match category {
            HeadlineCategory::Benefit => &self.benefit,
            HeadlineCategory::Offer => &self.offer,
            HeadlineCategory::Feature => &self.feature,
            HeadlineCategory::Trust => &self.trust,
            HeadlineCategory::Cta => &self.cta,
            HeadlineCategory::Utility => &self.utility,
        }
    }

    fn get_mut(&mut self, category: HeadlineCategory) -> &mut Vec<HeadlineItem> {
        match category {
            HeadlineCategory::Benefit => &mut self.benefit,
            HeadlineCategory::Offer => &mut self.offer,
            HeadlineCategory::Feature => &mut self.feature,
            HeadlineCategory::Trust => &mut self.trust,
            HeadlineCategory::Cta => &mut self.cta,
            HeadlineCategory::Utility => &mut self.utility,
        }
    }

    /// Replace a category's pool wholesale.
    pub fn set(&mut self, category: HeadlineCategory, items: Vec<HeadlineItem>) {
        *self.get_mut(category) = items;
    }

    /// Append an item to its category's pool.
    pub fn push(&mut self, item: HeadlineItem) {
        self.get_mut(item.category).push(item);
    }

    /// Every item flattened in [`HeadlineCategory::ALL`] order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &HeadlineItem> {
        HeadlineCategory::ALL
            .into_iter()
            .flat_map(move |category| self.get(category).iter())
    }

    pub fn len(&self) -> usize {
        HeadlineCategory::ALL
            .iter()
            .map(|c| self.get(*c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── Ad Groups ──────────────────────────────────────────────────────────────

/// An ad group producing `ads_count` ad variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdGroupConfig {
    pub id: Uuid,
    pub name: String,
    /// Path relative to the campaign's base domain.
    pub final_url: String,
    #[serde(default)]
    pub path1: String,
    #[serde(default)]
    pub path2: String,
    #[serde(default = "default_ads_count")]
    pub ads_count: u32,
    /// Group-specific headlines; placed after bank headlines and never dropped.
    #[serde(default)]
    pub custom_headlines: Vec<HeadlineTemplate>,
}

fn default_ads_count() -> u32 {
    DEFAULT_ADS_COUNT
}

impl AdGroupConfig {
    pub fn new(name: impl Into<String>, final_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            final_url: final_url.into(),
            path1: String::new(),
            path2: String::new(),
            ads_count: DEFAULT_ADS_COUNT,
            custom_headlines: Vec::new(),
        }
    }

    pub fn with_paths(mut self, path1: impl Into<String>, path2: impl Into<String>) -> Self {
        self.path1 = path1.into();
        self.path2 = path2.into();
        self
    }

    pub fn with_ads_count(mut self, ads_count: u32) -> Self {
        self.ads_count = ads_count;
        self
    }

    pub fn with_custom_headline(mut self, template: impl Into<HeadlineTemplate>) -> Self {
        self.custom_headlines.push(template.into());
        self
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply_patch(&mut self, patch: AdGroupPatch) {
        if let Some(name) = patch.name { self.name = name; }
        if let Some(final_url) = patch.final_url { self.final_url = final_url; }
        if let Some(path1) = patch.path1 { self.path1 = path1; }
        if let Some(path2) = patch.path2 { self.path2 = path2; }
        if let Some(ads_count) = patch.ads_count { self.ads_count = ads_count; }
        if let Some(headlines) = patch.custom_headlines {
            // Blank entries are discarded on save.
            self.custom_headlines = headlines.into_iter().filter(|h| !h.is_empty()).collect();
        }
    }
}

/// Partial update for an [`AdGroupConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdGroupPatch {
    pub name: Option<String>,
    pub final_url: Option<String>,
    pub path1: Option<String>,
    pub path2: Option<String>,
    pub ads_count: Option<u32>,
    pub custom_headlines: Option<Vec<HeadlineTemplate>>,
}

// ─── Export ─────────────────────────────────────────────────────────────────

/// One fully resolved ad, ready for preview or CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub campaign: String,
    /// `"<group name> - Ad <n>"`, `n` starting at 1.
    pub ad_group: String,
    pub ad_index: usize,
    pub final_url: String,
    pub path1: String,
    pub path2: String,
    /// Always [`MAX_HEADLINES`] entries; some may be empty.
    pub headlines: Vec<String>,
    /// Non-empty campaign descriptions, at most [`MAX_DESCRIPTIONS`].
    pub descriptions: Vec<String>,
}

impl ExportRow {
    pub fn ad_group_label(group_name: &str, ad_index: usize) -> String {
        format!("{} - Ad {}", group_name, ad_index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_and_parsing() {
        let names: Vec<&str> = HeadlineCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["benefit", "offer", "feature", "trust", "cta", "utility"]);
        assert_eq!("CTA".parse::<HeadlineCategory>(), Ok(HeadlineCategory::Cta));
        assert!("pricing".parse::<HeadlineCategory>().is_err());
    }

    #[test]
    fn test_banks_flatten_in_category_order() {
        let mut banks = HeadlineBanks::default();
        banks.push(HeadlineItem::new(HeadlineCategory::Utility, "Open 24/7"));
        banks.push(HeadlineItem::new(HeadlineCategory::Benefit, "Save Time"));
        banks.push(HeadlineItem::new(HeadlineCategory::Trust, "5-Star Rated"));

        let order: Vec<String> = banks.iter_ordered().map(|i| i.template.to_string()).collect();
        assert_eq!(order, ["Save Time", "5-Star Rated", "Open 24/7"]);
        assert_eq!(banks.len(), 3);
        assert_eq!(banks.get(HeadlineCategory::Offer).len(), 0);
    }

    #[test]
    fn test_campaign_descriptions_skip_empty() {
        let campaign = CampaignConfig {
            descriptions: ["D1".into(), "".into(), "D3".into(), "".into()],
            ..Default::default()
        };
        let got: Vec<&str> = campaign.descriptions().collect();
        assert_eq!(got, ["D1", "D3"]);
    }

    #[test]
    fn test_ad_group_patch_only_touches_given_fields() {
        let mut group = AdGroupConfig::new("Shoes", "shoes").with_paths("men", "sale");
        group.apply_patch(AdGroupPatch {
            ads_count: Some(3),
            custom_headlines: Some(vec!["A;B".into(), "  ".into()]),
            ..Default::default()
        });
        assert_eq!(group.name, "Shoes");
        assert_eq!(group.path1, "men");
        assert_eq!(group.ads_count, 3);
        assert_eq!(group.custom_headlines.len(), 1);
    }

    #[test]
    fn test_ad_group_deserializes_with_defaults() {
        let json = r#"{"id":"7b1f6c1e-2a4e-4a55-9d2e-0b3c9f1c2d10","name":"G","final_url":"g"}"#;
        let group: AdGroupConfig = serde_json::from_str(json).unwrap();
        assert_eq!(group.ads_count, DEFAULT_ADS_COUNT);
        assert!(group.custom_headlines.is_empty());
        assert_eq!(group.path1, "");
    }

    #[test]
    fn test_ad_group_label() {
        assert_eq!(ExportRow::ad_group_label("Shoes", 0), "Shoes - Ad 1");
    }
}
