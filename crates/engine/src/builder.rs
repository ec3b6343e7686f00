use rsa_core::config::UrlJoin;
use rsa_core::types::{AdGroupConfig, CampaignConfig, ExportRow, HeadlineBanks};
use tracing::{debug, info};

use crate::slots::fill_headline_slots;
use crate::store::CampaignState;

/// Expands campaign settings, headline banks, and ad groups into one export
/// row per (ad group, ad) pair.
///
/// Pure and deterministic: identical input always yields identical rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableBuilder {
    url_join: UrlJoin,
}

impl TableBuilder {
    pub fn new(url_join: UrlJoin) -> Self {
        Self { url_join }
    }

    /// Build rows for a whole session state.
    pub fn build(&self, state: &CampaignState) -> Vec<ExportRow> {
        self.build_parts(&state.campaign, &state.ad_groups, &state.banks)
    }

    /// Build rows from the individual parts of a session.
    ///
    /// Rows follow ad-group input order, then ascending ad index. A group
    /// with `ads_count == 0` contributes nothing.
    pub fn build_parts(
        &self,
        campaign: &CampaignConfig,
        ad_groups: &[AdGroupConfig],
        banks: &HeadlineBanks,
    ) -> Vec<ExportRow> {
        let descriptions: Vec<String> = campaign.descriptions().map(str::to_string).collect();
        let total_ads: usize = ad_groups.iter().map(|g| g.ads_count as usize).sum();
        let mut rows = Vec::with_capacity(total_ads);

        for group in ad_groups {
            let final_url = join_url(&campaign.base_domain, &group.final_url, self.url_join);
            debug!(
                group = %group.name,
                ads = group.ads_count,
                custom = group.custom_headlines.len(),
                "assembling ad group"
            );

            for ad_index in 0..group.ads_count as usize {
                let pool: Vec<String> = banks
                    .iter_ordered()
                    .map(|item| item.template.variant_for(ad_index).to_string())
                    .collect();
                let custom: Vec<String> = group
                    .custom_headlines
                    .iter()
                    .map(|template| template.variant_for(ad_index).to_string())
                    .collect();

                rows.push(ExportRow {
                    campaign: campaign.campaign_name.clone(),
                    ad_group: ExportRow::ad_group_label(&group.name, ad_index),
                    ad_index,
                    final_url: final_url.clone(),
                    path1: group.path1.clone(),
                    path2: group.path2.clone(),
                    headlines: fill_headline_slots(&pool, &custom),
                    descriptions: descriptions.clone(),
                });
            }
        }

        info!(
            groups = ad_groups.len(),
            bank_headlines = banks.len(),
            rows = rows.len(),
            "built RSA table"
        );
        rows
    }
}

/// Build rows with the default URL joining rule.
pub fn build_rsa_table(
    campaign: &CampaignConfig,
    ad_groups: &[AdGroupConfig],
    banks: &HeadlineBanks,
) -> Vec<ExportRow> {
    TableBuilder::default().build_parts(campaign, ad_groups, banks)
}

/// Combine the campaign's base domain with an ad group's relative URL.
pub fn join_url(base: &str, path: &str, mode: UrlJoin) -> String {
    match mode {
        UrlJoin::Verbatim => format!("{base}/{path}"),
        UrlJoin::Normalize => {
            let base = base.trim().trim_end_matches('/');
            let path = path.trim().trim_start_matches('/');
            match (base.is_empty(), path.is_empty()) {
                (_, true) => base.to_string(),
                (true, false) => path.to_string(),
                (false, false) => format!("{base}/{path}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa_core::types::{HeadlineCategory, HeadlineItem, MAX_HEADLINES};

    fn campaign() -> CampaignConfig {
        CampaignConfig {
            campaign_name: "Spring Sale".to_string(),
            base_domain: "https://shop.example.com".to_string(),
            tag: String::new(),
            descriptions: ["D1".into(), "D2".into(), "".into(), "".into()],
        }
    }

    fn banks() -> HeadlineBanks {
        let mut banks = HeadlineBanks::default();
        banks.push(HeadlineItem::new(HeadlineCategory::Offer, "20% Off; 30% Off"));
        banks.push(HeadlineItem::new(HeadlineCategory::Benefit, "Save Time"));
        banks.push(HeadlineItem::new(HeadlineCategory::Cta, "Shop Now; Buy Today; Order Now"));
        banks
    }

    #[test]
    fn test_rows_per_group_and_order() {
        let groups = vec![
            AdGroupConfig::new("Shoes", "shoes").with_ads_count(3),
            AdGroupConfig::new("Hats", "hats").with_ads_count(0),
            AdGroupConfig::new("Bags", "bags").with_ads_count(1),
        ];
        let rows = build_rsa_table(&campaign(), &groups, &banks());

        let labels: Vec<&str> = rows.iter().map(|r| r.ad_group.as_str()).collect();
        assert_eq!(labels, ["Shoes - Ad 1", "Shoes - Ad 2", "Shoes - Ad 3", "Bags - Ad 1"]);
        assert!(rows.iter().all(|r| r.headlines.len() == MAX_HEADLINES));
    }

    #[test]
    fn test_pool_follows_category_order_and_rotates() {
        let groups = vec![AdGroupConfig::new("Shoes", "shoes").with_ads_count(2)];
        let rows = build_rsa_table(&campaign(), &groups, &banks());

        // benefit, offer, cta
        assert_eq!(&rows[0].headlines[..3], ["Save Time", "20% Off", "Shop Now"]);
        assert_eq!(&rows[1].headlines[..3], ["Save Time", "30% Off", "Buy Today"]);
    }

    #[test]
    fn test_connected_variants_never_share_an_ad() {
        let groups = vec![AdGroupConfig::new("Shoes", "shoes").with_ads_count(3)];
        let rows = build_rsa_table(&campaign(), &groups, &banks());

        for row in &rows {
            let has_20 = row.headlines.iter().any(|h| h == "20% Off");
            let has_30 = row.headlines.iter().any(|h| h == "30% Off");
            assert!(has_20 != has_30);
        }
    }

    #[test]
    fn test_custom_headlines_rotate_in_trailing_slots() {
        let groups = vec![AdGroupConfig::new("G", "g")
            .with_ads_count(2)
            .with_custom_headline("X;Y")];
        let rows = build_rsa_table(&campaign(), &groups, &banks());

        assert_eq!(rows[0].headlines[14], "X");
        assert_eq!(rows[1].headlines[14], "Y");
    }

    #[test]
    fn test_descriptions_and_url() {
        let groups = vec![AdGroupConfig::new("G", "/g").with_paths("p1", "p2")];
        let rows = build_rsa_table(&campaign(), &groups, &HeadlineBanks::default());

        assert_eq!(rows[0].descriptions, ["D1", "D2"]);
        assert_eq!(rows[0].final_url, "https://shop.example.com/g");
        assert_eq!(rows[0].path1, "p1");
        assert_eq!(rows[0].campaign, "Spring Sale");
    }

    #[test]
    fn test_build_is_idempotent() {
        let groups = vec![AdGroupConfig::new("G", "g").with_custom_headline("A;B;C")];
        let first = build_rsa_table(&campaign(), &groups, &banks());
        let second = build_rsa_table(&campaign(), &groups, &banks());
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_groups_no_rows() {
        assert!(build_rsa_table(&campaign(), &[], &banks()).is_empty());
    }

    #[test]
    fn test_join_url_modes() {
        assert_eq!(join_url("a.com/", "/x", UrlJoin::Normalize), "a.com/x");
        assert_eq!(join_url("a.com", "", UrlJoin::Normalize), "a.com");
        assert_eq!(join_url("", "x", UrlJoin::Normalize), "x");
        assert_eq!(join_url("a.com/", "/x", UrlJoin::Verbatim), "a.com///x");
    }
}
