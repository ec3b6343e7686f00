//! Input checks that live at the editing boundary. The table builder never
//! validates; it treats whatever state it is handed as well-formed.

use std::fmt;

use rsa_core::config::LimitsConfig;
use rsa_core::error::{RsaError, RsaResult};
use rsa_core::types::AdGroupConfig;
use serde::Serialize;

use crate::store::CampaignState;

/// Reject an ad group that cannot be added to a session.
pub fn validate_new_ad_group(group: &AdGroupConfig) -> RsaResult<()> {
    if group.name.trim().is_empty() || group.final_url.trim().is_empty() {
        return Err(RsaError::Validation(
            "Group Name and Final URL are required.".to_string(),
        ));
    }
    if group.ads_count == 0 {
        return Err(RsaError::Validation(
            "An ad group needs at least one ad.".to_string(),
        ));
    }
    Ok(())
}

/// A non-blocking problem found in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LintWarning {
    HeadlineTooLong {
        source: String,
        text: String,
        chars: usize,
        limit: usize,
    },
    DescriptionTooLong {
        slot: usize,
        chars: usize,
        limit: usize,
    },
    PathTooLong {
        group: String,
        slot: usize,
        chars: usize,
        limit: usize,
    },
    NoAds {
        group: String,
    },
    NoHeadlines {
        group: String,
    },
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintWarning::HeadlineTooLong { source, text, chars, limit } => write!(
                f,
                "{source}: headline \"{text}\" is {chars} characters (limit {limit})"
            ),
            LintWarning::DescriptionTooLong { slot, chars, limit } => write!(
                f,
                "campaign: description {slot} is {chars} characters (limit {limit})"
            ),
            LintWarning::PathTooLong { group, slot, chars, limit } => write!(
                f,
                "{group}: path {slot} is {chars} characters (limit {limit})"
            ),
            LintWarning::NoAds { group } => write!(f, "{group}: ads count is 0, no rows will be exported"),
            LintWarning::NoHeadlines { group } => {
                write!(f, "{group}: no bank or custom headlines, all 15 slots will be empty")
            }
        }
    }
}

/// Check a session against Google Ads character limits and for groups that
/// would export nothing useful. Limits apply per variant.
pub fn lint(state: &CampaignState, limits: &LimitsConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    for item in state.banks.iter_ordered() {
        check_headlines(
            &mut warnings,
            &format!("{} bank", item.category),
            item.template.variants(),
            limits.headline_max_chars,
        );
    }

    for (i, description) in state.campaign.descriptions.iter().enumerate() {
        let chars = description.chars().count();
        if chars > limits.description_max_chars {
            warnings.push(LintWarning::DescriptionTooLong {
                slot: i + 1,
                chars,
                limit: limits.description_max_chars,
            });
        }
    }

    for group in &state.ad_groups {
        for template in &group.custom_headlines {
            check_headlines(&mut warnings, &group.name, template.variants(), limits.headline_max_chars);
        }

        for (slot, path) in [(1, &group.path1), (2, &group.path2)] {
            let chars = path.chars().count();
            if chars > limits.path_max_chars {
                warnings.push(LintWarning::PathTooLong {
                    group: group.name.clone(),
                    slot,
                    chars,
                    limit: limits.path_max_chars,
                });
            }
        }

        if group.ads_count == 0 {
            warnings.push(LintWarning::NoAds { group: group.name.clone() });
        }
        if group.custom_headlines.is_empty() && state.banks.is_empty() {
            warnings.push(LintWarning::NoHeadlines { group: group.name.clone() });
        }
    }

    warnings
}

fn check_headlines(warnings: &mut Vec<LintWarning>, source: &str, variants: &[String], limit: usize) {
    for text in variants {
        let chars = text.chars().count();
        if chars > limit {
            warnings.push(LintWarning::HeadlineTooLong {
                source: source.to_string(),
                text: text.clone(),
                chars,
                limit,
            });
        }
    }
}
