//! Session state for the builder.
//!
//! The whole editing session is one immutable [`CampaignState`] value. Edits
//! are expressed as [`StateAction`]s; applying one produces a new state that
//! replaces the old one wholesale. [`SessionStore`] owns the single live value
//! and persists it as JSON between runs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rsa_core::error::{RsaError, RsaResult};
use rsa_core::types::{
    AdGroupConfig, AdGroupPatch, CampaignConfig, HeadlineBanks, HeadlineCategory, HeadlineItem,
};
use rsa_core::HeadlineTemplate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::validation::validate_new_ad_group;

/// Version of the persisted envelope.
pub const STATE_VERSION: u32 = 1;

/// Everything the table builder needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignState {
    #[serde(default)]
    pub campaign: CampaignConfig,
    #[serde(default)]
    pub banks: HeadlineBanks,
    #[serde(default)]
    pub ad_groups: Vec<AdGroupConfig>,
}

/// An edit to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StateAction {
    SetCampaign(CampaignConfig),
    SetBank {
        category: HeadlineCategory,
        items: Vec<HeadlineItem>,
    },
    /// Add bank headlines from free text. Every `;`-separated entry becomes
    /// its own item.
    AddHeadlines {
        category: HeadlineCategory,
        input: String,
    },
    /// Drop bank items whose template has no variants left.
    PruneEmptyHeadlines { category: HeadlineCategory },
    AddAdGroup(AdGroupConfig),
    UpdateAdGroup { id: Uuid, patch: AdGroupPatch },
    RemoveAdGroup { id: Uuid },
}

impl CampaignState {
    /// Apply `action`, returning the next state.
    pub fn apply(self, action: StateAction) -> RsaResult<CampaignState> {
        let mut next = self;
        match action {
            StateAction::SetCampaign(campaign) => {
                next.campaign = campaign;
            }
            StateAction::SetBank { category, items } => {
                next.banks.set(category, items);
            }
            StateAction::AddHeadlines { category, input } => {
                let items: Vec<HeadlineItem> = HeadlineTemplate::parse(&input)
                    .variants()
                    .iter()
                    .map(|text| HeadlineItem::new(category, text.as_str()))
                    .collect();
                debug!(%category, added = items.len(), "adding bank headlines");
                for item in items {
                    next.banks.push(item);
                }
            }
            StateAction::PruneEmptyHeadlines { category } => {
                let kept: Vec<HeadlineItem> = next
                    .banks
                    .get(category)
                    .iter()
                    .filter(|item| !item.template.is_empty())
                    .cloned()
                    .collect();
                next.banks.set(category, kept);
            }
            StateAction::AddAdGroup(group) => {
                validate_new_ad_group(&group)?;
                if next.ad_groups.iter().any(|g| g.id == group.id) {
                    return Err(RsaError::Validation(format!(
                        "ad group {} already exists",
                        group.id
                    )));
                }
                next.ad_groups.push(group);
            }
            StateAction::UpdateAdGroup { id, patch } => {
                let group = next
                    .ad_groups
                    .iter_mut()
                    .find(|g| g.id == id)
                    .ok_or(RsaError::AdGroupNotFound(id))?;
                group.apply_patch(patch);
            }
            StateAction::RemoveAdGroup { id } => {
                let before = next.ad_groups.len();
                next.ad_groups.retain(|g| g.id != id);
                if next.ad_groups.len() == before {
                    return Err(RsaError::AdGroupNotFound(id));
                }
            }
        }
        Ok(next)
    }

    /// Look up an ad group by id, or by case-insensitive name.
    pub fn find_ad_group(&self, key: &str) -> Option<&AdGroupConfig> {
        match Uuid::parse_str(key) {
            Ok(id) => self.ad_groups.iter().find(|g| g.id == id),
            Err(_) => self
                .ad_groups
                .iter()
                .find(|g| g.name.eq_ignore_ascii_case(key)),
        }
    }
}

/// On-disk form of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedState {
    version: u32,
    saved_at: DateTime<Utc>,
    state: CampaignState,
}

/// Owns the live session state and its backing file.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: CampaignState,
}

impl SessionStore {
    /// A store with an empty state that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: CampaignState::default(),
        }
    }

    /// Load the session at `path`. A missing file yields an empty session.
    pub fn load(path: impl Into<PathBuf>) -> RsaResult<Self> {
        let path = path.into();
        if !path.exists() {
            info!(path = %path.display(), "no saved session, starting empty");
            return Ok(Self::new(path));
        }

        let raw = fs::read_to_string(&path)?;
        let persisted: PersistedState = serde_json::from_str(&raw)?;
        if persisted.version != STATE_VERSION {
            return Err(RsaError::State(format!(
                "unsupported state version {} in {}",
                persisted.version,
                path.display()
            )));
        }

        info!(
            path = %path.display(),
            ad_groups = persisted.state.ad_groups.len(),
            bank_headlines = persisted.state.banks.len(),
            saved_at = %persisted.saved_at,
            "session loaded"
        );
        Ok(Self {
            path,
            state: persisted.state,
        })
    }

    /// Write the session to disk. The file is replaced atomically.
    pub fn save(&self) -> RsaResult<()> {
        let persisted = PersistedState {
            version: STATE_VERSION,
            saved_at: Utc::now(),
            state: self.state.clone(),
        };
        let json = serde_json::to_string_pretty(&persisted)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Apply an edit and swap in the resulting state. On error the current
    /// state is left untouched.
    pub fn dispatch(&mut self, action: StateAction) -> RsaResult<&CampaignState> {
        let next = self.state.clone().apply(action)?;
        self.state = next;
        Ok(&self.state)
    }

    pub fn state(&self) -> &CampaignState {
        &self.state
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
