//! Shared model for the Responsive Search Ad builder: campaign settings,
//! headline banks, ad groups, export rows, and the headline variant resolver.

pub mod config;
pub mod error;
pub mod types;
pub mod variant;

pub use config::AppConfig;
pub use error::{RsaError, RsaResult};
pub use types::{
    AdGroupConfig, AdGroupPatch, CampaignConfig, ExportRow, HeadlineBanks, HeadlineCategory,
    HeadlineItem,
};
pub use variant::{resolve, HeadlineTemplate};
