//! Responsive Search Ad table engine. Rotates headline variants across the
//! ads of each ad group and assembles fixed-width export rows for preview and
//! CSV import into Google Ads.

pub mod builder;
pub mod export;
pub mod preview;
pub mod slots;
pub mod store;
pub mod validation;

pub use builder::{build_rsa_table, TableBuilder};
pub use export::CsvExporter;
pub use preview::PreviewTable;
pub use store::{CampaignState, SessionStore, StateAction};
pub use validation::{lint, LintWarning};
