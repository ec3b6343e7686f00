//! CSV export of built rows, in the column layout Google Ads Editor imports.

use std::fs;
use std::path::Path;

use rsa_core::config::{ExportConfig, QuoteStyle};
use rsa_core::error::{RsaError, RsaResult};
use rsa_core::types::{AdGroupConfig, ExportRow, MAX_DESCRIPTIONS, MAX_HEADLINES};
use tracing::info;

const FIXED_COLUMNS: [&str; 5] = ["Campaign", "Ad Group", "Final URL", "Path 1", "Path 2"];
const SUMMARY_COLUMNS: [&str; 5] = ["Group Name", "Final URL", "Path1", "Path2", "Ads Count"];

/// Column names of the RSA export: 5 fixed fields, 15 headlines, 4 descriptions.
pub fn header() -> Vec<String> {
    FIXED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain((1..=MAX_HEADLINES).map(|i| format!("Headline {i}")))
        .chain((1..=MAX_DESCRIPTIONS).map(|i| format!("Description {i}")))
        .collect()
}

/// Serializes export rows to CSV text.
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    quote_style: QuoteStyle,
    pad_descriptions: bool,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self {
            quote_style: QuoteStyle::Necessary,
            pad_descriptions: true,
        }
    }
}

impl CsvExporter {
    pub fn new(quote_style: QuoteStyle, pad_descriptions: bool) -> Self {
        Self {
            quote_style,
            pad_descriptions,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.quote_style, config.pad_descriptions)
    }

    /// Header line plus one line per row, `\n`-terminated.
    ///
    /// With padding off, rows carry only their non-empty descriptions and the
    /// file may be ragged.
    pub fn to_csv_string(&self, rows: &[ExportRow]) -> String {
        let mut csv = self.line(header().iter().map(String::as_str));
        for row in rows {
            let mut fields: Vec<&str> = vec![
                row.campaign.as_str(),
                row.ad_group.as_str(),
                row.final_url.as_str(),
                row.path1.as_str(),
                row.path2.as_str(),
            ];
            fields.extend(row.headlines.iter().map(String::as_str));
            fields.extend(row.descriptions.iter().take(MAX_DESCRIPTIONS).map(String::as_str));
            if self.pad_descriptions {
                let missing = MAX_DESCRIPTIONS.saturating_sub(row.descriptions.len());
                fields.extend(std::iter::repeat("").take(missing));
            }
            csv.push_str(&self.line(fields.into_iter()));
        }
        csv
    }

    /// Write rows to `path`. An empty row set is reported instead of
    /// producing a header-only file.
    pub fn write_csv(&self, rows: &[ExportRow], path: &Path) -> RsaResult<()> {
        if rows.is_empty() {
            return Err(RsaError::NothingToExport);
        }
        fs::write(path, self.to_csv_string(rows))?;
        info!(path = %path.display(), rows = rows.len(), "exported RSA table");
        Ok(())
    }

    /// One line per ad group with its settings, without resolving any ads.
    pub fn ad_group_summary(&self, ad_groups: &[AdGroupConfig]) -> String {
        let mut csv = self.line(SUMMARY_COLUMNS.into_iter());
        for group in ad_groups {
            let ads_count = group.ads_count.to_string();
            csv.push_str(&self.line(
                [
                    group.name.as_str(),
                    group.final_url.as_str(),
                    group.path1.as_str(),
                    group.path2.as_str(),
                    ads_count.as_str(),
                ]
                .into_iter(),
            ));
        }
        csv
    }

    fn line<'a>(&self, fields: impl Iterator<Item = &'a str>) -> String {
        let mut line = fields
            .map(|f| self.quote(f))
            .collect::<Vec<_>>()
            .join(",");
        line.push('\n');
        line
    }

    fn quote(&self, field: &str) -> String {
        let needs_quotes = match self.quote_style {
            QuoteStyle::Never => false,
            QuoteStyle::Always => true,
            QuoteStyle::Necessary => field.contains([',', '"', '\n', '\r']),
        };
        if needs_quotes {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}
