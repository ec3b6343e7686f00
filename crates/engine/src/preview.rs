//! Plain-text preview of the export table.

use rsa_core::types::{ExportRow, MAX_DESCRIPTIONS};

use crate::export::header;

pub const EMPTY_PREVIEW: &str =
    "No preview available. Add ad groups and headlines to see the preview.";

/// Read-only grid view of built rows: one column per header slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PreviewTable {
    pub fn from_rows(rows: &[ExportRow]) -> Self {
        let headers = header();
        let rows = rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.campaign.clone(),
                    row.ad_group.clone(),
                    row.final_url.clone(),
                    row.path1.clone(),
                    row.path2.clone(),
                ];
                cells.extend(row.headlines.iter().cloned());
                cells.extend(row.descriptions.iter().take(MAX_DESCRIPTIONS).cloned());
                cells.resize(headers.len(), String::new());
                cells
            })
            .collect();
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as an aligned, pipe-separated table, or the "no data" notice
    /// when there is nothing to show.
    pub fn render_text(&self) -> String {
        if self.is_empty() {
            return format!("{EMPTY_PREVIEW}\n");
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&render_line(&self.headers, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&render_line(&rule, &widths));
        for row in &self.rows {
            out.push_str(&render_line(row, &widths));
        }
        out
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa_core::types::MAX_HEADLINES;

    fn row() -> ExportRow {
        ExportRow {
            campaign: "Spring".into(),
            ad_group: "Shoes - Ad 1".into(),
            ad_index: 0,
            final_url: "shop.example.com/shoes".into(),
            path1: "men".into(),
            path2: "".into(),
            headlines: vec!["Save Today".into(); MAX_HEADLINES],
            descriptions: vec!["D1".into()],
        }
    }

    #[test]
    fn test_empty_preview_message() {
        let table = PreviewTable::from_rows(&[]);
        assert!(table.is_empty());
        assert_eq!(table.render_text().trim_end(), EMPTY_PREVIEW);
    }

    #[test]
    fn test_rows_fill_every_column() {
        let table = PreviewTable::from_rows(&[row(), row()]);
        assert_eq!(table.headers.len(), 24);
        assert!(table.rows.iter().all(|r| r.len() == 24));
        assert_eq!(table.rows[0][20], "D1");
        assert_eq!(table.rows[0][21], "");
    }

    #[test]
    fn test_render_aligns_columns() {
        let text = PreviewTable::from_rows(&[row()]).render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("| Campaign | Ad Group     |"));
        assert!(lines[2].starts_with("| Spring   | Shoes - Ad 1 |"));
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
