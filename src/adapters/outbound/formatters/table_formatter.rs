use crate::application::read_models::{InventoryReadModel, SoftwareView};
use crate::ports::outbound::RecordFormatter;
use crate::shared::Result;

const HEADERS: [&str; 5] = ["Name", "Version", "Installed", "State", "Actions"];

/// Cells wider than this are truncated with an ellipsis
const MAX_CELL_WIDTH: usize = 40;

/// TableFormatter adapter for human-readable listings
///
/// This adapter implements the RecordFormatter port as an aligned plain-text
/// table with one row per record.
pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }

    fn row(view: &SoftwareView) -> [String; 5] {
        [
            Self::cell(&view.name),
            Self::cell(view.version.as_deref().unwrap_or("-")),
            Self::cell(view.installed_version.as_deref().unwrap_or("-")),
            view.state.label().to_string(),
            if view.actions.is_empty() {
                "-".to_string()
            } else {
                view.actions.join(", ")
            },
        ]
    }

    /// Flattens newlines and truncates overlong values
    fn cell(text: &str) -> String {
        let flat = text.replace(['\n', '\r'], " ");
        if flat.chars().count() <= MAX_CELL_WIDTH {
            return flat;
        }
        let mut truncated: String = flat.chars().take(MAX_CELL_WIDTH - 1).collect();
        truncated.push('…');
        truncated
    }

    fn render_line(output: &mut String, cells: &[String], widths: &[usize]) {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        output.push_str(padded.join("  ").trim_end());
        output.push('\n');
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFormatter for TableFormatter {
    fn format(&self, model: &InventoryReadModel) -> Result<String> {
        let mut output = String::new();
        output.push_str(&model.title);
        output.push('\n');

        if model.is_empty() {
            output.push_str("No software found.\n");
            return Ok(output);
        }

        let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        let rows: Vec<[String; 5]> = model.items.iter().map(Self::row).collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        Self::render_line(&mut output, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        Self::render_line(&mut output, &rule, &widths);
        for row in &rows {
            Self::render_line(&mut output, row, &widths);
        }

        if let Some(page) = model.page {
            output.push_str(&format!(
                "\nPage {}/{} ({} entries)\n",
                page.page_index,
                page.total_pages.max(1),
                page.total_count
            ));
        } else {
            output.push_str(&format!("\n{} entries\n", model.items.len()));
        }

        Ok(output)
    }
}
