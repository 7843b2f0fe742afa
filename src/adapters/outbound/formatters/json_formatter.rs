use crate::application::read_models::InventoryReadModel;
use crate::ports::outbound::RecordFormatter;
use crate::shared::Result;

/// JsonFormatter adapter for machine-readable listings
///
/// This adapter implements the RecordFormatter port by pretty-printing the
/// read model as JSON.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFormatter for JsonFormatter {
    fn format(&self, model: &InventoryReadModel) -> Result<String> {
        let json = serde_json::to_string_pretty(model)?;
        Ok(json)
    }
}
