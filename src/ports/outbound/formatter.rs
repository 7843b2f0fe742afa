use crate::application::read_models::InventoryReadModel;
use crate::shared::Result;

/// RecordFormatter port for rendering inventory listings
///
/// This port abstracts the rendering of a listing (JSON, plain table).
pub trait RecordFormatter {
    /// Formats a listing
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &InventoryReadModel) -> Result<String>;
}
