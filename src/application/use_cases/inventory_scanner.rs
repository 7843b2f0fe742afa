use crate::inventory::domain::SoftwareRecord;
use crate::ports::outbound::{RegistryEntry, RegistrySource, UninstallSubtree};

/// InventoryScanner - enumerates software installed on this machine
///
/// Walks both machine-wide uninstall subtrees and turns every entry with a
/// display name into an installed record. The scan is best-effort: a
/// subtree that cannot be opened and an entry that cannot be read are
/// skipped and logged, never reported as an error.
///
/// # Type Parameters
/// * `R` - RegistrySource implementation
pub struct InventoryScanner<R> {
    registry: R,
}

impl<R: RegistrySource> InventoryScanner<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Enumerates installed software. Order is unspecified.
    pub fn scan(&self) -> Vec<SoftwareRecord> {
        let mut records = Vec::new();

        for subtree in UninstallSubtree::ALL {
            let subkeys = match self.registry.subkey_names(subtree) {
                Ok(subkeys) => subkeys,
                Err(e) => {
                    tracing::debug!(subtree = subtree.path(), error = %e, "skipping registry subtree");
                    continue;
                }
            };

            for subkey in subkeys {
                match self.registry.read_entry(subtree, &subkey) {
                    Ok(entry) => records.extend(Self::to_record(entry)),
                    Err(e) => {
                        tracing::debug!(subkey = %subkey, error = %e, "skipping unreadable registry entry");
                    }
                }
            }
        }

        tracing::debug!(count = records.len(), "registry scan finished");
        records
    }

    /// Entries without a display name are not user-visible software
    fn to_record(entry: RegistryEntry) -> Option<SoftwareRecord> {
        let name = non_blank(entry.display_name)?;
        let version = non_blank(entry.display_version);
        let description = non_blank(entry.comments).or_else(|| non_blank(entry.display_desc));

        Some(SoftwareRecord {
            name,
            installed_version: version.clone(),
            version,
            description,
            install_path: non_blank(entry.install_location),
            uninstall_command: non_blank(entry.uninstall_string),
            is_installed: true,
            ..Default::default()
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
