use crate::ports::outbound::{RegistryEntry, RegistrySource, UninstallSubtree};
use crate::shared::Result;

/// SystemRegistry adapter reading `HKEY_LOCAL_MACHINE` uninstall keys
///
/// This adapter implements the RegistrySource port with the Windows
/// registry. On other platforms there is no registry: every subtree
/// fails to open, which the scanner treats as an empty inventory.
pub struct SystemRegistry;

impl SystemRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(windows)]
mod platform {
    use super::*;
    use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ};
    use winreg::RegKey;

    fn open(path: &str) -> Result<RegKey> {
        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let key = hklm
            .open_subkey_with_flags(path, KEY_READ)
            .map_err(|e| anyhow::anyhow!("Failed to open HKLM\\{}: {}", path, e))?;
        Ok(key)
    }

    /// Missing and non-string values both read as `None`
    fn string_value(key: &RegKey, name: &str) -> Option<String> {
        key.get_value::<String, _>(name).ok()
    }

    pub(super) fn subkey_names(subtree: UninstallSubtree) -> Result<Vec<String>> {
        let key = open(subtree.path())?;
        Ok(key.enum_keys().filter_map(|name| name.ok()).collect())
    }

    pub(super) fn read_entry(subtree: UninstallSubtree, subkey: &str) -> Result<RegistryEntry> {
        let key = open(&format!("{}\\{}", subtree.path(), subkey))?;
        Ok(RegistryEntry {
            display_name: string_value(&key, "DisplayName"),
            display_version: string_value(&key, "DisplayVersion"),
            install_location: string_value(&key, "InstallLocation"),
            uninstall_string: string_value(&key, "UninstallString"),
            comments: string_value(&key, "Comments"),
            display_desc: string_value(&key, "DisplayDesc"),
        })
    }
}

#[cfg(not(windows))]
mod platform {
    use super::*;

    pub(super) fn subkey_names(subtree: UninstallSubtree) -> Result<Vec<String>> {
        anyhow::bail!(
            "Registry subtree HKLM\\{} is not available on this platform",
            subtree.path()
        )
    }

    pub(super) fn read_entry(subtree: UninstallSubtree, subkey: &str) -> Result<RegistryEntry> {
        anyhow::bail!(
            "Registry key HKLM\\{}\\{} is not available on this platform",
            subtree.path(),
            subkey
        )
    }
}

impl RegistrySource for SystemRegistry {
    fn subkey_names(&self, subtree: UninstallSubtree) -> Result<Vec<String>> {
        platform::subkey_names(subtree)
    }

    fn read_entry(&self, subtree: UninstallSubtree, subkey: &str) -> Result<RegistryEntry> {
        platform::read_entry(subtree, subkey)
    }
}
