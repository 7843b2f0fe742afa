use softkeeper::prelude::*;

/// Mock RegistrySource holding entries for the native subtree only
#[derive(Default)]
pub struct MockRegistrySource {
    entries: Vec<RegistryEntry>,
}

impl MockRegistrySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an installed program with an uninstaller under Program Files
    pub fn with_program(self, name: &str, version: Option<&str>) -> Self {
        self.with_entry(RegistryEntry {
            display_name: Some(name.to_string()),
            display_version: version.map(String::from),
            install_location: Some(format!("C:\\Program Files\\{}", name)),
            uninstall_string: Some(format!("\"C:\\Program Files\\{}\\uninstall.exe\"", name)),
            ..Default::default()
        })
    }

    pub fn with_entry(mut self, entry: RegistryEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

impl RegistrySource for MockRegistrySource {
    fn subkey_names(&self, subtree: UninstallSubtree) -> Result<Vec<String>> {
        match subtree {
            UninstallSubtree::Native => Ok((0..self.entries.len()).map(|i| i.to_string()).collect()),
            UninstallSubtree::Wow6432 => anyhow::bail!("subtree not present"),
        }
    }

    fn read_entry(&self, _subtree: UninstallSubtree, subkey: &str) -> Result<RegistryEntry> {
        let index: usize = subkey.parse()?;
        self.entries
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no entry {}", subkey))
    }
}
