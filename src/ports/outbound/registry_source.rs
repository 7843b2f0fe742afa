use crate::shared::Result;

/// The two machine-wide uninstall subtrees that are enumerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UninstallSubtree {
    /// `HKLM\SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall`
    Native,
    /// `HKLM\SOFTWARE\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall`
    Wow6432,
}

impl UninstallSubtree {
    pub const ALL: [UninstallSubtree; 2] = [UninstallSubtree::Native, UninstallSubtree::Wow6432];

    /// Key path below `HKEY_LOCAL_MACHINE`
    pub fn path(&self) -> &'static str {
        match self {
            UninstallSubtree::Native => r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall",
            UninstallSubtree::Wow6432 => {
                r"SOFTWARE\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall"
            }
        }
    }
}

/// String values of one uninstall subkey. Absent or non-string values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryEntry {
    pub display_name: Option<String>,
    pub display_version: Option<String>,
    pub install_location: Option<String>,
    pub uninstall_string: Option<String>,
    pub comments: Option<String>,
    pub display_desc: Option<String>,
}

/// RegistrySource port for reading the machine's software registry
///
/// Reads are blocking; callers run them off the async executor.
pub trait RegistrySource: Send + Sync {
    /// Lists the subkey names below `subtree`
    ///
    /// # Errors
    /// Returns an error if the subtree cannot be opened or enumerated
    fn subkey_names(&self, subtree: UninstallSubtree) -> Result<Vec<String>>;

    /// Reads the values of a single subkey
    ///
    /// # Errors
    /// Returns an error if the subkey cannot be opened
    fn read_entry(&self, subtree: UninstallSubtree, subkey: &str) -> Result<RegistryEntry>;
}
