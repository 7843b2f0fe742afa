use serde::{Deserialize, Deserializer, Serialize};

/// Which screen a record is being shown on.
///
/// Decides which actions are offered for the record; never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewContext {
    /// Paged catalog listing
    #[default]
    ListView,
    /// Software discovered on this machine
    InstalledView,
}

/// One piece of software, either discovered locally or listed in the catalog.
///
/// `name` is the identity key and is compared case-insensitively. The JSON
/// form matches the catalog service (camelCase, every field optional, nulls
/// read as absent, unknown fields ignored). PascalCase keys from saved client
/// data files are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoftwareRecord {
    #[serde(alias = "Name", deserialize_with = "null_as_default")]
    pub name: String,
    /// Catalog version, or the on-disk version for an unreconciled scan result
    #[serde(alias = "Version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(alias = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(alias = "InstallPath", skip_serializing_if = "Option::is_none")]
    pub install_path: Option<String>,
    /// Raw uninstall command line as stored in the registry
    #[serde(
        alias = "uninstallString",
        alias = "UninstallString",
        skip_serializing_if = "Option::is_none"
    )]
    pub uninstall_command: Option<String>,
    /// File name of a local installer inside the setup directory
    #[serde(
        rename = "setupFileName",
        alias = "SetupFileName",
        skip_serializing_if = "Option::is_none"
    )]
    pub setup_artifact_name: Option<String>,
    #[serde(alias = "OfficialUrl", skip_serializing_if = "Option::is_none")]
    pub official_url: Option<String>,
    #[serde(alias = "IsInstalled", deserialize_with = "null_as_default")]
    pub is_installed: bool,
    /// Version actually present on disk
    #[serde(alias = "InstalledVersion", skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<String>,
    #[serde(alias = "ExistsInCatalog", deserialize_with = "null_as_default")]
    pub exists_in_catalog: bool,
    #[serde(skip)]
    pub view_context: ViewContext,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SoftwareRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_install_path(mut self, path: impl Into<String>) -> Self {
        self.install_path = Some(path.into());
        self
    }

    pub fn with_uninstall_command(mut self, command: impl Into<String>) -> Self {
        self.uninstall_command = Some(command.into());
        self
    }

    pub fn with_setup_file(mut self, file_name: impl Into<String>) -> Self {
        self.setup_artifact_name = Some(file_name.into());
        self
    }

    pub fn with_official_url(mut self, url: impl Into<String>) -> Self {
        self.official_url = Some(url.into());
        self
    }

    /// Lower-cased name used for joins and de-duplication
    pub fn identity_key(&self) -> String {
        identity_key(&self.name)
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        identity_key(&self.name) == identity_key(name)
    }

    pub fn version_str(&self) -> &str {
        self.version.as_deref().unwrap_or("")
    }

    pub fn installed_version_str(&self) -> &str {
        self.installed_version.as_deref().unwrap_or("")
    }

    pub fn description_str(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// The uninstall command, if it holds anything other than whitespace
    pub fn uninstall_command_str(&self) -> Option<&str> {
        non_blank(self.uninstall_command.as_deref())
    }

    pub fn setup_file_str(&self) -> Option<&str> {
        non_blank(self.setup_artifact_name.as_deref())
    }

    pub fn official_url_str(&self) -> Option<&str> {
        non_blank(self.official_url.as_deref())
    }
}

/// Normalizes a name into its join key
pub fn identity_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
