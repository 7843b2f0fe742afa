use super::software_record::{SoftwareRecord, ViewContext};
use super::version::is_outdated;
use serde::Serialize;

/// Installation state of a reconciled record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InventoryState {
    NotInstalled,
    InstalledCurrent,
    InstalledOutdated,
    /// Present on this machine, absent from the catalog
    Orphaned,
}

impl InventoryState {
    pub fn of(record: &SoftwareRecord) -> Self {
        if !record.is_installed {
            return InventoryState::NotInstalled;
        }
        if record.view_context == ViewContext::InstalledView && !record.exists_in_catalog {
            return InventoryState::Orphaned;
        }
        if is_outdated(record.installed_version_str(), record.version_str()) {
            InventoryState::InstalledOutdated
        } else {
            InventoryState::InstalledCurrent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InventoryState::NotInstalled => "not installed",
            InventoryState::InstalledCurrent => "installed",
            InventoryState::InstalledOutdated => "outdated",
            InventoryState::Orphaned => "orphaned",
        }
    }
}

/// Actions a user may trigger for a record in its current view.
///
/// Always recomputed from the record; nothing here is stored on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActionEligibility {
    pub install: bool,
    pub open: bool,
    pub update: bool,
    pub uninstall: bool,
}

impl ActionEligibility {
    pub fn for_record(record: &SoftwareRecord) -> Self {
        Self::in_view(record, record.view_context)
    }

    pub fn in_view(record: &SoftwareRecord, view: ViewContext) -> Self {
        let outdated = is_outdated(record.installed_version_str(), record.version_str());
        match view {
            ViewContext::ListView => Self {
                install: !record.is_installed,
                open: record.is_installed,
                update: record.is_installed && outdated,
                uninstall: false,
            },
            ViewContext::InstalledView => Self {
                install: false,
                open: false,
                update: record.is_installed && record.exists_in_catalog && outdated,
                uninstall: record.is_installed,
            },
        }
    }

    /// Names of the eligible actions, in display order
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.install {
            labels.push("install");
        }
        if self.open {
            labels.push("open");
        }
        if self.update {
            labels.push("update");
        }
        if self.uninstall {
            labels.push("uninstall");
        }
        labels
    }
}
