use crate::inventory::domain::{identity_key, SoftwareRecord, ViewContext};
use std::collections::HashMap;

/// Joins machine inventory with catalog entries by case-insensitive name.
///
/// Both operations are pure: they take their inputs by value or reference
/// and return fresh records. When a side holds duplicate names, the first
/// occurrence is the one joined against.
pub struct Reconciler;

impl Reconciler {
    /// Installed records annotated with catalog data.
    ///
    /// A match marks the record as catalogued and takes the catalog's
    /// version, setup file and official URL (plus its description when the
    /// local one is empty) so that an update targets the catalog release.
    /// `installed_version` and `install_path` keep their on-disk values.
    pub fn installed_view(
        installed: Vec<SoftwareRecord>,
        catalog: &[SoftwareRecord],
    ) -> Vec<SoftwareRecord> {
        let lookup = first_by_name(catalog);

        installed
            .into_iter()
            .map(|mut record| {
                record.view_context = ViewContext::InstalledView;
                if record.installed_version.is_none() {
                    record.installed_version = record.version.clone();
                }

                match lookup.get(&record.identity_key()) {
                    Some(entry) => {
                        record.exists_in_catalog = true;
                        record.version = entry.version.clone();
                        record.setup_artifact_name = entry.setup_artifact_name.clone();
                        record.official_url = entry.official_url.clone();
                        if record.description_str().trim().is_empty() {
                            record.description = entry.description.clone();
                        }
                    }
                    None => record.exists_in_catalog = false,
                }
                record
            })
            .collect()
    }

    /// Catalog records annotated with local installation state, in input order.
    ///
    /// Installation fields come only from the local side. `installed` may be
    /// raw scan results or an installed view; in the latter `version` already
    /// holds the catalog release, so only `installed_version` is read.
    pub fn catalog_view(
        catalog: Vec<SoftwareRecord>,
        installed: &[SoftwareRecord],
    ) -> Vec<SoftwareRecord> {
        let lookup = first_by_name(installed);

        catalog
            .into_iter()
            .map(|mut record| {
                record.view_context = ViewContext::ListView;
                record.exists_in_catalog = true;

                match lookup.get(&record.identity_key()) {
                    Some(local) => {
                        record.is_installed = true;
                        record.installed_version = local.installed_version.clone();
                        record.install_path = local.install_path.clone();
                        record.uninstall_command = local.uninstall_command.clone();
                    }
                    None => {
                        record.is_installed = false;
                        record.installed_version = None;
                        record.install_path = None;
                        record.uninstall_command = None;
                    }
                }
                record
            })
            .collect()
    }

    /// Stable reorder putting not-installed entries ahead of installed ones
    pub fn not_installed_first(mut records: Vec<SoftwareRecord>) -> Vec<SoftwareRecord> {
        records.sort_by_key(|record| record.is_installed);
        records
    }
}

fn first_by_name(records: &[SoftwareRecord]) -> HashMap<String, &SoftwareRecord> {
    let mut lookup = HashMap::with_capacity(records.len());
    for record in records {
        lookup.entry(identity_key(&record.name)).or_insert(record);
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::{ActionEligibility, InventoryState};

    fn scanned(name: &str, version: &str) -> SoftwareRecord {
        let mut record = SoftwareRecord::new(name)
            .with_version(version)
            .with_install_path(format!("C:\\Program Files\\{}", name))
            .with_uninstall_command(format!("\"C:\\Program Files\\{}\\uninstall.exe\"", name));
        record.is_installed = true;
        record.installed_version = Some(version.to_string());
        record
    }

    #[test]
    fn test_installed_view_matches_catalog_case_insensitively() {
        let installed = vec![scanned("Foo", "1.0")];
        let catalog = vec![SoftwareRecord::new("foo")
            .with_version("2.0")
            .with_setup_file("foo-2.0.exe")];

        let view = Reconciler::installed_view(installed, &catalog);
        let record = &view[0];

        assert_eq!(record.name, "Foo");
        assert!(record.exists_in_catalog);
        assert_eq!(record.version.as_deref(), Some("2.0"));
        assert_eq!(record.installed_version.as_deref(), Some("1.0"));
        assert_eq!(record.setup_artifact_name.as_deref(), Some("foo-2.0.exe"));
        assert_eq!(
            record.install_path.as_deref(),
            Some("C:\\Program Files\\Foo")
        );
        assert_eq!(record.view_context, ViewContext::InstalledView);

        let actions = ActionEligibility::for_record(record);
        assert!(actions.uninstall);
        assert!(actions.update);
    }

    #[test]
    fn test_installed_view_orphan() {
        let view = Reconciler::installed_view(vec![scanned("Bar", "3.1")], &[]);
        let record = &view[0];

        assert!(!record.exists_in_catalog);
        assert_eq!(InventoryState::of(record), InventoryState::Orphaned);

        let actions = ActionEligibility::for_record(record);
        assert!(actions.uninstall);
        assert!(!actions.update);
    }

    #[test]
    fn test_installed_view_keeps_local_description() {
        let installed = vec![scanned("Foo", "1.0").with_description("local text")];
        let catalog = vec![SoftwareRecord::new("Foo").with_description("catalog text")];
        let view = Reconciler::installed_view(installed, &catalog);
        assert_eq!(view[0].description.as_deref(), Some("local text"));

        let installed = vec![scanned("Foo", "1.0")];
        let view = Reconciler::installed_view(installed, &catalog);
        assert_eq!(view[0].description.as_deref(), Some("catalog text"));
    }

    #[test]
    fn test_catalog_view_marks_installed_and_copies_local_fields() {
        let catalog = vec![
            SoftwareRecord::new("Foo").with_version("2.0"),
            SoftwareRecord::new("Baz").with_version("1.0"),
        ];
        let installed = vec![scanned("FOO", "1.0")];

        let view = Reconciler::catalog_view(catalog, &installed);

        let foo = &view[0];
        assert!(foo.is_installed);
        assert!(foo.exists_in_catalog);
        assert_eq!(foo.installed_version.as_deref(), Some("1.0"));
        assert_eq!(foo.version.as_deref(), Some("2.0"));
        assert!(foo.uninstall_command.is_some());
        let actions = ActionEligibility::for_record(foo);
        assert!(actions.open);
        assert!(actions.update);

        let baz = &view[1];
        assert!(!baz.is_installed);
        assert!(baz.exists_in_catalog);
        let actions = ActionEligibility::for_record(baz);
        assert!(actions.install);
        assert!(!actions.open);
    }

    #[test]
    fn test_catalog_view_over_installed_view_keeps_on_disk_version() {
        let mut unversioned = SoftwareRecord::new("Foo");
        unversioned.is_installed = true;
        let catalog = vec![SoftwareRecord::new("Foo").with_version("2.0")];

        let installed = Reconciler::installed_view(vec![unversioned], &catalog);
        assert_eq!(installed[0].version.as_deref(), Some("2.0"));

        let view = Reconciler::catalog_view(catalog, &installed);
        let foo = &view[0];
        assert!(foo.is_installed);
        assert_eq!(foo.installed_version_str(), "");
        assert!(ActionEligibility::for_record(foo).update);
    }

    #[test]
    fn test_catalog_view_clears_foreign_install_fields() {
        let mut exported = SoftwareRecord::new("Foo")
            .with_version("2.0")
            .with_install_path("C:\\Program Files\\Foo")
            .with_uninstall_command("\"C:\\Program Files\\Foo\\uninstall.exe\"");
        exported.is_installed = true;
        exported.installed_version = Some("2.0".to_string());

        let view = Reconciler::catalog_view(vec![exported], &[]);
        let foo = &view[0];
        assert!(!foo.is_installed);
        assert!(foo.installed_version.is_none());
        assert!(foo.install_path.is_none());
        assert!(foo.uninstall_command.is_none());
        assert!(ActionEligibility::for_record(foo).install);
    }

    #[test]
    fn test_catalog_view_preserves_order_and_names() {
        let catalog: Vec<SoftwareRecord> = ["Zed", "alpha", "Mid"]
            .iter()
            .map(|name| SoftwareRecord::new(*name))
            .collect();
        let view = Reconciler::catalog_view(catalog, &[scanned("ALPHA", "1")]);
        let names: Vec<&str> = view.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "alpha", "Mid"]);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let catalog = vec![
            SoftwareRecord::new("Dup").with_version("1.0"),
            SoftwareRecord::new("dup").with_version("9.0"),
        ];
        let view = Reconciler::installed_view(vec![scanned("DUP", "0.5")], &catalog);
        assert_eq!(view[0].version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let catalog = vec![
            SoftwareRecord::new("Foo").with_version("2.0"),
            SoftwareRecord::new("Baz").with_version("1.0"),
        ];
        let installed = vec![scanned("Foo", "1.0")];

        let once = Reconciler::catalog_view(catalog, &installed);
        let twice = Reconciler::catalog_view(once.clone(), &installed);
        assert_eq!(once, twice);

        let once = Reconciler::installed_view(installed, &once);
        let twice = Reconciler::installed_view(once.clone(), &twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_not_installed_first_is_stable() {
        let catalog = vec![
            SoftwareRecord::new("A"),
            SoftwareRecord::new("B"),
            SoftwareRecord::new("C"),
            SoftwareRecord::new("D"),
        ];
        let installed = vec![scanned("A", "1"), scanned("C", "1")];
        let ordered =
            Reconciler::not_installed_first(Reconciler::catalog_view(catalog, &installed));
        let names: Vec<&str> = ordered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "A", "C"]);
    }
}
