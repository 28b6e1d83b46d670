#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::utils::{blood_request, donor, hospital};
    use donor_registry::{BloodGroup, DonationRegistry, ErrorKind, RegistryConfig, UnitKind};

    fn temp_db(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "donor-registry-{name}-{}.sqlite",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_committed_changes_survive_reopen() {
        let path = temp_db("reopen");
        let config = RegistryConfig::for_path(path.to_string_lossy());

        {
            let registry = DonationRegistry::open(config.clone()).unwrap();
            registry.add_hospital(&hospital("General")).unwrap();
            registry
                .add_donor(&donor("Asha", "Rao", BloodGroup::OPositive))
                .unwrap();
            registry
                .record_donation(&blood_request(1, 1, "Storage A"))
                .unwrap();
            registry.set_status(UnitKind::Blood, 1, "Issued").unwrap();
        }

        let registry = DonationRegistry::open(config).unwrap();
        let summary = registry.summary().unwrap();
        assert_eq!(summary.donors, 1);
        assert_eq!(summary.donations, 1);
        assert_eq!(summary.available_blood_units, 0);
        assert_eq!(
            registry.blood_unit(1).unwrap().unwrap().status.to_string(),
            "Issued"
        );

        drop(registry);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unopenable_database_is_connectivity_error() {
        let config = RegistryConfig::for_path("/nonexistent-dir/donors/registry.sqlite");
        let err = DonationRegistry::open(config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connectivity);
        assert_eq!(err.user_message(), "The registry database is unavailable");
    }

    #[test]
    fn test_file_that_is_not_a_database_is_connectivity_error() {
        let path = temp_db("garbage");
        std::fs::write(&path, b"this is not an sqlite database, just some text padding it out")
            .unwrap();

        let err = DonationRegistry::open(RegistryConfig::for_path(path.to_string_lossy()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connectivity);

        std::fs::remove_file(&path).unwrap();
    }
}
