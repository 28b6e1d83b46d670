#[cfg(test)]
mod tests {
    use crate::utils::{blood_request, organ_request, patient, seeded_registry, test_registry};
    use donor_registry::{
        DashboardSummary, DonationOutcome, ErrorKind, RegistryConfig, DonationRegistry, UnitKind,
        View,
    };
    use serde_json::json;

    #[test]
    fn test_empty_registry_views_are_empty_tables() {
        let registry = test_registry();
        for (name, view) in View::NAMED {
            let table = registry.view(view).unwrap();
            assert!(table.is_empty(), "view '{name}' should be empty");
            assert!(!table.columns().is_empty(), "view '{name}' has columns");
        }
        assert_eq!(registry.summary().unwrap(), DashboardSummary::default());
    }

    #[test]
    fn test_views_list_rows() {
        let registry = seeded_registry(2, 3);
        registry
            .record_donation(&blood_request(1, 1, "Storage A"))
            .unwrap();
        registry
            .record_donation(&organ_request(2, 2, DonationOutcome::Success, "Liver"))
            .unwrap();
        registry.register_patient(&patient(1, "9876543210")).unwrap();

        assert_eq!(registry.view(&View::Donors).unwrap().len(), 3);
        assert_eq!(registry.view(&View::Patients).unwrap().len(), 1);
        assert_eq!(registry.view(&View::Donations).unwrap().len(), 2);

        let hospitals = registry.view(&View::Hospitals).unwrap();
        assert_eq!(hospitals.get(0, "city"), Some(&json!("Pune")));

        let blood = registry.view(&View::BloodStock).unwrap();
        assert_eq!(blood.get(0, "stor_loc"), Some(&json!("Storage A")));
        assert_eq!(blood.get(0, "B_status"), Some(&json!("Available")));

        let organs = registry.view(&View::OrganStock).unwrap();
        assert_eq!(organs.get(0, "O_type"), Some(&json!("Liver")));
        assert_eq!(organs.get(0, "O_status"), Some(&json!("Pending")));

        let found = registry
            .view(&View::DonorSearch("Donor2".to_string()))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.get(0, "D_id"), Some(&json!(2)));

        assert!(registry.view(&View::Donor(99)).unwrap().is_empty());
    }

    #[test]
    fn test_dashboard_counts_and_recent_limit() {
        let config = RegistryConfig {
            recent_donations_limit: 2,
            ..Default::default()
        };
        let registry = DonationRegistry::open(config).unwrap();
        registry.add_hospital(&crate::utils::hospital("General")).unwrap();
        registry
            .add_donor(&crate::utils::donor(
                "Asha",
                "Rao",
                donor_registry::BloodGroup::BPositive,
            ))
            .unwrap();
        for _ in 0..3 {
            registry
                .record_donation(&blood_request(1, 1, "Storage A"))
                .unwrap();
        }
        registry.set_status(UnitKind::Blood, 1, "Issued").unwrap();

        let dashboard = registry.dashboard().unwrap();
        assert_eq!(
            dashboard.summary,
            DashboardSummary {
                donors: 1,
                patients: 0,
                donations: 3,
                available_blood_units: 2,
            }
        );
        assert_eq!(dashboard.recent_donations.len(), 2);
        assert_eq!(
            dashboard.recent_donations.get(0, "Do_id"),
            Some(&json!(3))
        );
    }

    #[test]
    fn test_unknown_view_name_is_rejected() {
        let err = "audit_log".parse::<View>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!("Organs".parse::<View>().unwrap(), View::OrganStock);
    }
}
