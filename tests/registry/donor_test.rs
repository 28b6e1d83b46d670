#[cfg(test)]
mod tests {
    use crate::utils::{blood_request, donor, organ_request, seeded_registry, test_registry};
    use donor_registry::{
        BloodGroup, DonationOutcome, DonorDeletePolicy, DonorUpdate, ErrorKind,
    };

    #[test]
    fn test_add_and_get_donor() {
        let registry = test_registry();
        let id = registry
            .add_donor(&donor("Anil", "Sharma", BloodGroup::AbNegative))
            .unwrap();

        let stored = registry.require_donor(id).unwrap();
        assert_eq!(stored.full_name(), "Anil Sharma");
        assert_eq!(stored.blood_group, BloodGroup::AbNegative);
        assert!(stored.eligible);
        assert!(registry.donor(id + 1).unwrap().is_none());
        assert_eq!(
            registry.require_donor(id + 1).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let registry = test_registry();
        let err = registry
            .add_donor(&donor(" ", "Sharma", BloodGroup::APositive))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(registry.donors().unwrap().is_empty());
    }

    #[test]
    fn test_search_matches_names_and_blood_group() {
        let registry = test_registry();
        registry
            .add_donor(&donor("Anil", "Sharma", BloodGroup::APositive))
            .unwrap();
        registry
            .add_donor(&donor("Priya", "Nair", BloodGroup::AbPositive))
            .unwrap();
        registry
            .add_donor(&donor("Kiran", "Patil", BloodGroup::ONegative))
            .unwrap();

        let names = |query: &str| -> Vec<String> {
            registry
                .search_donors(query)
                .unwrap()
                .iter()
                .map(|d| d.first_name.clone())
                .collect()
        };
        assert_eq!(names("nai"), vec!["Priya"]);
        assert_eq!(names("O-"), vec!["Kiran"]);
        assert_eq!(names("a"), vec!["Anil", "Priya", "Kiran"]);
        // Wildcards in the query are matched literally
        assert!(names("%").is_empty());
    }

    #[test]
    fn test_update_and_eligibility() {
        let registry = test_registry();
        let id = registry
            .add_donor(&donor("Anil", "Sharma", BloodGroup::APositive))
            .unwrap();

        let mut update = DonorUpdate::from(&registry.require_donor(id).unwrap());
        update.middle_name = "K".to_string();
        update.blood_group = BloodGroup::BNegative;
        registry.update_donor(id, &update).unwrap();
        registry.set_donor_eligibility(id, false).unwrap();

        let stored = registry.require_donor(id).unwrap();
        assert_eq!(stored.full_name(), "Anil K Sharma");
        assert_eq!(stored.blood_group, BloodGroup::BNegative);
        assert!(!stored.eligible);

        assert_eq!(
            registry.update_donor(99, &update).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_phones() {
        let registry = test_registry();
        let id = registry
            .add_donor(&donor("Anil", "Sharma", BloodGroup::APositive))
            .unwrap();
        registry.add_donor_phone(id, "9876543210").unwrap();
        registry.add_donor_phone(id, "9876543210").unwrap();
        registry.add_donor_phone(id, "020-5550123").unwrap();

        assert_eq!(
            registry.donor_phones(id).unwrap(),
            vec!["020-5550123", "9876543210"]
        );
        assert_eq!(
            registry.add_donor_phone(id, "12").unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            registry.add_donor_phone(42, "9876543210").unwrap_err().kind(),
            ErrorKind::Reference
        );
    }

    #[test]
    fn test_restrict_delete_keeps_donor_with_donations() {
        let registry = seeded_registry(1, 2);
        registry
            .record_donation(&blood_request(1, 1, "Storage A"))
            .unwrap();

        let err = registry.delete_donor(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(registry.donor(1).unwrap().is_some());
        assert_eq!(registry.donations().unwrap().len(), 1);

        // A donor without donations goes, phones included
        registry.add_donor_phone(2, "9876543210").unwrap();
        assert_eq!(registry.delete_donor(2).unwrap(), 0);
        assert!(registry.donor(2).unwrap().is_none());
        assert!(registry.donor_phones(2).unwrap().is_empty());
    }

    #[test]
    fn test_cascade_delete_removes_donations_and_units() {
        let registry = seeded_registry(1, 2);
        registry
            .record_donation(&blood_request(1, 1, "Storage A"))
            .unwrap();
        registry
            .record_donation(&organ_request(1, 1, DonationOutcome::Success, "Kidney"))
            .unwrap();
        registry
            .record_donation(&blood_request(2, 1, "Storage B"))
            .unwrap();

        let removed = registry
            .delete_donor_with(1, DonorDeletePolicy::Cascade)
            .unwrap();

        assert_eq!(removed, 2);
        assert!(registry.donor(1).unwrap().is_none());
        assert_eq!(registry.donations().unwrap().len(), 1);
        assert_eq!(registry.blood_units(None).unwrap().len(), 1);
        assert!(registry.organ_units(None).unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_donor_is_not_found() {
        let registry = test_registry();
        assert_eq!(
            registry.delete_donor(3).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
