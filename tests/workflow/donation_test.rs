#[cfg(test)]
mod tests {
    use crate::utils::{at, blood_request, day, organ_request, seeded_registry};
    use donor_registry::{
        BloodStatus, DonationOutcome, DonationRequest, DonationType, ErrorKind, InventoryRef,
        OrganStatus, RegistryConfig, DonationRegistry,
    };

    #[test]
    fn test_successful_blood_donation_creates_available_unit() {
        // Donor 7 and hospital 3 are the last rows seeded
        let registry = seeded_registry(3, 7);
        let request = blood_request(7, 3, "Storage A")
            .collected_on(day(2024, 1, 10))
            .with_detail("");

        let receipt = registry.record_donation(&request).unwrap();

        let Some(InventoryRef::Blood(unit_id)) = receipt.inventory else {
            panic!("expected a blood unit, got {:?}", receipt.inventory);
        };
        let unit = registry.blood_unit(unit_id).unwrap().unwrap();
        assert_eq!(unit.donation_id, receipt.donation_id);
        assert_eq!(unit.status, BloodStatus::Available);
        assert_eq!(unit.storage_location, "Storage A");
        assert_eq!(unit.collection_date, day(2024, 1, 10));
        assert_eq!(unit.expiry_date, day(2024, 2, 21));

        let donation = registry.donation(receipt.donation_id).unwrap().unwrap();
        assert_eq!(donation.donor_id, 7);
        assert_eq!(donation.hospital_id, 3);
        assert_eq!(donation.donation_type, DonationType::Blood);
        assert_eq!(donation.outcome, DonationOutcome::Success);

        assert!(registry.organ_units(None).unwrap().is_empty());
        assert!(
            registry
                .organ_unit_for_donation(receipt.donation_id)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_successful_organ_donation_creates_one_pending_unit() {
        let registry = seeded_registry(1, 1);
        let receipt = registry
            .record_donation(&organ_request(1, 1, DonationOutcome::Success, "Kidney"))
            .unwrap();

        let Some(InventoryRef::Organ(unit_id)) = receipt.inventory else {
            panic!("expected an organ unit, got {:?}", receipt.inventory);
        };
        let unit = registry.organ_unit(unit_id).unwrap().unwrap();
        assert_eq!(unit.organ_type, "Kidney");
        assert_eq!(unit.status, OrganStatus::Pending);
        assert_eq!(unit.donation_id, receipt.donation_id);
        assert_eq!(registry.organ_units(None).unwrap().len(), 1);
        assert!(registry.blood_units(None).unwrap().is_empty());
    }

    #[test]
    fn test_failed_organ_donation_creates_no_unit() {
        let registry = seeded_registry(1, 1);
        let receipt = registry
            .record_donation(&organ_request(1, 1, DonationOutcome::Failed, ""))
            .unwrap();

        assert!(receipt.inventory.is_none());
        assert!(registry.donation(receipt.donation_id).unwrap().is_some());
        assert!(registry.organ_units(None).unwrap().is_empty());
        assert!(registry.blood_units(None).unwrap().is_empty());
    }

    #[test]
    fn test_failed_blood_donation_creates_no_unit() {
        let registry = seeded_registry(1, 1);
        let request = DonationRequest::new(
            1,
            1,
            DonationType::Blood,
            at(day(2024, 3, 5), 11),
            DonationOutcome::Failed,
        );
        let receipt = registry.record_donation(&request).unwrap();

        assert!(receipt.inventory.is_none());
        assert_eq!(registry.donations().unwrap().len(), 1);
        assert!(registry.blood_units(None).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_donor_is_reference_error_and_nothing_persists() {
        let registry = seeded_registry(3, 7);
        let err = registry
            .record_donation(&blood_request(9999, 3, "Storage A"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(registry.donations().unwrap().is_empty());
        assert!(registry.blood_units(None).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_hospital_is_reference_error() {
        let registry = seeded_registry(1, 1);
        let err = registry
            .record_donation(&organ_request(1, 42, DonationOutcome::Success, "Liver"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(registry.donations().unwrap().is_empty());
    }

    #[test]
    fn test_blood_donation_without_storage_is_rejected() {
        let registry = seeded_registry(1, 1);
        let err = registry
            .record_donation(&blood_request(1, 1, "   "))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(registry.donations().unwrap().is_empty());
    }

    #[test]
    fn test_configured_shelf_life_sets_expiry() {
        let config = RegistryConfig {
            blood_shelf_life_days: 35,
            ..Default::default()
        };
        let registry = DonationRegistry::open(config).unwrap();
        registry
            .add_hospital(&crate::utils::hospital("General"))
            .unwrap();
        registry
            .add_donor(&crate::utils::donor(
                "Asha",
                "Rao",
                donor_registry::BloodGroup::OPositive,
            ))
            .unwrap();

        let receipt = registry
            .record_donation(&blood_request(1, 1, "Fridge 2"))
            .unwrap();
        let unit = registry
            .blood_unit_for_donation(receipt.donation_id)
            .unwrap()
            .unwrap();
        assert_eq!(unit.expiry_date, day(2024, 2, 14));
    }

    #[test]
    fn test_donations_listed_newest_first() {
        let registry = seeded_registry(1, 2);
        let older = registry
            .record_donation(&blood_request(1, 1, "Storage A"))
            .unwrap();
        let newer = registry
            .record_donation(&organ_request(2, 1, DonationOutcome::Failed, ""))
            .unwrap();

        let ids: Vec<i64> = registry
            .donations()
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![newer.donation_id, older.donation_id]);
        assert_eq!(registry.donations_for_donor(1).unwrap().len(), 1);
    }
}
