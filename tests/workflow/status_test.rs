#[cfg(test)]
mod tests {
    use crate::utils::{blood_request, day, organ_request, seeded_registry};
    use donor_registry::{
        BloodStatus, DonationOutcome, DonationRegistry, ErrorKind, InventoryRef, OrganStatus,
        UnitKind, UnitStatus,
    };

    /// Record `n` successful blood donations and return the last unit id
    fn stock_blood(registry: &DonationRegistry, n: usize) -> i64 {
        let mut last = 0;
        for _ in 0..n {
            let receipt = registry
                .record_donation(&blood_request(1, 1, "Storage A"))
                .unwrap();
            if let Some(InventoryRef::Blood(id)) = receipt.inventory {
                last = id;
            }
        }
        last
    }

    fn stock_organ(registry: &DonationRegistry) -> i64 {
        let receipt = registry
            .record_donation(&organ_request(1, 1, DonationOutcome::Success, "Heart"))
            .unwrap();
        match receipt.inventory {
            Some(InventoryRef::Organ(id)) => id,
            other => panic!("expected an organ unit, got {other:?}"),
        }
    }

    #[test]
    fn test_issued_unit_cannot_return_to_available() {
        let registry = seeded_registry(1, 1);
        let unit_id = stock_blood(&registry, 12);
        assert_eq!(unit_id, 12);

        registry.set_status(UnitKind::Blood, 12, "Issued").unwrap();
        let err = registry
            .set_status(UnitKind::Blood, 12, "Available")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        let unit = registry.blood_unit(12).unwrap().unwrap();
        assert_eq!(unit.status, BloodStatus::Issued);
    }

    #[test]
    fn test_expired_unit_cannot_return_to_available() {
        let registry = seeded_registry(1, 1);
        let unit_id = stock_blood(&registry, 1);

        registry.set_status(UnitKind::Blood, unit_id, "expired").unwrap();
        for target in ["Available", "Issued", "Expired"] {
            let err = registry
                .set_status(UnitKind::Blood, unit_id, target)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        }
        let unit = registry.blood_unit(unit_id).unwrap().unwrap();
        assert_eq!(unit.status, BloodStatus::Expired);
    }

    #[test]
    fn test_terminal_organ_statuses_are_final() {
        let registry = seeded_registry(1, 1);
        let used = stock_organ(&registry);
        let rejected = stock_organ(&registry);

        registry.set_status(UnitKind::Organ, used, "Healthy").unwrap();
        registry.set_status(UnitKind::Organ, used, "Used").unwrap();
        registry.set_status(UnitKind::Organ, rejected, "Rejected").unwrap();

        for (unit_id, status) in [(used, OrganStatus::Used), (rejected, OrganStatus::Rejected)] {
            for target in OrganStatus::ALL {
                let err = registry
                    .set_unit_status(unit_id, UnitStatus::Organ(*target), None)
                    .unwrap_err();
                assert_eq!(err.kind(), ErrorKind::InvalidTransition);
            }
            assert_eq!(registry.organ_unit(unit_id).unwrap().unwrap().status, status);
        }
    }

    #[test]
    fn test_token_from_other_machine_is_validation_error() {
        let registry = seeded_registry(1, 1);
        let unit_id = stock_blood(&registry, 1);

        let err = registry
            .set_status(UnitKind::Blood, unit_id, "Used")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            registry.blood_unit(unit_id).unwrap().unwrap().status,
            BloodStatus::Available
        );
    }

    #[test]
    fn test_missing_unit_is_not_found() {
        let registry = seeded_registry(1, 1);
        let err = registry
            .set_status(UnitKind::Organ, 77, "Healthy")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_stale_version_is_conflict() {
        let registry = seeded_registry(1, 1);
        let unit_id = stock_organ(&registry);
        let loaded = registry.organ_unit(unit_id).unwrap().unwrap();

        // Another user moves the unit on first
        registry
            .set_status_versioned(UnitKind::Organ, unit_id, "Healthy", loaded.version)
            .unwrap();

        let err = registry
            .set_status_versioned(UnitKind::Organ, unit_id, "Rejected", loaded.version)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let current = registry.organ_unit(unit_id).unwrap().unwrap();
        assert_eq!(current.status, OrganStatus::Healthy);
        assert_eq!(current.version, loaded.version + 1);
    }

    #[test]
    fn test_expiry_sweep_only_touches_available_past_expiry() {
        let registry = seeded_registry(1, 1);
        let expiring = stock_blood(&registry, 1);
        let issued = stock_blood(&registry, 1);
        registry.set_status(UnitKind::Blood, issued, "Issued").unwrap();

        // Collected 2024-01-10, expires 2024-02-21
        let unit = registry.blood_unit(expiring).unwrap().unwrap();
        assert!(!unit.is_past_expiry(day(2024, 2, 21)));
        assert!(unit.is_past_expiry(day(2024, 2, 22)));

        assert_eq!(registry.expire_blood_units(day(2024, 2, 21)).unwrap(), 0);
        assert_eq!(registry.expire_blood_units(day(2024, 2, 22)).unwrap(), 1);
        assert_eq!(registry.expire_blood_units(day(2024, 3, 1)).unwrap(), 0);

        assert_eq!(
            registry.blood_unit(expiring).unwrap().unwrap().status,
            BloodStatus::Expired
        );
        assert_eq!(
            registry.blood_unit(issued).unwrap().unwrap().status,
            BloodStatus::Issued
        );
        assert_eq!(
            registry
                .blood_units(Some(BloodStatus::Expired))
                .unwrap()
                .len(),
            1
        );
    }
}
