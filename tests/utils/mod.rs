use chrono::{NaiveDate, NaiveDateTime};
use donor_registry::{
    BloodGroup, DonationOutcome, DonationRegistry, DonationRequest, DonationType, Gender,
    HospitalAddress, NewDonor, NewHospital, PatientRegistration, UrgencyLevel,
};

/// Calendar date shorthand
#[must_use]
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[must_use]
pub fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, 0, 0).unwrap()
}

/// Fresh in-memory registry
#[must_use]
pub fn test_registry() -> DonationRegistry {
    DonationRegistry::open_in_memory().unwrap()
}

#[must_use]
pub fn hospital(name: &str) -> NewHospital {
    NewHospital {
        name: name.to_string(),
        phone: Some("020-5550100".to_string()),
        address: Some(HospitalAddress {
            city: "Pune".to_string(),
            state: "MH".to_string(),
            postal_code: "411001".to_string(),
        }),
    }
}

#[must_use]
pub fn donor(first_name: &str, last_name: &str, blood_group: BloodGroup) -> NewDonor {
    NewDonor {
        first_name: first_name.to_string(),
        middle_name: String::new(),
        last_name: last_name.to_string(),
        date_of_birth: day(1990, 5, 17),
        gender: Gender::Female,
        blood_group,
        donation_type: DonationType::Blood,
        declared_at: at(day(2024, 1, 2), 9),
    }
}

#[must_use]
pub fn patient(hospital_id: i64, phone: &str) -> PatientRegistration {
    PatientRegistration {
        hospital_id,
        first_name: "Meera".to_string(),
        middle_name: "S".to_string(),
        last_name: "Iyer".to_string(),
        date_of_birth: day(1975, 11, 3),
        urgency: UrgencyLevel::High,
        gender: Gender::Female,
        blood_group: BloodGroup::ONegative,
        phone: phone.to_string(),
    }
}

/// Registry with `hospitals` hospitals and `donors` donors, ids counting from 1
#[must_use]
pub fn seeded_registry(hospitals: usize, donors: usize) -> DonationRegistry {
    let registry = test_registry();
    for i in 1..=hospitals {
        registry.add_hospital(&hospital(&format!("Hospital {i}"))).unwrap();
    }
    for i in 1..=donors {
        registry
            .add_donor(&donor(&format!("Donor{i}"), "Test", BloodGroup::APositive))
            .unwrap();
    }
    registry
}

/// Successful blood donation request stored at `storage`
#[must_use]
pub fn blood_request(donor_id: i64, hospital_id: i64, storage: &str) -> DonationRequest {
    DonationRequest::new(
        donor_id,
        hospital_id,
        DonationType::Blood,
        at(day(2024, 1, 10), 10),
        DonationOutcome::Success,
    )
    .collected_on(day(2024, 1, 10))
    .with_storage(storage)
}

/// Organ donation request with the given outcome
#[must_use]
pub fn organ_request(
    donor_id: i64,
    hospital_id: i64,
    outcome: DonationOutcome,
    organ: &str,
) -> DonationRequest {
    DonationRequest::new(
        donor_id,
        hospital_id,
        DonationType::Organ,
        at(day(2024, 2, 1), 14),
        outcome,
    )
    .with_detail(organ)
}
