// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Deterministic sample records for demo mode and tests. The fixtures are
//! stable so assertions can name concrete values.

use careease_app::{
    AdminId, AdminProfile, Appointment, AppointmentId, AppointmentStatus, Doctor, DoctorId,
    EmploymentType, Hospital, PaymentState, VisitType,
};
use time::{Date, Month};

pub const SAMPLE_ADMIN_ID: AdminId = AdminId::new(42);

pub fn sample_admin() -> AdminProfile {
    AdminProfile {
        id: SAMPLE_ADMIN_ID,
        name: "Dr. Maria Santos".to_owned(),
        email: "maria@zendral.example".to_owned(),
        role: "Administrator".to_owned(),
        department: "Front Office".to_owned(),
        last_login: "2026-04-18 09:12".to_owned(),
        profile_pic: "maria.png".to_owned(),
        permissions: vec![
            "beds".to_owned(),
            "staff".to_owned(),
            "schedules".to_owned(),
        ],
        hospital: Some(Hospital {
            name: "Zendral".to_owned(),
        }),
    }
}

pub fn sample_roster() -> Vec<Doctor> {
    vec![
        Doctor {
            id: DoctorId::new(3),
            profile_pic: "lee.png".to_owned(),
            name: "Dr. Lee".to_owned(),
            specialization: "Orthodontics".to_owned(),
            email: "lee@zendral.example".to_owned(),
            days: [false, true, true, false, true, false, false],
            assigned_treatment: "Braces".to_owned(),
            employment: EmploymentType::PartTime,
            experience: "6 years".to_owned(),
            languages: vec!["English".to_owned(), "Korean".to_owned()],
        },
        Doctor {
            id: DoctorId::new(5),
            profile_pic: "okafor.png".to_owned(),
            name: "Dr. Okafor".to_owned(),
            specialization: "Oral Surgery".to_owned(),
            email: "okafor@zendral.example".to_owned(),
            days: [false, true, true, true, true, true, false],
            assigned_treatment: "Extractions".to_owned(),
            employment: EmploymentType::FullTime,
            experience: "11 years".to_owned(),
            languages: vec!["English".to_owned(), "Igbo".to_owned()],
        },
        Doctor {
            id: DoctorId::new(8),
            profile_pic: "novak.png".to_owned(),
            name: "Dr. Novak".to_owned(),
            specialization: "Periodontics".to_owned(),
            email: "novak@zendral.example".to_owned(),
            days: [true, false, true, false, true, false, true],
            assigned_treatment: "Scaling".to_owned(),
            employment: EmploymentType::FullTime,
            experience: "8 years".to_owned(),
            languages: vec!["English".to_owned(), "Czech".to_owned()],
        },
    ]
}

/// Two upcoming, one due, one already paid. Ordered the way the backend
/// returns them (newest first).
pub fn sample_schedule() -> Vec<Appointment> {
    vec![
        Appointment {
            id: AppointmentId::new("RSV10102"),
            date: date(Month::April, 25),
            time_range: "10:00 - 11:00 AM".to_owned(),
            title: "Tooth Scaling".to_owned(),
            visit_type: VisitType::Multiple,
            details: "Visit #2 - Scaling Maxilla (Q1+Q2)".to_owned(),
            hospital: "Zendral Dental".to_owned(),
            status: AppointmentStatus::Upcoming,
            payment: PaymentState::NotRequired,
        },
        Appointment {
            id: AppointmentId::new("RSV10110"),
            date: date(Month::April, 27),
            time_range: "02:00 - 03:00 PM".to_owned(),
            title: "Routine checkup".to_owned(),
            visit_type: VisitType::Single,
            details: "General examination".to_owned(),
            hospital: "Zendral Dental".to_owned(),
            status: AppointmentStatus::Upcoming,
            payment: PaymentState::NotRequired,
        },
        Appointment {
            id: AppointmentId::new("RSV10105"),
            date: date(Month::April, 20),
            time_range: "09:00 - 10:00 AM".to_owned(),
            title: "Simple extractions".to_owned(),
            visit_type: VisitType::Multiple,
            details: "Visit #2 - Simple extractions (Q1+Q2)".to_owned(),
            hospital: "Zendral Dental".to_owned(),
            status: AppointmentStatus::Finished,
            payment: PaymentState::Due {
                amount_cents: 24_000,
            },
        },
        Appointment {
            id: AppointmentId::new("RSV10094"),
            date: date(Month::April, 19),
            time_range: "08:00 - 09:00 AM".to_owned(),
            title: "Emergency care".to_owned(),
            visit_type: VisitType::Single,
            details: "Emergency care".to_owned(),
            hospital: "Zendral Dental".to_owned(),
            status: AppointmentStatus::Finished,
            payment: PaymentState::Paid,
        },
    ]
}

fn date(month: Month, day: u8) -> Date {
    Date::from_calendar_date(2026, month, day).expect("fixture dates are valid")
}

#[cfg(test)]
mod tests {
    use super::{sample_admin, sample_roster, sample_schedule};
    use careease_app::partition_schedule;

    #[test]
    fn admin_fixture_carries_the_hospital() {
        assert_eq!(sample_admin().hospital_name(), Some("Zendral"));
    }

    #[test]
    fn roster_fixture_ids_are_unique() {
        let roster = sample_roster();
        let mut ids: Vec<i64> = roster.iter().map(|doctor| doctor.id.get()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn schedule_fixture_covers_both_buckets_and_one_open_balance() {
        let schedule = sample_schedule();
        let buckets = partition_schedule(&schedule);
        assert_eq!(buckets.upcoming.len(), 2);
        assert_eq!(buckets.finished.len(), 2);

        let payable: Vec<&str> = schedule
            .iter()
            .filter(|entry| entry.payable())
            .map(|entry| entry.id.as_str())
            .collect();
        assert_eq!(payable, vec!["RSV10105"]);
    }
}
