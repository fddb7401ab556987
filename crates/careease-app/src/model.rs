// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Upcoming,
    Finished,
}

impl AppointmentStatus {
    pub const ALL: [Self; 2] = [Self::Upcoming, Self::Finished];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Finished => "finished",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upcoming" => Some(Self::Upcoming),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Finished => "Finished",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitType {
    Single,
    Multiple,
}

impl VisitType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
            Self::Multiple => "MULTIPLE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SINGLE" => Some(Self::Single),
            "MULTIPLE" => Some(Self::Multiple),
            _ => None,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Single => "Single treatment",
            Self::Multiple => "Multiple treatments",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    PartTime,
    FullTime,
}

impl EmploymentType {
    pub const ALL: [Self; 2] = [Self::PartTime, Self::FullTime];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PartTime => "Part-Time",
            Self::FullTime => "Full-Time",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Part-Time" => Some(Self::PartTime),
            "Full-Time" => Some(Self::FullTime),
            _ => None,
        }
    }
}

/// Settlement state of a finished appointment. One tagged value instead of
/// the backend's loose `payment`/`payButton`/`paymentStatus` trio; the wire
/// layer converts between the two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentState {
    NotRequired,
    Due { amount_cents: i64 },
    Paid,
}

impl PaymentState {
    pub const fn is_due(self) -> bool {
        matches!(self, Self::Due { .. })
    }

    pub const fn amount_cents(self) -> Option<i64> {
        match self {
            Self::Due { amount_cents } => Some(amount_cents),
            Self::NotRequired | Self::Paid => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: AdminId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub last_login: String,
    pub profile_pic: String,
    pub permissions: Vec<String>,
    pub hospital: Option<Hospital>,
}

impl AdminProfile {
    pub fn hospital_name(&self) -> Option<&str> {
        self.hospital.as_ref().map(|hospital| hospital.name.as_str())
    }
}

pub const WORKING_DAYS: usize = 7;
pub const DAY_INITIALS: [&str; WORKING_DAYS] = ["S", "M", "T", "W", "T", "F", "S"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub profile_pic: String,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub days: [bool; WORKING_DAYS],
    pub assigned_treatment: String,
    pub employment: EmploymentType,
    pub experience: String,
    pub languages: Vec<String>,
}

/// Submission shape for the staff roster; the backend assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub profile_pic: String,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub days: [bool; WORKING_DAYS],
    pub assigned_treatment: String,
    pub employment: EmploymentType,
    pub experience: String,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub date: Date,
    pub time_range: String,
    pub title: String,
    pub visit_type: VisitType,
    pub details: String,
    pub hospital: String,
    pub status: AppointmentStatus,
    pub payment: PaymentState,
}

impl Appointment {
    /// Timeline badge text, e.g. "APR 25".
    pub fn date_badge(&self) -> String {
        let month = match self.date.month() {
            time::Month::January => "JAN",
            time::Month::February => "FEB",
            time::Month::March => "MAR",
            time::Month::April => "APR",
            time::Month::May => "MAY",
            time::Month::June => "JUN",
            time::Month::July => "JUL",
            time::Month::August => "AUG",
            time::Month::September => "SEP",
            time::Month::October => "OCT",
            time::Month::November => "NOV",
            time::Month::December => "DEC",
        };
        format!("{month} {}", self.date.day())
    }

    /// A pay affordance is offered only once the visit is over and the
    /// backend reports an open balance.
    pub fn payable(&self) -> bool {
        self.status == AppointmentStatus::Finished && self.payment.is_due()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Appointment, AppointmentStatus, EmploymentType, PaymentState, VisitType,
    };
    use crate::AppointmentId;
    use time::{Date, Month};

    fn appointment(status: AppointmentStatus, payment: PaymentState) -> Appointment {
        Appointment {
            id: AppointmentId::new("RSV10102"),
            date: Date::from_calendar_date(2026, Month::April, 25).expect("valid date"),
            time_range: "10:00 - 11:00 AM".to_owned(),
            title: "Tooth Scaling".to_owned(),
            visit_type: VisitType::Multiple,
            details: "Visit #2 - Scaling Maxilla (Q1+Q2)".to_owned(),
            hospital: "Zendral Dental".to_owned(),
            status,
            payment,
        }
    }

    #[test]
    fn status_round_trips_through_wire_labels() {
        for status in AppointmentStatus::ALL {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse("cancelled"), None);
    }

    #[test]
    fn employment_round_trips_through_wire_labels() {
        for employment in EmploymentType::ALL {
            assert_eq!(EmploymentType::parse(employment.as_str()), Some(employment));
        }
        assert_eq!(EmploymentType::parse("Contract"), None);
    }

    #[test]
    fn date_badge_uses_upper_month_abbreviation() {
        let entry = appointment(AppointmentStatus::Upcoming, PaymentState::NotRequired);
        assert_eq!(entry.date_badge(), "APR 25");
    }

    #[test]
    fn payable_requires_finished_status_and_open_balance() {
        let due = PaymentState::Due { amount_cents: 24_000 };
        assert!(appointment(AppointmentStatus::Finished, due).payable());
        assert!(!appointment(AppointmentStatus::Upcoming, due).payable());
        assert!(!appointment(AppointmentStatus::Finished, PaymentState::Paid).payable());
        assert!(
            !appointment(AppointmentStatus::Finished, PaymentState::NotRequired).payable()
        );
    }

    #[test]
    fn visit_type_descriptions_match_badges() {
        assert_eq!(VisitType::Multiple.description(), "Multiple treatments");
        assert_eq!(VisitType::parse("SINGLE"), Some(VisitType::Single));
    }
}
