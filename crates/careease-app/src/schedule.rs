// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Appointment, AppointmentStatus};

/// Derived grouping of a schedule by status. Always recomputed from the
/// source slice, never stored, so it cannot go stale independently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleBuckets<'a> {
    pub upcoming: Vec<&'a Appointment>,
    pub finished: Vec<&'a Appointment>,
}

impl<'a> ScheduleBuckets<'a> {
    pub fn bucket(&self, status: AppointmentStatus) -> &[&'a Appointment] {
        match status {
            AppointmentStatus::Upcoming => &self.upcoming,
            AppointmentStatus::Finished => &self.finished,
        }
    }

    pub fn len(&self) -> usize {
        self.upcoming.len() + self.finished.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.finished.is_empty()
    }
}

/// Partition a schedule into its status buckets. Exhaustive and disjoint
/// by construction; source order is preserved within each bucket.
pub fn partition_schedule(appointments: &[Appointment]) -> ScheduleBuckets<'_> {
    let mut buckets = ScheduleBuckets::default();
    for appointment in appointments {
        match appointment.status {
            AppointmentStatus::Upcoming => buckets.upcoming.push(appointment),
            AppointmentStatus::Finished => buckets.finished.push(appointment),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::partition_schedule;
    use crate::{
        Appointment, AppointmentId, AppointmentStatus, PaymentState, VisitType,
    };
    use std::collections::BTreeSet;
    use time::{Date, Month};

    fn appointment(id: &str, day: u8, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: AppointmentId::new(id),
            date: Date::from_calendar_date(2026, Month::April, day).expect("valid date"),
            time_range: "10:00 - 11:00 AM".to_owned(),
            title: format!("visit {id}"),
            visit_type: VisitType::Single,
            details: String::new(),
            hospital: "Zendral Dental".to_owned(),
            status,
            payment: PaymentState::NotRequired,
        }
    }

    fn sample() -> Vec<Appointment> {
        vec![
            appointment("RSV10102", 25, AppointmentStatus::Upcoming),
            appointment("RSV10105", 20, AppointmentStatus::Finished),
            appointment("RSV10110", 27, AppointmentStatus::Upcoming),
            appointment("RSV10094", 19, AppointmentStatus::Finished),
        ]
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let schedule = sample();
        let buckets = partition_schedule(&schedule);

        assert_eq!(buckets.len(), schedule.len());

        let mut seen = BTreeSet::new();
        for entry in buckets.upcoming.iter().chain(buckets.finished.iter()) {
            assert!(seen.insert(entry.id.clone()), "{:?} appears twice", entry.id);
        }
        assert_eq!(seen.len(), schedule.len());

        for entry in &buckets.upcoming {
            assert_eq!(entry.status, AppointmentStatus::Upcoming);
        }
        for entry in &buckets.finished {
            assert_eq!(entry.status, AppointmentStatus::Finished);
        }
    }

    #[test]
    fn buckets_preserve_source_order() {
        let schedule = sample();
        let buckets = partition_schedule(&schedule);

        let upcoming_ids: Vec<&str> = buckets
            .upcoming
            .iter()
            .map(|entry| entry.id.as_str())
            .collect();
        assert_eq!(upcoming_ids, vec!["RSV10102", "RSV10110"]);

        let finished_ids: Vec<&str> = buckets
            .finished
            .iter()
            .map(|entry| entry.id.as_str())
            .collect();
        assert_eq!(finished_ids, vec!["RSV10105", "RSV10094"]);
    }

    #[test]
    fn partition_is_idempotent_for_an_unchanged_source() {
        let schedule = sample();
        assert_eq!(partition_schedule(&schedule), partition_schedule(&schedule));
    }

    #[test]
    fn two_upcoming_one_finished_yields_expected_cardinalities() {
        let schedule = vec![
            appointment("RSV10102", 25, AppointmentStatus::Upcoming),
            appointment("RSV10105", 20, AppointmentStatus::Finished),
            appointment("RSV10110", 27, AppointmentStatus::Upcoming),
        ];
        let buckets = partition_schedule(&schedule);
        assert_eq!(buckets.upcoming.len(), 2);
        assert_eq!(buckets.finished.len(), 1);
    }

    #[test]
    fn source_changes_are_reflected_on_recompute() {
        let mut schedule = sample();
        let before = partition_schedule(&schedule).upcoming.len();
        schedule.remove(0);
        let after = partition_schedule(&schedule).upcoming.len();
        assert_eq!(after, before - 1);
    }

    #[test]
    fn empty_schedule_yields_empty_buckets() {
        let buckets = partition_schedule(&[]);
        assert!(buckets.is_empty());
        assert_eq!(buckets.bucket(AppointmentStatus::Upcoming).len(), 0);
    }
}
