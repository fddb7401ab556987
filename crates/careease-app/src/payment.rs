// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::Duration;

use crate::{Appointment, AppointmentId};

/// Stand-in settle delay for the unimplemented payment gateway.
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentStage {
    #[default]
    Closed,
    Open {
        appointment: Appointment,
    },
    Pending {
        appointment: Appointment,
        ticket: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    Opened(AppointmentId),
    Dismissed,
    Started { ticket: u64 },
    Settled(AppointmentId),
}

/// Payment confirmation modal. Closed -> Open on selection, Open -> Closed
/// on cancel, Open -> Pending on confirm. Pending runs to completion: the
/// only way out is a settle event carrying the ticket issued at confirm
/// time, so a settle from an abandoned confirmation cannot close a newer
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentFlow {
    stage: PaymentStage,
    next_ticket: u64,
}

impl PaymentFlow {
    pub const fn stage(&self) -> &PaymentStage {
        &self.stage
    }

    pub const fn is_open(&self) -> bool {
        !matches!(self.stage, PaymentStage::Closed)
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self.stage, PaymentStage::Pending { .. })
    }

    pub fn selected(&self) -> Option<&Appointment> {
        match &self.stage {
            PaymentStage::Closed => None,
            PaymentStage::Open { appointment } | PaymentStage::Pending { appointment, .. } => {
                Some(appointment)
            }
        }
    }

    /// Closed -> Open. Rejected while a flow is already underway or when
    /// the appointment has no open balance.
    pub fn select(&mut self, appointment: Appointment) -> Option<PaymentEvent> {
        if !matches!(self.stage, PaymentStage::Closed) || !appointment.payable() {
            return None;
        }
        let id = appointment.id.clone();
        self.stage = PaymentStage::Open { appointment };
        Some(PaymentEvent::Opened(id))
    }

    /// Open -> Closed, discarding the selection. Ignored mid-Pending: the
    /// simulated gateway call always runs to completion.
    pub fn cancel(&mut self) -> Option<PaymentEvent> {
        match self.stage {
            PaymentStage::Open { .. } => {
                self.stage = PaymentStage::Closed;
                Some(PaymentEvent::Dismissed)
            }
            PaymentStage::Closed | PaymentStage::Pending { .. } => None,
        }
    }

    /// Open -> Pending. The returned ticket arms the settle timer.
    pub fn confirm(&mut self) -> Option<PaymentEvent> {
        let PaymentStage::Open { appointment } = std::mem::take(&mut self.stage) else {
            return None;
        };
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.stage = PaymentStage::Pending { appointment, ticket };
        Some(PaymentEvent::Started { ticket })
    }

    /// Pending -> Closed when the ticket matches the in-flight one; stale
    /// tickets are dropped.
    pub fn settle(&mut self, ticket: u64) -> Option<PaymentEvent> {
        match &self.stage {
            PaymentStage::Pending {
                appointment,
                ticket: pending,
            } if *pending == ticket => {
                let id = appointment.id.clone();
                self.stage = PaymentStage::Closed;
                Some(PaymentEvent::Settled(id))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PaymentEvent, PaymentFlow, PaymentStage};
    use crate::{
        Appointment, AppointmentId, AppointmentStatus, PaymentState, VisitType,
    };
    use time::{Date, Month};

    fn payable_appointment() -> Appointment {
        Appointment {
            id: AppointmentId::new("RSV10105"),
            date: Date::from_calendar_date(2026, Month::April, 20).expect("valid date"),
            time_range: "09:00 - 10:00 AM".to_owned(),
            title: "Simple extractions".to_owned(),
            visit_type: VisitType::Multiple,
            details: "Visit #2 - Simple extractions (Q1+Q2)".to_owned(),
            hospital: "Zendral Dental".to_owned(),
            status: AppointmentStatus::Finished,
            payment: PaymentState::Due { amount_cents: 24_000 },
        }
    }

    #[test]
    fn select_opens_with_the_chosen_appointment() {
        let mut flow = PaymentFlow::default();
        let appointment = payable_appointment();

        let event = flow.select(appointment.clone());
        assert_eq!(event, Some(PaymentEvent::Opened(appointment.id.clone())));
        assert_eq!(flow.selected(), Some(&appointment));
    }

    #[test]
    fn select_rejects_appointments_without_an_open_balance() {
        let mut flow = PaymentFlow::default();
        let mut paid = payable_appointment();
        paid.payment = PaymentState::Paid;

        assert_eq!(flow.select(paid), None);
        assert_eq!(flow.stage(), &PaymentStage::Closed);
    }

    #[test]
    fn cancel_from_open_discards_the_selection() {
        let mut flow = PaymentFlow::default();
        flow.select(payable_appointment());

        assert_eq!(flow.cancel(), Some(PaymentEvent::Dismissed));
        assert_eq!(flow.selected(), None);
        assert_eq!(flow.stage(), &PaymentStage::Closed);
    }

    #[test]
    fn confirm_then_settle_runs_the_full_flow() {
        let mut flow = PaymentFlow::default();
        let appointment = payable_appointment();
        flow.select(appointment.clone());

        let Some(PaymentEvent::Started { ticket }) = flow.confirm() else {
            panic!("confirm should start settlement");
        };
        assert!(flow.is_pending());
        // The selection stays observable while pending.
        assert_eq!(flow.selected(), Some(&appointment));

        assert_eq!(
            flow.settle(ticket),
            Some(PaymentEvent::Settled(appointment.id))
        );
        assert_eq!(flow.stage(), &PaymentStage::Closed);
    }

    #[test]
    fn cancel_mid_pending_is_not_supported() {
        let mut flow = PaymentFlow::default();
        flow.select(payable_appointment());
        flow.confirm();

        assert_eq!(flow.cancel(), None);
        assert!(flow.is_pending());
    }

    #[test]
    fn stale_settle_tickets_are_ignored() {
        let mut flow = PaymentFlow::default();
        flow.select(payable_appointment());
        let Some(PaymentEvent::Started { ticket: first }) = flow.confirm() else {
            panic!("confirm should start settlement");
        };
        flow.settle(first);

        // A second flow issues a fresh ticket; the old one must not settle it.
        flow.select(payable_appointment());
        let Some(PaymentEvent::Started { ticket: second }) = flow.confirm() else {
            panic!("confirm should start settlement");
        };
        assert_ne!(first, second);
        assert_eq!(flow.settle(first), None);
        assert!(flow.is_pending());
        assert!(flow.settle(second).is_some());
    }

    #[test]
    fn confirm_and_settle_require_the_right_stage() {
        let mut flow = PaymentFlow::default();
        assert_eq!(flow.confirm(), None);
        assert_eq!(flow.settle(1), None);
        assert!(!flow.is_open());
    }
}
