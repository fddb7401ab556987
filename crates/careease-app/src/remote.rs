// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::error::Error;
use std::fmt;

/// Why a backend request failed. Connection-level trouble and non-success
/// status codes stay distinguishable all the way to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Network(String),
    Http { status: u16, detail: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(detail) => write!(f, "backend unreachable: {detail}"),
            Self::Http { status, detail } if detail.is_empty() => {
                write!(f, "backend returned {status}")
            }
            Self::Http { status, detail } => {
                write!(f, "backend returned {status}: {detail}")
            }
        }
    }
}

impl Error for FetchError {}

/// Three-way outcome of an asynchronous fetch. Rendering matches on this
/// exhaustively; there is no null or placeholder-object fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Remote<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> Remote<T> {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Loading | Self::Ready(_) => None,
        }
    }

    pub fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(error) => Self::Failed(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Request fencing for one remote slot. Each issued ticket supersedes the
/// previous one; a delivery is admitted only when it carries the ticket
/// issued last, so an earlier request resolving late cannot overwrite a
/// newer request's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchGate {
    issued: u64,
}

impl FetchGate {
    pub fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    pub const fn admits(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchError, FetchGate, Remote};

    #[test]
    fn gate_admits_only_latest_ticket() {
        let mut gate = FetchGate::default();
        let first = gate.issue();
        let second = gate.issue();

        assert!(!gate.admits(first));
        assert!(gate.admits(second));
    }

    #[test]
    fn stale_delivery_is_dropped_without_touching_state() {
        let mut gate = FetchGate::default();
        let mut slot: Remote<&str> = Remote::Loading;

        let stale = gate.issue();
        let fresh = gate.issue();

        // Fresh response lands first.
        if gate.admits(fresh) {
            slot = Remote::Ready("fresh");
        }
        // The earlier-issued request resolves afterwards and must lose.
        if gate.admits(stale) {
            slot = Remote::Ready("stale");
        }

        assert_eq!(slot, Remote::Ready("fresh"));
    }

    #[test]
    fn remote_accessors_follow_variant() {
        let ready: Remote<i64> = Remote::Ready(7);
        assert_eq!(ready.ready(), Some(&7));
        assert_eq!(ready.error(), None);

        let failed: Remote<i64> = Remote::Failed(FetchError::Http {
            status: 404,
            detail: String::new(),
        });
        assert_eq!(failed.ready(), None);
        assert!(failed.error().is_some());

        assert!(Remote::<i64>::default().is_loading());
    }

    #[test]
    fn fetch_error_display_keeps_failure_classes_apart() {
        let network = FetchError::Network("connection refused".to_owned());
        assert!(network.to_string().contains("unreachable"));

        let http = FetchError::Http {
            status: 503,
            detail: "maintenance".to_owned(),
        };
        let message = http.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("maintenance"));

        let bare = FetchError::Http {
            status: 500,
            detail: String::new(),
        };
        assert_eq!(bare.to_string(), "backend returned 500");
    }

    #[test]
    fn from_result_maps_both_arms() {
        assert_eq!(Remote::from_result(Ok(1)), Remote::Ready(1));
        assert_eq!(
            Remote::<i64>::from_result(Err(FetchError::Network("timeout".to_owned()))),
            Remote::Failed(FetchError::Network("timeout".to_owned())),
        );
    }
}
