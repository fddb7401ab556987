// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::AdminId;

/// Sections reachable from the navigation shell. The active entry is
/// decided by comparing `Route` values, never display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Reservations,
    Beds,
    Staff,
    Treatment,
    Schedule,
    Profile,
}

impl Route {
    pub const ALL: [Self; 7] = [
        Self::Dashboard,
        Self::Reservations,
        Self::Beds,
        Self::Staff,
        Self::Treatment,
        Self::Schedule,
        Self::Profile,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Reservations => "Reservations",
            Self::Beds => "Beds availability",
            Self::Staff => "Staff List",
            Self::Treatment => "Treatment",
            Self::Schedule => "Schedules",
            Self::Profile => "Profile",
        }
    }

    /// Path segment with the admin id embedded, mirroring the backend's
    /// routing scheme (`/admin-dashboard/{id}`).
    pub fn path(self, admin_id: AdminId) -> String {
        let segment = match self {
            Self::Dashboard => "admin-dashboard",
            Self::Reservations => "admin-reservations",
            Self::Beds => "admin-beds",
            Self::Staff => "admin-staff",
            Self::Treatment => "admin-treatment",
            Self::Schedule => "admin-schedules",
            Self::Profile => "admin-profile",
        };
        format!("/{segment}/{}", admin_id.get())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Doctor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Edit,
    Form(FormKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub route: Route,
    pub admin_id: AdminId,
    pub sidebar_collapsed: bool,
    pub status_line: Option<String>,
}

impl AppState {
    pub fn new(admin_id: AdminId) -> Self {
        Self {
            mode: AppMode::Nav,
            route: Route::Dashboard,
            admin_id,
            sidebar_collapsed: false,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextRoute,
    PrevRoute,
    SetRoute(Route),
    EnterEditMode,
    ExitToNav,
    OpenForm(FormKind),
    ToggleSidebar,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    RouteChanged(Route),
    SidebarToggled(bool),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextRoute => self.rotate_route(1),
            AppCommand::PrevRoute => self.rotate_route(-1),
            AppCommand::SetRoute(route) => {
                if self.route == route {
                    return Vec::new();
                }
                self.route = route;
                self.mode = AppMode::Nav;
                vec![AppEvent::RouteChanged(route)]
            }
            AppCommand::EnterEditMode => {
                self.mode = AppMode::Edit;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenForm(kind) => {
                self.mode = AppMode::Form(kind);
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ToggleSidebar => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
                vec![AppEvent::SidebarToggled(self.sidebar_collapsed)]
            }
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_route(&mut self, delta: isize) -> Vec<AppEvent> {
        let routes = Route::ALL;
        let current = routes
            .iter()
            .position(|route| *route == self.route)
            .unwrap_or(0) as isize;
        let len = routes.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.route = routes[next];
        self.mode = AppMode::Nav;
        vec![AppEvent::RouteChanged(self.route)]
    }
}
