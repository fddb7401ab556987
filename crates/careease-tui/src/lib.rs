// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use careease_app::{
    AdminId, AdminProfile, AppCommand, AppMode, AppState, Appointment, AppointmentStatus, Doctor,
    DoctorField, DoctorFormInput, EditSession, FetchError, FetchTicket, FormKind, NewDoctor,
    PaymentEvent, PaymentFlow, PaymentStage, PaymentState, ProfileField, Remote, Route,
    SETTLE_DELAY, partition_schedule, validate_profile,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const SIDEBAR_WIDTH: u16 = 24;
const SIDEBAR_WIDTH_COLLAPSED: u16 = 6;
const ACTIVE_MARK: &str = "> ";
const SIDEBAR_FALLBACK: &str = "Hospital name";

/// Everything the front end asks of the outside world. `load_*`/`save_*`
/// are the blocking calls; the `spawn_*` defaults run them inline and
/// deliver the outcome through the internal event channel, so a runtime
/// can move them onto a thread without the UI caring.
pub trait AppRuntime {
    fn load_profile(&mut self, id: AdminId) -> Result<AdminProfile, FetchError>;
    fn save_profile(&mut self, profile: &AdminProfile) -> Result<AdminProfile, FetchError>;
    fn load_roster(&mut self, id: AdminId) -> Result<Vec<Doctor>, FetchError>;
    fn load_schedule(&mut self, id: AdminId) -> Result<Vec<Appointment>, FetchError>;
    fn create_doctor(&mut self, id: AdminId, doctor: &NewDoctor) -> Result<Doctor, FetchError>;

    fn spawn_profile_fetch(
        &mut self,
        ticket: FetchTicket,
        id: AdminId,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let result = self.load_profile(id);
        tx.send(InternalEvent::ProfileLoaded { ticket, result })
            .map_err(|_| anyhow::anyhow!("internal event channel closed"))?;
        Ok(())
    }

    fn spawn_roster_fetch(
        &mut self,
        ticket: FetchTicket,
        id: AdminId,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let result = self.load_roster(id);
        tx.send(InternalEvent::RosterLoaded { ticket, result })
            .map_err(|_| anyhow::anyhow!("internal event channel closed"))?;
        Ok(())
    }

    fn spawn_schedule_fetch(
        &mut self,
        ticket: FetchTicket,
        id: AdminId,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let result = self.load_schedule(id);
        tx.send(InternalEvent::ScheduleLoaded { ticket, result })
            .map_err(|_| anyhow::anyhow!("internal event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    ProfileLoaded {
        ticket: FetchTicket,
        result: Result<AdminProfile, FetchError>,
    },
    RosterLoaded {
        ticket: FetchTicket,
        result: Result<Vec<Doctor>, FetchError>,
    },
    ScheduleLoaded {
        ticket: FetchTicket,
        result: Result<Vec<Appointment>, FetchError>,
    },
    PaymentSettled {
        ticket: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProfileEditUiState {
    session: EditSession<AdminProfile>,
    field: usize,
    // Text buffer for the field under the cursor; written back to the
    // draft when the cursor moves or the form is saved. Editing through
    // the record directly would re-normalize list fields on every
    // keystroke and eat the comma you just typed.
    buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct DoctorFormUiState {
    input: DoctorFormInput,
    field: usize,
}

#[derive(Debug, Default)]
struct ViewData {
    profile: Remote<AdminProfile>,
    profile_gate: careease_app::FetchGate,
    roster: Remote<Vec<Doctor>>,
    roster_gate: careease_app::FetchGate,
    schedule: Remote<Vec<Appointment>>,
    schedule_gate: careease_app::FetchGate,
    profile_edit: Option<ProfileEditUiState>,
    doctor_form: Option<DoctorFormUiState>,
    payment: PaymentFlow,
    roster_cursor: usize,
    schedule_cursor: usize,
    help_visible: bool,
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    // The sidebar needs the profile on every route.
    request_profile(state, runtime, &mut view_data, &internal_tx);
    load_route_data(state, runtime, &mut view_data, &internal_tx);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::ProfileLoaded { ticket, result } => {
                // A ticket other than the latest one belongs to a request
                // that has been superseded; its payload must not land.
                if !view_data.profile_gate.admits(ticket) {
                    continue;
                }
                if let Err(error) = &result {
                    emit_status(state, view_data, tx, format!("profile load failed: {error}"));
                }
                view_data.profile = Remote::from_result(result);
            }
            InternalEvent::RosterLoaded { ticket, result } => {
                if !view_data.roster_gate.admits(ticket) {
                    continue;
                }
                if let Err(error) = &result {
                    emit_status(state, view_data, tx, format!("staff load failed: {error}"));
                }
                view_data.roster = Remote::from_result(result);
                clamp_cursors(view_data);
            }
            InternalEvent::ScheduleLoaded { ticket, result } => {
                if !view_data.schedule_gate.admits(ticket) {
                    continue;
                }
                if let Err(error) = &result {
                    emit_status(state, view_data, tx, format!("schedule load failed: {error}"));
                }
                view_data.schedule = Remote::from_result(result);
                clamp_cursors(view_data);
            }
            InternalEvent::PaymentSettled { ticket } => {
                if let Some(PaymentEvent::Settled(id)) = view_data.payment.settle(ticket) {
                    if let Some(schedule) = view_data.schedule.ready_mut()
                        && let Some(entry) = schedule.iter_mut().find(|entry| entry.id == id)
                    {
                        entry.payment = PaymentState::Paid;
                    }
                    emit_status(
                        state,
                        view_data,
                        tx,
                        format!("payment recorded for {}", id.as_str()),
                    );
                }
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn spawn_payment_timer(internal_tx: &Sender<InternalEvent>, ticket: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(SETTLE_DELAY);
        let _ = sender.send(InternalEvent::PaymentSettled { ticket });
    });
}

fn request_profile<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let ticket = view_data.profile_gate.issue();
    view_data.profile = Remote::Loading;
    if let Err(error) = runtime.spawn_profile_fetch(ticket, state.admin_id, internal_tx.clone()) {
        emit_status(state, view_data, internal_tx, format!("profile load failed: {error}"));
    }
}

fn request_roster<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let ticket = view_data.roster_gate.issue();
    view_data.roster = Remote::Loading;
    if let Err(error) = runtime.spawn_roster_fetch(ticket, state.admin_id, internal_tx.clone()) {
        emit_status(state, view_data, internal_tx, format!("staff load failed: {error}"));
    }
}

fn request_schedule<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let ticket = view_data.schedule_gate.issue();
    view_data.schedule = Remote::Loading;
    if let Err(error) = runtime.spawn_schedule_fetch(ticket, state.admin_id, internal_tx.clone()) {
        emit_status(state, view_data, internal_tx, format!("schedule load failed: {error}"));
    }
}

/// Fetch whatever the active route renders, unless it is already here.
/// Re-entering a route after a failure retries the fetch.
fn load_route_data<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match state.route {
        Route::Staff => {
            if view_data.roster.ready().is_none() {
                request_roster(state, runtime, view_data, internal_tx);
            }
        }
        Route::Schedule => {
            if view_data.schedule.ready().is_none() {
                request_schedule(state, runtime, view_data, internal_tx);
            }
        }
        Route::Dashboard => {
            if view_data.roster.ready().is_none() {
                request_roster(state, runtime, view_data, internal_tx);
            }
            if view_data.schedule.ready().is_none() {
                request_schedule(state, runtime, view_data, internal_tx);
            }
        }
        Route::Profile | Route::Reservations | Route::Beds | Route::Treatment => {}
    }
}

fn reload_all<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    request_profile(state, runtime, view_data, internal_tx);
    match state.route {
        Route::Staff => request_roster(state, runtime, view_data, internal_tx),
        Route::Schedule => request_schedule(state, runtime, view_data, internal_tx),
        Route::Dashboard => {
            request_roster(state, runtime, view_data, internal_tx);
            request_schedule(state, runtime, view_data, internal_tx);
        }
        Route::Profile | Route::Reservations | Route::Beds | Route::Treatment => {}
    }
}

fn clamp_cursors(view_data: &mut ViewData) {
    let roster_len = view_data.roster.ready().map_or(0, Vec::len);
    view_data.roster_cursor = view_data.roster_cursor.min(roster_len.saturating_sub(1));
    let schedule_len = view_data.schedule.ready().map_or(0, Vec::len);
    view_data.schedule_cursor = view_data
        .schedule_cursor
        .min(schedule_len.saturating_sub(1));
}

/// Schedule entries in display order: the upcoming bucket, then finished.
fn schedule_entries(schedule: &[Appointment]) -> Vec<&Appointment> {
    let buckets = partition_schedule(schedule);
    buckets
        .upcoming
        .iter()
        .chain(buckets.finished.iter())
        .copied()
        .collect()
}

fn selected_appointment(view_data: &ViewData) -> Option<Appointment> {
    let schedule = view_data.schedule.ready()?;
    schedule_entries(schedule)
        .get(view_data.schedule_cursor)
        .copied()
        .cloned()
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if view_data.payment.is_open() {
        handle_payment_key(state, view_data, internal_tx, key);
        return false;
    }

    match state.mode {
        AppMode::Edit => {
            handle_profile_edit_key(state, runtime, view_data, internal_tx, key);
            return false;
        }
        AppMode::Form(FormKind::Doctor) => {
            handle_doctor_form_key(state, runtime, view_data, internal_tx, key);
            return false;
        }
        AppMode::Nav => {}
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('f'), KeyModifiers::NONE) => {
            state.dispatch(AppCommand::NextRoute);
            load_route_data(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('b'), KeyModifiers::NONE) => {
            state.dispatch(AppCommand::PrevRoute);
            load_route_data(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('t'), KeyModifiers::NONE) => {
            state.dispatch(AppCommand::ToggleSidebar);
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => {
            reload_all(state, runtime, view_data, internal_tx);
            emit_status(state, view_data, internal_tx, "reloading");
        }
        (KeyCode::Char('?'), KeyModifiers::NONE) => {
            view_data.help_visible = true;
        }
        _ => handle_route_key(state, runtime, view_data, internal_tx, key),
    }
    false
}

fn handle_route_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match state.route {
        Route::Profile => {
            if key.code == KeyCode::Char('e') {
                begin_profile_edit(state, view_data, internal_tx);
            }
        }
        Route::Staff => match key.code {
            KeyCode::Char('a') => {
                view_data.doctor_form = Some(DoctorFormUiState::default());
                state.dispatch(AppCommand::OpenForm(FormKind::Doctor));
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = view_data.roster.ready().map_or(0, Vec::len);
                if view_data.roster_cursor + 1 < len {
                    view_data.roster_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                view_data.roster_cursor = view_data.roster_cursor.saturating_sub(1);
            }
            _ => {}
        },
        Route::Schedule => match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let len = view_data.schedule.ready().map_or(0, Vec::len);
                if view_data.schedule_cursor + 1 < len {
                    view_data.schedule_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                view_data.schedule_cursor = view_data.schedule_cursor.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('p') => {
                open_payment_modal(state, view_data, internal_tx);
            }
            _ => {}
        },
        Route::Dashboard | Route::Reservations | Route::Beds | Route::Treatment => {}
    }
}

fn open_payment_modal(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(appointment) = selected_appointment(view_data) else {
        emit_status(state, view_data, internal_tx, "no appointment selected");
        return;
    };
    let id = appointment.id.clone();
    if view_data.payment.select(appointment).is_none() {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("no payment due for {}", id.as_str()),
        );
    }
}

fn handle_payment_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            if view_data.payment.cancel().is_none() && view_data.payment.is_pending() {
                emit_status(state, view_data, internal_tx, "payment already in progress");
            }
        }
        KeyCode::Enter => {
            if let Some(PaymentEvent::Started { ticket }) = view_data.payment.confirm() {
                spawn_payment_timer(internal_tx, ticket);
                emit_status(state, view_data, internal_tx, "processing payment");
            }
        }
        _ => {}
    }
}

fn begin_profile_edit(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(profile) = view_data.profile.ready() else {
        emit_status(state, view_data, internal_tx, "profile is not loaded yet");
        return;
    };
    let session = EditSession::begin(profile.clone());
    let buffer = ProfileField::ALL[0].get(session.draft());
    view_data.profile_edit = Some(ProfileEditUiState {
        session,
        field: 0,
        buffer,
    });
    state.dispatch(AppCommand::EnterEditMode);
}

fn handle_profile_edit_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            if let Some(edit) = view_data.profile_edit.take() {
                view_data.profile = Remote::Ready(edit.session.cancel());
            }
            state.dispatch(AppCommand::ExitToNav);
            emit_status(state, view_data, internal_tx, "edit canceled");
        }
        KeyCode::Enter => save_profile_edit(state, runtime, view_data, internal_tx),
        KeyCode::Down | KeyCode::Tab => move_profile_field(view_data, 1),
        KeyCode::Up | KeyCode::BackTab => move_profile_field(view_data, -1),
        KeyCode::Backspace => {
            if let Some(edit) = view_data.profile_edit.as_mut() {
                edit.buffer.pop();
            }
        }
        KeyCode::Char(ch) => {
            if let Some(edit) = view_data.profile_edit.as_mut() {
                edit.buffer.push(ch);
            }
        }
        _ => {}
    }
}

fn move_profile_field(view_data: &mut ViewData, delta: isize) {
    let Some(edit) = view_data.profile_edit.as_mut() else {
        return;
    };
    let field = ProfileField::ALL[edit.field];
    field.set(edit.session.draft_mut(), &edit.buffer);

    let len = ProfileField::ALL.len() as isize;
    edit.field = (edit.field as isize + delta).rem_euclid(len) as usize;
    edit.buffer = ProfileField::ALL[edit.field].get(edit.session.draft());
}

fn save_profile_edit<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let draft = {
        let Some(edit) = view_data.profile_edit.as_mut() else {
            return;
        };
        ProfileField::ALL[edit.field].set(edit.session.draft_mut(), &edit.buffer);
        edit.session.draft().clone()
    };

    if let Err(error) = validate_profile(&draft) {
        emit_status(state, view_data, internal_tx, error.to_string());
        return;
    }

    // The whole draft travels; the server's echo is authoritative.
    match runtime.save_profile(&draft) {
        Ok(saved) => {
            let adopted = match view_data.profile_edit.take() {
                Some(edit) => edit.session.commit(saved),
                None => saved,
            };
            view_data.profile = Remote::Ready(adopted);
            state.dispatch(AppCommand::ExitToNav);
            emit_status(state, view_data, internal_tx, "profile saved");
        }
        Err(error) => {
            // Stay in edit mode so nothing typed is lost.
            emit_status(state, view_data, internal_tx, format!("save failed: {error}"));
        }
    }
}

fn handle_doctor_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            view_data.doctor_form = None;
            state.dispatch(AppCommand::ExitToNav);
            emit_status(state, view_data, internal_tx, "form discarded");
        }
        KeyCode::Enter => submit_doctor_form(state, runtime, view_data, internal_tx),
        KeyCode::Down | KeyCode::Tab => move_doctor_field(view_data, 1),
        KeyCode::Up | KeyCode::BackTab => move_doctor_field(view_data, -1),
        KeyCode::Backspace => {
            if let Some(form) = view_data.doctor_form.as_mut() {
                let field = DoctorField::ALL[form.field];
                if field.takes_text() {
                    let mut value = form.input.field(field);
                    value.pop();
                    form.input.set_field(field, &value);
                }
            }
        }
        KeyCode::Char(ch) => {
            if let Some(form) = view_data.doctor_form.as_mut() {
                let field = DoctorField::ALL[form.field];
                match field {
                    DoctorField::Days => {
                        if let Some(index) = ch.to_digit(10)
                            && (1..=7).contains(&index)
                        {
                            form.input.toggle_day(index as usize - 1);
                        }
                    }
                    DoctorField::Employment => {
                        if ch == ' ' {
                            form.input.toggle_employment();
                        }
                    }
                    _ => {
                        let mut value = form.input.field(field);
                        value.push(ch);
                        form.input.set_field(field, &value);
                    }
                }
            }
        }
        _ => {}
    }
}

fn move_doctor_field(view_data: &mut ViewData, delta: isize) {
    if let Some(form) = view_data.doctor_form.as_mut() {
        let len = DoctorField::ALL.len() as isize;
        form.field = (form.field as isize + delta).rem_euclid(len) as usize;
    }
}

fn submit_doctor_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let submission = match view_data.doctor_form.as_ref() {
        Some(form) => match form.input.to_new_doctor() {
            Ok(submission) => submission,
            Err(error) => {
                emit_status(state, view_data, internal_tx, error.to_string());
                return;
            }
        },
        None => return,
    };

    match runtime.create_doctor(state.admin_id, &submission) {
        Ok(doctor) => {
            view_data.doctor_form = None;
            let name = doctor.name.clone();
            if let Some(roster) = view_data.roster.ready_mut() {
                roster.push(doctor);
            }
            state.dispatch(AppCommand::ExitToNav);
            emit_status(state, view_data, internal_tx, format!("{name} added"));
        }
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("add doctor failed: {error}"));
        }
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());

    let sidebar_width = if state.sidebar_collapsed {
        SIDEBAR_WIDTH_COLLAPSED
    } else {
        SIDEBAR_WIDTH
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
        .split(rows[0]);

    let sidebar = Paragraph::new(sidebar_text(state, view_data)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("CareEase")
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(sidebar, columns[0]);

    let body = Paragraph::new(body_text(state, view_data)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(state.route.label()),
    );
    frame.render_widget(body, columns[1]);

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, rows[1]);

    if view_data.payment.is_open() {
        let area = centered_rect(50, 34, frame.area());
        frame.render_widget(Clear, area);
        let modal = Paragraph::new(payment_overlay_text(&view_data.payment)).block(
            Block::default()
                .title("payment")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(modal, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 68, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn body_text(state: &AppState, view_data: &ViewData) -> String {
    match state.mode {
        AppMode::Edit => render_profile_edit_text(view_data),
        AppMode::Form(FormKind::Doctor) => render_doctor_form_text(view_data),
        AppMode::Nav => match state.route {
            Route::Dashboard => render_dashboard_text(view_data),
            Route::Profile => render_profile_text(view_data),
            Route::Staff => render_staff_text(view_data),
            Route::Schedule => render_schedule_text(view_data),
            Route::Reservations | Route::Beds | Route::Treatment => {
                format!("{} has no terminal view yet", state.route.label())
            }
        },
    }
}

/// Hospital line plus the nav links. The hospital name comes from the same
/// profile state the pages render; until it is `Ready` (or if the fetch
/// failed) the fixed fallback label shows instead.
fn sidebar_text(state: &AppState, view_data: &ViewData) -> String {
    let hospital = view_data
        .profile
        .ready()
        .and_then(AdminProfile::hospital_name)
        .unwrap_or(SIDEBAR_FALLBACK);

    let mut lines = Vec::new();
    if state.sidebar_collapsed {
        lines.push(hospital.chars().next().unwrap_or('?').to_string());
        lines.push(String::new());
        for route in Route::ALL {
            let marker = if route == state.route { ACTIVE_MARK } else { "  " };
            let glyph = route.label().chars().next().unwrap_or('?');
            lines.push(format!("{marker}{glyph}"));
        }
    } else {
        lines.push(hospital.to_owned());
        lines.push(String::new());
        for route in Route::ALL {
            let marker = if route == state.route { ACTIVE_MARK } else { "  " };
            lines.push(format!("{marker}{}", route.label()));
        }
    }
    lines.join("\n")
}

fn render_dashboard_text(view_data: &ViewData) -> String {
    let doctors = match view_data.roster.ready() {
        Some(roster) => roster.len().to_string(),
        None => "...".to_owned(),
    };
    let (upcoming, finished, open_balances) = match view_data.schedule.ready() {
        Some(schedule) => {
            let buckets = partition_schedule(schedule);
            let open = schedule.iter().filter(|entry| entry.payable()).count();
            (
                buckets.upcoming.len().to_string(),
                buckets.finished.len().to_string(),
                open.to_string(),
            )
        }
        None => ("...".to_owned(), "...".to_owned(), "...".to_owned()),
    };

    [
        format!("doctors on staff: {doctors}"),
        format!("upcoming appointments: {upcoming}"),
        format!("finished appointments: {finished}"),
        format!("open balances: {open_balances}"),
    ]
    .join("\n")
}

fn render_profile_text(view_data: &ViewData) -> String {
    match &view_data.profile {
        Remote::Loading => "loading profile...".to_owned(),
        Remote::Failed(error) => {
            // Field labels render with nothing in them; the cause is shown
            // in place of data that does not exist.
            let mut lines: Vec<String> = ProfileField::ALL
                .iter()
                .map(|field| format!("{}:", field.label()))
                .collect();
            lines.push("last login:".to_owned());
            lines.push(String::new());
            lines.push(format!("load failed: {error}"));
            lines.join("\n")
        }
        Remote::Ready(profile) => {
            let mut lines: Vec<String> = ProfileField::ALL
                .iter()
                .map(|field| format!("{}: {}", field.label(), field.get(profile)))
                .collect();
            lines.push(format!("last login: {}", profile.last_login));
            if let Some(hospital) = profile.hospital_name() {
                lines.push(format!("hospital: {hospital}"));
            }
            lines.push(String::new());
            lines.push("e edit".to_owned());
            lines.join("\n")
        }
    }
}

fn render_profile_edit_text(view_data: &ViewData) -> String {
    let Some(edit) = view_data.profile_edit.as_ref() else {
        return String::new();
    };
    ProfileField::ALL
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let marker = if index == edit.field { ACTIVE_MARK } else { "  " };
            let value = if index == edit.field {
                edit.buffer.clone()
            } else {
                field.get(edit.session.draft())
            };
            format!("{marker}{}: {value}", field.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_staff_text(view_data: &ViewData) -> String {
    match &view_data.roster {
        Remote::Loading => "loading staff...".to_owned(),
        Remote::Failed(error) => format!("load failed: {error}"),
        Remote::Ready(roster) if roster.is_empty() => {
            "no doctors on the roster -- a adds one".to_owned()
        }
        Remote::Ready(roster) => {
            let mut lines = Vec::new();
            for (index, doctor) in roster.iter().enumerate() {
                let marker = if index == view_data.roster_cursor {
                    ACTIVE_MARK
                } else {
                    "  "
                };
                lines.push(format!(
                    "{marker}{} ({}) -- {}",
                    doctor.name,
                    doctor.specialization,
                    doctor.employment.as_str()
                ));
                lines.push(format!(
                    "    {} | {} | speaks {}",
                    doctor.assigned_treatment,
                    doctor.experience,
                    doctor.languages.join(", ")
                ));
                lines.push(String::new());
            }
            lines.join("\n")
        }
    }
}

fn render_doctor_form_text(view_data: &ViewData) -> String {
    let Some(form) = view_data.doctor_form.as_ref() else {
        return String::new();
    };
    let mut lines = vec!["new doctor".to_owned(), String::new()];
    for (index, field) in DoctorField::ALL.iter().enumerate() {
        let marker = if index == form.field { ACTIVE_MARK } else { "  " };
        lines.push(format!(
            "{marker}{}: {}",
            field.label(),
            form.input.field(*field)
        ));
    }
    lines.join("\n")
}

fn render_schedule_text(view_data: &ViewData) -> String {
    match &view_data.schedule {
        Remote::Loading => "loading schedule...".to_owned(),
        Remote::Failed(error) => format!("load failed: {error}"),
        Remote::Ready(schedule) => {
            let buckets = partition_schedule(schedule);
            let mut lines = Vec::new();
            let mut index = 0;

            for status in AppointmentStatus::ALL {
                let bucket = buckets.bucket(status);
                lines.push(format!("{} ({})", status.label(), bucket.len()));
                for appointment in bucket {
                    let marker = if index == view_data.schedule_cursor {
                        ACTIVE_MARK
                    } else {
                        "  "
                    };
                    lines.push(format!(
                        "{marker}{}  {}  {} [{}]",
                        appointment.date_badge(),
                        appointment.time_range,
                        appointment.title,
                        appointment.visit_type.as_str()
                    ));
                    lines.push(format!("    {}", appointment.details));
                    match appointment.payment {
                        PaymentState::Due { amount_cents } if appointment.payable() => {
                            lines.push(format!("    pay {}", format_money(amount_cents)));
                        }
                        PaymentState::Paid => lines.push("    PAID".to_owned()),
                        _ => {}
                    }
                    index += 1;
                }
                lines.push(String::new());
            }
            lines.join("\n")
        }
    }
}

fn payment_overlay_text(payment: &PaymentFlow) -> String {
    match payment.stage() {
        PaymentStage::Closed => String::new(),
        PaymentStage::Open { appointment } => {
            let amount = appointment
                .payment
                .amount_cents()
                .map_or_else(String::new, format_money);
            [
                appointment.title.clone(),
                format!("{}  {}", appointment.date_badge(), appointment.time_range),
                String::new(),
                format!("amount due: {amount}"),
                String::new(),
                "enter pay  esc cancel".to_owned(),
            ]
            .join("\n")
        }
        PaymentStage::Pending { appointment, .. } => [
            appointment.title.clone(),
            String::new(),
            "processing payment...".to_owned(),
        ]
        .join("\n"),
    }
}

fn help_overlay_text() -> String {
    [
        "f/b      next/previous section",
        "t        collapse/expand sidebar",
        "r        reload",
        "e        edit profile (profile section)",
        "a        add doctor (staff section)",
        "j/k      move selection",
        "enter    open payment / confirm",
        "esc      cancel / close",
        "ctrl-q   quit",
    ]
    .join("\n")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if let Some(line) = &state.status_line {
        return line.clone();
    }
    if view_data.payment.is_open() {
        return "enter confirm  esc cancel".to_owned();
    }
    match state.mode {
        AppMode::Edit => "tab next field  enter save  esc cancel".to_owned(),
        AppMode::Form(FormKind::Doctor) => {
            "tab next field  1-7 toggle day  space toggle type  enter submit  esc discard"
                .to_owned()
        }
        AppMode::Nav => {
            let extra = match state.route {
                Route::Profile => "  e edit",
                Route::Staff => "  a add doctor  j/k select",
                Route::Schedule => "  j/k select  enter pay",
                _ => "",
            };
            format!("f/b section  t sidebar  r reload  ? help  ctrl-q quit{extra}")
        }
    }
}

fn format_money(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
