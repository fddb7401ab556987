// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use time::Date;
use time::macros::format_description;
use url::Url;

use careease_app::{
    AdminId, AdminProfile, Appointment, AppointmentId, AppointmentStatus, Doctor, DoctorId,
    EmploymentType, FetchError, Hospital, NewDoctor, PaymentState, VisitType, WORKING_DAYS,
};

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("backend.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("backend.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("backend.base_url must use http or https, got {:?}", parsed.scheme());
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn fetch_admin(&self, id: AdminId) -> Result<AdminProfile, FetchError> {
        let response = self
            .http
            .get(format!("{}/api/admins/{}", self.base_url, id.get()))
            .send()
            .map_err(transport_error)?;

        let wire: ProfileWire = decode_body(response, "admin profile")?;
        Ok(wire.into())
    }

    /// Full-resource replace; the echoed body becomes the new local record.
    pub fn update_admin_profile(&self, profile: &AdminProfile) -> Result<AdminProfile, FetchError> {
        let response = self
            .http
            .put(format!("{}/api/admins/admin-profile/", self.base_url))
            .json(&ProfileWire::from(profile))
            .send()
            .map_err(transport_error)?;

        let wire: ProfileWire = decode_body(response, "updated admin profile")?;
        Ok(wire.into())
    }

    pub fn fetch_roster(&self, id: AdminId) -> Result<Vec<Doctor>, FetchError> {
        let response = self
            .http
            .get(format!("{}/api/admins/{}/doctors", self.base_url, id.get()))
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        let wires: Vec<DoctorWire> = decode_body(response, "staff roster")?;
        wires
            .into_iter()
            .map(|wire| {
                wire.try_into()
                    .map_err(|detail| invalid_record(status, "staff roster", detail))
            })
            .collect()
    }

    pub fn create_doctor(&self, id: AdminId, doctor: &NewDoctor) -> Result<Doctor, FetchError> {
        let response = self
            .http
            .post(format!("{}/api/admins/{}/doctors", self.base_url, id.get()))
            .json(&NewDoctorWire::from(doctor))
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        let wire: DoctorWire = decode_body(response, "created doctor")?;
        wire.try_into()
            .map_err(|detail| invalid_record(status, "created doctor", detail))
    }

    pub fn fetch_schedule(&self, id: AdminId) -> Result<Vec<Appointment>, FetchError> {
        let response = self
            .http
            .get(format!(
                "{}/api/admins/{}/appointments",
                self.base_url,
                id.get()
            ))
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        let wires: Vec<AppointmentWire> = decode_body(response, "schedule")?;
        wires
            .into_iter()
            .map(|wire| {
                wire.try_into()
                    .map_err(|detail| invalid_record(status, "schedule", detail))
            })
            .collect()
    }
}

fn transport_error(error: reqwest::Error) -> FetchError {
    FetchError::Network(error.to_string())
}

/// A body that decoded but cannot be interpreted is reported with the
/// response's real status and the same "malformed" prefix as a JSON decode
/// failure, so the status line never blames the backend for a local
/// rejection.
fn invalid_record(status: StatusCode, what: &str, detail: String) -> FetchError {
    FetchError::Http {
        status: status.as_u16(),
        detail: format!("malformed {what}: {detail}"),
    }
}

fn decode_body<T: serde::de::DeserializeOwned>(
    response: reqwest::blocking::Response,
    what: &str,
) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(status_error(status, &body));
    }
    response.json().map_err(|error| FetchError::Http {
        status: status.as_u16(),
        detail: format!("malformed {what}: {error}"),
    })
}

/// Pull the backend's `{"error": "..."}` envelope out of a failure body;
/// short plain-text bodies pass through, anything else is dropped so raw
/// HTML error pages never reach the status line.
fn status_error(status: StatusCode, body: &str) -> FetchError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(detail) = envelope.error
        && !detail.is_empty()
    {
        return FetchError::Http {
            status: status.as_u16(),
            detail,
        };
    }

    if body.len() < 100 && !body.contains('{') && !body.contains('<') {
        return FetchError::Http {
            status: status.as_u16(),
            detail: body.trim().to_owned(),
        };
    }

    FetchError::Http {
        status: status.as_u16(),
        detail: String::new(),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

/// Per-session profile store. Each admin id is fetched over the network at
/// most once; later lookups are served from memory, and a successful save
/// replaces the entry with the server's echo.
#[derive(Debug)]
pub struct SessionCache {
    client: Client,
    profiles: HashMap<AdminId, AdminProfile>,
}

impl SessionCache {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            profiles: HashMap::new(),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn cached(&self, id: AdminId) -> Option<&AdminProfile> {
        self.profiles.get(&id)
    }

    pub fn profile(&mut self, id: AdminId) -> Result<AdminProfile, FetchError> {
        if let Some(profile) = self.profiles.get(&id) {
            return Ok(profile.clone());
        }
        self.refresh(id)
    }

    /// Bypass the cache and hit the backend; the result replaces any entry.
    pub fn refresh(&mut self, id: AdminId) -> Result<AdminProfile, FetchError> {
        let profile = self.client.fetch_admin(id)?;
        self.profiles.insert(id, profile.clone());
        Ok(profile)
    }

    pub fn save_profile(&mut self, profile: &AdminProfile) -> Result<AdminProfile, FetchError> {
        let updated = self.client.update_admin_profile(profile)?;
        self.profiles.insert(updated.id, updated.clone());
        Ok(updated)
    }

    pub fn store(&mut self, profile: AdminProfile) {
        self.profiles.insert(profile.id, profile);
    }

    pub fn invalidate(&mut self, id: AdminId) {
        self.profiles.remove(&id);
    }
}

// Only id and name are guaranteed; the backend omits fields freely and the
// pages render whatever arrived, so everything else defaults to empty.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileWire {
    id: i64,
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    department: String,
    #[serde(default)]
    last_login: String,
    #[serde(default)]
    profile_pic: String,
    #[serde(default)]
    permissions: Vec<String>,
    #[serde(default)]
    hospital: Option<HospitalWire>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HospitalWire {
    name: String,
}

impl From<ProfileWire> for AdminProfile {
    fn from(wire: ProfileWire) -> Self {
        Self {
            id: AdminId::new(wire.id),
            name: wire.name,
            email: wire.email,
            role: wire.role,
            department: wire.department,
            last_login: wire.last_login,
            profile_pic: wire.profile_pic,
            permissions: wire.permissions,
            hospital: wire.hospital.map(|hospital| Hospital {
                name: hospital.name,
            }),
        }
    }
}

impl From<&AdminProfile> for ProfileWire {
    fn from(profile: &AdminProfile) -> Self {
        Self {
            id: profile.id.get(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            role: profile.role.clone(),
            department: profile.department.clone(),
            last_login: profile.last_login.clone(),
            profile_pic: profile.profile_pic.clone(),
            permissions: profile.permissions.clone(),
            hospital: profile.hospital.as_ref().map(|hospital| HospitalWire {
                name: hospital.name.clone(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DoctorWire {
    id: i64,
    profile_pic: String,
    name: String,
    specialization: String,
    email: String,
    #[serde(default)]
    days: Vec<bool>,
    assigned_treatment: String,
    employment: String,
    experience: String,
    #[serde(default)]
    languages: Vec<String>,
}

impl TryFrom<DoctorWire> for Doctor {
    type Error = String;

    fn try_from(wire: DoctorWire) -> Result<Self, String> {
        let employment = EmploymentType::parse(&wire.employment)
            .ok_or_else(|| format!("unknown employment type {:?}", wire.employment))?;
        Ok(Self {
            id: DoctorId::new(wire.id),
            profile_pic: wire.profile_pic,
            name: wire.name,
            specialization: wire.specialization,
            email: wire.email,
            days: day_flags(&wire.days),
            assigned_treatment: wire.assigned_treatment,
            employment,
            experience: wire.experience,
            languages: wire.languages,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewDoctorWire {
    profile_pic: String,
    name: String,
    specialization: String,
    email: String,
    days: Vec<bool>,
    assigned_treatment: String,
    employment: &'static str,
    experience: String,
    languages: Vec<String>,
}

impl From<&NewDoctor> for NewDoctorWire {
    fn from(doctor: &NewDoctor) -> Self {
        Self {
            profile_pic: doctor.profile_pic.clone(),
            name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
            email: doctor.email.clone(),
            days: doctor.days.to_vec(),
            assigned_treatment: doctor.assigned_treatment.clone(),
            employment: doctor.employment.as_str(),
            experience: doctor.experience.clone(),
            languages: doctor.languages.clone(),
        }
    }
}

// The backend sends at most seven flags; short arrays mean the remaining
// days are off.
fn day_flags(wire: &[bool]) -> [bool; WORKING_DAYS] {
    let mut days = [false; WORKING_DAYS];
    for (slot, flag) in days.iter_mut().zip(wire.iter()) {
        *slot = *flag;
    }
    days
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentWire {
    id: String,
    date: String,
    time: String,
    title: String,
    visit_type: String,
    details: String,
    hospital: String,
    status: String,
    #[serde(default)]
    payment: Option<String>,
    #[serde(default)]
    pay_button: bool,
    #[serde(default)]
    payment_status: Option<String>,
}

impl TryFrom<AppointmentWire> for Appointment {
    type Error = String;

    fn try_from(wire: AppointmentWire) -> Result<Self, String> {
        let status = AppointmentStatus::parse(&wire.status)
            .ok_or_else(|| format!("unknown appointment status {:?}", wire.status))?;
        let visit_type = VisitType::parse(&wire.visit_type)
            .ok_or_else(|| format!("unknown visit type {:?}", wire.visit_type))?;
        let date = Date::parse(&wire.date, DATE_FORMAT)
            .map_err(|error| format!("bad appointment date {:?}: {error}", wire.date))?;
        let payment = payment_state(
            wire.payment.as_deref(),
            wire.pay_button,
            wire.payment_status.as_deref(),
        )?;

        Ok(Self {
            id: AppointmentId::new(wire.id),
            date,
            time_range: wire.time,
            title: wire.title,
            visit_type,
            details: wire.details,
            hospital: wire.hospital,
            status,
            payment,
        })
    }
}

/// Collapse the backend's `payment`/`payButton`/`paymentStatus` triple into
/// one tagged value. "paid" wins over a lingering pay button.
fn payment_state(
    amount: Option<&str>,
    pay_button: bool,
    payment_status: Option<&str>,
) -> Result<PaymentState, String> {
    // The backend is inconsistent about the casing ("paid" vs "PAID").
    if payment_status.is_some_and(|status| status.eq_ignore_ascii_case("paid")) {
        return Ok(PaymentState::Paid);
    }
    if !pay_button {
        return Ok(PaymentState::NotRequired);
    }
    let raw = amount.ok_or_else(|| "pay button set without an amount".to_owned())?;
    let amount_cents =
        parse_money(raw).ok_or_else(|| format!("bad payment amount {raw:?}"))?;
    Ok(PaymentState::Due { amount_cents })
}

/// Dollar string to cents, e.g. "240.00" -> 24000. At most two decimal
/// places; a bare integer means whole dollars.
fn parse_money(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (dollars, cents) = match raw.split_once('.') {
        None => (raw, "0"),
        Some((dollars, cents)) => (dollars, cents),
    };
    if dollars.is_empty() || cents.is_empty() || cents.len() > 2 {
        return None;
    }
    let dollars: i64 = dollars.parse().ok()?;
    let mut cents: i64 = cents.parse().ok()?;
    if raw.split_once('.').is_some_and(|(_, frac)| frac.len() == 1) {
        cents *= 10;
    }
    if dollars < 0 || cents < 0 {
        return None;
    }
    Some(dollars * 100 + cents)
}
