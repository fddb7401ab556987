// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use careease_api::SessionCache;
use careease_app::{AdminId, AdminProfile, Appointment, Doctor, DoctorId, FetchError, NewDoctor};
use careease_tui::AppRuntime;

/// Production runtime: every load goes through the shared session cache and
/// its HTTP client.
pub struct HttpRuntime {
    cache: SessionCache,
}

impl HttpRuntime {
    pub fn new(cache: SessionCache) -> Self {
        Self { cache }
    }
}

impl AppRuntime for HttpRuntime {
    fn load_profile(&mut self, id: AdminId) -> Result<AdminProfile, FetchError> {
        self.cache.profile(id)
    }

    fn save_profile(&mut self, profile: &AdminProfile) -> Result<AdminProfile, FetchError> {
        self.cache.save_profile(profile)
    }

    fn load_roster(&mut self, id: AdminId) -> Result<Vec<Doctor>, FetchError> {
        self.cache.client().fetch_roster(id)
    }

    fn load_schedule(&mut self, id: AdminId) -> Result<Vec<Appointment>, FetchError> {
        self.cache.client().fetch_schedule(id)
    }

    fn create_doctor(&mut self, id: AdminId, doctor: &NewDoctor) -> Result<Doctor, FetchError> {
        self.cache.client().create_doctor(id, doctor)
    }
}

/// In-memory runtime for `--demo`: seeded fixtures, no backend required.
pub struct DemoRuntime {
    profile: AdminProfile,
    roster: Vec<Doctor>,
    schedule: Vec<Appointment>,
    next_doctor_id: i64,
}

impl DemoRuntime {
    pub fn new() -> Self {
        let roster = careease_testkit::sample_roster();
        let next_doctor_id = roster
            .iter()
            .map(|doctor| doctor.id.get())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            profile: careease_testkit::sample_admin(),
            roster,
            schedule: careease_testkit::sample_schedule(),
            next_doctor_id,
        }
    }
}

impl Default for DemoRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl AppRuntime for DemoRuntime {
    fn load_profile(&mut self, id: AdminId) -> Result<AdminProfile, FetchError> {
        if id != self.profile.id {
            return Err(FetchError::Http {
                status: 404,
                detail: "no such admin in the demo data".to_owned(),
            });
        }
        Ok(self.profile.clone())
    }

    fn save_profile(&mut self, profile: &AdminProfile) -> Result<AdminProfile, FetchError> {
        // Full-record replace, same contract as the backend.
        self.profile = profile.clone();
        Ok(self.profile.clone())
    }

    fn load_roster(&mut self, _id: AdminId) -> Result<Vec<Doctor>, FetchError> {
        Ok(self.roster.clone())
    }

    fn load_schedule(&mut self, _id: AdminId) -> Result<Vec<Appointment>, FetchError> {
        Ok(self.schedule.clone())
    }

    fn create_doctor(&mut self, _id: AdminId, doctor: &NewDoctor) -> Result<Doctor, FetchError> {
        let created = Doctor {
            id: DoctorId::new(self.next_doctor_id),
            profile_pic: doctor.profile_pic.clone(),
            name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
            email: doctor.email.clone(),
            days: doctor.days,
            assigned_treatment: doctor.assigned_treatment.clone(),
            employment: doctor.employment,
            experience: doctor.experience.clone(),
            languages: doctor.languages.clone(),
        };
        self.next_doctor_id += 1;
        self.roster.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::{DemoRuntime, HttpRuntime};
    use anyhow::{Result, anyhow};
    use careease_api::{Client, SessionCache};
    use careease_app::{AdminId, EmploymentType, FetchError, NewDoctor};
    use careease_tui::AppRuntime;
    use std::thread;
    use std::time::Duration;
    use tiny_http::{Header, Response, Server};

    #[test]
    fn demo_save_replaces_the_whole_profile() -> Result<()> {
        let mut runtime = DemoRuntime::new();
        let mut profile = runtime.load_profile(careease_testkit::SAMPLE_ADMIN_ID)?;
        profile.department = "Patient Services".to_owned();

        let saved = runtime.save_profile(&profile)?;
        assert_eq!(saved.department, "Patient Services");

        let reloaded = runtime.load_profile(careease_testkit::SAMPLE_ADMIN_ID)?;
        assert_eq!(reloaded.department, "Patient Services");
        Ok(())
    }

    #[test]
    fn demo_rejects_unknown_admin() {
        let mut runtime = DemoRuntime::new();
        let error = runtime
            .load_profile(AdminId::new(999))
            .expect_err("unknown admin should fail");
        assert!(matches!(error, FetchError::Http { status: 404, .. }));
    }

    #[test]
    fn demo_create_doctor_assigns_fresh_sequential_ids() -> Result<()> {
        let mut runtime = DemoRuntime::new();
        let before = runtime.load_roster(careease_testkit::SAMPLE_ADMIN_ID)?;
        let submission = NewDoctor {
            profile_pic: String::new(),
            name: "Dr. Reed".to_owned(),
            specialization: "Endodontics".to_owned(),
            email: "reed@zendral.example".to_owned(),
            days: [false, true, false, true, false, true, false],
            assigned_treatment: "Root canal".to_owned(),
            employment: EmploymentType::FullTime,
            experience: "4 years".to_owned(),
            languages: vec!["English".to_owned()],
        };

        let first = runtime.create_doctor(careease_testkit::SAMPLE_ADMIN_ID, &submission)?;
        let second = runtime.create_doctor(careease_testkit::SAMPLE_ADMIN_ID, &submission)?;
        assert_eq!(second.id.get(), first.id.get() + 1);
        assert!(before.iter().all(|doctor| doctor.id != first.id));

        let roster = runtime.load_roster(careease_testkit::SAMPLE_ADMIN_ID)?;
        assert_eq!(roster.len(), before.len() + 2);
        Ok(())
    }

    #[test]
    fn http_runtime_serves_repeat_profile_loads_from_the_cache() -> Result<()> {
        let server =
            Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
        let addr = format!("http://{}", server.server_addr());

        let handle = thread::spawn(move || {
            // Exactly one request; a refetch would hang the test instead.
            let request = server.recv().expect("request expected");
            assert_eq!(request.url(), "/api/admins/42");
            let body = r#"{
                "id": 42, "name": "Dr. Maria Santos",
                "email": "maria@zendral.example", "role": "Administrator",
                "department": "Front Office", "lastLogin": "2026-04-18 09:12",
                "profilePic": "maria.png"
            }"#;
            let response = Response::from_string(body).with_header(
                Header::from_bytes("Content-Type", "application/json")
                    .expect("valid content type header"),
            );
            request.respond(response).expect("response should succeed");
        });

        let client = Client::new(&addr, Duration::from_secs(1))?;
        let mut runtime = HttpRuntime::new(SessionCache::new(client));

        let first = runtime.load_profile(AdminId::new(42))?;
        let second = runtime.load_profile(AdminId::new(42))?;
        assert_eq!(first, second);
        assert_eq!(first.name, "Dr. Maria Santos");

        handle.join().expect("server thread should join");
        Ok(())
    }
}
