// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};

use crate::{AdminProfile, EmploymentType, NewDoctor, WORKING_DAYS};

/// Draft copy of a record under edit. The original is untouched until a
/// commit; cancel hands it back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession<T: Clone> {
    original: T,
    draft: T,
}

impl<T: Clone> EditSession<T> {
    pub fn begin(record: T) -> Self {
        Self {
            draft: record.clone(),
            original: record,
        }
    }

    pub fn original(&self) -> &T {
        &self.original
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    pub fn cancel(self) -> T {
        self.original
    }

    /// Adopt the record the server echoed back from a save.
    pub fn commit(self, saved: T) -> T {
        saved
    }
}

/// Profile fields addressable from the edit view, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Role,
    Department,
    ProfilePic,
    Permissions,
}

impl ProfileField {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Role,
        Self::Department,
        Self::ProfilePic,
        Self::Permissions,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::Department => "department",
            Self::ProfilePic => "profile picture",
            Self::Permissions => "permissions",
        }
    }

    /// Permissions are list-valued on the record but edited as one
    /// comma-separated line.
    pub fn get(self, profile: &AdminProfile) -> String {
        match self {
            Self::Name => profile.name.clone(),
            Self::Email => profile.email.clone(),
            Self::Role => profile.role.clone(),
            Self::Department => profile.department.clone(),
            Self::ProfilePic => profile.profile_pic.clone(),
            Self::Permissions => profile.permissions.join(", "),
        }
    }

    pub fn set(self, profile: &mut AdminProfile, value: &str) {
        match self {
            Self::Name => profile.name = value.to_owned(),
            Self::Email => profile.email = value.to_owned(),
            Self::Role => profile.role = value.to_owned(),
            Self::Department => profile.department = value.to_owned(),
            Self::ProfilePic => profile.profile_pic = value.to_owned(),
            Self::Permissions => profile.permissions = split_list(value),
        }
    }
}

pub fn validate_profile(profile: &AdminProfile) -> Result<()> {
    if profile.name.trim().is_empty() {
        bail!("admin name is required -- enter a name and retry");
    }
    if profile.email.trim().is_empty() {
        bail!("admin email is required -- enter an email and retry");
    }
    Ok(())
}

/// Doctor fields addressable from the add-doctor form, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorField {
    Name,
    Specialization,
    Email,
    AssignedTreatment,
    Employment,
    Experience,
    Languages,
    Days,
    ProfilePic,
}

impl DoctorField {
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Specialization,
        Self::Email,
        Self::AssignedTreatment,
        Self::Employment,
        Self::Experience,
        Self::Languages,
        Self::Days,
        Self::ProfilePic,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Specialization => "specialization",
            Self::Email => "email",
            Self::AssignedTreatment => "assigned treatment",
            Self::Employment => "type",
            Self::Experience => "experience",
            Self::Languages => "languages (comma separated)",
            Self::Days => "working days",
            Self::ProfilePic => "profile picture",
        }
    }

    pub const fn takes_text(self) -> bool {
        !matches!(self, Self::Employment | Self::Days)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorFormInput {
    pub profile_pic: String,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub days: [bool; WORKING_DAYS],
    pub assigned_treatment: String,
    pub employment: EmploymentType,
    pub experience: String,
    pub languages: String,
}

impl Default for DoctorFormInput {
    fn default() -> Self {
        Self {
            profile_pic: String::new(),
            name: String::new(),
            specialization: String::new(),
            email: String::new(),
            days: [false; WORKING_DAYS],
            assigned_treatment: String::new(),
            employment: EmploymentType::PartTime,
            experience: String::new(),
            languages: String::new(),
        }
    }
}

impl DoctorFormInput {
    pub fn toggle_day(&mut self, index: usize) {
        if let Some(flag) = self.days.get_mut(index) {
            *flag = !*flag;
        }
    }

    pub fn toggle_employment(&mut self) {
        self.employment = match self.employment {
            EmploymentType::PartTime => EmploymentType::FullTime,
            EmploymentType::FullTime => EmploymentType::PartTime,
        };
    }

    pub fn field(&self, field: DoctorField) -> String {
        match field {
            DoctorField::Name => self.name.clone(),
            DoctorField::Specialization => self.specialization.clone(),
            DoctorField::Email => self.email.clone(),
            DoctorField::AssignedTreatment => self.assigned_treatment.clone(),
            DoctorField::Employment => self.employment.as_str().to_owned(),
            DoctorField::Experience => self.experience.clone(),
            DoctorField::Languages => self.languages.clone(),
            DoctorField::Days => format_days(&self.days),
            DoctorField::ProfilePic => self.profile_pic.clone(),
        }
    }

    pub fn set_field(&mut self, field: DoctorField, value: &str) {
        match field {
            DoctorField::Name => self.name = value.to_owned(),
            DoctorField::Specialization => self.specialization = value.to_owned(),
            DoctorField::Email => self.email = value.to_owned(),
            DoctorField::AssignedTreatment => self.assigned_treatment = value.to_owned(),
            DoctorField::Experience => self.experience = value.to_owned(),
            DoctorField::Languages => self.languages = value.to_owned(),
            DoctorField::ProfilePic => self.profile_pic = value.to_owned(),
            DoctorField::Employment | DoctorField::Days => {}
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("doctor name is required -- enter a name and retry");
        }
        if self.specialization.trim().is_empty() {
            bail!("specialization is required -- enter a specialization and retry");
        }
        if self.email.trim().is_empty() {
            bail!("doctor email is required -- enter an email and retry");
        }
        if self.assigned_treatment.trim().is_empty() {
            bail!("assigned treatment is required -- enter a treatment and retry");
        }
        if self.experience.trim().is_empty() {
            bail!("experience is required -- enter the experience and retry");
        }
        if split_list(&self.languages).is_empty() {
            bail!("at least one language is required -- enter languages and retry");
        }
        Ok(())
    }

    /// Convert the free-text draft into the submission shape; the language
    /// line is split on commas here, at submission time.
    pub fn to_new_doctor(&self) -> Result<NewDoctor> {
        self.validate()?;
        Ok(NewDoctor {
            profile_pic: self.profile_pic.trim().to_owned(),
            name: self.name.trim().to_owned(),
            specialization: self.specialization.trim().to_owned(),
            email: self.email.trim().to_owned(),
            days: self.days,
            assigned_treatment: self.assigned_treatment.trim().to_owned(),
            employment: self.employment,
            experience: self.experience.trim().to_owned(),
            languages: split_list(&self.languages),
        })
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

fn format_days(days: &[bool; WORKING_DAYS]) -> String {
    crate::DAY_INITIALS
        .iter()
        .zip(days.iter())
        .map(|(initial, on)| {
            if *on {
                format!("[{initial}]")
            } else {
                format!(" {initial} ")
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::{
        DoctorField, DoctorFormInput, EditSession, ProfileField, split_list, validate_profile,
    };
    use crate::{AdminId, AdminProfile, EmploymentType, Hospital};

    fn profile() -> AdminProfile {
        AdminProfile {
            id: AdminId::new(42),
            name: "Dr. X".to_owned(),
            email: "x@zendral.example".to_owned(),
            role: "Super Admin".to_owned(),
            department: "System Administration".to_owned(),
            last_login: "2026-03-15 14:30:00".to_owned(),
            profile_pic: String::new(),
            permissions: vec!["Full Access".to_owned(), "User Management".to_owned()],
            hospital: Some(Hospital {
                name: "Zendral".to_owned(),
            }),
        }
    }

    #[test]
    fn cancel_restores_the_pre_edit_record() {
        let original = profile();
        let mut session = EditSession::begin(original.clone());

        ProfileField::Name.set(session.draft_mut(), "Renamed");
        ProfileField::Permissions.set(session.draft_mut(), "Audit");
        assert_ne!(session.draft(), &original);

        assert_eq!(session.cancel(), original);
    }

    #[test]
    fn commit_adopts_the_server_echo() {
        let mut echoed = profile();
        echoed.name = "Dr. Y".to_owned();

        let session = EditSession::begin(profile());
        assert_eq!(session.commit(echoed.clone()), echoed);
    }

    #[test]
    fn permissions_round_trip_through_the_comma_line() {
        let mut record = profile();
        assert_eq!(
            ProfileField::Permissions.get(&record),
            "Full Access, User Management"
        );

        ProfileField::Permissions.set(&mut record, "Full Access,  Audit , ");
        assert_eq!(
            record.permissions,
            vec!["Full Access".to_owned(), "Audit".to_owned()]
        );
    }

    #[test]
    fn profile_validation_requires_name_and_email() {
        let mut record = profile();
        record.name = "  ".to_owned();
        assert!(validate_profile(&record).is_err());

        let mut record = profile();
        record.email = String::new();
        assert!(validate_profile(&record).is_err());

        assert!(validate_profile(&profile()).is_ok());
    }

    fn filled_doctor_form() -> DoctorFormInput {
        DoctorFormInput {
            name: "Dr. Reed".to_owned(),
            specialization: "Orthodontics".to_owned(),
            email: "reed@zendral.example".to_owned(),
            assigned_treatment: "Braces".to_owned(),
            experience: "8 years".to_owned(),
            languages: "English, Spanish".to_owned(),
            ..DoctorFormInput::default()
        }
    }

    #[test]
    fn day_toggle_flips_only_the_addressed_index() {
        let mut form = DoctorFormInput::default();
        form.toggle_day(1);
        form.toggle_day(3);
        assert_eq!(form.days, [false, true, false, true, false, false, false]);

        form.toggle_day(1);
        assert_eq!(form.days, [false, false, false, true, false, false, false]);

        // Out-of-range toggles are ignored.
        form.toggle_day(99);
        assert_eq!(form.days, [false, false, false, true, false, false, false]);
    }

    #[test]
    fn employment_toggle_alternates() {
        let mut form = DoctorFormInput::default();
        assert_eq!(form.employment, EmploymentType::PartTime);
        form.toggle_employment();
        assert_eq!(form.employment, EmploymentType::FullTime);
        form.toggle_employment();
        assert_eq!(form.employment, EmploymentType::PartTime);
    }

    #[test]
    fn languages_split_on_commas_at_submission_time() {
        let mut form = filled_doctor_form();
        form.languages = " English ,Spanish,, French ".to_owned();

        let doctor = form.to_new_doctor().expect("valid form");
        assert_eq!(
            doctor.languages,
            vec![
                "English".to_owned(),
                "Spanish".to_owned(),
                "French".to_owned()
            ]
        );
    }

    #[test]
    fn doctor_validation_rejects_missing_required_fields() {
        let mut form = filled_doctor_form();
        form.specialization = String::new();
        assert!(form.validate().is_err());

        let mut form = filled_doctor_form();
        form.languages = " , ,".to_owned();
        assert!(form.to_new_doctor().is_err());

        assert!(filled_doctor_form().validate().is_ok());
    }

    #[test]
    fn non_text_fields_ignore_text_writes() {
        let mut form = filled_doctor_form();
        let before = form.clone();
        form.set_field(DoctorField::Days, "garbage");
        form.set_field(DoctorField::Employment, "garbage");
        assert_eq!(form, before);
        assert!(!DoctorField::Days.takes_text());
        assert!(DoctorField::Employment.label() == "type");
    }

    #[test]
    fn split_list_drops_blank_entries() {
        assert!(split_list("  ,, ").is_empty());
        assert_eq!(split_list("a, b"), vec!["a".to_owned(), "b".to_owned()]);
    }
}
