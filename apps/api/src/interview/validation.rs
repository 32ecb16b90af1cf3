use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::profile::{split_tech_stack, CandidateProfile, ExperienceLevel, ProfileForm};

/// A required profile field, named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Location,
    Experience,
    DesiredPosition,
    TechStack,
}

impl ProfileField {
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Full name",
            ProfileField::Email => "Email",
            ProfileField::Phone => "Phone",
            ProfileField::Location => "Location",
            ProfileField::Experience => "Experience",
            ProfileField::DesiredPosition => "Desired position",
            ProfileField::TechStack => "Tech stack",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validates a submitted form.
///
/// PASS: every text field is non-blank, experience is one of the offered buckets,
/// and the stack yields at least one technology after splitting on commas.
/// FAIL: returns every offending field, in form order.
pub fn validate_profile(form: &ProfileForm) -> Result<CandidateProfile, Vec<ProfileField>> {
    let mut missing = Vec::new();

    let name = require(&form.name, ProfileField::Name, &mut missing);
    let email = require(&form.email, ProfileField::Email, &mut missing);
    let phone = require(&form.phone, ProfileField::Phone, &mut missing);
    let location = require(&form.location, ProfileField::Location, &mut missing);

    let experience = ExperienceLevel::parse(&form.experience);
    if experience.is_none() {
        missing.push(ProfileField::Experience);
    }

    let desired_position = require(
        &form.desired_position,
        ProfileField::DesiredPosition,
        &mut missing,
    );

    let tech_stack = split_tech_stack(&form.tech_stack);
    if tech_stack.is_empty() {
        missing.push(ProfileField::TechStack);
    }

    match experience {
        Some(experience) if missing.is_empty() => Ok(CandidateProfile {
            name,
            email,
            phone,
            location,
            experience,
            desired_position,
            tech_stack,
        }),
        _ => Err(missing),
    }
}

fn require(value: &str, field: ProfileField, missing: &mut Vec<ProfileField>) -> String {
    let value = value.trim();
    if value.is_empty() {
        missing.push(field);
    }
    value.to_string()
}
