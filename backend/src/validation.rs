//! Field-by-field checks of the public and admin forms.
//!
//! Each validator returns every problem it finds; an empty list means the
//! input may be written.

use chrono::{NaiveDate, Utc};
use common::model::field::FieldError;
use common::requests::{
    ContactForm, LoginRequest, RegistrationForm, ReplyInquiryRequest, UpdateRegistrationRequest,
};
use once_cell::sync::Lazy;
use regex::Regex;

pub const ROLES: &[&str] = &["model", "brand"];
pub const GENDERS: &[&str] = &["male", "female", "non-binary"];
pub const REGISTRATION_STATUSES: &[&str] = &["pending", "approved", "rejected", "active", "blocked"];

const BIO_MIN: usize = 250;
const BIO_MAX: usize = 500;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid e-mail regex"));
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid URL regex"));

#[derive(Default)]
struct Errors(Vec<FieldError>);

impl Errors {
    fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.0.push(FieldError::new(field, message));
        }
    }
}

fn min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

fn is_optional_url(value: &str) -> bool {
    value.trim().is_empty() || URL_RE.is_match(value.trim())
}

fn is_optional_number(value: &str) -> bool {
    value.trim().is_empty() || value.trim().parse::<f64>().is_ok()
}

pub fn validate_registration(form: &RegistrationForm) -> Vec<FieldError> {
    let mut errors = Errors::default();

    errors.check(is_email(&form.email), "email", "Please enter a valid email.");
    errors.check(min_chars(&form.full_name, 2), "fullName", "Full name is required");
    errors.check(ROLES.contains(&form.role.as_str()), "role", "Please select a role.");
    errors.check(
        GENDERS.contains(&form.gender.as_str()),
        "gender",
        "Please select a gender.",
    );
    let dob = NaiveDate::parse_from_str(form.dob.trim(), "%Y-%m-%d").ok();
    errors.check(
        dob.is_some_and(|d| d < Utc::now().date_naive()),
        "dob",
        "Date of birth is required.",
    );
    errors.check(min_chars(&form.location, 2), "location", "Location is required");
    errors.check(min_chars(&form.height, 1), "height", "Height is required.");
    for (field, value) in [
        ("bust", &form.bust),
        ("waist", &form.waist),
        ("hips", &form.hips),
        ("shoeSize", &form.shoe_size),
    ] {
        errors.check(is_optional_number(value), field, "Must be a number.");
    }
    errors.check(
        form.tags.iter().any(|t| !t.trim().is_empty()),
        "tags",
        "Please select at least one tag.",
    );
    let bio_len = form.bio.trim().chars().count();
    errors.check(
        (BIO_MIN..=BIO_MAX).contains(&bio_len),
        "bio",
        "Bio must be 250-500 characters.",
    );
    errors.check(is_optional_url(&form.instagram), "instagram", "Invalid url");
    errors.check(
        is_email(&form.contact_email),
        "contactEmail",
        "Please enter a valid email for booking inquiries.",
    );
    errors.check(form.terms, "terms", "You must accept the terms and conditions.");

    errors.0
}

pub fn validate_contact(form: &ContactForm) -> Vec<FieldError> {
    let mut errors = Errors::default();
    errors.check(min_chars(&form.name, 2), "name", "Name is required");
    errors.check(is_email(&form.email), "email", "Please enter a valid email.");
    errors.check(min_chars(&form.subject, 5), "subject", "Subject is required");
    errors.check(
        min_chars(&form.message, 10),
        "message",
        "Message must be at least 10 characters.",
    );
    errors.0
}

pub fn validate_login(form: &LoginRequest) -> Vec<FieldError> {
    let mut errors = Errors::default();
    errors.check(!form.username.trim().is_empty(), "username", "Username is required");
    errors.check(!form.password.is_empty(), "password", "Password is required");
    errors.0
}

pub fn validate_registration_update(request: &UpdateRegistrationRequest) -> Vec<FieldError> {
    let mut errors = Errors::default();
    errors.check(is_email(&request.email), "email", "Please enter a valid email.");
    errors.check(
        REGISTRATION_STATUSES.contains(&request.status.as_str()),
        "status",
        "Unknown status.",
    );
    errors.0
}

pub fn validate_reply(request: &ReplyInquiryRequest) -> Vec<FieldError> {
    let mut errors = Errors::default();
    errors.check(!request.id.trim().is_empty(), "id", "Inquiry id is required");
    errors.check(
        min_chars(&request.message, 10),
        "message",
        "Reply must be at least 10 characters.",
    );
    errors.0
}
