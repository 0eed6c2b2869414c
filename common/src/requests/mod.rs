use serde::{Deserialize, Serialize};

/// Admin login form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public registration form for models and brands.
///
/// Every field defaults so that a partially filled form reaches validation
/// and gets per-field messages instead of a blanket deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationForm {
    pub email: String,
    pub full_name: String,
    pub stage_name: String,
    pub role: String,
    pub gender: String,
    pub dob: String,
    pub location: String,
    pub height: String,
    pub bust: String,
    pub waist: String,
    pub hips: String,
    pub shoe_size: String,
    pub hair_color: String,
    pub eye_color: String,
    pub tags: Vec<String>,
    pub bio: String,
    pub instagram: String,
    pub contact_email: String,
    pub terms: bool,
}

/// Public contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Admin change to a registration's review state.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRegistrationRequest {
    pub email: String,
    pub status: String,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
    /// Version of the registration listing the change was made from.
    #[serde(default)]
    pub version: Option<String>,
}

/// Admin reply to a contact inquiry.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyInquiryRequest {
    pub id: String,
    pub message: String,
}
