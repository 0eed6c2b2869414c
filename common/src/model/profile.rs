use serde::{Deserialize, Serialize};

/// A public model profile as listed on the discover page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProfile {
    pub id: String,
    pub name: String,
    pub location: String,
    pub specialties: Vec<String>,
    pub bio: String,
    pub stats: ModelStats,
    pub profile_image: String,
    #[serde(default)]
    pub images: Vec<ProfileImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStats {
    pub height: String,
    pub bust: f32,
    pub waist: f32,
    pub hips: f32,
    pub shoe: f32,
    pub eyes: String,
    pub hair: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileImage {
    pub url: String,
    pub hint: String,
}
