//! Doctor Profile Models
//! Mission: Verification and public-display records for doctor accounts

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verification status set by an admin. One-way: pending is the only
/// state that may transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VerificationStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "verified")]
    Verified,
    #[serde(rename = "rejected")]
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(VerificationStatus::Pending),
            "verified" => Some(VerificationStatus::Verified),
            "rejected" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }
}

/// Doctor profile, 1:1 with a doctor Account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub doctor_id: Uuid,
    pub full_name: String,
    pub specialty: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub degree_url: Option<String>,
    pub status: VerificationStatus,
}

/// Public profile view (no degree reference, no status).
#[derive(Debug, Serialize)]
pub struct DoctorPublicView {
    pub doctor_id: Uuid,
    pub full_name: String,
    pub specialty: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

impl DoctorPublicView {
    pub fn from_profile(profile: &DoctorProfile) -> Self {
        Self {
            doctor_id: profile.doctor_id,
            full_name: profile.full_name.clone(),
            specialty: profile.specialty.clone(),
            bio: profile.bio.clone(),
            photo_url: profile.photo_url.clone(),
        }
    }
}

/// Admin view: the profile joined with the owning account's email.
#[derive(Debug, Serialize)]
pub struct DoctorAdminView {
    pub doctor_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub specialty: String,
    pub status: VerificationStatus,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub degree_url: Option<String>,
}

impl DoctorAdminView {
    pub fn new(profile: DoctorProfile, email: String) -> Self {
        Self {
            doctor_id: profile.doctor_id,
            email,
            full_name: profile.full_name,
            specialty: profile.specialty,
            status: profile.status,
            bio: profile.bio,
            photo_url: profile.photo_url,
            degree_url: profile.degree_url,
        }
    }
}
