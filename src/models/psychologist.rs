use serde::{Deserialize, Serialize};

use super::availability::{normalize_schedule, Availability};
use super::Id;

/// Public profile of a psychologist as listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Psychologist {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Id>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub specializations: Vec<String>,
    pub price: f64,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub availability: Vec<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl Psychologist {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn has_specialization(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.specializations
            .iter()
            .any(|s| s.trim().to_lowercase() == wanted)
    }

    pub fn normalized_availability(&self) -> Vec<Availability> {
        normalize_schedule(self.availability.clone())
    }
}

/// Fields a psychologist (or an admin on their behalf) may edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PsychologistUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specializations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Account + profile an admin submits when adding a doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPsychologist {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub education: String,
    pub specializations: Vec<String>,
    pub price: f64,
    pub experience_years: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sparse_profile() {
        let doctor: Psychologist = serde_json::from_str(
            r#"{"id":4,"first_name":"Ana","last_name":"Ruiz","price":60,"specializations":["Anxiety","CBT"]}"#,
        )
        .unwrap();
        assert_eq!(doctor.full_name(), "Ana Ruiz");
        assert!(doctor.has_specialization(" cbt "));
        assert!(!doctor.has_specialization("couples"));
        assert!(doctor.availability.is_empty());
        assert_eq!(doctor.experience_years, 0);
    }
}
