use serde::{Deserialize, Serialize};

use super::Id;

fn default_active() -> bool {
    true
}

/// Bundle of sessions sold at one price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psychologist_id: Option<Id>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub session_count: u32,
    pub price: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Package {
    pub fn price_per_session(&self) -> Option<f64> {
        if self.session_count == 0 {
            None
        } else {
            Some(self.price / f64::from(self.session_count))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub session_count: u32,
    pub price: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}
