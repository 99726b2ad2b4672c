use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Owner details shown on the public page (stored under `portfolioConfig`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}
