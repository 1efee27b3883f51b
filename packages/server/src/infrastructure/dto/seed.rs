//! User profile seed file entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeed {
    pub id: String,
    pub display_name: String,
    pub handle: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
