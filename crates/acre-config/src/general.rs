//! General application configuration.

use acre_core::responses::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Records per list page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Username recorded as the acting user when none is given.
    #[serde(default)]
    pub default_user: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_user: String::new(),
        }
    }
}

impl GeneralConfig {
    pub fn default_user(&self) -> Option<&str> {
        let user = self.default_user.trim();
        (!user.is_empty()).then_some(user)
    }
}
