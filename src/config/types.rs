//! Service configuration types.

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_AUTH_REALM: &str = "Somemart staff API";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Which revision of the API is served.
///
/// `Open` accepts anonymous item creation. `Staff` puts `POST /items/` behind
/// HTTP Basic authentication of an active staff account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApiMode {
    #[default]
    Open,
    Staff,
}

impl ApiMode {
    pub fn requires_staff_for_items(self) -> bool {
        matches!(self, ApiMode::Staff)
    }
}

impl FromStr for ApiMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" | "v1" => Ok(ApiMode::Open),
            "staff" | "v2" => Ok(ApiMode::Staff),
            other => Err(format!("unknown mode '{}', expected 'open' or 'staff'", other)),
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiMode::Open => f.write_str("open"),
            ApiMode::Staff => f.write_str("staff"),
        }
    }
}

/// Account upserted on start-up so the staff mode is usable on a fresh database.
#[derive(Clone)]
pub struct StaffSeed {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for StaffSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffSeed")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub mode: ApiMode,
    /// `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: String,
    pub auth_realm: String,
    pub body_limit_bytes: usize,
    pub staff_seed: Option<StaffSeed>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: ApiMode::default(),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            auth_realm: DEFAULT_AUTH_REALM.to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            staff_seed: None,
        }
    }
}
