//! Shared constants and invariants

pub const DEFAULT_PORT: u16 = 3000;
/// listener always binds on all interfaces
pub const BIND_HOST: &str = "0.0.0.0";

pub const DEFAULT_CRM_BASE_URL: &str = "https://nusanet.api.dev.bis.nusawork.com";
pub const DEFAULT_CRM_LEAD_PATH: &str = "/prospects/api/shark-tanks";
pub const SUBMIT_PATH: &str = "/submit";
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

pub const GRANT_TYPE_PASSWORD: &str = "password";

// Token cache
pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 30;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 300;

// Lead record constants
pub const LEAD_SOURCE_ID: u32 = 6;
pub const SALUTATION_ID: u32 = 36;
pub const ORIGIN_ATTRIBUTE_LIST_ID: u32 = 37;
pub const ORIGIN_ATTRIBUTE_VALUE: &str = "Google Form";
pub const SECONDARY_ATTRIBUTE_LIST_ID: u32 = 31;
