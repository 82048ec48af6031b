//! Stable storage keys.
//!
//! These names are load-bearing: records written under them must survive
//! upgrades, so they are pinned here rather than scattered through callers.

/// Bearer credential for the storefront API.
pub const AUTH_TOKEN: &str = "authToken";

/// Serialized user record for the active session.
pub const USER: &str = "User";

/// Light/dark theme flag.
pub const THEME: &str = "theme";
