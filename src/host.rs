//! Host identity payload shared by both services.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Machine host name as reported by the OS.
pub fn hostname() -> String {
    gethostname::gethostname().to_string_lossy().into_owned()
}

/// `{host, time}` pair reported by each service.
///
/// `time` is kept as the RFC 3339 string it travels as, so a backend's value
/// is forwarded verbatim by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    /// Host name.
    pub host: String,
    /// Timestamp of the response.
    pub time: String,
}

impl HostInfo {
    /// Stamp `host` with the current UTC time.
    pub fn now(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            time: timestamp(OffsetDateTime::now_utc()),
        }
    }
}

/// Format a timestamp as RFC 3339.
pub fn timestamp(at: OffsetDateTime) -> String {
    // RFC 3339 formatting only fails for years outside 0..=9999.
    at.format(&Rfc3339).unwrap_or_else(|_| at.unix_timestamp().to_string())
}
