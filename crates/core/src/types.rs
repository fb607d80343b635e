use serde::{Deserialize, Serialize};

/// Entity identifiers are assigned by the server and opaque to the client.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Token expiry instants are Unix epoch milliseconds, the unit the
/// authentication endpoint reports (`expiresIn`).
pub type EpochMillis = i64;

/// Current wall-clock time in epoch milliseconds. The single clock source
/// for expiry checks and notice timestamps; pure functions take the value
/// as a parameter instead of reading it themselves.
pub fn now_ms() -> EpochMillis {
    chrono::Utc::now().timestamp_millis()
}

/// Sort direction for paged list requests, sent on the wire in lowercase
/// (`direction=desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The wire/query-parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
