//! Startup wiring: data directory, store, session manager, API client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use opsdesk_client::{ApiClient, ApiConfig};
use opsdesk_session::SessionManager;
use opsdesk_store::{KvStore, RedbStore};

/// Database file inside the data directory.
const DB_FILE: &str = "opsdesk.redb";

/// Everything a command needs, wired once per invocation.
pub struct App {
    pub store: Arc<dyn KvStore>,
    pub session: Arc<SessionManager>,
    pub client: Arc<ApiClient>,
}

impl App {
    /// Open the local store and build the session manager and API client
    /// on top of it.
    pub fn from_env() -> anyhow::Result<Self> {
        let dir = data_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;

        let store: Arc<dyn KvStore> = Arc::new(RedbStore::open(&dir.join(DB_FILE))?);
        let session = Arc::new(SessionManager::new(store.clone()));
        let client = Arc::new(ApiClient::new(ApiConfig::from_env(), session.clone())?);

        tracing::debug!(data_dir = %dir.display(), base_url = client.base_url(), "Wired");
        Ok(Self {
            store,
            session,
            client,
        })
    }
}

/// Where local state lives: `OPSDESK_DATA_DIR` if set, otherwise
/// `.opsdesk` under the home directory, falling back to the working
/// directory when `HOME` is unset.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("OPSDESK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".opsdesk"),
        Err(_) => PathBuf::from(".opsdesk"),
    }
}
