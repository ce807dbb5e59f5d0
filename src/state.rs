use crate::config::AppConfig;
use crate::error::StoreError;
use crate::session::Session;
use crate::store::JsonStore;

/// Everything one running wallet owns: settings, the store and the session.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub store: JsonStore,
    pub session: Session,
}

impl AppState {
    pub fn init(config: AppConfig) -> Result<Self, StoreError> {
        let store = JsonStore::open_with(&config.data_file, config.load_policy)?;
        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: AppConfig, store: JsonStore) -> Self {
        Self {
            config,
            store,
            session: Session::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LoadPolicy;

    #[test]
    fn init_opens_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_file: dir.path().join("wallet.json"),
            ..AppConfig::default()
        };
        let state = AppState::init(config).expect("init");
        assert_eq!(state.store.path(), dir.path().join("wallet.json"));
        assert!(!state.session.is_logged_in());
    }

    #[test]
    fn init_strict_fails_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");
        std::fs::write(&path, "garbage").unwrap();
        let config = AppConfig {
            data_file: path,
            load_policy: LoadPolicy::Strict,
            ..AppConfig::default()
        };
        assert!(matches!(AppState::init(config), Err(StoreError::Parse { .. })));
    }
}
