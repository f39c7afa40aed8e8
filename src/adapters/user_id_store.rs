//! Persistent user identifier, backed by any [`StoragePort`].
//!
//! The identifier lives under `ninho::userId` and is cached in RAM so the
//! 500 ms telemetry path never touches flash.

use log::{info, warn};

use crate::app::ports::{IdentityPort, StorageError, StoragePort};
use crate::config::MAX_USER_ID_LEN;

use super::nvs::NAMESPACE;
use super::utils::is_valid_user_id;

const USER_ID_KEY: &str = "userId";

pub struct UserIdStore<S: StoragePort> {
    storage: S,
    cached: String,
    present: bool,
}

impl<S: StoragePort> UserIdStore<S> {
    /// Load the stored identifier, if any.  A stored value that fails
    /// validation is ignored and treated as unset.
    pub fn load(storage: S) -> Self {
        let mut store = Self {
            storage,
            cached: String::new(),
            present: false,
        };

        let mut buf = [0u8; MAX_USER_ID_LEN];
        match store.storage.read(NAMESPACE, USER_ID_KEY, &mut buf) {
            Ok(len) => match core::str::from_utf8(&buf[..len]) {
                Ok(id) if is_valid_user_id(id) => {
                    store.cached = id.into();
                    store.present = true;
                    info!("identity: loaded stored user id ({} bytes)", len);
                }
                _ => warn!("identity: stored user id is invalid, ignoring"),
            },
            Err(StorageError::NotFound) => info!("identity: no user id stored"),
            Err(e) => warn!("identity: user id read failed: {}", e),
        }
        store
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Callers validate `id` with [`is_valid_user_id`] before storing it.
impl<S: StoragePort> IdentityPort for UserIdStore<S> {
    fn set_user_id(&mut self, id: &str) -> Result<(), StorageError> {
        self.storage.write(NAMESPACE, USER_ID_KEY, id.as_bytes())?;
        self.cached.clear();
        self.cached.push_str(id);
        self.present = true;
        Ok(())
    }

    fn user_id(&self) -> &str {
        &self.cached
    }

    fn has_user_id(&self) -> bool {
        self.present
    }
}
