//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements both [`ConfigPort`] and [`StoragePort`].
//!
//! - Config validation: every field is range-checked when loaded.
//! - Namespace isolation: each subsystem uses its own namespace.
//! - Atomic writes: ESP-IDF NVS commits are atomic per `nvs_commit()`.
//!
//! On host targets the adapter is backed by an in-memory map.

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::SystemConfig;
use log::info;

#[cfg(target_os = "espidf")]
use log::warn;

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

pub const NAMESPACE: &str = "ninho";
const CONFIG_KEY: &str = "syscfg";

/// NVS keys and namespaces are limited to 15 characters.
pub const MAX_NAME_LEN: usize = 15;

#[cfg(target_os = "espidf")]
const MAX_BLOB_SIZE: usize = 512;

/// Serial speeds the web client can be configured for.
const SUPPORTED_BAUDS: [u32; 5] = [9_600, 57_600, 115_200, 230_400, 460_800];

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    store: std::cell::RefCell<HashMap<String, Vec<u8>>>,
}

impl NvsAdapter {
    /// Create a new NvsAdapter and initialise NVS flash.
    ///
    /// On first boot or after a version mismatch the NVS partition is
    /// erased and re-initialised automatically.
    pub fn new() -> Result<Self, StorageError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(StorageError::IoError);
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(StorageError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(StorageError::IoError);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: std::cell::RefCell::new(HashMap::new()),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    /// NUL-terminated copy of a namespace or key name, truncated to 15 bytes.
    #[cfg(target_os = "espidf")]
    fn c_name(name: &str) -> [u8; MAX_NAME_LEN + 1] {
        let mut buf = [0u8; MAX_NAME_LEN + 1];
        let bytes = name.as_bytes();
        let len = bytes.len().min(MAX_NAME_LEN);
        buf[..len].copy_from_slice(&bytes[..len]);
        buf
    }

    /// Open an NVS namespace, execute a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(namespace: &str, write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let ns = Self::c_name(namespace);
        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        // SAFETY: `ns` is NUL-terminated and outlives the call.
        let ret = unsafe { nvs_open(ns.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        // SAFETY: handle was opened above and is closed exactly once.
        unsafe {
            nvs_close(handle);
        }
        result
    }
}

fn validate_config(cfg: &SystemConfig) -> Result<(), ConfigError> {
    if !SUPPORTED_BAUDS.contains(&cfg.uart_baud) {
        return Err(ConfigError::ValidationFailed(
            "uart_baud must be one of 9600, 57600, 115200, 230400, 460800",
        ));
    }
    Ok(())
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let mut buf = [0u8; 64];
        match self.read(NAMESPACE, CONFIG_KEY, &mut buf) {
            Ok(len) => {
                let cfg: SystemConfig =
                    postcard::from_bytes(&buf[..len]).map_err(|_| ConfigError::Corrupted)?;
                validate_config(&cfg)?;
                info!("NvsAdapter: loaded config ({} bytes)", len);
                Ok(cfg)
            }
            Err(StorageError::NotFound) => {
                info!("NvsAdapter: no stored config, using defaults");
                Ok(SystemConfig::default())
            }
            Err(_) => Err(ConfigError::IoError),
        }
    }
}

impl StoragePort for NvsAdapter {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            let composite = Self::composite_key(namespace, key);
            match self.store.borrow().get(&composite) {
                Some(data) => {
                    let len = data.len().min(buf.len());
                    buf[..len].copy_from_slice(&data[..len]);
                    Ok(len)
                }
                None => Err(StorageError::NotFound),
            }
        }

        #[cfg(target_os = "espidf")]
        {
            let key = Self::c_name(key);
            let result = Self::with_nvs_handle(namespace, false, |handle| {
                let mut size = buf.len().min(MAX_BLOB_SIZE);
                // SAFETY: `buf` is valid for `size` bytes; key is NUL-terminated.
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        key.as_ptr() as *const _,
                        buf.as_mut_ptr() as *mut _,
                        &mut size,
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(size)
            });
            match result {
                Ok(size) => Ok(size),
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND => Err(StorageError::NotFound),
                Err(e) => {
                    warn!("NvsAdapter: read {}::{} failed ({})", namespace, key_str(&key), e);
                    Err(StorageError::IoError)
                }
            }
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            let composite = Self::composite_key(namespace, key);
            self.store.borrow_mut().insert(composite, data.to_vec());
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            let key = Self::c_name(key);
            let result = Self::with_nvs_handle(namespace, true, |handle| {
                // SAFETY: `data` is valid for its length; key is NUL-terminated.
                let ret = unsafe {
                    nvs_set_blob(
                        handle,
                        key.as_ptr() as *const _,
                        data.as_ptr() as *const _,
                        data.len(),
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(())
            });
            result.map_err(|e| {
                warn!("NvsAdapter: write {}::{} failed ({})", namespace, key_str(&key), e);
                if e == ESP_ERR_NVS_NOT_ENOUGH_SPACE {
                    StorageError::Full
                } else {
                    StorageError::IoError
                }
            })
        }
    }
}

#[cfg(target_os = "espidf")]
fn key_str(key: &[u8]) -> &str {
    let end = key.iter().position(|&b| b == 0).unwrap_or(key.len());
    core::str::from_utf8(&key[..end]).unwrap_or("?")
}
