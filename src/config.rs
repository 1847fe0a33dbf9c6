//! Layered settings for the intcode driver.
//!
//! Each layer overrides only the keys it sets. From lowest to highest
//! priority:
//!
//! | Layer | Source |
//! |-------|--------|
//! | defaults | `start_ptr = 0`, `trace = false` |
//! | user file | `~/.config/intcode/config.toml` |
//! | project file | `./intcode.toml` |
//! | environment | `INTCODE_START_PTR`, `INTCODE_TRACE` |
//!
//! Command-line flags are merged on top by the binary. A file that cannot
//! be read or parsed, or an environment value that does not parse, is
//! reported with `log::warn!` and skipped.
//!
//! ```toml
//! # intcode.toml
//! start_ptr = 0
//! trace = false
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::interpreter::MachineConfig;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "intcode.toml";

/// Environment variable overriding the start pointer.
pub const START_PTR_VAR: &str = "INTCODE_START_PTR";

/// Environment variable overriding the trace flag.
pub const TRACE_VAR: &str = "INTCODE_TRACE";

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Driver settings. `None` means "not set by this layer".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Pointer of the first instruction to execute.
    pub start_ptr: Option<usize>,

    /// Trace every instruction step and memory write.
    pub trace: Option<bool>,
}

impl Config {
    /// Build the configuration from every file and environment layer.
    pub fn load() -> Self {
        let files = [Self::user_config_path(), Some(PathBuf::from(LOCAL_CONFIG_FILE))];

        let mut config = Self::default();
        for layer in files.iter().flatten().filter_map(|path| Self::load_from_file(path)) {
            config.merge(layer);
        }
        config.apply_env_overrides();
        config
    }

    /// Process-wide configuration, loaded on first use.
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(|| {
            let config = Self::load();
            log::debug!("Loaded configuration: {:?}", config);
            config
        })
    }

    /// Start pointer, defaulting to 0.
    pub fn start_ptr(&self) -> usize {
        self.start_ptr.unwrap_or(0)
    }

    /// Trace flag, defaulting to off.
    pub fn trace(&self) -> bool {
        self.trace.unwrap_or(false)
    }

    /// Resolve into machine construction settings.
    pub fn machine_config(&self) -> MachineConfig {
        MachineConfig {
            start_ptr: self.start_ptr(),
            trace: self.trace(),
        }
    }

    /// Parse one layer from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Overlay `other`: keys it sets win, keys it leaves unset are kept.
    pub fn merge(&mut self, other: Self) {
        self.start_ptr = other.start_ptr.or(self.start_ptr);
        self.trace = other.trace.or(self.trace);
    }

    /// Location of the per-user config file, if the platform has one.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("intcode").join("config.toml"))
    }

    /// Commented config file suitable for `--sample-config`.
    pub fn sample_config() -> String {
        r#"# intcode configuration
# Place this file at ~/.config/intcode/config.toml or ./intcode.toml

# Pointer of the first instruction to execute (default 0)
# start_ptr = 0

# Trace every instruction and memory write (default false)
# Trace lines are logged at trace level under the "intcode::trace" target.
trace = false
"#
        .to_string()
    }

    /// A missing file is silently absent; any other failure is warned about.
    fn load_from_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        Self::from_toml(&content)
            .map(|config| {
                log::info!("Loaded config from {}", path.display());
                config
            })
            .map_err(|e| log::warn!("Failed to parse {}: {}", path.display(), e))
            .ok()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(START_PTR_VAR) {
            match value.trim().parse() {
                Ok(ptr) => {
                    log::info!("Using {} from environment: {}", START_PTR_VAR, ptr);
                    self.start_ptr = Some(ptr);
                }
                Err(e) => log::warn!("Ignoring {}={:?}: {}", START_PTR_VAR, value, e),
            }
        }

        if let Some(value) = lookup(TRACE_VAR) {
            match parse_flag(&value) {
                Some(trace) => {
                    log::info!("Using {} from environment: {}", TRACE_VAR, trace);
                    self.trace = Some(trace);
                }
                None => log::warn!("Ignoring {}={:?}: expected a boolean", TRACE_VAR, value),
            }
        }
    }
}

/// Parse a boolean-ish environment value.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
