//! Runtime configuration.
//!
//! # Environment
//!
//! [`RuntimeConfig::from_env`] reads:
//!
//! - `VALK_INLINE_CACHE_LIMIT`: functions remembered per call site before it
//!   turns megamorphic (default 2)
//! - `VALK_MAX_CALL_DEPTH`: maximum nested calls, or `none` for no limit
//!   (default: no limit on native targets, 200 on wasm)
//!
//! Unparseable values are logged and ignored.

/// Functions remembered per call site before it turns megamorphic.
pub const DEFAULT_INLINE_CACHE_LIMIT: usize = 2;

/// Default call depth limit on wasm, where the host stack cannot grow.
pub const WASM_MAX_CALL_DEPTH: usize = 200;

const INLINE_CACHE_LIMIT_VAR: &str = "VALK_INLINE_CACHE_LIMIT";
const MAX_CALL_DEPTH_VAR: &str = "VALK_MAX_CALL_DEPTH";

/// Tunables for one registry and everything dispatched through it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Functions a call site caches before giving up on speculation.
    pub inline_cache_limit: usize,
    /// Maximum nested calls per dispatcher. `None` means unlimited.
    pub max_call_depth: Option<usize>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        RuntimeConfig {
            inline_cache_limit: DEFAULT_INLINE_CACHE_LIMIT,
            max_call_depth: default_max_call_depth(),
        }
    }

    #[must_use]
    pub fn with_inline_cache_limit(mut self, limit: usize) -> Self {
        self.inline_cache_limit = limit;
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(raw) = lookup(INLINE_CACHE_LIMIT_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(limit) => config.inline_cache_limit = limit,
                Err(_) => {
                    tracing::warn!(var = INLINE_CACHE_LIMIT_VAR, value = %raw, "ignoring invalid value");
                }
            }
        }

        if let Some(raw) = lookup(MAX_CALL_DEPTH_VAR) {
            let raw_trimmed = raw.trim();
            if raw_trimmed.eq_ignore_ascii_case("none") {
                config.max_call_depth = None;
            } else {
                match raw_trimmed.parse::<usize>() {
                    Ok(depth) => config.max_call_depth = Some(depth),
                    Err(_) => {
                        tracing::warn!(var = MAX_CALL_DEPTH_VAR, value = %raw, "ignoring invalid value");
                    }
                }
            }
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_max_call_depth() -> Option<usize> {
    None
}

#[cfg(target_arch = "wasm32")]
fn default_max_call_depth() -> Option<usize> {
    Some(WASM_MAX_CALL_DEPTH)
}
