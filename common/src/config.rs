use std::env;

pub const CONVERT_ENV: &str = "BOOKWORM_CONVERT";
pub const GHOSTSCRIPT_ENV: &str = "BOOKWORM_GS";

const DEFAULT_CONVERT: &str = "convert";
const DEFAULT_GHOSTSCRIPT: &str = "gs";

/// External executables the commands shell out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// ImageMagick's `convert` (or a compatible replacement).
    pub convert: String,
    /// Ghostscript.
    pub ghostscript: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            convert: DEFAULT_CONVERT.to_string(),
            ghostscript: DEFAULT_GHOSTSCRIPT.to_string(),
        }
    }
}

impl Toolchain {
    /// Defaults, overridden by `BOOKWORM_CONVERT` / `BOOKWORM_GS` when set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            convert: env::var(CONVERT_ENV).unwrap_or(defaults.convert),
            ghostscript: env::var(GHOSTSCRIPT_ENV).unwrap_or(defaults.ghostscript),
        }
    }
}

pub struct Config {
    pub toolchain: Toolchain,
    /// Print the commands instead of executing them.
    pub dry_run: bool,
    /// Drive independent batch commands concurrently.
    ///
    /// Commands never share a target, so ordering between them is irrelevant.
    pub parallel: bool,
    pub quiet: u8,
}
