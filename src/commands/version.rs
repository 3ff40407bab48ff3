//! Command: print version information.

/// The version stamped at build time, or the package version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("MACSETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the macsetup version to stdout.
pub fn run() {
    println!("macsetup {}", version());
}
