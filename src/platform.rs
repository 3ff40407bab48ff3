//! Host platform detection.

/// Whether this binary was built for macOS.
///
/// The steps shell out to macOS-only tools (`defaults`, `killall Dock`,
/// `dockutil`); elsewhere they are expected to fail.
#[must_use]
pub const fn is_macos() -> bool {
    cfg!(target_os = "macos")
}
