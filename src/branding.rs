//! Branding and application identity.
//!
//! Business details shown on the site live in the `[site]` section of the
//! config file; these are the names of the program itself.

/// The human-readable display name of the application.
pub const APP_DISPLAY_NAME: &str = "HousePaint";

/// The binary/executable name (lowercase, no spaces).
pub const APP_BINARY_NAME: &str = "housepaint";

/// The directory name for application data (config).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "HousePaint";

/// Short description for help text.
pub const APP_DESCRIPTION: &str = "Painting contractor site with an interactive house color visualizer";

/// Tagline shown under page heroes.
pub const TAGLINE: &str = "A brush you can Trust!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branding_consistency() {
        assert_eq!(APP_BINARY_NAME, APP_BINARY_NAME.to_lowercase());
        assert!(!APP_BINARY_NAME.contains(' '));
        assert!(!APP_DATA_DIR.contains(' '));
        assert_eq!(APP_BINARY_NAME, env!("CARGO_PKG_NAME"));
    }
}
