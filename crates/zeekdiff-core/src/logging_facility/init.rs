//! Subscriber installation for the binaries.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines at debug level
    Development,
    /// JSON lines at info level
    Production,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "zeekdiff=debug",
            Profile::Production => "zeekdiff=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Install a stderr subscriber for `profile`.
///
/// Only the first call has an effect, and a subscriber installed earlier
/// (such as the test capture layer) is left in place.
///
/// ```
/// use zeekdiff_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter);
        let _ = match profile {
            Profile::Development => builder.with_target(false).finish().try_init(),
            Profile::Production => builder.json().finish().try_init(),
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_every_crate() {
        for profile in [Profile::Development, Profile::Production] {
            let directive = profile.default_directive();
            assert!(directive.starts_with("zeekdiff="));
            directive.parse::<EnvFilter>().unwrap();
        }
        assert_ne!(
            Profile::Development.default_directive(),
            Profile::Production.default_directive()
        );
    }
}
