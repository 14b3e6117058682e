use std::sync::Once;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Global logging subscriber for tests, initialized at most once per binary.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(env_filter),
        );

        if subscriber.try_init().is_err() {
            // Another test harness already installed a subscriber.
            return;
        }
        info!("test setup complete");
    });
}
