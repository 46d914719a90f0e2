//! Global tracing subscriber installation.
//!
//! Kept in its own test binary because the subscriber is process-wide.

use taskdeck::{
    config::LogConfig,
    telemetry::{TelemetryError, init_tracing},
};

#[test]
fn subscriber_installs_once() {
    let config = LogConfig {
        filter: "taskdeck=debug".to_owned(),
    };

    init_tracing(&config).expect("first installation should succeed");
    let second = init_tracing(&config);

    assert!(matches!(second, Err(TelemetryError::Install(_))));
}
