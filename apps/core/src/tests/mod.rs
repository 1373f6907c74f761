//! Test Module
//!
//! Cross-module tests for the analysis client. Unit tests live next to the code.
//!
//! ## Test Categories
//! - `actor_tests`: controller actor driven by mock analysis services
//! - `integration_tests`: controller + HTTP service against a mock server


use crate::controller::ControllerSnapshot;
use tokio::sync::watch;
use tokio::time::{timeout, Duration};

/// Waits until a published snapshot satisfies `pred`, failing the test after 10s.
pub async fn wait_until<F>(updates: &mut watch::Receiver<ControllerSnapshot>, pred: F) -> ControllerSnapshot
where
    F: FnMut(&ControllerSnapshot) -> bool,
{
    let snapshot = timeout(Duration::from_secs(10), updates.wait_for(pred))
        .await
        .expect("Timed out waiting for controller state")
        .expect("Controller stopped");
    snapshot.clone()
}
