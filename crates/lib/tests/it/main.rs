/*! Integration tests for Kiwi.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * - server: HTTP tests against a live router bound to 127.0.0.1:0
 * - instance: storage behavior observed across process restarts
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("kiwi=info".parse().unwrap()))
        .with_test_writer()
        .try_init();
}

mod instance;
