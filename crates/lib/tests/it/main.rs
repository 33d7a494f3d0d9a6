/*! Integration tests for Roster.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - store: Tests for the user store and its JSON persistence
 * - api: Tests for the HTTP service, driven with raw requests
 * - client: Tests for the API client and session holder against a live service
 * - ui: Tests for the list view and form state machines
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("roster=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod api;
mod client;
mod helpers;
mod store;
