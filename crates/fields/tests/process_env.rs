//! Extraction through the real process environment.
//!
//! These tests mutate the `AWS_LAMBDA_*` variables, which are process-global
//! state; `#[serial]` keeps them from interleaving.
#![allow(unsafe_code)] // process environment mutation is an unsafe API in edition 2024

use lambda_fields::{ENV_FUNCTION_NAME, ENV_FUNCTION_VERSION, Extractor, FunctionEnv};
use pretty_assertions::assert_eq;
use serial_test::serial;

fn set_env(name: &str, value: &str) {
    unsafe { std::env::set_var(name, value) }
}

fn clear_env(name: &str) {
    unsafe { std::env::remove_var(name) }
}

#[test]
#[serial]
fn empty_environment_values_read_as_unset() {
    set_env(ENV_FUNCTION_NAME, "orders-fn");
    set_env(ENV_FUNCTION_VERSION, "");

    let env = FunctionEnv::from_env();
    assert_eq!(env.function_name.as_deref(), Some("orders-fn"));
    assert_eq!(env.function_version, None);

    clear_env(ENV_FUNCTION_NAME);
    assert!(FunctionEnv::from_env().is_empty());
}

#[test]
#[serial]
fn default_extractor_reads_the_process_environment() {
    set_env(ENV_FUNCTION_NAME, "orders-fn");
    set_env(ENV_FUNCTION_VERSION, "");

    let fields = Extractor::new().non_context_values();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].to_string(), "function_name=orders-fn");
}

#[test]
#[serial]
fn process_snapshot_is_cached_once_by_default() {
    set_env(ENV_FUNCTION_NAME, "orders-fn");
    clear_env(ENV_FUNCTION_VERSION);

    let caching = Extractor::new();
    let before = caching.non_context_values();

    set_env(ENV_FUNCTION_NAME, "renamed-fn");
    let after = caching.non_context_values();
    assert_eq!(before, after);

    let recomputing = Extractor::builder()
        .recompute_non_context(true)
        .build()
        .unwrap();
    let fields = recomputing.non_context_values();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].to_string(), "function_name=renamed-fn");
}
