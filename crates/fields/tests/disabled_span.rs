//! Disabled-span behavior, isolated in its own test binary.
//!
//! `tracing` caches callsite interest process-globally, so a sibling test
//! that installs a subscriber (even thread-locally via `with_default`)
//! flips the `invocation_span` callsite to `Interest::always` and defeats
//! the "no subscriber installed" premise. This file never registers a
//! subscriber, so the premise holds for the whole process.

use lambda_fields::{Extractor, FunctionEnv, InvocationContext};

fn orders_extractor() -> Extractor {
    Extractor::builder()
        .env(
            FunctionEnv::new()
                .with_function_name("orders")
                .with_function_version("7"),
        )
        .build()
        .unwrap()
}

#[test]
fn disabled_span_makes_recording_a_no_op() {
    // No subscriber installed: the span is disabled and recording must not
    // panic or capture anything.
    let extractor = orders_extractor();
    let ctx = InvocationContext::new().with_request_id("abc-123");

    let span = extractor.all_span(&ctx);
    assert!(span.is_disabled());
}
