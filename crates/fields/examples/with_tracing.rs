use std::time::Duration;

use lambda_fields::{ConfigError, Extractor, FunctionEnv, InvocationContext};

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt().init();

    let extractor = Extractor::builder()
        .env(
            FunctionEnv::new()
                .with_function_name("orders-api")
                .with_function_version("12"),
        )
        .build()?;

    // A handler would do this once per invocation: build the span, enter it,
    // and let every event inside inherit the invocation fields.
    let ctx = InvocationContext::new()
        .with_request_id("8476a536-e9f4-11e8-9739-2dfe598c3fcd")
        .with_memory_limit_mb(256)
        .with_deadline_in(Duration::from_secs(30));

    let span = extractor.all_span(&ctx);
    let _entered = span.enter();

    tracing::info!("validating order");
    tracing::info!(items = 3, "order accepted");

    Ok(())
}
