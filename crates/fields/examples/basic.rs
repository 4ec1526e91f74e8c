use std::time::Duration;

use lambda_fields::{ConfigError, Extractor, FieldKind, FunctionEnv, InvocationContext, to_json_map};

fn main() -> Result<(), ConfigError> {
    // Off Lambda the environment is empty, so inject the identity a real
    // execution environment would publish.
    let extractor = Extractor::builder()
        .env(
            FunctionEnv::new()
                .with_function_name("orders-api")
                .with_function_version("12"),
        )
        .fallback(FieldKind::LogGroup, "/aws/lambda/orders-api")
        .build()?;

    // One invocation's worth of context, as a runtime adapter would build it.
    let ctx = InvocationContext::new()
        .with_request_id("8476a536-e9f4-11e8-9739-2dfe598c3fcd")
        .with_memory_limit_mb(256)
        .with_log_stream("2026/08/23/[12]0123456789abcdef")
        .with_deadline_in(Duration::from_secs(30));

    println!("line format:");
    for field in extractor.all_values(&ctx) {
        println!("  {field}");
    }

    println!("\njson format:");
    let map = to_json_map(&extractor.all_values(&ctx));
    println!("  {}", serde_json::Value::Object(map));

    Ok(())
}
