//! `tracing` integration.
//!
//! Subscribers only accept values for fields a span declared at creation,
//! so [`invocation_span`] declares the full field universe as
//! [`Empty`](tracing::field::Empty) and [`record_fields`] fills in whatever
//! an extraction produced. Keys that stay empty are simply not rendered by
//! the usual formatters.

use tracing::Span;
use tracing::field::Empty;

use crate::field::{Field, FieldValue};

/// Create the per-invocation span with every recognized field declared.
///
/// The span is created at `INFO` level under this crate's target; if no
/// subscriber is interested it is disabled and recording onto it is a
/// no-op.
#[must_use]
pub fn invocation_span() -> Span {
    tracing::info_span!(
        "invocation",
        function_name = Empty,
        function_version = Empty,
        request_id = Empty,
        invoked_function_arn = Empty,
        memory_limit_mb = Empty,
        log_group = Empty,
        log_stream = Empty,
        time_remaining_ms = Empty,
        cognito_identity_id = Empty,
        cognito_identity_pool_id = Empty,
        installation_id = Empty,
        app_title = Empty,
        app_version_code = Empty,
        app_package_name = Empty,
    )
}

/// Record extracted fields onto `span`.
///
/// Strings are recorded as `&str`, integers as `i64`, durations as integral
/// milliseconds. Recording a key the span did not declare is silently
/// dropped by `tracing`; spans from [`invocation_span`] declare every key
/// this crate emits.
pub fn record_fields(span: &Span, fields: &[Field]) {
    for field in fields {
        match field.value() {
            FieldValue::Str(s) => {
                span.record(field.key(), s.as_str());
            }
            FieldValue::Int(i) => {
                span.record(field.key(), *i);
            }
            FieldValue::Duration(d) => {
                span.record(field.key(), d.as_millis() as u64);
            }
        }
    }
}
