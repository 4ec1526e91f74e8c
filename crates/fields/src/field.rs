//! Field kinds, values, and emission order.
//!
//! A [`Field`] is one `(name, value)` pair destined for a structured log
//! entry. [`FieldKind`] enumerates every field this crate knows how to
//! produce and fixes the order fields are emitted in, so log pipelines
//! that diff consecutive entries see a stable layout.

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Every log field this crate can emit.
///
/// Variant order is emission order: any sequence of extracted fields is
/// a subsequence of [`FieldKind::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Name of the executing function, from the process environment.
    FunctionName,
    /// Published version of the executing function, from the process environment.
    FunctionVersion,
    /// Unique id of the current invocation.
    RequestId,
    /// Full ARN the function was invoked through (may carry an alias).
    InvokedFunctionArn,
    /// Configured memory ceiling in megabytes.
    MemoryLimit,
    /// CloudWatch log group receiving the function's output.
    LogGroup,
    /// CloudWatch log stream receiving the function's output.
    LogStream,
    /// Time left before the invocation deadline, measured at extraction.
    TimeRemaining,
    /// Cognito identity id of the caller, mobile invocations only.
    CognitoIdentityId,
    /// Cognito identity pool the caller authenticated against.
    CognitoIdentityPoolId,
    /// Mobile SDK installation id from the client context.
    InstallationId,
    /// Client application title from the client context.
    AppTitle,
    /// Client application version code from the client context.
    AppVersionCode,
    /// Client application package name from the client context.
    AppPackageName,
}

impl FieldKind {
    /// The basic set: function identity plus the per-invocation request id.
    pub const BASIC: [Self; 3] = [Self::FunctionName, Self::FunctionVersion, Self::RequestId];

    /// Every recognized field, in emission order. [`Self::BASIC`] is a prefix.
    pub const ALL: [Self; 14] = [
        Self::FunctionName,
        Self::FunctionVersion,
        Self::RequestId,
        Self::InvokedFunctionArn,
        Self::MemoryLimit,
        Self::LogGroup,
        Self::LogStream,
        Self::TimeRemaining,
        Self::CognitoIdentityId,
        Self::CognitoIdentityPoolId,
        Self::InstallationId,
        Self::AppTitle,
        Self::AppVersionCode,
        Self::AppPackageName,
    ];

    /// The key this field is emitted under.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FunctionName => "function_name",
            Self::FunctionVersion => "function_version",
            Self::RequestId => "request_id",
            Self::InvokedFunctionArn => "invoked_function_arn",
            Self::MemoryLimit => "memory_limit_mb",
            Self::LogGroup => "log_group",
            Self::LogStream => "log_stream",
            Self::TimeRemaining => "time_remaining_ms",
            Self::CognitoIdentityId => "cognito_identity_id",
            Self::CognitoIdentityPoolId => "cognito_identity_pool_id",
            Self::InstallationId => "installation_id",
            Self::AppTitle => "app_title",
            Self::AppVersionCode => "app_version_code",
            Self::AppPackageName => "app_package_name",
        }
    }

    /// Whether this field is resolved from the process environment rather
    /// than the per-invocation context.
    ///
    /// Non-context fields are stable for the lifetime of the execution
    /// environment, which is what makes caching them sound.
    #[must_use]
    pub const fn is_non_context(self) -> bool {
        matches!(self, Self::FunctionName | Self::FunctionVersion)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A typed field value.
///
/// Values stay typed until they reach a sink, so numeric fields land as
/// numbers and durations can be rendered per sink (`Display` humanizes,
/// [`to_json_map`] emits integral milliseconds).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// UTF-8 text.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Elapsed or remaining time.
    Duration(Duration),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Duration> for FieldValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Duration(d) => f.write_str(&format_duration(*d)),
        }
    }
}

/// Format a duration in human-readable form
fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let mins = total_ms / 60_000;
        let secs = (total_ms % 60_000) / 1000;
        format!("{mins}m {secs}s")
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// One named, typed log field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    kind: FieldKind,
    value: FieldValue,
}

impl Field {
    /// Create a field of the given kind.
    #[must_use]
    pub fn new(kind: FieldKind, value: impl Into<FieldValue>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// The kind of this field.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The key this field is emitted under.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.kind.key()
    }

    /// The value of this field.
    #[must_use]
    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key(), self.value)
    }
}

/// Convert fields to a JSON object for key/value sinks.
///
/// Durations are emitted as integral milliseconds, matching the
/// `time_remaining_ms` key.
///
/// # Examples
///
/// ```
/// use lambda_fields::{Field, FieldKind, to_json_map};
///
/// let fields = vec![Field::new(FieldKind::MemoryLimit, 128_u32)];
/// let map = to_json_map(&fields);
/// assert_eq!(map["memory_limit_mb"], 128);
/// ```
#[must_use]
pub fn to_json_map(fields: &[Field]) -> serde_json::Map<String, serde_json::Value> {
    fields
        .iter()
        .map(|field| {
            let value = match field.value() {
                FieldValue::Str(s) => serde_json::Value::from(s.as_str()),
                FieldValue::Int(i) => serde_json::Value::from(*i),
                FieldValue::Duration(d) => serde_json::Value::from(d.as_millis() as u64),
            };
            (field.key().to_owned(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(FieldKind::FunctionName, "function_name")]
    #[case(FieldKind::FunctionVersion, "function_version")]
    #[case(FieldKind::RequestId, "request_id")]
    #[case(FieldKind::InvokedFunctionArn, "invoked_function_arn")]
    #[case(FieldKind::MemoryLimit, "memory_limit_mb")]
    #[case(FieldKind::LogGroup, "log_group")]
    #[case(FieldKind::LogStream, "log_stream")]
    #[case(FieldKind::TimeRemaining, "time_remaining_ms")]
    #[case(FieldKind::CognitoIdentityId, "cognito_identity_id")]
    #[case(FieldKind::CognitoIdentityPoolId, "cognito_identity_pool_id")]
    #[case(FieldKind::InstallationId, "installation_id")]
    #[case(FieldKind::AppTitle, "app_title")]
    #[case(FieldKind::AppVersionCode, "app_version_code")]
    #[case(FieldKind::AppPackageName, "app_package_name")]
    fn kind_keys(#[case] kind: FieldKind, #[case] key: &str) {
        assert_eq!(kind.key(), key);
        assert_eq!(kind.to_string(), key);
    }

    #[test]
    fn basic_is_a_prefix_of_all() {
        assert_eq!(&FieldKind::ALL[..FieldKind::BASIC.len()], &FieldKind::BASIC);
    }

    #[test]
    fn all_has_no_duplicates() {
        for (i, kind) in FieldKind::ALL.iter().enumerate() {
            assert!(
                !FieldKind::ALL[i + 1..].contains(kind),
                "{kind} appears twice in FieldKind::ALL"
            );
        }
    }

    #[test]
    fn only_function_identity_is_non_context() {
        let non_context: Vec<FieldKind> = FieldKind::ALL
            .into_iter()
            .filter(|kind| kind.is_non_context())
            .collect();
        assert_eq!(
            non_context,
            vec![FieldKind::FunctionName, FieldKind::FunctionVersion]
        );
    }

    #[test]
    fn value_conversions() {
        assert_eq!(FieldValue::from("abc"), FieldValue::Str("abc".into()));
        assert_eq!(FieldValue::from(128_u32), FieldValue::Int(128));
        assert_eq!(FieldValue::from(-3_i64), FieldValue::Int(-3));
        assert_eq!(
            FieldValue::from(Duration::from_secs(2)),
            FieldValue::Duration(Duration::from_secs(2))
        );
    }

    #[rstest]
    #[case(Duration::from_millis(0), "0ms")]
    #[case(Duration::from_millis(999), "999ms")]
    #[case(Duration::from_millis(1500), "1.50s")]
    #[case(Duration::from_secs(90), "1m 30s")]
    fn duration_display(#[case] duration: Duration, #[case] rendered: &str) {
        assert_eq!(FieldValue::Duration(duration).to_string(), rendered);
    }

    #[test]
    fn field_display_is_key_equals_value() {
        let field = Field::new(FieldKind::RequestId, "abc-123");
        assert_eq!(field.to_string(), "request_id=abc-123");

        let field = Field::new(FieldKind::MemoryLimit, 512_u32);
        assert_eq!(field.to_string(), "memory_limit_mb=512");
    }

    #[test]
    fn json_map_keeps_types() {
        let fields = vec![
            Field::new(FieldKind::FunctionName, "orders"),
            Field::new(FieldKind::MemoryLimit, 128_u32),
            Field::new(FieldKind::TimeRemaining, Duration::from_millis(4500)),
        ];
        let map = to_json_map(&fields);

        assert_eq!(map.len(), 3);
        assert_eq!(map["function_name"], "orders");
        assert_eq!(map["memory_limit_mb"], 128);
        assert_eq!(map["time_remaining_ms"], 4500);
    }
}
