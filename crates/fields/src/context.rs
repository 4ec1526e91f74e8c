//! Per-invocation context model.
//!
//! [`InvocationContext`] mirrors the metadata a serverless runtime hands the
//! function for one invocation. Every field is optional: contexts built in
//! tests, local harnesses, or partial runtimes simply leave fields unset and
//! extraction skips them.
//!
//! The crate never originates or propagates a context. Callers build one from
//! whatever their runtime delivers and pass it by reference to an
//! [`Extractor`](crate::Extractor); extraction only reads it.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one invocation.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lambda_fields::InvocationContext;
///
/// let ctx = InvocationContext::new()
///     .with_request_id("8476a536-e9f4-11e8-9739-2dfe598c3fcd")
///     .with_memory_limit_mb(128)
///     .with_deadline_in(Duration::from_secs(30));
/// assert!(ctx.deadline.is_some());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvocationContext {
    /// Unique id of this invocation.
    pub request_id: Option<String>,
    /// Full ARN the function was invoked through.
    pub invoked_function_arn: Option<String>,
    /// Configured memory ceiling in megabytes.
    pub memory_limit_mb: Option<u32>,
    /// CloudWatch log group for the function.
    pub log_group: Option<String>,
    /// CloudWatch log stream for this execution environment.
    pub log_stream: Option<String>,
    /// Wall-clock instant the invocation times out at.
    pub deadline: Option<DateTime<Utc>>,
    /// Cognito identity of the caller, mobile invocations only.
    pub identity: Option<CognitoIdentity>,
    /// Client context attached by the AWS mobile SDK.
    pub client_context: Option<ClientContext>,
}

impl InvocationContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request id.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Set the invoked function ARN.
    #[must_use]
    pub fn with_invoked_function_arn(mut self, arn: impl Into<String>) -> Self {
        self.invoked_function_arn = Some(arn.into());
        self
    }

    /// Set the memory ceiling in megabytes.
    #[must_use]
    pub fn with_memory_limit_mb(mut self, limit: u32) -> Self {
        self.memory_limit_mb = Some(limit);
        self
    }

    /// Set the log group.
    #[must_use]
    pub fn with_log_group(mut self, group: impl Into<String>) -> Self {
        self.log_group = Some(group.into());
        self
    }

    /// Set the log stream.
    #[must_use]
    pub fn with_log_stream(mut self, stream: impl Into<String>) -> Self {
        self.log_stream = Some(stream.into());
        self
    }

    /// Set the invocation deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the deadline to `timeout` from now.
    ///
    /// Convenience for harnesses and tests; runtimes usually deliver an
    /// absolute deadline instead. Timeouts past the representable range
    /// saturate instead of overflowing.
    #[must_use]
    pub fn with_deadline_in(self, timeout: std::time::Duration) -> Self {
        let timeout = TimeDelta::from_std(timeout).unwrap_or(TimeDelta::MAX);
        let deadline = Utc::now()
            .checked_add_signed(timeout)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.with_deadline(deadline)
    }

    /// Set the caller's Cognito identity.
    #[must_use]
    pub fn with_identity(mut self, identity: CognitoIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Set the mobile client context.
    #[must_use]
    pub fn with_client_context(mut self, client_context: ClientContext) -> Self {
        self.client_context = Some(client_context);
        self
    }
}

/// Cognito identity of the caller.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CognitoIdentity {
    /// Authenticated identity id.
    pub identity_id: Option<String>,
    /// Identity pool the caller authenticated against.
    pub identity_pool_id: Option<String>,
}

impl CognitoIdentity {
    /// Create an empty identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identity id.
    #[must_use]
    pub fn with_identity_id(mut self, id: impl Into<String>) -> Self {
        self.identity_id = Some(id.into());
        self
    }

    /// Set the identity pool id.
    #[must_use]
    pub fn with_identity_pool_id(mut self, id: impl Into<String>) -> Self {
        self.identity_pool_id = Some(id.into());
        self
    }
}

/// Client context attached by the AWS mobile SDK.
///
/// Field names follow the JSON document the SDK sends, so a captured
/// context deserializes directly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientContext {
    /// Information about the client application.
    pub client: ClientApplication,
    /// Environment the client reported (locale, platform, ...).
    pub env: HashMap<String, String>,
    /// Free-form values the client application attached.
    pub custom: HashMap<String, String>,
}

/// Client application descriptor inside a [`ClientContext`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientApplication {
    /// Per-install id assigned by the mobile SDK.
    pub installation_id: Option<String>,
    /// Application title.
    pub app_title: Option<String>,
    /// Application version code.
    pub app_version_code: Option<String>,
    /// Application package name.
    pub app_package_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_chains_accumulate() {
        let ctx = InvocationContext::new()
            .with_request_id("abc-123")
            .with_invoked_function_arn("arn:aws:lambda:us-east-1:123456789012:function:orders")
            .with_memory_limit_mb(128)
            .with_log_group("/aws/lambda/orders")
            .with_log_stream("2026/08/23/[$LATEST]deadbeef");

        assert_eq!(ctx.request_id.as_deref(), Some("abc-123"));
        assert_eq!(ctx.memory_limit_mb, Some(128));
        assert_eq!(ctx.log_group.as_deref(), Some("/aws/lambda/orders"));
        assert!(ctx.deadline.is_none());
        assert!(ctx.identity.is_none());
    }

    #[test]
    fn deadline_in_lands_in_the_future() {
        let before = Utc::now();
        let ctx = InvocationContext::new().with_deadline_in(std::time::Duration::from_secs(30));
        let deadline = ctx.deadline.unwrap();

        assert!(deadline >= before + TimeDelta::seconds(29));
        assert!(deadline <= Utc::now() + TimeDelta::seconds(31));
    }

    #[test]
    fn client_context_deserializes_sdk_document() {
        let doc = r#"{
            "client": {
                "installation_id": "a8b1f5b5-4b3c-4a2e-ae1f-2a6a1c3e5f77",
                "app_title": "orders-mobile",
                "app_version_code": "42",
                "app_package_name": "com.example.orders"
            },
            "env": { "platform": "iPhoneOS" },
            "custom": { "tenant": "acme" }
        }"#;

        let cc: ClientContext = serde_json::from_str(doc).unwrap();
        assert_eq!(cc.client.app_title.as_deref(), Some("orders-mobile"));
        assert_eq!(cc.env["platform"], "iPhoneOS");
        assert_eq!(cc.custom["tenant"], "acme");
    }

    #[test]
    fn client_context_tolerates_missing_sections() {
        let cc: ClientContext = serde_json::from_str("{}").unwrap();
        assert!(cc.client.installation_id.is_none());
        assert!(cc.env.is_empty());
        assert!(cc.custom.is_empty());
    }

    #[test]
    fn context_round_trips_through_json() {
        let ctx = InvocationContext::new()
            .with_request_id("abc-123")
            .with_identity(CognitoIdentity::new().with_identity_id("us-east-1:beef"));

        let json = serde_json::to_string(&ctx).unwrap();
        let back: InvocationContext = serde_json::from_str(&json).unwrap();

        assert_eq!(back.request_id, ctx.request_id);
        assert_eq!(
            back.identity.unwrap().identity_id.as_deref(),
            Some("us-east-1:beef")
        );
    }
}
