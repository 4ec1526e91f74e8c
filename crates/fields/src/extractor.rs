//! The invocation field extractor.
//!
//! An [`Extractor`] is configured once, then shared for the lifetime of the
//! process; every accessor takes `&self` and extraction never fails. Missing
//! source values drop their field from the output instead of producing
//! placeholders, so sinks only ever see real values.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use crate::config::{Config, ConfigError};
use crate::context::InvocationContext;
use crate::env::{EnvSource, FunctionEnv};
use crate::field::{Field, FieldKind, FieldValue};
use crate::span::{invocation_span, record_fields};

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Extracts typed log fields from the process environment and the
/// per-invocation context.
///
/// Non-context fields (function name and version) are resolved through the
/// configured environment source and, by default, cached after the first
/// extraction; the execution environment never changes them, so one read is
/// enough. Context fields are computed fresh on every call.
///
/// # Examples
///
/// ```
/// use lambda_fields::{Extractor, FunctionEnv, InvocationContext};
///
/// let extractor = Extractor::builder()
///     .env(
///         FunctionEnv::new()
///             .with_function_name("orders")
///             .with_function_version("7"),
///     )
///     .build()?;
///
/// let ctx = InvocationContext::new().with_request_id("abc-123");
/// let rendered: Vec<String> = extractor
///     .basic_values(&ctx)
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(
///     rendered,
///     ["function_name=orders", "function_version=7", "request_id=abc-123"],
/// );
/// # Ok::<(), lambda_fields::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct Extractor {
    config: Config,
    env_source: EnvSource,
    cached_env: OnceLock<FunctionEnv>,
}

impl Extractor {
    /// Create an extractor with all defaults: basic selection, no fallbacks,
    /// non-context fields read from the process environment and cached once.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            env_source: EnvSource::default(),
            cached_env: OnceLock::new(),
        }
    }

    /// Start building a customized extractor.
    #[must_use]
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::default()
    }

    /// The extraction policy this extractor was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fields of the configured selection that come from the process
    /// environment rather than an invocation context.
    ///
    /// Usable before the first invocation arrives. Respects the
    /// cache-once/recompute policy.
    #[must_use]
    pub fn non_context_values(&self) -> Vec<Field> {
        let kinds: Vec<FieldKind> = self
            .config
            .selection()
            .iter()
            .copied()
            .filter(|kind| kind.is_non_context())
            .collect();
        self.extract(&kinds, None)
    }

    /// Fields of the configured selection that come from the invocation
    /// context, in emission order.
    #[must_use]
    pub fn context_values(&self, ctx: &InvocationContext) -> Vec<Field> {
        let kinds: Vec<FieldKind> = self
            .config
            .selection()
            .iter()
            .copied()
            .filter(|kind| !kind.is_non_context())
            .collect();
        self.extract(&kinds, Some(ctx))
    }

    /// The basic field set: function name, function version, request id.
    ///
    /// Always uses the basic set, whatever selection was configured.
    #[must_use]
    pub fn basic_values(&self, ctx: &InvocationContext) -> Vec<Field> {
        self.extract(&FieldKind::BASIC, Some(ctx))
    }

    /// Every recognized field the environment and context can supply.
    ///
    /// A superset of [`basic_values`](Self::basic_values) for the same
    /// context; identity and client fields appear only when their carrier
    /// structures are present.
    #[must_use]
    pub fn all_values(&self, ctx: &InvocationContext) -> Vec<Field> {
        self.extract(&FieldKind::ALL, Some(ctx))
    }

    /// An invocation span carrying [`basic_values`](Self::basic_values).
    #[must_use]
    pub fn basic_span(&self, ctx: &InvocationContext) -> tracing::Span {
        let span = invocation_span();
        record_fields(&span, &self.basic_values(ctx));
        span
    }

    /// An invocation span carrying [`all_values`](Self::all_values).
    #[must_use]
    pub fn all_span(&self, ctx: &InvocationContext) -> tracing::Span {
        let span = invocation_span();
        record_fields(&span, &self.all_values(ctx));
        span
    }

    fn extract(&self, kinds: &[FieldKind], ctx: Option<&InvocationContext>) -> Vec<Field> {
        let env = if kinds.iter().any(|kind| kind.is_non_context()) {
            Some(self.resolved_env())
        } else {
            None
        };

        kinds
            .iter()
            .copied()
            .filter_map(|kind| {
                let direct = if kind.is_non_context() {
                    env.as_ref().and_then(|env| env_value(kind, env))
                } else {
                    ctx.and_then(|ctx| context_value(kind, ctx))
                };
                direct
                    .or_else(|| self.config.fallback(kind).cloned())
                    .map(|value| Field::new(kind, value))
            })
            .collect()
    }

    /// Resolve the environment snapshot, consulting the source once or per
    /// call depending on the configured policy.
    fn resolved_env(&self) -> FunctionEnv {
        if self.config.recompute_non_context {
            self.env_source.resolve()
        } else {
            self.cached_env
                .get_or_init(|| self.env_source.resolve())
                .clone()
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

fn env_value(kind: FieldKind, env: &FunctionEnv) -> Option<FieldValue> {
    match kind {
        FieldKind::FunctionName => env.function_name.clone().map(FieldValue::from),
        FieldKind::FunctionVersion => env.function_version.clone().map(FieldValue::from),
        _ => None,
    }
}

fn context_value(kind: FieldKind, ctx: &InvocationContext) -> Option<FieldValue> {
    let client = |ctx: &InvocationContext| ctx.client_context.as_ref().map(|cc| cc.client.clone());
    match kind {
        FieldKind::FunctionName | FieldKind::FunctionVersion => None,
        FieldKind::RequestId => ctx.request_id.clone().map(FieldValue::from),
        FieldKind::InvokedFunctionArn => ctx.invoked_function_arn.clone().map(FieldValue::from),
        FieldKind::MemoryLimit => ctx.memory_limit_mb.map(FieldValue::from),
        FieldKind::LogGroup => ctx.log_group.clone().map(FieldValue::from),
        FieldKind::LogStream => ctx.log_stream.clone().map(FieldValue::from),
        FieldKind::TimeRemaining => ctx.deadline.map(|d| FieldValue::Duration(remaining(d))),
        FieldKind::CognitoIdentityId => ctx
            .identity
            .as_ref()
            .and_then(|identity| identity.identity_id.clone())
            .map(FieldValue::from),
        FieldKind::CognitoIdentityPoolId => ctx
            .identity
            .as_ref()
            .and_then(|identity| identity.identity_pool_id.clone())
            .map(FieldValue::from),
        FieldKind::InstallationId => client(ctx)
            .and_then(|app| app.installation_id)
            .map(FieldValue::from),
        FieldKind::AppTitle => client(ctx).and_then(|app| app.app_title).map(FieldValue::from),
        FieldKind::AppVersionCode => client(ctx)
            .and_then(|app| app.app_version_code)
            .map(FieldValue::from),
        FieldKind::AppPackageName => client(ctx)
            .and_then(|app| app.app_package_name)
            .map(FieldValue::from),
    }
}

/// Time left until `deadline`, clamped to zero once it has passed.
fn remaining(deadline: DateTime<Utc>) -> std::time::Duration {
    deadline
        .signed_duration_since(Utc::now())
        .to_std()
        .unwrap_or(std::time::Duration::ZERO)
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`Extractor`].
///
/// # Examples
///
/// ```
/// use lambda_fields::{Extractor, FieldKind};
///
/// let extractor = Extractor::builder()
///     .select([FieldKind::RequestId, FieldKind::LogStream])
///     .fallback(FieldKind::RequestId, "unknown")
///     .build()?;
/// assert_eq!(
///     extractor.config().selection(),
///     &[FieldKind::RequestId, FieldKind::LogStream],
/// );
/// # Ok::<(), lambda_fields::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ExtractorBuilder {
    recompute_non_context: bool,
    fallbacks: Vec<(FieldKind, FieldValue)>,
    selection: Option<Vec<FieldKind>>,
    env_source: EnvSource,
}

impl ExtractorBuilder {
    /// Re-resolve non-context fields on every extraction instead of caching
    /// the first resolution.
    #[must_use]
    pub fn recompute_non_context(mut self, recompute: bool) -> Self {
        self.recompute_non_context = recompute;
        self
    }

    /// Emit `value` for `kind` whenever its source value is absent.
    ///
    /// At most one fallback per field; a second registration for the same
    /// field makes [`build`](Self::build) fail.
    #[must_use]
    pub fn fallback(mut self, kind: FieldKind, value: impl Into<FieldValue>) -> Self {
        self.fallbacks.push((kind, value.into()));
        self
    }

    /// Replace the field selection used by
    /// [`non_context_values`](Extractor::non_context_values) and
    /// [`context_values`](Extractor::context_values).
    ///
    /// The selection is normalized to emission order; listing fields in a
    /// different order does not change the output order.
    #[must_use]
    pub fn select(mut self, kinds: impl IntoIterator<Item = FieldKind>) -> Self {
        self.selection = Some(kinds.into_iter().collect());
        self
    }

    /// Select the basic field set (the default).
    #[must_use]
    pub fn select_basic(self) -> Self {
        self.select(FieldKind::BASIC)
    }

    /// Select every recognized field.
    #[must_use]
    pub fn select_all(self) -> Self {
        self.select(FieldKind::ALL)
    }

    /// Resolve non-context fields from this fixed snapshot instead of the
    /// process environment.
    #[must_use]
    pub fn env(mut self, env: FunctionEnv) -> Self {
        self.env_source = EnvSource::Fixed(env);
        self
    }

    /// Resolve non-context fields through `resolver`.
    ///
    /// Under the default cache-once policy the resolver runs at most once
    /// per extractor; with
    /// [`recompute_non_context`](Self::recompute_non_context) it runs on
    /// every extraction that needs the environment.
    #[must_use]
    pub fn env_resolver(
        mut self,
        resolver: impl Fn() -> FunctionEnv + Send + Sync + 'static,
    ) -> Self {
        self.env_source = EnvSource::Resolver(std::sync::Arc::new(resolver));
        self
    }

    /// Build the extractor, rejecting contradictory configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateFallback`] when a field received two fallback
    /// values, [`ConfigError::DuplicateField`] when the selection names a
    /// field twice.
    pub fn build(self) -> Result<Extractor, ConfigError> {
        if let Some(kind) = first_duplicate(self.fallbacks.iter().map(|(kind, _)| *kind)) {
            return Err(ConfigError::DuplicateFallback(kind));
        }

        let requested = self
            .selection
            .unwrap_or_else(|| FieldKind::BASIC.to_vec());
        if let Some(kind) = first_duplicate(requested.iter().copied()) {
            return Err(ConfigError::DuplicateField(kind));
        }

        // Normalize to emission order.
        let selection: Vec<FieldKind> = FieldKind::ALL
            .into_iter()
            .filter(|kind| requested.contains(kind))
            .collect();

        Ok(Extractor {
            config: Config {
                recompute_non_context: self.recompute_non_context,
                fallbacks: self.fallbacks,
                selection,
            },
            env_source: self.env_source,
            cached_env: OnceLock::new(),
        })
    }
}

fn first_duplicate(kinds: impl Iterator<Item = FieldKind>) -> Option<FieldKind> {
    let mut seen: Vec<FieldKind> = Vec::new();
    for kind in kinds {
        if seen.contains(&kind) {
            return Some(kind);
        }
        seen.push(kind);
    }
    None
}
