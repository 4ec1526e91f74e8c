//! Process-wide function identity.
//!
//! The execution environment publishes the function's name and version as
//! environment variables once, at cold start; they never change while the
//! environment lives. [`FunctionEnv`] is an explicit snapshot of that pair
//! so extraction reads ambient process state in exactly one place,
//! [`FunctionEnv::from_env`], and everything downstream stays deterministic.

use std::fmt;
use std::sync::Arc;

/// Variable holding the function name.
pub const ENV_FUNCTION_NAME: &str = "AWS_LAMBDA_FUNCTION_NAME";
/// Variable holding the published function version.
pub const ENV_FUNCTION_VERSION: &str = "AWS_LAMBDA_FUNCTION_VERSION";

/// Snapshot of the function identity the execution environment publishes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionEnv {
    /// Name of the executing function.
    pub function_name: Option<String>,
    /// Published version of the executing function.
    pub function_version: Option<String>,
}

impl FunctionEnv {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the snapshot from the process environment.
    ///
    /// Unset and empty variables both become `None`; an empty name is as
    /// useless to a log reader as a missing one.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            function_name: read_var(ENV_FUNCTION_NAME),
            function_version: read_var(ENV_FUNCTION_VERSION),
        }
    }

    /// Set the function name.
    #[must_use]
    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    /// Set the function version.
    #[must_use]
    pub fn with_function_version(mut self, version: impl Into<String>) -> Self {
        self.function_version = Some(version.into());
        self
    }

    /// Whether neither field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.function_name.is_none() && self.function_version.is_none()
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Where an extractor obtains its [`FunctionEnv`].
///
/// Kept crate-private; builders expose it as `env(..)` / `env_resolver(..)`.
#[derive(Clone, Default)]
pub(crate) enum EnvSource {
    /// Read the process environment on demand.
    #[default]
    Process,
    /// Always produce this snapshot.
    Fixed(FunctionEnv),
    /// Ask a caller-supplied closure.
    Resolver(Arc<dyn Fn() -> FunctionEnv + Send + Sync>),
}

impl EnvSource {
    pub(crate) fn resolve(&self) -> FunctionEnv {
        match self {
            Self::Process => FunctionEnv::from_env(),
            Self::Fixed(env) => env.clone(),
            Self::Resolver(resolver) => resolver(),
        }
    }
}

impl fmt::Debug for EnvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process => f.write_str("Process"),
            Self::Fixed(env) => f.debug_tuple("Fixed").field(env).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}
