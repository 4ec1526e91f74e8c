//! Extractor configuration.
//!
//! A [`Config`] is assembled once through
//! [`ExtractorBuilder`](crate::ExtractorBuilder) and read-only afterward,
//! so a shared extractor behaves identically from every thread.

use thiserror::Error;

use crate::field::{FieldKind, FieldValue};

/// Immutable extraction policy.
#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) recompute_non_context: bool,
    pub(crate) fallbacks: Vec<(FieldKind, FieldValue)>,
    pub(crate) selection: Vec<FieldKind>,
}

impl Config {
    /// Whether non-context fields are re-resolved on every extraction
    /// instead of cached after the first.
    #[must_use]
    pub fn recompute_non_context(&self) -> bool {
        self.recompute_non_context
    }

    /// The fallback registered for `kind`, if any.
    #[must_use]
    pub fn fallback(&self, kind: FieldKind) -> Option<&FieldValue> {
        self.fallbacks
            .iter()
            .find(|(registered, _)| *registered == kind)
            .map(|(_, value)| value)
    }

    /// Fields custom extraction emits, in emission order.
    ///
    /// [`basic_values`](crate::Extractor::basic_values) and
    /// [`all_values`](crate::Extractor::all_values) ignore the selection
    /// and always use their fixed sets.
    #[must_use]
    pub fn selection(&self) -> &[FieldKind] {
        &self.selection
    }
}

impl Default for Config {
    /// Basic field set, no fallbacks, non-context fields cached once.
    fn default() -> Self {
        Self {
            recompute_non_context: false,
            fallbacks: Vec::new(),
            selection: FieldKind::BASIC.to_vec(),
        }
    }
}

/// Rejected extractor configuration.
///
/// Configuration mistakes are reported at build time rather than silently
/// merged; a duplicate usually means two code paths disagree about a
/// default and neither should win quietly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The same field was given two fallback values.
    #[error("fallback for field `{0}` registered more than once")]
    DuplicateFallback(FieldKind),
    /// The same field was selected twice.
    #[error("field `{0}` selected more than once")]
    DuplicateField(FieldKind),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_selects_basic_and_caches() {
        let config = Config::default();
        assert!(!config.recompute_non_context());
        assert_eq!(config.selection(), &FieldKind::BASIC);
        assert_eq!(config.fallback(FieldKind::RequestId), None);
    }

    #[test]
    fn fallback_lookup_finds_registered_kind() {
        let config = Config {
            fallbacks: vec![(FieldKind::RequestId, FieldValue::Str("unknown".into()))],
            ..Config::default()
        };
        assert_eq!(
            config.fallback(FieldKind::RequestId),
            Some(&FieldValue::Str("unknown".into()))
        );
        assert_eq!(config.fallback(FieldKind::LogGroup), None);
    }

    #[test]
    fn errors_render_the_offending_field() {
        assert_eq!(
            ConfigError::DuplicateFallback(FieldKind::RequestId).to_string(),
            "fallback for field `request_id` registered more than once"
        );
        assert_eq!(
            ConfigError::DuplicateField(FieldKind::AppTitle).to_string(),
            "field `app_title` selected more than once"
        );
    }
}
