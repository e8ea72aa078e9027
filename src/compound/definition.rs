use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compound::TranslationSource;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Tolerance used by color validation.
pub const EPSILON: f64 = 1e-8;

/// Static properties of one simulated compound.
///
/// Every simulation parameter that names a compound refers to one of these by
/// `internal_name`. Equality and hashing only look at `internal_name`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompoundDefinition {
    /// Registry key, assigned by the loader rather than read from the entry.
    #[serde(skip)]
    pub internal_name: String,

    /// Name shown to the player.
    #[serde(rename = "name")]
    pub display_name: String,

    pub volume: f64,

    pub is_cloud: bool,

    /// Always considered useful, so never dumped.
    pub is_always_useful: bool,

    pub is_environmental: bool,

    #[serde(alias = "colour")]
    pub color: Color,

    #[serde(skip)]
    untranslated_name: Option<String>,
}

impl CompoundDefinition {
    pub const TYPE_NAME: &'static str = "CompoundDefinition";

    #[must_use]
    pub fn new(
        internal_name: impl Into<String>,
        display_name: impl Into<String>,
        volume: f64,
        color: Color,
    ) -> Self {
        Self {
            internal_name: internal_name.into(),
            display_name: display_name.into(),
            volume,
            color,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_internal_name(mut self, internal_name: impl Into<String>) -> Self {
        self.set_internal_name(internal_name);
        self
    }

    pub fn set_internal_name(&mut self, internal_name: impl Into<String>) {
        self.internal_name = internal_name.into();
    }

    #[must_use]
    pub fn with_flags(
        mut self,
        is_cloud: bool,
        is_always_useful: bool,
        is_environmental: bool,
    ) -> Self {
        self.is_cloud = is_cloud;
        self.is_always_useful = is_always_useful;
        self.is_environmental = is_environmental;
        self
    }

    /// Translation key captured by a successful `check`.
    #[must_use]
    pub fn untranslated_name(&self) -> Option<&str> {
        self.untranslated_name.as_deref()
    }

    /// Parses one configuration entry. The result still has to pass `check`.
    pub fn from_json_str(internal_name: impl Into<String>, input: &str) -> ChartResult<Self> {
        let definition: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse compound definition json: {e}"))
        })?;
        Ok(definition.with_internal_name(internal_name))
    }

    /// Validates a freshly loaded definition. `name` identifies the record in
    /// error messages.
    ///
    /// Rules run in a fixed order and the first failure wins. An alpha of
    /// exactly 0 means the color alpha was never set and becomes 1 before the
    /// color rules run. Non-finite channels are rejected like a non-finite
    /// volume. On success the display name is captured as the
    /// translation key.
    pub fn check(&mut self, name: &str) -> ChartResult<()> {
        if self.display_name.is_empty() {
            return Err(invalid(name, "compound has no name"));
        }

        if self.color.alpha == 0.0 {
            self.color.alpha = 1.0;
        }

        if ![self.color.red, self.color.green, self.color.blue, self.color.alpha]
            .iter()
            .all(|channel| channel.is_finite())
        {
            return Err(invalid(name, "compound colour must be finite"));
        }

        if (self.color.alpha - 1.0).abs() > EPSILON {
            return Err(invalid(name, "compound colour cannot have alpha other than 1"));
        }

        if self.color.red.abs() < EPSILON
            && self.color.green.abs() < EPSILON
            && self.color.blue.abs() < EPSILON
        {
            return Err(invalid(name, "compound colour can't be black"));
        }

        if self.volume <= 0.0 || self.volume.is_nan() {
            return Err(invalid(name, "volume should be > 0"));
        }

        self.untranslated_name = Some(self.display_name.clone());
        debug!(record = name, internal_name = %self.internal_name, "compound definition checked");
        Ok(())
    }

    /// Resolves `display_name` from the key captured by `check`. Keys without
    /// a translation resolve to themselves; unchecked definitions are left
    /// untouched.
    pub fn apply_translations<S>(&mut self, source: &S)
    where
        S: TranslationSource + ?Sized,
    {
        if let Some(key) = &self.untranslated_name {
            self.display_name = source.translate(key).unwrap_or_else(|| key.clone());
        }
    }
}

fn invalid(name: &str, reason: &str) -> ChartError {
    ChartError::InvalidDefinition {
        name: name.to_owned(),
        type_name: CompoundDefinition::TYPE_NAME,
        reason: reason.to_owned(),
    }
}

impl PartialEq for CompoundDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.internal_name == other.internal_name
    }
}

impl Eq for CompoundDefinition {}

impl Hash for CompoundDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.internal_name.hash(state);
    }
}

impl fmt::Display for CompoundDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}
