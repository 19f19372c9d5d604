use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Rgb8,
        error::{FieldError, FieldResult},
    },
    glyphs::IconSet,
    sample::targets::DEFAULT_ALPHA_THRESHOLD,
};

/// Per-instance configuration of a morphing particle field.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldConfig {
    /// Total particles in the pool.
    #[serde(default = "default_total")]
    pub total: usize,
    /// Number of leading particles eligible to morph into the icon silhouette.
    #[serde(default = "default_design_count")]
    pub design_count: usize,
    /// Rasterized pixels with alpha strictly above this become target candidates.
    #[serde(default = "default_alpha_threshold")]
    pub alpha_threshold: u8,
    /// Particle hue.
    #[serde(default = "default_color")]
    pub color: Rgb8,
    /// Artwork the design particles morph into.
    #[serde(default)]
    pub icons: IconSet,
    /// RNG seed; `None` seeds from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Delay before retrying initialization against a zero-area surface. Read by the frame
    /// loop through [`crate::LoopOpts::for_field`].
    #[serde(default = "default_init_retry_ms")]
    pub init_retry_ms: u64,
}

fn default_total() -> usize {
    7000
}

fn default_design_count() -> usize {
    6000
}

fn default_alpha_threshold() -> u8 {
    DEFAULT_ALPHA_THRESHOLD
}

fn default_color() -> Rgb8 {
    Rgb8::new(66, 133, 244)
}

fn default_init_retry_ms() -> u64 {
    100
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            total: default_total(),
            design_count: default_design_count(),
            alpha_threshold: default_alpha_threshold(),
            color: default_color(),
            icons: IconSet::None,
            seed: None,
            init_retry_ms: default_init_retry_ms(),
        }
    }
}

impl FieldConfig {
    /// Supplier card: shield, analytics, e-commerce and marketing glyphs.
    pub fn supplier() -> Self {
        Self {
            icons: IconSet::Supplier,
            ..Self::default()
        }
    }

    /// Warehouse card: forklift, shield, scanner and clipboard glyphs.
    pub fn warehouse() -> Self {
        Self {
            icons: IconSet::Warehouse,
            ..Self::default()
        }
    }

    /// Generic architecture backdrop: same pool, no artwork, idles forever.
    pub fn architecture() -> Self {
        Self {
            icons: IconSet::None,
            color: Rgb8::new(26, 179, 148),
            ..Self::default()
        }
    }

    /// Return a copy with a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> FieldResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| FieldError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> FieldResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read field config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> FieldResult<()> {
        if self.total == 0 {
            return Err(FieldError::validation("total particle count must be > 0"));
        }
        if self.design_count > self.total {
            return Err(FieldError::validation(format!(
                "design_count ({}) must be <= total ({})",
                self.design_count, self.total
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/config.rs"]
mod tests;
