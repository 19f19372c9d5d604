//! Icon artwork: the vector drawings that particle silhouettes are sampled from.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::foundation::{core::SurfaceSize, error::FieldResult};

pub(crate) mod canvas;
pub(crate) mod ring;
pub(crate) mod supplier;
pub(crate) mod svg;
pub(crate) mod warehouse;

use canvas::{CoverageMask, GlyphCanvas};
use ring::RingLayout;

/// Which artwork a field morphs into.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconSet {
    /// Shield, analytics, e-commerce and marketing glyphs on a gapped ring.
    Supplier,
    /// Forklift, shield, barcode scanner and clipboard glyphs on a gapped ring.
    Warehouse,
    /// No artwork: the field only ever idles.
    #[default]
    None,
    /// A custom silhouette loaded from an SVG document.
    Svg {
        /// Path to the SVG file; relative paths resolve against the config's directory.
        path: PathBuf,
    },
}

/// Loaded, ready-to-rasterize form of an [`IconSet`].
#[derive(Clone)]
pub enum IconArt {
    /// See [`IconSet::Supplier`].
    Supplier,
    /// See [`IconSet::Warehouse`].
    Warehouse,
    /// See [`IconSet::None`].
    None,
    /// Parsed SVG document.
    Svg(Arc<usvg::Tree>),
}

impl fmt::Debug for IconArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supplier => f.write_str("Supplier"),
            Self::Warehouse => f.write_str("Warehouse"),
            Self::None => f.write_str("None"),
            Self::Svg(tree) => {
                let size = tree.size();
                write!(f, "Svg({}x{})", size.width(), size.height())
            }
        }
    }
}

impl IconArt {
    /// Resolve an icon set, loading external artwork relative to `base_dir`.
    pub fn load(set: &IconSet, base_dir: &Path) -> FieldResult<Self> {
        Ok(match set {
            IconSet::Supplier => Self::Supplier,
            IconSet::Warehouse => Self::Warehouse,
            IconSet::None => Self::None,
            IconSet::Svg { path } => {
                let full = if path.is_absolute() {
                    path.clone()
                } else {
                    base_dir.join(path)
                };
                Self::Svg(Arc::new(svg::load_svg(&full)?))
            }
        })
    }

    /// Parse in-memory SVG bytes as custom artwork.
    pub fn from_svg_bytes(bytes: &[u8]) -> FieldResult<Self> {
        Ok(Self::Svg(Arc::new(svg::parse_svg(bytes)?)))
    }

    /// Return `true` when this artwork can never produce coverage.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Draw the artwork onto an offscreen surface of `size` and return its coverage.
    pub fn rasterize(&self, size: SurfaceSize) -> FieldResult<CoverageMask> {
        match self {
            Self::Supplier | Self::Warehouse => {
                let layout = RingLayout::for_size(size);
                let mut c = GlyphCanvas::new(size)?;
                layout.prime(&mut c);
                layout.draw_ring(&mut c);
                if matches!(self, Self::Supplier) {
                    supplier::draw(&mut c, &layout)?;
                } else {
                    warehouse::draw(&mut c, &layout);
                }
                c.finish()
            }
            Self::None => {
                size.to_u16()?;
                Ok(CoverageMask::empty(size))
            }
            Self::Svg(tree) => svg::rasterize_svg(tree, size),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyphs/icon_set.rs"]
mod tests;
