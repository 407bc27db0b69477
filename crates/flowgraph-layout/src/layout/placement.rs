//! Coordinate assignment
//!
//! Turns the ordered ranks into concrete coordinates. Ranks are stacked
//! vertically, each rank band as tall as its tallest box plus the
//! configured rank separation. Within a rank, boxes are packed left to
//! right in their final order with the configured horizontal gap; no
//! centering or balancing pass runs afterward, so x positions are a direct
//! function of the ordering.
//!
//! All math here is in center coordinates. The engine converts to
//! top-left corners at the output boundary.

use tracing::debug;

use crate::core::{Point, Size};

use super::LayoutConfig;

/// Vertical extent of one rank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankBand {
    /// y of the band's top edge
    pub top: f64,
    /// Height of the tallest box in the rank
    pub height: f64,
}

impl RankBand {
    /// y of the band's bottom edge
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical mid-line of the band, where edge bends are placed
    pub fn mid(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Assigned coordinates, indexed by dense vertex index
#[derive(Debug, Clone)]
pub struct Placement {
    /// Box centers
    pub centers: Vec<Point>,
    /// One band per rank
    pub bands: Vec<RankBand>,
}

/// Assign a center to every vertex.
///
/// `layers` must cover every vertex exactly once and `sizes` is indexed by
/// dense vertex index.
pub fn place(layers: &[Vec<usize>], sizes: &[Size], config: &LayoutConfig) -> Placement {
    let mut centers = vec![Point::new(0.0, 0.0); sizes.len()];
    let mut bands = Vec::with_capacity(layers.len());

    let mut top = 0.0;
    for layer in layers {
        let band_height = layer
            .iter()
            .map(|&v| sizes[v].height)
            .fold(0.0f64, f64::max);

        let mut cursor = 0.0;
        for &v in layer {
            let size = sizes[v];
            centers[v] = Point::new(cursor + size.width / 2.0, top + band_height / 2.0);
            cursor += size.width + config.node_sep;
        }

        bands.push(RankBand {
            top,
            height: band_height,
        });
        top += band_height + config.rank_sep;
    }

    debug!(
        ranks = bands.len(),
        total_height = bands.last().map(|b| b.bottom()).unwrap_or(0.0),
        "Coordinate assignment completed"
    );

    Placement { centers, bands }
}
