//! Reading ruler geometry
//!
//! The ruler is a bright band following the pointer with the screen dimmed
//! above and below it. Only the geometry lives here; drawing it is up to
//! the presentation layer.

/// Height of the highlighted band in pixels
pub const BAND_HEIGHT: u32 = 80;

const HALF_BAND: u32 = BAND_HEIGHT / 2;

/// Vertical layout of the ruler for one pointer position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulerBand {
    /// Height of the dimmed area above the band, from the top edge
    pub top_dim_height: u32,
    /// Top edge of the band
    pub band_top: u32,
    pub band_height: u32,
    /// Where the dimmed area below the band starts; it runs to the bottom
    pub bottom_dim_top: u32,
}

impl RulerBand {
    /// Layout centred on the pointer's vertical position
    ///
    /// Near the top edge the band is pinned at 0 rather than going negative.
    pub fn at(pointer_y: u32) -> Self {
        let band_top = pointer_y.saturating_sub(HALF_BAND);
        Self {
            top_dim_height: band_top,
            band_top,
            band_height: BAND_HEIGHT,
            bottom_dim_top: pointer_y.saturating_add(HALF_BAND),
        }
    }
}
