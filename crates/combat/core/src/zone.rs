//! Timing-dial zone model.
//!
//! A weapon's dial is divided into five degree bands. A tap lands at an angle
//! in `[0, 360)` and resolves to exactly one [`Zone`]; the acting side's
//! accuracy stat widens the favorable bands and narrows the unfavorable ones
//! before lookup.
//!
//! Zone lookup is a pure function of `(bands, angle)`: no randomness decides
//! which zone a tap falls in.

use crate::config::BalanceConfig;
use crate::error::{ActionError, DataError};

/// Tolerance for the 360° band-sum invariant.
const BAND_SUM_TOLERANCE: f64 = 1e-6;

/// Discrete outcome of a timed tap, in canonical dial order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Zone {
    /// Worst outcome: the attack turns on the acting side.
    Injure,
    /// No effect.
    Miss,
    /// Reduced effect.
    Graze,
    /// Full effect.
    Normal,
    /// Amplified effect with a random bonus.
    Crit,
}

impl Zone {
    /// Canonical dial order, used for cumulative lookup and band adjustment.
    pub const ALL: [Zone; 5] = [Zone::Injure, Zone::Miss, Zone::Graze, Zone::Normal, Zone::Crit];

    /// Favorable zones widen with accuracy; the rest narrow.
    pub fn is_favorable(self) -> bool {
        matches!(self, Zone::Normal | Zone::Crit)
    }
}

/// Five band widths in degrees, one per [`Zone`] in canonical order.
///
/// A valid dial sums to 360°. Weapons define base widths; accuracy-adjusted
/// copies are produced by [`adjust_bands`] and satisfy the same invariant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneBands {
    pub injure: f64,
    pub miss: f64,
    pub graze: f64,
    pub normal: f64,
    pub crit: f64,
}

impl ZoneBands {
    pub fn new(injure: f64, miss: f64, graze: f64, normal: f64, crit: f64) -> Self {
        Self {
            injure,
            miss,
            graze,
            normal,
            crit,
        }
    }

    /// Widths in canonical order.
    pub fn widths(&self) -> [f64; 5] {
        [self.injure, self.miss, self.graze, self.normal, self.crit]
    }

    pub fn width(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Injure => self.injure,
            Zone::Miss => self.miss,
            Zone::Graze => self.graze,
            Zone::Normal => self.normal,
            Zone::Crit => self.crit,
        }
    }

    pub fn sum(&self) -> f64 {
        self.widths().iter().sum()
    }

    /// Enforce the 360° invariant; reference data that fails this is a fatal
    /// configuration error surfaced at load time.
    pub fn validate(&self, label: &str) -> Result<(), DataError> {
        let sum = self.sum();
        if (sum - 360.0).abs() > BAND_SUM_TOLERANCE || self.widths().iter().any(|w| *w < 0.0) {
            return Err(DataError::BandSum {
                label: label.to_owned(),
                sum,
            });
        }
        Ok(())
    }

    fn from_widths(widths: [f64; 5]) -> Self {
        Self::new(widths[0], widths[1], widths[2], widths[3], widths[4])
    }
}

/// Diminishing-returns gain applied to favorable band widths.
///
/// `1 + max_effect × acc / (acc + half_point)`: identity at accuracy 0,
/// saturating toward `1 + max_effect` as accuracy approaches 1. Unfavorable
/// bands shrink by the reciprocal.
fn accuracy_gain(accuracy: f64, cfg: &BalanceConfig) -> f64 {
    let accuracy = accuracy.clamp(0.0, 1.0);
    1.0 + cfg.accuracy_max_effect * accuracy / (accuracy + cfg.accuracy_half_point)
}

/// Adjust base band widths for the acting side's accuracy.
///
/// After the per-band scaling, widths are renormalized so the result sums to
/// exactly 360° for every accuracy in `[0, 1]`. Accuracy 0 returns the base
/// bands unchanged.
pub fn adjust_bands(bands: &ZoneBands, accuracy: f64, cfg: &BalanceConfig) -> ZoneBands {
    let gain = accuracy_gain(accuracy, cfg);

    let mut widths = bands.widths();
    for (width, zone) in widths.iter_mut().zip(Zone::ALL) {
        if zone.is_favorable() {
            *width *= gain;
        } else {
            *width /= gain;
        }
    }

    let sum: f64 = widths.iter().sum();
    let scale = 360.0 / sum;
    for width in &mut widths {
        *width *= scale;
    }

    ZoneBands::from_widths(widths)
}

/// Map a tap angle to a zone by walking the bands in canonical order.
///
/// An angle exactly on a boundary belongs to the band beginning at that
/// boundary. Angles outside `[0, 360)` (including NaN) are a client error.
pub fn resolve_zone(bands: &ZoneBands, angle: f64) -> Result<Zone, ActionError> {
    if !(angle >= 0.0 && angle < 360.0) {
        return Err(ActionError::InvalidTapAngle { angle });
    }

    let mut start = 0.0;
    for zone in Zone::ALL {
        let end = start + bands.width(zone);
        if angle < end {
            return Ok(zone);
        }
        start = end;
    }

    // Float residue can leave the last boundary a hair below 360.
    Ok(Zone::Crit)
}
