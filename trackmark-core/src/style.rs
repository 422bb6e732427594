//! Random marker colors
//!
//! Colors are HSL with high saturation so that track start markers and
//! their paths stand out on a map. No attempt is made to keep colors
//! distinct across a batch.

use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Default lower lightness bound
pub const DEFAULT_MIN_LIGHTNESS: u8 = 40;
/// Default upper lightness bound
pub const DEFAULT_MAX_LIGHTNESS: u8 = 60;
/// Saturation range, vibrant and unmuted
pub const SATURATION_RANGE: std::ops::RangeInclusive<u8> = 90..=100;

/// An `hsla(...)` CSS color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    /// Hue in degrees, `0..360`
    pub hue: u16,
    /// Saturation percentage
    pub saturation: u8,
    /// Lightness percentage
    pub lightness: u8,
    pub alpha: f64,
}

impl Hsla {
    /// Draw a random vibrant color.
    ///
    /// `min_lightness` is clamped to `0..=100` and `max_lightness` to
    /// `min_lightness..=100`, so inverted bounds collapse to a single value.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        min_lightness: u8,
        max_lightness: u8,
        alpha: f64,
    ) -> Self {
        let min_lightness = min_lightness.min(100);
        let max_lightness = max_lightness.clamp(min_lightness, 100);

        Self {
            hue: rng.gen_range(0..360),
            saturation: rng.gen_range(SATURATION_RANGE),
            lightness: rng.gen_range(min_lightness..=max_lightness),
            alpha,
        }
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Error returned when a string is not an `hsla(H, S%, L%, A)` color
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Not an hsla color: {0}")]
pub struct ParseHslaError(String);

impl FromStr for Hsla {
    type Err = ParseHslaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseHslaError(s.to_string());

        let inner = s
            .trim()
            .strip_prefix("hsla(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let [hue, saturation, lightness, alpha] = parts.as_slice() else {
            return Err(err());
        };

        let percent = |part: &str| -> Result<u8, ParseHslaError> {
            part.strip_suffix('%')
                .and_then(|n| n.parse().ok())
                .ok_or_else(err)
        };

        Ok(Self {
            hue: hue.parse().map_err(|_| err())?,
            saturation: percent(saturation)?,
            lightness: percent(lightness)?,
            alpha: alpha.parse().map_err(|_| err())?,
        })
    }
}

/// Random vibrant color string using the thread-local RNG
pub fn generate_color(min_lightness: u8, max_lightness: u8, alpha: f64) -> String {
    generate_color_with(&mut rand::thread_rng(), min_lightness, max_lightness, alpha)
}

/// Random vibrant color string from a caller-supplied RNG
pub fn generate_color_with<R: Rng + ?Sized>(
    rng: &mut R,
    min_lightness: u8,
    max_lightness: u8,
    alpha: f64,
) -> String {
    Hsla::random(rng, min_lightness, max_lightness, alpha).to_string()
}
