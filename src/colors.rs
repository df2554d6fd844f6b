/*!
 * Per-speaker color allocation.
 *
 * A palette of saturated colors is sampled once per allocator, shuffled, and
 * handed out one color per speaker until it runs dry, at which point a fresh
 * palette is generated. Allocators are owned values: create one per export
 * and never share it between exports.
 */

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::app_config::PaletteConfig;
use crate::errors::ColorError;

// @const: Sampling attempts allowed per requested palette entry
const ATTEMPTS_PER_COLOR: usize = 100;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Every channel below 50
    pub fn is_near_black(&self) -> bool {
        self.r < 50 && self.g < 50 && self.b < 50
    }

    /// Every channel above 200
    pub fn is_near_white(&self) -> bool {
        self.r > 200 && self.g > 200 && self.b > 200
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Convert HSV (all components in `[0, 1]`) to RGB, truncating each channel.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    Rgb::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Sample up to `config.size` distinct saturated colors.
///
/// Hue is drawn uniformly; saturation and value come from the config.
/// Near-black and near-white results are discarded. Sampling gives up after
/// a bounded number of attempts, so the palette can come back short (or empty
/// for configs that only produce rejected colors).
pub fn generate_vibrant_colors<R: Rng>(config: &PaletteConfig, rng: &mut R) -> Vec<Rgb> {
    let mut seen = HashSet::with_capacity(config.size);
    let mut colors = Vec::with_capacity(config.size);
    let max_attempts = config.size.saturating_mul(ATTEMPTS_PER_COLOR);
    let mut attempts = 0;

    while colors.len() < config.size && attempts < max_attempts {
        attempts += 1;
        let color = hsv_to_rgb(rng.random::<f64>(), config.saturation, config.value);

        if color.is_near_black() || color.is_near_white() {
            continue;
        }

        if seen.insert(color) {
            colors.push(color);
        }
    }

    if colors.len() < config.size {
        warn!(
            "Palette generation stopped at {} of {} colors after {} attempts",
            colors.len(),
            config.size,
            attempts
        );
    }

    colors
}

/// Hands out a stable color per speaker for the lifetime of one export.
#[derive(Debug)]
pub struct ColorAllocator<R = StdRng> {
    config: PaletteConfig,
    rng: R,
    available: Vec<Rgb>,
    assigned: HashMap<String, Rgb>,
}

impl ColorAllocator<StdRng> {
    /// Create an allocator seeded from the operating system.
    pub fn new(config: &PaletteConfig) -> Result<Self, ColorError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> ColorAllocator<R> {
    /// Create an allocator driven by the given random source.
    pub fn with_rng(config: &PaletteConfig, rng: R) -> Result<Self, ColorError> {
        let mut allocator = Self {
            config: config.clone(),
            rng,
            available: Vec::new(),
            assigned: HashMap::new(),
        };
        allocator.refill()?;
        Ok(allocator)
    }

    /// Color for `speaker`, allocating an unused one on first sight.
    pub fn color_for(&mut self, speaker: &str) -> Result<Rgb, ColorError> {
        if let Some(color) = self.assigned.get(speaker) {
            return Ok(*color);
        }

        if self.available.is_empty() {
            debug!("Palette exhausted after {} speakers, regenerating", self.assigned.len());
            self.refill()?;
        }

        let color = match self.available.pop() {
            Some(color) => color,
            None => return Err(self.empty_palette()),
        };
        self.assigned.insert(speaker.to_string(), color);
        Ok(color)
    }

    /// Color already given to `speaker`, without allocating
    pub fn assigned_color(&self, speaker: &str) -> Option<Rgb> {
        self.assigned.get(speaker).copied()
    }

    /// Number of speakers that have a color
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    /// Colors left before the palette is regenerated
    pub fn remaining(&self) -> usize {
        self.available.len()
    }

    fn refill(&mut self) -> Result<(), ColorError> {
        let mut palette = generate_vibrant_colors(&self.config, &mut self.rng);
        if palette.is_empty() {
            return Err(self.empty_palette());
        }
        palette.shuffle(&mut self.rng);
        self.available = palette;
        Ok(())
    }

    fn empty_palette(&self) -> ColorError {
        ColorError::EmptyPalette {
            saturation: self.config.saturation,
            value: self.config.value,
        }
    }
}
