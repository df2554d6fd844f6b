/*!
 * Tests for speaker color palettes
 */

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use srtdialog::app_config::PaletteConfig;
use srtdialog::colors::{generate_vibrant_colors, hsv_to_rgb, ColorAllocator, Rgb};
use srtdialog::errors::ColorError;

/// Test HSV conversion on sector boundaries
#[test]
fn test_hsvToRgb_withSectorStarts_shouldMatchPrimaries() {
    assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
    assert_eq!(hsv_to_rgb(0.5, 1.0, 1.0), Rgb::new(0, 255, 255));
    assert_eq!(hsv_to_rgb(0.0, 0.0, 1.0), Rgb::new(255, 255, 255));
}

/// Test that channels are truncated, not rounded
#[test]
fn test_hsvToRgb_withDefaultSaturationAndValue_shouldTruncate() {
    // 0.9 * 255 = 229.5, 0.9 * 0.2 * 255 = 45.9
    assert_eq!(hsv_to_rgb(0.0, 0.8, 0.9), Rgb::new(229, 45, 45));
}

/// Test the near-black and near-white thresholds
#[test]
fn test_rgb_thresholds_shouldRequireEveryChannel() {
    assert!(Rgb::new(49, 49, 49).is_near_black());
    assert!(!Rgb::new(50, 10, 10).is_near_black());
    assert!(Rgb::new(201, 201, 201).is_near_white());
    assert!(!Rgb::new(200, 255, 255).is_near_white());
}

/// Test that generated palettes honor size and distinctness
#[test]
fn test_generateVibrantColors_withSmallSize_shouldReturnExactlyThatMany() {
    let config = PaletteConfig {
        size: 12,
        ..PaletteConfig::default()
    };
    let colors = generate_vibrant_colors(&config, &mut StdRng::seed_from_u64(11));

    assert_eq!(colors.len(), 12);
    assert_eq!(colors.iter().collect::<HashSet<_>>().len(), 12);
}

/// Test that an unreachable palette comes back short instead of looping forever
#[test]
fn test_generateVibrantColors_withGreyscaleConfig_shouldStopEarly() {
    let config = PaletteConfig {
        size: 50,
        saturation: 0.0001,
        value: 0.5,
    };
    let colors = generate_vibrant_colors(&config, &mut StdRng::seed_from_u64(5));

    // Near-zero saturation collapses almost every hue onto the same grey
    assert!(colors.len() < 50);
}

/// Test that distinct speakers get distinct colors within one palette
#[test]
fn test_colorAllocator_withManySpeakers_shouldNotReuseColors() {
    let mut allocator =
        ColorAllocator::with_rng(&PaletteConfig::default(), StdRng::seed_from_u64(99)).unwrap();

    let mut seen = HashSet::new();
    for i in 0..100 {
        let color = allocator.color_for(&format!("Speaker {}", i)).unwrap();
        assert!(seen.insert(color), "color reused for speaker {}", i);
    }
    assert_eq!(allocator.assigned_count(), 100);
}

/// Test that an allocator keeps working past its first palette
#[test]
fn test_colorAllocator_pastPaletteSize_shouldKeepAllocating() {
    let config = PaletteConfig {
        size: 3,
        ..PaletteConfig::default()
    };
    let mut allocator = ColorAllocator::with_rng(&config, StdRng::seed_from_u64(4)).unwrap();

    for name in ["A", "B", "C", "D", "E", "F", "G"] {
        allocator.color_for(name).unwrap();
    }
    let first = allocator.assigned_color("A").unwrap();
    assert_eq!(allocator.color_for("A").unwrap(), first);
    assert_eq!(allocator.assigned_count(), 7);
}

/// Test that a palette of only dark colors is reported as an error
#[test]
fn test_colorAllocator_withOnlyDarkColors_shouldFail() {
    let config = PaletteConfig {
        size: 10,
        saturation: 1.0,
        value: 0.15,
    };
    let result = ColorAllocator::with_rng(&config, StdRng::seed_from_u64(8));

    assert!(matches!(result, Err(ColorError::EmptyPalette { .. })));
}

/// Test the OS-seeded constructor
#[test]
fn test_colorAllocator_new_shouldStartWithFullPalette() {
    let allocator = ColorAllocator::new(&PaletteConfig::default()).unwrap();
    assert_eq!(allocator.remaining(), PaletteConfig::default().size);
    assert_eq!(allocator.assigned_count(), 0);
}
