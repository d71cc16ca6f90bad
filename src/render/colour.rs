// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use hsl::HSL;
use plotters::style::{RGBColor, BLACK, WHITE};

pub const LINE_COLOUR: RGBColor = RGBColor(0x1F, 0x77, 0xB4);

const HUE: f64 = 210.0;
const SATURATION: f64 = 0.7;
const LIGHTEST: f64 = 0.96;
const DARKEST: f64 = 0.28;

/// maps a value onto a sequential blue ramp between `min` (lightest) and
/// `max` (darkest); values outside the range clip to the nearest end
pub fn colour_from_value(value: i64, min: i64, max: i64) -> RGBColor {
    // the span of two i64s can exceed i64::MAX
    let fraction = if max > min {
        ((value as f64 - min as f64) / (max as f64 - min as f64))
            .max(0.0)
            .min(1.0)
    } else {
        0.0
    };

    let hsl = HSL {
        h: HUE,
        s: SATURATION,
        l: LIGHTEST - (LIGHTEST - DARKEST) * fraction,
    };

    let (r, g, b) = hsl.to_rgb();
    RGBColor(r, g, b)
}

/// picks a legible annotation colour for text drawn over `fill`
pub fn text_colour(fill: &RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = *fill;
    let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luma > 140.0 {
        BLACK
    } else {
        WHITE
    }
}
