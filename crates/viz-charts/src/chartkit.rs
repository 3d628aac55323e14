//! # chartkit
//!
//! Geometry shared by every chart: d3-style scales, SVG path data, curve
//! generators and polar helpers for pies and radars.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

// ============================================================================
// SCALES
// ============================================================================

/// Maps a domain value to a pixel coordinate
pub trait Scale {
    type Domain;

    fn scale(&self, value: Self::Domain) -> f64;
}

/// Continuous scale, `d3.scaleLinear`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self { d0: 0.0, d1: 1.0, r0: 0.0, r1: 1.0 }
    }
}

impl LinearScale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(self, d0: f64, d1: f64) -> Self {
        Self { d0, d1, ..self }
    }

    pub fn range(self, r0: f64, r1: f64) -> Self {
        Self { r0, r1, ..self }
    }

    pub fn domain_bounds(&self) -> (f64, f64) {
        (self.d0, self.d1)
    }

    /// Widen the domain to whole multiples of the tick step
    pub fn nice(self, count: usize) -> Self {
        match tick_step(self.d0, self.d1, count) {
            Some(step) => Self {
                d0: (self.d0 / step).floor() * step,
                d1: (self.d1 / step).ceil() * step,
                ..self
            },
            None => self,
        }
    }

    /// Round tick values inside the domain, about `count` of them
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let Some(step) = tick_step(self.d0, self.d1, count) else {
            return vec![self.d0];
        };
        let first = (self.d0 / step).ceil() as i64;
        let last = (self.d1 / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

impl Scale for LinearScale {
    type Domain = f64;

    fn scale(&self, value: f64) -> f64 {
        let span = self.d1 - self.d0;
        // A zero-width domain (one point) lands mid-range
        if span.abs() < f64::EPSILON {
            return (self.r0 + self.r1) / 2.0;
        }
        self.r0 + (value - self.d0) / span * (self.r1 - self.r0)
    }
}

/// Tick spacing of 1, 2 or 5 times a power of ten, as `d3.tickStep` picks it
fn tick_step(d0: f64, d1: f64, count: usize) -> Option<f64> {
    let span = d1 - d0;
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }

    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    Some(power * factor)
}

/// Categorical scale, `d3.scaleBand` with center alignment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    bands: usize,
    r0: f64,
    r1: f64,
    inner: f64,
    outer: f64,
}

impl BandScale {
    pub fn new(bands: usize) -> Self {
        Self { bands, r0: 0.0, r1: 1.0, inner: 0.0, outer: 0.0 }
    }

    pub fn range(self, r0: f64, r1: f64) -> Self {
        Self { r0, r1, ..self }
    }

    /// Inner padding is a fraction of the step; outer padding counts steps
    pub fn padding(self, inner: f64, outer: f64) -> Self {
        Self {
            inner: inner.clamp(0.0, 1.0),
            outer: outer.max(0.0),
            ..self
        }
    }

    pub fn step(&self) -> f64 {
        let slots = self.bands as f64 - self.inner + 2.0 * self.outer;
        (self.r1 - self.r0) / slots.max(1.0)
    }

    pub fn bandwidth(&self) -> f64 {
        if self.bands == 0 {
            0.0
        } else {
            self.step() * (1.0 - self.inner)
        }
    }
}

impl Scale for BandScale {
    type Domain = usize;

    /// Start of band `index`
    fn scale(&self, index: usize) -> f64 {
        if self.bands == 0 {
            return self.r0;
        }
        let step = self.step();
        let used = step * (self.bands as f64 - self.inner);
        let offset = (self.r1 - self.r0 - used) / 2.0;
        self.r0 + offset + step * index as f64
    }
}

// ============================================================================
// PATH DATA
// ============================================================================

/// Accumulates SVG path commands, two decimals per coordinate
#[derive(Debug, Clone, Default)]
pub struct PathData(String);

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    fn command(mut self, letter: char, coords: &[f64]) -> Self {
        self.0.push(letter);
        for (i, c) in coords.iter().enumerate() {
            if i > 0 {
                self.0.push(',');
            }
            let _ = write!(self.0, "{:.2}", c);
        }
        self
    }

    pub fn move_to(self, (x, y): (f64, f64)) -> Self {
        self.command('M', &[x, y])
    }

    pub fn line_to(self, (x, y): (f64, f64)) -> Self {
        self.command('L', &[x, y])
    }

    pub fn curve_to(self, c1: (f64, f64), c2: (f64, f64), end: (f64, f64)) -> Self {
        self.command('C', &[c1.0, c1.1, c2.0, c2.1, end.0, end.1])
    }

    /// Circular arc of `radius` ending at `end`
    pub fn arc_to(mut self, radius: f64, large_arc: bool, clockwise: bool, end: (f64, f64)) -> Self {
        let _ = write!(
            self.0,
            "A{r:.2},{r:.2},0,{},{},{:.2},{:.2}",
            u8::from(large_arc),
            u8::from(clockwise),
            end.0,
            end.1,
            r = radius
        );
        self
    }

    pub fn close(mut self) -> Self {
        self.0.push('Z');
        self
    }

    pub fn finish(self) -> String {
        self.0
    }
}

// ============================================================================
// CURVES
// ============================================================================

/// Turns a point sequence into path data
pub trait PathGenerator {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Polyline through the points, `d3.curveLinear`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearCurve;

impl PathGenerator for LinearCurve {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        polyline(points).finish()
    }
}

/// Closed cardinal spline, `d3.curveCardinalClosed`
#[derive(Debug, Clone, Copy, Default)]
pub struct CardinalClosedPath {
    pub tension: f64,
}

impl PathGenerator for CardinalClosedPath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let n = points.len();
        if n < 3 {
            return if n == 0 { String::new() } else { polyline(points).close().finish() };
        }

        let k = (1.0 - self.tension) / 6.0;
        let p = |i: usize| points[i % n];

        (0..n)
            .fold(PathData::new().move_to(points[0]), |path, i| {
                let (before, from, to, after) = (p(i + n - 1), p(i), p(i + 1), p(i + 2));
                path.curve_to(
                    (from.0 + (to.0 - before.0) * k, from.1 + (to.1 - before.1) * k),
                    (to.0 - (after.0 - from.0) * k, to.1 - (after.1 - from.1) * k),
                    to,
                )
            })
            .close()
            .finish()
    }
}

fn polyline(points: &[(f64, f64)]) -> PathData {
    match points.split_first() {
        Some((&first, rest)) => rest
            .iter()
            .fold(PathData::new().move_to(first), |path, &p| path.line_to(p)),
        None => PathData::new(),
    }
}

/// Open line through the points
pub fn line_path(points: &[(f64, f64)]) -> String {
    LinearCurve.generate(points)
}

/// Line through the points, dropped to `baseline_y` at both ends and closed
pub fn area_path(points: &[(f64, f64)], baseline_y: f64) -> String {
    let (Some(&(x_first, _)), Some(&(x_last, _))) = (points.first(), points.last()) else {
        return String::new();
    };

    points
        .iter()
        .fold(PathData::new().move_to((x_first, baseline_y)), |path, &p| path.line_to(p))
        .line_to((x_last, baseline_y))
        .close()
        .finish()
}

// ============================================================================
// POLAR GEOMETRY
// ============================================================================

/// Point at `angle` radians clockwise from 12 o'clock, as `d3.arc` measures
pub fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// Point at `angle` radians from 3 o'clock (plain trigonometry)
pub fn polar_from_x_axis(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.cos(), radius * angle.sin())
}

/// Ring sector between `start` and `end`; `inner == 0` draws a wedge
pub fn arc_path(inner: f64, outer: f64, start: f64, end: f64) -> String {
    let span = (end - start).abs();
    if outer <= 0.0 || span <= f64::EPSILON {
        return String::new();
    }

    // One SVG arc cannot close on itself, so full turns go in two halves
    if span >= TAU - 1e-9 {
        let half = start + PI;
        let mut path = PathData::new()
            .move_to(polar(outer, start))
            .arc_to(outer, false, true, polar(outer, half))
            .arc_to(outer, false, true, polar(outer, start));
        if inner > 0.0 {
            path = path
                .move_to(polar(inner, start))
                .arc_to(inner, false, false, polar(inner, half))
                .arc_to(inner, false, false, polar(inner, start));
        }
        return path.close().finish();
    }

    let large = span > PI;
    let path = PathData::new()
        .move_to(polar(outer, start))
        .arc_to(outer, large, true, polar(outer, end));
    let path = if inner > 0.0 {
        path.line_to(polar(inner, end))
            .arc_to(inner, large, false, polar(inner, start))
    } else {
        path.line_to((0.0, 0.0))
    };
    path.close().finish()
}

/// Middle of a ring sector, used to place slice labels
pub fn arc_centroid(inner: f64, outer: f64, start: f64, end: f64) -> (f64, f64) {
    polar((inner + outer) / 2.0, (start + end) / 2.0)
}

// ============================================================================
// SVG ATTRIBUTES
// ============================================================================

pub fn translate(x: f64, y: f64) -> String {
    format!("translate({:.2}, {:.2})", x, y)
}

/// `text-anchor` for a label sitting `x` px left or right of a center line
pub fn side_anchor(x: f64, dead_zone: f64) -> &'static str {
    match x {
        x if x.abs() < dead_zone => "middle",
        x if x > 0.0 => "start",
        _ => "end",
    }
}
