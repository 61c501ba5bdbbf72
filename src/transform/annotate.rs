//! Straight-line annotation.
//!
//! The line is drawn onto a duplicate of the input. Endpoints may lie
//! anywhere in `i32` space. The centreline is always the one running
//! between the true endpoints; only the steps whose point falls inside
//! the buffer grown by the footprint margin are visited, and every stamped
//! pixel is bounds-checked, so nothing outside the buffer is written.

use super::{parse_integer, ValidationError};
use crate::buffer::{Pixel, PixelBuffer};
use std::str::FromStr;

/// Annotation color, `(0, 255, 0)` in BGR order.
pub const LINE_COLOR: Pixel = [0, 255, 0];

/// Integer pixel coordinate. May lie outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl Point {
    /// Creates a point at column `x`, row `y`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Line thickness in `[1, 10]` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Thickness(u8);

impl Thickness {
    /// Thinnest accepted line.
    pub const MIN: u8 = 1;
    /// Thickest accepted line.
    pub const MAX: u8 = 10;

    /// Validates `value` into a thickness.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::InvalidThickness(value))
        }
    }

    /// Thickness in pixels.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Half-width of the square searched around each centreline point.
    #[inline]
    fn margin(self) -> i64 {
        (i64::from(self.0) + 1) / 2
    }
}

impl FromStr for Thickness {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_integer(s)?)
    }
}

/// A validated line: endpoints plus thickness. Color is always [`LINE_COLOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpec {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
    /// Stroke width.
    pub thickness: Thickness,
}

impl LineSpec {
    /// Validates the thickness and builds the line.
    pub fn new(start: Point, end: Point, thickness: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            start,
            end,
            thickness: Thickness::new(thickness)?,
        })
    }
}

/// Returns a copy of `buffer` with `line` drawn in [`LINE_COLOR`].
pub fn draw_line(buffer: &PixelBuffer, line: &LineSpec) -> PixelBuffer {
    let mut out = buffer.clone();
    let margin = line.thickness.margin();
    let x_range = (-margin, i64::from(buffer.width()) - 1 + margin);
    let y_range = (-margin, i64::from(buffer.height()) - 1 + margin);

    let centre = Centreline::new(line.start, line.end);
    let (major_range, minor_range) = if centre.x_major {
        (x_range, y_range)
    } else {
        (y_range, x_range)
    };
    let major = span(centre.last, centre.major_dir, major_range, |k| centre.major_at(k));
    let minor = span(centre.last, centre.minor_dir, minor_range, |k| centre.minor_at(k));

    let (first, end) = match (major, minor) {
        (Some(a), Some(b)) => (a.0.max(b.0), a.1.min(b.1)),
        _ => (0, 0),
    };
    if first >= end {
        tracing::debug!(?line, "Line lies outside buffer, nothing drawn");
        return out;
    }

    let footprint = disc_footprint(line.thickness);
    for k in first..end {
        let (cx, cy) = centre.point(k);
        for &(dx, dy) in &footprint {
            stamp(&mut out, cx + dx, cy + dy);
        }
    }
    out
}

#[inline]
fn stamp(buffer: &mut PixelBuffer, x: i64, y: i64) {
    if x >= 0 && y >= 0 && x < i64::from(buffer.width()) && y < i64::from(buffer.height()) {
        buffer.put(x as u32, y as u32, LINE_COLOR);
    }
}

/// Offsets inside a disc of diameter `thickness`: `(2dx)^2 + (2dy)^2 <= t^2`.
fn disc_footprint(thickness: Thickness) -> Vec<(i64, i64)> {
    let r = thickness.margin();
    let t2 = i64::from(thickness.get()).pow(2);
    (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| 4 * (dx * dx + dy * dy) <= t2)
        .collect()
}

/// Bresenham centreline between two endpoints, addressable by step index.
///
/// Step `k` in `0..=last` advances `k` pixels along the major axis; the
/// minor offset is `round(k * minor_len / major_len)` with halves rounded
/// up, which is the point the incremental error term would reach.
struct Centreline {
    x_major: bool,
    major_start: i64,
    minor_start: i64,
    major_dir: i64,
    minor_dir: i64,
    major_len: i64,
    minor_len: i64,
    last: i64,
}

impl Centreline {
    fn new(start: Point, end: Point) -> Self {
        let dx = i64::from(end.x) - i64::from(start.x);
        let dy = i64::from(end.y) - i64::from(start.y);
        let x_major = dx.abs() >= dy.abs();
        let (major_start, minor_start, major_delta, minor_delta) = if x_major {
            (i64::from(start.x), i64::from(start.y), dx, dy)
        } else {
            (i64::from(start.y), i64::from(start.x), dy, dx)
        };

        Self {
            x_major,
            major_start,
            minor_start,
            major_dir: major_delta.signum(),
            minor_dir: minor_delta.signum(),
            major_len: major_delta.abs(),
            minor_len: minor_delta.abs(),
            last: major_delta.abs(),
        }
    }

    #[inline]
    fn major_at(&self, k: i64) -> i64 {
        self.major_start + self.major_dir * k
    }

    #[inline]
    fn minor_at(&self, k: i64) -> i64 {
        if self.major_len == 0 {
            return self.minor_start;
        }
        // Products reach 2^66 for endpoints at opposite ends of i32
        let major = i128::from(self.major_len);
        let offset = (2 * i128::from(k) * i128::from(self.minor_len) + major) / (2 * major);
        self.minor_start + self.minor_dir * offset as i64
    }

    fn point(&self, k: i64) -> (i64, i64) {
        let (a, b) = (self.major_at(k), self.minor_at(k));
        if self.x_major {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// Half-open step range `[enter, leave)` over which `coord` stays within
/// `lo..=hi`. `coord` must be monotone in the direction of `dir`.
fn span(
    last: i64,
    dir: i64,
    (lo, hi): (i64, i64),
    coord: impl Fn(i64) -> i64,
) -> Option<(i64, i64)> {
    let (enter, leave) = match dir.signum() {
        0 => {
            let c = coord(0);
            return (lo..=hi).contains(&c).then_some((0, last + 1));
        }
        1 => (
            first_step(last, |k| coord(k) >= lo),
            first_step(last, |k| coord(k) > hi),
        ),
        _ => (
            first_step(last, |k| coord(k) <= hi),
            first_step(last, |k| coord(k) < lo),
        ),
    };
    (enter < leave).then_some((enter, leave))
}

/// Smallest `k` in `0..=last` where `pred` holds, or `last + 1`.
/// `pred` must switch from false to true at most once.
fn first_step(last: i64, pred: impl Fn(i64) -> bool) -> i64 {
    let (mut lo, mut hi) = (0, last + 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}
