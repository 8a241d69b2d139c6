//! Shared test helpers for `switchbind_core` integration tests.

#![allow(unreachable_pub)]

use std::sync::Arc;

use switchbind_core::{
    Bindable, MemoryLineSource, ObjectSchema, ParseOptions, SwitchIndex, literal_enum,
};

/// Index `args` with default options, panicking on failure.
#[allow(dead_code)]
pub fn index(args: &[&str]) -> SwitchIndex {
    SwitchIndex::parse(args).unwrap_or_else(|e| panic!("failed to index {args:?}: {e}"))
}

/// Index `args` with response files served from memory.
#[allow(dead_code)]
pub fn index_with_responses(args: &[&str], source: MemoryLineSource) -> SwitchIndex {
    let options = ParseOptions::default().with_line_source(Arc::new(source));
    SwitchIndex::parse_with(args, options)
        .unwrap_or_else(|e| panic!("failed to index {args:?}: {e}"))
}

// ─── Fixture types ───────────────────────────────────────────────────────────

/// Plane point bound from `x`/`y` switches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Bindable for Point {
    fn schema() -> ObjectSchema<Self> {
        ObjectSchema::<Self>::new()
            .field("x", |p| &mut p.x)
            .field("y", |p| &mut p.y)
    }
}

/// Drawing mode literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    #[default]
    Outline,
    Filled,
    Hatched,
}

literal_enum!(Mode { Outline, Filled, Hatched });

/// Every shape category in one schema.
#[derive(Debug, Default)]
pub struct Canvas {
    pub title: String,
    pub width: u32,
    pub scale: Option<f64>,
    pub verbose: bool,
    pub mode: Mode,
    pub layers: Vec<String>,
    pub origin: Point,
    pub points: Vec<Point>,
    pub colors: std::collections::BTreeMap<String, u8>,
    pub deep_width: u32,
    pub events: Vec<&'static str>,
}

impl Bindable for Canvas {
    fn schema() -> ObjectSchema<Self> {
        ObjectSchema::<Self>::new()
            .field("t|title", |c| &mut c.title)
            .field("w|width", |c| &mut c.width)
            .field("scale", |c| &mut c.scale)
            .field("v|verbose", |c| &mut c.verbose)
            .field("mode", |c| &mut c.mode)
            .field("layers", |c| &mut c.layers)
            .field("origin", |c| &mut c.origin)
            .field("points", |c| &mut c.points)
            .field("colors", |c| &mut c.colors)
            .field_in("width", 2, |c| &mut c.deep_width)
            .hook("clear", |c| c.events.push("clear"))
            .hook("render", |c| c.events.push("render"))
    }
}
