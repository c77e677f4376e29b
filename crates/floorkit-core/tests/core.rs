#[path = "core/document.rs"]
mod document;
#[path = "core/polygon.rs"]
mod polygon;
#[path = "core/units.rs"]
mod units;
