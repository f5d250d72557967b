//! Canvas engine for the floor-plan viewer.
//!
//! This crate owns the editable annotation layer that sits above a parsed base
//! drawing: translating raw input events into annotation edits, maintaining the
//! view transform for pan/zoom/rotate, snapping, hit-testing, undo/redo, and
//! producing a retained-mode scene for a renderer adapter. The host layer only
//! wires input events to the engine, requests animation frames, and persists
//! the resulting [`engine::Action`]s.
//!
//! Everything except [`web`] is free of browser APIs and tested natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`] state machine and host actions |
//! | [`doc`] | Annotation element types and the ordered store |
//! | [`camera`] | Pan/zoom/rotate view transform and coordinate conversions |
//! | [`input`] | Tools, input event types, and the gesture state |
//! | [`hit`] | Hit-testing against annotation elements |
//! | [`snap`] | Grid/anchor snap cache |
//! | [`history`] | Snapshot undo/redo |
//! | [`frame`] | Frame coalescing and pointer-move throttling |
//! | [`render`] | Scene building from elements, selection, and preview |
//! | [`renderer`] | Renderer adapters (`SceneRenderer`, SVG markup) |
//! | [`config`] | Engine tuning knobs |
//! | [`consts`] | Default numeric constants (zoom limits, snap, door widths) |
//! | `web` | Browser canvas adapter (feature `web`) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod frame;
pub mod history;
pub mod hit;
pub mod input;
pub mod render;
pub mod renderer;
pub mod snap;
#[cfg(feature = "web")]
pub mod web;

pub use camera::Camera;
pub use config::EngineConfig;
pub use doc::{DocStore, DoorOrientation, EditElement, EditShape, ElementId};
pub use engine::{Action, EngineCore};
pub use error::EngineError;
pub use input::{Button, Key, Modifiers, Tool, WheelDelta};
pub use render::{Primitive, PrimitiveShape, Scene, StrokeStyle};
pub use renderer::{SceneRenderer, SvgMarkupRenderer};
