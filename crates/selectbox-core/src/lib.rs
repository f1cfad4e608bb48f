//! Core types and traits for selectbox widgets.
//!
//! This crate provides the foundational types the widgets are built on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`], [`Key`], [`MouseButton`]
//! - The [`Widget`] and [`Canvas`] traits, plus a [`RecordingCanvas`]

mod canvas;
mod color;
mod constraints;
mod event;
mod geometry;
pub mod widget;

pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget, WidgetId,
};
