#![forbid(unsafe_code)]

//! Core: input events, wheel-source classification, click counting, config.
//!
//! # Role in Glide
//! `glide-core` is the input layer. It owns the canonical wheel and pointer
//! event types, the geometry they are expressed in, and the two pieces of
//! input interpretation that need no host: the [`wheel_classifier`] that
//! guesses whether wheel events come from a detented mouse wheel or a
//! precision device, and the [`click_count`] debouncer.
//!
//! # How it fits in the system
//! `glide-runtime` consumes these types and drives the stateful machinery
//! (scroll motion, inertial coast, drag selection, edge autoscroll) against
//! host-provided scroll stores and hit testers.

pub mod click_count;
pub mod config;
pub mod event;
pub mod geometry;
pub mod wheel_classifier;

pub use click_count::ClickCounter;
pub use config::{ConfigError, DragConfig, GlideConfig, Platform, ScrollConfig};
pub use event::{DeltaMode, Modifiers, PointerButtons, PointerEvent, WheelEvent};
pub use geometry::{
    Axis, Edge, OutsideEdge, Point, Rect, ScrollPosition, Selection, TextPosition,
};
pub use wheel_classifier::{ClassifierHandle, WheelClassifier, WheelSample};
