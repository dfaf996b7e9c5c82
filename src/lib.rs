//! ec-placer library crate.
//!
//! Live side-by-side camera preview for aligning physical camera placement.
//! The binary wires these pieces to the OpenCV backend; everything else is
//! backend-agnostic and exercised by the integration tests.

pub mod acquire;
pub mod app;
pub mod backend;
pub mod camera;
pub mod cli;
pub mod compositor;
pub mod config;
pub mod display;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod session;
