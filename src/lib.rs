#![allow(irrefutable_let_patterns)]

mod config;
mod controller;
mod error;
mod mesh_buffer;
mod motion;
mod render;
pub mod shape;
mod time;

pub use config::Config;
pub use controller::{DragSession, Event, InteractionController, MeshStats};
pub use error::InitError;
pub use mesh_buffer::MeshBuffer;
pub use motion::{DecayMode, MotionModel, ScrollDirection};
pub use render::{Camera, ColorMode, RenderAdapter};
pub use shape::{Icosahedron, Mesh, Triangle, Vertex};
pub use time::FrameClock;
