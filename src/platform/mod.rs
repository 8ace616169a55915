//! Platform abstraction layer
//!
//! The simulation only knows discs by `ObjectId`. A surface turns them into
//! something visible:
//! - `web`: absolutely positioned DOM elements inside the play area
//! - `headless`: an in-memory record, for the native demo and tests

use glam::Vec2;

use crate::sim::ObjectId;

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::HeadlessSurface;

/// Rendering collaborator for falling discs
pub trait RenderSurface {
    /// Whatever the surface needs to find the visual again
    type Handle;

    /// Play-area size in pixels
    fn measure_area(&self) -> Vec2;

    fn create_visual(&mut self, id: ObjectId, value: u32, pos: Vec2) -> Self::Handle;

    fn move_visual(&mut self, handle: &Self::Handle, pos: Vec2);

    /// Toggle the wrong-pick highlight
    fn set_flash(&mut self, handle: &Self::Handle, on: bool);

    fn destroy_visual(&mut self, handle: Self::Handle);
}
