//! In-memory surface
//!
//! Records what a real surface would show, so tests can assert on it.

use std::collections::BTreeMap;

use glam::Vec2;

use super::RenderSurface;
use crate::consts::{DEFAULT_AREA_HEIGHT, DEFAULT_AREA_WIDTH};
use crate::sim::ObjectId;

/// What is currently drawn for one disc
#[derive(Debug, Clone, PartialEq)]
pub struct VisualRecord {
    pub id: ObjectId,
    pub value: u32,
    pub pos: Vec2,
    pub flashing: bool,
}

#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    area: Vec2,
    visuals: BTreeMap<u32, VisualRecord>,
    next_handle: u32,
    /// Visuals ever created
    pub created: u32,
    /// Visuals ever destroyed
    pub destroyed: u32,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(Vec2::new(DEFAULT_AREA_WIDTH, DEFAULT_AREA_HEIGHT))
    }
}

impl HeadlessSurface {
    pub fn new(area: Vec2) -> Self {
        Self {
            area,
            visuals: BTreeMap::new(),
            next_handle: 1,
            created: 0,
            destroyed: 0,
        }
    }

    /// Simulate a window resize
    pub fn resize(&mut self, area: Vec2) {
        self.area = area;
    }

    pub fn visuals(&self) -> impl Iterator<Item = &VisualRecord> {
        self.visuals.values()
    }

    pub fn visual_for(&self, id: ObjectId) -> Option<&VisualRecord> {
        self.visuals.values().find(|v| v.id == id)
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}

impl RenderSurface for HeadlessSurface {
    type Handle = u32;

    fn measure_area(&self) -> Vec2 {
        self.area
    }

    fn create_visual(&mut self, id: ObjectId, value: u32, pos: Vec2) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.created += 1;
        self.visuals.insert(
            handle,
            VisualRecord {
                id,
                value,
                pos,
                flashing: false,
            },
        );
        handle
    }

    fn move_visual(&mut self, handle: &u32, pos: Vec2) {
        if let Some(visual) = self.visuals.get_mut(handle) {
            visual.pos = pos;
        }
    }

    fn set_flash(&mut self, handle: &u32, on: bool) {
        if let Some(visual) = self.visuals.get_mut(handle) {
            visual.flashing = on;
        }
    }

    fn destroy_visual(&mut self, handle: u32) {
        if self.visuals.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }
}
