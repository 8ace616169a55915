//! DOM surface: each disc is an absolutely positioned `div.number-circle`
//!
//! The disc id is stored in `data-id` so a single delegated `pointerdown`
//! listener on the play area can map clicks back to `ObjectId`s.

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::RenderSurface;
use crate::sim::ObjectId;

/// CSS class of a disc
pub const DISC_CLASS: &str = "number-circle";
/// Extra class while a wrong pick is flashing
pub const FLASH_CLASS: &str = "wrong";

#[derive(Debug, Clone)]
pub struct DomSurface {
    document: Document,
    play_area: HtmlElement,
}

impl DomSurface {
    pub fn new(document: Document, play_area: HtmlElement) -> Self {
        Self {
            document,
            play_area,
        }
    }

    pub fn play_area(&self) -> &HtmlElement {
        &self.play_area
    }
}

/// Read the disc id back out of a pointer event target
pub fn disc_id_from_target(target: &web_sys::Element) -> Option<ObjectId> {
    let disc = target.closest(&format!(".{DISC_CLASS}")).ok()??;
    let raw = disc.get_attribute("data-id")?;
    raw.parse().ok().map(ObjectId)
}

fn place(el: &HtmlElement, pos: Vec2) {
    let style = el.style();
    let _ = style.set_property("left", &format!("{}px", pos.x));
    let _ = style.set_property("top", &format!("{}px", pos.y));
}

impl RenderSurface for DomSurface {
    /// None if the element could not be created; every call then no-ops
    type Handle = Option<HtmlElement>;

    fn measure_area(&self) -> Vec2 {
        Vec2::new(
            self.play_area.client_width() as f32,
            self.play_area.client_height() as f32,
        )
    }

    fn create_visual(&mut self, id: ObjectId, value: u32, pos: Vec2) -> Self::Handle {
        let el = match self
            .document
            .create_element("div")
            .map(|e| e.dyn_into::<HtmlElement>())
        {
            Ok(Ok(el)) => el,
            _ => {
                log::error!("Failed to create disc element for {:?}", id);
                return None;
            }
        };

        el.set_class_name(DISC_CLASS);
        el.set_text_content(Some(&value.to_string()));
        let _ = el.set_attribute("data-id", &id.0.to_string());
        place(&el, pos);

        if self.play_area.append_child(&el).is_err() {
            log::error!("Failed to attach disc {:?}", id);
            return None;
        }
        Some(el)
    }

    fn move_visual(&mut self, handle: &Self::Handle, pos: Vec2) {
        if let Some(el) = handle {
            place(el, pos);
        }
    }

    fn set_flash(&mut self, handle: &Self::Handle, on: bool) {
        if let Some(el) = handle {
            let classes = el.class_list();
            let _ = if on {
                classes.add_1(FLASH_CLASS)
            } else {
                classes.remove_1(FLASH_CLASS)
            };
        }
    }

    fn destroy_visual(&mut self, handle: Self::Handle) {
        if let Some(el) = handle {
            el.remove();
        }
    }
}
