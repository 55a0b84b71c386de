//! Window-level event wiring: pointer, resize, scroll, click.
//!
//! Handlers only write plain values into the shared registers; the frame
//! loop reads them on its own schedule. The canvas itself never captures
//! pointer events (the widget is decorative), so everything listens on the
//! window. All listeners detach when the returned guards drop.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use mascot_core::{PointerState, ScrollState};

use crate::dom::{self, ListenerGuard};

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerState>>,
    pub scroll: Rc<RefCell<ScrollState>>,
    pub palette_clicks: Rc<RefCell<u32>>,
}

/// Attach all window listeners; dropping the returned vec unregisters them.
pub fn wire_input_handlers(w: &InputWiring) -> anyhow::Result<Vec<ListenerGuard>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let target: web::EventTarget = window.into();

    let mut guards = Vec::new();

    {
        let pointer = w.pointer.clone();
        guards.push(ListenerGuard::attach(
            &target,
            "pointermove",
            move |ev: web::Event| {
                if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                    let (vw, vh) = dom::viewport_css_size();
                    pointer.borrow_mut().set_from_client(
                        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
                        Vec2::new(vw, vh),
                    );
                }
            },
        )?);
    }

    {
        let canvas = w.canvas.clone();
        guards.push(ListenerGuard::attach(&target, "resize", move |_| {
            dom::sync_canvas_backing_size(&canvas);
        })?);
    }

    {
        let scroll = w.scroll.clone();
        guards.push(ListenerGuard::attach(&target, "scroll", move |_| {
            scroll.borrow_mut().set(dom::scroll_progress());
        })?);
    }

    {
        // Clicks anywhere on the page shift the palette; the count is
        // drained by the frame loop so the handler never touches the scene.
        let clicks = w.palette_clicks.clone();
        guards.push(ListenerGuard::attach(&target, "click", move |_| {
            *clicks.borrow_mut() += 1;
        })?);
    }

    Ok(guards)
}
