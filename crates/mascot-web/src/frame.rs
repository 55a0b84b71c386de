use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use mascot_core::{MascotScene, PointerState, ScrollState};

use crate::render;

pub struct FrameContext<'a> {
    pub scene: MascotScene,

    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerState>>,
    pub scroll: Rc<RefCell<ScrollState>>,
    pub palette_clicks: Rc<RefCell<u32>>,

    pub gpu: Option<render::GpuState<'a>>,

    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // Backing-store size can change out from under us (resize listener
        // updates the canvas attributes); chase it here.
        let (w, h) = (self.canvas.width(), self.canvas.height());
        if w > 0 && h > 0 {
            if (w, h)
                != (
                    self.scene.viewport.width as u32,
                    self.scene.viewport.height as u32,
                )
            {
                self.scene.resize(w as f32, h as f32);
            }
            if let Some(gpu) = self.gpu.as_mut() {
                gpu.resize_if_needed(w, h);
            }
        }

        {
            let mut clicks = self.palette_clicks.borrow_mut();
            for _ in 0..*clicks {
                self.scene.trigger_palette_shift();
            }
            *clicks = 0;
        }

        let pointer = self.pointer.borrow().ndc;
        let scroll = self.scroll.borrow().progress;
        self.scene.advance(dt.as_secs_f32(), pointer, scroll);

        if let Some(gpu) = self.gpu.as_mut() {
            match gpu.render(&self.scene) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
                }
                Err(e) => log::warn!("[frame] render error: {:?}", e),
            }
        }
    }
}

/// Drives `FrameContext::frame` from requestAnimationFrame until `running`
/// is flipped off. Keeping the closure alive through the Rc cycle is the
/// usual wasm trick; the final scheduled tick breaks the cycle so the
/// closure can drop.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>, running: Rc<RefCell<bool>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    let running_tick = running.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !*running_tick.borrow() {
            let _ = tick_clone.borrow_mut().take();
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
