use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Backing-store pixel ratio cap; anything above 2x is wasted fill rate
// for a decorative layer.
const DPR_CAP: f64 = 2.0;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Keep the canvas internal pixel size in sync with CSS size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(DPR_CAP);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// CSS-pixel viewport size, for pointer normalization.
pub fn viewport_css_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (1.0, 1.0);
    };
    let width = w
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = w
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    (width as f32, height as f32)
}

/// Page scroll progress in [0, 1].
pub fn scroll_progress() -> f32 {
    let Some(w) = web::window() else {
        return 0.0;
    };
    let y = w.scroll_y().unwrap_or(0.0);
    let inner = w
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let full = window_document()
        .and_then(|d| d.document_element())
        .map(|e| e.scroll_height() as f64)
        .unwrap_or(0.0);
    let track = (full - inner).max(1.0);
    (y / track).clamp(0.0, 1.0) as f32
}

/// Event listener that detaches itself on drop. A leaked listener after
/// unmount is a defect, so every wire_* helper returns one of these.
pub struct ListenerGuard {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl ListenerGuard {
    pub fn attach(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("addEventListener({event}): {:?}", e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
