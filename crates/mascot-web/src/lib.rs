#![cfg(target_arch = "wasm32")]
//! Browser front-end: mounts the mascot widget onto `#mascot-canvas`,
//! wires pointer/scroll/resize listeners, and drives the render loop.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use mascot_core::{MascotScene, PointerState, ScrollState, WidgetConfig};

mod dom;
mod events;
mod frame;
mod render;

const CANVAS_ID: &str = "mascot-canvas";
const DEFAULT_SEED: u64 = 42;

static MOUNTED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static WIDGET: RefCell<Option<MascotWidget>> = RefCell::new(None);
}

/// A mounted widget instance. Dropping it tears everything down:
/// listeners detach first, then the loop is stopped, then GPU
/// resources are released.
struct MascotWidget {
    listeners: Vec<dom::ListenerGuard>,
    running: Rc<RefCell<bool>>,
    frame_ctx: Rc<RefCell<frame::FrameContext<'static>>>,
}

impl Drop for MascotWidget {
    fn drop(&mut self) {
        self.listeners.clear();
        *self.running.borrow_mut() = false;
        // Frees surface, buffers, and pipelines now rather than whenever
        // the parked frame closure is collected.
        self.frame_ctx.borrow_mut().gpu.take();
        log::info!("[widget] unmounted");
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mascot-web starting");

    spawn_local(async move {
        if let Err(e) = init(WidgetConfig::default()).await {
            log::error!("init error: {:?}", e);
            // a failed mount must not block a retry
            MOUNTED.store(false, Ordering::SeqCst);
        }
    });
    Ok(())
}

/// Mount the three-mascot bounce variant instead of the single hero.
#[wasm_bindgen]
pub fn mount_swarm() {
    spawn_local(async move {
        if let Err(e) = init(WidgetConfig::swarm()).await {
            log::error!("init error: {:?}", e);
            MOUNTED.store(false, Ordering::SeqCst);
        }
    });
}

/// Tear the widget down and release its resources. Safe to call twice.
#[wasm_bindgen]
pub fn unmount() {
    WIDGET.with(|w| w.borrow_mut().take());
    MOUNTED.store(false, Ordering::SeqCst);
}

/// Force a palette rotation on the next frame, same as clicking the page.
#[wasm_bindgen]
pub fn shift_palette() {
    WIDGET.with(|w| {
        if let Some(widget) = w.borrow().as_ref() {
            widget.frame_ctx.borrow_mut().scene.trigger_palette_shift();
        }
    });
}

async fn init(config: WidgetConfig) -> anyhow::Result<()> {
    if MOUNTED.swap(true, Ordering::SeqCst) {
        log::warn!("[widget] already mounted; ignoring");
        return Ok(());
    }

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::sync_canvas_backing_size(&canvas);

    let mut scene = MascotScene::new(config, DEFAULT_SEED)?;
    scene.resize(canvas.width() as f32, canvas.height() as f32);

    let gpu = render::GpuState::new(canvas.clone(), &scene).await?;

    let pointer = Rc::new(RefCell::new(PointerState::default()));
    let scroll = Rc::new(RefCell::new(ScrollState::default()));
    let palette_clicks = Rc::new(RefCell::new(0u32));

    let wiring = events::InputWiring {
        canvas: canvas.clone(),
        pointer: pointer.clone(),
        scroll: scroll.clone(),
        palette_clicks: palette_clicks.clone(),
    };
    let listeners = events::wire_input_handlers(&wiring)?;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        canvas,
        pointer,
        scroll,
        palette_clicks,
        gpu: Some(gpu),
        last_instant: Instant::now(),
    }));
    let running = Rc::new(RefCell::new(true));
    frame::start_loop(frame_ctx.clone(), running.clone());

    WIDGET.with(|w| {
        *w.borrow_mut() = Some(MascotWidget {
            listeners,
            running,
            frame_ctx,
        });
    });
    log::info!("[widget] mounted on #{}", CANVAS_ID);
    Ok(())
}
