//! Desktop preview of the mascot widget. Same scene and shaders as the web
//! build, drawn into a winit window over an opaque page-colored clear.
//! Cursor position stands in for the page pointer and a click rotates the
//! palette; run with `--swarm` for the three-body bounce variant.

use instant::Instant;
use wgpu::util::DeviceExt;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use glam::Vec2;
use mascot_core::geometry::MeshData;
use mascot_core::input::normalize_pointer;
use mascot_core::palette::PAGE_BG;
use mascot_core::shading::{FlatUniforms, SceneUniforms};
use mascot_core::{MascotScene, Rgb, WidgetConfig, FLAT_WGSL, MASCOT_WGSL};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
const SCLERA_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const PUPIL_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

struct MeshBuffers {
    vb: wgpu::Buffer,
    ib: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.interleaved()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vb,
            ib,
            index_count: mesh.index_count() as u32,
        }
    }
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    body_pipeline: wgpu::RenderPipeline,
    flat_pipeline: wgpu::RenderPipeline,
    scene_ub: wgpu::Buffer,
    scene_bg: wgpu::BindGroup,
    body_mesh: MeshBuffers,
    eye_mesh: MeshBuffers,
    mouth_mesh: MeshBuffers,
    mascot_ubs: Vec<wgpu::Buffer>,
    mascot_bgs: Vec<wgpu::BindGroup>,
    part_ubs: Vec<wgpu::Buffer>,
    part_bgs: Vec<wgpu::BindGroup>,
    parts_per_mascot: usize,
    depth_view: wgpu::TextureView,
    clear_color: wgpu::Color,
}

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
    ];
    wgpu::VertexBufferLayout {
        array_stride: (std::mem::size_of::<f32>() * 6) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

fn create_depth(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, scene: &MascotScene) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let body_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mascot_shader"),
            source: wgpu::ShaderSource::Wgsl(MASCOT_WGSL.into()),
        });
        let flat_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flat_shader"),
            source: wgpu::ShaderSource::Wgsl(FLAT_WGSL.into()),
        });

        let uniform_bgl = |label: &str| {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            })
        };
        let scene_bgl = uniform_bgl("scene_bgl");
        let body_bgl = uniform_bgl("body_bgl");
        let part_bgl = uniform_bgl("part_bgl");

        let uniform_bg = |label: &str, layout: &wgpu::BindGroupLayout, buffer: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            })
        };

        let scene_ub = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bg = uniform_bg("scene_bg", &scene_bgl, &scene_ub);

        let make_pipeline = |label: &str,
                             shader: &wgpu::ShaderModule,
                             vs: &str,
                             fs: &str,
                             bgl1: &wgpu::BindGroupLayout| {
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(label),
                bind_group_layouts: &[&scene_bgl, bgl1],
                push_constant_ranges: &[],
            });
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some(vs),
                    buffers: &[vertex_layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some(fs),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };

        let body_pipeline =
            make_pipeline("body_pipeline", &body_shader, "vs_body", "fs_body", &body_bgl);
        let flat_pipeline =
            make_pipeline("flat_pipeline", &flat_shader, "vs_flat", "fs_flat", &part_bgl);

        let body_mesh = MeshBuffers::upload(&device, "body_mesh", &scene.geometry.body);
        let eye_mesh = MeshBuffers::upload(&device, "eye_mesh", &scene.geometry.eye);
        let mouth_mesh = MeshBuffers::upload(&device, "mouth_mesh", &scene.geometry.mouth);

        let mut mascot_ubs = Vec::new();
        let mut mascot_bgs = Vec::new();
        for i in 0..scene.mascots.len() {
            let ub = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("body_uniforms_{i}")),
                size: std::mem::size_of::<mascot_core::BodyUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            mascot_bgs.push(uniform_bg("body_bg", &body_bgl, &ub));
            mascot_ubs.push(ub);
        }

        let parts_per_mascot = 4 + usize::from(scene.config.mouth);
        let mut part_ubs = Vec::new();
        let mut part_bgs = Vec::new();
        for i in 0..scene.mascots.len() * parts_per_mascot {
            let ub = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("part_uniforms_{i}")),
                size: std::mem::size_of::<FlatUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            part_bgs.push(uniform_bg("part_bg", &part_bgl, &ub));
            part_ubs.push(ub);
        }

        let depth_view = create_depth(&device, size.width, size.height);

        let bg = Rgb::from_hex(PAGE_BG);
        let clear_color = wgpu::Color {
            r: bg.r as f64,
            g: bg.g as f64,
            b: bg.b as f64,
            a: 1.0,
        };

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            body_pipeline,
            flat_pipeline,
            scene_ub,
            scene_bg,
            body_mesh,
            eye_mesh,
            mouth_mesh,
            mascot_ubs,
            mascot_bgs,
            part_ubs,
            part_bgs,
            parts_per_mascot,
            depth_view,
            clear_color,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth(&self.device, new_size.width, new_size.height);
    }

    fn render(&mut self, scene: &MascotScene) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.scene_ub,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view_proj: scene.camera.view_proj().to_cols_array_2d(),
            }),
        );
        for (m, ub) in scene.mascots.iter().zip(&self.mascot_ubs) {
            self.queue.write_buffer(ub, 0, bytemuck::bytes_of(&m.uniforms));
        }
        for (mi, m) in scene.mascots.iter().enumerate() {
            let mut parts: Vec<FlatUniforms> = Vec::with_capacity(self.parts_per_mascot);
            for eye in &m.eyes {
                parts.push(FlatUniforms {
                    model: eye.sclera_model().to_cols_array_2d(),
                    color: SCLERA_COLOR,
                });
                parts.push(FlatUniforms {
                    model: eye.pupil_model().to_cols_array_2d(),
                    color: PUPIL_COLOR,
                });
            }
            if let Some(mouth) = &m.mouth {
                parts.push(FlatUniforms {
                    model: mouth.model(m.position, m.scale).to_cols_array_2d(),
                    color: m.palette.dark.to_vec4(),
                });
            }
            for (pi, part) in parts.iter().enumerate() {
                let idx = mi * self.parts_per_mascot + pi;
                self.queue
                    .write_buffer(&self.part_ubs[idx], 0, bytemuck::bytes_of(part));
            }
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("mascot_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.body_pipeline);
            rpass.set_bind_group(0, &self.scene_bg, &[]);
            rpass.set_vertex_buffer(0, self.body_mesh.vb.slice(..));
            rpass.set_index_buffer(self.body_mesh.ib.slice(..), wgpu::IndexFormat::Uint32);
            for bg in &self.mascot_bgs {
                rpass.set_bind_group(1, bg, &[]);
                rpass.draw_indexed(0..self.body_mesh.index_count, 0, 0..1);
            }

            rpass.set_pipeline(&self.flat_pipeline);
            for (mi, m) in scene.mascots.iter().enumerate() {
                let base = mi * self.parts_per_mascot;
                rpass.set_vertex_buffer(0, self.eye_mesh.vb.slice(..));
                rpass.set_index_buffer(self.eye_mesh.ib.slice(..), wgpu::IndexFormat::Uint32);
                for pi in 0..4 {
                    rpass.set_bind_group(1, &self.part_bgs[base + pi], &[]);
                    rpass.draw_indexed(0..self.eye_mesh.index_count, 0, 0..1);
                }
                if m.mouth.is_some() {
                    rpass.set_vertex_buffer(0, self.mouth_mesh.vb.slice(..));
                    rpass.set_index_buffer(self.mouth_mesh.ib.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.set_bind_group(1, &self.part_bgs[base + 4], &[]);
                    rpass.draw_indexed(0..self.mouth_mesh.index_count, 0, 0..1);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = if std::env::args().any(|a| a == "--swarm") {
        WidgetConfig::swarm()
    } else {
        WidgetConfig::default()
    };
    let seed = 42;
    let mut scene = MascotScene::new(config, seed)?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Mascot (native preview)")
        .build(&event_loop)?;

    let size = window.inner_size();
    scene.resize(size.width as f32, size.height as f32);

    let mut gpu = pollster::block_on(GpuState::new(&window, &scene))?;

    let mut pointer = Vec2::ZERO;
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            gpu.resize(size);
            scene.resize(size.width as f32, size.height as f32);
        }
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            let size = gpu.window.inner_size();
            pointer = normalize_pointer(
                Vec2::new(position.x as f32, position.y as f32),
                Vec2::new(size.width as f32, size.height as f32),
            );
        }
        Event::WindowEvent {
            event:
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                },
            ..
        } => scene.trigger_palette_shift(),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = (now - last_frame).as_secs_f32();
            last_frame = now;
            // No page to scroll in the preview; the scroll channel stays at 0.
            scene.advance(dt, pointer, 0.0);
            match gpu.render(&scene) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
