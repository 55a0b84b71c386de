//! WebGPU renderer: transparent full-viewport surface over the host page.
//!
//! Two pipelines: the displaced halftone body, and a flat-color pipeline
//! reused for sclerae, pupils, and the mouth. Geometry buffers are built
//! once from the scene's shared meshes; per-body uniform buffers are
//! exclusive so palettes and time phase stay independent.

use glam::Mat4;
use web_sys as web;

use mascot_core::geometry::MeshData;
use mascot_core::shading::{FlatUniforms, SceneUniforms};
use mascot_core::{MascotScene, FLAT_WGSL, MASCOT_WGSL};

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
        use wgpu::util::DeviceExt;
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

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
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

    // One uniform buffer + bind group per mascot, exclusive by design.
    mascot_ubs: Vec<wgpu::Buffer>,
    mascot_bgs: Vec<wgpu::BindGroup>,
    // One per flat part (2 sclerae + 2 pupils + optional mouth per mascot).
    part_ubs: Vec<wgpu::Buffer>,
    part_bgs: Vec<wgpu::BindGroup>,
    parts_per_mascot: usize,

    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
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

fn uniform_bgl(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
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
}

fn uniform_bg(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

impl GpuState<'static> {
    pub async fn new(canvas: web::HtmlCanvasElement, scene: &MascotScene) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        // Transparent surface so the widget overlays the page content.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes[0]
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
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

        let scene_bgl = uniform_bgl(&device, "scene_bgl");
        let body_bgl = uniform_bgl(&device, "body_bgl");
        let part_bgl = uniform_bgl(&device, "part_bgl");

        let scene_ub = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bg = uniform_bg(&device, "scene_bg", &scene_bgl, &scene_ub);

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

        let body_pipeline = make_pipeline("body_pipeline", &body_shader, "vs_body", "fs_body", &body_bgl);
        let flat_pipeline = make_pipeline("flat_pipeline", &flat_shader, "vs_flat", "fs_flat", &part_bgl);

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
            mascot_bgs.push(uniform_bg(&device, "body_bg", &body_bgl, &ub));
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
            part_bgs.push(uniform_bg(&device, "part_bg", &part_bgl, &ub));
            part_ubs.push(ub);
        }

        let depth_view = create_depth(&device, width, height);

        log::info!(
            "[gpu] ready: {}x{} {:?}, {} mascot(s)",
            width,
            height,
            format,
            scene.mascots.len()
        );

        Ok(Self {
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
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth(&self.device, width, height);
        }
    }

    /// Flat parts for one mascot, in bind-group order.
    fn write_parts(&self, scene: &MascotScene) {
        for (mi, m) in scene.mascots.iter().enumerate() {
            let dark = m.palette.dark.to_vec4();
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
                    color: dark,
                });
            }
            for (pi, part) in parts.iter().enumerate() {
                let idx = mi * self.parts_per_mascot + pi;
                self.queue
                    .write_buffer(&self.part_ubs[idx], 0, bytemuck::bytes_of(part));
            }
        }
    }

    pub fn render(&mut self, scene: &MascotScene) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_proj: Mat4 = scene.camera.view_proj();
        self.queue.write_buffer(
            &self.scene_ub,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view_proj: view_proj.to_cols_array_2d(),
            }),
        );
        for (m, ub) in scene.mascots.iter().zip(&self.mascot_ubs) {
            self.queue.write_buffer(ub, 0, bytemuck::bytes_of(&m.uniforms));
        }
        self.write_parts(scene);

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
                        // Fully transparent: the page shows through
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
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
