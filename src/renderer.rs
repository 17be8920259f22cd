/*
 * Renderer Module
 *
 * This module draws the shard grid on the GPU and defines the window's view.
 *
 * The shard layer is a single instanced draw: four triangle-strip vertices
 * per shard, with the shard's static geometry in one instance buffer and its
 * current transform in another. The geometry and uniform buffers are uploaded
 * once per grid build; the transform buffer is rebuilt every frame.
 *
 * Draw order per frame:
 * - The incoming screen (plain nannou draw)
 * - The shard layer over it, when the overlay is visible
 * - The egui panel
 */

use nannou::prelude::*;
use nannou::wgpu;
use nannou::wgpu::util::DeviceExt;
use tracing::{debug, warn};

use crate::app::Model;
use crate::effect::{DrawShards, ShardFrame, ShatterEffect};
use crate::scene;
use crate::shard::{ShardGeometry, ShardTransform, ShardUniforms};
use crate::ui;

const GEOMETRY_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];
const TRANSFORM_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4];

// Corners of one shard quad, generated in the vertex stage
const QUAD_VERTICES: u32 = 4;

// GPU copies of one grid build
struct GridBuffers {
    generation: u64,
    geometry: wgpu::Buffer,
    uniforms: wgpu::Buffer,
    shard_count: u32,
}

struct ShardTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

pub struct ShardRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    grid: Option<GridBuffers>,
    texture: Option<ShardTexture>,
    bind_group: Option<wgpu::BindGroup>,
}

impl ShardRenderer {
    pub fn new(device: &wgpu::Device, dst_format: wgpu::TextureFormat, sample_count: u32) -> Self {
        let vs_desc = wgpu::include_wgsl!("shaders/vs.wgsl");
        let fs_desc = wgpu::include_wgsl!("shaders/fs.wgsl");
        let vs_mod = device.create_shader_module(&vs_desc);
        let fs_mod = device.create_shader_module(&fs_desc);

        let sampler_desc = wgpu::SamplerBuilder::new().into_descriptor();
        let sampler_filtering = wgpu::sampler_filtering(&sampler_desc);
        let sampler = device.create_sampler(&sampler_desc);

        // Snapshots are always uploaded as RGBA8, which samples as float
        let bind_group_layout = wgpu::BindGroupLayoutBuilder::new()
            .uniform_buffer(wgpu::ShaderStages::VERTEX, false)
            .texture(
                wgpu::ShaderStages::FRAGMENT,
                false,
                wgpu::TextureViewDimension::D2,
                wgpu::TextureSampleType::Float { filterable: true },
            )
            .sampler(wgpu::ShaderStages::FRAGMENT, sampler_filtering)
            .build(device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shard-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Snapshots carry premultiplied alpha
        let premultiplied = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        };

        let pipeline = wgpu::RenderPipelineBuilder::from_layout(&pipeline_layout, &vs_mod)
            .fragment_shader(&fs_mod)
            .color_format(dst_format)
            .color_blend(premultiplied)
            .alpha_blend(premultiplied)
            .add_instance_buffer::<ShardGeometry>(&GEOMETRY_ATTRS)
            .add_instance_buffer::<ShardTransform>(&TRANSFORM_ATTRS)
            .sample_count(sample_count)
            .primitive_topology(wgpu::PrimitiveTopology::TriangleStrip)
            .build(device);

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            grid: None,
            texture: None,
            bind_group: None,
        }
    }

    // Bring GPU resources up to date with the effect. Call from `update`, before the frame's view.
    pub fn sync(&mut self, app: &App, effect: &ShatterEffect) {
        let mut dirty = false;

        if let Some(image) = effect.take_pending_texture() {
            debug!(width = image.width(), height = image.height(), "uploading shard texture");
            let texture = wgpu::Texture::from_image(app, &image.into_dynamic());
            let view = texture.view().build();
            self.texture = Some(ShardTexture {
                _texture: texture,
                view,
            });
            dirty = true;
        }

        let generation = effect.generation();
        if self.grid.as_ref().map(|grid| grid.generation) != Some(generation) {
            let window = app.main_window();
            self.grid = Some(upload_grid(window.device(), &effect.shard_frame()));
            dirty = true;
        }

        if dirty {
            self.rebuild_bind_group(app);
        }
    }

    fn rebuild_bind_group(&mut self, app: &App) {
        let (Some(grid), Some(texture)) = (&self.grid, &self.texture) else {
            return;
        };
        let window = app.main_window();
        let bind_group = wgpu::BindGroupBuilder::new()
            .buffer::<ShardUniforms>(&grid.uniforms, 0..1)
            .texture_view(&texture.view)
            .sampler(&self.sampler)
            .build(window.device(), &self.bind_group_layout);
        self.bind_group = Some(bind_group);
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    // Ready to draw: a texture has been uploaded for the current grid
    pub fn is_ready(&self) -> bool {
        self.bind_group.is_some()
    }

    // Bind this renderer to one frame so the effect can draw through it
    pub fn pass<'a, 'f>(&'a self, device: &'a wgpu::Device, frame: &'a Frame<'f>) -> ShardPass<'a, 'f> {
        ShardPass {
            renderer: self,
            device,
            frame,
        }
    }
}

fn upload_grid(device: &wgpu::Device, frame: &ShardFrame<'_>) -> GridBuffers {
    debug!(generation = frame.generation, shards = frame.len(), "uploading shard geometry");

    let geometry = device.create_buffer_init(&wgpu::BufferInitDescriptor {
        label: Some("shard-geometry"),
        contents: geometry_as_bytes(frame.geometry),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let uniforms = device.create_buffer_init(&wgpu::BufferInitDescriptor {
        label: Some("shard-uniforms"),
        contents: uniforms_as_bytes(&frame.uniforms),
        usage: wgpu::BufferUsages::UNIFORM,
    });

    GridBuffers {
        generation: frame.generation,
        geometry,
        uniforms,
        shard_count: frame.len() as u32,
    }
}

// One frame's worth of drawing through a ShardRenderer
pub struct ShardPass<'a, 'f> {
    renderer: &'a ShardRenderer,
    device: &'a wgpu::Device,
    frame: &'a Frame<'f>,
}

impl DrawShards for ShardPass<'_, '_> {
    fn draw_shards(&self, shards: &ShardFrame<'_>) {
        if shards.is_empty() {
            return;
        }

        let bind_group = self
            .renderer
            .bind_group
            .as_ref()
            .expect("shard texture must be set before the first draw");

        let grid = match &self.renderer.grid {
            Some(grid) if grid.generation == shards.generation => grid,
            _ => {
                // The grid was rebuilt after the last sync; the next update catches up
                debug!(generation = shards.generation, "skipping shard draw for unsynced grid");
                return;
            }
        };

        let transforms = self.device.create_buffer_init(&wgpu::BufferInitDescriptor {
            label: Some("shard-transforms"),
            contents: transforms_as_bytes(&shards.transforms),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let mut encoder = self.frame.command_encoder();
        let mut render_pass = wgpu::RenderPassBuilder::new()
            .color_attachment(self.frame.texture_view(), |color| {
                color.load_op(wgpu::LoadOp::Load)
            })
            .begin(&mut encoder);
        render_pass.set_bind_group(0, bind_group, &[]);
        render_pass.set_pipeline(&self.renderer.pipeline);
        render_pass.set_vertex_buffer(0, grid.geometry.slice(..));
        render_pass.set_vertex_buffer(1, transforms.slice(..));
        render_pass.draw(0..QUAD_VERTICES, 0..grid.shard_count);
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // The incoming screen sits underneath the glass
    let draw = app.draw();
    scene::draw_screen(&draw, app.window_rect(), model.screen_index);

    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, app.window_rect());
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        warn!("failed to draw screen: {:?}", e);
    }

    if model.overlay_visible && model.renderer.is_ready() {
        let window = app.main_window();
        let pass = model.renderer.pass(window.device(), &frame);
        model.effect.render(&pass);
    }

    // Draw the egui UI
    if let Err(e) = model.egui.draw_to_frame(&frame) {
        warn!("failed to draw ui: {:?}", e);
    }
}

fn geometry_as_bytes(data: &[ShardGeometry]) -> &[u8] {
    unsafe { wgpu::bytes::from_slice(data) }
}

fn transforms_as_bytes(data: &[ShardTransform]) -> &[u8] {
    unsafe { wgpu::bytes::from_slice(data) }
}

fn uniforms_as_bytes(uniforms: &ShardUniforms) -> &[u8] {
    unsafe { wgpu::bytes::from(uniforms) }
}
