use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use wgpu::util::DeviceExt;

use crate::paint::Color;

use super::quad::{build_quad, QuadSpec, QuadVertex};

/// Format of every offscreen surface texture.
pub const SURFACE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// How drawn pixels combine with the target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendMode {
    /// Straight-alpha "over".
    Blend,
    /// Overwrite the target, alpha included.
    Replace,
}

impl BlendMode {
    fn state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Blend => wgpu::BlendState::ALPHA_BLENDING,
            BlendMode::Replace => wgpu::BlendState::REPLACE,
        }
    }
}

/// A GPU texture usable both as a render target and as a blit source.
pub struct GpuTexture {
    id: u64,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl GpuTexture {
    /// Process-unique identity, used to reject self-blits.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

impl std::fmt::Debug for GpuTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuTexture")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

struct Inner {
    device: wgpu::Device,
    queue: wgpu::Queue,
    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    sampler: wgpu::Sampler,
    pipelines: RefCell<HashMap<(wgpu::TextureFormat, BlendMode), wgpu::RenderPipeline>>,
    /// 1x1 white texel; solid fills sample it so one pipeline serves both.
    white: RefCell<Option<GpuTexture>>,
    encoder: RefCell<Option<wgpu::CommandEncoder>>,
}

/// Shared drawing handle over one wgpu device.
///
/// Cloning is cheap; every [`Surface`](crate::Surface) keeps one. Draw calls
/// are recorded in order into a pending encoder and submitted by [`flush`].
///
/// [`flush`]: Renderer::flush
#[derive(Clone)]
pub struct Renderer {
    inner: Rc<Inner>,
}

impl Renderer {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cgame sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cgame sprite bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cgame sprite pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        // Nearest sampling keeps scaled pixel art sharp.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("cgame nearest sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            inner: Rc::new(Inner {
                device,
                queue,
                shader,
                bind_group_layout,
                pipeline_layout,
                sampler,
                pipelines: RefCell::new(HashMap::new()),
                white: RefCell::new(None),
                encoder: RefCell::new(None),
            }),
        }
    }

    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.inner.device
    }

    #[inline]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.inner.queue
    }

    /// Largest width/height a texture may have on this device.
    pub fn max_texture_dimension(&self) -> u32 {
        self.inner.device.limits().max_texture_dimension_2d
    }

    /// Creates a transparent render-target texture.
    pub fn create_texture(&self, width: u32, height: u32) -> Result<GpuTexture> {
        anyhow::ensure!(width > 0 && height > 0, "texture size {width}x{height} is empty");
        let max = self.max_texture_dimension();
        anyhow::ensure!(
            width <= max && height <= max,
            "texture size {width}x{height} exceeds device limit {max}"
        );

        let id = NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed);
        let texture = self.inner.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("cgame surface"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SURFACE_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = self.inner.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cgame surface bind group"),
            layout: &self.inner.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.inner.sampler),
                },
            ],
        });

        // wgpu zero-initializes textures, so new surfaces start transparent.
        Ok(GpuTexture { id, texture, view, bind_group, width, height })
    }

    /// Creates a texture initialized with tightly packed RGBA8 rows.
    pub fn create_texture_rgba(&self, width: u32, height: u32, pixels: &[u8]) -> Result<GpuTexture> {
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            pixels.len() == expected,
            "pixel buffer has {} bytes, expected {expected} for {width}x{height}",
            pixels.len()
        );

        let tex = self.create_texture(width, height)?;
        self.inner.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &tex.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );
        Ok(tex)
    }

    /// Clears the whole of `target` to `color`.
    pub fn clear(&self, target: &GpuTexture, color: Color) {
        self.clear_view(&target.view, color);
    }

    fn clear_view(&self, view: &wgpu::TextureView, color: Color) {
        self.with_encoder(|encoder| {
            let _ = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cgame clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        });
    }

    /// Draws `source` (or plain color when `None`) onto `target`.
    ///
    /// A texture cannot be sampled while it is being rendered to, so drawing
    /// a texture onto itself is skipped with a warning.
    pub fn draw(
        &self,
        target: &GpuTexture,
        source: Option<&GpuTexture>,
        quads: &[QuadSpec],
        blend: BlendMode,
    ) {
        if let Some(src) = source {
            if src.id == target.id {
                log::warn!("cannot blit a surface onto itself (texture {})", src.id);
                return;
            }
        }
        self.draw_to_view(
            &target.view,
            SURFACE_FORMAT,
            (target.width, target.height),
            source,
            quads,
            blend,
        );
    }

    /// Copies `source` over the whole of a swap-chain view.
    pub fn composite(
        &self,
        view: &wgpu::TextureView,
        format: wgpu::TextureFormat,
        size: (u32, u32),
        source: &GpuTexture,
    ) {
        self.clear_view(view, Color::BLACK);
        let dst = crate::coords::Rect::new(0.0, 0.0, size.0 as f32, size.1 as f32);
        self.draw_to_view(
            view,
            format,
            size,
            Some(source),
            &[QuadSpec::solid(dst, Color::WHITE.to_f32())],
            BlendMode::Replace,
        );
    }

    fn draw_to_view(
        &self,
        view: &wgpu::TextureView,
        format: wgpu::TextureFormat,
        (tw, th): (u32, u32),
        source: Option<&GpuTexture>,
        quads: &[QuadSpec],
        blend: BlendMode,
    ) {
        if quads.is_empty() {
            return;
        }

        let vertices: Vec<QuadVertex> = quads.iter().flat_map(|q| build_quad(q, tw, th)).collect();
        let vbo = self.inner.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cgame quad vbo"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        self.ensure_pipeline(format, blend);
        let white_guard;
        let bind_group = match source {
            Some(src) => &src.bind_group,
            None => {
                self.ensure_white();
                white_guard = self.inner.white.borrow();
                match white_guard.as_ref() {
                    Some(w) => &w.bind_group,
                    None => return,
                }
            }
        };

        let pipelines = self.inner.pipelines.borrow();
        let Some(pipeline) = pipelines.get(&(format, blend)) else { return };

        self.with_encoder(|encoder| {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cgame sprite pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..vertices.len() as u32, 0..1);
        });
    }

    /// Submits everything recorded since the last flush.
    pub fn flush(&self) {
        let pending = self.inner.encoder.borrow_mut().take();
        if let Some(encoder) = pending {
            self.inner.queue.submit(Some(encoder.finish()));
        }
    }

    fn with_encoder(&self, f: impl FnOnce(&mut wgpu::CommandEncoder)) {
        let mut slot = self.inner.encoder.borrow_mut();
        let encoder = slot.get_or_insert_with(|| {
            self.inner
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("cgame encoder"),
                })
        });
        f(encoder);
    }

    fn ensure_white(&self) {
        if self.inner.white.borrow().is_some() {
            return;
        }
        match self.create_texture_rgba(1, 1, &Color::WHITE.to_array()) {
            Ok(tex) => *self.inner.white.borrow_mut() = Some(tex),
            Err(err) => log::error!("failed to create fill texture: {err:#}"),
        }
    }

    fn ensure_pipeline(&self, format: wgpu::TextureFormat, blend: BlendMode) {
        if self.inner.pipelines.borrow().contains_key(&(format, blend)) {
            return;
        }

        let inner = &self.inner;
        let pipeline = inner.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cgame sprite pipeline"),
            layout: Some(&inner.pipeline_layout),

            vertex: wgpu::VertexState {
                module: &inner.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &inner.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(blend.state()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("created sprite pipeline for {format:?} / {blend:?}");
        inner.pipelines.borrow_mut().insert((format, blend), pipeline);
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}
