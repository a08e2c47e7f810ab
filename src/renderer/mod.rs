//! Rendering Module
//!
//! A deliberately small renderer: the actor is visualised as its skeleton
//! plus a heading arrow over a fogged ground grid, all as debug lines.
//!
//! # Lifecycle
//!
//! ```text
//! Renderer::new(settings)  -> no GPU state yet
//! Renderer::init(window)   -> WgpuContext + DebugLinePass
//! Renderer::render(sim)    -> once per frame
//! ```
//!
//! Surface errors during a frame are logged and the frame is skipped.

pub mod context;
pub mod debug_lines;
pub mod lines;
pub mod settings;

pub use context::WgpuContext;
pub use debug_lines::DebugLinePass;
pub use lines::{LineBatch, LineVertex};
pub use settings::{FogSettings, GridSettings, RenderSettings, srgb_hex};

use crate::character::Simulation;
use crate::errors::Result;

const HEADING_LENGTH: f32 = 1.5;

struct GpuState {
    context: WgpuContext,
    line_pass: DebugLinePass,
}

pub struct Renderer {
    settings: RenderSettings,
    gpu: Option<GpuState>,
    batch: LineBatch,
}

impl Renderer {
    /// Creates a renderer without touching the GPU. Call [`init`](Self::init)
    /// once a window exists.
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            gpu: None,
            batch: LineBatch::new(),
        }
    }

    pub async fn init(
        &mut self,
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<()> {
        let context = WgpuContext::new(window, &self.settings, width, height).await?;
        let line_pass = DebugLinePass::new(&context);
        log::info!(
            "Renderer ready: {:?}, {}x{}",
            context.color_format(),
            context.config.width,
            context.config.height
        );
        self.gpu = Some(GpuState { context, line_pass });
        Ok(())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.gpu.is_some()
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = &mut self.gpu {
            gpu.context.resize(width, height);
        }
    }

    /// Fills the line batch from the simulation; the actor only appears once
    /// its model is ready.
    pub fn build_lines(batch: &mut LineBatch, settings: &RenderSettings, sim: &Simulation) {
        batch.clear();
        batch.push_grid(&settings.grid);

        if let Some(actor) = sim.actor() {
            let pose = sim.pose();
            batch.push_heading(&pose, HEADING_LENGTH, lines::HEADING_COLOR);
            batch.push_rig(&actor.rig, pose.root_matrix(), lines::BONE_COLOR);
        }
    }

    pub fn render(&mut self, sim: &Simulation) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = gpu.context.size();
                gpu.context.resize(w, h);
                return;
            }
            Err(e) => {
                log::error!("Render error: {e:?}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self::build_lines(&mut self.batch, &self.settings, sim);

        let camera = sim.camera();
        gpu.line_pass.prepare(
            &gpu.context,
            &self.settings,
            camera.view_projection_matrix(),
            camera.transform.position,
            &self.batch,
        );

        let mut encoder = gpu
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.settings.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gpu.context.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let vertex_count = u32::try_from(self.batch.vertices().len()).unwrap_or(u32::MAX);
            gpu.line_pass.draw(&mut pass, vertex_count);
        }

        gpu.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}
