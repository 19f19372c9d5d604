use vello_cpu::kurbo::Shape as _;

use crate::{
    foundation::{core::SurfaceSize, error::FieldResult},
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    scene::{Dot, ParticleScene},
};

const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU raster backend: every dot is a filled circle painted by `vello_cpu`.
pub struct CpuRenderer {
    settings: RenderSettings,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuRenderer {
    /// Create a renderer; the target pixmap is allocated lazily on first render.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            surface: None,
        }
    }

    fn surface_for(&mut self, width: u16, height: u16) -> &mut CpuSurface {
        if self
            .surface
            .as_ref()
            .is_some_and(|s| s.width != width || s.height != height)
        {
            self.surface = None;
        }
        self.surface.get_or_insert_with(|| CpuSurface {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }
}

impl RenderBackend for CpuRenderer {
    fn render_scene(
        &mut self,
        scene: &dyn ParticleScene,
        size: SurfaceSize,
    ) -> FieldResult<FrameRGBA> {
        let (width, height) = size.to_u16()?;
        let clear = self.settings.clear_rgba;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        if let Some([r, g, b, a]) = clear {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }
        scene.visit_dots(&mut |dot| draw_dot(&mut ctx, &dot));
        ctx.flush();

        let surface = self.surface_for(width, height);
        clear_pixmap(&mut surface.pixmap);
        ctx.render_to_pixmap(&mut surface.pixmap);

        Ok(FrameRGBA {
            width: size.width,
            height: size.height,
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_dot(ctx: &mut vello_cpu::RenderContext, dot: &Dot) {
    let [r, g, b, a] = dot.rgba;
    if a == 0 || !dot.center.x.is_finite() || !dot.center.y.is_finite() {
        return;
    }
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    let circle = vello_cpu::kurbo::Circle::new((dot.center.x, dot.center.y), dot.radius);
    ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
