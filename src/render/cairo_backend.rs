use cairo::{Context, Format, ImageSurface};
use std::f64::consts::TAU;
use std::fs::File;
use std::path::Path;

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawCommand, GlyphTexture, RenderFrame, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub discs_drawn: usize,
    pub textures_drawn: usize,
    pub vector_glyphs_drawn: usize,
}

/// Marker glyph images loaded from PNG assets.
///
/// Glyphs are used as alpha masks, so the tint fully decides their color.
#[derive(Debug)]
pub struct GlyphAtlas {
    circle: ImageSurface,
    cross: ImageSurface,
}

impl GlyphAtlas {
    /// Loads every glyph from `directory` using `GlyphTexture::asset_name`.
    pub fn load_from_dir(directory: impl AsRef<Path>) -> ChartResult<Self> {
        let directory = directory.as_ref();
        Ok(Self {
            circle: load_png(&directory.join(GlyphTexture::MarkerCircle.asset_name()))?,
            cross: load_png(&directory.join(GlyphTexture::MarkerCross.asset_name()))?,
        })
    }

    #[must_use]
    pub fn surface(&self, glyph: GlyphTexture) -> &ImageSurface {
        match glyph {
            GlyphTexture::MarkerCircle => &self.circle,
            GlyphTexture::MarkerCross => &self.cross,
        }
    }
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo renderer backend.
///
/// Supports offscreen image-surface rendering through `Renderer::render` and
/// in-place rendering on an external context through `CairoContextRenderer`.
/// Without a `GlyphAtlas` glyphs are stroked as vector shapes.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    glyphs: Option<GlyphAtlas>,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            glyphs: None,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn with_glyph_atlas(mut self, atlas: GlyphAtlas) -> Self {
        self.glyphs = Some(atlas);
        self
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for command in &frame.commands {
            match command {
                DrawCommand::Disc(disc) => {
                    apply_color(context, disc.color);
                    context.new_path();
                    context.arc(disc.center.x, disc.center.y, disc.radius, 0.0, TAU);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill disc", err))?;
                    stats.discs_drawn += 1;
                }
                DrawCommand::Texture(texture) => match &self.glyphs {
                    Some(atlas) => {
                        paint_glyph(context, atlas.surface(texture.glyph), texture.rect, texture.tint)?;
                        stats.textures_drawn += 1;
                    }
                    None => {
                        stroke_vector_glyph(context, texture.glyph, texture.rect, texture.tint)?;
                        stats.vector_glyphs_drawn += 1;
                    }
                },
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn load_png(path: &Path) -> ChartResult<ImageSurface> {
    let mut file = File::open(path).map_err(|err| {
        ChartError::InvalidData(format!("failed to open glyph `{}`: {err}", path.display()))
    })?;
    ImageSurface::create_from_png(&mut file).map_err(|err| {
        ChartError::InvalidData(format!("failed to decode glyph `{}`: {err}", path.display()))
    })
}

fn paint_glyph(
    context: &Context,
    glyph: &ImageSurface,
    rect: Rect,
    tint: Color,
) -> ChartResult<()> {
    let glyph_width = f64::from(glyph.width());
    let glyph_height = f64::from(glyph.height());
    if glyph_width <= 0.0 || glyph_height <= 0.0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return Ok(());
    }

    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.translate(rect.x, rect.y);
    context.scale(rect.width / glyph_width, rect.height / glyph_height);
    apply_color(context, tint);
    context
        .mask_surface(glyph, 0.0, 0.0)
        .map_err(|err| map_backend_error("failed to paint glyph", err))?;
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}

fn stroke_vector_glyph(
    context: &Context,
    glyph: GlyphTexture,
    rect: Rect,
    tint: Color,
) -> ChartResult<()> {
    let extent = rect.width.min(rect.height);
    if extent <= 0.0 {
        return Ok(());
    }

    let line_width = (extent * 0.15).max(1.0);
    let center = rect.center();
    let half = (extent - line_width) / 2.0;

    apply_color(context, tint);
    context.set_line_width(line_width);
    context.new_path();
    match glyph {
        GlyphTexture::MarkerCircle => {
            context.arc(center.x, center.y, half.max(0.0), 0.0, TAU);
        }
        GlyphTexture::MarkerCross => {
            context.move_to(center.x - half, center.y - half);
            context.line_to(center.x + half, center.y + half);
            context.move_to(center.x + half, center.y - half);
            context.line_to(center.x - half, center.y + half);
        }
    }
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke glyph", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
