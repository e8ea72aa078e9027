use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{DiscPrimitive, TexturePrimitive};

/// Backend-agnostic scene for one marker draw pass.
///
/// Primitives are painted in push order, so a marker's disc lands under its
/// glyph and later markers land over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Disc(DiscPrimitive),
    Texture(TexturePrimitive),
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn push_disc(&mut self, disc: DiscPrimitive) {
        self.commands.push(DrawCommand::Disc(disc));
    }

    pub fn push_texture(&mut self, texture: TexturePrimitive) {
        self.commands.push(DrawCommand::Texture(texture));
    }

    #[must_use]
    pub fn with_disc(mut self, disc: DiscPrimitive) -> Self {
        self.push_disc(disc);
        self
    }

    #[must_use]
    pub fn with_texture(mut self, texture: TexturePrimitive) -> Self {
        self.push_texture(texture);
        self
    }

    pub fn discs(&self) -> impl Iterator<Item = &DiscPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Disc(disc) => Some(disc),
            DrawCommand::Texture(_) => None,
        })
    }

    pub fn textures(&self) -> impl Iterator<Item = &TexturePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Texture(texture) => Some(texture),
            DrawCommand::Disc(_) => None,
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for command in &self.commands {
            match command {
                DrawCommand::Disc(disc) => disc.validate()?,
                DrawCommand::Texture(texture) => texture.validate()?,
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
