//! Render configuration types

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// How intensities are turned into output samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// 16-bit grayscale, full dynamic range
    Gray,
    /// 8-bit RGB, perceptually uniform blue-green-yellow
    Viridis,
    /// 8-bit RGB, black-red-yellow
    Inferno,
}

/// Configuration for rendering a pixel matrix to TIFF
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
    pub colormap: Colormap,
    /// Append a vertical min-to-max scale bar to the right of the image
    pub legend: bool,
    /// Integer nearest-neighbour upscale factor, must be at least 1
    pub scale: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
            colormap: Colormap::Viridis,
            legend: false,
            scale: 1,
        }
    }
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }
}

/// Builder for RenderConfig
#[derive(Default)]
pub struct RenderConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    colormap: Option<Colormap>,
    legend: Option<bool>,
    scale: Option<u32>,
}

impl RenderConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = Some(colormap);
        self
    }

    pub fn legend(mut self, enable: bool) -> Self {
        self.legend = Some(enable);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn build(self) -> RenderConfig {
        let default = RenderConfig::default();
        RenderConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            colormap: self.colormap.unwrap_or(default.colormap),
            legend: self.legend.unwrap_or(default.legend),
            scale: self.scale.unwrap_or(default.scale),
        }
    }
}
