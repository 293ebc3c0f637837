use crate::constants::DEFAULT_GAP_PT;
use crate::extract::{EdgeAdjustments, ExtractConfig, FudgeSpec, PercentileWindow, RendererCommand};
use crate::layout::{AlignmentPolicy, GridConfig, PageNumbering};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A horizontal and a vertical length, in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Spacing {
    pub fn uniform(value: f64) -> Self {
        Self {
            horizontal: value,
            vertical: value,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::uniform(DEFAULT_GAP_PT)
    }
}

/// Complete N-up configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NupOptions {
    // Output sheet
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub margins: Spacing,
    pub separation: Spacing,

    // Grid
    pub rows: usize,
    pub cols: usize,
    pub h_policy: AlignmentPolicy,
    pub v_policy: AlignmentPolicy,
    pub numbering: PageNumbering,
    pub shrink_only: bool,
    pub clip: bool,

    // Measurement
    pub percentile: PercentileWindow,
    pub adjustments: EdgeAdjustments,
    pub raster_mode: RasterMode,
    pub renderer: RendererCommand,

    // Output
    pub output_unit: LengthUnit,
}

impl Default for NupOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter,
            orientation: Orientation::Landscape,
            margins: Spacing::default(),
            separation: Spacing::default(),
            rows: 1,
            cols: 2,
            h_policy: AlignmentPolicy::Line,
            v_policy: AlignmentPolicy::Line,
            numbering: PageNumbering::default(),
            shrink_only: false,
            clip: false,
            percentile: PercentileWindow::default(),
            adjustments: EdgeAdjustments::default(),
            raster_mode: RasterMode::Bilevel,
            renderer: RendererCommand::default(),
            output_unit: LengthUnit::Pt,
        }
    }
}

impl NupOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            NupError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| NupError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NupError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await.map_err(|e| {
            NupError::Config(format!("Failed to write config {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(NupError::Config(format!(
                "grid must have at least one row and one column, got {}x{}",
                self.rows, self.cols
            )));
        }

        let (width, height) = self.paper_size.dimensions_pt();
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(NupError::Config(format!(
                "sheet size must be positive, got {}x{}",
                width, height
            )));
        }

        for (name, value) in [
            ("horizontal margin", self.margins.horizontal),
            ("vertical margin", self.margins.vertical),
            ("horizontal separation", self.separation.horizontal),
            ("vertical separation", self.separation.vertical),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(NupError::Config(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        self.pages_per_sheet()?;
        self.percentile.validate()?;

        if self.renderer.program.is_empty() {
            return Err(NupError::Config("No renderer program specified".to_string()));
        }

        Ok(())
    }

    /// Number of pages placed on one sheet
    pub fn pages_per_sheet(&self) -> Result<usize> {
        self.rows.checked_mul(self.cols).ok_or_else(|| {
            NupError::Config(format!("{}x{} grid has too many cells", self.rows, self.cols))
        })
    }

    /// Switch to a preset grid and orientation
    pub fn apply_preset(&mut self, preset: NupPreset) {
        let (rows, cols, orientation) = preset.grid();
        self.rows = rows;
        self.cols = cols;
        self.orientation = orientation;
    }

    pub fn apply_format(&mut self, format: GridFormat) {
        self.rows = format.rows;
        self.cols = format.cols;
    }

    pub fn apply_fudge(&mut self, fudge: &FudgeSpec) {
        self.percentile = self.percentile.with_fudge(fudge);
    }

    /// Layout engine settings derived from these options
    pub fn grid_config(&self) -> GridConfig {
        let (sheet_width, sheet_height) = self.paper_size.dimensions_pt();
        GridConfig {
            rows: self.rows,
            cols: self.cols,
            numbering: self.numbering,
            h_policy: self.h_policy,
            v_policy: self.v_policy,
            sheet_width,
            sheet_height,
            h_margin: self.margins.horizontal,
            v_margin: self.margins.vertical,
            h_sep: self.separation.horizontal,
            v_sep: self.separation.vertical,
            orientation: self.orientation,
            shrink_only: self.shrink_only,
            clip: self.clip,
        }
    }

    /// Extractor settings derived from these options
    pub fn extract_config(&self) -> Result<ExtractConfig> {
        Ok(ExtractConfig {
            slots: self.pages_per_sheet()?,
            percentile: self.percentile,
            mode: self.raster_mode,
        })
    }
}
