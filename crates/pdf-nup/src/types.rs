use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{POINTS_PER_CM, POINTS_PER_INCH, POINTS_PER_MM};

#[derive(Error, Debug)]
pub enum NupError {
    #[error("Out of memory")]
    OutOfMemory,
    #[error("Could not invoke {program}: {source}")]
    RendererUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unexpected end of file from renderer")]
    UnexpectedEof,
    #[error("Malformed raster stream: {0}")]
    Format(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, NupError>;

/// Orientation of the logical pages on the output sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Pages upright
    #[default]
    Portrait,
    /// Pages turned a quarter turn counterclockwise
    Landscape,
    /// Pages turned half a turn
    UpsideDown,
    /// Pages turned a quarter turn clockwise
    Seascape,
}

impl Orientation {
    /// Whether the sheet's width and height trade places for the layout
    pub fn is_sideways(self) -> bool {
        matches!(self, Orientation::Landscape | Orientation::Seascape)
    }

    /// Rotation applied to every placed page
    pub fn rotation(self) -> Rotation {
        match self {
            Orientation::Portrait => Rotation::None,
            Orientation::Landscape => Rotation::Left,
            Orientation::UpsideDown => Rotation::UpsideDown,
            Orientation::Seascape => Rotation::Right,
        }
    }
}

/// Rotation tag attached to a placed page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Left,
    UpsideDown,
    Right,
}

impl Rotation {
    /// The tag as it appears in a page specification
    pub fn tag(self) -> &'static str {
        match self {
            Rotation::None => "",
            Rotation::Left => "L",
            Rotation::UpsideDown => "U",
            Rotation::Right => "R",
        }
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    B5,
    Letter,
    Legal,
    Tabloid,
    Statement,
    Executive,
    Folio,
    Quarto,
    TenByFourteen,
    Custom { width_pt: f64, height_pt: f64 },
}

impl PaperSize {
    /// Every named size, in the order they are listed to users
    pub const NAMED: [PaperSize; 12] = [
        PaperSize::A4,
        PaperSize::A3,
        PaperSize::A5,
        PaperSize::B5,
        PaperSize::Letter,
        PaperSize::Legal,
        PaperSize::Tabloid,
        PaperSize::Statement,
        PaperSize::Executive,
        PaperSize::Folio,
        PaperSize::Quarto,
        PaperSize::TenByFourteen,
    ];

    /// Portrait dimensions in points
    pub fn dimensions_pt(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (595.0, 842.0),
            PaperSize::A3 => (842.0, 1191.0),
            PaperSize::A5 => (421.0, 595.0),
            PaperSize::B5 => (516.0, 729.0),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
            PaperSize::Tabloid => (792.0, 1224.0),
            PaperSize::Statement => (396.0, 612.0),
            PaperSize::Executive => (540.0, 720.0),
            PaperSize::Folio => (612.0, 936.0),
            PaperSize::Quarto => (610.0, 780.0),
            PaperSize::TenByFourteen => (720.0, 1008.0),
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => (width_pt, height_pt),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "a4",
            PaperSize::A3 => "a3",
            PaperSize::A5 => "a5",
            PaperSize::B5 => "b5",
            PaperSize::Letter => "letter",
            PaperSize::Legal => "legal",
            PaperSize::Tabloid => "tabloid",
            PaperSize::Statement => "statement",
            PaperSize::Executive => "executive",
            PaperSize::Folio => "folio",
            PaperSize::Quarto => "quarto",
            PaperSize::TenByFourteen => "10x14",
            PaperSize::Custom { .. } => "custom",
        }
    }
}

impl FromStr for PaperSize {
    type Err = NupError;

    fn from_str(s: &str) -> Result<Self> {
        PaperSize::NAMED
            .iter()
            .copied()
            .find(|size| size.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = PaperSize::NAMED.iter().map(|p| p.name()).collect();
                NupError::Config(format!(
                    "unrecognized page format '{}'; use one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// Length units accepted in dimensions and used in page specifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthUnit {
    #[default]
    Pt,
    In,
    Cm,
    Mm,
}

impl LengthUnit {
    /// Size of one unit in points
    pub fn points(self) -> f64 {
        match self {
            LengthUnit::Pt => 1.0,
            LengthUnit::In => POINTS_PER_INCH,
            LengthUnit::Cm => POINTS_PER_CM,
            LengthUnit::Mm => POINTS_PER_MM,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Pt => "pt",
            LengthUnit::In => "in",
            LengthUnit::Cm => "cm",
            LengthUnit::Mm => "mm",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        [LengthUnit::Pt, LengthUnit::In, LengthUnit::Cm, LengthUnit::Mm]
            .into_iter()
            .find(|unit| unit.suffix().eq_ignore_ascii_case(suffix))
    }
}

/// Parse a dimension such as `6.5in`, `15cm` or `36` into points.
///
/// A bare number is taken in `default_unit`.
pub fn parse_dimension(s: &str, default_unit: LengthUnit) -> Result<f64> {
    let s = s.trim();
    let split = s
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(s.len());
    let (number, suffix) = s.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| NupError::Config(format!("invalid dimension -- {}", s)))?;

    let unit = if suffix.is_empty() {
        default_unit
    } else {
        LengthUnit::from_suffix(suffix)
            .ok_or_else(|| NupError::Config(format!("invalid dimension -- {}", s)))?
    };

    Ok(value * unit.points())
}

/// How pages are rasterized for ink detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RasterMode {
    /// One bit per pixel; set bits are ink
    #[default]
    Bilevel,
    /// Full color; anything differing from the first pixel is ink
    Color,
}

/// Common N-up arrangements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NupPreset {
    /// Fit a single page to the sheet
    One,
    Two,
    Four,
    Eight,
    Nine,
    Sixteen,
}

impl NupPreset {
    /// Returns (rows, cols, orientation)
    pub fn grid(self) -> (usize, usize, Orientation) {
        match self {
            NupPreset::One => (1, 1, Orientation::Portrait),
            NupPreset::Two => (1, 2, Orientation::Landscape),
            NupPreset::Four => (2, 2, Orientation::Portrait),
            NupPreset::Eight => (2, 4, Orientation::Landscape),
            NupPreset::Nine => (3, 3, Orientation::Portrait),
            NupPreset::Sixteen => (4, 4, Orientation::Portrait),
        }
    }
}

/// Grid dimensions written as `<rows>x<cols>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridFormat {
    pub rows: usize,
    pub cols: usize,
}

impl FromStr for GridFormat {
    type Err = NupError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || NupError::Config(format!("invalid format -- {}; use <n>x<m>", s));
        let (rows, cols) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
        let rows: usize = rows.parse().map_err(|_| invalid())?;
        let cols: usize = cols.parse().map_err(|_| invalid())?;
        if rows == 0 || cols == 0 {
            return Err(invalid());
        }
        Ok(GridFormat { rows, cols })
    }
}

impl fmt::Display for GridFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
