mod logger;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use pdf_nup::layout::AlignmentPolicy;
use pdf_nup::{
    BoundingBox, FudgeSpec, GridFormat, LengthUnit, NupOptions, NupPreset, Orientation, PaperSize,
    RasterMode, parse_dimension,
};

#[derive(Parser)]
#[command(
    name = "pdfdim",
    about = "Measure page content and compute N-up page specifications",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the page specification placing every page on the sheet
    Layout(RunArgs),

    /// Print the measured bounding box of every slot
    Bbox(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Document to measure (standard input when omitted)
    file: Option<PathBuf>,

    /// Load options from a JSON file; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the resulting options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Only report warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Report measurement and layout details
    #[arg(short, long)]
    verbose: bool,

    /// Sheet width (e.g. 8.5in, 210mm, 612)
    #[arg(short = 'x', long)]
    width: Option<String>,

    /// Sheet height
    #[arg(short = 'y', long)]
    height: Option<String>,

    /// Named paper size (a4, letter, legal, ...)
    #[arg(short, long)]
    paper: Option<String>,

    /// Outer margin on every side
    #[arg(short, long)]
    margin: Option<String>,

    /// Left and right margin
    #[arg(long)]
    hmargin: Option<String>,

    /// Top and bottom margin
    #[arg(long)]
    vmargin: Option<String>,

    /// Separation between pages in both directions
    #[arg(short, long)]
    sep: Option<String>,

    /// Separation between columns
    #[arg(long)]
    hsep: Option<String>,

    /// Separation between rows
    #[arg(long)]
    vsep: Option<String>,

    /// Orientation of the pages on the sheet
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Grid as <rows>x<cols>
    #[arg(short, long)]
    format: Option<String>,

    /// Common arrangement; --format and --orientation override it
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Horizontal alignment policy (0-4)
    #[arg(short = 'a', long, value_parser = clap::value_parser!(u8).range(0..=4))]
    hpolicy: Option<u8>,

    /// Vertical alignment policy (0-4)
    #[arg(short = 'b', long, value_parser = clap::value_parser!(u8).range(0..=4))]
    vpolicy: Option<u8>,

    /// Number pages down columns first
    #[arg(short = 'c', long)]
    column_mode: bool,

    /// Number pages right to left
    #[arg(short = 'd', long)]
    right_to_left: bool,

    /// Number pages bottom to top
    #[arg(short = 'e', long)]
    bottom_to_top: bool,

    /// Render in color instead of black and white
    #[arg(short = 'C', long)]
    color: bool,

    /// Clip each page to its cell
    #[arg(short = 'i', long)]
    clip: bool,

    /// Ignore this percentage of ink at the page edges, e.g. 2 or lr1.5
    #[arg(short = 'F', long)]
    fudge: Option<String>,

    /// Move the left edge of every box inward
    #[arg(long)]
    ladjust: Option<String>,

    /// Move the right edge of every box inward
    #[arg(long)]
    radjust: Option<String>,

    /// Move the top edge of every box inward
    #[arg(long)]
    tadjust: Option<String>,

    /// Move the bottom edge of every box inward
    #[arg(long)]
    badjust: Option<String>,

    /// Never enlarge pages
    #[arg(short = 'S', long)]
    shrink: bool,

    /// Unit of lengths in the page specification
    #[arg(long, value_enum)]
    unit: Option<UnitArg>,

    /// Program rendering the document to raw PBM/PPM images
    #[arg(long)]
    renderer: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
    UpsideDown,
    Seascape,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    #[value(name = "1up")]
    One,
    #[value(name = "2up")]
    Two,
    #[value(name = "4up")]
    Four,
    #[value(name = "8up")]
    Eight,
    #[value(name = "9up")]
    Nine,
    #[value(name = "16up")]
    Sixteen,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Pt,
    In,
    Cm,
    Mm,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
            OrientationArg::UpsideDown => Self::UpsideDown,
            OrientationArg::Seascape => Self::Seascape,
        }
    }
}

impl From<PresetArg> for NupPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::One => Self::One,
            PresetArg::Two => Self::Two,
            PresetArg::Four => Self::Four,
            PresetArg::Eight => Self::Eight,
            PresetArg::Nine => Self::Nine,
            PresetArg::Sixteen => Self::Sixteen,
        }
    }
}

impl From<UnitArg> for LengthUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Pt => Self::Pt,
            UnitArg::In => Self::In,
            UnitArg::Cm => Self::Cm,
            UnitArg::Mm => Self::Mm,
        }
    }
}

fn dimension(value: &str) -> Result<f64> {
    Ok(parse_dimension(value, LengthUnit::Pt)?)
}

impl RunArgs {
    /// Build the options: saved config (or defaults) with flags on top.
    async fn options(&self) -> Result<NupOptions> {
        let mut options = match &self.config {
            Some(path) => NupOptions::load(path).await?,
            None => NupOptions::default(),
        };

        if let Some(name) = &self.paper {
            options.paper_size = name.parse::<PaperSize>()?;
        }
        if self.width.is_some() || self.height.is_some() {
            let (mut width_pt, mut height_pt) = options.paper_size.dimensions_pt();
            if let Some(width) = &self.width {
                width_pt = dimension(width)?;
            }
            if let Some(height) = &self.height {
                height_pt = dimension(height)?;
            }
            options.paper_size = PaperSize::Custom {
                width_pt,
                height_pt,
            };
        }

        if let Some(margin) = &self.margin {
            options.margins.horizontal = dimension(margin)?;
            options.margins.vertical = options.margins.horizontal;
        }
        if let Some(margin) = &self.hmargin {
            options.margins.horizontal = dimension(margin)?;
        }
        if let Some(margin) = &self.vmargin {
            options.margins.vertical = dimension(margin)?;
        }
        if let Some(sep) = &self.sep {
            options.separation.horizontal = dimension(sep)?;
            options.separation.vertical = options.separation.horizontal;
        }
        if let Some(sep) = &self.hsep {
            options.separation.horizontal = dimension(sep)?;
        }
        if let Some(sep) = &self.vsep {
            options.separation.vertical = dimension(sep)?;
        }

        if let Some(preset) = self.preset {
            options.apply_preset(preset.into());
        }
        if let Some(format) = &self.format {
            options.apply_format(format.parse::<GridFormat>()?);
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }

        if let Some(policy) = self.hpolicy {
            options.h_policy = AlignmentPolicy::from_index(policy.into())?;
        }
        if let Some(policy) = self.vpolicy {
            options.v_policy = AlignmentPolicy::from_index(policy.into())?;
        }
        options.numbering.column_major |= self.column_mode;
        options.numbering.right_to_left |= self.right_to_left;
        options.numbering.bottom_to_top |= self.bottom_to_top;

        if self.color {
            options.raster_mode = RasterMode::Color;
        }
        options.clip |= self.clip;
        options.shrink_only |= self.shrink;

        if let Some(fudge) = &self.fudge {
            options.apply_fudge(&fudge.parse::<FudgeSpec>()?);
        }
        if let Some(value) = &self.ladjust {
            options.adjustments.left = dimension(value)?;
        }
        if let Some(value) = &self.radjust {
            options.adjustments.right = dimension(value)?;
        }
        if let Some(value) = &self.tadjust {
            options.adjustments.top = dimension(value)?;
        }
        if let Some(value) = &self.badjust {
            options.adjustments.bottom = dimension(value)?;
        }

        if let Some(unit) = self.unit {
            options.output_unit = unit.into();
        }
        if let Some(program) = &self.renderer {
            options.renderer.program = program.clone();
        }

        options.validate()?;
        Ok(options)
    }

    async fn prepare(&self) -> Result<NupOptions> {
        logger::StderrLogger::new(logger::level_for(self.quiet, self.verbose)).init()?;

        let options = self.options().await?;
        if let Some(path) = &self.save_config {
            options.save(path).await?;
            debug!("options saved to {}", path.display());
        }
        Ok(options)
    }
}

fn describe_box(slot: usize, bbox: &BoundingBox) -> String {
    if bbox.is_empty() {
        format!("{}: empty", slot)
    } else {
        format!(
            "{}: x0={} x1={} y0={} y1={}",
            slot, bbox.x0, bbox.x1, bbox.y0, bbox.y1
        )
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Layout(args) => {
            let options = args.prepare().await?;
            let spec = pdf_nup::compute_page_spec(args.file, &options).await?;
            println!("{}", spec);
        }
        Commands::Bbox(args) => {
            let options = args.prepare().await?;
            let boxes = pdf_nup::measure(args.file, &options).await?;
            for (slot, bbox) in boxes.iter().enumerate() {
                println!("{}", describe_box(slot, bbox));
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pdfdim: {}", e);
            ExitCode::FAILURE
        }
    }
}
