pub mod constants;
pub mod extract;
pub mod layout;
mod options;
mod pipeline;
mod spec;
mod types;

pub use extract::{
    BoundingBox, EdgeAdjustments, ExtractConfig, FudgeSpec, PercentileWindow, RendererCommand,
    extract_boxes,
};
pub use layout::{Layout, layout_pages};
pub use options::*;
pub use pipeline::{compute_page_spec, measure};
pub use spec::PageSpec;
pub use types::*;
