//! Page specification output
//!
//! A [`Layout`] is written as a single line of the form
//! `<n>:<term>+<term>...`, one term per input page, in a syntax the
//! page-rearrangement tools of the PostScript utilities accept.

use std::fmt;

use crate::layout::{Layout, Transform};
use crate::types::LengthUnit;

/// A layout formatted in a given output unit
#[derive(Debug, Clone, Copy)]
pub struct PageSpec<'a> {
    layout: &'a Layout,
    unit: LengthUnit,
}

impl Layout {
    /// Borrow this layout as a printable page specification.
    pub fn page_spec(&self, unit: LengthUnit) -> PageSpec<'_> {
        PageSpec { layout: self, unit }
    }
}

impl PageSpec<'_> {
    fn write_term(&self, f: &mut fmt::Formatter<'_>, transform: &Transform) -> fmt::Result {
        let per_unit = self.unit.points();
        let suffix = self.unit.suffix();

        write!(
            f,
            "{}@{:.3}{}({:.3}{suffix},{:.3}{suffix})",
            transform.page,
            transform.scale,
            transform.rotation.tag(),
            transform.dx / per_unit,
            transform.dy / per_unit,
        )?;

        if let Some(clip) = &transform.clip {
            write!(
                f,
                "{{{:.3}{suffix},{:.3}{suffix},{:.3}{suffix},{:.3}{suffix}}}",
                clip.x0 / per_unit,
                clip.y0 / per_unit,
                clip.x1 / per_unit,
                clip.y1 / per_unit,
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for PageSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.layout.transforms.len())?;
        for (i, transform) in self.layout.transforms.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            self.write_term(f, transform)?;
        }
        Ok(())
    }
}
