//! Percentile windows for trimming stray ink at page edges

use std::str::FromStr;

use crate::types::{NupError, Result};

/// Central fraction of ink mass, per axis, that counts as page content.
///
/// `x0` and `y0` are the fraction discarded from the left and bottom;
/// `x1` and `y1` are the fraction kept up to on the right and top.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentileWindow {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Default for PercentileWindow {
    fn default() -> Self {
        Self {
            x0: 0.0,
            x1: 1.0,
            y0: 0.0,
            y1: 1.0,
        }
    }
}

impl PercentileWindow {
    /// Apply a fudge specification on top of this window
    pub fn with_fudge(mut self, fudge: &FudgeSpec) -> Self {
        let fraction = fudge.percent * 0.01;
        let edges = fudge.edges;
        let all = edges == TrimEdges::default();

        if all || edges.left {
            self.x0 = fraction;
        }
        if all || edges.right {
            self.x1 = 1.0 - fraction;
        }
        if all || edges.bottom {
            self.y0 = fraction;
        }
        if all || edges.top {
            self.y1 = 1.0 - fraction;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("x0", self.x0),
            ("x1", self.x1),
            ("y0", self.y0),
            ("y1", self.y1),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(NupError::Config(format!(
                    "percentile {} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Which edges a fudge specification trims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrimEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

/// A trim request such as `5`, `L2.5` or `tb10`.
///
/// Leading letters select edges (`L`, `R`, `T`/`U` for top, `B`/`D` for
/// bottom); the remainder is a percentage in `[0, 100]`. Without letters
/// every edge is trimmed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FudgeSpec {
    pub edges: TrimEdges,
    pub percent: f64,
}

impl FromStr for FudgeSpec {
    type Err = NupError;

    fn from_str(s: &str) -> Result<Self> {
        let mut edges = TrimEdges::default();
        let mut rest = s;

        while let Some(c) = rest.chars().next() {
            match c.to_ascii_lowercase() {
                'l' => edges.left = true,
                'r' => edges.right = true,
                'b' | 'd' => edges.bottom = true,
                't' | 'u' => edges.top = true,
                _ => break,
            }
            rest = &rest[c.len_utf8()..];
        }

        let percent: f64 = rest
            .parse()
            .map_err(|_| NupError::Config(format!("invalid percentage -- {}", s)))?;
        if !(0.0..=100.0).contains(&percent) {
            return Err(NupError::Config(format!("invalid percentage -- {}", s)));
        }

        Ok(FudgeSpec { edges, percent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fudge_all_edges() {
        let fudge: FudgeSpec = "5".parse().unwrap();
        let window = PercentileWindow::default().with_fudge(&fudge);
        assert!((window.x0 - 0.05).abs() < 1e-12);
        assert!((window.x1 - 0.95).abs() < 1e-12);
        assert!((window.y0 - 0.05).abs() < 1e-12);
        assert!((window.y1 - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_fudge_selected_edges() {
        let fudge: FudgeSpec = "lU10".parse().unwrap();
        assert!(fudge.edges.left && fudge.edges.top);
        assert!(!fudge.edges.right && !fudge.edges.bottom);

        let window = PercentileWindow::default().with_fudge(&fudge);
        assert!((window.x0 - 0.1).abs() < 1e-12);
        assert_eq!(window.x1, 1.0);
        assert_eq!(window.y0, 0.0);
        assert!((window.y1 - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_fudge_rejects_out_of_range() {
        assert!("101".parse::<FudgeSpec>().is_err());
        assert!("-1".parse::<FudgeSpec>().is_err());
        assert!("Lx".parse::<FudgeSpec>().is_err());
        assert!("L".parse::<FudgeSpec>().is_err());
    }

    #[test]
    fn test_window_validation() {
        assert!(PercentileWindow::default().validate().is_ok());
        let window = PercentileWindow {
            x1: 1.5,
            ..Default::default()
        };
        assert!(window.validate().is_err());
    }
}
