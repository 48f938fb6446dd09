use std::fmt;
use std::str::FromStr;

use crate::error::{ResizeError, Result};

/// A positive, finite ratio applied to both spatial dimensions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ResizeError::InvalidScaleFactor(value.to_string()))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Target (height, width). Dimensions are truncated, not rounded.
    pub fn target_dims(self, height: usize, width: usize) -> (usize, usize) {
        (
            (height as f64 * self.0) as usize,
            (width as f64 * self.0) as usize,
        )
    }

    /// File name token, e.g. 0.9 -> `res0_90`.
    pub fn token(self) -> String {
        format!("res{:.2}", self.0).replace('.', "_")
    }
}

impl FromStr for ScaleFactor {
    type Err = ResizeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ResizeError::InvalidScaleFactor(trimmed.to_string()))?;
        Self::new(value).map_err(|_| ResizeError::InvalidScaleFactor(trimmed.to_string()))
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a comma-separated list such as `"0.9,0.8,0.7"`.
pub fn parse_scale_factors(list: &str) -> Result<Vec<ScaleFactor>> {
    list.split(',').map(str::parse).collect()
}
