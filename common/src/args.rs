//! The argument mapping handed to the argument processors.
//!
//! Recognised keys:
//! * `input`: file or directory to process (required).
//! * `output`: target file or directory (optional).
//! * `dimensions`: raw `[width, height]` tokens (required for page expansion).
//! * `resolution`: raw `[magnitude, unit]` tokens (optional for PDF unpacking).
//!
//! Values are kept raw so validation happens in one place, in the processors.

use std::path::{Path, PathBuf};

use crate::error::ValidationError;
use crate::resolution::{Dimensions, Resolution};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgMap {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dimensions: Option<Vec<String>>,
    pub resolution: Option<(String, String)>,
}

impl ArgMap {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: Some(input.into()),
            ..Self::default()
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_dimensions<S: ToString>(mut self, width: S, height: S) -> Self {
        self.dimensions = Some(vec![width.to_string(), height.to_string()]);
        self
    }

    pub fn with_dimension_tokens(mut self, tokens: Vec<String>) -> Self {
        self.dimensions = Some(tokens);
        self
    }

    pub fn with_resolution(mut self, magnitude: impl Into<String>, unit: impl Into<String>) -> Self {
        self.resolution = Some((magnitude.into(), unit.into()));
        self
    }

    pub fn input(&self) -> Result<&Path, ValidationError> {
        self.input
            .as_deref()
            .ok_or(ValidationError::MissingKey { key: "input" })
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn dimensions(&self) -> Result<Dimensions, ValidationError> {
        let tokens: &[String] = self
            .dimensions
            .as_deref()
            .ok_or(ValidationError::MissingKey { key: "dimensions" })?;

        Dimensions::from_tokens(tokens)
    }

    /// The requested resolution, if one was given.
    pub fn resolution(&self) -> Result<Option<Resolution>, ValidationError> {
        self.resolution
            .as_ref()
            .map(|(magnitude, unit)| Resolution::parse(magnitude, unit))
            .transpose()
    }
}
