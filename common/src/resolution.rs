//! # Page Geometry Values
//!
//! Validated value objects describing page geometry:
//! * [`Resolution`]: pixel density, a positive magnitude paired with a [`ResolutionUnit`].
//! * [`Dimensions`]: a canvas size in pixels.
//!
//! Both are only obtainable through validating factories, so a constructed
//! value always satisfies its invariants.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const CM_PER_INCH: f64 = 2.54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionUnit {
    PixelsPerInch,
    PixelsPerCentimeter,
}

impl ResolutionUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionUnit::PixelsPerInch => "PixelsPerInch",
            ResolutionUnit::PixelsPerCentimeter => "PixelsPerCentimeter",
        }
    }
}

impl FromStr for ResolutionUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PixelsPerInch" => Ok(ResolutionUnit::PixelsPerInch),
            "PixelsPerCentimeter" => Ok(ResolutionUnit::PixelsPerCentimeter),
            _ => Err(ValidationError::InvalidUnit {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ResolutionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel density of a rasterized page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    magnitude: u32,
    unit: ResolutionUnit,
}

impl Resolution {
    /// Builds a resolution from an integer magnitude and a unit name.
    ///
    /// The unit is checked first, then the magnitude must be strictly positive.
    pub fn new(magnitude: i64, unit: &str) -> Result<Self, ValidationError> {
        let unit: ResolutionUnit = unit.parse()?;
        let magnitude: u32 = u32::try_from(magnitude)
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| ValidationError::InvalidResolution {
                value: magnitude.to_string(),
            })?;

        Ok(Self { magnitude, unit })
    }

    /// Same as [`Resolution::new`], but the magnitude comes in as raw text and
    /// anything that is not an integer is rejected.
    pub fn parse(magnitude: &str, unit: &str) -> Result<Self, ValidationError> {
        let unit: ResolutionUnit = unit.parse()?;
        let value: i64 =
            magnitude
                .trim()
                .parse()
                .map_err(|_| ValidationError::InvalidResolution {
                    value: magnitude.to_string(),
                })?;

        Self::new(value, unit.as_str())
    }

    pub fn pixels_per_inch(magnitude: u32) -> Result<Self, ValidationError> {
        Self::new(i64::from(magnitude), ResolutionUnit::PixelsPerInch.as_str())
    }

    pub fn magnitude(&self) -> u32 {
        self.magnitude
    }

    pub fn unit(&self) -> ResolutionUnit {
        self.unit
    }

    pub fn unit_str(&self) -> &'static str {
        self.unit.as_str()
    }

    /// Density expressed in dots per inch, the unit rasterizers expect.
    pub fn dots_per_inch(&self) -> u32 {
        match self.unit {
            ResolutionUnit::PixelsPerInch => self.magnitude,
            ResolutionUnit::PixelsPerCentimeter => {
                (f64::from(self.magnitude) * CM_PER_INCH).round() as u32
            }
        }
    }
}

impl Default for Resolution {
    /// 600 pixels per inch, the archival scanning density.
    fn default() -> Self {
        Self {
            magnitude: 600,
            unit: ResolutionUnit::PixelsPerInch,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

/// Canvas size in pixels. Both sides are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    pub fn new(width: i64, height: i64) -> Result<Self, ValidationError> {
        if width <= 0 || height <= 0 {
            return Err(ValidationError::NonPositiveDimensions { width, height });
        }

        Ok(Self {
            width: side("width", width)?,
            height: side("height", height)?,
        })
    }

    /// Parses `[width, height]` from raw tokens.
    ///
    /// Every token must be an integer before positivity is considered, so
    /// `["2160", "Potato"]` is reported as a type problem rather than a range one.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ValidationError> {
        let [width, height] = tokens else {
            return Err(ValidationError::DimensionCount {
                count: tokens.len(),
            });
        };

        let width: i64 = parse_integer("width", width.as_ref())?;
        let height: i64 = parse_integer("height", height.as_ref())?;

        Self::new(width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `WxH`, the geometry notation image tools expect.
    pub fn geometry(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = ValidationError;

    /// Parses `"2160x3060"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split(['x', 'X']).collect();
        Self::from_tokens(&tokens)
    }
}

fn side(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::DimensionOutOfRange { field, value })
}

fn parse_integer(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            value: value.to_string(),
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_factory() {
        let res = Resolution::new(600, "PixelsPerInch").unwrap();
        assert_eq!(res.magnitude(), 600);
        assert_eq!(res.unit(), ResolutionUnit::PixelsPerInch);
        assert_eq!(res.unit_str(), "PixelsPerInch");
        assert_eq!(res.to_string(), "600 PixelsPerInch");

        // --- Error Cases ---

        assert_eq!(
            Resolution::new(600, "DotsPerFurlong"),
            Err(ValidationError::InvalidUnit {
                value: "DotsPerFurlong".into()
            })
        );
        assert!(matches!(
            Resolution::new(0, "PixelsPerInch"),
            Err(ValidationError::InvalidResolution { .. })
        ));
        assert!(matches!(
            Resolution::new(-300, "PixelsPerCentimeter"),
            Err(ValidationError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn test_resolution_parse_rejects_non_integers() {
        assert!(Resolution::parse("300", "PixelsPerCentimeter").is_ok());
        assert!(matches!(
            Resolution::parse("300.5", "PixelsPerInch"),
            Err(ValidationError::InvalidResolution { .. })
        ));
        assert!(matches!(
            Resolution::parse("high", "PixelsPerInch"),
            Err(ValidationError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn test_dots_per_inch_conversion() {
        assert_eq!(Resolution::pixels_per_inch(600).unwrap().dots_per_inch(), 600);
        let metric = Resolution::new(118, "PixelsPerCentimeter").unwrap();
        // 118 * 2.54 = 299.72
        assert_eq!(metric.dots_per_inch(), 300);
    }

    #[test]
    fn test_dimensions_from_tokens() {
        let dims = Dimensions::from_tokens(&["2160", "3060"]).unwrap();
        assert_eq!((dims.width(), dims.height()), (2160, 3060));
        assert_eq!(dims.geometry(), "2160x3060");

        assert_eq!(
            Dimensions::from_tokens(&["2160", "Potato"]),
            Err(ValidationError::NotAnInteger {
                field: "height",
                value: "Potato".into()
            })
        );
        assert!(matches!(
            Dimensions::from_tokens(&["21.5", "3060"]),
            Err(ValidationError::NotAnInteger { field: "width", .. })
        ));
        assert!(matches!(
            Dimensions::from_tokens(&["0", "3060"]),
            Err(ValidationError::NonPositiveDimensions { .. })
        ));
        assert!(matches!(
            Dimensions::from_tokens(&["2160", "-1"]),
            Err(ValidationError::NonPositiveDimensions { .. })
        ));
        assert_eq!(
            Dimensions::from_tokens(&["2160", "4294967296"]),
            Err(ValidationError::DimensionOutOfRange {
                field: "height",
                value: 4_294_967_296
            })
        );
        assert!(Dimensions::new(i64::from(u32::MAX), 1).is_ok());
        assert_eq!(
            Dimensions::from_tokens(&["2160"]),
            Err(ValidationError::DimensionCount { count: 1 })
        );
    }

    #[test]
    fn test_dimensions_from_str() {
        assert_eq!(
            "2160x3060".parse::<Dimensions>(),
            Dimensions::new(2160, 3060)
        );
        assert!("2160by3060".parse::<Dimensions>().is_err());
    }
}
