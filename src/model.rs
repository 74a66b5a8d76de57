//! Data models for the container loading calculator.
//!
//! This module defines the inputs and outputs of the optimizer:
//! - `LengthUnit`: unit tags accepted on box dimensions
//! - `BoxDimensions`: a carton as entered by the user
//! - `ContainerDims`: internal container dimensions in meters
//! - `StandardContainer`: the fixed catalog of shipping container presets
//! - `Arrangement`: the loading outcome for one box orientation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::types::{Dimensional, Vec3};

/// Selector value that routes a request to the caller-supplied container.
pub const CUSTOM_SELECTOR: &str = "custom";

/// Validation error for request data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unknown unit '{0}': expected one of cm, mm, inches, m")]
    UnknownUnit(String),
    #[error("Unknown container type '{0}'")]
    UnknownContainer(String),
}

/// Length units accepted on box dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Meters,
    Centimeters,
    Millimeters,
    Inches,
}

impl LengthUnit {
    pub const METERS_PER_INCH: f64 = 0.0254;

    /// Lenient lookup: anything other than `cm`, `mm` or `inches` is meters.
    ///
    /// # Examples
    /// ```
    /// use load_planner::model::LengthUnit;
    ///
    /// assert_eq!(LengthUnit::from_tag(Some("cm")), LengthUnit::Centimeters);
    /// assert_eq!(LengthUnit::from_tag(Some("feet")), LengthUnit::Meters);
    /// assert_eq!(LengthUnit::from_tag(None), LengthUnit::Meters);
    /// ```
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("cm") => LengthUnit::Centimeters,
            Some("mm") => LengthUnit::Millimeters,
            Some("inches") => LengthUnit::Inches,
            _ => LengthUnit::Meters,
        }
    }

    /// Strict lookup: only the known tags (or no tag at all) are accepted.
    pub fn parse_strict(tag: Option<&str>) -> Result<Self, ValidationError> {
        match tag {
            None | Some("m") => Ok(LengthUnit::Meters),
            Some("cm") => Ok(LengthUnit::Centimeters),
            Some("mm") => Ok(LengthUnit::Millimeters),
            Some("inches") => Ok(LengthUnit::Inches),
            Some(other) => Err(ValidationError::UnknownUnit(other.to_string())),
        }
    }

    /// Converts a value in this unit to meters.
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            LengthUnit::Meters => value,
            LengthUnit::Centimeters => value / 100.0,
            LengthUnit::Millimeters => value / 1000.0,
            LengthUnit::Inches => value * Self::METERS_PER_INCH,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            LengthUnit::Meters => "m",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Millimeters => "mm",
            LengthUnit::Inches => "inches",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A carton to be loaded, in the unit the user entered.
///
/// # Fields
/// * `length`, `width`, `height` - raw measurements
/// * `unit` - `cm`, `mm`, `inches`; anything else (or nothing) means meters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "length": 40.0, "width": 30.0, "height": 25.0, "unit": "cm" }))]
pub struct BoxDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    #[schema(nullable = true)]
    pub unit: Option<String>,
}

impl BoxDimensions {
    pub fn new(length: f64, width: f64, height: f64, unit: impl Into<String>) -> Self {
        Self {
            length,
            width,
            height,
            unit: Some(unit.into()),
        }
    }

    /// Creates a box whose measurements are already in meters.
    pub fn in_meters(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
            unit: None,
        }
    }

    /// Resolved unit, using the lenient fallback.
    pub fn length_unit(&self) -> LengthUnit {
        LengthUnit::from_tag(self.unit.as_deref())
    }

    /// Converts all three measurements to meters.
    pub fn to_meters(&self) -> Vec3 {
        self.convert(self.length_unit())
    }

    /// Like `to_meters`, but rejects unknown unit tags.
    pub fn to_meters_strict(&self) -> Result<Vec3, ValidationError> {
        let unit = LengthUnit::parse_strict(self.unit.as_deref())?;
        Ok(self.convert(unit))
    }

    fn convert(&self, unit: LengthUnit) -> Vec3 {
        Vec3::new(
            unit.to_meters(self.length),
            unit.to_meters(self.width),
            unit.to_meters(self.height),
        )
    }
}

/// Internal dimensions of a shipping container in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "length": 8.5, "width": 2.8, "height": 3.2 }))]
pub struct ContainerDims {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerDims {
    pub const fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }
}

impl Dimensional for ContainerDims {
    fn dimensions(&self) -> Vec3 {
        Vec3::new(self.length, self.width, self.height)
    }
}

/// The fixed catalog of standard shipping containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StandardContainer {
    TwentyFoot,
    FortyFoot,
    FortyFootHighCube,
    FortyFiveFootHighCube,
}

impl StandardContainer {
    /// Every preset, in catalog order.
    pub const ALL: [StandardContainer; 4] = [
        StandardContainer::TwentyFoot,
        StandardContainer::FortyFoot,
        StandardContainer::FortyFootHighCube,
        StandardContainer::FortyFiveFootHighCube,
    ];

    /// Selector key as used in requests.
    pub fn key(self) -> &'static str {
        match self {
            StandardContainer::TwentyFoot => "20ft",
            StandardContainer::FortyFoot => "40ft",
            StandardContainer::FortyFootHighCube => "40ft-hc",
            StandardContainer::FortyFiveFootHighCube => "45ft-hc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StandardContainer::TwentyFoot => "20ft Standard",
            StandardContainer::FortyFoot => "40ft Standard",
            StandardContainer::FortyFootHighCube => "40ft High Cube",
            StandardContainer::FortyFiveFootHighCube => "45ft High Cube",
        }
    }

    /// Internal dimensions in meters.
    pub const fn dims(self) -> ContainerDims {
        match self {
            StandardContainer::TwentyFoot => ContainerDims::new(5.898, 2.352, 2.393),
            StandardContainer::FortyFoot => ContainerDims::new(12.032, 2.352, 2.393),
            StandardContainer::FortyFootHighCube => ContainerDims::new(12.032, 2.352, 2.698),
            StandardContainer::FortyFiveFootHighCube => ContainerDims::new(13.556, 2.352, 2.698),
        }
    }
}

impl FromStr for StandardContainer {
    type Err = ValidationError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        StandardContainer::ALL
            .into_iter()
            .find(|preset| preset.key() == key)
            .ok_or_else(|| ValidationError::UnknownContainer(key.to_string()))
    }
}

/// Which container a request targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerSelector {
    Standard(StandardContainer),
    Custom,
}

impl FromStr for ContainerSelector {
    type Err = ValidationError;

    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        if selector == CUSTOM_SELECTOR {
            Ok(ContainerSelector::Custom)
        } else {
            selector.parse().map(ContainerSelector::Standard)
        }
    }
}

/// A length/width/height triple in meters used in results.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct Extent {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Vec3> for Extent {
    fn from(v: Vec3) -> Self {
        Self {
            length: v.x,
            width: v.y,
            height: v.z,
        }
    }
}

impl Dimensional for Extent {
    fn dimensions(&self) -> Vec3 {
        Vec3::new(self.length, self.width, self.height)
    }
}

/// Loading outcome for one orientation of the box.
///
/// # Fields
/// * `orientation` - box dimensions as laid along the container axes
/// * `length_count`, `width_count`, `height_count` - whole boxes per axis
/// * `total_boxes` - product of the three counts
/// * `efficiency` - used volume as a percentage of the container volume
/// * `remaining_space` - leftover gap along each axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct Arrangement {
    pub orientation: Extent,
    pub length_count: u64,
    pub width_count: u64,
    pub height_count: u64,
    pub total_boxes: u64,
    pub efficiency: f64,
    pub remaining_space: Extent,
}

impl Arrangement {
    /// Volume occupied by all boxes of this arrangement.
    pub fn used_volume(&self) -> f64 {
        self.total_boxes as f64 * self.orientation.volume()
    }
}
