//! Container loading optimizer.
//!
//! Evaluates a single box type against a shipping container: every one of
//! the six axis-aligned orientations is packed as a plain grid (whole boxes
//! per axis via floor division) and the results are ranked by box count,
//! then by volumetric efficiency.
//!
//! Invalid input never raises an error here. It yields an empty list, and
//! `diagnose` explains why a list came back empty.

use std::cmp::Ordering;
use std::fmt;

use crate::model::{
    Arrangement, BoxDimensions, ContainerDims, ContainerSelector, Extent, StandardContainer,
};
use crate::types::{Dimensional, Vec3};

/// The six ways to assign box sides (by index) to the container's length,
/// width and height axes.
pub const ORIENTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Why a calculation produced no arrangements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoFitReason {
    InvalidBoxDimensions,
    MissingCustomContainer,
    UnknownContainer,
    InvalidContainerDimensions,
    BoxExceedsContainer,
}

impl NoFitReason {
    pub fn code(&self) -> &'static str {
        match self {
            NoFitReason::InvalidBoxDimensions => "invalid_box_dimensions",
            NoFitReason::MissingCustomContainer => "missing_custom_container",
            NoFitReason::UnknownContainer => "unknown_container",
            NoFitReason::InvalidContainerDimensions => "invalid_container_dimensions",
            NoFitReason::BoxExceedsContainer => "box_exceeds_container",
        }
    }
}

impl fmt::Display for NoFitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoFitReason::InvalidBoxDimensions => {
                write!(f, "Box dimensions must be positive numbers")
            }
            NoFitReason::MissingCustomContainer => {
                write!(f, "Custom container selected but no dimensions supplied")
            }
            NoFitReason::UnknownContainer => write!(f, "Unknown container type"),
            NoFitReason::InvalidContainerDimensions => {
                write!(f, "Container dimensions must be positive numbers")
            }
            NoFitReason::BoxExceedsContainer => {
                write!(f, "Box does not fit the container in any orientation")
            }
        }
    }
}

/// Full outcome of one calculation, including the resolved container.
#[derive(Clone, Debug)]
pub struct LoadPlan {
    pub container: Option<ContainerDims>,
    pub arrangements: Vec<Arrangement>,
    pub no_fit: Option<NoFitReason>,
}

impl LoadPlan {
    /// The arrangement with the most boxes, if any.
    pub fn best(&self) -> Option<&Arrangement> {
        self.arrangements.first()
    }

    pub fn is_empty(&self) -> bool {
        self.arrangements.is_empty()
    }
}

/// Best result of one box against one standard preset.
#[derive(Clone, Debug)]
pub struct ContainerComparison {
    pub container: StandardContainer,
    pub best: Option<Arrangement>,
    pub admissible_orientations: usize,
}

/// Computes all admissible single-orientation arrangements, best first.
///
/// `selector` is a standard preset key (`20ft`, `40ft`, `40ft-hc`, `45ft-hc`)
/// or `custom`, in which case `custom` supplies the container in meters.
///
/// # Examples
/// ```
/// use load_planner::model::BoxDimensions;
/// use load_planner::optimizer::compute_arrangements;
///
/// let carton = BoxDimensions::new(10.0, 10.0, 10.0, "cm");
/// let arrangements = compute_arrangements(&carton, "20ft", None);
/// assert_eq!(arrangements[0].total_boxes, 58 * 23 * 23);
/// ```
pub fn compute_arrangements(
    box_dims: &BoxDimensions,
    selector: &str,
    custom: Option<&ContainerDims>,
) -> Vec<Arrangement> {
    let carton = box_dims.to_meters();
    if !carton.is_valid_dimension() {
        return Vec::new();
    }
    match resolve_container(selector, custom) {
        Ok(container) => arrangements_for(carton, &container),
        Err(_) => Vec::new(),
    }
}

/// Explains why `compute_arrangements` would return an empty list.
///
/// Returns `None` when at least one arrangement exists.
pub fn diagnose(
    box_dims: &BoxDimensions,
    selector: &str,
    custom: Option<&ContainerDims>,
) -> Option<NoFitReason> {
    let carton = box_dims.to_meters();
    if !carton.is_valid_dimension() {
        return Some(NoFitReason::InvalidBoxDimensions);
    }
    let container = match resolve_container(selector, custom) {
        Ok(container) => container,
        Err(reason) => return Some(reason),
    };
    if arrangements_for(carton, &container).is_empty() {
        Some(NoFitReason::BoxExceedsContainer)
    } else {
        None
    }
}

/// Resolves the container, computes the arrangements and diagnoses an empty
/// result in one pass.
pub fn plan_loading(
    box_dims: &BoxDimensions,
    selector: &str,
    custom: Option<&ContainerDims>,
) -> LoadPlan {
    let resolved = resolve_container(selector, custom);
    let container = resolved.ok();
    let carton = box_dims.to_meters();

    if !carton.is_valid_dimension() {
        return LoadPlan {
            container,
            arrangements: Vec::new(),
            no_fit: Some(NoFitReason::InvalidBoxDimensions),
        };
    }

    match resolved {
        Ok(container) => {
            let arrangements = arrangements_for(carton, &container);
            let no_fit = arrangements
                .is_empty()
                .then_some(NoFitReason::BoxExceedsContainer);
            LoadPlan {
                container: Some(container),
                arrangements,
                no_fit,
            }
        }
        Err(reason) => LoadPlan {
            container: None,
            arrangements: Vec::new(),
            no_fit: Some(reason),
        },
    }
}

/// Evaluates one box against every standard preset, in catalog order.
pub fn compare_standard_containers(box_dims: &BoxDimensions) -> Vec<ContainerComparison> {
    let carton = box_dims.to_meters();
    let carton_valid = carton.is_valid_dimension();

    StandardContainer::ALL
        .into_iter()
        .map(|preset| {
            let arrangements = if carton_valid {
                arrangements_for(carton, &preset.dims())
            } else {
                Vec::new()
            };
            ContainerComparison {
                container: preset,
                best: arrangements.first().copied(),
                admissible_orientations: arrangements.len(),
            }
        })
        .collect()
}

/// Looks up the target container and checks its dimensions.
fn resolve_container(
    selector: &str,
    custom: Option<&ContainerDims>,
) -> Result<ContainerDims, NoFitReason> {
    let container = match selector.parse::<ContainerSelector>() {
        Ok(ContainerSelector::Standard(preset)) => preset.dims(),
        Ok(ContainerSelector::Custom) => *custom.ok_or(NoFitReason::MissingCustomContainer)?,
        Err(_) => return Err(NoFitReason::UnknownContainer),
    };
    if container.has_valid_dimensions() {
        Ok(container)
    } else {
        Err(NoFitReason::InvalidContainerDimensions)
    }
}

/// Packs a validated box (in meters) into a validated container.
fn arrangements_for(carton: Vec3, container: &ContainerDims) -> Vec<Arrangement> {
    let space = container.dimensions();

    let mut arrangements: Vec<Arrangement> = ORIENTATIONS
        .iter()
        .filter_map(|order| evaluate_orientation(carton.permuted(*order), space))
        .collect();

    arrangements.sort_by(rank);
    arrangements
}

/// Most boxes first, then the fuller container.
fn rank(a: &Arrangement, b: &Arrangement) -> Ordering {
    b.total_boxes.cmp(&a.total_boxes).then_with(|| {
        b.efficiency
            .partial_cmp(&a.efficiency)
            .unwrap_or(Ordering::Equal)
    })
}

fn evaluate_orientation(oriented: Vec3, space: Vec3) -> Option<Arrangement> {
    let length = AxisFill::new(space.x, oriented.x);
    let width = AxisFill::new(space.y, oriented.y);
    let height = AxisFill::new(space.z, oriented.z);

    if length.count == 0 || width.count == 0 || height.count == 0 {
        return None;
    }

    let total_boxes = length
        .count
        .saturating_mul(width.count)
        .saturating_mul(height.count);
    // Per-axis ratios stay in [0, 1], so extreme sides cannot overflow the product.
    let efficiency =
        (length.ratio() * width.ratio() * height.ratio() * 100.0).clamp(0.0, 100.0);

    Some(Arrangement {
        orientation: Extent::from(oriented),
        length_count: length.count,
        width_count: width.count,
        height_count: height.count,
        total_boxes,
        efficiency,
        remaining_space: Extent::from(Vec3::new(
            length.leftover(),
            width.leftover(),
            height.leftover(),
        )),
    })
}

/// Whole boxes placed along one container axis.
struct AxisFill {
    container_len: f64,
    /// Computed from the float quotient, so it never saturates.
    filled_len: f64,
    count: u64,
}

impl AxisFill {
    fn new(container_len: f64, box_len: f64) -> Self {
        let fits = (container_len / box_len).floor();
        Self {
            container_len,
            filled_len: fits * box_len,
            // `as` saturates for out-of-range floats
            count: fits as u64,
        }
    }

    fn ratio(&self) -> f64 {
        (self.filled_len / self.container_len).min(1.0)
    }

    fn leftover(&self) -> f64 {
        (self.container_len - self.filled_len).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(length: f64, width: f64, height: f64) -> ContainerDims {
        ContainerDims::new(length, width, height)
    }

    #[test]
    fn cube_fills_twenty_foot_container() {
        let carton = BoxDimensions::new(10.0, 10.0, 10.0, "cm");
        let arrangements = compute_arrangements(&carton, "20ft", None);

        // All six orientations of a cube coincide but are still reported.
        assert_eq!(arrangements.len(), 6);
        for arrangement in &arrangements {
            assert_eq!(arrangement.length_count, 58);
            assert_eq!(arrangement.width_count, 23);
            assert_eq!(arrangement.height_count, 23);
            assert_eq!(arrangement.total_boxes, 30682);
        }

        let rest = arrangements[0].remaining_space;
        assert!((rest.length - (5.898 - 5.8)).abs() < 1e-9);
        assert!((rest.width - (2.352 - 2.3)).abs() < 1e-9);
        assert!((rest.height - (2.393 - 2.3)).abs() < 1e-9);
    }

    #[test]
    fn zero_dimension_yields_nothing() {
        let carton = BoxDimensions::new(0.0, 10.0, 10.0, "cm");
        assert!(compute_arrangements(&carton, "20ft", None).is_empty());
        assert_eq!(
            diagnose(&carton, "20ft", None),
            Some(NoFitReason::InvalidBoxDimensions)
        );
    }

    #[test]
    fn orientation_search_beats_single_orientation() {
        let carton = BoxDimensions::new(40.0, 30.0, 25.0, "cm");
        let container = custom(8.5, 2.8, 3.2);
        let arrangements = compute_arrangements(&carton, "custom", Some(&container));

        assert_eq!(arrangements.len(), 6);

        let best = &arrangements[0];
        assert_eq!(best.total_boxes, 2464);
        assert_eq!(
            (best.length_count, best.width_count, best.height_count),
            (28, 11, 8)
        );
        assert_eq!(best.orientation.length, 0.3);
        assert_eq!(best.orientation.width, 0.25);
        assert_eq!(best.orientation.height, 0.4);
        assert!((best.remaining_space.length - (8.5 - 8.4)).abs() < 1e-9);
        assert!((best.remaining_space.width - (2.8 - 2.75)).abs() < 1e-9);
        assert!(best.remaining_space.height.abs() < 1e-9);

        let runner_up = &arrangements[1];
        assert_eq!(runner_up.total_boxes, 2448);
        assert_eq!(
            (runner_up.length_count, runner_up.width_count, runner_up.height_count),
            (34, 9, 8)
        );

        // 25cm along the length with 40cm across only yields 2040.
        assert!(arrangements.iter().any(|a| a.total_boxes == 2040));
        assert!(best.total_boxes > 2040);
    }

    #[test]
    fn custom_without_dimensions_yields_nothing() {
        let carton = BoxDimensions::new(10.0, 10.0, 10.0, "cm");
        assert!(compute_arrangements(&carton, "custom", None).is_empty());
        assert_eq!(
            diagnose(&carton, "custom", None),
            Some(NoFitReason::MissingCustomContainer)
        );
    }

    #[test]
    fn oversized_box_yields_nothing() {
        let carton = BoxDimensions::new(1000.0, 1000.0, 1000.0, "cm");
        assert!(compute_arrangements(&carton, "20ft", None).is_empty());
        assert_eq!(
            diagnose(&carton, "20ft", None),
            Some(NoFitReason::BoxExceedsContainer)
        );
    }

    #[test]
    fn unknown_container_key_yields_nothing() {
        let carton = BoxDimensions::new(10.0, 10.0, 10.0, "cm");
        assert!(compute_arrangements(&carton, "53ft", None).is_empty());
        assert_eq!(
            diagnose(&carton, "53ft", None),
            Some(NoFitReason::UnknownContainer)
        );
    }

    #[test]
    fn custom_dimensions_are_ignored_for_presets() {
        let carton = BoxDimensions::new(10.0, 10.0, 10.0, "cm");
        let tiny = custom(0.01, 0.01, 0.01);
        let arrangements = compute_arrangements(&carton, "20ft", Some(&tiny));
        assert_eq!(arrangements[0].total_boxes, 30682);
    }

    #[test]
    fn non_positive_container_yields_nothing() {
        let carton = BoxDimensions::new(10.0, 10.0, 10.0, "cm");
        let containers = [
            custom(0.0, 2.0, 2.0),
            custom(5.0, -1.0, 2.0),
            custom(5.0, 2.0, f64::NAN),
        ];
        for container in containers {
            assert!(compute_arrangements(&carton, "custom", Some(&container)).is_empty());
            assert_eq!(
                diagnose(&carton, "custom", Some(&container)),
                Some(NoFitReason::InvalidContainerDimensions)
            );
        }
    }

    #[test]
    fn orientations_that_do_not_fit_are_skipped() {
        // 3m long box only fits lying along the container length.
        let carton = BoxDimensions::in_meters(3.0, 1.0, 1.0);
        let arrangements = compute_arrangements(&carton, "20ft", None);
        assert_eq!(arrangements.len(), 2);
        for arrangement in &arrangements {
            assert_eq!(arrangement.orientation.length, 3.0);
            assert_eq!(arrangement.total_boxes, 4);
        }
    }

    #[test]
    fn arrangements_are_ordered_by_total_boxes() {
        let carton = BoxDimensions::new(60.0, 40.0, 40.0, "cm");
        let arrangements = compute_arrangements(&carton, "20ft", None);
        for pair in arrangements.windows(2) {
            assert!(pair[0].total_boxes >= pair[1].total_boxes);
        }
        assert_eq!(arrangements[0].total_boxes, 225);
    }

    fn arrangement(total_boxes: u64, efficiency: f64) -> Arrangement {
        let extent = Extent::from(Vec3::new(1.0, 1.0, 1.0));
        Arrangement {
            orientation: extent,
            length_count: total_boxes,
            width_count: 1,
            height_count: 1,
            total_boxes,
            efficiency,
            remaining_space: extent,
        }
    }

    #[test]
    fn equal_totals_rank_by_efficiency() {
        let mut ranked = vec![
            arrangement(10, 40.0),
            arrangement(12, 10.0),
            arrangement(10, 80.0),
        ];
        ranked.sort_by(rank);

        let order: Vec<_> = ranked
            .iter()
            .map(|a| (a.total_boxes, a.efficiency))
            .collect();
        assert_eq!(order, [(12, 10.0), (10, 80.0), (10, 40.0)]);
    }

    #[test]
    fn exact_fit_has_full_efficiency_and_no_leftover() {
        let carton = BoxDimensions::in_meters(0.5, 0.5, 0.5);
        let container = custom(2.0, 1.0, 1.0);
        let arrangements = compute_arrangements(&carton, "custom", Some(&container));
        let best = &arrangements[0];
        assert_eq!(best.total_boxes, 16);
        assert!((best.efficiency - 100.0).abs() < 1e-9);
        assert!(best.efficiency <= 100.0);
        assert_eq!(best.remaining_space.length, 0.0);
        assert_eq!(best.remaining_space.width, 0.0);
        assert_eq!(best.remaining_space.height, 0.0);
    }

    #[test]
    fn huge_sides_keep_efficiency_in_range() {
        let carton = BoxDimensions::in_meters(1e120, 1e120, 1e120);
        let container = custom(1e120, 1e120, 1e120);
        let arrangements = compute_arrangements(&carton, "custom", Some(&container));

        assert_eq!(arrangements.len(), 6);
        for arrangement in &arrangements {
            assert_eq!(arrangement.total_boxes, 1);
            assert!((arrangement.efficiency - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn tiny_box_saturates_count_but_fills_container() {
        let carton = BoxDimensions::in_meters(1e-110, 1e-110, 1e-110);
        let arrangements = compute_arrangements(&carton, "20ft", None);
        let best = &arrangements[0];

        assert_eq!(best.total_boxes, u64::MAX);
        assert!(best.efficiency > 99.9 && best.efficiency <= 100.0);
        assert!(best.remaining_space.length < 1e-9);
        assert!(best.remaining_space.width < 1e-9);
        assert!(best.remaining_space.height < 1e-9);
    }

    #[test]
    fn efficiency_matches_used_volume() {
        let carton = BoxDimensions::new(40.0, 30.0, 25.0, "cm");
        let container = custom(8.5, 2.8, 3.2);
        for arrangement in compute_arrangements(&carton, "custom", Some(&container)) {
            let expected = arrangement.used_volume() / container.volume() * 100.0;
            assert!((arrangement.efficiency - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn remaining_space_is_never_negative() {
        let carton = BoxDimensions::new(30.0, 30.0, 30.0, "cm");
        let container = custom(0.9, 0.9, 0.9);
        let arrangements = compute_arrangements(&carton, "custom", Some(&container));
        assert!(!arrangements.is_empty());
        for arrangement in &arrangements {
            assert!(arrangement.remaining_space.length >= 0.0);
            assert!(arrangement.remaining_space.width >= 0.0);
            assert!(arrangement.remaining_space.height >= 0.0);
        }
    }

    #[test]
    fn plan_reports_container_and_reason() {
        let carton = BoxDimensions::new(1000.0, 1000.0, 1000.0, "cm");
        let plan = plan_loading(&carton, "40ft", None);
        assert!(plan.is_empty());
        assert_eq!(plan.container, Some(StandardContainer::FortyFoot.dims()));
        assert_eq!(plan.no_fit, Some(NoFitReason::BoxExceedsContainer));

        let carton = BoxDimensions::new(-1.0, 10.0, 10.0, "cm");
        let plan = plan_loading(&carton, "40ft", None);
        assert_eq!(plan.container, Some(StandardContainer::FortyFoot.dims()));
        assert_eq!(plan.no_fit, Some(NoFitReason::InvalidBoxDimensions));

        let carton = BoxDimensions::new(10.0, 10.0, 10.0, "cm");
        let plan = plan_loading(&carton, "40ft", None);
        assert_eq!(plan.no_fit, None);
        assert_eq!(plan.best().map(|a| a.total_boxes), Some(120 * 23 * 23));
    }

    #[test]
    fn comparison_covers_every_preset() {
        let carton = BoxDimensions::new(60.0, 40.0, 40.0, "cm");
        let comparisons = compare_standard_containers(&carton);
        assert_eq!(comparisons.len(), StandardContainer::ALL.len());
        assert_eq!(comparisons[0].container, StandardContainer::TwentyFoot);
        assert_eq!(comparisons[0].best.map(|a| a.total_boxes), Some(225));

        let bigger = comparisons
            .iter()
            .find(|c| c.container == StandardContainer::FortyFiveFootHighCube)
            .and_then(|c| c.best)
            .expect("45ft-hc should fit the carton");
        assert!(bigger.total_boxes > 225);
    }

    #[test]
    fn comparison_with_invalid_box_is_empty_everywhere() {
        let carton = BoxDimensions::new(0.0, 40.0, 40.0, "cm");
        for comparison in compare_standard_containers(&carton) {
            assert!(comparison.best.is_none());
            assert_eq!(comparison.admissible_orientations, 0);
        }
    }
}
