//! Common types and traits for 3D geometry.
//!
//! Axis convention throughout the crate: `x` runs along the container length,
//! `y` along its width and `z` along its height. All values are meters.

/// Represents a 3D extent or point in meters.
///
/// # Examples
/// ```
/// use load_planner::types::Vec3;
///
/// let carton = Vec3::new(0.4, 0.3, 0.25);
/// assert!((carton.volume() - 0.03).abs() < 1e-12);
/// assert_eq!(carton.permuted([2, 0, 1]), Vec3::new(0.25, 0.4, 0.3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new 3D vector.
    ///
    /// # Parameters
    /// * `x` - length component
    /// * `y` - width component
    /// * `z` - height component
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the components as an array, indexed by axis.
    #[inline]
    pub const fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Reassigns components to axes: component `order[i]` ends up on axis `i`.
    #[inline]
    pub fn permuted(&self, order: [usize; 3]) -> Self {
        let axes = self.as_array();
        Self::new(axes[order[0]], axes[order[1]], axes[order[2]])
    }

    /// Calculates the volume (product of all components).
    #[inline]
    pub fn volume(&self) -> f64 {
        self.x * self.y * self.z
    }

    /// Checks if all components are positive and finite.
    #[inline]
    pub fn is_valid_dimension(&self) -> bool {
        self.as_array()
            .iter()
            .all(|value| *value > 0.0 && value.is_finite())
    }
}

/// Trait for anything with a length/width/height extent.
pub trait Dimensional {
    /// Returns the extent in meters.
    fn dimensions(&self) -> Vec3;

    /// Calculates the volume in cubic meters.
    fn volume(&self) -> f64 {
        self.dimensions().volume()
    }

    /// Checks that every side is strictly positive and finite.
    fn has_valid_dimensions(&self) -> bool {
        self.dimensions().is_valid_dimension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_volume() {
        let dims = Vec3::new(2.0, 3.0, 4.0);
        assert!((dims.volume() - 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec3_permutation_moves_components() {
        let dims = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(dims.permuted([0, 1, 2]), dims);
        assert_eq!(dims.permuted([1, 2, 0]), Vec3::new(2.0, 3.0, 1.0));
        assert_eq!(dims.permuted([2, 1, 0]), Vec3::new(3.0, 2.0, 1.0));
    }

    #[test]
    fn test_vec3_validity() {
        assert!(Vec3::new(0.1, 0.2, 0.3).is_valid_dimension());
        assert!(!Vec3::new(0.0, 0.2, 0.3).is_valid_dimension());
        assert!(!Vec3::new(0.1, -0.2, 0.3).is_valid_dimension());
        assert!(!Vec3::new(0.1, 0.2, f64::NAN).is_valid_dimension());
        assert!(!Vec3::new(f64::INFINITY, 0.2, 0.3).is_valid_dimension());
    }
}
