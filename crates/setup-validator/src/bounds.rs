//! Reference Bounds Derived per Call

use crate::limits::CvLimits;
use crate::parameter::{names, CV_NUM_PARAMETER};
use serde::Serialize;

/// Inclusive bound for one position of the parameter list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceBound {
    pub name: &'static str,
    pub lower: f64,
    pub upper: f64,
}

impl ReferenceBound {
    fn new(name: &'static str, (lower, upper): (f64, f64)) -> Self {
        Self { name, lower, upper }
    }

    /// Whether `value` lies within `[lower, upper]`. NaN never does.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Bounds for every position, index-aligned with the parameter list
pub type ReferenceTable = [ReferenceBound; CV_NUM_PARAMETER];

/// Absolute distance between the two vertices
pub fn scan_span(first_vertex: f64, second_vertex: f64) -> f64 {
    (second_vertex - first_vertex).abs()
}

/// Build the reference table for the given vertices and WE mode.
///
/// The start potential must sit between the vertices, and each vertex may
/// move at most one envelope away from the opposite one.
pub fn compute_bounds(
    first_vertex: f64,
    second_vertex: f64,
    fixed_we: bool,
    limits: &CvLimits,
) -> ReferenceTable {
    let (lower_vertex, upper_vertex) = if first_vertex > second_vertex {
        (second_vertex, first_vertex)
    } else {
        (first_vertex, second_vertex)
    };
    let envelope = limits.envelope(fixed_we);
    let vertex_bound = (upper_vertex - envelope, lower_vertex + envelope);

    [
        ReferenceBound::new(names::START_POTENTIAL, (lower_vertex, upper_vertex)),
        ReferenceBound::new(names::LOWER_POTENTIAL, vertex_bound),
        ReferenceBound::new(names::UPPER_POTENTIAL, vertex_bound),
        ReferenceBound::new(names::STEP_SIZE, limits.step_size),
        ReferenceBound::new(names::SCAN_RATE, limits.scan_rate),
        ReferenceBound::new(names::CYCLE, limits.cycle),
        ReferenceBound::new(names::FIXED_WE_POTENTIAL, limits.fixed_we_potential),
        ReferenceBound::new(names::LPTIA_RTIA_SIZE, limits.lptia_resistor),
        ReferenceBound::new(names::MAINS_FILTER, limits.mains_filter),
        ReferenceBound::new(names::SINC2_OVERSAMPLING, limits.sinc2_oversampling),
        ReferenceBound::new(names::SINC3_OVERSAMPLING, limits.sinc3_oversampling),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::CV_PARAMETER_NAMES;

    #[test]
    fn test_table_names_follow_list_order() {
        let table = compute_bounds(500.0, -500.0, false, &CvLimits::default());
        for (bound, name) in table.iter().zip(CV_PARAMETER_NAMES) {
            assert_eq!(bound.name, name);
        }
    }

    #[test]
    fn test_vertex_derived_bounds() {
        let table = compute_bounds(500.0, -500.0, false, &CvLimits::default());
        assert_eq!((table[0].lower, table[0].upper), (-500.0, 500.0));
        assert_eq!((table[1].lower, table[1].upper), (-3500.0, 3500.0));
        assert_eq!(table[1], ReferenceBound { name: "FirstVertex", ..table[2] });

        let fixed = compute_bounds(500.0, -500.0, true, &CvLimits::default());
        assert_eq!((fixed[2].lower, fixed[2].upper), (-1600.0, 1600.0));
    }

    #[test]
    fn test_vertex_order_does_not_matter() {
        let limits = CvLimits::default();
        assert_eq!(
            compute_bounds(-200.0, 800.0, false, &limits),
            compute_bounds(800.0, -200.0, false, &limits)
        );
        assert_eq!(scan_span(-200.0, 800.0), scan_span(800.0, -200.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bound = ReferenceBound::new("Cycle", (1.0, 255.0));
        assert!(bound.contains(1.0));
        assert!(bound.contains(255.0));
        assert!(!bound.contains(0.999));
        assert!(!bound.contains(255.001));
        assert!(!bound.contains(f64::NAN));
    }
}
