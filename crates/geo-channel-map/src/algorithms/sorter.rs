//! Object Sorter
//!
//! Defines the canonical order of siblings. Every comparison is a strict
//! total order: float keys use `total_cmp`, equal keys fall back to the node
//! name, then to the position in the description.

use crate::config::{AxisOrder, SortingParameters};
use crate::domain::errors::SortError;
use crate::domain::value_objects::SortCandidate;
use geo_types::{DriftDirection, TpcId};
use std::cmp::Ordering;

/// Canonical ordering of geometry elements of one kind among siblings.
pub trait ObjectSorter: Send + Sync {
    fn compare_cryostats(&self, a: &SortCandidate<'_>, b: &SortCandidate<'_>) -> Ordering;

    fn compare_tpcs(&self, a: &SortCandidate<'_>, b: &SortCandidate<'_>) -> Ordering;

    /// Planes of `tpc` are ordered along its drift direction.
    fn compare_planes(
        &self,
        a: &SortCandidate<'_>,
        b: &SortCandidate<'_>,
        tpc: TpcId,
        drift: DriftDirection,
    ) -> Result<Ordering, SortError>;

    fn compare_wires(&self, a: &SortCandidate<'_>, b: &SortCandidate<'_>) -> Ordering;

    fn compare_op_dets(&self, a: &SortCandidate<'_>, b: &SortCandidate<'_>) -> Ordering;
}

/// Deterministic fallback for candidates whose sort keys are equal.
pub fn tie_break(a: &SortCandidate<'_>, b: &SortCandidate<'_>) -> Ordering {
    a.name
        .cmp(b.name)
        .then_with(|| a.position.cmp(&b.position))
}

/// Sort `items` with a comparison that may fail. The first error aborts the
/// sort and is returned.
pub fn try_sort_by<T, E>(
    items: &mut [T],
    mut compare: impl FnMut(&T, &T) -> Result<Ordering, E>,
) -> Result<(), E> {
    let mut failure = None;
    items.sort_by(|a, b| {
        if failure.is_some() {
            return Ordering::Equal;
        }
        compare(a, b).unwrap_or_else(|e| {
            failure = Some(e);
            Ordering::Equal
        })
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Sorter ordering elements by one world-axis coordinate of their center.
///
/// Defaults: cryostats and TPCs by increasing x, wires by increasing z,
/// optical detectors by increasing z. Planes by decreasing x when electrons
/// drift toward −x and increasing x when they drift toward +x, so plane
/// numbers grow in the drift direction.
#[derive(Debug, Clone, Default)]
pub struct StandardSorter {
    params: SortingParameters,
}

impl StandardSorter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: SortingParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SortingParameters {
        &self.params
    }

    fn by_axis(order: AxisOrder, a: &SortCandidate<'_>, b: &SortCandidate<'_>) -> Ordering {
        let i = order.axis.index();
        let primary = a.center[i].total_cmp(&b.center[i]);
        let primary = if order.descending {
            primary.reverse()
        } else {
            primary
        };
        primary.then_with(|| tie_break(a, b))
    }
}

impl ObjectSorter for StandardSorter {
    fn compare_cryostats(&self, a: &SortCandidate<'_>, b: &SortCandidate<'_>) -> Ordering {
        Self::by_axis(self.params.cryostats, a, b)
    }

    fn compare_tpcs(&self, a: &SortCandidate<'_>, b: &SortCandidate<'_>) -> Ordering {
        Self::by_axis(self.params.tpcs, a, b)
    }

    fn compare_planes(
        &self,
        a: &SortCandidate<'_>,
        b: &SortCandidate<'_>,
        tpc: TpcId,
        drift: DriftDirection,
    ) -> Result<Ordering, SortError> {
        let primary = match drift {
            DriftDirection::PosX => a.center.x.total_cmp(&b.center.x),
            DriftDirection::NegX => b.center.x.total_cmp(&a.center.x),
            DriftDirection::Unknown => return Err(SortError::UnknownDrift { tpc }),
        };
        Ok(primary.then_with(|| tie_break(a, b)))
    }

    fn compare_wires(&self, a: &SortCandidate<'_>, b: &SortCandidate<'_>) -> Ordering {
        Self::by_axis(self.params.wires, a, b)
    }

    fn compare_op_dets(&self, a: &SortCandidate<'_>, b: &SortCandidate<'_>) -> Ordering {
        Self::by_axis(self.params.op_dets, a, b)
    }
}
