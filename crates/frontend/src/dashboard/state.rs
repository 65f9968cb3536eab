//! Filter selection state
//!
//! `FilterState` is the single source of truth for the user's current
//! selection. Every operation is total, idempotent under repeated identical
//! input and pure: it returns the next snapshot, the previous one is never
//! mutated in place. The UI replaces the whole snapshot atomically per event.

use chrono::NaiveDate;
use contracts::dashboards::project_filters::{
    CategoryOption, CompletionStatus, DateBounds, DateRangePayload, NumericRange, RangePayload,
    SubmissionPayload,
};

use super::normalize::NormalizedData;

/// Placeholder bounds used until the first normalization completes.
pub const DEFAULT_RANGE: (f64, f64) = (0.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeDimension {
    Phase,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionDimension {
    Divisions,
    WbsCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionFlag {
    Completed,
    Incompleted,
}

/// Which slider handle the user moved in the current event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeHandle {
    Min,
    Max,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub phase: (f64, f64),
    pub duration: (f64, f64),
    pub divisions: Vec<CategoryOption>,
    pub wbs_category: Vec<CategoryOption>,
    pub completed: bool,
    pub incompleted: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            phase: DEFAULT_RANGE,
            duration: DEFAULT_RANGE,
            divisions: Vec::new(),
            wbs_category: Vec::new(),
            completed: true,
            incompleted: true,
            start_date: None,
            end_date: None,
        }
    }
}

impl FilterState {
    pub fn range(&self, dimension: RangeDimension) -> (f64, f64) {
        match dimension {
            RangeDimension::Phase => self.phase,
            RangeDimension::Duration => self.duration,
        }
    }

    pub fn selection(&self, dimension: OptionDimension) -> &[CategoryOption] {
        match dimension {
            OptionDimension::Divisions => &self.divisions,
            OptionDimension::WbsCategory => &self.wbs_category,
        }
    }

    fn set_range(&mut self, dimension: RangeDimension, values: (f64, f64)) {
        match dimension {
            RangeDimension::Phase => self.phase = values,
            RangeDimension::Duration => self.duration = values,
        }
    }

    fn selection_mut(&mut self, dimension: OptionDimension) -> &mut Vec<CategoryOption> {
        match dimension {
            OptionDimension::Divisions => &mut self.divisions,
            OptionDimension::WbsCategory => &mut self.wbs_category,
        }
    }

    /// Apply a dual-handle slider update. On `min > max` the handle that was
    /// NOT moved is pushed along to the moved handle's value, so dragging
    /// past the other handle carries it instead of rejecting the input.
    pub fn with_range(
        &self,
        dimension: RangeDimension,
        values: (f64, f64),
        moved: RangeHandle,
    ) -> Self {
        let (mut min, mut max) = values;
        if min > max {
            match moved {
                RangeHandle::Min => max = min,
                RangeHandle::Max => min = max,
            }
        }
        let mut next = self.clone();
        next.set_range(dimension, (min, max));
        next
    }

    /// Toggle membership of `option`, matched by `value`. Newly selected
    /// options are appended in click order, not canonical list order.
    pub fn with_option_toggled(&self, dimension: OptionDimension, option: &CategoryOption) -> Self {
        let mut next = self.clone();
        let selection = next.selection_mut(dimension);
        if let Some(position) = selection.iter().position(|o| o.value == option.value) {
            selection.remove(position);
        } else {
            selection.push(option.clone());
        }
        next
    }

    pub fn with_all_selected(&self, dimension: OptionDimension, universe: &[CategoryOption]) -> Self {
        let mut next = self.clone();
        *next.selection_mut(dimension) = universe.to_vec();
        next
    }

    pub fn with_none_selected(&self, dimension: OptionDimension) -> Self {
        let mut next = self.clone();
        next.selection_mut(dimension).clear();
        next
    }

    /// Store both date endpoints verbatim. Unlike the numeric ranges there
    /// is no ordering invariant between the two; consumers must tolerate
    /// `start > end` and either endpoint being absent.
    pub fn with_date_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let mut next = self.clone();
        next.start_date = start;
        next.end_date = end;
        next
    }

    /// Flip exactly one completion flag. The flags are independent, not
    /// mutually exclusive: both may end up set or cleared.
    pub fn with_completion_toggled(&self, flag: CompletionFlag) -> Self {
        let mut next = self.clone();
        match flag {
            CompletionFlag::Completed => next.completed = !next.completed,
            CompletionFlag::Incompleted => next.incompleted = !next.incompleted,
        }
        next
    }

    /// Re-align the selection with a freshly normalized domain. Called
    /// exactly once per normalization.
    ///
    /// Categorical selections are pruned to values still present in the new
    /// universe; the very first normalization adopts the full universe (the
    /// dashboard starts with everything selected). A range still equal to
    /// the previous full-open bounds follows the new bounds; a user-chosen
    /// sub-range survives unless it fell entirely outside the new domain.
    /// Date endpoints still equal to the previous bounds follow the new
    /// bounds, otherwise they are kept as chosen.
    pub fn reconciled(&self, previous: Option<&NormalizedData>, domain: &NormalizedData) -> Self {
        let mut next = self.clone();

        match previous {
            None => {
                next.divisions = domain.options.divisions.clone();
                next.wbs_category = domain.options.wbs_categories.clone();
            }
            Some(_) => {
                next.divisions = prune(&self.divisions, &domain.options.divisions);
                next.wbs_category = prune(&self.wbs_category, &domain.options.wbs_categories);
            }
        }

        let prev_phase = previous.map(|p| p.ranges.phase);
        let prev_duration = previous.map(|p| p.ranges.duration);
        next.phase = reconcile_range(self.phase, prev_phase, domain.ranges.phase);
        next.duration = reconcile_range(self.duration, prev_duration, domain.ranges.duration);

        let prev_dates = previous.map_or(DateBounds::default(), |p| p.ranges.dates);
        if self.start_date == prev_dates.min {
            next.start_date = domain.ranges.dates.min;
        }
        if self.end_date == prev_dates.max {
            next.end_date = domain.ranges.dates.max;
        }

        next
    }

    /// Submission serializer: flatten the selection into the transport
    /// payload. No I/O here.
    pub fn payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            phase: RangePayload {
                min: self.phase.0,
                max: self.phase.1,
            },
            divisions: self.divisions.clone(),
            wbs_category: self.wbs_category.clone(),
            duration: RangePayload {
                min: self.duration.0,
                max: self.duration.1,
            },
            completion_status: CompletionStatus {
                completed: self.completed,
                incompleted: self.incompleted,
            },
            date_range: DateRangePayload {
                start_date: self.start_date,
                end_date: self.end_date,
            },
        }
    }
}

fn prune(selection: &[CategoryOption], universe: &[CategoryOption]) -> Vec<CategoryOption> {
    selection
        .iter()
        .filter(|selected| universe.iter().any(|o| o.value == selected.value))
        .cloned()
        .collect()
}

fn reconcile_range(
    selected: (f64, f64),
    previous: Option<NumericRange>,
    domain: NumericRange,
) -> (f64, f64) {
    let full_open = previous.map_or(DEFAULT_RANGE, |r| (r.min, r.max));
    // Untouched selection follows the refreshed bounds.
    if selected == full_open {
        return (domain.min, domain.max);
    }
    if domain.excludes(selected.0, selected.1) {
        return (domain.min, domain.max);
    }
    selected
}
