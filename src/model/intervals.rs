use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

use super::CompareMode;

/// Inclusive `[start, end]` index run.
pub type IndexInterval = [usize; 2];

/// Run list; alarm regions rarely exceed a handful of runs.
pub type IntervalList = SmallVec<[IndexInterval; 4]>;

/// Run-length encodes the indices where `mode` holds between `compare` and
/// `baseline` into inclusive intervals.
pub fn compare_intervals(
    baseline: &[f64],
    compare: &[f64],
    mode: CompareMode,
) -> ChartResult<IntervalList> {
    if baseline.len() != compare.len() {
        return Err(ChartError::Validation(format!(
            "baseline length {} does not match series length {}",
            baseline.len(),
            compare.len()
        )));
    }

    let mut intervals = IntervalList::new();
    let mut start: Option<usize> = None;
    for (index, (base, value)) in baseline.iter().zip(compare).enumerate() {
        match (mode.matches(*base, *value), start) {
            (true, None) => start = Some(index),
            (false, Some(open)) => {
                intervals.push([open, index - 1]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(open) = start {
        intervals.push([open, baseline.len() - 1]);
    }
    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::compare_intervals;
    use crate::model::CompareMode;

    #[test]
    fn above_mode_finds_single_run() {
        let runs = compare_intervals(
            &[10.0, 10.0, 10.0, 10.0],
            &[5.0, 15.0, 15.0, 5.0],
            CompareMode::Above,
        )
        .expect("equal lengths");
        assert_eq!(runs.as_slice(), &[[1, 2]]);
    }

    #[test]
    fn trailing_run_is_closed_at_end() {
        let runs = compare_intervals(&[0.0; 5], &[-1.0, 0.0, -2.0, -2.0, -2.0], CompareMode::Below)
            .expect("equal lengths");
        assert_eq!(runs.as_slice(), &[[0, 0], [2, 4]]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert!(compare_intervals(&[1.0], &[1.0, 2.0], CompareMode::Equal).is_err());
    }
}
