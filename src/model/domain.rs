use serde::{Deserialize, Serialize};

use super::{SeriesSpec, split_segment_key};

/// Category x-axis domain shared by every series of one chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct XAxisDomain {
    keys: Vec<String>,
    linked: bool,
}

impl XAxisDomain {
    #[must_use]
    pub fn new(keys: Vec<String>, linked: bool) -> Self {
        Self { keys, linked }
    }

    /// Derives the domain from the x keys of the first series with data.
    ///
    /// Empty series earlier in the list never shadow a later non-empty one.
    /// Link mode is on when every series carries a link spec.
    #[must_use]
    pub fn derive(series: &[SeriesSpec]) -> Self {
        let keys = series
            .iter()
            .find(|spec| !spec.data.is_empty())
            .map(|spec| spec.data.iter().map(|point| point.x.to_string()).collect())
            .unwrap_or_default();
        let linked = !series.is_empty() && series.iter().all(|spec| spec.link.is_some());
        Self { keys, linked }
    }

    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn key(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Display label at `index`; in link mode only the part after `--`.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        let key = self.key(index)?;
        if self.linked {
            Some(split_segment_key(key).1)
        } else {
            Some(key)
        }
    }

    /// Largest valid index, `None` for an empty domain.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.keys.len().checked_sub(1)
    }

    /// Clamps a raw (possibly fractional or out-of-range) index.
    ///
    /// Returns the clamped index and whether clamping moved it onto a boundary.
    #[must_use]
    pub fn clamp_index(&self, raw: f64) -> (usize, bool) {
        let Some(last) = self.last_index() else {
            return (0, raw != 0.0);
        };
        if !raw.is_finite() || raw < 0.0 {
            return (0, true);
        }
        let rounded = raw.round();
        if rounded > last as f64 {
            (last, true)
        } else {
            (rounded as usize, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::XAxisDomain;

    #[test]
    fn clamp_snaps_both_directions() {
        let domain = XAxisDomain::new(vec!["a".into(), "b".into(), "c".into()], false);
        assert_eq!(domain.clamp_index(-4.0), (0, true));
        assert_eq!(domain.clamp_index(1.2), (1, false));
        assert_eq!(domain.clamp_index(9.0), (2, true));
        assert_eq!(domain.clamp_index(f64::NAN), (0, true));
    }

    #[test]
    fn empty_domain_clamps_to_zero() {
        let domain = XAxisDomain::default();
        assert_eq!(domain.clamp_index(0.0), (0, false));
        assert_eq!(domain.clamp_index(3.0), (0, true));
    }
}
