use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::model::{SeriesSpec, XAxisDomain};

use super::TickSegment;

/// Display rule for x-axis tick labels that plain renderer JSON cannot carry.
///
/// Rendering adapters install it as the axis label formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabelFormatter {
    pub linked: bool,
    pub modulus: Option<u32>,
}

impl TickLabelFormatter {
    #[must_use]
    pub fn new(domain: &XAxisDomain, segment: Option<TickSegment>) -> Self {
        let modulus = match segment {
            Some(TickSegment::Percent(modulus)) if modulus > 0 => Some(modulus),
            _ => None,
        };
        Self {
            linked: domain.is_linked(),
            modulus,
        }
    }

    /// Formats one raw domain key. An empty string hides the label.
    #[must_use]
    pub fn format(&self, key: &str) -> String {
        let label = if self.linked {
            crate::model::split_segment_key(key).1
        } else {
            key
        };
        match self.modulus {
            Some(modulus) => match label.trim().parse::<f64>() {
                Ok(value) if value % f64::from(modulus) == 0.0 => label.to_owned(),
                _ => String::new(),
            },
            None => label.to_owned(),
        }
    }

    /// Whether the formatter changes anything compared to raw keys.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        !self.linked && self.modulus.is_none()
    }
}

/// Writes domain data, name, visibility and label interval into `xAxis[0]`.
pub(super) fn apply_x_axis(
    option: &mut Value,
    domain: &XAxisDomain,
    series: &[SeriesSpec],
    segment: Option<TickSegment>,
) {
    let Some(axis) = option
        .get_mut("xAxis")
        .and_then(Value::as_array_mut)
        .and_then(|axes| axes.first_mut())
        .and_then(Value::as_object_mut)
    else {
        return;
    };

    let name = if domain.is_empty() {
        String::new()
    } else {
        series
            .first()
            .and_then(|spec| spec.x_axis_name.clone())
            .unwrap_or_default()
    };
    axis.insert("data".to_owned(), json!(domain.keys()));
    axis.insert("name".to_owned(), json!(name));
    axis.insert("show".to_owned(), json!(!domain.is_empty()));

    if let Some(interval) = segment.and_then(TickSegment::renderer_interval) {
        let label = axis
            .entry("axisLabel")
            .or_insert_with(|| json!({}));
        if let Some(label) = label.as_object_mut() {
            label.insert("show".to_owned(), json!(true));
            label.insert("interval".to_owned(), json!(interval));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TickLabelFormatter;
    use crate::model::XAxisDomain;
    use crate::option::TickSegment;

    #[test]
    fn percent_policy_hides_non_divisible_labels() {
        let domain = XAxisDomain::new(vec!["10".into(), "15".into(), "20".into()], false);
        let formatter = TickLabelFormatter::new(&domain, Some(TickSegment::Percent(10)));
        assert_eq!(formatter.format("10"), "10");
        assert_eq!(formatter.format("15"), "");
        assert_eq!(formatter.format("abc"), "");
    }

    #[test]
    fn linked_policy_strips_segment_prefix() {
        let domain = XAxisDomain::new(vec!["v1--3".into()], true);
        let formatter = TickLabelFormatter::new(&domain, Some(TickSegment::Every(5)));
        assert_eq!(formatter.format("v1--3"), "3");
        assert!(!formatter.is_identity());
    }
}
