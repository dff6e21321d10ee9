use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const GROUP_DEFAULT: &str = "group-default";

/// Partition of chart sequence numbers into named linkage groups.
///
/// Membership is fixed at construction. Charts not named by any group, or
/// every chart when no partition is given, belong to [`GROUP_DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkageGroups {
    groups: Vec<Vec<usize>>,
    names: Vec<String>,
}

impl LinkageGroups {
    /// Validates a partition of 1-based chart sequence numbers.
    ///
    /// Every entry must be a positive integer and no number may appear twice
    /// across groups. Groups are named `group1`, `group2`, ... in order.
    pub fn from_partition(partition: Option<Vec<Vec<i64>>>) -> ChartResult<Self> {
        let Some(partition) = partition else {
            return Ok(Self::default());
        };

        let mut seen = HashSet::new();
        let mut groups = Vec::with_capacity(partition.len());
        for members in partition {
            let mut group = Vec::with_capacity(members.len());
            for seq in members {
                let seq = usize::try_from(seq)
                    .ok()
                    .filter(|seq| *seq > 0)
                    .ok_or_else(|| {
                        ChartError::Validation(format!(
                            "group member `{seq}` must be a positive integer"
                        ))
                    })?;
                if !seen.insert(seq) {
                    return Err(ChartError::Validation(format!(
                        "chart sequence `{seq}` is listed more than once"
                    )));
                }
                group.push(seq);
            }
            groups.push(group);
        }
        let names = (1..=groups.len()).map(|index| format!("group{index}")).collect();
        Ok(Self { groups, names })
    }

    /// Group names in partition order; empty when no partition was given.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn is_partitioned(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Group of the chart with 1-based sequence number `seq`.
    #[must_use]
    pub fn group_for_seq(&self, seq: usize) -> &str {
        self.groups
            .iter()
            .position(|members| members.contains(&seq))
            .and_then(|index| self.names.get(index))
            .map_or(GROUP_DEFAULT, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{GROUP_DEFAULT, LinkageGroups};
    use crate::error::ChartError;

    #[test]
    fn absent_partition_puts_everything_in_the_default_group() {
        let groups = LinkageGroups::from_partition(None).unwrap();
        assert!(groups.names().is_empty());
        assert_eq!(groups.group_for_seq(4), GROUP_DEFAULT);
    }

    #[test]
    fn partition_names_groups_in_order() {
        let groups = LinkageGroups::from_partition(Some(vec![vec![1, 3], vec![2]])).unwrap();
        assert_eq!(groups.names(), ["group1", "group2"]);
        assert_eq!(groups.group_for_seq(3), "group1");
        assert_eq!(groups.group_for_seq(2), "group2");
        assert_eq!(groups.group_for_seq(5), GROUP_DEFAULT);
    }

    #[test]
    fn rejects_non_positive_and_duplicate_members() {
        assert!(matches!(
            LinkageGroups::from_partition(Some(vec![vec![0]])),
            Err(ChartError::Validation(_))
        ));
        assert!(matches!(
            LinkageGroups::from_partition(Some(vec![vec![-2, 1]])),
            Err(ChartError::Validation(_))
        ));
        assert!(matches!(
            LinkageGroups::from_partition(Some(vec![vec![1, 2], vec![2]])),
            Err(ChartError::Validation(_))
        ));
    }
}
