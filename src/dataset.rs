use std::collections::{HashMap, HashSet};

use derive_new::new;
use tracing::debug;

use crate::{
    config::RraConfig,
    error::{Result, RraError},
    math::percentile,
    rank::sort_ascending,
};

/// A single measurement of an item within one list
#[derive(Debug, Clone, new)]
pub struct Item {
    /// Identity of the item (e.g. an sgRNA)
    pub name: String,
    /// Index of the list the item was measured in
    pub list: usize,
    /// Raw measured value
    pub value: f64,
    /// Mid-rank percentile of `value` within its list, in (0, 1)
    #[new(default)]
    pub percentile: f64,
}

/// A ranked list: every value measured in it, sorted ascending on build
#[derive(Debug, Clone, new)]
pub struct List {
    pub name: String,
    #[new(default)]
    values: Vec<f64>,
}
impl List {
    /// The sorted values of the list
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A group of same-identity items across lists (e.g. the sgRNAs of a gene)
#[derive(Debug, Clone, new)]
pub struct Group {
    pub name: String,
    #[new(default)]
    pub items: Vec<Item>,
    /// Aggregate significance of the group, smaller is more significant
    #[new(value = "1.0")]
    pub lo_value: f64,
    /// Empirical false discovery rate at the group's lo-value
    #[new(value = "1.0")]
    pub fdr: f64,
}
impl Group {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The percentiles of every item in the group
    pub fn percentiles(&self) -> Vec<f64> {
        self.items.iter().map(|item| item.percentile).collect()
    }
}

/// Collects records into groups and lists keyed by identity in a single pass
///
/// Groups and lists keep the order in which they first appear.
#[derive(Debug)]
pub struct DatasetBuilder {
    groups: Vec<Group>,
    lists: Vec<List>,
    group_index: HashMap<String, usize>,
    list_index: HashMap<String, usize>,
    seen_items: HashSet<(usize, String)>,
    max_groups: usize,
    max_lists: usize,
}
impl DatasetBuilder {
    pub fn new(config: &RraConfig) -> Self {
        Self {
            groups: Vec::new(),
            lists: Vec::new(),
            group_index: HashMap::new(),
            list_index: HashMap::new(),
            seen_items: HashSet::new(),
            max_groups: config.max_groups,
            max_lists: config.max_lists,
        }
    }

    /// Adds one measurement of `item` in `list`, belonging to `group`
    pub fn push(&mut self, item: &str, group: &str, list: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(RraError::InvalidInput(format!(
                "item {item} in list {list} has non-finite value {value}"
            )));
        }

        let list_idx = match self.list_index.get(list) {
            Some(idx) => *idx,
            None => {
                if self.lists.len() >= self.max_lists {
                    return Err(RraError::ResourceExhaustion {
                        kind: "lists",
                        ceiling: self.max_lists,
                    });
                }
                self.lists.push(List::new(list.to_string()));
                self.list_index.insert(list.to_string(), self.lists.len() - 1);
                self.lists.len() - 1
            }
        };

        if !self.seen_items.insert((list_idx, item.to_string())) {
            return Err(RraError::InvalidInput(format!(
                "item {item} appears more than once in list {list}"
            )));
        }

        let group_idx = match self.group_index.get(group) {
            Some(idx) => *idx,
            None => {
                if self.groups.len() >= self.max_groups {
                    return Err(RraError::ResourceExhaustion {
                        kind: "groups",
                        ceiling: self.max_groups,
                    });
                }
                self.groups.push(Group::new(group.to_string()));
                self.group_index
                    .insert(group.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        self.lists[list_idx].values.push(value);
        self.groups[group_idx]
            .items
            .push(Item::new(item.to_string(), list_idx, value));
        Ok(())
    }

    /// Freezes the collected records, sorting every list ascending
    pub fn build(self) -> Result<Dataset> {
        if self.groups.is_empty() {
            return Err(RraError::InvalidInput("no records were provided".to_string()));
        }
        let mut lists = self.lists;
        for list in lists.iter_mut() {
            sort_ascending(&mut list.values);
        }
        debug!(
            groups = self.groups.len(),
            lists = lists.len(),
            "Dataset frozen"
        );
        Ok(Dataset {
            groups: self.groups,
            lists,
        })
    }
}

/// Groups and their reference lists
///
/// Lists are sorted and cannot be extended once the dataset is built, so
/// every rank search sees the same values.
#[derive(Debug, Clone)]
pub struct Dataset {
    groups: Vec<Group>,
    lists: Vec<List>,
}
impl Dataset {
    pub fn builder(config: &RraConfig) -> DatasetBuilder {
        DatasetBuilder::new(config)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn n_lists(&self) -> usize {
        self.lists.len()
    }

    pub fn n_items(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Item counts of each group in current group order
    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Group::len).collect()
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub(crate) fn groups_mut(&mut self) -> &mut [Group] {
        &mut self.groups
    }

    /// Assigns every item its percentile within its own list
    pub fn compute_percentiles(&mut self, epsilon: f64) {
        let Self { groups, lists } = self;
        for item in groups.iter_mut().flat_map(|g| g.items.iter_mut()) {
            item.percentile = percentile(item.value, lists[item.list].values(), epsilon);
        }
    }

    /// Reorders the groups ascending by lo-value
    ///
    /// Groups with equal lo-values keep their relative order.
    pub fn sort_by_lo_value(&mut self) {
        self.groups.sort_by(|a, b| a.lo_value.total_cmp(&b.lo_value));
    }
}
