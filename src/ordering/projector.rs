//! Order Projection
//!
//! Computes the on-screen order from the flat option storage: each root entry
//! in storage order, with a group header followed immediately by its members.

use std::collections::HashMap;

use crate::domain::{ConfigOption, OptionId};

/// One row of the visual order
///
/// Derived on every query and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualPosition<'a> {
    pub option: &'a ConfigOption,
    pub visual_index: usize,
    /// Index of `option` in the storage list it was projected from
    pub storage_index: usize,
    /// Group the option is shown in. `None` for root entries, including
    /// choices whose group no longer exists.
    pub group_id: Option<&'a OptionId>,
    pub index_in_group: Option<usize>,
}

impl<'a> VisualPosition<'a> {
    pub fn id(&self) -> &'a OptionId {
        &self.option.id
    }

    pub fn is_group(&self) -> bool {
        self.option.is_group()
    }

    pub fn is_in_group(&self) -> bool {
        self.group_id.is_some()
    }
}

/// Project the storage list into visual order
///
/// Every option appears exactly once. Members of a group keep their relative
/// storage order even when they are not contiguous in storage.
pub fn visual_order(options: &[ConfigOption]) -> Vec<VisualPosition<'_>> {
    // Group id -> storage index of its header (first header wins)
    let mut headers: HashMap<&OptionId, usize> = HashMap::new();
    for (index, option) in options.iter().enumerate() {
        if option.is_group() {
            headers.entry(&option.id).or_insert(index);
        }
    }

    // Header index -> member indices, in storage order
    let mut members: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (index, option) in options.iter().enumerate() {
        match option.group_id().and_then(|group_id| headers.get(group_id)) {
            Some(&header) => members.entry(header).or_default().push(index),
            None => roots.push(index),
        }
    }

    let mut result = Vec::with_capacity(options.len());
    for root in roots {
        let entry = &options[root];
        let visual_index = result.len();
        result.push(VisualPosition {
            option: entry,
            visual_index,
            storage_index: root,
            group_id: None,
            index_in_group: None,
        });

        let Some(children) = members.get(&root) else {
            continue;
        };
        for (position, &child) in children.iter().enumerate() {
            let visual_index = result.len();
            result.push(VisualPosition {
                option: &options[child],
                visual_index,
                storage_index: child,
                group_id: Some(&entry.id),
                index_in_group: Some(position),
            });
        }
    }
    result
}

/// Root-level entries in storage order
pub fn root_items(options: &[ConfigOption]) -> Vec<&ConfigOption> {
    visual_order(options)
        .into_iter()
        .filter(|position| !position.is_in_group())
        .map(|position| position.option)
        .collect()
}

/// Members of one group in storage order
pub fn group_members<'a>(
    options: &'a [ConfigOption],
    group_id: &OptionId,
) -> Vec<&'a ConfigOption> {
    visual_order(options)
        .into_iter()
        .filter(|position| position.group_id == Some(group_id))
        .map(|position| position.option)
        .collect()
}
