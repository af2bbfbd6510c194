use std::collections::HashSet;

use crate::model::schema::ColumnDescriptor;

/// The columns offered to the user together with the subset they picked.
///
/// `selected` is always a subset of the `available` names and is kept in the
/// order of `available`, so request bodies list columns the way the table (or
/// the file header) does regardless of the order in which they were ticked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSelection {
    available: Vec<ColumnDescriptor>,
    selected: Vec<String>,
}

impl ColumnSelection {
    /// Offers `available` with every column selected.
    pub fn all(available: Vec<ColumnDescriptor>) -> Self {
        let available = dedup(available);
        let selected = available.iter().map(|c| c.name.clone()).collect();
        Self {
            available,
            selected,
        }
    }

    /// Same as [`ColumnSelection::all`] for untyped names, such as a file header.
    pub fn from_names(names: &[String]) -> Self {
        Self::all(names.iter().cloned().map(ColumnDescriptor::named).collect())
    }

    pub fn available(&self) -> &[ColumnDescriptor] {
        &self.available
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    /// True when nothing is selected, which blocks forward navigation.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_all_selected(&self) -> bool {
        !self.available.is_empty() && self.selected.len() == self.available.len()
    }

    /// Flips a single column. Unknown names are ignored and reported as `false`.
    pub fn toggle(&mut self, name: &str) -> bool {
        if !self.available.iter().any(|c| c.name == name) {
            return false;
        }
        let mut keep: HashSet<String> = self.selected.iter().cloned().collect();
        if !keep.remove(name) {
            keep.insert(name.to_string());
        }
        self.retain(|n| keep.contains(n));
        true
    }

    /// Selects everything, or nothing when everything is already selected.
    pub fn toggle_all(&mut self) {
        if self.is_all_selected() {
            self.selected.clear();
        } else {
            self.retain(|_| true);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replaces the offered columns after a re-fetch of the same table.
    ///
    /// Columns that are still offered keep their selection state; columns that
    /// appear for the first time start selected.
    pub fn refresh(&mut self, available: Vec<ColumnDescriptor>) {
        let previous: HashSet<String> = self.available.iter().map(|c| c.name.clone()).collect();
        let kept: HashSet<String> = self.selected.iter().cloned().collect();
        self.available = dedup(available);
        self.retain(|n| kept.contains(n) || !previous.contains(n));
    }

    fn retain(&mut self, keep: impl Fn(&str) -> bool) {
        self.selected = self
            .available
            .iter()
            .filter(|c| keep(&c.name))
            .map(|c| c.name.clone())
            .collect();
    }
}

fn dedup(columns: Vec<ColumnDescriptor>) -> Vec<ColumnDescriptor> {
    let mut seen = HashSet::new();
    columns
        .into_iter()
        .filter(|c| seen.insert(c.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn abc() -> ColumnSelection {
        ColumnSelection::from_names(&["a".to_string(), "b".to_string(), "c".to_string()])
    }

    #[test]
    fn starts_fully_selected() {
        let selection = abc();
        assert_eq!(selection.selected(), ["a", "b", "c"]);
        assert!(selection.is_all_selected());
    }

    #[test]
    fn toggle_all_alternates_between_full_and_empty() {
        let mut selection = abc();
        selection.toggle_all();
        assert!(selection.is_empty());
        selection.toggle_all();
        assert_eq!(selection.selected(), ["a", "b", "c"]);
    }

    #[test]
    fn toggle_all_from_partial_selects_everything() {
        let mut selection = abc();
        selection.toggle("b");
        selection.toggle_all();
        assert_eq!(selection.selected(), ["a", "b", "c"]);
    }

    #[test]
    fn reselected_column_keeps_table_order() {
        let mut selection = abc();
        selection.toggle("a");
        assert_eq!(selection.selected(), ["b", "c"]);
        selection.toggle("a");
        assert_eq!(selection.selected(), ["a", "b", "c"]);
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let mut selection = abc();
        assert!(!selection.toggle("zzz"));
        assert_eq!(selection.selected().len(), 3);
    }

    #[test]
    fn can_deselect_down_to_empty() {
        let mut selection = abc();
        for name in ["a", "b", "c"] {
            selection.toggle(name);
        }
        assert!(selection.is_empty());
        assert!(!selection.is_all_selected());
    }

    #[test]
    fn refresh_keeps_previous_choices() {
        let mut selection = abc();
        selection.toggle("c");
        selection.refresh(vec![
            ColumnDescriptor::typed("a", "UInt32"),
            ColumnDescriptor::typed("c", "String"),
            ColumnDescriptor::typed("d", "DateTime"),
        ]);
        assert_eq!(selection.selected(), ["a", "d"]);
        assert_eq!(selection.available()[0].data_type.as_deref(), Some("UInt32"));
    }

    #[test]
    fn duplicate_names_are_collapsed() {
        let selection =
            ColumnSelection::from_names(&["a".to_string(), "a".to_string(), "b".to_string()]);
        assert_eq!(selection.available().len(), 2);
    }
}
