//! Interactive view state: active sort and column visibility.

use std::collections::HashMap;

use super::column::Column;
use super::sort::SortDirection;
use crate::error::ViewError;

/// Which column drives the sort, and in which direction.
///
/// Header clicks cycle a column through ascending, descending and back to
/// unsorted. Clicking a different column always starts it ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending(String),
    Descending(String),
}

impl SortState {
    /// Returns the state after a click on the column `key`.
    pub fn toggle(self, key: &str) -> Self {
        match self {
            Self::Ascending(current) if current == key => Self::Descending(current),
            Self::Descending(current) if current == key => Self::Unsorted,
            _ => Self::Ascending(key.to_string()),
        }
    }

    /// Accessor of the sorting column, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Unsorted => None,
            Self::Ascending(key) | Self::Descending(key) => Some(key),
        }
    }

    /// Current direction. Unsorted reports ascending.
    pub fn direction(&self) -> SortDirection {
        match self {
            Self::Descending(_) => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

/// Ephemeral per-table state owned by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub sort: SortState,
    visibility: HashMap<String, bool>,
}

impl ViewState {
    /// Fresh state: unsorted, every column visible unless it starts hidden.
    pub fn new(columns: &[Column]) -> Self {
        let visibility = columns
            .iter()
            .map(|c| (c.accessor.clone(), !c.starts_hidden))
            .collect();
        Self {
            sort: SortState::Unsorted,
            visibility,
        }
    }

    /// Applies a header click to the sort state.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = std::mem::take(&mut self.sort).toggle(key);
    }

    fn set_visible(&mut self, key: &str, visible: bool) -> Result<(), ViewError> {
        match self.visibility.get_mut(key) {
            Some(slot) => {
                *slot = visible;
                Ok(())
            }
            None => Err(ViewError::UnknownColumn(key.to_string())),
        }
    }

    pub fn show(&mut self, key: &str) -> Result<(), ViewError> {
        self.set_visible(key, true)
    }

    pub fn hide(&mut self, key: &str) -> Result<(), ViewError> {
        self.set_visible(key, false)
    }

    pub fn show_all(&mut self) {
        self.visibility.values_mut().for_each(|v| *v = true);
    }

    pub fn hide_all(&mut self) {
        self.visibility.values_mut().for_each(|v| *v = false);
    }

    /// Undeclared columns are never visible.
    pub fn is_visible(&self, key: &str) -> bool {
        self.visibility.get(key).copied().unwrap_or(false)
    }

    pub fn visible_count(&self) -> usize {
        self.visibility.values().filter(|v| **v).count()
    }

    /// The visible subset of `columns`, in declaration order.
    pub fn visible_columns<'a>(&self, columns: &'a [Column]) -> Vec<&'a Column> {
        columns
            .iter()
            .filter(|c| self.is_visible(&c.accessor))
            .collect()
    }

    /// Checks that the customization view may close.
    ///
    /// At least one column has to stay visible.
    pub fn close_customization(&self) -> Result<(), ViewError> {
        if self.visible_count() == 0 {
            return Err(ViewError::NoVisibleColumns);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ValueType;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("A", "a", ValueType::Int),
            Column::new("B", "b", ValueType::String),
            Column::new("C", "c", ValueType::Json).hidden(),
        ]
    }

    #[test]
    fn test_toggle_cycle() {
        let state = SortState::Unsorted.toggle("a");
        assert_eq!(state, SortState::Ascending("a".into()));

        let state = state.toggle("a");
        assert_eq!(state, SortState::Descending("a".into()));
        assert_eq!(state.direction(), SortDirection::Descending);

        let state = state.toggle("a");
        assert_eq!(state, SortState::Unsorted);
        assert_eq!(state.key(), None);
    }

    #[test]
    fn test_toggle_other_column_restarts_ascending() {
        let state = SortState::Descending("a".into()).toggle("b");
        assert_eq!(state, SortState::Ascending("b".into()));

        let state = SortState::Ascending("a".into()).toggle("b");
        assert_eq!(state, SortState::Ascending("b".into()));
    }

    #[test]
    fn test_initial_visibility() {
        let columns = columns();
        let view = ViewState::new(&columns);
        assert!(view.is_visible("a"));
        assert!(!view.is_visible("c"));
        assert_eq!(view.visible_count(), 2);
    }

    #[test]
    fn test_hide_all_then_show_one() {
        let columns = columns();
        let mut view = ViewState::new(&columns);
        view.hide_all();
        view.show("b").unwrap();

        let visible: Vec<&str> = view
            .visible_columns(&columns)
            .iter()
            .map(|c| c.accessor.as_str())
            .collect();
        assert_eq!(visible, vec!["b"]);

        view.show_all();
        assert_eq!(view.visible_columns(&columns).len(), 3);
    }

    #[test]
    fn test_close_requires_a_visible_column() {
        let columns = columns();
        let mut view = ViewState::new(&columns);
        assert!(view.close_customization().is_ok());

        view.hide_all();
        let err = view.close_customization().unwrap_err();
        assert_eq!(err, ViewError::NoVisibleColumns);
        assert_eq!(err.to_string(), "Please select at least one column");
    }

    #[test]
    fn test_unknown_column() {
        let mut view = ViewState::new(&columns());
        assert_eq!(
            view.hide("zzz"),
            Err(ViewError::UnknownColumn("zzz".into()))
        );
    }
}
