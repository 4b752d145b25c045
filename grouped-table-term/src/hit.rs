use crate::layout::Rect;

/// What a click on a region of the painted table means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A sortable leaf header.
    SortHeader(String),
    SelectAll,
    /// The checkbox of the row with this selection key.
    RowCheckbox(String),
    /// A body cell; `row` indexes the table's current rows.
    DataCell { row: usize, column: String },
    /// The filter input of a leaf column.
    FilterInput(String),
}

/// Clickable regions of the last painted frame, in screen coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: Rect, target: Target) {
        if !rect.is_empty() {
            self.regions.push((rect, target));
        }
    }

    /// The target at (`x`, `y`). Later regions win where regions overlap.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<&Target> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, target)| target)
    }

    /// Where `target` was painted.
    pub fn find(&self, target: &Target) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(_, t)| t == target)
            .map(|(rect, _)| *rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Rect, Target)> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_region_wins() {
        let mut hits = HitMap::new();
        hits.push(Rect::new(0, 0, 10, 3), Target::SelectAll);
        hits.push(Rect::new(2, 1, 3, 1), Target::FilterInput("name".into()));
        hits.push(Rect::new(50, 50, 0, 4), Target::SortHeader("never".into()));

        assert_eq!(hits.len(), 2);
        assert_eq!(hits.hit_test(3, 1), Some(&Target::FilterInput("name".into())));
        assert_eq!(hits.hit_test(3, 2), Some(&Target::SelectAll));
        assert_eq!(hits.hit_test(10, 0), None);
    }
}
