//! Hover/selection state machine
//!
//! Tracks two independent optional references: the part under the pointer
//! and the part last clicked (or chosen from the parts list). Transitions
//! return the minimal set of highlight changes so the caller can swap
//! materials without touching unaffected parts - repeated pointer events over
//! the same part produce an empty diff, which is what prevents per-frame
//! material reassignment flicker.

use crate::registry::PartId;

/// Visual highlight state of a single part. When a part is both hovered and
/// selected, the selection highlight wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Original material
    None,
    /// Transient pointer-over highlight
    Hovered,
    /// Sticky click/list selection highlight
    Selected,
}

/// Hover and selection references, at most one part each
#[derive(Debug, Default)]
pub struct InteractionState {
    hovered: Option<PartId>,
    selected: Option<PartId>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&PartId> {
        self.hovered.as_ref()
    }

    pub fn selected(&self) -> Option<&PartId> {
        self.selected.as_ref()
    }

    /// The part that rotation nudges and similar actions apply to:
    /// the selection, falling back to the hovered part.
    pub fn active(&self) -> Option<&PartId> {
        self.selected.as_ref().or(self.hovered.as_ref())
    }

    /// Effective highlight of a part under the selection-wins precedence
    pub fn highlight_of(&self, id: &PartId) -> Highlight {
        if self.selected.as_ref() == Some(id) {
            Highlight::Selected
        } else if self.hovered.as_ref() == Some(id) {
            Highlight::Hovered
        } else {
            Highlight::None
        }
    }

    /// Pointer moved; `hit` is the nearest intersected registered part, if
    /// any. Returns the highlight changes to apply. Empty when the hit is
    /// unchanged.
    pub fn pointer_over(&mut self, hit: Option<PartId>) -> Vec<(PartId, Highlight)> {
        if hit == self.hovered {
            return Vec::new();
        }
        let affected = [self.hovered.clone(), hit.clone()];
        self.transition(affected, |state| state.hovered = hit)
    }

    /// Click on the currently hovered part, if any: makes it the exclusive
    /// selection. No-op when nothing is hovered.
    pub fn click(&mut self) -> Vec<(PartId, Highlight)> {
        match self.hovered.clone() {
            Some(part) => self.select(Some(part)),
            None => Vec::new(),
        }
    }

    /// Select a part directly (parts-list UI), or clear the selection with
    /// `None`. Selection is exclusive: the previous selection reverts to its
    /// non-selected highlight.
    pub fn select(&mut self, id: Option<PartId>) -> Vec<(PartId, Highlight)> {
        if id == self.selected {
            return Vec::new();
        }
        let affected = [self.selected.clone(), id.clone()];
        self.transition(affected, |state| state.selected = id)
    }

    /// Forget both references without emitting changes. Used when the
    /// registry is rebuilt and the old parts no longer exist.
    pub fn reset(&mut self) {
        self.hovered = None;
        self.selected = None;
    }

    fn transition(
        &mut self,
        affected: [Option<PartId>; 2],
        apply: impl FnOnce(&mut Self),
    ) -> Vec<(PartId, Highlight)> {
        let mut parts: Vec<PartId> = affected.into_iter().flatten().collect();
        parts.dedup();

        let before: Vec<Highlight> = parts.iter().map(|p| self.highlight_of(p)).collect();
        apply(self);

        parts
            .into_iter()
            .zip(before)
            .filter(|(part, before)| self.highlight_of(part) != *before)
            .map(|(part, _)| {
                let after = self.highlight_of(&part);
                (part, after)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PartRegistry;

    fn three_parts() -> (PartRegistry, Vec<PartId>) {
        let mut registry = PartRegistry::new();
        let ids = ["A", "B", "C"]
            .iter()
            .map(|name| registry.insert(name, None))
            .collect();
        (registry, ids)
    }

    #[test]
    fn test_hover_is_idempotent() {
        let (_, ids) = three_parts();
        let mut state = InteractionState::new();

        let first = state.pointer_over(Some(ids[0].clone()));
        assert_eq!(first, vec![(ids[0].clone(), Highlight::Hovered)]);

        // Same hit again: no material churn
        assert!(state.pointer_over(Some(ids[0].clone())).is_empty());
        assert!(state.pointer_over(Some(ids[0].clone())).is_empty());
    }

    #[test]
    fn test_hover_moves_between_parts() {
        let (_, ids) = three_parts();
        let mut state = InteractionState::new();

        state.pointer_over(Some(ids[0].clone()));
        let changes = state.pointer_over(Some(ids[1].clone()));
        assert_eq!(
            changes,
            vec![
                (ids[0].clone(), Highlight::None),
                (ids[1].clone(), Highlight::Hovered),
            ]
        );

        // Leaving all parts restores the last hover
        let changes = state.pointer_over(None);
        assert_eq!(changes, vec![(ids[1].clone(), Highlight::None)]);
    }

    #[test]
    fn test_click_selects_hovered_part() {
        let (_, ids) = three_parts();
        let mut state = InteractionState::new();

        state.pointer_over(Some(ids[0].clone()));
        let changes = state.click();
        assert_eq!(changes, vec![(ids[0].clone(), Highlight::Selected)]);
        assert_eq!(state.selected(), Some(&ids[0]));
    }

    #[test]
    fn test_click_with_no_hover_is_noop() {
        let mut state = InteractionState::new();
        assert!(state.click().is_empty());
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_selection_is_exclusive() {
        let (_, ids) = three_parts();
        let mut state = InteractionState::new();

        state.select(Some(ids[0].clone()));
        let changes = state.select(Some(ids[1].clone()));
        assert_eq!(
            changes,
            vec![
                (ids[0].clone(), Highlight::None),
                (ids[1].clone(), Highlight::Selected),
            ]
        );

        // After any sequence, exactly one part carries the selection
        state.select(Some(ids[2].clone()));
        state.click();
        let selected: Vec<_> = ids
            .iter()
            .filter(|id| state.highlight_of(id) == Highlight::Selected)
            .collect();
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_selection_wins_over_hover() {
        let (_, ids) = three_parts();
        let mut state = InteractionState::new();

        state.select(Some(ids[0].clone()));
        // Hovering the selected part changes nothing visually
        assert!(state.pointer_over(Some(ids[0].clone())).is_empty());
        assert_eq!(state.highlight_of(&ids[0]), Highlight::Selected);

        // Hover moving off the selected part leaves the selection in place
        let changes = state.pointer_over(Some(ids[1].clone()));
        assert_eq!(changes, vec![(ids[1].clone(), Highlight::Hovered)]);
        assert_eq!(state.highlight_of(&ids[0]), Highlight::Selected);
    }

    #[test]
    fn test_deselect_restores_hover_highlight() {
        let (_, ids) = three_parts();
        let mut state = InteractionState::new();

        state.pointer_over(Some(ids[0].clone()));
        state.click();
        // Deselecting while still hovered drops back to the hover highlight
        let changes = state.select(None);
        assert_eq!(changes, vec![(ids[0].clone(), Highlight::Hovered)]);
    }

    #[test]
    fn test_active_prefers_selection() {
        let (_, ids) = three_parts();
        let mut state = InteractionState::new();

        assert!(state.active().is_none());
        state.pointer_over(Some(ids[0].clone()));
        assert_eq!(state.active(), Some(&ids[0]));
        state.select(Some(ids[1].clone()));
        assert_eq!(state.active(), Some(&ids[1]));
    }
}
