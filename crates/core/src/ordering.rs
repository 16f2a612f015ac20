//! Display-order model shared by projects and project photos.
//!
//! An [`OrderedCollection`] holds one editing session's worth of rows in
//! their user-visible order. Reorder intents (move up/down, set primary)
//! only touch the in-memory sequence and raise the dirty flag; nothing is
//! written until the caller takes a [`OrderedCollection::save_plan`] and
//! persists it.
//!
//! Rules:
//!
//! - The set of ids never changes through reordering.
//! - Collections whose items carry a primary flag keep at most one primary,
//!   and `set_primary` moves it to position 0.
//! - The primary is pinned to position 0: the item at position 1 cannot
//!   move up past it, and the primary itself cannot move down. Reloading
//!   sorts primaries first, so any other rule would not survive a save.
//! - Unknown ids and boundary moves are silent no-ops.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, DisplayOrder};

/// A persisted record that takes part in a user-controlled display sequence.
pub trait Orderable {
    /// Whether items of this type carry a primary ("main") flag.
    const HAS_PRIMARY: bool = false;

    fn id(&self) -> DbId;

    fn display_order(&self) -> DisplayOrder;

    fn set_display_order(&mut self, order: DisplayOrder);

    fn is_primary(&self) -> bool {
        false
    }

    fn set_primary(&mut self, _primary: bool) {}
}

/// One recorded reorder intent, replayed against a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OrderOp {
    MoveUp { id: DbId },
    MoveDown { id: DbId },
    SetPrimary { id: DbId },
}

impl OrderOp {
    pub fn id(&self) -> DbId {
        match *self {
            OrderOp::MoveUp { id } | OrderOp::MoveDown { id } | OrderOp::SetPrimary { id } => id,
        }
    }
}

/// One row of a save plan: the rank and primary flag to persist for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankUpdate {
    pub id: DbId,
    /// 1-based position in the final sequence.
    pub display_order: DisplayOrder,
    pub is_primary: bool,
}

/// Result of removing an item from a collection.
#[derive(Debug)]
pub struct Removal<T> {
    pub item: T,
    /// Id of the item that inherited the primary flag, if the removed item
    /// was primary and others remain. The caller must persist this at once.
    pub promoted: Option<DbId>,
}

/// Compute the display order for a new item appended to a collection.
///
/// Returns `max + 1`, or `1` for an empty collection.
pub fn next_display_order<I>(existing: I) -> DisplayOrder
where
    I: IntoIterator<Item = DisplayOrder>,
{
    existing.into_iter().max().map_or(1, |max| max.saturating_add(1))
}

/// Sort rows into default display order: primary first, then ascending
/// `display_order`, then ascending id.
pub fn sort_default<T: Orderable>(rows: &mut [T]) {
    rows.sort_by(|a, b| {
        b.is_primary()
            .cmp(&a.is_primary())
            .then(a.display_order().cmp(&b.display_order()))
            .then(a.id().cmp(&b.id()))
    });
}

/// In-memory ordered sequence for one editing session.
#[derive(Debug, Clone)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
    dirty: bool,
}

impl<T: Orderable> OrderedCollection<T> {
    /// Build a collection from rows fetched from storage, applying the
    /// default sort.
    pub fn from_rows(mut rows: Vec<T>) -> Self {
        sort_default(&mut rows);
        Self {
            items: rows,
            dirty: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether unsaved reorder or primary changes exist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn ids(&self) -> Vec<DbId> {
        self.items.iter().map(Orderable::id).collect()
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: DbId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn primary_id(&self) -> Option<DbId> {
        self.items.iter().find(|i| i.is_primary()).map(Orderable::id)
    }

    /// Swap the item with its predecessor.
    ///
    /// Returns `true` if the order changed.
    pub fn move_up(&mut self, id: DbId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        if pos == 0 {
            return false;
        }
        if T::HAS_PRIMARY && pos == 1 && self.items[0].is_primary() {
            return false;
        }
        self.items.swap(pos - 1, pos);
        self.dirty = true;
        true
    }

    /// Swap the item with its successor.
    ///
    /// Returns `true` if the order changed. The primary item never moves.
    pub fn move_down(&mut self, id: DbId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        if pos + 1 >= self.items.len() {
            return false;
        }
        if T::HAS_PRIMARY && self.items[pos].is_primary() {
            return false;
        }
        self.items.swap(pos, pos + 1);
        self.dirty = true;
        true
    }

    /// Make `id` the only primary item and move it to position 0.
    ///
    /// No-op for collections without a primary flag, unknown ids, and items
    /// that are already primary.
    pub fn set_primary(&mut self, id: DbId) -> bool {
        if !T::HAS_PRIMARY {
            return false;
        }
        let Some(pos) = self.position(id) else {
            return false;
        };
        if self.items[pos].is_primary() {
            return false;
        }
        for item in &mut self.items {
            item.set_primary(false);
        }
        let mut target = self.items.remove(pos);
        target.set_primary(true);
        self.items.insert(0, target);
        self.dirty = true;
        true
    }

    /// Clear every primary flag except the first one in sequence order, then
    /// re-sort so demoted items fall back to their stored rank.
    ///
    /// Storage does not enforce a single primary, so rows fetched from it may
    /// carry several. Returns `true` if any flag was cleared.
    pub fn normalize_primary(&mut self) -> bool {
        if !T::HAS_PRIMARY {
            return false;
        }
        let mut seen = false;
        let mut changed = false;
        for item in &mut self.items {
            if item.is_primary() {
                if seen {
                    item.set_primary(false);
                    changed = true;
                }
                seen = true;
            }
        }
        if changed {
            sort_default(&mut self.items);
            self.dirty = true;
        }
        changed
    }

    /// Apply a single recorded intent. Returns `true` if anything changed.
    pub fn apply(&mut self, op: OrderOp) -> bool {
        match op {
            OrderOp::MoveUp { id } => self.move_up(id),
            OrderOp::MoveDown { id } => self.move_down(id),
            OrderOp::SetPrimary { id } => self.set_primary(id),
        }
    }

    /// Check a batch of intents against this collection without applying it.
    ///
    /// The collection itself ignores unknown ids; callers that want explicit
    /// signalling run this first.
    pub fn validate_ops(&self, ops: &[OrderOp]) -> Result<(), CoreError> {
        for op in ops {
            if !self.contains(op.id()) {
                return Err(CoreError::Validation(format!(
                    "Item {} is not part of this collection",
                    op.id()
                )));
            }
            if matches!(op, OrderOp::SetPrimary { .. }) && !T::HAS_PRIMARY {
                return Err(CoreError::Validation(
                    "This collection has no primary item".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Apply a batch of intents in order. Returns how many changed the order.
    pub fn apply_all(&mut self, ops: &[OrderOp]) -> usize {
        ops.iter().filter(|op| self.apply(**op)).count()
    }

    /// Rank a new item appended to this collection should be inserted with.
    pub fn next_display_order(&self) -> DisplayOrder {
        next_display_order(self.items.iter().map(Orderable::display_order))
    }

    /// Whether an item appended now becomes primary (first photo of an
    /// empty gallery).
    pub fn next_is_primary(&self) -> bool {
        T::HAS_PRIMARY && self.items.is_empty()
    }

    /// Append a newly created item.
    ///
    /// The first item added to an empty collection with a primary flag
    /// becomes primary.
    pub fn add(&mut self, mut item: T) {
        if self.next_is_primary() {
            item.set_primary(true);
        }
        self.items.push(item);
    }

    /// Remove an item, promoting the new first item when the primary goes.
    pub fn remove(&mut self, id: DbId) -> Option<Removal<T>> {
        let pos = self.position(id)?;
        let item = self.items.remove(pos);
        let mut promoted = None;
        if T::HAS_PRIMARY && item.is_primary() {
            if let Some(first) = self.items.first_mut() {
                first.set_primary(true);
                promoted = Some(first.id());
            }
        }
        Some(Removal { item, promoted })
    }

    /// The ranks and primary flags to persist for the current sequence.
    pub fn save_plan(&self) -> Vec<RankUpdate> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| RankUpdate {
                id: item.id(),
                display_order: rank(index),
                is_primary: T::HAS_PRIMARY && item.is_primary(),
            })
            .collect()
    }

    /// Record that the save plan was persisted: sync ranks and clear dirty.
    pub fn mark_saved(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_display_order(rank(index));
        }
        self.dirty = false;
    }
}

fn rank(index: usize) -> DisplayOrder {
    DisplayOrder::try_from(index + 1).unwrap_or(DisplayOrder::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Photo {
        id: DbId,
        order: i32,
        main: bool,
    }

    impl Orderable for Photo {
        const HAS_PRIMARY: bool = true;

        fn id(&self) -> DbId {
            self.id
        }
        fn display_order(&self) -> i32 {
            self.order
        }
        fn set_display_order(&mut self, order: i32) {
            self.order = order;
        }
        fn is_primary(&self) -> bool {
            self.main
        }
        fn set_primary(&mut self, primary: bool) {
            self.main = primary;
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Project {
        id: DbId,
        order: i32,
    }

    impl Orderable for Project {
        fn id(&self) -> DbId {
            self.id
        }
        fn display_order(&self) -> i32 {
            self.order
        }
        fn set_display_order(&mut self, order: i32) {
            self.order = order;
        }
    }

    fn photo(id: DbId, order: i32, main: bool) -> Photo {
        Photo { id, order, main }
    }

    fn photos(layout: &[(DbId, bool)]) -> OrderedCollection<Photo> {
        let rows = layout
            .iter()
            .enumerate()
            .map(|(i, &(id, main))| photo(id, i as i32 + 1, main))
            .collect();
        OrderedCollection::from_rows(rows)
    }

    fn projects(ids: &[DbId]) -> OrderedCollection<Project> {
        let rows = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| Project {
                id,
                order: i as i32 + 1,
            })
            .collect();
        OrderedCollection::from_rows(rows)
    }

    fn primaries(c: &OrderedCollection<Photo>) -> Vec<DbId> {
        c.items().iter().filter(|p| p.main).map(|p| p.id).collect()
    }

    // -- default sort ---------------------------------------------------------

    #[test]
    fn from_rows_sorts_primary_first_then_order() {
        let c = OrderedCollection::from_rows(vec![
            photo(1, 1, false),
            photo(2, 5, true),
            photo(3, 2, false),
        ]);
        assert_eq!(c.ids(), vec![2, 1, 3]);
        assert!(!c.is_dirty());
    }

    #[test]
    fn equal_display_orders_fall_back_to_id() {
        let c = OrderedCollection::from_rows(vec![
            Project { id: 9, order: 1 },
            Project { id: 4, order: 1 },
        ]);
        assert_eq!(c.ids(), vec![4, 9]);
    }

    #[test]
    fn next_display_order_is_max_plus_one() {
        assert_eq!(next_display_order([3, 7, 2]), 8);
        assert_eq!(next_display_order(Vec::<i32>::new()), 1);
        assert_eq!(next_display_order([i32::MAX]), i32::MAX);
    }

    // -- move up / move down --------------------------------------------------

    #[test]
    fn move_up_swaps_with_predecessor() {
        let mut c = projects(&[1, 2, 3]);
        assert!(c.move_up(3));
        assert_eq!(c.ids(), vec![1, 3, 2]);
        assert!(c.is_dirty());
    }

    #[test]
    fn move_up_first_item_is_noop() {
        let mut c = projects(&[1, 2, 3]);
        assert!(!c.move_up(1));
        assert_eq!(c.ids(), vec![1, 2, 3]);
        assert!(!c.is_dirty());
    }

    #[test]
    fn move_down_last_item_is_noop() {
        let mut c = projects(&[1, 2, 3]);
        assert!(!c.move_down(3));
        assert_eq!(c.ids(), vec![1, 2, 3]);
        assert!(!c.is_dirty());
    }

    #[test]
    fn unknown_id_is_silently_ignored() {
        let mut c = photos(&[(1, true), (2, false)]);
        assert!(!c.move_up(42));
        assert!(!c.move_down(42));
        assert!(!c.set_primary(42));
        assert!(c.remove(42).is_none());
        assert_eq!(c.ids(), vec![1, 2]);
        assert!(!c.is_dirty());
    }

    #[test]
    fn item_below_primary_cannot_move_up() {
        let mut c = photos(&[(1, true), (2, false), (3, false)]);
        assert!(!c.move_up(2));
        assert_eq!(c.ids(), vec![1, 2, 3]);
        assert!(!c.is_dirty());
    }

    #[test]
    fn item_can_move_into_first_position_when_no_primary() {
        let mut c = photos(&[(1, false), (2, false)]);
        assert!(c.move_up(2));
        assert_eq!(c.ids(), vec![2, 1]);
    }

    #[test]
    fn project_collections_have_no_pin() {
        let mut c = projects(&[1, 2]);
        assert!(c.move_up(2));
        assert_eq!(c.ids(), vec![2, 1]);
    }

    #[test]
    fn move_up_then_down_restores_order() {
        for id in [2, 3, 4] {
            let mut c = projects(&[1, 2, 3, 4]);
            c.move_up(id);
            c.move_down(id);
            assert_eq!(c.ids(), vec![1, 2, 3, 4], "round trip for {id}");
        }

        let mut c = photos(&[(1, true), (2, false), (3, false)]);
        c.move_up(3);
        c.move_down(3);
        assert_eq!(c.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn move_up_then_down_at_pinned_boundary_does_not_restore() {
        // Position 1 under a primary cannot move up, so the following
        // move_down pushes it further away.
        let mut c = photos(&[(1, true), (2, false), (3, false)]);
        c.move_up(2);
        c.move_down(2);
        assert_eq!(c.ids(), vec![1, 3, 2]);
    }

    #[test]
    fn primary_cannot_move_down() {
        let mut c = photos(&[(1, true), (2, false), (3, false)]);
        assert!(!c.move_down(1));
        assert_eq!(c.ids(), vec![1, 2, 3]);
        assert_eq!(primaries(&c), vec![1]);
        assert!(!c.is_dirty());
    }

    #[test]
    fn non_primary_first_item_can_move_down() {
        let mut c = photos(&[(1, false), (2, false), (3, false)]);
        assert!(c.move_down(1));
        assert_eq!(c.ids(), vec![2, 1, 3]);
    }

    // -- set primary ----------------------------------------------------------

    #[test]
    fn set_primary_moves_target_to_front() {
        let mut c = photos(&[(1, true), (2, false), (3, false)]);
        assert!(c.set_primary(3));
        assert_eq!(c.ids(), vec![3, 1, 2]);
        assert_eq!(primaries(&c), vec![3]);
        assert!(c.is_dirty());
    }

    #[test]
    fn set_primary_on_current_primary_is_noop() {
        let mut c = photos(&[(1, true), (2, false)]);
        assert!(!c.set_primary(1));
        assert!(!c.is_dirty());
    }

    #[test]
    fn set_primary_ignored_for_projects() {
        let mut c = projects(&[1, 2]);
        assert!(!c.set_primary(2));
        assert_eq!(c.ids(), vec![1, 2]);
    }

    #[test]
    fn exactly_one_primary_after_any_set_primary_sequence() {
        let mut c = photos(&[(1, false), (2, false), (3, false), (4, false)]);
        for id in [3, 1, 4, 4, 2, 3, 1] {
            c.set_primary(id);
            assert_eq!(primaries(&c), vec![id]);
            assert_eq!(c.items()[0].id, id);
        }
        let mut sorted = c.ids();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4]);
    }

    #[test]
    fn normalize_returns_demoted_item_to_its_rank() {
        let mut c = OrderedCollection::from_rows(vec![
            photo(1, 1, true),
            photo(2, 2, false),
            photo(3, 3, true),
        ]);
        assert_eq!(c.ids(), vec![1, 3, 2]);
        assert!(c.normalize_primary());
        assert_eq!(c.ids(), vec![1, 2, 3]);
        let flags: Vec<bool> = c.save_plan().iter().map(|u| u.is_primary).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn normalize_on_clean_rows_changes_nothing() {
        let mut c = photos(&[(1, true), (2, false)]);
        assert!(!c.normalize_primary());
        assert!(!c.is_dirty());
    }

    #[test]
    fn normalize_keeps_first_primary_only() {
        let mut c = OrderedCollection::from_rows(vec![
            photo(1, 2, true),
            photo(2, 1, true),
            photo(3, 3, false),
        ]);
        assert!(c.normalize_primary());
        assert_eq!(c.ids(), vec![2, 1, 3]);
        assert_eq!(primaries(&c), vec![2]);
        assert!(c.is_dirty());
    }

    // -- batches --------------------------------------------------------------

    #[test]
    fn validate_ops_rejects_unknown_ids() {
        let c = photos(&[(1, true), (2, false)]);
        let err = c
            .validate_ops(&[OrderOp::MoveDown { id: 1 }, OrderOp::MoveUp { id: 99 }])
            .unwrap_err();
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn validate_ops_rejects_set_primary_on_projects() {
        let c = projects(&[1, 2]);
        assert!(c.validate_ops(&[OrderOp::SetPrimary { id: 2 }]).is_err());
        assert!(c.validate_ops(&[OrderOp::MoveUp { id: 2 }]).is_ok());
    }

    #[test]
    fn apply_all_counts_effective_ops() {
        let mut c = photos(&[(1, true), (2, false), (3, false)]);
        let changed = c.apply_all(&[
            OrderOp::MoveUp { id: 2 },
            OrderOp::MoveDown { id: 2 },
            OrderOp::SetPrimary { id: 2 },
        ]);
        assert_eq!(changed, 2);
        assert_eq!(c.ids(), vec![2, 1, 3]);
    }

    #[test]
    fn order_op_deserializes_from_tagged_json() {
        let op: OrderOp = serde_json::from_str(r#"{"op":"set_primary","id":7}"#).unwrap();
        assert_eq!(op, OrderOp::SetPrimary { id: 7 });

        let ops: Vec<OrderOp> =
            serde_json::from_str(r#"[{"op":"move_up","id":1},{"op":"move_down","id":2}]"#)
                .unwrap();
        assert_eq!(ops, vec![OrderOp::MoveUp { id: 1 }, OrderOp::MoveDown { id: 2 }]);
    }

    // -- add / remove ---------------------------------------------------------

    #[test]
    fn next_slot_for_new_items() {
        let empty: OrderedCollection<Photo> = OrderedCollection::from_rows(Vec::new());
        assert_eq!(empty.next_display_order(), 1);
        assert!(empty.next_is_primary());

        let c = OrderedCollection::from_rows(vec![photo(1, 4, true), photo(2, 9, false)]);
        assert_eq!(c.next_display_order(), 10);
        assert!(!c.next_is_primary());

        let p: OrderedCollection<Project> = OrderedCollection::from_rows(Vec::new());
        assert!(!p.next_is_primary());
    }

    #[test]
    fn first_photo_added_becomes_primary() {
        let mut c: OrderedCollection<Photo> = OrderedCollection::from_rows(Vec::new());
        c.add(photo(1, 1, false));
        c.add(photo(2, 2, false));
        assert_eq!(primaries(&c), vec![1]);
        assert_eq!(c.ids(), vec![1, 2]);
    }

    #[test]
    fn removing_primary_promotes_new_first() {
        let mut c = photos(&[(1, true), (2, false), (3, false)]);
        let removal = c.remove(1).expect("present");
        assert_eq!(removal.item.id, 1);
        assert_eq!(removal.promoted, Some(2));
        assert_eq!(c.ids(), vec![2, 3]);
        assert_eq!(primaries(&c), vec![2]);
    }

    #[test]
    fn removing_non_primary_promotes_nothing() {
        let mut c = photos(&[(1, true), (2, false), (3, false)]);
        let removal = c.remove(3).expect("present");
        assert_eq!(removal.promoted, None);
        assert_eq!(primaries(&c), vec![1]);
    }

    #[test]
    fn removing_last_photo_promotes_nothing() {
        let mut c = photos(&[(1, true)]);
        let removal = c.remove(1).expect("present");
        assert_eq!(removal.promoted, None);
        assert!(c.is_empty());
    }

    // -- save -----------------------------------------------------------------

    #[test]
    fn save_plan_assigns_sequential_ranks() {
        let mut c = photos(&[(10, true), (20, false), (30, false), (40, false)]);
        c.move_down(30);
        c.set_primary(40);
        let plan = c.save_plan();
        assert_eq!(
            plan,
            vec![
                RankUpdate { id: 40, display_order: 1, is_primary: true },
                RankUpdate { id: 10, display_order: 2, is_primary: false },
                RankUpdate { id: 20, display_order: 3, is_primary: false },
                RankUpdate { id: 30, display_order: 4, is_primary: false },
            ]
        );
    }

    #[test]
    fn saved_order_survives_refetch() {
        let mut c = photos(&[(1, true), (2, false), (3, false), (4, false)]);
        c.move_up(4);
        c.move_up(4);
        c.set_primary(3);
        let expected = c.ids();

        let plan = c.save_plan();
        let mut refetched: Vec<Photo> = plan
            .iter()
            .rev()
            .map(|u| photo(u.id, u.display_order, u.is_primary))
            .collect();
        sort_default(&mut refetched);
        let ids: Vec<DbId> = refetched.iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn pinned_primary_survives_save_and_reload() {
        let mut c = photos(&[(1, true), (2, false), (3, false)]);
        c.move_down(1);
        c.move_down(2);
        let expected = c.ids();
        assert_eq!(expected, vec![1, 3, 2]);

        let reloaded = OrderedCollection::from_rows(
            c.save_plan()
                .iter()
                .map(|u| photo(u.id, u.display_order, u.is_primary))
                .collect(),
        );
        assert_eq!(reloaded.ids(), expected);
        assert_eq!(primaries(&reloaded), vec![1]);
    }

    #[test]
    fn mark_saved_clears_dirty_and_syncs_ranks() {
        let mut c = projects(&[5, 6, 7]);
        c.move_up(7);
        assert!(c.is_dirty());
        c.mark_saved();
        assert!(!c.is_dirty());
        let orders: Vec<i32> = c.items().iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(c.ids(), vec![5, 7, 6]);
    }

    #[test]
    fn project_plan_never_marks_primary() {
        let c = projects(&[1, 2]);
        assert!(c.save_plan().iter().all(|u| !u.is_primary));
    }
}
