//! Ordering engine
//!
//! Computes the persisted effect of a single-item drag: the relocated
//! sequence plus the minimal set of position updates that keeps sibling
//! positions a dense zero-based permutation. Pure; applying the plan (and
//! rolling it back when the commit fails) is the session's job.

use cuelist_core::{CuelistError, Result};

/// The outcome of planning a relocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan<T> {
    /// The full sequence in its new order
    pub order: Vec<T>,
    /// `(entity, new position)` for exactly the entities whose position
    /// changed; empty for a no-op relocation
    pub updates: Vec<(T, u32)>,
}

/// Plan moving the entity at `from` so it lands at `to`.
///
/// `from == to` yields the unchanged sequence and an empty update batch.
/// Indexes outside the sequence are a validation error.
pub fn plan_reorder<T: Clone + Eq>(current: &[T], from: usize, to: usize) -> Result<ReorderPlan<T>> {
    if from >= current.len() || to >= current.len() {
        return Err(CuelistError::validation(format!(
            "reorder indexes ({from}, {to}) out of range for {} entries",
            current.len()
        )));
    }

    let mut order = current.to_vec();
    let moved = order.remove(from);
    order.insert(to, moved);

    let updates = order
        .iter()
        .enumerate()
        .filter(|(position, entity)| current[*position] != **entity)
        .map(|(position, entity)| (entity.clone(), position as u32))
        .collect();

    Ok(ReorderPlan { order, updates })
}
