//! Set reconciliation: split a desired question list against the identifiers
//! currently bound to a set.

use std::collections::HashMap;

/// Outcome of partitioning a desired list.
///
/// Every desired item lands in exactly one of `create`, `fix` or `dropped`.
/// `delete` holds existing identifiers that no desired item claimed, each
/// listed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    pub create: Vec<T>,
    pub fix: Vec<T>,
    pub delete: Vec<i64>,
    /// Items naming an identifier that is not (or no longer) bound to the set,
    /// or that repeat an identifier already claimed.
    pub dropped: Vec<T>,
}

impl<T> Partition<T> {
    pub fn is_noop(&self) -> bool {
        self.create.is_empty() && self.fix.is_empty() && self.delete.is_empty()
    }
}

/// Partition `desired` against `existing` membership.
///
/// Items without an identifier are creates. Items whose identifier still has
/// a positive count in the multiplicity map of `existing` are fixes, and
/// consume one count. Whatever count is left afterwards marks a delete.
pub fn partition<T, F>(existing: &[i64], desired: Vec<T>, id_of: F) -> Partition<T>
where
    F: Fn(&T) -> Option<i64>,
{
    let mut remaining: HashMap<i64, usize> = HashMap::with_capacity(existing.len());
    for id in existing {
        *remaining.entry(*id).or_insert(0) += 1;
    }

    let mut create = Vec::new();
    let mut fix = Vec::new();
    let mut dropped = Vec::new();

    for item in desired {
        match id_of(&item) {
            None => create.push(item),
            Some(id) => match remaining.get_mut(&id) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    fix.push(item);
                }
                _ => dropped.push(item),
            },
        }
    }

    // Walk `existing` rather than the map so delete order is deterministic.
    let mut delete = Vec::new();
    for id in existing {
        if let Some(count) = remaining.get_mut(id) {
            if *count > 0 {
                *count = 0;
                delete.push(*id);
            }
        }
    }

    Partition {
        create,
        fix,
        delete,
        dropped,
    }
}
