//! Candidate domain generation.
//!
//! Every exam shares the same domain: one slot per (day, start time,
//! non-empty hall subset).  The domain holds
//! `days * start_times * (2^halls - 1)` slots, so it is only tractable
//! for small hall inventories.

use log::{debug, warn};

use crate::model::{Hall, ScheduleSlot};
use crate::SchedulerConfig;

/// Hall count above which the domain is too large to search in practice.
pub const PRACTICAL_HALL_LIMIT: usize = 16;

/// Enumerate every candidate slot of a term.
///
/// Days run consecutively from `config.term_start`.  Within one start
/// time, hall subsets are listed by increasing size, and in inventory
/// order within one size.
///
/// # Examples
///
/// ```
/// use exam_scheduler::model::Hall;
/// use exam_scheduler::slots::generate_slots;
/// use exam_scheduler::SchedulerConfig;
///
/// let halls = [Hall::new("A", 40), Hall::new("B", 60)];
/// let slots = generate_slots(&SchedulerConfig::default(), 2, &halls);
/// assert_eq!(slots.len(), 2 * 4 * 3);
/// ```
pub fn generate_slots(config: &SchedulerConfig, duration_days: u32, halls: &[Hall]) -> Vec<ScheduleSlot> {
    if halls.len() > PRACTICAL_HALL_LIMIT {
        warn!(
            "{} halls give {} subsets per start time; the search will not finish",
            halls.len(),
            subset_count(halls.len()).map_or_else(|| "too many".to_owned(), |n| n.to_string())
        );
    }

    let subsets = hall_subsets(halls);
    let mut slots = Vec::with_capacity(
        duration_days as usize * config.start_times.len() * subsets.len(),
    );

    for day in config.term_start.iter_days().take(duration_days as usize) {
        for &time in config.start_times.iter() {
            let start = day.and_time(time);
            slots.extend(
                subsets
                    .iter()
                    .filter_map(|subset| ScheduleSlot::new(start, subset.iter().cloned())),
            );
        }
    }

    debug!("generated {} candidate slots", slots.len());
    slots
}

/// The number of slots `generate_slots` produces, or `None` on overflow.
pub fn domain_size(duration_days: u32, start_time_count: usize, hall_count: usize) -> Option<u64> {
    subset_count(hall_count)?
        .checked_mul(u64::from(duration_days))?
        .checked_mul(start_time_count as u64)
}

/// The number of non-empty subsets of `n` halls.
fn subset_count(n: usize) -> Option<u64> {
    let n = u32::try_from(n).ok()?;
    1u64.checked_shl(n).map(|total| total - 1)
}

/// All non-empty subsets of the inventory, smallest first.
fn hall_subsets(halls: &[Hall]) -> Vec<Vec<Hall>> {
    let mut subsets = Vec::new();
    for size in 1..=halls.len() {
        combinations(halls.len(), size, |indices| {
            subsets.push(indices.iter().map(|&i| halls[i].clone()).collect());
        });
    }

    subsets
}

/// Call `f` with each `k`-combination of `0..n`, in lexicographic order.
fn combinations<F: FnMut(&[usize])>(n: usize, k: usize, mut f: F) {
    if k == 0 || k > n {
        return;
    }

    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        f(&indices);

        // Find the rightmost index that can still move right.
        let mut i = k;
        loop {
            if i == 0 {
                return;
            }
            i -= 1;
            if indices[i] != i + n - k {
                break;
            }
        }

        indices[i] += 1;
        for j in (i + 1)..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}
