// src/domain/tasks.rs

use std::collections::BTreeMap;

/// The fixed first-week plan: seven days, three tasks each.
pub const DAY_TASKS: [[&str; 3]; 7] = [
    [
        "Pick 2–3 hot ZIPs via Privy Investor Activity",
        "Create saved searches + alerts",
        "Seed buyers list from recent flips",
    ],
    [
        "Comp 15–25 properties (Live CMA)",
        "Compute MAO, call 20 agents",
        "Send 8–12 offers",
    ],
    [
        "Follow up on offers",
        "Expand buyers list (10+)",
        "Add 8–12 more offers",
    ],
    [
        "Re-comp countered deals",
        "Negotiate + tighten timelines",
        "Aim for 2–3 acceptances/counters",
    ],
    [
        "Get a contract signed",
        "Dispo: blast buyers + schedule showings",
        "Book 3–5 walkthroughs",
    ],
    [
        "Showings + best-and-final",
        "Select reliable buyer + EMD",
        "Line up backup buyer",
    ],
    [
        "Title/attorney coordination",
        "Confirm closing date + access",
        "Prep next week's pipeline",
    ],
];

/// Day number (1-based) → one flag per task slot.
pub type TaskBoard = BTreeMap<u8, Vec<bool>>;

pub fn slots_for(day: u8) -> Option<&'static [&'static str; 3]> {
    DAY_TASKS.get(usize::from(day).checked_sub(1)?)
}

pub fn is_done(board: &TaskBoard, day: u8, slot: usize) -> bool {
    board
        .get(&day)
        .and_then(|flags| flags.get(slot))
        .copied()
        .unwrap_or(false)
}

/// Set one checkbox. Returns false when the day or slot is not in the plan.
pub fn set_task(board: &mut TaskBoard, day: u8, slot: usize, checked: bool) -> bool {
    let Some(tasks) = slots_for(day) else {
        return false;
    };
    if slot >= tasks.len() {
        return false;
    }
    let flags = board.entry(day).or_default();
    if flags.len() <= slot {
        flags.resize(slot + 1, false);
    }
    flags[slot] = checked;
    true
}

/// Whole-number percentage of plan tasks checked.
pub fn progress_percent(board: &TaskBoard) -> u32 {
    let mut total = 0u32;
    let mut done = 0u32;
    for (idx, tasks) in DAY_TASKS.iter().enumerate() {
        let day = (idx + 1) as u8;
        for slot in 0..tasks.len() {
            total += 1;
            if is_done(board, day, slot) {
                done += 1;
            }
        }
    }
    if total == 0 {
        return 0;
    }
    (f64::from(done) / f64::from(total) * 100.0).round() as u32
}
