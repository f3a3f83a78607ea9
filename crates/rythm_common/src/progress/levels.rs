//! Level System
//!
//! Flat curve: every level costs the same amount of XP.
//!
//! level = floor(xp / 100) + 1
//!
//! - 0..=99 XP     → level 1
//! - 100..=199 XP  → level 2
//! - negative XP (only reachable through negative grants) floors below 1

/// XP needed to advance one level
pub const XP_PER_LEVEL: i64 = 100;

/// Level derived from total XP. This is the only place a level is computed.
pub fn level_for_xp(xp: i64) -> i64 {
    xp.div_euclid(XP_PER_LEVEL) + 1
}

/// Total XP at which `level` starts
pub fn xp_for_level(level: i64) -> i64 {
    (level - 1) * XP_PER_LEVEL
}

/// XP earned inside the current level
pub fn xp_into_level(xp: i64) -> i64 {
    xp.rem_euclid(XP_PER_LEVEL)
}

/// XP still missing before the next level
pub fn xp_to_next_level(xp: i64) -> i64 {
    XP_PER_LEVEL - xp_into_level(xp)
}

/// Progress to the next level as a percentage (0-99)
pub fn progress_percent(xp: i64) -> u8 {
    (xp_into_level(xp) * 100 / XP_PER_LEVEL) as u8
}
