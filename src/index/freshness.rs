const MINUTE: i64 = 60;
const HOUR: i64 = 3600;
const DAY: i64 = 24 * 3600;
const MONTH: i64 = 30 * 24 * 3600;

/// Age bucket for an artifact. Tier 1 is the oldest, tier 5 the most
/// recent; display colors get hotter with the tier number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Freshness {
    pub tier: u8,
    pub desc: String,
}

/// Bucket an age in seconds, first match wins.
///
/// A negative age (artifact modified in the future) falls through to the
/// seconds tier with the raw value; no clamping.
pub fn classify(diff: i64) -> Freshness {
    if diff > 60 * DAY {
        Freshness {
            tier: 1,
            desc: format!("{}+ months ago", diff / MONTH),
        }
    } else if diff > 2 * DAY {
        Freshness {
            tier: 2,
            desc: format!("{}+ days ago", diff / DAY),
        }
    } else if diff > 2 * HOUR {
        Freshness {
            tier: 3,
            desc: format!("{}+ hours ago", diff / HOUR),
        }
    } else if diff > 2 * MINUTE {
        Freshness {
            tier: 4,
            desc: format!("{}+ minutes ago", diff / MINUTE),
        }
    } else {
        Freshness {
            tier: 5,
            desc: format!("{diff} seconds ago"),
        }
    }
}

/// A newest version carrying a single artifact for the fast-building
/// architecture usually means the other builds have not landed yet.
///
/// Packages that only ever target the fast architecture trip this flag
/// permanently; known approximation.
pub fn is_delayed(artifacts: &[(String, String)], fast_arch: &str) -> bool {
    artifacts.len() == 1 && artifacts[0].0 == fast_arch
}
