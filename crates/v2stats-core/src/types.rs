//! Domain types shared by the exporter crates.

use std::fmt;

/// A raw `(name, value)` pair as returned by the stats service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRecord {
    pub name: String,
    pub value: i64,
}

impl StatRecord {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Which kind of entity a stat belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    User,
    Inbound,
}

impl Category {
    /// The name segment used by V2Ray, also used as the `type` label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::User => "user",
            Category::Inbound => "inbound",
        }
    }

    pub fn from_segment(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Category::User),
            "inbound" => Some(Category::Inbound),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traffic direction of a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Uplink,
    Downlink,
}

impl Direction {
    /// The literal used in stat names (`uplink` / `downlink`).
    pub fn literal(&self) -> &'static str {
        match self {
            Direction::Uplink => "uplink",
            Direction::Downlink => "downlink",
        }
    }

    /// The short form used in metric names and the `traffic` label.
    pub fn short(&self) -> &'static str {
        match self {
            Direction::Uplink => "up",
            Direction::Downlink => "down",
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        match s {
            "uplink" => Some(Direction::Uplink),
            "downlink" => Some(Direction::Downlink),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

/// Direction segment of a parsed name.
///
/// An unrecognized token is not a parse error; the caller decides whether
/// to drop the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionToken {
    Known(Direction),
    Unrecognized(String),
}

/// A decoded stat name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub category: Category,
    /// Used verbatim: case-sensitive, whitespace-significant.
    pub identity: String,
    pub direction: DirectionToken,
}

/// Identity of a tracked entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey {
    pub category: Category,
    pub identity: String,
}

impl EntityKey {
    pub fn new(category: Category, identity: impl Into<String>) -> Self {
        Self {
            category,
            identity: identity.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.identity)
    }
}

/// Cumulative counters for one entity.
///
/// `last_*` normally trails `*_total`, but a backend restart can make the
/// totals drop below the watermark. That case is tolerated, not rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficRecord {
    pub up_total: i64,
    pub down_total: i64,
    pub last_up: i64,
    pub last_down: i64,
}

impl TrafficRecord {
    pub fn total(&self, direction: Direction) -> i64 {
        match direction {
            Direction::Uplink => self.up_total,
            Direction::Downlink => self.down_total,
        }
    }

    pub fn watermark(&self, direction: Direction) -> i64 {
        match direction {
            Direction::Uplink => self.last_up,
            Direction::Downlink => self.last_down,
        }
    }
}

/// Increments attributed to one poll interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficDelta {
    pub up: i64,
    pub down: i64,
}

impl TrafficDelta {
    pub fn get(&self, direction: Direction) -> i64 {
        match direction {
            Direction::Uplink => self.up,
            Direction::Downlink => self.down,
        }
    }
}
