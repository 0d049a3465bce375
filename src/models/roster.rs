use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// One activity as served by the roster store. Participant order is
/// insertion order and doubles as display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity. Negative when the store let the activity
    /// overfill; callers render the value as-is.
    pub fn spots_left(&self) -> i64 {
        self.max_participants - self.participants.len() as i64
    }
}

/// The full roster, in the order the store returned it. Replaced wholesale
/// by the loader; individual participant sequences are edited by the
/// mutation services after the store acknowledges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub activities: Vec<Activity>,
}

impl Roster {
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn activity(&self, name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name == name)
    }

    pub fn activity_mut(&mut self, name: &str) -> Option<&mut Activity> {
        self.activities.iter_mut().find(|a| a.name == name)
    }
}

#[derive(Debug, Deserialize)]
struct ActivityWire {
    description: String,
    schedule: String,
    max_participants: i64,
    participants: Vec<String>,
}

// The wire format is a JSON object keyed by activity name. serde maps would
// reorder it, so walk the object entries ourselves to keep server order.
impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RosterVisitor;

        impl<'de> Visitor<'de> for RosterVisitor {
            type Value = Roster;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity name to activity details")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Roster, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut activities = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, wire)) = map.next_entry::<String, ActivityWire>()? {
                    activities.push(Activity {
                        name,
                        description: wire.description,
                        schedule: wire.schedule,
                        max_participants: wire.max_participants,
                        participants: wire.participants,
                    });
                }
                Ok(Roster { activities })
            }
        }

        deserializer.deserialize_map(RosterVisitor)
    }
}
