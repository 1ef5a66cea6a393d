use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl Activity {
    pub fn spots_left(&self) -> u32 {
        self.max_participants
            .saturating_sub(self.participants.len() as u32)
    }
}

/// Name -> Activity mapping that keeps the order of the server response,
/// which drives both the card list and the select options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activities(Vec<(String, Activity)>);

impl Activities {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.0
            .iter()
            .map(|(name, activity)| (name.as_str(), activity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Activity)> for Activities {
    fn from_iter<I: IntoIterator<Item = (String, Activity)>>(entries: I) -> Self {
        Self(entries.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Activities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Activities;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of activity name to activity details")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Activity>()? {
                    entries.push(entry);
                }
                Ok(Activities(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct ActionResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: MessageKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_preserves_response_order() {
        let body = r#"{
            "Chess Club": {
                "description": "Weekly games",
                "schedule": "Mondays",
                "max_participants": 12,
                "participants": ["bob@mergington.edu"]
            },
            "Art Workshop": {
                "description": "Painting",
                "schedule": "Tuesdays",
                "max_participants": 8,
                "participants": []
            },
            "Basketball Team": {
                "description": "Practice",
                "schedule": "Fridays",
                "max_participants": 15,
                "participants": []
            }
        }"#;

        let activities: Activities = serde_json::from_str(body).unwrap();
        let names: Vec<&str> = activities.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Chess Club", "Art Workshop", "Basketball Team"]);
        assert_eq!(activities.len(), 3);
        assert!(!activities.is_empty());
    }

    #[test]
    fn deserialize_rejects_missing_fields() {
        let body = r#"{"Chess Club": {"description": "Weekly games"}}"#;
        assert!(serde_json::from_str::<Activities>(body).is_err());
    }

    #[test]
    fn spots_left_subtracts_participants() {
        let activity = Activity {
            description: String::new(),
            schedule: String::new(),
            max_participants: 5,
            participants: vec!["a@mergington.edu".into(), "b@mergington.edu".into()],
        };
        assert_eq!(activity.spots_left(), 3);
    }

    #[test]
    fn spots_left_saturates_at_zero() {
        let activity = Activity {
            description: String::new(),
            schedule: String::new(),
            max_participants: 1,
            participants: vec!["a@mergington.edu".into(), "b@mergington.edu".into()],
        };
        assert_eq!(activity.spots_left(), 0);
    }
}
