use serde::{Deserialize, Serialize};

/// One entry of the festival programme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestEvent {
    pub title: String,
    pub description: String,
    /// Human-readable slot, e.g. "Day 1 - 10:00 AM"
    pub schedule: String,
}

impl FestEvent {
    fn new(title: &str, description: &str, schedule: &str) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            schedule: schedule.into(),
        }
    }
}

/// Ordered list of events that accept registrations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCatalog {
    pub events: Vec<FestEvent>,
}

impl EventCatalog {
    /// The festival's published programme
    pub fn festival() -> Self {
        Self {
            events: vec![
                FestEvent::new(
                    "Hackathon",
                    "24-hour coding challenge to build innovative solutions",
                    "Day 1 - 10:00 AM",
                ),
                FestEvent::new(
                    "Robotics Workshop",
                    "Hands-on experience with cutting-edge robotics",
                    "Day 2 - 2:00 PM",
                ),
                FestEvent::new(
                    "Tech Talks",
                    "Industry experts sharing insights on latest technologies",
                    "Day 3 - 11:00 AM",
                ),
            ],
        }
    }

    /// Headline figures shown next to the programme
    pub fn highlights() -> &'static [&'static str] {
        &[
            "₹5L+ Prize Pool",
            "5000+ Participants",
            "50+ Universities",
            "20+ Events",
        ]
    }

    /// Venue address, one line per entry
    pub fn location() -> &'static [&'static str] {
        &[
            "University Main Campus",
            "Innovation Center, Tech Block",
            "1234 University Drive",
        ]
    }

    /// Organizer email and phone
    pub fn contact() -> &'static [&'static str] {
        &["info@techfest2025.com", "+1 (555) 123-4567"]
    }

    /// Event for a 1-based menu slot
    pub fn by_slot(&self, slot: usize) -> Option<&FestEvent> {
        slot.checked_sub(1).and_then(|i| self.events.get(i))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
