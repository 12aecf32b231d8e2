//! Fixed vocabularies the generator draws from.

/// Skills a generated user may list on their profile.
pub const SKILL_CATALOGUE: [&str; 12] = [
    "First Aid",
    "Graphic Design",
    "Public Speaking",
    "Data Entry",
    "Event Planning",
    "Fundraising",
    "Social Media",
    "Driving",
    "Cooking",
    "Teaching",
    "Manual Labor",
    "Photography",
];

pub(crate) const EVENT_ACTIVITIES: [&str; 10] = [
    "Beach Cleanup",
    "Food Bank Shift",
    "Tree Planting",
    "Charity Fun Run",
    "Library Book Sort",
    "Community Garden Day",
    "Animal Shelter Walk",
    "Soup Kitchen Service",
    "Park Restoration",
    "Clothing Drive",
];

pub(crate) const EVENT_PURPOSES: [&str; 6] = [
    "Bring gloves and a water bottle.",
    "No experience needed; we will train you on the day.",
    "Families and first-time volunteers are welcome.",
    "Lunch is provided for everyone who helps out.",
    "Wear clothes you do not mind getting dirty.",
    "Meet at the main entrance ten minutes before the start.",
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn skill_catalogue_has_no_duplicates() {
        let unique: HashSet<_> = SKILL_CATALOGUE.iter().collect();
        assert_eq!(unique.len(), SKILL_CATALOGUE.len());
    }
}
