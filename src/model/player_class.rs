use crate::model::world::ItemCounts;

/// A starter class chosen when a new run begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerClass {
    pub id: &'static str,
    pub name: &'static str,
    pub blurb: &'static str,
    pub max_hp: i32,
    pub max_stamina: i32,
    pub starting_items: &'static [(&'static str, u32)],
}

impl PlayerClass {
    pub fn starting_items(&self) -> ItemCounts {
        self.starting_items
            .iter()
            .map(|(id, qty)| ((*id).to_string(), *qty))
            .collect()
    }
}

const CLASSES: &[PlayerClass] = &[
    PlayerClass {
        id: "wanderer",
        name: "Wanderer",
        blurb: "Balanced and stubborn. Good at surviving bad plans.",
        max_hp: 10,
        max_stamina: 6,
        starting_items: &[("stick", 1), ("fiber", 1)],
    },
    PlayerClass {
        id: "scrapper",
        name: "Scrapper",
        blurb: "A pocket full of junk and a head full of angles.",
        max_hp: 9,
        max_stamina: 7,
        starting_items: &[("scrap", 2), ("fiber", 1)],
    },
    PlayerClass {
        id: "scout",
        name: "Scout",
        blurb: "Fast feet, sharp eyes. The road is a puzzle you solve by moving.",
        max_hp: 8,
        max_stamina: 8,
        starting_items: &[("fiber", 2), ("stone", 1), ("stick", 1)],
    },
];

pub fn all() -> &'static [PlayerClass] {
    CLASSES
}

pub fn find(id: &str) -> Option<&'static PlayerClass> {
    CLASSES.iter().find(|c| c.id == id)
}

/// Name shown in the HUD and the save index. Unknown ids are shown raw.
pub fn display_name(class_id: Option<&str>) -> String {
    match class_id {
        Some(id) => find(id).map(|c| c.name).unwrap_or(id).to_string(),
        None => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_have_distinct_ids() {
        let ids: Vec<_> = all().iter().map(|c| c.id).collect();
        assert_eq!(ids, ["wanderer", "scrapper", "scout"]);
    }

    #[test]
    fn scout_starts_light_and_fast() {
        let scout = find("scout").expect("scout exists");
        assert_eq!((scout.max_hp, scout.max_stamina), (8, 8));
        assert_eq!(scout.starting_items().get("fiber"), Some(&2));
    }

    #[test]
    fn display_name_handles_missing_and_unknown_classes() {
        assert_eq!(display_name(None), "None");
        assert_eq!(display_name(Some("scrapper")), "Scrapper");
        assert_eq!(display_name(Some("bard")), "bard");
    }
}
