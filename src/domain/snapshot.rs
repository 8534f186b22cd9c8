use super::category::Category;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

pub const MAX_ITEMS: usize = 14;
pub const REFRESH_EVERY: Duration = Duration::from_secs(60 * 60);

pub type Item = serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenreItems {
    #[serde(default)]
    pub uncensored: Vec<Item>,
    #[serde(default)]
    pub harem: Vec<Item>,
    #[serde(default, rename = "school-girls")]
    pub school_girls: Vec<Item>,
    #[serde(default, rename = "large-breasts")]
    pub large_breasts: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub series: Vec<Item>,
    #[serde(default)]
    pub genre: GenreItems,
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl Snapshot {
    #[cfg(test)]
    pub fn items(&self, category: Category) -> &[Item] {
        match category {
            Category::Series => &self.series,
            Category::Uncensored => &self.genre.uncensored,
            Category::Harem => &self.genre.harem,
            Category::SchoolGirls => &self.genre.school_girls,
            Category::LargeBreasts => &self.genre.large_breasts,
        }
    }

    pub fn slot_mut(&mut self, category: Category) -> &mut Vec<Item> {
        match category {
            Category::Series => &mut self.series,
            Category::Uncensored => &mut self.genre.uncensored,
            Category::Harem => &mut self.genre.harem,
            Category::SchoolGirls => &mut self.genre.school_girls,
            Category::LargeBreasts => &mut self.genre.large_breasts,
        }
    }
}
