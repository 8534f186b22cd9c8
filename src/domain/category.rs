use std::fmt;

pub const BASE_URL: &str = "https://api.henpro.fun/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Series,
    Uncensored,
    Harem,
    SchoolGirls,
    LargeBreasts,
}

impl Category {
    // series first, then the genres
    pub const ALL: [Category; 5] = [
        Category::Series,
        Category::Uncensored,
        Category::Harem,
        Category::SchoolGirls,
        Category::LargeBreasts,
    ];

    pub fn genre_tag(self) -> Option<&'static str> {
        match self {
            Category::Series => None,
            Category::Uncensored => Some("uncensored"),
            Category::Harem => Some("harem"),
            Category::SchoolGirls => Some("school-girls"),
            Category::LargeBreasts => Some("large-breasts"),
        }
    }

    pub fn url(self) -> String {
        match self.genre_tag() {
            None => format!("{BASE_URL}/series"),
            Some(tag) => format!("{BASE_URL}/genre?genre={tag}"),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.genre_tag().unwrap_or("series"))
    }
}
