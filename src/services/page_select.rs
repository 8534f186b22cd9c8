use rand::Rng;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PagePolicy {
    #[default]
    Inclusive,
    // never the last page, unless it is the only one
    ExclusiveLast,
}

impl FromStr for PagePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inclusive" => Ok(PagePolicy::Inclusive),
            "exclusive-last" | "exclusive_last" => Ok(PagePolicy::ExclusiveLast),
            other => Err(AppError::Config(format!("unknown page policy `{other}`"))),
        }
    }
}

/// Picks a 1-based page. Counts of zero or below count as a single page.
pub fn select_page<R: Rng + ?Sized>(policy: PagePolicy, total_pages: i64, rng: &mut R) -> u64 {
    let total = total_pages.max(1) as u64;
    let upper = match policy {
        PagePolicy::Inclusive => total,
        PagePolicy::ExclusiveLast => (total - 1).max(1),
    };
    rng.gen_range(1..=upper)
}
