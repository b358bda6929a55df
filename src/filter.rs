//! In-memory filtering, sorting, and pagination over a movie list.
//!
//! This is the fallback path used when remote filtering is unavailable;
//! the remote equivalent lives in `TmdbClient::get_filtered_movies`.

use crate::models::{FilterCriteria, Movie, SortKey};
use std::cmp::Ordering;

pub const PAGE_SIZE: usize = 20;

/// The catalog refuses to paginate past this point.
pub const MAX_TOTAL_PAGES: u32 = 500;

/// One page of locally filtered results plus the pre-pagination total.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPage {
    pub movies: Vec<Movie>,
    pub total: usize,
}

/// Year component of an ISO-like `YYYY-MM-DD` date string.
pub fn release_year(date: &str) -> Option<i32> {
    date.split('-').next().and_then(|y| y.parse().ok())
}

pub fn total_pages(total: usize, page_size: usize) -> u32 {
    let pages = total.div_ceil(page_size) as u32;
    pages.clamp(1, MAX_TOTAL_PAGES)
}

/// Applies category, year, rating, and text predicates in order, sorts
/// per the criteria's key, and slices out the requested page window.
pub fn apply_local_filters(candidates: &[Movie], criteria: &FilterCriteria) -> LocalPage {
    let mut result: Vec<Movie> = candidates.to_vec();

    if let Some(category_id) = criteria.category_id {
        result.retain(|movie| movie.genre_ids.contains(&category_id));
    }

    if let Some(year) = criteria.year {
        result.retain(|movie| release_year(&movie.release_date) == Some(year));
    }

    if let Some(min_rating) = criteria.min_rating {
        result.retain(|movie| movie.vote_average >= min_rating);
    }

    let query = criteria.search.trim().to_lowercase();
    if !query.is_empty() {
        result.retain(|movie| {
            movie.title.to_lowercase().contains(&query)
                || movie.overview.to_lowercase().contains(&query)
        });
    }

    if let Some(sort) = criteria.sort {
        sort_movies(&mut result, sort);
    }

    let total = result.len();
    let page = criteria.page.max(1) as usize;
    let start = (page - 1) * PAGE_SIZE;
    let movies = result.into_iter().skip(start).take(PAGE_SIZE).collect();

    LocalPage { movies, total }
}

fn sort_movies(movies: &mut [Movie], key: SortKey) {
    match key {
        SortKey::PopularityDesc => {
            movies.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
        }
        SortKey::TitleAsc => movies.sort_by(|a, b| title_cmp(a, b)),
        SortKey::TitleDesc => movies.sort_by(|a, b| title_cmp(b, a)),
        SortKey::YearAsc => movies.sort_by_key(|m| release_year(&m.release_date).unwrap_or(0)),
        SortKey::YearDesc => {
            movies.sort_by_key(|m| std::cmp::Reverse(release_year(&m.release_date).unwrap_or(0)));
        }
        SortKey::RatingAsc => {
            movies.sort_by(|a, b| a.vote_average.total_cmp(&b.vote_average));
        }
        SortKey::RatingDesc => {
            movies.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));
        }
    }
}

// Case-insensitive title ordering; ties fall back to the raw titles so
// equal-ignoring-case titles still compare deterministically.
fn title_cmp(a: &Movie, b: &Movie) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}
