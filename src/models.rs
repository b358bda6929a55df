use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: String,
    pub vote_average: f32,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub popularity: f32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieDetails {
    pub id: u32,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: String,
    pub runtime: u32,
    pub vote_average: f32,
    pub genres: Vec<String>,
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CastMember {
    pub id: u32,
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// One page of normalized list results, counts taken from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PopularityDesc,
    TitleAsc,
    TitleDesc,
    YearAsc,
    YearDesc,
    RatingAsc,
    RatingDesc,
}

impl SortKey {
    /// The catalog's `sort_by` value for discovery queries.
    pub fn sort_by_param(self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "popularity.desc",
            SortKey::TitleAsc => "original_title.asc",
            SortKey::TitleDesc => "original_title.desc",
            SortKey::YearAsc => "primary_release_date.asc",
            SortKey::YearDesc => "primary_release_date.desc",
            SortKey::RatingAsc => "vote_average.asc",
            SortKey::RatingDesc => "vote_average.desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub category_id: Option<u32>,
    pub year: Option<i32>,
    pub min_rating: Option<f32>,
    pub sort: Option<SortKey>,
    pub page: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            category_id: None,
            year: None,
            min_rating: None,
            sort: None,
            page: 1,
        }
    }
}
