use crate::config::TmdbConfig;
use crate::models::{CastMember, Category, FilterCriteria, Movie, MovieDetails, PageResult, SortKey};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

const MAX_CAST: usize = 10;

/// Classified failures from the catalog API.
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("invalid API key")]
    InvalidApiKey,
    #[error("resource not found")]
    NotFound,
    #[error("rate limited by the catalog")]
    RateLimited,
    #[error("catalog server error (status {0})")]
    Server(u16),
    #[error("network unreachable: {0}")]
    Network(#[source] reqwest::Error),
    #[error("unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Copy)]
pub enum ImageKind {
    Poster,
    Backdrop,
    Profile,
}

#[derive(Debug, Clone, Copy)]
pub enum ImageSize {
    Small,
    Medium,
    Large,
}

fn image_variant(kind: ImageKind, size: ImageSize) -> &'static str {
    match (kind, size) {
        (ImageKind::Poster, ImageSize::Small) => "w185",
        (ImageKind::Poster, ImageSize::Medium) => "w342",
        (ImageKind::Poster, ImageSize::Large) => "w500",
        (ImageKind::Backdrop, ImageSize::Small) => "w780",
        (ImageKind::Backdrop, ImageSize::Medium) => "w1280",
        (ImageKind::Backdrop, ImageSize::Large) => "original",
        (ImageKind::Profile, ImageSize::Small) => "w45",
        (ImageKind::Profile, ImageSize::Medium) => "w185",
        (ImageKind::Profile, ImageSize::Large) => "h632",
    }
}

#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn search_movies(&self, query: &str, page: u32) -> Result<PageResult, TmdbError>;
    async fn get_popular_movies(&self, page: u32) -> Result<PageResult, TmdbError>;
    async fn get_top_rated_movies(&self, page: u32) -> Result<PageResult, TmdbError>;
    async fn get_upcoming_movies(&self, page: u32) -> Result<PageResult, TmdbError>;
    async fn get_movies_by_genre(&self, genre_id: u32, page: u32) -> Result<PageResult, TmdbError>;
    async fn get_movie_recommendations(
        &self,
        movie_id: u32,
        page: u32,
    ) -> Result<PageResult, TmdbError>;
    async fn get_filtered_movies(&self, criteria: &FilterCriteria) -> Result<PageResult, TmdbError>;
    async fn get_movie_details(&self, id: u32) -> Result<MovieDetails, TmdbError>;
    async fn get_categories(&self) -> Result<Vec<Category>, TmdbError>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn image_url(&self, path: Option<&str>, kind: ImageKind, size: ImageSize) -> Option<String> {
        path.map(|p| {
            format!(
                "{}/{}{p}",
                self.config.image_base_url,
                image_variant(kind, size)
            )
        })
    }

    fn summary(&self, raw: RawMovie) -> Movie {
        Movie {
            id: raw.id,
            title: raw.title,
            poster_path: self.image_url(raw.poster_path.as_deref(), ImageKind::Poster, ImageSize::Medium),
            release_date: raw.release_date,
            vote_average: raw.vote_average,
            overview: raw.overview,
            genre_ids: raw.genre_ids,
            popularity: raw.popularity,
        }
    }

    fn details(&self, raw: RawMovie) -> MovieDetails {
        let cast = raw
            .credits
            .map(|c| c.cast)
            .unwrap_or_default()
            .into_iter()
            .take(MAX_CAST)
            .map(|member| CastMember {
                id: member.id,
                name: member.name,
                character: member.character,
                profile_path: self.image_url(
                    member.profile_path.as_deref(),
                    ImageKind::Profile,
                    ImageSize::Medium,
                ),
            })
            .collect();
        MovieDetails {
            id: raw.id,
            title: raw.title,
            overview: raw.overview,
            poster_path: self.image_url(raw.poster_path.as_deref(), ImageKind::Poster, ImageSize::Large),
            backdrop_path: self.image_url(
                raw.backdrop_path.as_deref(),
                ImageKind::Backdrop,
                ImageSize::Large,
            ),
            release_date: raw.release_date,
            runtime: raw.runtime.unwrap_or_default(),
            vote_average: raw.vote_average,
            genres: raw
                .genres
                .unwrap_or_default()
                .into_iter()
                .map(|g| g.name)
                .collect(),
            cast,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, TmdbError> {
        let res = self.client.get(url).send().await.map_err(TmdbError::Network)?;
        let status = res.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 => TmdbError::InvalidApiKey,
                404 => TmdbError::NotFound,
                429 => TmdbError::RateLimited,
                code => TmdbError::Server(code),
            });
        }
        let text = res.text().await.map_err(TmdbError::Network)?;
        serde_json::from_str(&text).map_err(TmdbError::Decode)
    }

    async fn fetch_page(&self, path: &str, extra: &str) -> Result<PageResult, TmdbError> {
        let url = format!(
            "{}/{path}?api_key={}&language={}{extra}",
            self.config.base_url, self.config.api_key, self.config.language
        );
        let data: RawListResponse = self.get_json(&url).await?;
        Ok(PageResult {
            results: data.results.into_iter().map(|m| self.summary(m)).collect(),
            total_pages: data.total_pages,
            total_results: data.total_results,
        })
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn search_movies(&self, query: &str, page: u32) -> Result<PageResult, TmdbError> {
        let extra = format!("&query={}&page={page}", urlencoding::encode(query));
        self.fetch_page("search/movie", &extra).await
    }

    async fn get_popular_movies(&self, page: u32) -> Result<PageResult, TmdbError> {
        self.fetch_page("movie/popular", &format!("&page={page}")).await
    }

    async fn get_top_rated_movies(&self, page: u32) -> Result<PageResult, TmdbError> {
        self.fetch_page("movie/top_rated", &format!("&page={page}")).await
    }

    async fn get_upcoming_movies(&self, page: u32) -> Result<PageResult, TmdbError> {
        self.fetch_page("movie/upcoming", &format!("&page={page}")).await
    }

    async fn get_movies_by_genre(&self, genre_id: u32, page: u32) -> Result<PageResult, TmdbError> {
        let extra = format!("&with_genres={genre_id}&page={page}&sort_by=popularity.desc");
        self.fetch_page("discover/movie", &extra).await
    }

    async fn get_movie_recommendations(
        &self,
        movie_id: u32,
        page: u32,
    ) -> Result<PageResult, TmdbError> {
        self.fetch_page(
            &format!("movie/{movie_id}/recommendations"),
            &format!("&page={page}"),
        )
        .await
    }

    /// Discovery query built from the criteria. Search text overrides
    /// every other filter: when present, only the text search runs.
    async fn get_filtered_movies(&self, criteria: &FilterCriteria) -> Result<PageResult, TmdbError> {
        let query = criteria.search.trim();
        if !query.is_empty() {
            return self.search_movies(query, criteria.page).await;
        }

        let sort = criteria.sort.unwrap_or(SortKey::PopularityDesc);
        let mut extra = format!("&page={}&sort_by={}", criteria.page, sort.sort_by_param());
        if let Some(category_id) = criteria.category_id {
            extra.push_str(&format!("&with_genres={category_id}"));
        }
        if let Some(year) = criteria.year {
            extra.push_str(&format!("&primary_release_year={year}"));
        }
        if let Some(min_rating) = criteria.min_rating {
            extra.push_str(&format!("&vote_average.gte={min_rating}"));
        }
        self.fetch_page("discover/movie", &extra).await
    }

    async fn get_movie_details(&self, id: u32) -> Result<MovieDetails, TmdbError> {
        let url = format!(
            "{}/movie/{id}?api_key={}&language={}&append_to_response=credits",
            self.config.base_url, self.config.api_key, self.config.language
        );
        let raw: RawMovie = self.get_json(&url).await?;
        Ok(self.details(raw))
    }

    async fn get_categories(&self) -> Result<Vec<Category>, TmdbError> {
        let url = format!(
            "{}/genre/movie/list?api_key={}&language={}",
            self.config.base_url, self.config.api_key, self.config.language
        );
        let data: RawGenreList = self.get_json(&url).await?;
        Ok(data.genres)
    }
}

#[derive(Debug, Deserialize)]
struct RawListResponse {
    results: Vec<RawMovie>,
    total_pages: u32,
    #[serde(default)]
    total_results: u32,
}

#[derive(Debug, Deserialize)]
struct RawMovie {
    id: u32,
    title: String,
    #[serde(default)]
    overview: String,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    release_date: String,
    #[serde(default)]
    vote_average: f32,
    #[serde(default)]
    genre_ids: Vec<u32>,
    #[serde(default)]
    popularity: f32,
    runtime: Option<u32>,
    genres: Option<Vec<RawGenre>>,
    credits: Option<RawCredits>,
}

#[derive(Debug, Deserialize)]
struct RawGenre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawGenreList {
    genres: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct RawCredits {
    cast: Vec<RawCastMember>,
}

#[derive(Debug, Deserialize)]
struct RawCastMember {
    id: u32,
    name: String,
    #[serde(default)]
    character: String,
    profile_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new(TmdbConfig::new("test-key").unwrap())
    }

    #[test]
    fn expands_image_paths_to_absolute_urls() {
        let client = client();
        assert_eq!(
            client.image_url(Some("/abc.jpg"), ImageKind::Poster, ImageSize::Medium),
            Some("https://image.tmdb.org/t/p/w342/abc.jpg".to_string())
        );
        assert_eq!(
            client.image_url(None, ImageKind::Backdrop, ImageSize::Large),
            None
        );
    }

    #[test]
    fn summary_normalizes_raw_fields() {
        let raw: RawMovie = serde_json::from_str(
            r#"{
                "id": 7,
                "title": "Example",
                "poster_path": "/p.jpg",
                "release_date": "2011-05-01",
                "vote_average": 7.5,
                "genre_ids": [18, 35],
                "popularity": 42.0
            }"#,
        )
        .unwrap();
        let movie = client().summary(raw);
        assert_eq!(movie.id, 7);
        assert_eq!(
            movie.poster_path.as_deref(),
            Some("https://image.tmdb.org/t/p/w342/p.jpg")
        );
        assert_eq!(movie.genre_ids, vec![18, 35]);
        assert!(movie.overview.is_empty());
    }

    #[test]
    fn details_caps_cast_at_ten() {
        let cast: Vec<String> = (0..15)
            .map(|i| {
                format!(
                    r#"{{"id": {i}, "name": "Actor {i}", "character": "Role {i}", "profile_path": null}}"#
                )
            })
            .collect();
        let raw: RawMovie = serde_json::from_str(&format!(
            r#"{{
                "id": 1,
                "title": "Example",
                "overview": "Plot",
                "poster_path": null,
                "backdrop_path": null,
                "release_date": "2011-05-01",
                "vote_average": 7.5,
                "runtime": 118,
                "genres": [{{"id": 18, "name": "Drama"}}],
                "credits": {{"cast": [{}]}}
            }}"#,
            cast.join(",")
        ))
        .unwrap();
        let details = client().details(raw);
        assert_eq!(details.cast.len(), 10);
        assert_eq!(details.runtime, 118);
        assert_eq!(details.genres, vec!["Drama".to_string()]);
    }
}
