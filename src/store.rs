//! Session state for browsing the catalog: the movie list, pagination
//! cursor, loading/error status, category cache, and favorites.

use crate::favorites::FavoritesFile;
use crate::filter::MAX_TOTAL_PAGES;
use crate::models::{Category, FilterCriteria, Movie, MovieDetails, PageResult};
use crate::tmdb::{TmdbApi, TmdbError};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, warn};

/// Summary of one filtered fetch, echoed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub movies: Vec<Movie>,
    pub total: u32,
    pub page: u32,
    pub total_pages: u32,
}

pub struct MovieStore {
    api: Arc<dyn TmdbApi>,
    favorites_file: FavoritesFile,
    pub movies: Vec<Movie>,
    pub current_movie: Option<MovieDetails>,
    pub loading: bool,
    pub error: Option<String>,
    pub favorites: Vec<Movie>,
    pub current_page: u32,
    pub total_pages: u32,
    pub search_mode: bool,
    pub last_search_query: String,
    pub categories: Vec<Category>,
}

impl MovieStore {
    pub fn new(api: Arc<dyn TmdbApi>, favorites_file: FavoritesFile) -> Self {
        let favorites = favorites_file.load();
        Self {
            api,
            favorites_file,
            movies: Vec::new(),
            current_movie: None,
            loading: false,
            error: None,
            favorites,
            current_page: 1,
            total_pages: 1,
            search_mode: false,
            last_search_query: String::new(),
            categories: Vec::new(),
        }
    }

    // Derived flags, recomputed on read.

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_movies(&self) -> bool {
        !self.movies.is_empty()
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// Runs one network-backed action: flags loading, clears any prior
    /// error, and converts a failure into the given message. Loading is
    /// released on every path out.
    async fn fetch_data<T>(
        &mut self,
        fut: impl Future<Output = Result<T, TmdbError>>,
        error_message: &str,
    ) -> Option<T> {
        self.loading = true;
        self.error = None;
        let result = fut.await;
        self.loading = false;
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                error!("{error_message}: {e}");
                self.error = Some(error_message.to_string());
                None
            }
        }
    }

    fn apply_page(&mut self, result: PageResult, page: u32) {
        self.movies = result.results;
        self.total_pages = result.total_pages.clamp(1, MAX_TOTAL_PAGES);
        self.current_page = page.clamp(1, self.total_pages);
    }

    /// Text search. An empty or whitespace-only query is rejected
    /// without touching any state.
    pub async fn search(&mut self, query: &str, page: u32) {
        let trimmed = query.trim().to_string();
        if trimmed.is_empty() {
            return;
        }

        self.search_mode = true;
        self.last_search_query = trimmed.clone();

        let api = Arc::clone(&self.api);
        let result = self
            .fetch_data(api.search_movies(&trimmed, page), "Movie search failed")
            .await;
        if let Some(found) = result {
            self.apply_page(found, page);
        }
    }

    pub async fn fetch_popular_movies(&mut self, page: u32) {
        self.search_mode = false;

        let api = Arc::clone(&self.api);
        let result = self
            .fetch_data(api.get_popular_movies(page), "Could not load popular movies")
            .await;
        if let Some(found) = result {
            self.apply_page(found, page);
        }
    }

    /// Fetches the genre vocabulary and caches it on the store. Not
    /// memoized; call once at startup.
    pub async fn fetch_categories(&mut self) -> Vec<Category> {
        let api = Arc::clone(&self.api);
        let result = self
            .fetch_data(api.get_categories(), "Could not load categories")
            .await;
        if let Some(categories) = result {
            self.categories = categories;
        }
        self.categories.clone()
    }

    /// Remote-mode filtering. On failure the returned record is zeroed
    /// rather than raising; the error is surfaced via `self.error`.
    pub async fn fetch_filtered_movies(&mut self, criteria: &FilterCriteria) -> FetchResult {
        let api = Arc::clone(&self.api);
        let result = self
            .fetch_data(
                api.get_filtered_movies(criteria),
                "Could not load filtered movies",
            )
            .await;
        match result {
            Some(found) => {
                let page = criteria.page.max(1);
                let summary = FetchResult {
                    movies: found.results.clone(),
                    total: found.total_results,
                    page,
                    total_pages: found.total_pages,
                };
                self.apply_page(found, page);
                summary
            }
            None => FetchResult {
                movies: Vec::new(),
                total: 0,
                page: 1,
                total_pages: 0,
            },
        }
    }

    /// Re-issues the last action (search or popular browse) for the
    /// target page. Out-of-range pages are ignored.
    pub async fn go_to_page(&mut self, page: u32) {
        if page < 1 || page > self.total_pages {
            return;
        }

        if self.search_mode && !self.last_search_query.is_empty() {
            let query = self.last_search_query.clone();
            self.search(&query, page).await;
        } else {
            self.fetch_popular_movies(page).await;
        }
    }

    pub async fn fetch_movie_details(&mut self, id: u32) {
        let api = Arc::clone(&self.api);
        let result = self
            .fetch_data(
                api.get_movie_details(id),
                "Could not load movie details",
            )
            .await;
        if let Some(details) = result {
            self.current_movie = Some(details);
        }
    }

    /// Adds the movie to favorites if absent, removes it otherwise,
    /// then rewrites the stored blob. A write failure is logged and
    /// the in-memory change stands.
    pub fn toggle_favorite(&mut self, movie: &Movie) {
        match self.favorites.iter().position(|m| m.id == movie.id) {
            Some(index) => {
                self.favorites.remove(index);
            }
            None => self.favorites.push(movie.clone()),
        }

        if let Err(e) = self.favorites_file.save(&self.favorites) {
            warn!("Failed to persist favorites: {e:#}");
        }
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.iter().any(|movie| movie.id == id)
    }
}
