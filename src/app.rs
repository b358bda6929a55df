use crate::chart;
use crate::config::TmdbConfig;
use crate::favorites::FavoritesFile;
use crate::filter::release_year;
use crate::store::MovieStore;
use crate::tmdb::{TmdbApi, TmdbClient};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

const FAVORITES_PATH: &str = "favorites.json";

/// Composition root: wires config, client, and store, then either runs
/// the given text search or lists the first page of popular movies.
pub async fn run(query: Option<String>) -> Result<()> {
    let config = TmdbConfig::from_env()?;
    let api: Arc<dyn TmdbApi> = Arc::new(TmdbClient::new(config));
    let mut store = MovieStore::new(api, FavoritesFile::new(FAVORITES_PATH));

    let categories = store.fetch_categories().await;
    info!("Loaded {} categories", categories.len());

    match &query {
        Some(text) => {
            info!("Searching for '{}'", text);
            store.search(text, 1).await;
        }
        None => {
            info!("Listing popular movies");
            store.fetch_popular_movies(1).await;
        }
    }

    if let Some(message) = &store.error {
        anyhow::bail!("{message}");
    }

    print_listing(&store);
    Ok(())
}

fn print_listing(store: &MovieStore) {
    if !store.has_movies() {
        println!("No movies found.");
        return;
    }

    for movie in &store.movies {
        let year = release_year(&movie.release_date)
            .map(|y| y.to_string())
            .unwrap_or_else(|| "----".to_string());
        let favorite = if store.is_favorite(movie.id) { "*" } else { " " };
        println!(
            "{favorite} {:>4}  {:.1}  {}",
            year, movie.vote_average, movie.title
        );
    }
    println!(
        "\nPage {}/{} ({} on this page)",
        store.current_page,
        store.total_pages,
        store.movies.len()
    );

    if let Some(histogram) = chart::rating_distribution(&store.movies) {
        let summary: Vec<String> = histogram
            .labels
            .iter()
            .zip(&histogram.values)
            .map(|(label, count)| format!("{label}: {count}"))
            .collect();
        println!("Ratings: {}", summary.join("  "));
    }
}
