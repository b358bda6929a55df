//! Data series for the presentation layer's charts. Rendering itself
//! happens outside this crate; these functions only bucket the movies.

use crate::models::Movie;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

pub const RATING_BINS: [&str; 5] = ["0-2", "2-4", "4-6", "6-8", "8-10"];

/// Labels plus one value per label, ready for an external renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}

/// Counts movies per fixed rating range. `None` when there is nothing
/// to plot.
pub fn rating_distribution(movies: &[Movie]) -> Option<ChartData> {
    if movies.is_empty() {
        return None;
    }

    let mut values = [0u32; 5];
    for movie in movies {
        let bin = match movie.vote_average {
            r if r < 2.0 => 0,
            r if r < 4.0 => 1,
            r if r < 6.0 => 2,
            r if r < 8.0 => 3,
            _ => 4,
        };
        values[bin] += 1;
    }

    Some(ChartData {
        labels: RATING_BINS.iter().map(|s| s.to_string()).collect(),
        values: values.to_vec(),
    })
}

/// Counts movies per release year, years ascending. Movies without a
/// parseable date are skipped; `None` when none parse.
pub fn releases_by_year(movies: &[Movie]) -> Option<ChartData> {
    let mut counts: BTreeMap<i32, u32> = BTreeMap::new();
    for movie in movies {
        if let Ok(date) = NaiveDate::parse_from_str(&movie.release_date, "%Y-%m-%d") {
            *counts.entry(date.year()).or_insert(0) += 1;
        }
    }

    if counts.is_empty() {
        return None;
    }

    Some(ChartData {
        labels: counts.keys().map(|year| year.to_string()).collect(),
        values: counts.values().copied().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(rating: f32, date: &str) -> Movie {
        Movie {
            id: 0,
            title: "Test".to_string(),
            poster_path: None,
            release_date: date.to_string(),
            vote_average: rating,
            overview: String::new(),
            genre_ids: vec![],
            popularity: 0.0,
        }
    }

    #[test]
    fn empty_input_yields_no_charts() {
        assert_eq!(rating_distribution(&[]), None);
        assert_eq!(releases_by_year(&[]), None);
    }

    #[test]
    fn buckets_ratings_into_fixed_bins() {
        let movies = vec![
            movie(0.0, "2000-01-01"),
            movie(1.9, "2000-01-01"),
            movie(2.0, "2000-01-01"),
            movie(5.5, "2000-01-01"),
            movie(7.9, "2000-01-01"),
            movie(8.0, "2000-01-01"),
            movie(10.0, "2000-01-01"),
        ];
        let chart = rating_distribution(&movies).unwrap();
        assert_eq!(chart.labels, RATING_BINS);
        assert_eq!(chart.values, vec![2, 1, 1, 1, 2]);
    }

    #[test]
    fn counts_releases_per_year_ascending() {
        let movies = vec![
            movie(5.0, "2014-03-07"),
            movie(5.0, "1999-03-31"),
            movie(5.0, "1999-10-15"),
            movie(5.0, ""),
        ];
        let chart = releases_by_year(&movies).unwrap();
        assert_eq!(chart.labels, vec!["1999", "2014"]);
        assert_eq!(chart.values, vec![2, 1]);
    }

    #[test]
    fn unparseable_dates_only_yields_none() {
        let movies = vec![movie(5.0, ""), movie(5.0, "soon")];
        assert_eq!(releases_by_year(&movies), None);
    }
}
