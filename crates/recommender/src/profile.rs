//! Profile reporting: a user's full rated history joined with catalog
//! metadata. Listing only, no ranking.

use data_loader::{Catalog, Interactions, MovieId, UserId, PLACEHOLDER_POSTER, UNKNOWN_TITLE};
use serde::Serialize;

/// One rated movie in a user's history, with display metadata.
#[derive(Debug, Clone, Serialize)]
pub struct RatedMovie {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub rating: f32,
    pub fetched_title: String,
    pub poster_url: String,
}

/// The full profile payload for `/user/{uid}`.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub ratings: Vec<RatedMovie>,
    pub count: usize,
}

/// Build a user's profile: every rating joined against the catalog.
///
/// Left-join semantics — a rating whose movie is missing from the catalog
/// still appears, with the title and poster defaulted to sentinels. Empty
/// fields on a catalog hit are defaulted the same way. A user with no
/// ratings gets `count = 0` and an empty list; that is not an error.
pub fn user_profile(catalog: &Catalog, interactions: &Interactions, user_id: UserId) -> UserProfile {
    let ratings: Vec<RatedMovie> = interactions
        .ratings_for(user_id)
        .iter()
        .map(|r| {
            let movie = catalog.get(r.movie_id);
            RatedMovie {
                movie_id: r.movie_id,
                rating: r.rating,
                fetched_title: movie
                    .map(|m| m.title.as_str())
                    .filter(|t| !t.is_empty())
                    .unwrap_or(UNKNOWN_TITLE)
                    .to_string(),
                poster_url: movie
                    .map(|m| m.poster_url.as_str())
                    .filter(|p| !p.is_empty())
                    .unwrap_or(PLACEHOLDER_POSTER)
                    .to_string(),
            }
        })
        .collect();

    let count = ratings.len();
    UserProfile { ratings, count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, Rating};

    fn build_stores() -> (Catalog, Interactions) {
        let mut catalog = Catalog::new();
        catalog.insert(Movie {
            id: 1,
            title: "The Matrix".to_string(),
            poster_url: "/p/1.jpg".to_string(),
            overview: "Simulated reality.".to_string(),
        });
        catalog.insert(Movie {
            id: 2,
            title: "No Poster".to_string(),
            poster_url: String::new(),
            overview: String::new(),
        });

        let mut interactions = Interactions::new();
        for (movie_id, rating) in [(1, 5.0), (2, 3.5), (99, 4.0)] {
            interactions.insert(Rating {
                user_id: 7,
                movie_id,
                rating,
            });
        }

        (catalog, interactions)
    }

    #[test]
    fn test_profile_joins_catalog_metadata() {
        let (catalog, interactions) = build_stores();
        let profile = user_profile(&catalog, &interactions, 7);

        assert_eq!(profile.count, 3);
        assert_eq!(profile.ratings[0].movie_id, 1);
        assert_eq!(profile.ratings[0].fetched_title, "The Matrix");
        assert_eq!(profile.ratings[0].poster_url, "/p/1.jpg");
        assert_eq!(profile.ratings[0].rating, 5.0);
    }

    #[test]
    fn test_profile_empty_poster_gets_placeholder() {
        let (catalog, interactions) = build_stores();
        let profile = user_profile(&catalog, &interactions, 7);

        assert_eq!(profile.ratings[1].fetched_title, "No Poster");
        assert_eq!(profile.ratings[1].poster_url, PLACEHOLDER_POSTER);
    }

    #[test]
    fn test_profile_missing_movie_still_listed() {
        let (catalog, interactions) = build_stores();
        let profile = user_profile(&catalog, &interactions, 7);

        let orphan = &profile.ratings[2];
        assert_eq!(orphan.movie_id, 99);
        assert_eq!(orphan.fetched_title, UNKNOWN_TITLE);
        assert_eq!(orphan.poster_url, PLACEHOLDER_POSTER);
        assert_eq!(orphan.rating, 4.0);
    }

    #[test]
    fn test_profile_no_ratings_is_empty_not_error() {
        let (catalog, interactions) = build_stores();
        let profile = user_profile(&catalog, &interactions, 12345);

        assert_eq!(profile.count, 0);
        assert!(profile.ratings.is_empty());
    }

    #[test]
    fn test_profile_wire_field_names() {
        let (catalog, interactions) = build_stores();
        let profile = user_profile(&catalog, &interactions, 7);
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["count"], 3);
        assert_eq!(json["ratings"][0]["movieId"], 1);
        assert_eq!(json["ratings"][0]["fetched_title"], "The Matrix");
        assert_eq!(json["ratings"][0]["poster_url"], "/p/1.jpg");
    }
}
