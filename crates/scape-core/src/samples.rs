//! Static fallback collections.
//!
//! Pages substitute these when the initial load fails so the page always has
//! something to render. Every collection is non-empty.

use chrono::{DateTime, Utc};

use crate::entities::{Article, Report, Scent};
use crate::enums::SmellCategory;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

#[must_use]
pub fn sample_reports() -> Vec<Report> {
    vec![
        Report {
            id: 3,
            title: "Fresh-cut grass on the quad".into(),
            description: "Sweet green smell right after the morning mowing.".into(),
            category: SmellCategory::Nature,
            intensity: 7,
            latitude: Some(42.3744),
            longitude: Some(-71.1169),
            address: Some("Main Quad".into()),
            contributor: Some("Writing Center".into()),
            created_at: at(1_714_560_000),
        },
        Report {
            id: 2,
            title: "Coffee roaster".into(),
            description: "Dark roast drifting out of the café vents.".into(),
            category: SmellCategory::Food,
            intensity: 8,
            latitude: Some(42.3730),
            longitude: Some(-71.1190),
            address: Some("Church St".into()),
            contributor: Some("Writing Center".into()),
            created_at: at(1_714_473_600),
        },
        Report {
            id: 1,
            title: "Library basement".into(),
            description: "Old paper, dust and a hint of vanilla.".into(),
            category: SmellCategory::Other,
            intensity: 4,
            latitude: None,
            longitude: None,
            address: None,
            contributor: Some("Writing Center".into()),
            created_at: at(1_714_387_200),
        },
    ]
}

#[must_use]
pub fn sample_articles() -> Vec<Article> {
    vec![
        Article {
            id: 2,
            title: "Writing the smell of rain".into(),
            category: "craft".into(),
            content: "Petrichor is hard to describe without cliché. Start with where you stood.".into(),
            excerpt: "Petrichor is hard to describe without cliché.".into(),
            author_name: "Writing Center".into(),
            author_email: None,
            image: None,
            thumbnail: None,
            reads: 0,
            likes: 0,
            created_at: at(1_714_560_000),
        },
        Article {
            id: 1,
            title: "Why a smell map?".into(),
            category: "project".into(),
            content: "Smells anchor memory. Mapping them is a way of writing a place.".into(),
            excerpt: "Smells anchor memory.".into(),
            author_name: "Writing Center".into(),
            author_email: None,
            image: None,
            thumbnail: None,
            reads: 0,
            likes: 0,
            created_at: at(1_714_387_200),
        },
    ]
}

#[must_use]
pub fn sample_scents() -> Vec<Scent> {
    vec![
        Scent {
            id: 1,
            name: "Cedarwood".into(),
            category: "woody".into(),
            description: "Dry and warm, like pencil shavings.".into(),
            image: None,
            thumbnail: None,
            created_at: at(1_714_387_200),
        },
        Scent {
            id: 2,
            name: "Lavender".into(),
            category: "floral".into(),
            description: "Herbal, clean, slightly camphorous.".into(),
            image: None,
            thumbnail: None,
            created_at: at(1_714_387_200),
        },
        Scent {
            id: 3,
            name: "Petrichor".into(),
            category: "earthy".into(),
            description: "Rain on dry soil.".into(),
            image: None,
            thumbnail: None,
            created_at: at(1_714_387_200),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_collections_are_non_empty() {
        assert!(!sample_reports().is_empty());
        assert!(!sample_articles().is_empty());
        assert!(!sample_scents().is_empty());
    }

    #[test]
    fn sample_reports_include_one_without_coordinates() {
        let reports = sample_reports();
        assert_eq!(reports.iter().filter(|r| r.coordinates().is_some()).count(), 2);
    }

    #[test]
    fn sample_reports_are_newest_first() {
        let reports = sample_reports();
        assert!(reports.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }
}
