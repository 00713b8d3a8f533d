//! Form state and validation.
//!
//! Forms hold raw user input. `validate()` either produces the matching draft
//! or the first [`ValidationError`] found; no backend call happens for an
//! invalid form.

use serde::{Deserialize, Serialize};

use crate::entities::{ArticleDraft, Report, ReportDraft, Scent, ScentDraft};
use crate::enums::SmellCategory;
use crate::errors::ValidationError;
use crate::geo::LatLng;

/// Excerpt length (in characters) derived from article content when none is given.
pub const EXCERPT_CHARS: usize = 150;

/// Intensity preselected on a fresh report form.
pub const DEFAULT_INTENSITY: i64 = 5;

/// Raw input of the report submission/edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub intensity: i64,
    pub location: Option<LatLng>,
    pub address: String,
    pub contributor: String,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: SmellCategory::Other.to_string(),
            intensity: DEFAULT_INTENSITY,
            location: None,
            address: String::new(),
            contributor: String::new(),
        }
    }
}

impl ReportForm {
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank title, unknown category,
    /// intensity outside 1..=10, or a missing location.
    pub fn validate(&self) -> Result<ReportDraft, ValidationError> {
        let title = required("title", &self.title)?;
        let category: SmellCategory = self.category.parse()?;
        let intensity = in_range("intensity", self.intensity, 1, 10)?;
        let location = self.location.ok_or(ValidationError::MissingLocation)?;

        Ok(ReportDraft {
            title,
            description: self.description.trim().to_string(),
            category,
            intensity,
            latitude: location.lat,
            longitude: location.lng,
            address: optional(&self.address),
            contributor: optional(&self.contributor),
        })
    }
}

impl From<&Report> for ReportForm {
    /// Prefill an edit form from a stored report.
    fn from(report: &Report) -> Self {
        Self {
            title: report.title.clone(),
            description: report.description.clone(),
            category: report.category.to_string(),
            intensity: i64::from(report.intensity),
            location: report.coordinates(),
            address: report.address.clone().unwrap_or_default(),
            contributor: report.contributor.clone().unwrap_or_default(),
        }
    }
}

/// Raw input of the article submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleForm {
    pub title: String,
    pub category: String,
    pub content: String,
    pub excerpt: String,
    pub author_name: String,
    pub author_email: String,
    pub image: String,
}

impl ArticleForm {
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank title, category, content or
    /// author, a malformed email, or a non-http(s) image URL.
    pub fn validate(&self) -> Result<ArticleDraft, ValidationError> {
        let title = required("title", &self.title)?;
        let category = required("category", &self.category)?;
        let content = required("content", &self.content)?;
        let author_name = required("author_name", &self.author_name)?;
        let author_email = optional(&self.author_email)
            .map(|email| check_email(&email).map(|()| email))
            .transpose()?;
        let image = optional(&self.image)
            .map(|url| check_url("image", &url).map(|()| url))
            .transpose()?;
        let excerpt = optional(&self.excerpt).unwrap_or_else(|| derive_excerpt(&content));

        Ok(ArticleDraft {
            title,
            category,
            excerpt,
            content,
            author_name,
            author_email,
            thumbnail: image.clone(),
            image,
        })
    }
}

/// Raw input of the scent library form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScentForm {
    pub name: String,
    pub category: String,
    pub description: String,
    pub image: String,
}

impl ScentForm {
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank name or category, or a
    /// non-http(s) image URL.
    pub fn validate(&self) -> Result<ScentDraft, ValidationError> {
        let name = required("name", &self.name)?;
        let category = required("category", &self.category)?;
        let image = optional(&self.image)
            .map(|url| check_url("image", &url).map(|()| url))
            .transpose()?;

        Ok(ScentDraft {
            name,
            category,
            description: self.description.trim().to_string(),
            thumbnail: image.clone(),
            image,
        })
    }
}

impl From<&Scent> for ScentForm {
    fn from(scent: &Scent) -> Self {
        Self {
            name: scent.name.clone(),
            category: scent.category.clone(),
            description: scent.description.clone(),
            image: scent.image.clone().unwrap_or_default(),
        }
    }
}

/// First [`EXCERPT_CHARS`] characters of `content`, with an ellipsis when cut.
#[must_use]
pub fn derive_excerpt(content: &str) -> String {
    let trimmed = content.trim();
    let mut chars = trimmed.char_indices();
    match chars.nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", trimmed[..cut].trim_end()),
        None => trimmed.to_string(),
    }
}

/// Accept only absolute `http`/`https` URLs.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidUrl`] otherwise.
pub fn check_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
    };
    let parsed = url::Url::parse(value).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" if parsed.host().is_some() => Ok(()),
        _ => Err(invalid()),
    }
}

fn check_email(value: &str) -> Result<(), ValidationError> {
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn in_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<u8, ValidationError> {
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    u8::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field,
        min,
        max,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn placed_report_form() -> ReportForm {
        ReportForm {
            title: "Bakery exhaust".into(),
            description: "  warm bread on Elm St  ".into(),
            category: "food".into(),
            intensity: 7,
            location: LatLng::new(42.35, -71.1),
            ..ReportForm::default()
        }
    }

    #[test]
    fn report_form_produces_draft() {
        let draft = placed_report_form().validate().unwrap();
        assert_eq!(draft.title, "Bakery exhaust");
        assert_eq!(draft.description, "warm bread on Elm St");
        assert_eq!(draft.category, SmellCategory::Food);
        assert_eq!(draft.intensity, 7);
        assert_eq!(draft.latitude, 42.35);
        assert!(draft.address.is_none());
    }

    #[test]
    fn report_form_requires_location() {
        let form = ReportForm {
            location: None,
            ..placed_report_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingLocation));
    }

    #[rstest]
    #[case(0)]
    #[case(11)]
    #[case(-3)]
    fn report_form_rejects_intensity_out_of_range(#[case] intensity: i64) {
        let form = ReportForm {
            intensity,
            ..placed_report_form()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::OutOfRange { field: "intensity", .. })
        ));
    }

    #[test]
    fn report_form_rejects_blank_title() {
        let form = ReportForm {
            title: "   ".into(),
            ..placed_report_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingField("title")));
    }

    #[test]
    fn article_form_derives_excerpt_and_thumbnail() {
        let form = ArticleForm {
            title: "Notes on petrichor".into(),
            category: "essay".into(),
            content: "x".repeat(400),
            author_name: "R. Lee".into(),
            author_email: "rlee@example.edu".into(),
            image: "https://example.edu/rain.jpg".into(),
            ..ArticleForm::default()
        };
        let draft = form.validate().unwrap();
        assert_eq!(draft.excerpt.len(), EXCERPT_CHARS + 3);
        assert!(draft.excerpt.ends_with("..."));
        assert_eq!(draft.thumbnail.as_deref(), Some("https://example.edu/rain.jpg"));
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://example.edu/a.png")]
    #[case("/relative/path.png")]
    fn invalid_image_urls_are_rejected(#[case] image: &str) {
        let form = ScentForm {
            name: "Cedar".into(),
            category: "woody".into(),
            image: image.into(),
            ..ScentForm::default()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidUrl { field: "image", .. })
        ));
    }

    #[test]
    fn article_form_rejects_malformed_email() {
        let form = ArticleForm {
            title: "t".into(),
            category: "c".into(),
            content: "body".into(),
            author_name: "a".into(),
            author_email: "nobody-at-example".into(),
            ..ArticleForm::default()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::InvalidEmail("nobody-at-example".into()))
        );
    }

    #[test]
    fn short_content_excerpt_is_unchanged() {
        assert_eq!(derive_excerpt("  short piece "), "short piece");
    }

    #[test]
    fn edit_form_from_stored_report_revalidates() {
        let report = crate::samples::sample_reports().remove(0);
        let draft = ReportForm::from(&report).validate().unwrap();
        assert_eq!(draft.title, report.title);
        assert_eq!(draft.category, report.category);
        assert_eq!(Some(draft.latitude), report.latitude);
    }

    #[test]
    fn edit_form_from_report_without_location_needs_one() {
        let report = crate::samples::sample_reports().remove(2);
        assert!(report.coordinates().is_none());
        assert_eq!(
            ReportForm::from(&report).validate(),
            Err(ValidationError::MissingLocation)
        );
    }
}
