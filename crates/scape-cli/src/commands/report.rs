use anyhow::{Context, bail};

use scape_core::entities::ReportPatch;
use scape_core::enums::SmellCategory;
use scape_core::geo::LatLng;
use scape_core::validation::ReportForm;
use scape_gateway::ReportGateway;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::commands::shared::{apply_limit, deleted, effective_limit};
use crate::output::output;

/// Handle `scape report`.
pub async fn handle<G: ReportGateway>(
    action: &ReportCommands,
    gateway: &G,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReportCommands::Create {
            title,
            description,
            category,
            intensity,
            lat,
            lng,
            address,
            contributor,
        } => {
            let form = ReportForm {
                title: title.clone(),
                description: description.clone(),
                category: category.clone(),
                intensity: *intensity,
                location: location(*lat, *lng)?,
                address: address.clone().unwrap_or_default(),
                contributor: contributor.clone().unwrap_or_default(),
            };
            let draft = form.validate()?;
            let report = gateway.add_report(&draft).await?;
            output(&report, flags.format)
        }
        ReportCommands::Update {
            id,
            title,
            description,
            category,
            intensity,
            lat,
            lng,
            address,
            contributor,
        } => {
            let stored = gateway
                .get_report(*id)
                .await
                .with_context(|| format!("failed to load report {id}"))?;
            let mut form = ReportForm::from(&stored);
            let mut changed = false;
            changed |= overwrite(&mut form.title, title.as_ref());
            changed |= overwrite(&mut form.description, description.as_ref());
            changed |= overwrite(&mut form.category, category.as_ref());
            changed |= overwrite(&mut form.address, address.as_ref());
            changed |= overwrite(&mut form.contributor, contributor.as_ref());
            if let Some(intensity) = intensity {
                form.intensity = *intensity;
                changed = true;
            }
            if let Some(at) = location(*lat, *lng)? {
                form.location = Some(at);
                changed = true;
            }
            if !changed {
                bail!("At least one field flag (for example --title or --intensity) must be provided");
            }
            let patch = ReportPatch::from(form.validate()?);
            let report = gateway.update_report(*id, &patch).await?;
            output(&report, flags.format)
        }
        ReportCommands::List {
            search,
            category,
            limit,
        } => {
            let mut reports = match (search, category) {
                (Some(term), _) => gateway.search_reports(term).await?,
                (None, Some(category)) => {
                    gateway
                        .reports_by_category(&SmellCategory::from_stored(category))
                        .await?
                }
                (None, None) => gateway.list_reports().await?,
            };
            if let (Some(_), Some(category)) = (search, category) {
                let wanted = SmellCategory::from_stored(category);
                reports.retain(|report| report.category == wanted);
            }
            apply_limit(&mut reports, effective_limit(*limit, flags.limit, 50));
            output(&reports, flags.format)
        }
        ReportCommands::Get { id } => output(&gateway.get_report(*id).await?, flags.format),
        ReportCommands::Delete { id } => {
            gateway.remove_report(*id).await?;
            output(&deleted(*id), flags.format)
        }
    }
}

/// Both coordinates or neither.
fn location(lat: Option<f64>, lng: Option<f64>) -> anyhow::Result<Option<LatLng>> {
    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => LatLng::new(lat, lng)
            .map(Some)
            .with_context(|| format!("coordinates out of range: {lat}, {lng}")),
        _ => bail!("--lat and --lng must be given together"),
    }
}

fn overwrite(field: &mut String, value: Option<&String>) -> bool {
    value.is_some_and(|value| {
        field.clone_from(value);
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_requires_both_coordinates() {
        assert!(location(Some(1.0), None).is_err());
        assert_eq!(location(None, None).unwrap(), None);
        assert_eq!(
            location(Some(45.5), Some(-73.6)).unwrap(),
            LatLng::new(45.5, -73.6)
        );
    }

    #[test]
    fn location_rejects_out_of_range_values() {
        assert!(location(Some(91.0), Some(0.0)).is_err());
    }

    #[test]
    fn overwrite_reports_whether_it_changed() {
        let mut field = String::from("old");
        assert!(!overwrite(&mut field, None));
        assert_eq!(field, "old");
        assert!(overwrite(&mut field, Some(&"new".to_string())));
        assert_eq!(field, "new");
    }
}
