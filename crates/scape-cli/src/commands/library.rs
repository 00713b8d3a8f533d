use anyhow::{Context, bail};

use scape_core::entities::ScentPatch;
use scape_core::validation::ScentForm;
use scape_gateway::LibraryGateway;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LibraryCommands;
use crate::commands::shared::{apply_limit, deleted, effective_limit};
use crate::output::output;

/// Handle `scape library`.
pub async fn handle<G: LibraryGateway>(
    action: &LibraryCommands,
    gateway: &G,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LibraryCommands::Create {
            name,
            category,
            description,
            image,
        } => {
            let form = ScentForm {
                name: name.clone(),
                category: category.clone(),
                description: description.clone(),
                image: image.clone().unwrap_or_default(),
            };
            let scent = gateway.add_scent(&form.validate()?).await?;
            output(&scent, flags.format)
        }
        LibraryCommands::Update {
            id,
            name,
            category,
            description,
            image,
        } => {
            if name.is_none() && category.is_none() && description.is_none() && image.is_none() {
                bail!("At least one of --name, --category, --description, or --image must be provided");
            }
            let stored = gateway
                .get_scent(*id)
                .await
                .with_context(|| format!("failed to load scent {id}"))?;
            let mut form = ScentForm::from(&stored);
            for (field, value) in [
                (&mut form.name, name),
                (&mut form.category, category),
                (&mut form.description, description),
                (&mut form.image, image),
            ] {
                if let Some(value) = value {
                    field.clone_from(value);
                }
            }
            let patch = ScentPatch::from(form.validate()?);
            output(&gateway.update_scent(*id, &patch).await?, flags.format)
        }
        LibraryCommands::List {
            search,
            category,
            limit,
        } => {
            let mut scents = match (search, category) {
                (Some(term), _) => gateway.search_scents(term).await?,
                (None, Some(category)) => gateway.scents_by_category(category).await?,
                (None, None) => gateway.list_scents().await?,
            };
            if let (Some(_), Some(category)) = (search, category) {
                scents.retain(|scent| scent.category == *category);
            }
            apply_limit(&mut scents, effective_limit(*limit, flags.limit, 50));
            output(&scents, flags.format)
        }
        LibraryCommands::Get { id } => output(&gateway.get_scent(*id).await?, flags.format),
        LibraryCommands::Delete { id } => {
            gateway.remove_scent(*id).await?;
            output(&deleted(*id), flags.format)
        }
    }
}
