use anyhow::bail;

use scape_core::entities::ArticlePatch;
use scape_core::errors::ValidationError;
use scape_core::validation::{ArticleForm, check_url};
use scape_gateway::ArticleGateway;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ArticleCommands;
use crate::commands::shared::{apply_limit, deleted, effective_limit};
use crate::output::output;

/// Handle `scape article`.
pub async fn handle<G: ArticleGateway>(
    action: &ArticleCommands,
    gateway: &G,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ArticleCommands::Create {
            title,
            category,
            content,
            author,
            excerpt,
            email,
            image,
        } => {
            let form = ArticleForm {
                title: title.clone(),
                category: category.clone(),
                content: content.clone(),
                excerpt: excerpt.clone().unwrap_or_default(),
                author_name: author.clone(),
                author_email: email.clone().unwrap_or_default(),
                image: image.clone().unwrap_or_default(),
            };
            let article = gateway.add_article(&form.validate()?).await?;
            output(&article, flags.format)
        }
        ArticleCommands::Update {
            id,
            title,
            category,
            content,
            excerpt,
            image,
        } => {
            let patch = build_patch(
                title.as_deref(),
                category.as_deref(),
                content.as_deref(),
                excerpt.as_deref(),
                image.as_deref(),
            )?;
            if patch == ArticlePatch::default() {
                bail!("At least one of --title, --category, --content, --excerpt, or --image must be provided");
            }
            output(&gateway.update_article(*id, &patch).await?, flags.format)
        }
        ArticleCommands::List {
            search,
            category,
            limit,
        } => {
            let mut articles = match (search, category) {
                (Some(term), _) => gateway.search_articles(term).await?,
                (None, Some(category)) => gateway.articles_by_category(category).await?,
                (None, None) => gateway.list_articles().await?,
            };
            if let (Some(_), Some(category)) = (search, category) {
                articles.retain(|article| article.category == *category);
            }
            apply_limit(&mut articles, effective_limit(*limit, flags.limit, 50));
            output(&articles, flags.format)
        }
        ArticleCommands::Get { id } => output(&gateway.get_article(*id).await?, flags.format),
        ArticleCommands::Read { id } => output(&gateway.increment_reads(*id).await?, flags.format),
        ArticleCommands::Like { id } => output(&gateway.increment_likes(*id).await?, flags.format),
        ArticleCommands::Delete { id } => {
            gateway.remove_article(*id).await?;
            output(&deleted(*id), flags.format)
        }
    }
}

/// Patch from the given flags, applying the same field rules as the
/// submission form. A new image also replaces the thumbnail.
fn build_patch(
    title: Option<&str>,
    category: Option<&str>,
    content: Option<&str>,
    excerpt: Option<&str>,
    image: Option<&str>,
) -> Result<ArticlePatch, ValidationError> {
    let image = image.map(|url| check_url("image", url).map(|()| url.to_string()));
    let image = image.transpose()?;
    Ok(ArticlePatch {
        title: title.map(|v| required("title", v)).transpose()?,
        category: category.map(|v| required("category", v)).transpose()?,
        content: content.map(|v| required("content", v)).transpose()?,
        excerpt: excerpt.map(|v| v.trim().to_string()),
        thumbnail: image.clone(),
        image,
        ..ArticlePatch::default()
    })
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_is_rejected() {
        let err = build_patch(Some("  "), None, None, None, None).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("title"));
    }

    #[test]
    fn image_updates_thumbnail_too() {
        let patch = build_patch(None, None, None, None, Some("https://img.example/a.png")).unwrap();
        assert_eq!(patch.thumbnail.as_deref(), Some("https://img.example/a.png"));
        assert_eq!(patch.image, patch.thumbnail);
    }

    #[test]
    fn non_http_image_is_rejected() {
        assert!(build_patch(None, None, None, None, Some("ftp://x/y.png")).is_err());
    }

    #[test]
    fn no_flags_yield_an_empty_patch() {
        assert_eq!(
            build_patch(None, None, None, None, None).unwrap(),
            ArticlePatch::default()
        );
    }
}
