//! `ewgx fetch`: read content exactly as the website does.
//!
//! Reads are fail-soft, so an unreachable CMS prints `[]` or `null` and
//! exits 0. The underlying error is logged to stderr.

use ewgx_api::ContentClient;

use crate::cli::{FetchArgs, GlobalOpts, Resource};
use crate::error::CliError;
use crate::output::{self, render};

pub async fn handle(
    args: FetchArgs,
    content: &ContentClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output;
    let rendered = match args.resource {
        Resource::HeroSlides => render(format, &content.hero_slides().await)?,
        Resource::StoreInfo => render(format, &content.store_info().await)?,
        Resource::Organizations => render(format, &content.organizations().await)?,
        Resource::AboutPage => render(format, &content.about_page().await)?,
        Resource::CoreValues => render(format, &content.core_values().await)?,
        Resource::HistoryTimeline => render(format, &content.history_timeline().await)?,
        Resource::Beliefs => render(format, &content.beliefs().await)?,
        Resource::StaffMembers => render(format, &content.staff_members().await)?,
        Resource::StaffPageHeader => render(format, &content.staff_page_header().await)?,
        Resource::BlogPosts => render(format, &content.blog_posts().await)?,
        Resource::BlogPageHeader => render(format, &content.blog_page_header().await)?,
        Resource::BlogPost => {
            let slug = args.slug.as_deref().ok_or_else(|| CliError::Validation {
                field: "slug".into(),
                reason: "blog-post needs --slug".into(),
            })?;
            render(format, &content.blog_post_by_slug(slug).await)?
        }
    };
    output::print_output(&rendered)
}
