//! Page transforms, one per catalog stage.
//!
//! # Modules
//!
//! - `slogan`: Replaces the header slogan text
//! - `categories`: Adds category links to the home page
//! - `images`: Swaps broken images for working copies
//! - `cleanup`: Removes the comment form and system messages
//! - `links`: Rewrites exact attribute values
//! - `clickthrough`: Links teaser images to their article
//! - `footer`: Appends the archival notice
//! - `comments`: Attaches harvested comments

mod categories;
mod cleanup;
mod clickthrough;
mod comments;
mod footer;
mod images;
mod links;
mod slogan;

pub use categories::CategoryInjector;
pub use cleanup::ElementRemover;
pub use clickthrough::ClickThroughTransform;
pub use comments::CommentInjector;
pub use footer::FooterInjector;
pub use images::ImageRepairTransform;
pub use links::LinkTransform;
pub use slogan::SloganTransform;

/// Fixed context for transform unit tests.
#[cfg(test)]
pub(crate) fn test_context<'a>(
    relative: &'a std::path::Path,
    metadata: &'a crate::metadata::MetadataStore,
) -> super::PageContext<'a> {
    super::PageContext {
        path: relative,
        relative,
        metadata,
        generated_at: crate::utils::date::DateTimeUtc::new(2024, 6, 15, 14, 30, 45),
    }
}
