//! Field-level request validation
//!
//! Runs on POST and PATCH bodies before they reach the content service.
//! Unlike the mapper (which stops at the first missing field), every failure
//! anywhere in the tree is collected so the client sees all of them at once.
//! Failures on a descendant are prefixed with its position, e.g.
//! `children[0].children[2]: Path is mandatory`.

use contentspace_core::models::{is_blank, ContentDto, MAX_TAGS, MAX_TITLE_LENGTH};

/// Collect validation messages for a request body (empty when valid)
pub fn validate_content(dto: &ContentDto) -> Vec<String> {
    let mut details = Vec::new();
    collect_failures(dto, "", &mut details);
    details
}

fn collect_failures(dto: &ContentDto, position: &str, details: &mut Vec<String>) {
    let mut fail = |message: String| {
        if position.is_empty() {
            details.push(message);
        } else {
            details.push(format!("{}: {}", position, message));
        }
    };

    match dto.title.as_deref() {
        title if is_blank(title) => fail("Title is mandatory".to_string()),
        Some(title) if title.chars().count() > MAX_TITLE_LENGTH => fail(format!(
            "Title must be between 1 and {} characters",
            MAX_TITLE_LENGTH
        )),
        _ => {}
    }

    if is_blank(dto.body.as_deref()) {
        fail("Body is mandatory".to_string());
    }

    if is_blank(dto.author.as_deref()) {
        fail("Author is mandatory".to_string());
    }

    if dto.tags.as_ref().map_or(0, Vec::len) > MAX_TAGS {
        fail(format!("Maximum {} tags allowed", MAX_TAGS));
    }

    if is_blank(dto.path.as_deref()) {
        fail("Path is mandatory".to_string());
    }

    for (index, child) in dto.children().iter().enumerate() {
        let child_position = if position.is_empty() {
            format!("children[{}]", index)
        } else {
            format!("{}.children[{}]", position, index)
        };
        collect_failures(child, &child_position, details);
    }
}
