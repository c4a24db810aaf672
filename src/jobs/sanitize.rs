//! Allow-list HTML sanitizer for job descriptions.
//!
//! Disallowed tags are unwrapped (their text stays in place), except `script`
//! and `style`, which go away with their content. Attributes outside the
//! allow-list are dropped, and `href` keeps only ammonia's safe URL schemes,
//! so no event handlers or `javascript:` links survive.

use std::collections::{HashMap, HashSet};
use std::fmt;

use ammonia::Builder;

pub const ALLOWED_TAGS: [&str; 10] = ["b", "i", "span", "strong", "a", "div", "ul", "li", "em", "br"];
pub const ALLOWED_ATTRIBUTES: [&str; 2] = ["href", "class"];

/// HTML that has been through [`sanitize`]. The only markup the renderer accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Filter `raw` down to the allow-list. Absent input yields empty output.
pub fn sanitize(raw: Option<&str>) -> SafeHtml {
    let Some(raw) = raw else {
        return SafeHtml::default();
    };
    let tags: HashSet<&str> = ALLOWED_TAGS.into_iter().collect();
    let attributes: HashSet<&str> = ALLOWED_ATTRIBUTES.into_iter().collect();
    let html = Builder::default()
        .tags(tags)
        .tag_attributes(HashMap::new())
        .generic_attributes(attributes)
        .link_rel(None)
        .clean(raw)
        .to_string();
    SafeHtml(html)
}
