use url::Url;

use crate::error::{HarvestError, Result};
use crate::node::Node;

pub fn extract_text<'a>(node: &impl Node<'a>) -> String {
    node.text().trim().to_string()
}

/// Resolves an anchor href against `root`. Absolute hrefs are kept as they are.
pub fn resolve_href(root: &Url, href: &str) -> Result<Url> {
    root.join(href.trim()).map_err(|source| HarvestError::InvalidUrl {
        input: href.to_string(),
        source,
    })
}
