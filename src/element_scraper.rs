use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::dataset::PseudopotentialEntry;
use crate::error::{HarvestError, Result};
use crate::node::{Node, PageNode};
use crate::text_manipulators::{extract_text, resolve_href};

/// CSS class that marks the pseudopotential links on a listing page.
pub const ANCHOR_CLASS: &str = "element_anchor";

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!("body a.{ANCHOR_CLASS}")).expect("valid selector")
});

pub fn parse_page(body: &[u8]) -> Html {
    Html::parse_document(&String::from_utf8_lossy(body))
}

/// All marker anchors in document order. Empty when the page has none.
pub fn find_anchors(document: &Html) -> Vec<ElementRef<'_>> {
    document.select(&ANCHOR_SELECTOR).collect()
}

/// Reads label, href and sibling metadata from a single anchor.
pub fn read_anchor<'a>(anchor: &impl Node<'a>, upf_root: &Url) -> Result<PseudopotentialEntry> {
    let label = extract_text(anchor);

    let href = anchor
        .attribute("href")
        .ok_or_else(|| HarvestError::MissingHref {
            label: label.clone(),
        })?;
    let href = resolve_href(upf_root, href)?;

    let meta = anchor
        .next_sibling()
        .map(|sibling| extract_text(&sibling))
        .ok_or_else(|| HarvestError::MissingSibling {
            label: label.clone(),
        })?;
    if meta.is_empty() {
        log::warn!("anchor '{label}' is followed by an element with no text");
    }

    Ok(PseudopotentialEntry {
        label,
        href: href.into(),
        meta,
    })
}

/// Extracts every entry of a listing page, failing on the first malformed anchor.
pub fn scrape_entries(document: &Html, upf_root: &Url) -> Result<Vec<PseudopotentialEntry>> {
    find_anchors(document)
        .into_iter()
        .map(|anchor| read_anchor(&PageNode::from(anchor), upf_root))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upf_root() -> Url {
        Url::parse("https://www.quantum-espresso.org").unwrap()
    }

    fn page(body: &str) -> Html {
        parse_page(format!("<html><head></head><body>{body}</body></html>").as_bytes())
    }

    #[test]
    fn test_finds_anchors_in_document_order() {
        let document = page(
            r#"<table>
                <tr><td><a class="element_anchor" href="/upf_files/Fe.pbe-nd-rrkjus.UPF">Fe.pbe-nd-rrkjus.UPF</a><span>3d7 4s1  PBE  RRKJUS</span></td></tr>
                <tr><td><a class="other" href="/x">skip me</a><span>no</span></td></tr>
                <tr><td><a class="element_anchor" href="/upf_files/Fe.pz-nd-rrkjus.UPF">Fe.pz-nd-rrkjus.UPF</a><span>3d7 4s1  LDA  RRKJUS</span></td></tr>
                <tr><td><a class="big element_anchor" href="/upf_files/Fe.blyp.UPF">Fe.blyp.UPF</a><span>BLYP</span></td></tr>
            </table>"#,
        );

        let entries = scrape_entries(&document, &upf_root()).unwrap();
        let labels: Vec<_> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Fe.pbe-nd-rrkjus.UPF", "Fe.pz-nd-rrkjus.UPF", "Fe.blyp.UPF"]
        );
        assert_eq!(entries[1].meta, "3d7 4s1  LDA  RRKJUS");
    }

    #[test]
    fn test_reads_single_entry() {
        let document = page(
            r#"<p><a class="element_anchor" href="/upf_files/H.pbe-rrkjus.UPF">
                H.pbe-rrkjus.UPF
            </a>
            <span>  1s1  PBE  RRKJUS  1.3 </span></p>"#,
        );

        let entries = scrape_entries(&document, &upf_root()).unwrap();
        assert_eq!(
            entries,
            vec![PseudopotentialEntry {
                label: "H.pbe-rrkjus.UPF".to_string(),
                href: "https://www.quantum-espresso.org/upf_files/H.pbe-rrkjus.UPF".to_string(),
                meta: "1s1  PBE  RRKJUS  1.3".to_string(),
            }]
        );
    }

    #[test]
    fn test_text_sibling_is_metadata() {
        let document =
            page(r#"<div><a class="element_anchor" href="/u/O.UPF">O.UPF</a> 2s2 2p4 LDA </div>"#);
        let entries = scrape_entries(&document, &upf_root()).unwrap();
        assert_eq!(entries[0].meta, "2s2 2p4 LDA");
    }

    #[test]
    fn test_empty_sibling_element_gives_empty_meta() {
        let document =
            page(r#"<div><a class="element_anchor" href="/u/Ne.UPF">Ne.UPF</a><span></span></div>"#);
        let entries = scrape_entries(&document, &upf_root()).unwrap();
        assert_eq!(entries[0].meta, "");
    }

    #[test]
    fn test_page_without_anchors_is_empty() {
        let document = page("<p>No pseudopotentials for this element.</p>");
        assert!(find_anchors(&document).is_empty());
        assert!(scrape_entries(&document, &upf_root()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_sibling_is_an_error() {
        let document = page(
            r#"<div><a class="element_anchor" href="/u/A.UPF">A.UPF</a><i>meta</i></div>
               <div><a class="element_anchor" href="/u/B.UPF">B.UPF</a>  </div>"#,
        );
        let err = scrape_entries(&document, &upf_root()).unwrap_err();
        match err {
            HarvestError::MissingSibling { label } => assert_eq!(label, "B.UPF"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_href_is_an_error() {
        let document = page(r#"<div><a class="element_anchor">C.UPF</a><i>meta</i></div>"#);
        let err = scrape_entries(&document, &upf_root()).unwrap_err();
        assert!(matches!(err, HarvestError::MissingHref { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let mut body = b"<html><body><div><a class=\"element_anchor\" href=\"/u/N.UPF\">N.UPF</a><i>".to_vec();
        body.extend_from_slice(&[0xff, b'x']);
        body.extend_from_slice(b"</i></div></body></html>");

        let entries = scrape_entries(&parse_page(&body), &upf_root()).unwrap();
        assert_eq!(entries[0].meta, "\u{fffd}x");
    }
}
