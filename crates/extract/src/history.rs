//! Extraction of art-change mentions from a rendered "Patch history" page.
//!
//! The pages follow a loose convention:
//!
//! ```html
//! <dl><dt><a href="/wiki/V12.5" title="V12.5">V12.5</a></dt></dl>
//! <ul>
//!     <li>Updated splash art for <a href="/wiki/Aatrox/LoL/Cosmetics">Original Aatrox</a>.</li>
//!     <li>Q - The Darkin Blade: damage increased.</li>
//! </ul>
//! ```
//!
//! Each version marker is followed by the list of changes shipped in that
//! version. Only bullets mentioning `" art"` are of interest, and inside them
//! every link's text is a candidate skin name.

use std::collections::HashSet;

use scraper::{ElementRef, Html};
use tracing::instrument;

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::Patch;

/// A skin name linked from an art-change bullet, and the version marker the
/// bullet was listed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtMention {
    /// The version whose notes mention the change (the marker's own value).
    pub patch: Patch,
    /// Visible text of the link, trimmed.
    pub name: String,
}
impl ArtMention {
    pub fn new(patch: Patch, name: impl Into<String>) -> Self {
        Self {
            patch,
            name: name.into(),
        }
    }
}

/// Extract every `(version, linked name)` pair from art-change bullets, in
/// document order and without duplicates.
///
/// Versions less than or equal to `min_supported` are skipped entirely.
///
/// # Errors
///
/// Returns [`InvalidDocument`](ErrorKind::InvalidDocument) when the page has
/// no version markers at all, which is what error and redirect pages look
/// like.
#[instrument(skip(html), fields(html_size = html.len(), min_supported = %min_supported))]
pub fn extract_art_mentions(html: &str, min_supported: Patch) -> Result<Vec<ArtMention>> {
    let document = Html::parse_document(html);
    let markers = self::version_markers(&document);
    if markers.is_empty() {
        exn::bail!(ErrorKind::InvalidDocument);
    }

    let mut seen = HashSet::new();
    let mut mentions = Vec::new();
    for (patch, marker) in markers {
        if patch <= min_supported {
            continue;
        }
        let Some(section) = self::section_after(marker) else {
            tracing::trace!(%patch, "version marker without a following section");
            continue;
        };
        for name in self::art_link_texts(section) {
            let mention = ArtMention::new(patch, name);
            if seen.insert(mention.clone()) {
                mentions.push(mention);
            }
        }
    }
    Ok(mentions)
}

/// Finds all `dl dt a` links titled `V<major>.<minor>`.
fn version_markers(document: &Html) -> Vec<(Patch, ElementRef<'_>)> {
    document
        .select(&consts::VERSION_MARKER_SELECTOR)
        .filter_map(|anchor| {
            let title = anchor.value().attr("title")?;
            let patch = title.strip_prefix(consts::VERSION_MARKER_PREFIX)?.parse::<Patch>().ok()?;
            Some((patch, anchor))
        })
        .collect()
}

/// The change list for a marker is the next element after its enclosing `dl`.
fn section_after(marker: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let dl = marker.ancestors().filter_map(ElementRef::wrap).find(|el| el.value().name() == "dl")?;
    dl.next_siblings().find_map(ElementRef::wrap)
}

/// Link texts inside every bullet of `section` whose own text contains the
/// art token.
fn art_link_texts(section: ElementRef<'_>) -> Vec<String> {
    let mut names = Vec::new();
    for block in section.descendants().filter_map(ElementRef::wrap).filter(|el| is_block(section, *el)) {
        if !own_text(block).contains(consts::ART_TOKEN) {
            continue;
        }
        for link in block.select(&consts::LINK_SELECTOR) {
            let text = link.text().collect::<String>().trim().to_string();
            if !text.is_empty() && !names.contains(&text) {
                names.push(text);
            }
        }
    }
    names
}

fn is_block(section: ElementRef<'_>, element: ElementRef<'_>) -> bool {
    let name = element.value().name();
    if consts::BLOCK_TAGS.contains(&name) {
        return true;
    }
    // A section that is not itself a list (a bare paragraph or div) counts
    // as one bullet.
    element == section && !consts::NESTED_LIST_TAGS.contains(&name)
}

/// Text of an element, excluding the text of any nested lists. Keeps a
/// "General" bullet from inheriting the art token of its sub-bullets.
fn own_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    self::collect_own_text(element, &mut text);
    text
}

fn collect_own_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child)
            && !consts::NESTED_LIST_TAGS.contains(&child.value().name())
        {
            self::collect_own_text(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MIN: Patch = Patch::new(9, 1);

    fn marker(version: &str) -> String {
        format!(r#"<dl><dt><a href="/wiki/{version}" title="{version}">{version}</a></dt></dl>"#)
    }

    fn page(sections: &[(&str, &str)]) -> String {
        let body: String = sections.iter().map(|(version, list)| format!("{}{}", marker(version), list)).collect();
        format!("<html><body><div class=\"mw-parser-output\">{body}</div></body></html>")
    }

    #[test]
    fn test_single_art_bullet() {
        let html = page(&[(
            "V12.5",
            r#"<ul>
                <li>Updated splash art for <a href="/wiki/Aatrox/LoL/Cosmetics">Original Aatrox</a>.</li>
                <li><a href="/wiki/Q">Q</a> damage increased.</li>
            </ul>"#,
        )]);
        let mentions = extract_art_mentions(&html, MIN).unwrap();
        assert_eq!(mentions, vec![ArtMention::new(Patch::new(12, 5), "Original Aatrox")]);
    }

    #[test]
    fn test_nested_list_under_art_bullet() {
        let html = page(&[(
            "V11.14",
            r#"<ul>
                <li>New splash art for:
                    <ul>
                        <li><a href="/wiki/a">Justicar Aatrox</a></li>
                        <li><a href="/wiki/b">Mecha Aatrox</a></li>
                    </ul>
                </li>
            </ul>"#,
        )]);
        let names: Vec<_> = extract_art_mentions(&html, MIN).unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Justicar Aatrox", "Mecha Aatrox"]);
    }

    #[test]
    fn test_parent_bullet_does_not_inherit_art_token() {
        let html = page(&[(
            "V12.1",
            r#"<ul>
                <li><a href="/wiki/General">General</a>
                    <ul>
                        <li>Updated <a href="/wiki/x">Blood Moon Aatrox</a> splash art.</li>
                        <li>Fixed a bug with <a href="/wiki/y">Sweeping Blow</a>.</li>
                    </ul>
                </li>
            </ul>"#,
        )]);
        let names: Vec<_> = extract_art_mentions(&html, MIN).unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Blood Moon Aatrox"]);
    }

    #[rstest]
    #[case("Updated Art")]
    #[case("New Splash Art")]
    #[case("updated splash art")]
    fn test_art_token_is_case_sensitive(#[case] wording: &str) {
        let html = page(&[("V12.3", &format!(r#"<ul><li>{wording}: <a href="/w">Lancer Zero Aatrox</a></li></ul>"#))]);
        let mentions = extract_art_mentions(&html, MIN).unwrap();
        assert_eq!(mentions.len(), usize::from(wording.contains(" art")));
    }

    #[test]
    fn test_versions_at_or_below_minimum_are_skipped() {
        let list = r#"<ul><li>New splash art for <a href="/w">Justicar Aatrox</a>.</li></ul>"#;
        let html = page(&[("V9.2", list), ("V9.1", list), ("V8.24", list)]);
        let mentions = extract_art_mentions(&html, MIN).unwrap();
        assert_eq!(mentions, vec![ArtMention::new(Patch::new(9, 2), "Justicar Aatrox")]);
    }

    #[test]
    fn test_markers_that_are_not_versions_are_ignored() {
        let list = r#"<ul><li>New splash art for <a href="/w">Justicar Aatrox</a>.</li></ul>"#;
        let html = page(&[("V12.2", list), ("Patch", list), ("V1.0.0.152", list)]);
        let mentions = extract_art_mentions(&html, MIN).unwrap();
        assert_eq!(mentions.len(), 1);
    }

    #[test]
    fn test_empty_link_text_and_anchors_without_href() {
        let html = page(&[(
            "V12.5",
            r#"<ul><li>New splash art: <a href="/w"> </a><a name="anchor">Nope</a><a href="/x">Mecha Aatrox</a></li></ul>"#,
        )]);
        let names: Vec<_> = extract_art_mentions(&html, MIN).unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Mecha Aatrox"]);
    }

    #[test]
    fn test_duplicates_are_collapsed_but_distinct_versions_kept() {
        let list = r#"<ul>
            <li>Updated splash art for <a href="/w">Mecha Aatrox</a>.</li>
            <li>Updated splash art (again) for <a href="/w">Mecha Aatrox</a>.</li>
        </ul>"#;
        let html = page(&[("V12.6", list), ("V12.5", list)]);
        let mentions = extract_art_mentions(&html, MIN).unwrap();
        assert_eq!(
            mentions,
            vec![
                ArtMention::new(Patch::new(12, 6), "Mecha Aatrox"),
                ArtMention::new(Patch::new(12, 5), "Mecha Aatrox"),
            ]
        );
    }

    #[test]
    fn test_paragraph_section() {
        let html = page(&[("V12.5", r#"<p>New splash art for <a href="/w">Mecha Aatrox</a>.</p>"#)]);
        assert_eq!(extract_art_mentions(&html, MIN).unwrap().len(), 1);
    }

    #[test]
    fn test_marker_without_section() {
        let html = format!("<html><body><div>{}</div></body></html>", marker("V12.5"));
        assert!(extract_art_mentions(&html, MIN).unwrap().is_empty());
    }

    #[test]
    fn test_document_without_markers_is_invalid() {
        let err = extract_art_mentions("<html><body><p>There is currently no text in this page.</p></body></html>", MIN)
            .unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidDocument);
    }
}
