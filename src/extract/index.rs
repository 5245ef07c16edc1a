//! Index page scanning
//!
//! Each region names its two quest sections through anchor elements. The
//! anchor's text is the label; every `h3` in the article body whose text
//! contains that label introduces a quest list in its next sibling element.

use crate::config::RegionSpec;
use crate::extract::chain::{next_element_sibling, selector, text_of};
use crate::quest::{Category, QuestRef};
use crate::url::resolve_link;
use scraper::{ElementRef, Html};
use url::Url;

/// A region/category whose anchor did not resolve to a usable label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedAnchor {
    pub region: String,
    pub category: Category,
    /// The configured anchor id
    pub anchor: String,
}

/// Result of scanning the index page
#[derive(Debug, Clone, Default)]
pub struct IndexScan {
    /// Quests in discovery order: config region order, then category order,
    /// then document order
    pub quests: Vec<QuestRef>,

    /// Anchors that contributed nothing because their label was missing or empty
    pub unresolved: Vec<UnresolvedAnchor>,
}

/// Scans the index page and returns only the discovered quests
///
/// # Arguments
///
/// * `document` - The parsed index page
/// * `base_url` - URL the index page was fetched from, for resolving links
/// * `regions` - Regions in processing order
pub fn scrape_index(document: &Html, base_url: &Url, regions: &[RegionSpec]) -> Vec<QuestRef> {
    scan_index(document, base_url, regions).quests
}

/// Scans the index page, keeping diagnostics for unresolved anchors
///
/// A heading whose text contains the labels of several regions or
/// categories contributes its quests once per match, in configuration order.
pub fn scan_index(document: &Html, base_url: &Url, regions: &[RegionSpec]) -> IndexScan {
    let mut scan = IndexScan::default();

    let Some(heading_selector) = selector("#article-body h3") else {
        return scan;
    };
    let headings: Vec<ElementRef<'_>> = document.select(&heading_selector).collect();

    for region in regions {
        for category in Category::ALL {
            let anchor = region.anchor(category);

            let Some(label) = resolve_anchor_label(document, anchor) else {
                tracing::warn!(
                    region = %region.name,
                    category = %category,
                    anchor = %anchor,
                    "Anchor resolved to no label, skipping"
                );
                scan.unresolved.push(UnresolvedAnchor {
                    region: region.name.clone(),
                    category,
                    anchor: anchor.to_string(),
                });
                continue;
            };

            let before = scan.quests.len();
            for heading in &headings {
                if !heading.text().collect::<String>().contains(&label) {
                    continue;
                }

                if let Some(list) = next_element_sibling(*heading) {
                    collect_quests(list, base_url, region, category, &mut scan.quests);
                }
            }

            tracing::info!(
                region = %region.name,
                category = %category,
                label = %label,
                quests = scan.quests.len() - before,
                "Scanned quest section"
            );
        }
    }

    scan
}

/// Resolves an anchor id to the trimmed text of the element(s) carrying it
///
/// Returns None for a blank id, a missing element, or an empty text, so that
/// an empty label can never match every heading.
fn resolve_anchor_label(document: &Html, anchor: &str) -> Option<String> {
    let anchor = anchor.trim();
    if anchor.is_empty() {
        return None;
    }

    // Matching on the attribute avoids escaping arbitrary ids into CSS
    let with_id = selector("[id]")?;
    let label: String = document
        .select(&with_id)
        .filter(|element| element.value().id() == Some(anchor))
        .flat_map(|element| element.text())
        .collect();

    let label = label.trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

/// Turns every linked list item under `list` into a quest
fn collect_quests(
    list: ElementRef<'_>,
    base_url: &Url,
    region: &RegionSpec,
    category: Category,
    quests: &mut Vec<QuestRef>,
) {
    let (Some(items), Some(links)) = (selector("li"), selector("a[href]")) else {
        return;
    };

    for item in list.select(&items) {
        let Some(anchor) = item.select(&links).next() else {
            continue;
        };

        let href = anchor.value().attr("href").unwrap_or_default();
        let Some(link) = resolve_link(href, base_url) else {
            tracing::debug!(href = %href, region = %region.name, "Skipping unusable quest link");
            continue;
        };

        let name = text_of(anchor);
        tracing::debug!(
            region = %region.name,
            category = %category,
            quest = %name,
            link = %link,
            "Discovered quest"
        );

        quests.push(QuestRef {
            name,
            link,
            region: region.name.clone(),
            category,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://gamewith.net/genshin-impact/article/show/22408").unwrap()
    }

    fn index(body: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><div id="article-body">{}</div></body></html>"#,
            body
        ))
    }

    #[test]
    fn test_single_region_both_categories() {
        let doc = index(
            r#"<span id="inaWQL">Inazuma World Quests</span>
            <span id="zumaNR1">Inazuma Non-Reputation</span>
            <h3>All Inazuma World Quests</h3>
            <ul><li><a href="/genshin-impact/article/show/1"> Sakura Arborism </a></li>
                <li><a href="/genshin-impact/article/show/2">Cleansing Waters</a></li></ul>
            <h3>List of Inazuma Non-Reputation Quests</h3>
            <ul><li><a href="/genshin-impact/article/show/3">Sacrificial Offering</a></li></ul>"#,
        );
        let regions = vec![RegionSpec::new("Inazuma", "inaWQL", "zumaNR1")];

        let scan = scan_index(&doc, &base_url(), &regions);
        assert!(scan.unresolved.is_empty());
        assert_eq!(scan.quests.len(), 3);

        assert_eq!(scan.quests[0].name, "Sakura Arborism");
        assert_eq!(
            scan.quests[0].link.as_str(),
            "https://gamewith.net/genshin-impact/article/show/1"
        );
        assert_eq!(scan.quests[0].region, "Inazuma");
        assert_eq!(scan.quests[0].category, Category::Reputation);
        assert_eq!(scan.quests[1].category, Category::Reputation);
        assert_eq!(scan.quests[2].name, "Sacrificial Offering");
        assert_eq!(scan.quests[2].category, Category::NonReputation);
    }

    #[test]
    fn test_every_matching_heading_contributes() {
        let doc = index(
            r#"<span id="monWQ">Mondstadt World Quests</span>
            <h3>Mondstadt World Quests (Part 1)</h3>
            <ul><li><a href="/q/1">One</a></li><li><a href="/q/2">Two</a></li></ul>
            <h3>Mondstadt World Quests (Part 2)</h3>
            <ul><li><a href="/q/3">Three</a></li></ul>
            <h3>Unrelated</h3>
            <ul><li><a href="/q/4">Four</a></li></ul>"#,
        );
        let regions = vec![RegionSpec::new("Mondstadt", "monWQ", "missing")];

        let quests = scrape_index(&doc, &base_url(), &regions);
        let names: Vec<&str> = quests.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_empty_label_matches_nothing() {
        let doc = index(
            r#"<span id="blank">   </span>
            <h3>Anything</h3>
            <ul><li><a href="/q/1">One</a></li></ul>"#,
        );
        let regions = vec![RegionSpec::new("Liyue", "blank", "")];

        let scan = scan_index(&doc, &base_url(), &regions);
        assert!(scan.quests.is_empty());
        assert_eq!(
            scan.unresolved,
            vec![
                UnresolvedAnchor {
                    region: "Liyue".to_string(),
                    category: Category::Reputation,
                    anchor: "blank".to_string(),
                },
                UnresolvedAnchor {
                    region: "Liyue".to_string(),
                    category: Category::NonReputation,
                    anchor: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_overlapping_labels_emit_duplicates_in_region_order() {
        let doc = index(
            r#"<span id="a">Fontaine</span>
            <span id="b">Fontaine World Quests</span>
            <h3>Fontaine World Quests</h3>
            <ul><li><a href="/q/1">Shared</a></li></ul>"#,
        );
        let regions = vec![
            RegionSpec::new("Broad", "a", "none"),
            RegionSpec::new("Narrow", "b", "none"),
        ];

        let quests = scrape_index(&doc, &base_url(), &regions);
        assert_eq!(quests.len(), 2);
        assert_eq!(quests[0].region, "Broad");
        assert_eq!(quests[1].region, "Narrow");
        assert_eq!(quests[0].link, quests[1].link);
    }

    #[test]
    fn test_items_without_links_are_skipped() {
        let doc = index(
            r#"<span id="sum">Sumeru</span>
            <h3>Sumeru</h3>
            <ul><li>Coming soon</li><li><a>No href</a></li>
                <li><a href="javascript:void(0)">Script</a></li>
                <li><a href="https://gamewith.net/q/9">Real</a></li></ul>"#,
        );
        let regions = vec![RegionSpec::new("Sumeru", "sum", "none")];

        let quests = scrape_index(&doc, &base_url(), &regions);
        assert_eq!(quests.len(), 1);
        assert_eq!(quests[0].name, "Real");
    }

    #[test]
    fn test_headings_outside_article_body_ignored() {
        let doc = Html::parse_document(
            r#"<html><body>
            <span id="nat">Natlan</span>
            <h3>Natlan</h3><ul><li><a href="/q/1">Outside</a></li></ul>
            <div id="article-body"><h3>Natlan</h3><ul><li><a href="/q/2">Inside</a></li></ul></div>
            </body></html>"#,
        );
        let regions = vec![RegionSpec::new("Natlan", "nat", "none")];

        let quests = scrape_index(&doc, &base_url(), &regions);
        assert_eq!(quests.len(), 1);
        assert_eq!(quests[0].name, "Inside");
    }
}
