use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;

static COLUMN_CONTENT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.su-column-content").unwrap());
static SPOILER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.su-spoiler").unwrap());
static HEADING_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());
static PARAGRAPH_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static CLEARFIX_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.su-clearfix").unwrap());
static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// One institute's slice of the schedule page, detached from the DOM.
///
/// `link_hrefs` is `None` when the fragment has no link container at all,
/// which is a layout change, not "no schedules published"; the two must
/// stay distinguishable downstream.
#[derive(Debug, Clone)]
pub struct InstituteFragment {
    pub name: Option<String>,
    /// Paragraph texts in document order.
    pub paragraphs: Vec<String>,
    /// Raw href values from the link container, in document order, unfiltered.
    pub link_hrefs: Option<Vec<String>>,
}

/// Split the schedule page into per-institute fragments.
///
/// The page is recognized by the column holding all schedules
/// (`su-column-content`); a page without it means the layout changed. A
/// column with no spoiler blocks is not a layout change: between terms the
/// page can legitimately list no institutes, and that parses into zero
/// fragments.
pub fn split_fragments(html: &str) -> Result<Vec<InstituteFragment>, ScrapeError> {
    let document = Html::parse_document(html);

    let column = document
        .select(&COLUMN_CONTENT_SEL)
        .next()
        .ok_or(ScrapeError::StructureMismatch("div.su-column-content"))?;

    Ok(column.select(&SPOILER_SEL).map(read_fragment).collect())
}

fn read_fragment(spoiler: ElementRef) -> InstituteFragment {
    let name = spoiler
        .select(&HEADING_SEL)
        .next()
        .map(|h| element_text(h).trim().to_string());

    let paragraphs = spoiler.select(&PARAGRAPH_SEL).map(element_text).collect();

    let link_hrefs = spoiler.select(&CLEARFIX_SEL).next().map(|container| {
        container
            .select(&ANCHOR_SEL)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect()
    });

    InstituteFragment {
        name,
        paragraphs,
        link_hrefs,
    }
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_splits_into_four_institutes() {
        let html = std::fs::read_to_string("tests/fixtures/shedule.html").unwrap();
        let fragments = split_fragments(&html).unwrap();
        assert_eq!(fragments.len(), 4);
        assert_eq!(
            fragments[0].name.as_deref(),
            Some("Институт информационных технологий")
        );
        assert_eq!(fragments[2].name.as_deref(), Some("Морской институт"));
    }

    #[test]
    fn paragraphs_keep_document_order() {
        let html = std::fs::read_to_string("tests/fixtures/shedule.html").unwrap();
        let fragments = split_fragments(&html).unwrap();
        let first = &fragments[0];
        assert!(first.paragraphs.len() >= 4);
        assert!(first.paragraphs[1].to_lowercase().contains("семестр"));
    }

    #[test]
    fn missing_link_container_is_none_not_empty() {
        let html = std::fs::read_to_string("tests/fixtures/shedule.html").unwrap();
        let fragments = split_fragments(&html).unwrap();
        // Third institute in the fixture has no su-clearfix block.
        assert!(fragments[2].link_hrefs.is_none());
        assert!(fragments[0].link_hrefs.is_some());
    }

    #[test]
    fn page_without_column_is_structure_mismatch() {
        let err = split_fragments("<html><body><div>nothing</div></body></html>").unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::StructureMismatch("div.su-column-content")
        ));
    }

    #[test]
    fn column_without_spoilers_is_a_valid_empty_page() {
        let html = r#"<div class="su-column-content"><p>empty</p></div>"#;
        assert!(split_fragments(html).unwrap().is_empty());
    }
}
