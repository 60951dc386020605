use crate::error::ScrapeError;

use super::fragments::InstituteFragment;

/// Spreadsheet extensions the schedule files are published with.
const SCHEDULE_EXTENSIONS: &[&str] = &["xls", "xlsx"];

/// Downloadable schedule links of one fragment, in document order.
///
/// A fragment whose link container is missing entirely gets a
/// `StructureMismatch`, never a silent empty list: callers must be able to
/// tell "no schedules published" apart from "page layout changed".
pub fn extract_links(fragment: &InstituteFragment) -> Result<Vec<String>, ScrapeError> {
    let hrefs = fragment
        .link_hrefs
        .as_ref()
        .ok_or(ScrapeError::StructureMismatch("div.su-clearfix"))?;

    Ok(hrefs
        .iter()
        .filter(|href| {
            extension_of(href)
                .is_some_and(|ext| SCHEDULE_EXTENSIONS.contains(&ext.as_str()))
        })
        .cloned()
        .collect())
}

/// Lower-cased substring after the final '.', or `None` when there is no
/// dot to split on.
pub fn extension_of(url: &str) -> Option<String> {
    url.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(hrefs: Option<Vec<&str>>) -> InstituteFragment {
        InstituteFragment {
            name: Some("ИИТ".into()),
            paragraphs: Vec::new(),
            link_hrefs: hrefs.map(|h| h.into_iter().map(str::to_string).collect()),
        }
    }

    #[test]
    fn keeps_only_spreadsheet_links_in_order() {
        let f = fragment(Some(vec![
            "/files/a.xls",
            "/files/readme.pdf",
            "/files/b.xlsx",
            "/files/c.doc",
            "/files/d.xls",
        ]));
        let links = extract_links(&f).unwrap();
        assert_eq!(links, vec!["/files/a.xls", "/files/b.xlsx", "/files/d.xls"]);
    }

    #[test]
    fn upper_case_extensions_pass() {
        let f = fragment(Some(vec!["/files/A.XLS", "/files/B.Xlsx"]));
        let links = extract_links(&f).unwrap();
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn extensionless_links_are_dropped() {
        let f = fragment(Some(vec!["/files/no-extension", "/files/ok.xlsx"]));
        let links = extract_links(&f).unwrap();
        assert_eq!(links, vec!["/files/ok.xlsx"]);
    }

    #[test]
    fn empty_container_is_a_valid_empty_result() {
        let f = fragment(Some(vec![]));
        assert!(extract_links(&f).unwrap().is_empty());
    }

    #[test]
    fn missing_container_is_structure_mismatch() {
        let f = fragment(None);
        assert!(matches!(
            extract_links(&f).unwrap_err(),
            ScrapeError::StructureMismatch("div.su-clearfix")
        ));
    }

    #[test]
    fn extension_of_splits_on_final_dot() {
        assert_eq!(extension_of("a.b.XLSX").as_deref(), Some("xlsx"));
        assert_eq!(extension_of("plain").as_deref(), None);
        assert_eq!(extension_of("trailing.").as_deref(), Some(""));
    }
}
