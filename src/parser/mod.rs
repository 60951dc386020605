pub mod fragments;
pub mod links;
pub mod markers;
pub mod segment;

use serde::Serialize;
use tracing::warn;

use crate::error::ScrapeError;
use crate::semester::Semester;

/// One institute's segmented schedule links. An institute that has not
/// published anything yet carries two empty lists.
#[derive(Debug, Clone, Serialize)]
pub struct InstituteRecord {
    pub name: String,
    pub semester1: Vec<String>,
    pub semester2: Vec<String>,
}

impl InstituteRecord {
    pub fn links_for(&self, semester: Semester) -> &[String] {
        match semester {
            Semester::First => &self.semester1,
            Semester::Second => &self.semester2,
        }
    }
}

/// A fragment that failed link extraction, kept next to the records so one
/// broken institute never hides the others.
#[derive(Debug)]
pub struct InstituteFailure {
    pub institute: String,
    pub error: ScrapeError,
}

#[derive(Debug)]
pub struct PageReport {
    pub records: Vec<InstituteRecord>,
    pub failures: Vec<InstituteFailure>,
}

/// Parse the schedule page into per-institute records.
///
/// A page that cannot be split into institute blocks at all is an error for
/// the whole page. Past that point failures are scoped: a fragment whose
/// link container is missing is recorded under its institute name and
/// iteration continues.
pub fn collect(html: &str) -> Result<PageReport, ScrapeError> {
    let fragments = fragments::split_fragments(html)?;

    let mut records = Vec::with_capacity(fragments.len());
    let mut failures = Vec::new();

    for (position, fragment) in fragments.iter().enumerate() {
        let name = fragment
            .name
            .clone()
            .unwrap_or_else(|| format!("институт №{}", position + 1));

        if fragment.name.is_none() {
            warn!(institute = %name, "fragment has no heading");
            failures.push(InstituteFailure {
                institute: name,
                error: ScrapeError::StructureMismatch("h3"),
            });
            continue;
        }

        match links::extract_links(fragment) {
            Ok(file_links) => {
                let marker_indexes = markers::locate_markers(fragment);
                let (semester1, semester2) =
                    segment::split_semesters(&file_links, &marker_indexes);
                records.push(InstituteRecord {
                    name,
                    semester1,
                    semester2,
                });
            }
            Err(error) => {
                warn!(institute = %name, %error, "link extraction failed");
                failures.push(InstituteFailure {
                    institute: name,
                    error,
                });
            }
        }
    }

    Ok(PageReport { records, failures })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_report() -> PageReport {
        let html = std::fs::read_to_string("tests/fixtures/shedule.html").unwrap();
        collect(&html).unwrap()
    }

    #[test]
    fn broken_fragment_does_not_hide_the_others() {
        let report = fixture_report();
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].institute, "Морской институт");
        assert!(matches!(
            report.failures[0].error,
            ScrapeError::StructureMismatch("div.su-clearfix")
        ));
    }

    #[test]
    fn two_marker_institute_splits_on_the_gap() {
        let report = fixture_report();
        let it = &report.records[0];
        assert_eq!(it.name, "Институт информационных технологий");
        assert_eq!(it.semester1, vec!["/uploads/iit/osen.xls"]);
        assert_eq!(
            it.semester2,
            vec![
                "/uploads/iit/vesna-1.xls",
                "/uploads/iit/vesna-2.xlsx",
                "/uploads/iit/vesna-3.xls",
                "/uploads/iit/vesna-4.xlsx",
            ]
        );
    }

    #[test]
    fn single_marker_institute_is_second_semester_only() {
        let report = fixture_report();
        let it = &report.records[1];
        assert!(it.semester1.is_empty());
        assert_eq!(it.semester2, vec!["/uploads/rieits/vesna.xlsx"]);
    }

    #[test]
    fn no_markers_means_nothing_published() {
        let report = fixture_report();
        let it = &report.records[2];
        assert_eq!(it.name, "Юридический институт");
        assert!(it.semester1.is_empty());
        assert!(it.semester2.is_empty());
    }

    #[test]
    fn unparseable_page_aborts_whole_collect() {
        assert!(collect("<html><body></body></html>").is_err());
    }
}
