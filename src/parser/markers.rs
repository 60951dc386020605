use super::fragments::InstituteFragment;

/// Token that marks a paragraph as a semester heading.
const SEMESTER_TOKEN: &str = "семестр";

/// Indices of semester-heading paragraphs, ascending.
///
/// Paragraph text is normalized before matching: non-breaking spaces become
/// plain spaces and the text is lower-cased, so "1 Семестр" and
/// "1\u{a0}семестр" both count.
pub fn locate_markers(fragment: &InstituteFragment) -> Vec<usize> {
    fragment
        .paragraphs
        .iter()
        .enumerate()
        .filter(|(_, text)| {
            text.replace('\u{a0}', " ").to_lowercase().contains(SEMESTER_TOKEN)
        })
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(paragraphs: &[&str]) -> InstituteFragment {
        InstituteFragment {
            name: None,
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
            link_hrefs: Some(Vec::new()),
        }
    }

    #[test]
    fn finds_both_semester_headings() {
        let f = fragment(&[
            "Расписание занятий",
            "1 семестр",
            "очная форма",
            "2 семестр",
        ]);
        assert_eq!(locate_markers(&f), vec![1, 3]);
    }

    #[test]
    fn match_is_case_insensitive() {
        let f = fragment(&["1 СЕМЕСТР", "2 Семестр"]);
        assert_eq!(locate_markers(&f), vec![0, 1]);
    }

    #[test]
    fn non_breaking_spaces_are_normalized() {
        let f = fragment(&["1\u{a0}семестр"]);
        assert_eq!(locate_markers(&f), vec![0]);
    }

    #[test]
    fn no_headings_means_empty() {
        let f = fragment(&["Расписание", "очная форма"]);
        assert!(locate_markers(&f).is_empty());
    }
}
