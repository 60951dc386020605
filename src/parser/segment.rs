/// Split a fragment's schedule links into (first semester, second semester).
///
/// The page carries no machine-readable association between a semester
/// heading and the links after it; the only usable signal is how the
/// heading paragraphs are positioned. The split therefore runs on index
/// arithmetic over the marker positions, not on any structural mapping:
///
/// - no markers: nothing published, both halves empty;
/// - one marker: only the second-semester heading exists (first-semester
///   files are not up yet), so everything after the marker index belongs to
///   semester two;
/// - two markers `first < last`: the paragraph gap `last - first` stands in
///   for the first semester's link count, and the first `gap - 1` links go
///   to semester one, the rest to semester two.
///
/// Markers beyond the first and last are ignored as noise. Slice bounds
/// running past the link count clamp silently: a heading gap larger than
/// the link list puts every link in semester one and none in semester two.
/// This arithmetic is load-bearing for compatibility with the live page;
/// do not "fix" it here.
pub fn split_semesters(links: &[String], markers: &[usize]) -> (Vec<String>, Vec<String>) {
    match markers {
        [] => (Vec::new(), Vec::new()),
        [only] => {
            let start = (only + 1).min(links.len());
            (Vec::new(), links[start..].to_vec())
        }
        [first, .., last] => {
            let gap = last - first;
            let split = (gap - 1).min(links.len());
            (links[..split].to_vec(), links[split..].to_vec())
        }
    }
}
