use std::cmp::Ordering;

const SHORTCUT_SUFFIX: &str = ".ink";
const EXECUTABLE_SUFFIX: &str = ".exe";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriorityClass {
    Shortcut,
    Executable,
    Plain,
}

pub fn classify(path: &str) -> PriorityClass {
    if ends_with_ignore_case(path, SHORTCUT_SUFFIX) {
        return PriorityClass::Shortcut;
    }
    if ends_with_ignore_case(path, EXECUTABLE_SUFFIX) {
        return PriorityClass::Executable;
    }
    PriorityClass::Plain
}

pub fn priority_order(a: &str, b: &str) -> Ordering {
    classify(a).cmp(&classify(b))
}

pub fn paginate(lines: Vec<String>, offset: usize, limit: usize) -> Vec<String> {
    lines.into_iter().skip(offset).take(limit).collect()
}

pub fn rank_page(page: &mut [String]) {
    page.sort_by(|a, b| priority_order(a, b));
}

// The visible page is cut first and reordered second; entries outside the
// requested window never migrate into it.
pub fn page_results(lines: Vec<String>, offset: usize, limit: usize) -> Vec<String> {
    let mut page = paginate(lines, offset, limit);
    rank_page(&mut page);
    page
}

fn ends_with_ignore_case(path: &str, suffix: &str) -> bool {
    let path = path.as_bytes();
    let suffix = suffix.as_bytes();
    path.len() >= suffix.len() && path[path.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
