#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub path: String,
}

impl ResultRow {
    pub fn from_path(path: String) -> Self {
        let title = file_name_of(&path).to_string();
        Self { title, path }
    }
}

pub fn rows_from_paths(paths: Vec<String>) -> Vec<ResultRow> {
    paths.into_iter().map(ResultRow::from_path).collect()
}

pub fn file_name_of(path: &str) -> &str {
    match path.rsplit(['\\', '/']).next() {
        Some(tail) if !tail.is_empty() => tail,
        _ => path,
    }
}
