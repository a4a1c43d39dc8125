//! Path splitting and joining for `/`-delimited storage paths.

/// The two halves of a path: the directory it lives in and its last segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPath<'a> {
    pub parent: &'a str,
    pub name: &'a str,
}

/// Split `path` at its last `/`.
///
/// A path without any `/` is a top-level name, so its parent is `/`. An empty
/// parent also becomes `/`. Segment contents are not validated here.
pub fn split_path(path: &str) -> SplitPath<'_> {
    let (parent, name) = match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    };
    SplitPath {
        parent: if parent.is_empty() { "/" } else { parent },
        name,
    }
}

/// Build the path of `name` inside `dir`.
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}
