//! File name string helpers

/// Extension of a file name, or the whole name if it has no dot
///
/// ```
/// assert_eq!(snaplabel::filename::file_extension("picture.jpg"), "jpg");
/// ```
pub fn file_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(pos) => &filename[pos + 1..],
        None => filename,
    }
}

/// File name without its leading path
///
/// ```
/// assert_eq!(snaplabel::filename::basename("/home/picwick/cell.png"), "cell.png");
/// ```
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// File name without its extension
pub fn remove_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(pos) => &filename[..pos],
        None => filename,
    }
}
