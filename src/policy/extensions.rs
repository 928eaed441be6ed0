/// File extensions that never lead to crawlable HTML
///
/// Images, audio, video, archives, office documents, executables, and raw
/// data dumps. Matched against the lowercased extension of the final path
/// segment. Extend this list rather than touching the policy control flow.
const DENIED_EXTENSIONS: &[&str] = &[
    "css", "js", "bmp", "gif", "jpeg", "jpg", "ico", "png", "tif", "tiff", "mid", "mp2", "mp3",
    "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf", "ps", "eps",
    "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data", "dat", "exe", "bz2",
    "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll", "cnf", "tgz", "sha1", "thmx",
    "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv", "swf", "wma", "zip", "rar", "gz",
];

/// Checks whether a path ends in a denylisted binary/media extension
///
/// `path` must already be lowercased. Only the final path segment is
/// considered; a denylisted extension in an intermediate segment (e.g.
/// `/files.zip/index.html`) does not reject the URL.
pub fn has_denied_extension(path: &str) -> bool {
    let segment = path.rsplit('/').next().unwrap_or("");
    match segment.rsplit_once('.') {
        Some((_, ext)) => DENIED_EXTENSIONS.contains(&ext),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_binary_extensions() {
        assert!(has_denied_extension("/papers/thesis.pdf"));
        assert!(has_denied_extension("/img/logo.png"));
        assert!(has_denied_extension("/releases/tool.tar.gz"));
        assert!(has_denied_extension("/static/site.css"));
    }

    #[test]
    fn test_html_and_extensionless_paths_pass() {
        assert!(!has_denied_extension("/about"));
        assert!(!has_denied_extension("/index.html"));
        assert!(!has_denied_extension("/index.php"));
        assert!(!has_denied_extension("/"));
    }

    #[test]
    fn test_only_final_segment_matters() {
        assert!(!has_denied_extension("/files.zip/index.html"));
        assert!(has_denied_extension("/files/archive.zip"));
    }

    #[test]
    fn test_dotfile_segment() {
        assert!(has_denied_extension("/.css"));
        assert!(!has_denied_extension("/.htaccess"));
    }
}
