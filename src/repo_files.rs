//! Repository Browsing Helpers
//!
//! Parsing of `owner/repo` slugs, listing order, breadcrumbs and sizes for
//! the project Files tab.

use std::cmp::Ordering;

use crate::models::{EntryKind, RepoEntry};

/// Split `owner/repo`; both parts must be non-empty
pub fn split_slug(slug: &str) -> Option<(&str, &str)> {
    let (owner, repo) = slug.trim().split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner, repo))
}

/// `owner/repo` from a repository URL (last two path segments)
pub fn slug_from_url(url: &str) -> Option<String> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let repo = segments.next().filter(|s| !s.is_empty())?;
    let owner = segments.next().filter(|s| !s.is_empty() && !s.contains(':'))?;
    Some(format!("{}/{}", owner, repo.trim_end_matches(".git")))
}

/// Directories first, then files, each by name
pub fn sort_entries(entries: &mut [RepoEntry]) {
    entries.sort_by(|a, b| match (a.kind, b.kind) {
        (EntryKind::Dir, EntryKind::Dir) => a.name.cmp(&b.name),
        (EntryKind::Dir, _) => Ordering::Less,
        (_, EntryKind::Dir) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

/// Root crumb named after the repository, then one per path segment
pub fn breadcrumbs(root_name: &str, path: &str) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb { name: root_name.to_string(), path: String::new() }];
    let mut current = String::new();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(part);
        crumbs.push(Crumb { name: part.to_string(), path: current.clone() });
    }
    crumbs
}

/// Human-readable size with one decimal; a trailing `.0` is dropped
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let text = format!("{:.1}", value);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{} {}", text, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, kind: EntryKind) -> RepoEntry {
        RepoEntry {
            name: name.into(),
            path: name.into(),
            kind,
            size: 0,
            html_url: None,
            download_url: None,
        }
    }

    #[test]
    fn test_split_slug() {
        assert_eq!(split_slug("acme/site"), Some(("acme", "site")));
        assert_eq!(split_slug("acme/"), None);
        assert_eq!(split_slug("/site"), None);
        assert_eq!(split_slug("site"), None);
        assert_eq!(split_slug("a/b/c"), None);
    }

    #[test]
    fn test_slug_from_url() {
        assert_eq!(slug_from_url("https://github.com/acme/site").as_deref(), Some("acme/site"));
        assert_eq!(slug_from_url("https://github.com/acme/site.git/").as_deref(), Some("acme/site"));
        assert_eq!(slug_from_url("site"), None);
    }

    #[test]
    fn test_sort_dirs_first() {
        let mut entries = vec![
            entry("zeta.md", EntryKind::File),
            entry("src", EntryKind::Dir),
            entry("README.md", EntryKind::File),
            entry("docs", EntryKind::Dir),
        ];
        sort_entries(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["docs", "src", "README.md", "zeta.md"]);
    }

    #[test]
    fn test_breadcrumbs() {
        let crumbs = breadcrumbs("acme/site", "src/components/");
        assert_eq!(crumbs.len(), 3);
        assert_eq!(crumbs[0], Crumb { name: "acme/site".into(), path: "".into() });
        assert_eq!(crumbs[2], Crumb { name: "components".into(), path: "src/components".into() });
        assert_eq!(breadcrumbs("r", "").len(), 1);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3 GB");
    }
}
