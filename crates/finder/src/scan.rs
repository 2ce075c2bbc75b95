//! Shell-glob filesystem scanning for concrete search patterns.
//!
//! Expands a concrete pattern string (produced by instantiating a template
//! with a search dict, wildcards left as literal `*`) against the local
//! filesystem. Semantics follow the standard shell glob: `*` matches within
//! one path component only and never matches a leading dot. Unreadable or
//! missing directories contribute no matches.

use std::fs;
use std::path::Path;

/// What the final pattern component must name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanKind {
    /// Matches are regular files.
    Files,
    /// Matches are directories; results carry a trailing `/`.
    Directories,
}

/// Expands `pattern` against the filesystem.
///
/// Matches are returned in directory-read order; the caller sorts them.
pub(crate) fn scan(pattern: &str, kind: ScanKind) -> Vec<String> {
    let absolute = pattern.starts_with('/');
    let components: Vec<&str> = pattern.split('/').filter(|c| !c.is_empty()).collect();
    if components.is_empty() {
        return Vec::new();
    }

    let mut current: Vec<String> = vec![if absolute {
        "/".to_string()
    } else {
        String::new()
    }];

    for (i, comp) in components.iter().enumerate() {
        let last = i + 1 == components.len();
        let mut next = Vec::new();
        for dir in &current {
            expand_component(dir, comp, last, kind, &mut next);
        }
        current = next;
        if current.is_empty() {
            break;
        }
    }

    if kind == ScanKind::Directories {
        current.iter_mut().for_each(|d| d.push('/'));
    }
    current
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

fn keep(path: &str, last: bool, kind: ScanKind) -> bool {
    let p = Path::new(path);
    if !last || kind == ScanKind::Directories {
        p.is_dir()
    } else {
        p.is_file()
    }
}

fn expand_component(dir: &str, comp: &str, last: bool, kind: ScanKind, out: &mut Vec<String>) {
    if !comp.contains('*') {
        let candidate = join(dir, comp);
        if keep(&candidate, last, kind) {
            out.push(candidate);
        }
        return;
    }

    let read_from = if dir.is_empty() { "." } else { dir };
    let Ok(entries) = fs::read_dir(read_from) else {
        return;
    };

    for entry in entries.flatten() {
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if component_matches(&name, comp) {
            let candidate = join(dir, &name);
            if keep(&candidate, last, kind) {
                out.push(candidate);
            }
        }
    }
}

/// Matches one path component against a pattern component containing `*`.
///
/// The pattern is split at `*` into literal segments that must appear in
/// order; a `*` never matches a leading dot.
fn component_matches(name: &str, comp: &str) -> bool {
    if name.starts_with('.') && !comp.starts_with('.') {
        return false;
    }

    let segments: Vec<&str> = comp.split('*').collect();

    // First segment is a prefix, last is a suffix, the rest appear in order.
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };
    if !name.starts_with(first) {
        return false;
    }
    let mut pos = first.len();

    let Some((lastseg, middle)) = rest.split_last() else {
        // No '*' at all: exact match (not reached; handled by the caller).
        return name == comp;
    };

    for seg in middle {
        if seg.is_empty() {
            continue;
        }
        match name[pos..].find(seg) {
            Some(at) => pos = pos + at + seg.len(),
            None => return false,
        }
    }

    name.len() >= pos + lastseg.len() && name[pos..].ends_with(lastseg)
}
