//! Listing and lookup helpers for notes, folders and tags.
//!
//! Folder filtering and tag-name resolution are pure functions over already
//! listed data, so the shell can apply them to its cached copies without
//! going back to the store.

use crate::error::Result;
use crate::model::{Folder, FolderId, Note, Tag};
use crate::store::DataStore;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub fn notes<S: DataStore>(store: &S) -> Result<Vec<Note>> {
    store.list_notes()
}

pub fn folders<S: DataStore>(store: &S) -> Result<Vec<Folder>> {
    store.list_folders()
}

pub fn tags<S: DataStore>(store: &S) -> Result<Vec<Tag>> {
    store.list_tags()
}

/// Notes owned by `folder`, or every note when `folder` is `None`.
///
/// Only the note's own folder counts; notes in sub-folders are not included.
/// Notes whose folder no longer exists never match an active filter.
pub fn in_folder(notes: &[Note], folder: Option<&str>) -> Vec<Note> {
    match folder {
        None => notes.to_vec(),
        Some(folder) => notes
            .iter()
            .filter(|n| n.folder_id == folder)
            .cloned()
            .collect(),
    }
}

/// Display names for a note's tags, in the note's order.
/// Ids that resolve to no tag are skipped.
pub fn tag_names(note: &Note, tags: &[Tag]) -> Vec<String> {
    let by_id: HashMap<&str, &str> = tags
        .iter()
        .map(|t| (t.id.as_str(), t.name.as_str()))
        .collect();
    note.tags
        .iter()
        .filter_map(|id| by_id.get(id.as_str()).map(|name| name.to_string()))
        .collect()
}

/// A folder with its nesting depth (0 for top level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderNode {
    pub folder: Folder,
    pub depth: usize,
}

/// Flattens folders depth-first, children right after their parent, siblings
/// in storage order.
///
/// A folder whose parent is missing is shown at the top level. Folders caught
/// in a parent cycle are emitted once, as top-level entries.
pub fn folder_tree(folders: &[Folder]) -> Vec<FolderNode> {
    let ids: HashSet<&str> = folders.iter().map(|f| f.id.as_str()).collect();
    let mut children: HashMap<&str, Vec<&Folder>> = HashMap::new();
    let mut roots = Vec::new();

    for folder in folders {
        match folder.parent_id.as_deref() {
            Some(parent) if parent != folder.id && ids.contains(parent) => {
                children.entry(parent).or_default().push(folder)
            }
            _ => roots.push(folder),
        }
    }

    let mut out = Vec::with_capacity(folders.len());
    let mut visited: HashSet<FolderId> = HashSet::new();

    for root in roots {
        walk(root, 0, &children, &mut visited, &mut out);
    }
    // Whatever is left hangs off a cycle.
    for folder in folders {
        if !visited.contains(&folder.id) {
            walk(folder, 0, &children, &mut visited, &mut out);
        }
    }
    out
}

fn walk(
    folder: &Folder,
    depth: usize,
    children: &HashMap<&str, Vec<&Folder>>,
    visited: &mut HashSet<FolderId>,
    out: &mut Vec<FolderNode>,
) {
    if !visited.insert(folder.id.clone()) {
        return;
    }
    out.push(FolderNode {
        folder: folder.clone(),
        depth,
    });
    if let Some(kids) = children.get(folder.id.as_str()) {
        for child in kids {
            walk(child, depth + 1, children, visited, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_everything_from_store() {
        let store = StoreFixture::sample().store;
        assert_eq!(notes(&store).unwrap().len(), 2);
        assert_eq!(folders(&store).unwrap().len(), 3);
        assert_eq!(tags(&store).unwrap().len(), 3);
    }

    #[test]
    fn folder_filter() {
        let store = StoreFixture::new()
            .with_notes(2, "1")
            .with_notes(1, "2")
            .store;
        let all = notes(&store).unwrap();

        assert_eq!(in_folder(&all, None).len(), 3);
        assert_eq!(in_folder(&all, Some("1")).len(), 2);
        assert_eq!(in_folder(&all, Some("2")).len(), 1);
        assert!(in_folder(&all, Some("deleted-folder")).is_empty());
    }

    #[test]
    fn folder_filter_does_not_include_subfolders() {
        let store = StoreFixture::sample().with_note("Sub", "", "3").store;
        let all = notes(&store).unwrap();
        let work: Vec<_> = in_folder(&all, Some("2"))
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(work, vec!["Work Tasks"]);
    }

    #[test]
    fn tag_names_skip_dangling() {
        let store = StoreFixture::new()
            .with_tag("1", "important")
            .with_tag("3", "ideas")
            .with_tagged_note("N", &["3", "gone", "1"])
            .store;
        let note = &notes(&store).unwrap()[0];
        let names = tag_names(note, &tags(&store).unwrap());
        assert_eq!(names, vec!["ideas", "important"]);
    }

    #[test]
    fn tree_of_sample_folders() {
        let store = StoreFixture::sample().store;
        let tree = folder_tree(&folders(&store).unwrap());
        let flat: Vec<_> = tree
            .iter()
            .map(|n| (n.folder.name.as_str(), n.depth))
            .collect();
        assert_eq!(flat, vec![("Personal", 0), ("Work", 0), ("Projects", 1)]);
    }

    #[test]
    fn tree_handles_deep_orphans_and_cycles() {
        let folders = vec![
            Folder::new("a", "A", None),
            Folder::new("b", "B", Some("a")),
            Folder::new("c", "C", Some("b")),
            Folder::new("o", "Orphan", Some("missing")),
            Folder::new("x", "X", Some("y")),
            Folder::new("y", "Y", Some("x")),
            Folder::new("s", "Self", Some("s")),
        ];
        let tree = folder_tree(&folders);

        assert_eq!(tree.len(), folders.len());
        let depth_of = |id: &str| tree.iter().find(|n| n.folder.id == id).unwrap().depth;
        assert_eq!(depth_of("c"), 2);
        assert_eq!(depth_of("o"), 0);
        assert_eq!(depth_of("s"), 0);
        assert_eq!(depth_of("x"), 0);
        assert_eq!(depth_of("y"), 1);
    }
}
