//! Fixed-width entry blobs for children and parents.
//!
//! Both lists are stored as concatenations of zero-padded identifiers. A
//! blob whose length does not fit the expected layout, or holding an entry
//! that is no padded identifier, is unusable, and the readers here return
//! `None` for it instead of failing.

use multiverse::layout::child_width;
use multiverse::{BoardId, RULESET_COUNT};

/// Most parents retained per board.
pub const MAX_PARENTS: usize = RULESET_COUNT;

/// Width of each child entry of `id`, `None` for a non-canonical id.
pub fn children_width(id: &BoardId) -> Option<usize> {
    id.side().map(child_width)
}

/// Packs children into `width`-byte entries.
///
/// Returns the offending child if one is wider than `width`.
pub fn pack_children(children: &[BoardId], width: usize) -> Result<Vec<u8>, BoardId> {
    let mut blob = Vec::with_capacity(children.len() * width);
    for child in children {
        let entry = child.padded(width).ok_or_else(|| child.clone())?;
        blob.extend_from_slice(&entry);
    }
    Ok(blob)
}

/// Unpacks exactly `count` entries of `width` bytes.
pub fn unpack_children(blob: &[u8], width: usize, count: usize) -> Option<Vec<BoardId>> {
    if width == 0 || blob.len() != width * count {
        return None;
    }
    blob.chunks_exact(width).map(BoardId::from_padded).collect()
}

/// True when [`unpack_children`] would succeed, without collecting.
pub fn children_readable(blob: &[u8], width: usize, count: usize) -> bool {
    width != 0
        && blob.len() == width * count
        && blob
            .chunks_exact(width)
            .all(|entry| BoardId::from_padded(entry).is_some())
}

/// The entry for one ruleset id, without unpacking the rest.
pub fn child_at(blob: &[u8], width: usize, count: usize, rule_id: usize) -> Option<BoardId> {
    if width == 0 || blob.len() != width * count || rule_id >= count {
        return None;
    }
    let start = rule_id * width;
    BoardId::from_padded(&blob[start..start + width])
}

/// Packs parents at the width of the widest one. Returns `(width, blob)`.
pub fn pack_parents(parents: &[BoardId]) -> (usize, Vec<u8>) {
    let width = parents.iter().map(BoardId::len).max().unwrap_or(0);
    let mut blob = Vec::with_capacity(parents.len() * width);
    for parent in parents {
        blob.extend_from_slice(parent.as_bytes());
        blob.resize(blob.len() + width - parent.len(), 0);
    }
    (width, blob)
}

/// Unpacks `width`-byte parent entries. An empty list is stored as width 0.
pub fn unpack_parents(blob: &[u8], width: usize) -> Option<Vec<BoardId>> {
    if width == 0 {
        return blob.is_empty().then(Vec::new);
    }
    if blob.len() % width != 0 {
        return None;
    }
    blob.chunks_exact(width).map(BoardId::from_padded).collect()
}

/// Sorts largest first; equal lengths keep their order.
pub fn sort_parents(parents: &mut [BoardId]) {
    parents.sort_by(|a, b| b.len().cmp(&a.len()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(hex: &str) -> BoardId {
        hex.parse().unwrap()
    }

    #[test]
    fn children_width_follows_side() {
        assert_eq!(children_width(&BoardId::single_cell()), Some(1));
        assert_eq!(children_width(&id("a0")), Some(1)); // 3x3 -> 5x5 children
        assert_eq!(children_width(&id("24")), Some(2)); // 5x5 -> 7x7 children
        assert_eq!(children_width(&id("0200")), Some(2)); // 7x7 -> 9x9 children
        assert_eq!(children_width(&BoardId::zero()), None);
        assert_eq!(children_width(&id("6000")), None);
    }

    #[test]
    fn children_roundtrip_with_padding() {
        let children = vec![id("60"), BoardId::zero(), id("2440"), id("0200")];
        let blob = pack_children(&children, 2).unwrap();
        assert_eq!(blob, vec![0x60, 0, 0, 0, 0x24, 0x40, 0x02, 0]);
        assert_eq!(unpack_children(&blob, 2, 4), Some(children.clone()));
        assert_eq!(child_at(&blob, 2, 4, 2), Some(id("2440")));
        assert_eq!(child_at(&blob, 2, 4, 4), None);
    }

    #[test]
    fn child_wider_than_entry_is_rejected() {
        let children = vec![id("60"), id("2440")];
        assert_eq!(pack_children(&children, 1), Err(id("2440")));
    }

    #[test]
    fn inconsistent_children_blob_is_unusable() {
        assert_eq!(unpack_children(&[0x60, 0x00, 0x80], 2, 2), None);
        assert_eq!(unpack_children(&[], 1, 1), None);
        assert_eq!(child_at(&[0x60], 1, 2, 0), None);
    }

    #[test]
    fn entry_with_bits_past_its_width_is_unusable() {
        // 0x03 ends in the 7x7 ring, which needs two bytes.
        assert_eq!(unpack_children(&[0x60, 0x03], 1, 2), None);
        assert_eq!(child_at(&[0x03, 0x60], 1, 2, 0), None);
        assert_eq!(child_at(&[0x03, 0x60], 1, 2, 1), Some(id("60")));
        assert_eq!(unpack_parents(&[0x80, 0xff], 1), None);
        assert!(!children_readable(&[0x60, 0x03], 1, 2));
        assert!(children_readable(&[0x60, 0x00], 1, 2));
    }

    #[test]
    fn parents_roundtrip() {
        let mut parents = vec![id("80"), id("2440"), id("60")];
        sort_parents(&mut parents);
        assert_eq!(parents, vec![id("2440"), id("80"), id("60")]);
        let (width, blob) = pack_parents(&parents);
        assert_eq!(width, 2);
        assert_eq!(blob, vec![0x24, 0x40, 0x80, 0, 0x60, 0]);
        assert_eq!(unpack_parents(&blob, width), Some(parents));
    }

    #[test]
    fn empty_parents() {
        let (width, blob) = pack_parents(&[]);
        assert_eq!((width, blob.len()), (0, 0));
        assert_eq!(unpack_parents(&[], 0), Some(vec![]));
        assert_eq!(unpack_parents(&[0x80], 0), None);
        assert_eq!(unpack_parents(&[0x80, 0, 0], 2), None);
    }
}
