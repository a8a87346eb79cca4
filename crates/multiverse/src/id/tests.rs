//! Tests for board identifiers and the symmetric codec.

use super::{decode, domain_cells, encode, encode_or_zero, BoardId, BoardIdParseError};
use crate::board::{Board, ALIVE};
use crate::layout::{byte_width, domain_bits};
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

fn cross(side: usize) -> Board {
    let c = side / 2;
    Board::from_fn(side, |r, col| u8::from((r == c) != (col == c)))
}

// ============================================================================
// Encoding vectors
// ============================================================================

#[test]
fn test_single_cell_encodes_msb_first() {
    assert_eq!(encode(&Board::single_cell()).as_bytes(), &[0x80]);
    assert_eq!(encode(&Board::dead(1)).as_bytes(), &[0x00]);
}

#[test]
fn test_small_board_vectors() {
    let diamond = Board::from_rows(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]);
    assert_eq!(encode(&diamond).to_hex(), "20");

    let plus = Board::from_rows(&[[0, 1, 0], [1, 1, 1], [0, 1, 0]]);
    assert_eq!(encode(&plus).to_hex(), "a0");

    let ring = Board::from_rows(&[[1, 1, 1], [1, 0, 1], [1, 1, 1]]);
    assert_eq!(encode(&ring).to_hex(), "60");

    assert_eq!(encode(&cross(5)).to_hex(), "24");
    assert_eq!(encode(&cross(7)).to_hex(), "2440");
}

#[test]
fn test_corner_only_board_keeps_trailing_zero_byte() {
    let mut corners = Board::dead(7);
    corners.set_orbit(0, 0, ALIVE);
    let id = encode(&corners);
    assert_eq!(id.as_bytes(), &[0x02, 0x00]);
    assert_eq!(id.side(), Some(7));
    assert_eq!(decode(&id, 7), corners);
}

#[test]
fn test_encoding_is_prefix_stable_under_padding() {
    // Embedding a board in dead rings only appends zero bits.
    let ring = Board::from_rows(&[[1, 1, 1], [1, 0, 1], [1, 1, 1]]);
    let big = Board::from_fn(7, |r, c| {
        if (2..5).contains(&r) && (2..5).contains(&c) {
            ring.get(r - 2, c - 2)
        } else {
            0
        }
    });
    let small_id = encode(&ring);
    let big_id = encode(&big);
    assert_eq!(big_id.len(), byte_width(7));
    assert_eq!(&big_id.as_bytes()[..small_id.len()], small_id.as_bytes());
    assert!(big_id.as_bytes()[small_id.len()..].iter().all(|&b| b == 0));
    assert_eq!(BoardId::from_padded(big_id.as_bytes()), Some(small_id));
}

#[test]
fn test_encode_or_zero() {
    assert!(encode_or_zero(None).is_zero());
    assert_eq!(
        encode_or_zero(Some(&Board::single_cell())),
        BoardId::single_cell()
    );
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_round_trips_known_boards() {
    let boards = [
        Board::single_cell(),
        Board::from_rows(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]),
        cross(5),
        cross(7),
        cross(9),
    ];
    for board in &boards {
        let id = encode(board);
        assert_eq!(decode(&id, board.side()), *board, "{id}");
    }
}

#[test]
fn test_decode_fills_every_orbit() {
    // Every domain bit set decodes to the all-live board.
    for side in [1usize, 3, 5, 7, 9, 11] {
        let mut bytes = vec![0u8; byte_width(side)];
        for bit in 0..domain_bits(side) {
            bytes[bit / 8] |= 0x80 >> (bit % 8);
        }
        let board = decode(&BoardId::from_vec(bytes), side);
        assert_eq!(board.live_count(), side * side, "side {side}");
    }
}

#[test]
#[should_panic(expected = "cannot describe")]
fn test_decode_rejects_mismatched_side() {
    let _ = decode(&BoardId::from_hex("2440").unwrap(), 5);
}

#[test]
fn test_domain_covers_every_orbit_once() {
    for side in [1usize, 3, 5, 9, 13] {
        let cells: Vec<_> = domain_cells(side).collect();
        assert_eq!(cells.len(), domain_bits(side));
        let mut seen = Board::dead(side);
        for &(r, c) in &cells {
            assert!(!seen.is_alive(r, c), "cell visited twice");
            seen.set_orbit(r, c, ALIVE);
        }
        assert_eq!(seen.live_count(), side * side);
    }
}

// ============================================================================
// BoardId
// ============================================================================

#[test]
fn test_side_from_outermost_ring() {
    assert_eq!(BoardId::from_hex("80").unwrap().side(), Some(1));
    assert_eq!(BoardId::from_hex("20").unwrap().side(), Some(3));
    assert_eq!(BoardId::from_hex("24").unwrap().side(), Some(5));
    assert_eq!(BoardId::from_hex("2440").unwrap().side(), Some(7));
    assert_eq!(BoardId::zero().side(), None);
}

#[test]
fn test_non_canonical_ids_have_no_side() {
    // Trailing zero byte beyond the minimal width.
    assert_eq!(BoardId::from_hex("6000").unwrap().side(), None);
    assert!(!BoardId::from_hex("6000").unwrap().is_canonical());
    // Empty byte string.
    assert_eq!(BoardId::default().side(), None);
    assert!(BoardId::zero().is_canonical());
}

#[test]
fn test_to_board() {
    let id = BoardId::from_hex("a0").unwrap();
    let board = id.to_board().unwrap();
    assert_eq!(board.side(), 3);
    assert_eq!(board.live_count(), 5);
    assert!(BoardId::zero().to_board().is_none());
}

#[test]
fn test_padded_and_from_padded() {
    let id = BoardId::from_hex("2440").unwrap();
    let entry = id.padded(5).unwrap();
    assert_eq!(entry, vec![0x24, 0x40, 0, 0, 0]);
    assert_eq!(BoardId::from_padded(&entry), Some(id.clone()));
    assert!(id.padded(1).is_none());

    let zero_entry = BoardId::zero().padded(3).unwrap();
    assert!(BoardId::from_padded(&zero_entry).unwrap().is_zero());
}

#[test]
fn test_ordering_by_length_then_content() {
    let mut ids = vec![
        BoardId::from_hex("2440").unwrap(),
        BoardId::from_hex("ff").unwrap(),
        BoardId::from_hex("0200").unwrap(),
        BoardId::from_hex("20").unwrap(),
    ];
    ids.sort();
    let hex: Vec<_> = ids.iter().map(BoardId::to_hex).collect();
    assert_eq!(hex, vec!["20", "ff", "0200", "2440"]);
}

#[test]
fn test_hex_round_trip() {
    let id: BoardId = "0aFF".parse().unwrap();
    assert_eq!(id.as_bytes(), &[0x0a, 0xff]);
    assert_eq!(id.to_string(), "0aff");
    assert_eq!(alloc::format!("{id:?}"), "BoardId(0aff)");
}

#[test]
fn test_hex_errors() {
    assert_eq!(BoardId::from_hex(""), Err(BoardIdParseError::Empty));
    assert_eq!(BoardId::from_hex("abc"), Err(BoardIdParseError::OddLength(3)));
    assert_eq!(
        BoardId::from_hex("0g"),
        Err(BoardIdParseError::InvalidDigit {
            character: 'g',
            position: 1
        })
    );
}

#[test]
fn test_from_padded_rejects_bits_beyond_entry() {
    // Bits 6 and 7 belong to the 7x7 ring, two bytes wide.
    for byte in [0x01u8, 0x03, 0xff] {
        assert_eq!(BoardId::from_padded(&[byte]), None, "{byte:#04x}");
    }
    // Bit 15 starts the 11x11 ring, three bytes wide.
    assert_eq!(BoardId::from_padded(&[0x00, 0x01]), None);
    assert_eq!(
        BoardId::from_padded(&[0x00, 0x01, 0x00]),
        Some(BoardId::from_vec(vec![0, 1, 0]))
    );
}
