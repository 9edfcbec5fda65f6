//! Binary slot layout of a Hexagon-1 row.
//!
//! A row is a `u128` holding 18 contiguous 6-bit slots in its low 108 bits.
//! Slot 0 is the most significant slot, so rotating a row is a circular
//! shift of the packed integer.
//!
//! Each slot, written most significant bit first:
//!
//! ```text
//!   1  0  0  1  1  0
//!   │  │  └──┴──┴──┴─► piece id (4 bits), both halves of a corner share it
//!   │  │           └─► corner flag: odd ids are corners, even ids are edges
//!   │  └─────────────► corner half: 0 = left half, 1 = right half
//!   └────────────────► face parity: 0 = top piece, 1 = bottom piece
//! ```
//!
//! The top row starts at C1 and runs clockwise; the bottom row starts at E3
//! and runs counterclockwise. With that ordering the right half of both rows
//! is slots 0..9, which turns a slice into a plain masked swap.

/// A packed row of 18 slots.
pub type Row = u128;

/// Bits per slot.
pub const SLOT_SIZE: u32 = 6;
/// Slots per row.
pub const SLOTS_PER_ROW: usize = 18;
/// Slots on one side of the slice.
pub const SLOTS_PER_HALF: usize = SLOTS_PER_ROW / 2;
/// Bits used by a row.
pub const ROW_BITS: u32 = SLOTS_PER_ROW as u32 * SLOT_SIZE;
/// Width of the backing integer.
pub const TOTAL_BITS: u32 = Row::BITS;

/// Isolates a single slot once shifted down.
pub const SLOT_MASK: Row = (1 << SLOT_SIZE) - 1;
/// Every used bit of a row.
pub const ROW_MASK: Row = (1 << ROW_BITS) - 1;

pub const FACE_PARITY: Row = 0b100000;
pub const CORNER_HALF: Row = 0b010000;
pub const PIECE_ID: Row = 0b001111;
pub const CORNER_FLAG: Row = 0b000001;

/// Slots that hold edges in the solved top row.
pub const TOP_EDGE_SLOTS: [usize; 6] = [2, 5, 8, 11, 14, 17];
/// Slots that hold edges in the solved bottom row.
pub const BOTTOM_EDGE_SLOTS: [usize; 6] = [0, 3, 6, 9, 12, 15];
/// Slots touching the slice axis.
pub const SLICE_SLOTS: [usize; 2] = [0, SLOTS_PER_HALF];

/// Bit offset of slot `index` inside a row.
pub const fn slot_shift(index: usize) -> u32 {
    (SLOTS_PER_ROW - 1 - index) as u32 * SLOT_SIZE
}

/// Reads slot `index` of `row`.
pub const fn slot_at(row: Row, index: usize) -> Row {
    (row >> slot_shift(index)) & SLOT_MASK
}

/// Places `bits` into every slot listed in `slots`.
pub const fn mask_slots(bits: Row, slots: &[usize]) -> Row {
    let mut mask = 0;
    let mut i = 0;
    while i < slots.len() {
        mask |= (bits & SLOT_MASK) << slot_shift(slots[i]);
        i += 1;
    }
    mask
}

/// Places `bits` into slots `start..end`.
pub const fn mask_range(bits: Row, start: usize, end: usize) -> Row {
    let mut mask = 0;
    let mut i = start;
    while i < end {
        mask |= (bits & SLOT_MASK) << slot_shift(i);
        i += 1;
    }
    mask
}

/// Packs 18 slot values into a row, slot 0 first.
pub const fn pack_row(slots: [Row; SLOTS_PER_ROW]) -> Row {
    let mut row = 0;
    let mut i = 0;
    while i < SLOTS_PER_ROW {
        row |= (slots[i] & SLOT_MASK) << slot_shift(i);
        i += 1;
    }
    row
}

/// Splits a row back into its 18 slot values.
pub fn unpack_row(row: Row) -> [Row; SLOTS_PER_ROW] {
    std::array::from_fn(|i| slot_at(row, i))
}

/// The right half of a row: slots 0..9, every bit.
pub const HALF_MASK: Row = mask_range(SLOT_MASK, 0, SLOTS_PER_HALF);

/// Corner flags where only an edge may sit on the top row.
pub const TOP_CUBE_SHAPE: Row = mask_slots(CORNER_FLAG, &TOP_EDGE_SLOTS);

/// Corner flags where only an edge may sit on the bottom row. The bottom row
/// runs in reverse, so its edges land on different slots than the top's.
pub const BOTTOM_CUBE_SHAPE: Row = mask_slots(CORNER_FLAG, &BOTTOM_EDGE_SLOTS);

/// Corner-half bits of the slots on either side of the slice axis.
pub const SLICE_MASK: Row = mask_slots(CORNER_HALF, &SLICE_SLOTS);

/// Face-parity bit of every slot.
pub const ROW_ORIENTATION_MASK: Row = mask_range(FACE_PARITY, 0, SLOTS_PER_ROW);

/// Solved top row: C1 E1 C2 E2 C3 E3 C4 E4 C5 E5 C6 E6.
pub const SOLVED_TOP: Row = pack_row([
    0b000001, 0b010001, 0b000010, // C1 E1
    0b000011, 0b010011, 0b000100, // C2 E2
    0b000101, 0b010101, 0b000110, // C3 E3
    0b000111, 0b010111, 0b001000, // C4 E4
    0b001001, 0b011001, 0b001010, // C5 E5
    0b001011, 0b011011, 0b001100, // C6 E6
]);

/// Solved bottom row: E3 C3 E2 C2 E1 C1 E6 C6 E5 C5 E4 C4.
pub const SOLVED_BOTTOM: Row = pack_row([
    0b100110, 0b100101, 0b110101, // E3 C3
    0b100100, 0b100011, 0b110011, // E2 C2
    0b100010, 0b100001, 0b110001, // E1 C1
    0b101100, 0b101011, 0b111011, // E6 C6
    0b101010, 0b101001, 0b111001, // E5 C5
    0b101000, 0b100111, 0b110111, // E4 C4
]);

/// Slot bits for a piece label such as `c3a`, `e5b` or `x`.
///
/// Corners cover two slots and edges one; the trailing `a`/`b` picks the top
/// or bottom copy of the piece. `x` is one ignored slot, `xx` two.
/// Returns the slot values and whether they take part in a match.
pub fn label_slots(label: &str) -> Option<(Vec<Row>, bool)> {
    match label {
        "x" => return Some((vec![0], false)),
        "xx" => return Some((vec![0, 0], false)),
        _ => {}
    }

    let bytes = label.as_bytes();
    if bytes.len() != 3 {
        return None;
    }
    let number = match bytes[1] {
        b @ b'1'..=b'6' => Row::from(b - b'0'),
        _ => return None,
    };
    let face = match bytes[2] {
        b'a' => 0,
        b'b' => FACE_PARITY,
        _ => return None,
    };
    match bytes[0] {
        b'c' => {
            let id = (number * 2 - 1) & PIECE_ID;
            Some((vec![face | id, face | CORNER_HALF | id], true))
        }
        b'e' => Some((vec![face | ((number * 2) & PIECE_ID)], true)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_from_halves(high: u64, low: u64) -> Row {
        (high as Row) << 64 | low as Row
    }

    #[test]
    fn test_derived_masks_match_layout() {
        assert_eq!(
            HALF_MASK,
            ((1 << (SLOTS_PER_HALF as u32 * SLOT_SIZE)) - 1) << (ROW_BITS / 2)
        );
        assert_eq!(
            TOP_CUBE_SHAPE,
            row_from_halves(0x0000000004000100, 0x0040001000040001)
        );
        assert_eq!(
            BOTTOM_CUBE_SHAPE,
            row_from_halves(0x0000004000100004, 0x0001000040001000)
        );
        assert_eq!(
            SLICE_MASK,
            row_from_halves(0x0000040000000000, 0x0010000000000000)
        );
        assert_eq!(
            ROW_ORIENTATION_MASK,
            row_from_halves(0x0000082082082082, 0x0820820820820820)
        );
    }

    #[test]
    fn test_solved_rows() {
        assert_eq!(
            SOLVED_TOP,
            row_from_halves(0x000000510834C415, 0x51875C825928B6CC)
        );
        assert_eq!(
            SOLVED_BOTTOM,
            row_from_halves(0x000009a5d648f38a, 0x1c6cafbaa9e689f7)
        );
        assert_eq!(SOLVED_TOP & !ROW_MASK, 0);
        assert_eq!(SOLVED_BOTTOM & !ROW_MASK, 0);
    }

    #[test]
    fn test_unpack_row() {
        let slots = unpack_row(SOLVED_TOP);
        assert_eq!(slots[0], 0b000001);
        assert_eq!(slots[1], 0b010001);
        assert_eq!(slots[17], 0b001100);
        assert_eq!(pack_row(slots), SOLVED_TOP);
    }

    #[test]
    fn test_edges_have_clear_corner_flag() {
        for slot in TOP_EDGE_SLOTS {
            assert_eq!(slot_at(SOLVED_TOP, slot) & CORNER_FLAG, 0);
        }
        for slot in BOTTOM_EDGE_SLOTS {
            assert_eq!(slot_at(SOLVED_BOTTOM, slot) & CORNER_FLAG, 0);
        }
    }

    #[test]
    fn test_label_slots() {
        assert_eq!(label_slots("c1a"), Some((vec![0b000001, 0b010001], true)));
        assert_eq!(label_slots("e3b"), Some((vec![0b100110], true)));
        assert_eq!(label_slots("c6b"), Some((vec![0b101011, 0b111011], true)));
        assert_eq!(label_slots("xx"), Some((vec![0, 0], false)));
        assert_eq!(label_slots("c7a"), None);
        assert_eq!(label_slots("q1a"), None);
    }

    #[test]
    fn test_corner_halves_share_piece_id() {
        let (halves, _) = label_slots("c4b").unwrap();
        assert_eq!(halves[0] & PIECE_ID, halves[1] & PIECE_ID);
        assert_eq!(halves[0] & PIECE_ID, 7);
        for index in [0, 3, 6] {
            assert_eq!(
                slot_at(SOLVED_TOP, index) & PIECE_ID,
                slot_at(SOLVED_TOP, index + 1) & PIECE_ID
            );
        }
    }
}
