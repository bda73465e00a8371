// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! The built-in glyph set.
//!
//! One embedded face, "Implicad Mono": a 5x7 cell grid per glyph covering
//! ASCII letters, digits, and common punctuation. Lowercase letters reuse
//! the uppercase forms. Glyph geometry is emitted as closed outlines of the
//! filled region, so the text operators can hand it straight to the mesh
//! machinery.

use ahash::AHashMap;
use nalgebra::Point2;
use std::sync::OnceLock;

pub const FONT_NAME: &str = "Implicad Mono";

/// Glyph cell grid dimensions.
pub const GLYPH_COLS: usize = 5;
pub const GLYPH_ROWS: usize = 7;

/// Rows top to bottom, low 5 bits per row, bit 4 is the left column.
type GlyphRows = [u8; GLYPH_ROWS];

/// Accepts the bare face name and the `name:style=...` form.
pub fn is_known_font(spec: &str) -> bool {
    let name = spec.split(':').next().unwrap_or(spec).trim();
    name == FONT_NAME
}

pub fn glyph(c: char) -> Option<&'static GlyphRows> {
    let c = if c.is_ascii_lowercase() { c.to_ascii_uppercase() } else { c };
    glyph_table().get(&c)
}

/// Closed outline segments of a glyph's filled region, in cell units:
/// x in [0, 5], y in [0, 7] with y up and the baseline at y = 0.
pub fn glyph_outlines(rows: &GlyphRows) -> Vec<[Point2<f64>; 2]> {
    let filled = |col: isize, row: isize| -> bool {
        if !(0..GLYPH_COLS as isize).contains(&col) || !(0..GLYPH_ROWS as isize).contains(&row) {
            return false;
        }
        rows[row as usize] >> (GLYPH_COLS - 1 - col as usize) & 1 == 1
    };

    let mut segments = Vec::new();
    for row in 0..GLYPH_ROWS as isize {
        for col in 0..GLYPH_COLS as isize {
            if !filled(col, row) {
                continue;
            }
            // row 0 is the top of the glyph
            let x0 = col as f64;
            let x1 = x0 + 1.0;
            let y1 = (GLYPH_ROWS as isize - row) as f64;
            let y0 = y1 - 1.0;
            // emit only edges against empty cells, so shared edges vanish
            if !filled(col, row + 1) {
                segments.push([Point2::new(x0, y0), Point2::new(x1, y0)]);
            }
            if !filled(col, row - 1) {
                segments.push([Point2::new(x0, y1), Point2::new(x1, y1)]);
            }
            if !filled(col - 1, row) {
                segments.push([Point2::new(x0, y0), Point2::new(x0, y1)]);
            }
            if !filled(col + 1, row) {
                segments.push([Point2::new(x1, y0), Point2::new(x1, y1)]);
            }
        }
    }
    segments
}

fn glyph_table() -> &'static AHashMap<char, GlyphRows> {
    static TABLE: OnceLock<AHashMap<char, GlyphRows>> = OnceLock::new();
    TABLE.get_or_init(|| GLYPHS.iter().copied().collect())
}

#[rustfmt::skip]
const GLYPHS: &[(char, GlyphRows)] = &[
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('A', [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('B', [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E]),
    ('C', [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
    ('D', [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E]),
    ('E', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
    ('F', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
    ('G', [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0E]),
    ('H', [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('I', [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('J', [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C]),
    ('K', [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    ('M', [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11]),
    ('N', [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11]),
    ('O', [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('P', [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
    ('Q', [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D]),
    ('R', [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
    ('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    ('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('V', [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    ('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A]),
    ('X', [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11]),
    ('Y', [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04]),
    ('Z', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F]),
    ('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    ('3', [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E]),
    ('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    ('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    ('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    ('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    ('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C]),
    (',', [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08]),
    ('-', [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00]),
    ('+', [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00]),
    (':', [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00]),
    ('!', [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04]),
    ('?', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04]),
    ('(', [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02]),
    (')', [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08]),
    ('=', [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00]),
    ('_', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F]),
    ('/', [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10]),
    ('*', [0x00, 0x15, 0x0E, 0x1F, 0x0E, 0x15, 0x00]),
    ('\'', [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00]),
];
