//! Bitmap label text
//!
//! Labels only ever show short numbers, so text is drawn from the 8x8
//! font8x8 glyphs, each set bit becoming a filled cell scaled to the font size.
//! Glyphs are packed by their inked columns, not the full 8-column em.

use font8x8::{BASIC_FONTS, UnicodeFonts};

/// Rows and columns in a glyph bitmap
const GLYPH_CELLS: usize = 8;
/// Extra width added to every cell to embolden strokes
const BOLD_WIDEN: f32 = 1.0;
/// Empty columns between adjacent glyphs
const GLYPH_GAP: usize = 1;

/// Side of one glyph cell at the given font size
#[inline]
fn cell_size(size: f32) -> f32 {
    size / GLYPH_CELLS as f32
}

/// A glyph reduced to the columns that carry ink
struct Packed {
    rows: [u8; 8],
    first: usize,
    columns: usize,
}

/// Inked column span of a glyph as `(first, count)`; blank glyphs keep half an em
fn ink_columns(rows: &[u8; 8]) -> (usize, usize) {
    let bits = rows.iter().fold(0u8, |acc, row| acc | row);
    if bits == 0 {
        return (0, GLYPH_CELLS / 2);
    }
    let first = bits.trailing_zeros() as usize;
    let last = GLYPH_CELLS - 1 - bits.leading_zeros() as usize;
    (first, last - first + 1)
}

fn pack(text: &str) -> Vec<Packed> {
    text.chars()
        .filter_map(|ch| BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')))
        .map(|rows| {
            let (first, columns) = ink_columns(&rows);
            Packed {
                rows,
                first,
                columns,
            }
        })
        .collect()
}

/// Total columns spanned by packed glyphs, gaps included
fn span_columns(glyphs: &[Packed]) -> usize {
    let inked: usize = glyphs.iter().map(|g| g.columns).sum();
    inked + GLYPH_GAP * glyphs.len().saturating_sub(1)
}

/// Inked width of `text` at `size`
pub fn measure(text: &str, size: f32) -> f32 {
    let columns = span_columns(&pack(text));
    if columns == 0 {
        return 0.0;
    }
    columns as f32 * cell_size(size) + BOLD_WIDEN
}

/// Filled cells `(x, y, width, height)` for `text`
///
/// The ink is centred horizontally on `center_x`, and the em box is centred
/// vertically half a size above `baseline_y`. Text wider than `max_width` is
/// scaled down until it fits.
pub fn glyph_cells(
    center_x: f32,
    baseline_y: f32,
    text: &str,
    size: f32,
    max_width: f32,
) -> Vec<(f32, f32, f32, f32)> {
    let glyphs = pack(text);
    let columns = span_columns(&glyphs);
    if columns == 0 {
        return Vec::new();
    }

    let mut cell = cell_size(size);
    if columns as f32 * cell + BOLD_WIDEN > max_width {
        cell = ((max_width - BOLD_WIDEN) / columns as f32).max(0.0);
    }
    let width = columns as f32 * cell + BOLD_WIDEN;
    let top = baseline_y - size / 2.0 - GLYPH_CELLS as f32 / 2.0 * cell;
    let mut cursor_x = center_x - width / 2.0;
    let mut cells = Vec::new();

    for glyph in &glyphs {
        for (row_idx, &row_bits) in glyph.rows.iter().enumerate() {
            for col_idx in glyph.first..glyph.first + glyph.columns {
                if (row_bits >> col_idx) & 1 == 0 {
                    continue;
                }
                cells.push((
                    cursor_x + (col_idx - glyph.first) as f32 * cell,
                    top + row_idx as f32 * cell,
                    cell + BOLD_WIDEN,
                    cell,
                ));
            }
        }
        cursor_x += (glyph.columns + GLYPH_GAP) as f32 * cell;
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink_x_range(cells: &[(f32, f32, f32, f32)]) -> (f32, f32) {
        cells.iter().fold((f32::MAX, f32::MIN), |(lo, hi), (x, _, w, _)| {
            (lo.min(*x), hi.max(x + w))
        })
    }

    #[test]
    fn test_measure_uses_inked_columns() {
        // '1' inks columns 0..=5, '0' columns 0..=6
        assert_eq!(measure("1", 16.0), 6.0 * 2.0 + BOLD_WIDEN);
        assert_eq!(measure("10", 16.0), 14.0 * 2.0 + BOLD_WIDEN);
        assert_eq!(measure("", 16.0), 0.0);
    }

    #[test]
    fn test_single_digit_centred() {
        let cells = glyph_cells(16.0, 40.0, "1", 19.2, 28.0);
        let (lo, hi) = ink_x_range(&cells);
        assert!(((lo + hi) / 2.0 - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_two_digits_fit_inner_box() {
        let cells = glyph_cells(16.0, 40.0, "10", 19.2, 28.0);
        let (lo, hi) = ink_x_range(&cells);
        assert!(lo >= 16.0 - 14.0 - 1e-3, "ink starts at {lo}");
        assert!(hi <= 16.0 + 14.0 + 1e-3, "ink ends at {hi}");
        assert!(((lo + hi) / 2.0 - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_cells_stay_inside_em_rows() {
        let cells = glyph_cells(100.0, 110.0, "42", 16.0, 100.0);
        assert!(!cells.is_empty());
        for (_, y, _, h) in cells {
            assert!(y >= 94.0 - 1e-3 && y + h <= 110.0 + 1e-3);
        }
    }

    #[test]
    fn test_digit_one_has_stem() {
        // '1' has columns 2 and 3 set on its first seven rows; ink spans 6
        // columns of 2 units plus the bold widening, so it starts at 1.5
        let cells = glyph_cells(8.0, 16.0, "1", 16.0, 32.0);
        let stem = cells.iter().filter(|(x, _, _, _)| *x == 5.5).count();
        assert_eq!(stem, 7);
    }
}
