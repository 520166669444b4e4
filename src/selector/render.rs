//! Browser rendering
//!
//! Draws into a packed 1-bit-per-pixel framebuffer on a grid of 8x8 glyph
//! cells, one text row every 9 pixel lines. The display driver shifts pixels
//! out LSB first, so every glyph row is bit-reversed on the way in.
//!
//! Screen layout:
//!
//! ```text
//! row 0          /Games/Mac                          Page 1/3
//! row 1          >..
//! row 2           System 6.dsk
//! ...
//! row capacity    Utilities/
//! last row        Up/Down:Select  Left/Right:Page  Return:Open  Esc:Quit
//! ```

use core::fmt::Write;

use crate::config::SelectorConfig;
use crate::error::SelectorError;
use crate::font::{self, CHAR_HEIGHT, ROW_PITCH};
use crate::fs::DirectoryEntry;
use crate::path::DirPath;

const HEADER_ROW: usize = 0;
const FIRST_ENTRY_ROW: usize = 1;
const MARKER_COL: usize = 0;
const NAME_COL: usize = 1;
const MARKER: u8 = b'>';
const ELLIPSIS: &str = "...";
const HELP_TEXT: &str = "Up/Down:Select  Left/Right:Page  Return:Open  Esc:Quit";

/// Text renderer over a borrowed framebuffer
pub struct Renderer<'a> {
    fb: &'a mut [u8],
    config: SelectorConfig,
}

impl<'a> Renderer<'a> {
    /// Wrap `fb`, which must hold at least `config.framebuffer_len()` bytes.
    /// The geometry must pass [`SelectorConfig::validate`].
    pub fn new(fb: &'a mut [u8], config: SelectorConfig) -> Result<Self, SelectorError> {
        config.validate()?;
        let needed = config.framebuffer_len();
        if fb.len() < needed {
            return Err(SelectorError::FramebufferTooSmall {
                needed,
                actual: fb.len(),
            });
        }
        Ok(Self { fb, config })
    }

    #[inline]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Raw framebuffer contents
    pub fn framebuffer(&self) -> &[u8] {
        self.fb
    }

    /// Blank the whole screen
    pub fn clear(&mut self) {
        let len = self.config.framebuffer_len();
        self.fb[..len].fill(0);
    }

    /// Blit one glyph into cell (`col`, `row`). Cells off screen are skipped.
    pub fn draw_char(&mut self, ch: u8, col: usize, row: usize) {
        if col >= self.config.text_columns() || row >= self.config.text_rows() {
            return;
        }

        let stride = self.config.stride();
        let mut pos = row * ROW_PITCH * stride + col;

        for &bits in font::glyph(ch) {
            if let Some(byte) = self.fb.get_mut(pos) {
                *byte = bits.reverse_bits();
            }
            pos += stride;
        }
    }

    /// Draw at most `max_cols` characters of `text`, returning the columns used
    pub fn draw_text(&mut self, text: &str, col: usize, row: usize, max_cols: usize) -> usize {
        let mut writer = RowWriter::new(self, col, row, max_cols);
        let _ = writer.write_str(text);
        writer.used
    }

    /// Blank the glyph lines of a text row
    pub fn clear_row(&mut self, row: usize) {
        if row >= self.config.text_rows() {
            return;
        }
        let stride = self.config.stride();
        let start = row * ROW_PITCH * stride;
        self.fb[start..start + CHAR_HEIGHT * stride].fill(0);
    }

    /// Current folder on the left, page indicator right-aligned
    pub fn draw_header(&mut self, path: &DirPath, page: usize, total_pages: usize) {
        self.clear_row(HEADER_ROW);

        let columns = self.config.text_columns();
        let indicator_len = 5 + decimal_width(page + 1) + 1 + decimal_width(total_pages);
        let indicator_col = columns.saturating_sub(indicator_len);

        let mut writer = RowWriter::new(self, indicator_col, HEADER_ROW, indicator_len);
        let _ = write!(writer, "Page {}/{}", page + 1, total_pages);

        // Keep the tail of long paths, it is the part that changes
        let budget = indicator_col.saturating_sub(1);
        let shown = DisplayPath(path);
        let mut writer = RowWriter::new(self, 0, HEADER_ROW, budget);
        let len = shown.char_len();
        if len > budget && budget > ELLIPSIS.len() {
            let _ = writer.write_str(ELLIPSIS);
            let _ = shown.write_tail(&mut writer, budget - ELLIPSIS.len());
        } else {
            let _ = write!(writer, "{}", path);
        }
    }

    /// Draw `entry` in page slot `slot`, without touching the marker column
    pub fn draw_entry(&mut self, slot: usize, entry: &DirectoryEntry) {
        let row = FIRST_ENTRY_ROW + slot;
        self.clear_row(row);

        let max = self.config.name_columns;
        let used = self.draw_text(entry.name_str(), NAME_COL, row, max);
        if entry.is_dir && entry.name_str() != ".." && used < max {
            self.draw_char(b'/', NAME_COL + used, row);
        }
    }

    /// Blank page slot `slot`
    pub fn clear_entry(&mut self, slot: usize) {
        self.clear_row(FIRST_ENTRY_ROW + slot);
    }

    /// Show or hide the selection marker in front of slot `slot`
    pub fn draw_marker(&mut self, slot: usize, visible: bool) {
        let ch = if visible { MARKER } else { b' ' };
        self.draw_char(ch, MARKER_COL, FIRST_ENTRY_ROW + slot);
    }

    /// Key help on the bottom row
    pub fn draw_footer(&mut self) {
        let Some(row) = self.config.text_rows().checked_sub(1) else {
            return;
        };
        self.clear_row(row);
        let columns = self.config.text_columns();
        self.draw_text(HELP_TEXT, 0, row, columns);
    }

    /// Read back the 8 bytes of cell (`col`, `row`)
    pub fn cell(&self, col: usize, row: usize) -> [u8; CHAR_HEIGHT] {
        let stride = self.config.stride();
        let mut pos = row * ROW_PITCH * stride + col;
        let mut out = [0u8; CHAR_HEIGHT];
        for byte in out.iter_mut() {
            *byte = self.fb.get(pos).copied().unwrap_or(0);
            pos += stride;
        }
        out
    }

    /// Text row of page slot `slot`
    #[inline]
    pub const fn entry_row(slot: usize) -> usize {
        FIRST_ENTRY_ROW + slot
    }
}

// ============================================================================
// Row Writer (for positioned write!() output)
// ============================================================================

/// Writes glyphs left to right on one row, silently dropping anything past
/// `max_cols`. Non-ASCII characters render as the replacement glyph.
struct RowWriter<'r, 'a> {
    renderer: &'r mut Renderer<'a>,
    col: usize,
    row: usize,
    max_cols: usize,
    used: usize,
}

impl<'r, 'a> RowWriter<'r, 'a> {
    fn new(renderer: &'r mut Renderer<'a>, col: usize, row: usize, max_cols: usize) -> Self {
        Self {
            renderer,
            col,
            row,
            max_cols,
            used: 0,
        }
    }
}

impl Write for RowWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            if self.used >= self.max_cols {
                break;
            }
            let ch = if c.is_ascii() { c as u8 } else { font::REPLACEMENT };
            self.renderer.draw_char(ch, self.col + self.used, self.row);
            self.used += 1;
        }
        Ok(())
    }
}

struct DisplayPath<'p>(&'p DirPath);

impl DisplayPath<'_> {
    fn char_len(&self) -> usize {
        if self.0.is_root() { 1 } else { self.0.as_str().chars().count() }
    }

    fn write_tail(&self, out: &mut impl Write, count: usize) -> core::fmt::Result {
        let s = self.0.as_str();
        let skip = s.chars().count().saturating_sub(count);
        let start = s.char_indices().nth(skip).map(|(i, _)| i).unwrap_or(s.len());
        out.write_str(&s[start..])
    }
}

fn decimal_width(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn glyph_reversed(ch: u8) -> Vec<u8> {
        font::glyph(ch).iter().map(|b| b.reverse_bits()).collect()
    }

    #[test]
    fn test_rejects_small_framebuffer() {
        let config = SelectorConfig::default();
        let mut fb = vec![0u8; 100];
        assert!(matches!(
            Renderer::new(&mut fb, config),
            Err(SelectorError::FramebufferTooSmall { needed: 21888, actual: 100 })
        ));
    }

    #[test]
    fn test_rejects_screen_without_text_rows() {
        let config = SelectorConfig {
            width: 64,
            height: 4,
            page_capacity: 1,
            name_columns: 8,
            ..SelectorConfig::default()
        };
        let mut fb = vec![0u8; 1024];
        assert!(matches!(
            Renderer::new(&mut fb, config),
            Err(SelectorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_footer_on_last_row() {
        let config = SelectorConfig::default();
        let mut fb = vec![0u8; config.framebuffer_len()];
        let mut renderer = Renderer::new(&mut fb, config).unwrap();

        renderer.draw_footer();
        let last = config.text_rows() - 1;
        assert_eq!(renderer.cell(0, last).to_vec(), glyph_reversed(b'U'));
        assert_eq!(renderer.cell(0, last - 1), [0u8; 8]);
    }

    #[test]
    fn test_clear_entry_blanks_slot() {
        let config = SelectorConfig::default();
        let mut fb = vec![0u8; config.framebuffer_len()];
        let mut renderer = Renderer::new(&mut fb, config).unwrap();

        renderer.draw_entry(2, &DirectoryEntry::new("Disk.dsk", false));
        renderer.draw_entry(3, &DirectoryEntry::new("Other.dsk", false));
        renderer.clear_entry(2);

        assert_eq!(renderer.cell(NAME_COL, Renderer::entry_row(2)), [0u8; 8]);
        assert_eq!(
            renderer.cell(NAME_COL, Renderer::entry_row(3)).to_vec(),
            glyph_reversed(b'O')
        );
    }

    #[test]
    fn test_glyph_bits_reversed() {
        let config = SelectorConfig::default();
        let mut fb = vec![0u8; config.framebuffer_len()];
        let mut renderer = Renderer::new(&mut fb, config).unwrap();

        renderer.draw_char(b'A', 3, 2);
        assert_eq!(renderer.cell(3, 2).to_vec(), glyph_reversed(b'A'));

        // Top row of 'A' is 0x38 (..###...), written LSB-first as 0x1C
        let stride = config.stride();
        assert_eq!(renderer.framebuffer()[2 * 9 * stride + 3], 0x1C);
    }

    #[test]
    fn test_offscreen_cells_skipped() {
        let config = SelectorConfig::default();
        let mut fb = vec![0u8; config.framebuffer_len()];
        let mut renderer = Renderer::new(&mut fb, config).unwrap();
        renderer.draw_char(b'#', 64, 0);
        renderer.draw_char(b'#', 0, 38);
        assert!(renderer.framebuffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_long_names_truncated() {
        let config = SelectorConfig::default();
        let mut fb = vec![0u8; config.framebuffer_len()];
        let mut renderer = Renderer::new(&mut fb, config).unwrap();

        let entry = DirectoryEntry::new("ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.dsk", false);
        renderer.draw_entry(0, &entry);

        let row = Renderer::entry_row(0);
        assert_eq!(renderer.cell(NAME_COL, row).to_vec(), glyph_reversed(b'A'));
        assert_eq!(renderer.cell(NAME_COL + 29, row).to_vec(), glyph_reversed(b'3'));
        assert_eq!(renderer.cell(NAME_COL + 30, row), [0u8; 8]);
    }

    #[test]
    fn test_folder_suffix_and_parent() {
        let config = SelectorConfig::default();
        let mut fb = vec![0u8; config.framebuffer_len()];
        let mut renderer = Renderer::new(&mut fb, config).unwrap();

        renderer.draw_entry(0, &DirectoryEntry::parent());
        renderer.draw_entry(1, &DirectoryEntry::new("Apps", true));

        assert_eq!(renderer.cell(NAME_COL + 2, Renderer::entry_row(0)), [0u8; 8]);
        assert_eq!(
            renderer.cell(NAME_COL + 4, Renderer::entry_row(1)).to_vec(),
            glyph_reversed(b'/')
        );
    }

    #[test]
    fn test_marker_toggle() {
        let config = SelectorConfig::default();
        let mut fb = vec![0u8; config.framebuffer_len()];
        let mut renderer = Renderer::new(&mut fb, config).unwrap();

        renderer.draw_marker(4, true);
        assert_eq!(
            renderer.cell(MARKER_COL, Renderer::entry_row(4)).to_vec(),
            glyph_reversed(MARKER)
        );
        renderer.draw_marker(4, false);
        assert_eq!(renderer.cell(MARKER_COL, Renderer::entry_row(4)), [0u8; 8]);
    }

    #[test]
    fn test_header_page_indicator() {
        let config = SelectorConfig::default();
        let mut fb = vec![0u8; config.framebuffer_len()];
        let mut renderer = Renderer::new(&mut fb, config).unwrap();

        renderer.draw_header(&DirPath::root(), 1, 3);

        // "Page 2/3" ends in the last column
        assert_eq!(renderer.cell(63, 0).to_vec(), glyph_reversed(b'3'));
        assert_eq!(renderer.cell(61, 0).to_vec(), glyph_reversed(b'2'));
        assert_eq!(renderer.cell(56, 0).to_vec(), glyph_reversed(b'P'));
        assert_eq!(renderer.cell(0, 0).to_vec(), glyph_reversed(b'/'));
    }

    #[test]
    fn test_header_keeps_path_tail() {
        let config = SelectorConfig::default();
        let mut fb = vec![0u8; config.framebuffer_len()];
        let mut renderer = Renderer::new(&mut fb, config).unwrap();

        let mut path = DirPath::root();
        for _ in 0..8 {
            path = path.join("Folder").unwrap();
        }
        path = path.join("Z").unwrap();
        renderer.draw_header(&path, 0, 1);

        // Indicator "Page 1/1" starts at column 56, path budget is 55 columns
        assert_eq!(renderer.cell(0, 0).to_vec(), glyph_reversed(b'.'));
        assert_eq!(renderer.cell(54, 0).to_vec(), glyph_reversed(b'Z'));
        assert_eq!(renderer.cell(55, 0), [0u8; 8]);
    }

    #[test]
    fn test_decimal_width() {
        assert_eq!(decimal_width(0), 1);
        assert_eq!(decimal_width(9), 1);
        assert_eq!(decimal_width(10), 2);
        assert_eq!(decimal_width(1234), 4);
    }
}
