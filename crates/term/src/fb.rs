//! Framebuffer and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Resolve a player color tag: a palette name or `#rrggbb`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        match tag.to_lowercase().as_str() {
            "blue" => return Some(Rgb::new(0, 123, 255)),
            "green" => return Some(Rgb::new(40, 167, 69)),
            "yellow" => return Some(Rgb::new(255, 193, 7)),
            "pink" => return Some(Rgb::new(232, 62, 140)),
            "purple" => return Some(Rgb::new(111, 66, 193)),
            _ => {}
        }
        let hex = tag.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let v = u32::from_str_radix(hex, 16).ok()?;
        Some(Rgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8))
    }

    /// Blend toward black; `alpha` 0..=255.
    pub fn shade(self, alpha: u8) -> Self {
        let f = |c: u8| ((c as u16 * alpha as u16) / 255) as u8;
        Rgb::new(f(self.r), f(self.g), f(self.b))
    }
}

/// Text weight of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Faint,
}

/// Colors and weight for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub weight: Weight,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            weight: Weight::Normal,
        }
    }

    pub const fn bold(self) -> Self {
        Self {
            weight: Weight::Bold,
            ..self
        }
    }

    pub const fn dim(self) -> Self {
        Self {
            weight: Weight::Faint,
            ..self
        }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// One character and its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        style: CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)),
    };
}

impl Default for Cell {
    fn default() -> Self {
        Cell::BLANK
    }
}

/// Row-major grid of cells, one per terminal column/row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; usize::from(cols) * usize::from(rows)],
        }
    }

    pub fn width(&self) -> u16 {
        self.cols
    }

    pub fn height(&self) -> u16 {
        self.rows
    }

    /// Change dimensions, reusing the allocation. All cells become blank.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells.clear();
        self.cells
            .resize(usize::from(cols) * usize::from(rows), Cell::BLANK);
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(usize::from(y) * usize::from(self.cols) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.offset(x, y).and_then(|i| self.cells.get(i).copied())
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.rows {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.cols);
        &self.cells[start..start + usize::from(self.cols)]
    }

    /// Plain text of a row, for tests and logs.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }

    pub fn fill(&mut self, style: CellStyle) {
        self.cells.fill(Cell { ch: ' ', style });
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        if let Some(cell) = self.offset(x, y).and_then(|i| self.cells.get_mut(i)) {
            *cell = Cell { ch, style };
        }
    }

    /// Write `s` starting at `(x, y)`, clipped to the row. Returns columns used.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let room = usize::from(self.cols.saturating_sub(x));
        let mut used = 0u16;
        for ch in s.chars().take(room) {
            self.put_char(x + used, y, ch, style);
            used += 1;
        }
        used
    }

    /// Write `s` centered within `[x, x + w)`.
    pub fn put_centered(&mut self, x: u16, w: u16, y: u16, s: &str, style: CellStyle) {
        let len = s.chars().count().min(usize::from(w)) as u16;
        self.put_str(x + (w - len) / 2, y, s, style);
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        let x_end = x.saturating_add(w).min(self.cols);
        let y_end = y.saturating_add(h).min(self.rows);
        for row in y..y_end {
            for col in x..x_end {
                self.put_char(col, row, ' ', style);
            }
        }
    }
}
