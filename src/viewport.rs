//! Scrolling window over the entry list
//!
//! Positions are in abstract vertical units (pixels on a framebuffer, cells
//! in a terminal). The controller keeps the cursor row fully inside the
//! viewport and scrolls the window one row at a time.

/// Fixed vertical layout of the list area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    top: i32,
    bottom: i32,
    first_row: i32,
    row_height: i32,
}

impl Geometry {
    /// `top`/`bottom` bound the clip area, `first_row` is where the first
    /// visible row is drawn (an inset below `top` smaller than one row).
    pub fn new(top: i32, bottom: i32, first_row: i32, row_height: i32) -> Self {
        let row_height = row_height.max(1);
        let first_row = first_row.clamp(top, top + row_height - 1);
        let bottom = bottom.max(first_row + row_height);
        Self {
            top,
            bottom,
            first_row,
            row_height,
        }
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn first_row(&self) -> i32 {
        self.first_row
    }

    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    /// Rows that fit between the first row and the bottom edge. At least 1.
    pub fn capacity(&self) -> usize {
        ((self.bottom - self.first_row) / self.row_height) as usize
    }
}

impl Default for Geometry {
    /// 1280x720 layout: list clipped to 86..646, rows of 120 starting at 130.
    fn default() -> Self {
        Self::new(86, 646, 130, 120)
    }
}

/// One row the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSlot {
    pub index: usize,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    geometry: Geometry,
    cursor: usize,
    start: usize,
    cursor_y: i32,
    window_y: i32,
}

impl Viewport {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            cursor: 0,
            start: 0,
            cursor_y: geometry.first_row,
            window_y: geometry.first_row,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Index of the focused entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the first entry drawn.
    pub fn window_start(&self) -> usize {
        self.start
    }

    /// Vertical position of the cursor row.
    pub fn cursor_y(&self) -> i32 {
        self.cursor_y
    }

    /// Vertical position of the first drawn row.
    pub fn window_y(&self) -> i32 {
        self.window_y
    }

    pub fn capacity(&self) -> usize {
        self.geometry.capacity()
    }

    /// Move the cursor one entry down. Returns `false` at the end of the list.
    pub fn move_down(&mut self, len: usize) -> bool {
        if self.cursor + 1 >= len {
            return false;
        }
        let h = self.geometry.row_height;

        self.cursor += 1;
        self.cursor_y += h;
        if self.cursor_y + h > self.geometry.bottom {
            self.cursor_y -= h;
            let rows_above = self.cursor.saturating_sub(self.start + 1) as i32;
            self.window_y = self.cursor_y - rows_above * h;
            self.start += 1;
        }
        true
    }

    /// Move the cursor one entry up. Returns `false` at the top.
    pub fn move_up(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let h = self.geometry.row_height;

        self.cursor -= 1;
        self.cursor_y -= h;
        if self.cursor_y < self.geometry.top {
            self.cursor_y += h;
            self.window_y = self.cursor_y;
            self.start -= 1;
        }
        true
    }

    /// Back to the first entry with an unscrolled window.
    pub fn reset(&mut self) {
        *self = Self::new(self.geometry);
    }

    /// Switch to a new layout, keeping the cursor index and scrolling the
    /// window just enough for the cursor row to stay visible.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        if geometry == self.geometry {
            return;
        }
        self.geometry = geometry;

        let capacity = geometry.capacity();
        if self.cursor < self.start {
            self.start = self.cursor;
        } else if self.cursor - self.start >= capacity {
            self.start = self.cursor + 1 - capacity;
        }
        self.window_y = geometry.first_row;
        self.cursor_y = geometry.first_row + (self.cursor - self.start) as i32 * geometry.row_height;
    }

    /// Rows to draw for a list of `len` entries: from the window start
    /// downwards until the next row would cross the bottom edge.
    pub fn visible_rows(&self, len: usize) -> VisibleRows {
        VisibleRows {
            next: self.start,
            y: self.window_y,
            len,
            row_height: self.geometry.row_height,
            bottom: self.geometry.bottom,
            done: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisibleRows {
    next: usize,
    y: i32,
    len: usize,
    row_height: i32,
    bottom: i32,
    done: bool,
}

impl Iterator for VisibleRows {
    type Item = RowSlot;

    fn next(&mut self) -> Option<RowSlot> {
        if self.done || self.next >= self.len {
            return None;
        }
        let slot = RowSlot {
            index: self.next,
            y: self.y,
        };
        self.next += 1;
        self.y += self.row_height;
        if self.y + self.row_height > self.bottom {
            self.done = true;
        }
        Some(slot)
    }
}
