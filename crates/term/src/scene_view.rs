//! SceneView: maps a core [`Scene`] into a terminal framebuffer.
//!
//! This module is pure (no I/O) and unit-testable. Board cells are drawn two
//! terminal columns wide to compensate for glyph aspect ratio.

use blockfall_core::{Scene, ScenePhase};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders scenes into framebuffers.
pub struct SceneView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for SceneView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl SceneView {
    pub fn new(cell_w: u16) -> Self {
        Self { cell_w: cell_w.max(1) }
    }

    /// Render one frame.
    pub fn render(&self, scene: &Scene, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_w = u16::from(scene.cols) * self.cell_w;
        let board_h = u16::from(scene.rows);
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        // Leave room on the right for the preview pane and score.
        let start_x = viewport.width.saturating_sub(frame_w + 14) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::colored(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let well = CellStyle::colored(Rgb::new(70, 70, 80), Rgb::new(24, 24, 32));
        let fixated = CellStyle::colored(Rgb::new(30, 30, 40), Rgb::new(150, 150, 160));
        let falling = CellStyle::colored(Rgb::new(20, 20, 20), Rgb::new(90, 180, 250));
        let preview = CellStyle::colored(Rgb::new(20, 20, 20), Rgb::new(250, 200, 90));
        let text = CellStyle {
            bold: true,
            ..CellStyle::default()
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_w, board_h, ' ', well);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for &(col, row) in &scene.fixated {
            self.draw_cell(&mut fb, start_x, start_y, col, row, fixated);
        }
        for &(col, row) in &scene.piece_cells {
            self.draw_cell(&mut fb, start_x, start_y, col, row, falling);
        }

        // Side pane: preview coordinates already carry the scene's pane
        // offset; a small extra shift places them under the label.
        let pane_x = start_x + frame_w + 2;
        fb.put_str(pane_x, start_y + 1, "NEXT", text);
        for &(col, row) in &scene.preview_cells {
            self.draw_cell(&mut fb, start_x + 3, start_y + 2, col, row, preview);
        }

        fb.put_str(pane_x, start_y + 8, "SCORE", text);
        fb.put_str(
            pane_x,
            start_y + 9,
            &scene.score.to_string(),
            CellStyle::default(),
        );

        match &scene.phase {
            ScenePhase::Loading => {
                fb.put_str(pane_x, start_y + 12, "loading...", CellStyle::default());
            }
            ScenePhase::Playing { fast_drop: true } => {
                fb.put_str(pane_x, start_y + 12, "DROP", text);
            }
            ScenePhase::Playing { fast_drop: false } => {}
            ScenePhase::GameOver { score } => {
                fb.put_str(pane_x, start_y + 12, "GAME OVER", text);
                fb.put_str(
                    pane_x,
                    start_y + 13,
                    &format!("final: {score}"),
                    CellStyle::default(),
                );
            }
            ScenePhase::Fault { message } => {
                fb.put_str(pane_x, start_y + 12, "FAULT", text);
                fb.put_str(pane_x, start_y + 13, message, CellStyle::default());
            }
        }

        fb.put_str(
            start_x,
            start_y + frame_h,
            "arrows/hjkl move - up rotates - down drops - q quits",
            CellStyle::default(),
        );

        fb
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        col: i8,
        row: i8,
        style: CellStyle,
    ) {
        if col < 0 || row < 0 {
            return;
        }
        let x = start_x + 1 + (col as u16) * self.cell_w;
        let y = start_y + 1 + row as u16;
        for dx in 0..self.cell_w {
            fb.put_char(x + dx, y, ' ', style);
        }
    }

    fn draw_border(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        style: CellStyle,
    ) {
        if w < 2 || h < 2 {
            return;
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }
}
