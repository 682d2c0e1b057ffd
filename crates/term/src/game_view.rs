//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so every frame can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Values shown next to the board that the engine does not own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud {
    pub high_score: u32,
}

/// Top-left corner of the board frame, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Origin {
    x: u16,
    y: u16,
}

#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell size in terminal columns and rows.
    cell_w: u16,
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    fn origin(&self, viewport: Viewport) -> Origin {
        let (frame_w, frame_h) = self.frame_size();
        Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
        }
    }

    /// Terminal position of the top-left character of board cell `(x, y)`.
    pub fn cell_origin(&self, viewport: Viewport, x: u16, y: u16) -> (u16, u16) {
        let o = self.origin(viewport);
        (o.x + 1 + x * self.cell_w, o.y + 1 + y * self.cell_h)
    }

    /// Render one frame into a reusable framebuffer.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: Hud,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let origin = self.origin(viewport);
        let (frame_w, frame_h) = self.frame_size();
        self.draw_border(fb, origin, frame_w, frame_h);

        for y in 0..BOARD_HEIGHT as u16 {
            let flashing = snap.pending_clear[y as usize];
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_code(snap.board[y as usize][x as usize]) {
                    Some(_) if flashing => self.draw_flash(fb, viewport, x, y),
                    Some(kind) => self.draw_block(fb, viewport, x, y, kind),
                    None => self.draw_empty(fb, viewport, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.draw_block(fb, viewport, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, origin, frame_w);

        match snap.phase {
            Phase::Paused => {
                self.draw_overlay(fb, origin, frame_w, frame_h, &["PAUSED", "P to resume"])
            }
            Phase::GameOver => {
                self.draw_overlay(fb, origin, frame_w, frame_h, &["GAME OVER", "R to restart"])
            }
            Phase::Running => {}
        }
    }

    /// Render into a freshly allocated framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, o: Origin, w: u16, h: u16) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let (right, bottom) = (o.x + w - 1, o.y + h - 1);

        fb.put_char(o.x, o.y, '┌', style);
        fb.put_char(right, o.y, '┐', style);
        fb.put_char(o.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for x in o.x + 1..right {
            fb.put_char(x, o.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in o.y + 1..bottom {
            fb.put_char(o.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, viewport: Viewport, x: u16, y: u16, ch: char, style: CellStyle) {
        let (px, py) = self.cell_origin(viewport, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, viewport: Viewport, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        self.fill_cell(fb, viewport, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, viewport: Viewport, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PLAYFIELD_BG).bold();
        self.fill_cell(fb, viewport, x, y, '█', style);
    }

    /// Rows waiting to be removed are drawn as a solid white bar.
    fn draw_flash(&self, fb: &mut FrameBuffer, viewport: Viewport, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(120, 120, 130)).bold();
        self.fill_cell(fb, viewport, x, y, '▓', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: Hud,
        viewport: Viewport,
        origin: Origin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let rows: [(&str, u32); 5] = [
            ("SCORE", snap.score),
            ("HIGH SCORE", hud.high_score.max(snap.score)),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("SPEED", snap.drop_interval_ms.round() as u32),
        ];

        let mut y = origin.y;
        for (name, n) in rows {
            if y.saturating_add(1) >= viewport.height {
                return;
            }
            fb.put_str(panel_x, y, name, label);
            let end = fb.put_u32(panel_x, y + 1, n, value);
            if name == "SPEED" {
                fb.put_str(end, y + 1, "ms", value.dim());
            }
            y = y.saturating_add(3);
        }

        let hint = value.dim();
        for line in ["←→ move  ↑ rotate", "↓ soft  ␣ drop", "P pause  R reset", "Q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, o: Origin, frame_w: u16, frame_h: u16, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let top = o.y + frame_h / 2 - (lines.len() as u16) / 2;
        for (i, text) in lines.iter().enumerate() {
            let w = text.chars().count() as u16;
            let x = o.x + frame_w.saturating_sub(w) / 2;
            fb.put_str(x, top + i as u16, text, if i == 0 { style } else { style.dim() });
        }
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}
