//! Keyboard and mouse state collected between frames

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use cubeview_core::MoveKeys;

/// Look delta, in pixels, applied per arrow-key press
pub const ARROW_LOOK_PIXELS: i32 = 40;

/// Everything the app needs from one frame's worth of events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub keys: MoveKeys,
    /// Accumulated relative mouse motion in pixels
    pub look: (i32, i32),
    pub quit: bool,
    pub toggle_fill: bool,
    pub toggle_backface: bool,
    pub resized: Option<(u16, u16)>,
}

/// Folds crossterm events into per-frame snapshots.
///
/// Terminals that report key releases keep movement keys held until the
/// release arrives. Others only report presses (and auto-repeat), so a
/// key counts as held for the frame its press arrived in.
#[derive(Debug)]
pub struct InputState {
    pending: FrameInput,
    held: MoveKeys,
    releases_reported: bool,
    last_mouse: Option<(u16, u16)>,
    pixels_per_cell: (i32, i32),
}

impl InputState {
    pub fn new(releases_reported: bool, pixels_per_cell: (i32, i32)) -> Self {
        Self {
            pending: FrameInput::default(),
            held: MoveKeys::none(),
            releases_reported,
            last_mouse: None,
            pixels_per_cell,
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    self.handle_mouse(mouse.column, mouse.row)
                }
                _ => {}
            },
            Event::Resize(cols, rows) => self.pending.resized = Some((*cols, *rows)),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let pressed = !matches!(key.kind, KeyEventKind::Release);

        if let Some(slot) = self.movement_slot(key.code) {
            *slot = pressed;
            return;
        }
        if !pressed {
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.pending.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.pending.quit = true
            }
            KeyCode::Char('f') | KeyCode::Char('F') => self.pending.toggle_fill = true,
            KeyCode::Char('b') | KeyCode::Char('B') => self.pending.toggle_backface = true,
            KeyCode::Left => self.pending.look.0 -= ARROW_LOOK_PIXELS,
            KeyCode::Right => self.pending.look.0 += ARROW_LOOK_PIXELS,
            KeyCode::Up => self.pending.look.1 -= ARROW_LOOK_PIXELS,
            KeyCode::Down => self.pending.look.1 += ARROW_LOOK_PIXELS,
            _ => {}
        }
    }

    fn movement_slot(&mut self, code: KeyCode) -> Option<&mut bool> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') => Some(&mut self.held.forward),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(&mut self.held.back),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(&mut self.held.left),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(&mut self.held.right),
            _ => None,
        }
    }

    fn handle_mouse(&mut self, column: u16, row: u16) {
        if let Some((last_col, last_row)) = self.last_mouse {
            let dx = (column as i32 - last_col as i32) * self.pixels_per_cell.0;
            let dy = (row as i32 - last_row as i32) * self.pixels_per_cell.1;
            self.pending.look.0 += dx;
            self.pending.look.1 += dy;
        }
        self.last_mouse = Some((column, row));
    }

    /// Snapshot for this frame; resets deltas and one-shot flags
    pub fn take_frame(&mut self) -> FrameInput {
        let mut frame = std::mem::take(&mut self.pending);
        frame.keys = self.held;
        if !self.releases_reported {
            self.held = MoveKeys::none();
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseEvent, MouseEventKind};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    fn mouse_at(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_held_until_release() {
        let mut input = InputState::new(true, (8, 16));
        input.handle_event(&press(KeyCode::Char('w')));
        assert!(input.take_frame().keys.forward);
        assert!(input.take_frame().keys.forward);
        input.handle_event(&release(KeyCode::Char('w')));
        assert!(!input.take_frame().keys.forward);
    }

    #[test]
    fn test_press_only_terminal() {
        let mut input = InputState::new(false, (8, 16));
        input.handle_event(&press(KeyCode::Char('d')));
        input.handle_event(&press(KeyCode::Char('a')));
        let frame = input.take_frame();
        assert!(frame.keys.right && frame.keys.left);
        assert!(!input.take_frame().keys.any());
    }

    #[test]
    fn test_mouse_deltas_accumulate() {
        let mut input = InputState::new(true, (8, 16));
        input.handle_event(&mouse_at(10, 10));
        input.handle_event(&mouse_at(12, 9));
        input.handle_event(&mouse_at(13, 9));
        assert_eq!(input.take_frame().look, (24, -16));
        assert_eq!(input.take_frame().look, (0, 0));
    }

    #[test]
    fn test_arrow_keys_look() {
        let mut input = InputState::new(true, (8, 16));
        input.handle_event(&press(KeyCode::Right));
        input.handle_event(&press(KeyCode::Up));
        assert_eq!(
            input.take_frame().look,
            (ARROW_LOOK_PIXELS, -ARROW_LOOK_PIXELS)
        );
    }

    #[test]
    fn test_quit_and_toggles() {
        let mut input = InputState::new(true, (8, 16));
        input.handle_event(&press(KeyCode::Char('f')));
        input.handle_event(&press(KeyCode::Char('b')));
        let frame = input.take_frame();
        assert!(frame.toggle_fill && frame.toggle_backface && !frame.quit);
        assert!(!input.take_frame().toggle_fill);

        input.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(input.take_frame().quit);
        input.handle_event(&press(KeyCode::Esc));
        assert!(input.take_frame().quit);
    }

    #[test]
    fn test_resize_reported_once() {
        let mut input = InputState::new(true, (8, 16));
        input.handle_event(&Event::Resize(120, 40));
        assert_eq!(input.take_frame().resized, Some((120, 40)));
        assert_eq!(input.take_frame().resized, None);
    }
}
