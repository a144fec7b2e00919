//! Keypad widget for the terminal
//!
//! Renders the shared [`Keypad`] layout as a grid of bracketed labels, with the
//! most recently pressed button highlighted. Mouse clicks map back to buttons
//! through [`hit_test`].

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::AngleMode;
use crate::keypad::{Keypad, KeypadAction};

/// Converts a click position inside `area` to the button under it
#[must_use]
pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<KeypadAction> {
    if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
        return None;
    }

    let rel_x = x - area.x;
    let rel_y = y - area.y;

    // Border is one cell on each side
    if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
        return None;
    }

    let (rows, cols) = keypad.dimensions();
    let btn_width = (area.width - 2) / cols as u16;
    let btn_height = (area.height - 2) / rows as u16;
    if btn_width == 0 || btn_height == 0 {
        return None;
    }

    let col = ((rel_x - 1) / btn_width) as usize;
    let row = ((rel_y - 1) / btn_height) as usize;
    keypad.get_button_at(row, col).map(|btn| btn.action)
}

fn button_style(action: KeypadAction, angle_mode: AngleMode) -> Style {
    match action {
        KeypadAction::Digit(_) | KeypadAction::Decimal => Style::default().fg(Color::White),
        KeypadAction::Operator(_) => Style::default().fg(Color::Yellow),
        KeypadAction::Equals => Style::default().fg(Color::Green),
        KeypadAction::ClearAll | KeypadAction::ClearEntry | KeypadAction::Backspace => {
            Style::default().fg(Color::Red)
        }
        KeypadAction::SetAngle(mode) if mode == angle_mode => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        KeypadAction::SetAngle(_) => Style::default().fg(Color::DarkGray),
        _ => Style::default().fg(Color::Cyan),
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    highlighted: Option<KeypadAction>,
    angle_mode: AngleMode,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self {
            keypad,
            highlighted: None,
            angle_mode: AngleMode::default(),
        }
    }

    /// Highlights the button performing `action`
    #[must_use]
    pub fn highlight(mut self, action: Option<KeypadAction>) -> Self {
        self.highlighted = action;
        self
    }

    /// Marks the active angle mode button
    #[must_use]
    pub fn angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for btn in self.keypad.buttons() {
            let x = inner.x + (btn.col as u16 * btn_width);
            let y = inner.y + (btn.row as u16 * btn_height);

            let style = if self.highlighted == Some(btn.action) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                button_style(btn.action, self.angle_mode)
            };

            let label = format!("[{}]", btn.action.label());
            let label_width = label.chars().count() as u16;
            if btn_width >= label_width {
                let label_x = x + (btn_width - label_width) / 2;
                let label_y = y + btn_height / 2;
                if label_y < inner.y + inner.height {
                    buf.set_span(label_x, label_y, &Span::styled(label, style), btn_width);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Operation, ScientificFunction};

    fn area() -> Rect {
        // 5 columns of 7 cells, 7 rows of 2 cells, plus borders
        Rect::new(0, 0, 37, 16)
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    // ===== hit_test tests =====

    #[test]
    fn test_hit_test_inside() {
        let keypad = Keypad::new();
        assert_eq!(
            hit_test(&keypad, area(), 1, 1),
            Some(KeypadAction::SetAngle(AngleMode::Deg))
        );
        // Row 4, column 0 is the 7 key
        assert_eq!(hit_test(&keypad, area(), 2, 9), Some(KeypadAction::Digit(7)));
        // Last row, last column is equals
        assert_eq!(hit_test(&keypad, area(), 35, 14), Some(KeypadAction::Equals));
    }

    #[test]
    fn test_hit_test_outside() {
        let keypad = Keypad::new();
        assert_eq!(hit_test(&keypad, area(), 40, 5), None);
        assert_eq!(hit_test(&keypad, area(), 5, 20), None);
        let offset = Rect::new(10, 10, 37, 16);
        assert_eq!(hit_test(&keypad, offset, 5, 5), None);
    }

    #[test]
    fn test_hit_test_border() {
        let keypad = Keypad::new();
        assert_eq!(hit_test(&keypad, area(), 0, 5), None);
        assert_eq!(hit_test(&keypad, area(), 5, 0), None);
        assert_eq!(hit_test(&keypad, area(), 36, 5), None);
        assert_eq!(hit_test(&keypad, area(), 5, 15), None);
    }

    #[test]
    fn test_hit_test_too_small() {
        let keypad = Keypad::new();
        assert_eq!(hit_test(&keypad, Rect::new(0, 0, 4, 4), 1, 1), None);
    }

    #[test]
    fn test_hit_test_offset_area() {
        let keypad = Keypad::new();
        let offset = Rect::new(10, 3, 37, 16);
        assert_eq!(
            hit_test(&keypad, offset, 11 + 7, 4 + 2),
            Some(KeypadAction::Function(ScientificFunction::Cos))
        );
    }

    // ===== Widget tests =====

    #[test]
    fn test_widget_render_labels() {
        let keypad = Keypad::new();
        let mut buf = Buffer::empty(area());
        KeypadWidget::new(&keypad).render(area(), &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Keypad"));
        assert!(text.contains("[sin]"));
        assert!(text.contains("[1/x]"));
        assert!(text.contains("[7]"));
        assert!(text.contains("[=]"));
    }

    #[test]
    fn test_widget_render_small_area() {
        let keypad = Keypad::new();
        let small = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(small);
        KeypadWidget::new(&keypad).render(small, &mut buf);
        assert!(!buffer_text(&buf).contains("[7]"));
    }

    #[test]
    fn test_widget_render_highlight() {
        let keypad = Keypad::new();
        let mut buf = Buffer::empty(area());
        KeypadWidget::new(&keypad)
            .highlight(Some(KeypadAction::Operator(Operation::Add)))
            .render(area(), &mut buf);

        let highlighted = buf
            .content()
            .iter()
            .filter(|c| c.bg == Color::Yellow)
            .map(|c| c.symbol())
            .collect::<String>();
        assert_eq!(highlighted, "[+]");
    }

    #[test]
    fn test_widget_marks_active_angle_mode() {
        let keypad = Keypad::new();
        let mut buf = Buffer::empty(area());
        KeypadWidget::new(&keypad)
            .angle_mode(AngleMode::Rad)
            .render(area(), &mut buf);

        let magenta = buf
            .content()
            .iter()
            .filter(|c| c.fg == Color::Magenta)
            .map(|c| c.symbol())
            .collect::<String>();
        assert_eq!(magenta, "[RAD]");
    }
}
