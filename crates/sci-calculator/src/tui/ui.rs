//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Window title
pub const TITLE: &str = " Scientific Calculator ";

/// Shortcut help shown in the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("Enter", "Equals"),
    ("Esc/c", "Clear all"),
    ("Del", "Clear entry"),
    ("Bksp", "Backspace"),
    ("Tab", "DEG/RAD"),
    ("s o t", "sin cos tan"),
    ("l g", "ln log"),
    ("r b", "√ ∛"),
    ("!", "Factorial"),
    ("p e", "π e"),
    ("i n", "1/x ±"),
    ("Ctrl+C", "Quit"),
];

/// Operators help
pub const HELP_OPERATORS: &str = "Ops: + - * / % ^";

/// Screen regions used for rendering and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiAreas {
    /// History line
    pub history: Rect,
    /// Primary display
    pub display: Rect,
    /// Tape of completed calculations
    pub tape: Rect,
    /// Keypad grid
    pub keypad: Rect,
    /// Help sidebar
    pub help: Rect,
}

impl UiAreas {
    /// Splits the full terminal area into regions
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([
                Constraint::Min(24),    // Display + tape
                Constraint::Length(37), // Keypad
                Constraint::Length(22), // Help sidebar
            ])
            .split(area);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // History line
                Constraint::Length(3), // Display
                Constraint::Min(3),    // Tape
            ])
            .split(columns[0]);

        let keypad = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(16), Constraint::Min(0)])
            .split(columns[1]);

        Self {
            history: main[0],
            display: main[1],
            tape: main[2],
            keypad: keypad[0],
            help: columns[2],
        }
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_history_line(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(
            self.app.engine().history(),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .title(" History ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .render(area, buf);
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let engine = self.app.engine();
        let style = if engine.is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };
        let border = if engine.is_error() {
            Color::Red
        } else {
            Color::Yellow
        };

        Paragraph::new(Span::styled(engine.current_input(), style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(format!(" Display [{}] ", engine.angle_mode().label()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .render(area, buf);
    }

    fn render_tape(&self, area: Rect, buf: &mut Buffer) {
        let visible = area.height.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .app
            .engine()
            .tape()
            .iter_rev()
            .take(visible)
            .map(|entry| {
                let separator = if entry.expression.ends_with('=') {
                    " "
                } else {
                    " = "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(entry.expression.as_str(), Style::default().fg(Color::Gray)),
                    Span::raw(separator),
                    Span::styled(entry.result.as_str(), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Tape (newest first) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_keypad(&self, area: Rect, buf: &mut Buffer) {
        KeypadWidget::new(self.app.keypad())
            .highlight(self.app.last_pressed())
            .angle_mode(self.app.engine().angle_mode())
            .render(area, buf);
    }

    fn render_help_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(3)])
            .split(area);

        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>6}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            HELP_OPERATORS,
            Style::default().fg(Color::Cyan),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(chunks[1], buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let areas = UiAreas::new(area);
        self.render_history_line(areas.history, buf);
        self.render_display(areas.display, buf);
        self.render_tape(areas.tape, buf);
        self.render_keypad(areas.keypad, buf);
        self.render_help_sidebar(areas.help, buf);
    }
}
