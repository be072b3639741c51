use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::{DialogOutcome, InputDialog};

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 14;
const PAGE_STEP: u16 = 5;

/// Modal terminal dialog presenting a prompt for human review.
///
/// Takes over the terminal for the duration of one `collect` call: alternate
/// screen, raw mode, a centered popup with the prompt in a read-only
/// scrollable pane and a single-line input field underneath. Enter submits
/// the current input; Esc (or Ctrl+C) dismisses.
///
/// This blocks the calling thread while it pumps the terminal event loop;
/// run it through `spawn_blocking` from async code.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalDialog;

struct DialogState {
    input: String,
    scroll: u16,
}

impl InputDialog for TerminalDialog {
    fn collect(&self, prompt: &str) -> io::Result<DialogOutcome> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let outcome = run_event_loop(&mut terminal, prompt);

        // Restore the terminal even when the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        outcome
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    prompt: &str,
) -> io::Result<DialogOutcome> {
    let mut state = DialogState {
        input: String::new(),
        scroll: 0,
    };

    loop {
        terminal.draw(|frame| render(frame, prompt, &state))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => return Ok(DialogOutcome::Submitted(state.input)),
            KeyCode::Esc => return Ok(DialogOutcome::Dismissed),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(DialogOutcome::Dismissed);
            }
            KeyCode::Backspace => {
                state.input.pop();
            }
            KeyCode::Up => state.scroll = state.scroll.saturating_sub(1),
            KeyCode::Down => state.scroll = state.scroll.saturating_add(1),
            KeyCode::PageUp => state.scroll = state.scroll.saturating_sub(PAGE_STEP),
            KeyCode::PageDown => state.scroll = state.scroll.saturating_add(PAGE_STEP),
            KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
                state.input.push(c);
            }
            _ => {}
        }
    }
}

fn render(frame: &mut ratatui::Frame, prompt: &str, state: &DialogState) {
    let popup = popup_area(frame.area());
    frame.render_widget(Clear, popup);

    let outer = Block::default()
        .title(" Prompt Review ")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Yellow));
    let inner = outer.inner(popup);
    frame.render_widget(outer, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // prompt, read-only
            Constraint::Length(3), // input
            Constraint::Length(1), // instructions
        ])
        .split(inner);

    let prompt_pane = Paragraph::new(prompt)
        .block(
            Block::default()
                .title(" Prompt ")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    frame.render_widget(prompt_pane, chunks[0]);

    let input_pane = Paragraph::new(Line::from(state.input.as_str())).block(
        Block::default()
            .title(" Your Reply ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White)),
    );
    frame.render_widget(input_pane, chunks[1]);

    // Keep the cursor in the input field so focus is obvious.
    let cursor_x = chunks[1].x + 1 + state.input.chars().count() as u16;
    let cursor_x = cursor_x.min(chunks[1].x + chunks[1].width.saturating_sub(2));
    frame.set_cursor_position(Position::new(cursor_x, chunks[1].y + 1));

    let instructions = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" submit  "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" dismiss  "),
        Span::styled("↑/↓", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" scroll prompt"),
    ]))
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(instructions, chunks[2]);
}

/// Centered popup: 80% of the screen, clamped to a usable minimum.
fn popup_area(area: Rect) -> Rect {
    let width = ((area.width * 4) / 5).max(MIN_WIDTH).min(area.width);
    let height = ((area.height * 4) / 5).max(MIN_HEIGHT).min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centered_within_a_large_area() {
        let area = Rect::new(0, 0, 200, 100);
        let popup = popup_area(area);
        assert_eq!(popup.width, 160);
        assert_eq!(popup.height, 80);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn popup_never_exceeds_a_tiny_area() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = popup_area(area);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
        assert_eq!(popup.x, 0);
        assert_eq!(popup.y, 0);
    }
}
