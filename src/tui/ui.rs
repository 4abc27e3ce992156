//! Stateless rendering of the Connect Four screen.

use super::app::{App, Outcome};
use connect_four_rules::{HEIGHT, Piece, Square, State, WIDTH};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Colour used for a player's pieces.
pub fn piece_color(piece: Piece) -> Color {
    match piece {
        Piece::One => Color::LightRed,
        Piece::Two => Color::LightBlue,
    }
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                    // Title
            Constraint::Length(HEIGHT as u16 + 3),    // Board + highlight row
            Constraint::Min(3),                       // Turn and thoughts
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Connect 4", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  (Press q to quit)"),
        ]),
        players_line(app),
    ]);
    frame.render_widget(title, rows[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(10)])
        .split(rows[1]);

    frame.render_widget(Paragraph::new(board_lines(app.state(), app.highlight())), middle[0]);
    draw_side(frame, middle[1], app);
    draw_turn(frame, rows[2], app);
}

/// Board framed in box-drawing characters, followed by the highlight row.
pub fn board_lines(state: &State, highlight: &[usize]) -> Vec<Line<'static>> {
    let frame_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let board = state.board();
    let mut lines = Vec::with_capacity(HEIGHT + 3);

    lines.push(Line::styled(format!("╔{}╗", "═".repeat(WIDTH * 2 + 1)), frame_style));
    for row in (0..HEIGHT).rev() {
        let mut spans = vec![Span::styled("║", frame_style)];
        for column in 0..WIDTH {
            spans.push(Span::raw(" "));
            spans.push(match board.get(column, row) {
                Square::Occupied(piece) => Span::styled("■", Style::default().fg(piece_color(piece))),
                Square::Empty => Span::raw(" "),
            });
        }
        spans.push(Span::styled(" ║", frame_style));
        lines.push(Line::from(spans));
    }
    lines.push(Line::styled(format!("╚{}╝", "═".repeat(WIDTH * 2 + 1)), frame_style));

    let playable = state.valid_plays();
    let marker = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::raw(" ")];
    for column in 1..=WIDTH {
        spans.push(Span::raw(" "));
        spans.push(if highlight.contains(&column) {
            Span::styled(column.to_string(), marker)
        } else if playable.contains(&column) {
            Span::styled(".", marker)
        } else {
            Span::raw(" ")
        });
    }
    lines.push(Line::from(spans));
    lines
}

/// Both players with their descriptions, each in its piece colour.
pub fn players_line(app: &App) -> Line<'static> {
    let mut spans = Vec::with_capacity(3);
    for piece in [Piece::One, Piece::Two] {
        if piece == Piece::Two {
            spans.push(Span::raw("  |  "));
        }
        let mut label = format!("Player {}: {}", piece, app.player_name(piece));
        let description = app.player_description(piece);
        if !description.is_empty() {
            label.push_str(&format!(" ({})", description));
        }
        spans.push(Span::styled(label, Style::default().fg(piece_color(piece))));
    }
    Line::from(spans)
}

/// Move list with every move coloured by the player who made it.
pub fn moves_line(state: &State) -> Line<'static> {
    let mut spans = vec![Span::raw("Moves: ")];
    spans.extend(state.moves().iter().enumerate().map(|(i, column)| {
        let piece = if i % 2 == 0 { Piece::One } else { Piece::Two };
        Span::styled(
            column.to_string(),
            Style::default().fg(Color::Black).bg(piece_color(piece)),
        )
    }));
    Line::from(spans)
}

fn draw_side(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::raw(""), moves_line(app.state()), Line::raw("")];

    match app.outcome() {
        Some(Outcome::Winner(piece)) => {
            lines.push(Line::raw("Game Over."));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("Winner is: "),
                Span::styled(
                    format!("Player {} - {}", piece, app.player_name(piece)),
                    Style::default().fg(piece_color(piece)),
                ),
            ]));
        }
        Some(Outcome::Draw) => {
            lines.push(Line::raw("Game Over."));
            lines.push(Line::raw(""));
            lines.push(Line::raw("Draw"));
        }
        None => {}
    }
    if let Some(error) = app.error() {
        lines.push(Line::styled(
            format!("Game stopped: {}", error),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn draw_turn(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();
    if let Some((piece, name)) = app.active() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("Player {} - ", piece),
                Style::default().fg(piece_color(piece)),
            ),
            Span::raw(format!("{}'s turn:", name)),
        ]));
        lines.extend(app.thoughts().iter().map(|t| Line::raw(t.clone())));
    } else if app.finished() {
        lines.push(Line::raw("Press q to quit."));
    }

    let block = Block::default().borders(Borders::TOP);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_board_lines_shape() {
        let state = State::parse("244444666666777777333555555").unwrap();
        let lines = board_lines(&state, &[2]);
        assert_eq!(lines.len(), HEIGHT + 3);
        assert_eq!(plain(&lines[0]), "╔═══════════════╗");
        assert_eq!(plain(&lines[HEIGHT]), "║   ■ ■ ■ ■ ■ ■ ║");
        assert_eq!(plain(&lines[HEIGHT + 2]), "  . 2 . .      ");
    }

    #[test]
    fn test_players_line_shows_descriptions() {
        let app = App::new(State::initial(), "Human", "Hugh")
            .with_descriptions("Keyboard-driven", "Simple heuristics");
        let line = players_line(&app);
        assert_eq!(
            plain(&line),
            "Player 1: Human (Keyboard-driven)  |  Player 2: Hugh (Simple heuristics)"
        );
        assert_eq!(line.spans[0].style.fg, Some(piece_color(Piece::One)));
        assert_eq!(line.spans[2].style.fg, Some(piece_color(Piece::Two)));

        let bare = players_line(&App::new(State::initial(), "Rando", "Eddie"));
        assert_eq!(plain(&bare), "Player 1: Rando  |  Player 2: Eddie");
    }

    #[test]
    fn test_moves_line_alternates_colours() {
        let line = moves_line(&State::parse("44").unwrap());
        assert_eq!(plain(&line), "Moves: 44");
        assert_eq!(line.spans[1].style.bg, Some(piece_color(Piece::One)));
        assert_eq!(line.spans[2].style.bg, Some(piece_color(Piece::Two)));
    }
}
