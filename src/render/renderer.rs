use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{board_extent, GamePhase, GameState, Position};
use crate::notify::Toast;

/// What occupies a board cell, head winning over body and body over food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Head,
    Body,
    Food,
    Empty,
}

impl Cell {
    pub fn at(state: &GameState, pos: Position) -> Cell {
        if pos == state.snake.head() {
            Cell::Head
        } else if state.snake.occupies(pos) {
            Cell::Body
        } else if pos == state.food {
            Cell::Food
        } else {
            Cell::Empty
        }
    }

    fn span(self) -> Span<'static> {
        match self {
            Cell::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            Cell::Food => Span::styled(
                "● ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }
}

const OVERLAY_WIDTH: u16 = 44;
const PAUSED_HEIGHT: u16 = 6;
const GAME_OVER_HEIGHT: u16 = 8;

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        high_score: u32,
        toast: Option<&Toast>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(state, high_score), chunks[0]);

        // Center the board horizontally
        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_board(state), board_area);

        // Paused and game-over panels sit on top of the frozen board
        let overlay = match state.phase {
            GamePhase::Running => None,
            GamePhase::Paused => Some((self.render_paused(), PAUSED_HEIGHT)),
            GamePhase::GameOver => Some((
                self.render_game_over(state, high_score),
                GAME_OVER_HEIGHT,
            )),
        };
        if let Some((panel, height)) = overlay {
            let area = centered_rect(board_area, OVERLAY_WIDTH, height);
            frame.render_widget(Clear, area);
            frame.render_widget(panel, area);
        }

        let footer = match toast {
            Some(toast) => self.render_toast(toast),
            None => self.render_controls(),
        };
        frame.render_widget(footer, chunks[2]);
    }

    fn render_board(&self, state: &GameState) -> Paragraph<'static> {
        let size = board_extent(state.board_size);
        let lines: Vec<Line> = (0..size)
            .map(|y| {
                let spans: Vec<Span> = (0..size)
                    .map(|x| Cell::at(state, Position::new(x, y)).span())
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Twisted Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_header(&self, state: &GameState, high_score: u32) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value),
            Span::raw("    "),
            Span::styled(
                "Twisted Snake",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" - Grow & Teleport", Style::default().fg(Color::Gray)),
            Span::raw("    "),
            Span::styled("High Score: ", label),
            Span::styled(high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to resume", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, state: &GameState, high_score: u32) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" | High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(high_score.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_toast(&self, toast: &Toast) -> Paragraph<'static> {
        let text = vec![
            Line::from(Span::styled(
                toast.title.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::raw(toast.description.clone())),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Snake};

    fn state() -> GameState {
        let snake = Snake::from_body(
            vec![Position::new(2, 2), Position::new(1, 2)],
            Direction::Right,
        );
        GameState::new(snake, Position::new(4, 0), 5)
    }

    #[test]
    fn test_cell_classification() {
        let state = state();
        assert_eq!(Cell::at(&state, Position::new(2, 2)), Cell::Head);
        assert_eq!(Cell::at(&state, Position::new(1, 2)), Cell::Body);
        assert_eq!(Cell::at(&state, Position::new(4, 0)), Cell::Food);
        assert_eq!(Cell::at(&state, Position::new(0, 0)), Cell::Empty);
    }

    #[test]
    fn test_collapsed_snake_shows_head() {
        let mut state = state();
        state.snake.teleport(Position::new(3, 3));
        assert_eq!(Cell::at(&state, Position::new(3, 3)), Cell::Head);
        assert_eq!(Cell::at(&state, Position::new(2, 2)), Cell::Empty);
    }

    #[test]
    fn test_overlay_centered_in_board() {
        let area = Rect::new(10, 5, 60, 22);
        assert_eq!(centered_rect(area, 44, 8), Rect::new(18, 12, 44, 8));
    }

    #[test]
    fn test_overlay_shrinks_to_small_area() {
        let area = Rect::new(0, 0, 20, 4);
        assert_eq!(centered_rect(area, 44, 8), area);
    }

    #[test]
    fn test_snake_drawn_over_food() {
        let mut state = state();
        state.food = Position::new(1, 2);
        assert_eq!(Cell::at(&state, Position::new(1, 2)), Cell::Body);
    }
}
