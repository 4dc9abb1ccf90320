use super::action::Direction;
use super::config::board_extent;

/// A position on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake on the board
///
/// `body` is never empty. Segments are distinct during normal play, but
/// right after a teleport they all share one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Committed direction, the one used by the last tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    #[cfg(test)]
    pub(crate) fn from_body(body: Vec<Position>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Regular move: new head in front, tail dropped
    pub fn advance_to(&mut self, new_head: Position) {
        self.body.insert(0, new_head);
        self.body.pop();
    }

    /// Grow from both ends: new head in front and the old tail kept twice
    pub fn grow_to(&mut self, new_head: Position) {
        let tail = self.tail();
        self.body.insert(0, new_head);
        self.body.push(tail);
    }

    /// Move every segment onto one cell
    pub fn teleport(&mut self, target: Position) {
        self.body.iter_mut().for_each(|segment| *segment = target);
    }

    /// True when every segment shares a single cell
    pub fn is_collapsed(&self) -> bool {
        let head = self.head();
        self.body.iter().all(|segment| *segment == head)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    /// Terminal until the next reset
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Latest accepted direction request, committed at the next tick
    pub pending_direction: Direction,
    pub phase: GamePhase,
    pub score: u32,
    pub board_size: usize,
}

impl GameState {
    /// Create a new running game state
    pub fn new(snake: Snake, food: Position, board_size: usize) -> Self {
        Self {
            pending_direction: snake.direction,
            snake,
            food,
            phase: GamePhase::Running,
            score: 0,
            board_size,
        }
    }

    /// Committed direction
    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    /// Check if a position is within the board bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = board_extent(self.board_size);
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}
