pub mod cell;
pub mod direction;
pub mod food;
pub mod grid;
pub mod level;
pub mod movement;
pub mod snake;
pub mod turn;
