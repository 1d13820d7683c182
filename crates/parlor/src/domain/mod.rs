pub mod deck;
pub mod feedback;
pub mod game;
pub mod scores;
pub mod validate;
