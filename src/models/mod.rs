pub mod piece;

pub use piece::Piece;
