pub mod shatter;

pub use shatter::ShatterAnimator;
