pub mod arcade;

pub use arcade::ArcadeMode;
