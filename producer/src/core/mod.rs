//! Producer core logic

pub mod producer;
pub mod randomizer;

pub use producer::Producer;
pub use randomizer::RangeRandomizer;
