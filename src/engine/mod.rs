pub mod randomizer;
pub mod scoring;
