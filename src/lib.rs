//! Library for adapting framework-native test discovery into a stable tree
//! of test and parent nodes that an IDE or automation driver can render.

pub mod cli;
pub mod collection;
pub mod config;
pub mod discovery;
