//! 应用层

pub mod showcase;
