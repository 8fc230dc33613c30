//! 外部API

pub mod gemini;
