//! Reusable widgets shared by the screens

pub mod logo;
pub mod progress;
pub mod shortcuts;
pub mod storage;
