pub mod hover;
pub mod lifecycle;
pub mod plugin;
pub mod render;
pub mod scheduler;
pub mod utils;
