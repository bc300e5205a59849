pub mod border_styles;
pub mod constants;
pub mod outcome;
pub mod pointer_physics;
pub mod segment;
pub mod spin_animator;
pub mod theme;
pub mod wheel_config;
