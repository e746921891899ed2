pub mod avatar;
pub mod cli;
pub mod gate;
