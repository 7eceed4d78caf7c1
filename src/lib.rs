#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub use app::App;

pub mod ball;
pub mod drawable;
pub mod environment;
pub mod error;
pub mod ghost;
pub mod impact;
pub mod scheduler;
pub mod settings;
pub mod simulation;
pub mod stepper;
pub mod trace;
pub mod trajectory;
