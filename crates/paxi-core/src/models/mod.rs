//! Domain models for the PAXI booking system.

mod appointment;
mod doctor;
mod history;
mod notification;
mod owner;
mod pet;

pub use appointment::*;
pub use doctor::*;
pub use history::*;
pub use notification::*;
pub use owner::*;
pub use pet::*;
