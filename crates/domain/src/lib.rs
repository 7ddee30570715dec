#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod calendar;
mod confirmation;
mod data;
mod error;
mod manual_entry;
mod measure;
mod name;
mod routine;
mod service;
mod statistics;
mod timer;
mod workout;
mod workout_session;

pub use calendar::*;
pub use confirmation::*;
pub use data::*;
pub use error::*;
pub use manual_entry::*;
pub use measure::*;
pub use name::*;
pub use routine::*;
pub use service::*;
pub use statistics::*;
pub use timer::*;
pub use workout::*;
pub use workout_session::*;
