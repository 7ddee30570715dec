pub mod calendar;
pub mod data;
pub mod home;
pub mod manual;
pub mod not_found;
pub mod progress;
pub mod routine;
pub mod routines;
pub mod workout;
