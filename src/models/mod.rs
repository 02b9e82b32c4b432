//! Data models for the CrewDesk workforce application.

mod company;
mod contractor;
mod department;
mod worker;

pub use company::*;
pub use contractor::*;
pub use department::*;
pub use worker::*;
