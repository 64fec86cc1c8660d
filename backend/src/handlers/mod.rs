//! HTTP handlers for the Cooperative Commodity Management Platform

mod batch;
mod farmer;
mod health;
mod inventory;
mod product;
mod purchase;
mod sale;
mod shelter;
mod user;

pub use batch::*;
pub use farmer::*;
pub use health::*;
pub use inventory::*;
pub use product::*;
pub use purchase::*;
pub use sale::*;
pub use shelter::*;
pub use user::*;
