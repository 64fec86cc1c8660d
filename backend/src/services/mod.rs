//! Business logic services for the Cooperative Commodity Management Platform

pub mod batch;
pub mod farmer;
pub mod inventory;
pub mod product;
pub mod purchase;
pub mod sale;
pub mod shelter;
pub mod user;

pub use batch::BatchService;
pub use farmer::FarmerService;
pub use inventory::InventoryService;
pub use product::ProductService;
pub use purchase::PurchaseService;
pub use sale::SaleService;
pub use shelter::ShelterService;
pub use user::UserService;
