pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod office_repo;
pub use office_repo::OfficeRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod purchase_repo;
pub use purchase_repo::PurchaseRepository;
