pub mod barcode_service;
pub mod catalog_service;
pub mod office_service;
pub mod purchase_service;
