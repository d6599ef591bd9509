pub mod barcodes;
pub mod items;
pub mod offices;
pub mod purchases;
pub mod units;
