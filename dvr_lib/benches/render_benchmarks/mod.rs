pub mod histogram;
pub mod modes;
