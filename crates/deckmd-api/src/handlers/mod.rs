pub mod convert;
pub mod pages;
