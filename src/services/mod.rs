pub mod heic;
pub mod image;
pub mod ingest;
pub mod validate;
