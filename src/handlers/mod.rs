pub mod admin;
pub mod auth;
pub mod form_data;
pub mod health_check;
pub mod public;
pub mod upload;

pub use auth::{login, logout};
pub use health_check::health_check;
pub use public::{
    list_approved_submissions, list_cocktails, list_homies, list_memorabilia, list_whats_new,
};
pub use upload::submit_photo;
