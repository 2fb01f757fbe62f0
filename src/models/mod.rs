pub mod entities;
pub mod state;

pub use entities::{
    Cocktail, Homie, Memorabilia, Submission, SubmissionStatus, WhatsNewItem,
};
pub use state::AppState;
