mod card;
mod ids;
mod status;
mod text;

pub use card::{CardDraft, CardValidationError, Flashcard, ValidatedCard};
pub use ids::CardId;
pub use status::{CardStatus, StatusError};
pub use text::{BackText, FrontText, TextError};
