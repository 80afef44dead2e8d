pub mod answers;
pub mod result;
pub mod user;
pub mod voice;
pub mod wellness;
