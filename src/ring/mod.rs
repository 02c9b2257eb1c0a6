pub mod modular;
pub mod plaintext;

pub use modular::{centered, neg_threshold, project_signed};
pub use plaintext::{Plaintext, MAX_PARSE_DEGREE};
