//! Prompt templating
//!
//! A [`Prompter`] binds named parameters into a `{name}` template and
//! produces a [`Prompt`]. Parameter sets must match the template's variables
//! exactly; mismatches are reported as [`PromptError`] before anything is
//! substituted.

mod error;
mod prompt;
mod prompter;
mod template;

pub use error::PromptError;
pub use prompt::{Prompt, INSTRUCTION_HEADER};
pub use prompter::{Params, Prompter};
pub use template::Template;
