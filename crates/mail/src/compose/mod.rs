//! Reply composition
//!
//! A structured draft (subject plus HTML body with an explicit cursor) and
//! the modal lifecycle around it.

mod composer;
mod draft;

pub use composer::{ComposeError, ComposeOptions, ComposeState, Composer, Outgoing};
pub use draft::{Draft, Format, TemplateVariable, escape_html};
