#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate derivative;
#[macro_use]
extern crate thiserror;
#[macro_use]
extern crate typed_builder;

pub mod components;
mod input;
mod registry;
mod state;
mod store;
mod validation;

pub use components::{FieldProps, Formu, FormuErrors, FormuField, OnError, OnSuccess};
pub use input::*;
pub use registry::*;
pub use state::*;
pub use store::*;
pub use validation::*;

use ::convert_case::{Case, Casing};
use ::leptos::Oco;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormuError {
    #[error("no validator registered with name `{0}`")]
    UnknownValidator(String),
    #[error("no input found with ref `{0}`")]
    UnknownRef(String),
    #[error("invalid argument for validator `{validator}`: {reason}")]
    InvalidArgument { validator: String, reason: String },
    #[error("form store has been disposed")]
    StoreDisposed,
}

impl FormuError {
    pub fn invalid_argument(validator: impl Into<String>, reason: impl ::std::fmt::Display) -> Self {
        Self::InvalidArgument {
            validator: validator.into(),
            reason: format!("{reason}"),
        }
    }
}

pub fn format_form_id(id_prefix: Option<&Oco<'_, str>>, id: impl Into<Oco<'static, str>>) -> Oco<'static, str> {
    let id = id.into();
    match id_prefix {
        None => id,
        Some(prefix) if prefix == "" => id,
        Some(prefix) => Oco::Owned(format!("{prefix}-{id}")),
    }
}

/// Element id for a field, derived from its label.
pub fn format_field_id(id_prefix: Option<&Oco<'_, str>>, label: &str) -> Oco<'static, str> {
    format_form_id(id_prefix, label.to_case(Case::Kebab))
}
