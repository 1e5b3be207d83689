//! # Declarative, validated forms for leptos
//!
//! Describe a form as a list of inputs, each with a label, an input type,
//! a list of named validation rules and optionally the name of a custom
//! component to render it with. Formu binds every input to its value, runs
//! the declared validations on submit and either hands the collected values
//! to `on_success` or the failed rules, keyed by label, to `on_error`.
//!
//! ```rust,ignore
//! use formu::prelude::*;
//! use leptos::*;
//! use std::rc::Rc;
//!
//! #[component]
//! fn Signup() -> impl IntoView {
//!     let inputs = vec![
//!         FormuInput::builder().label("First Name").validations(&["required"]).build(),
//!         FormuInput::builder().label("Email").ty("email").validations(&["email"]).build(),
//!         FormuInput::builder().ref_("pass1").label("Password").ty("password").validations(&["required"]).build(),
//!         FormuInput::builder()
//!             .label("Confirm Password")
//!             .ty("password")
//!             .validations(&["required", "matches:pass1"])
//!             .build(),
//!         FormuInput::builder().label("Submit").ty("submit").build(),
//!     ];
//!     let on_success: Rc<dyn OnSuccess> = Rc::new(|values: FormuValues| logging::log!("{values:?}"));
//!     view! { <Formu inputs=inputs on_success=on_success /> }
//! }
//! ```
//!
//! ## Validation rules
//!
//! A rule is written `name:arg1:arg2`. The name selects a validator from the
//! store's registry and the remaining segments are passed to it as arguments.
//! Validators also get read access to every other field declared with a `ref`,
//! which is how cross-field rules like `matches:pass1` work.
//!
//! Builtin validators: `required`, `email`, `matches:<ref>`, `min_length:<n>`,
//! `max_length:<n>` and `numeric`. Register more with
//! [`FormuStore::add_validator`] or [`add_validators`].
//!
//! ## Crate features
//!
//! This crate offers the following features, all of which are not activated by default:
//!
//! - `serde`: Provides `Deserialize`/`Serialize` impls for [`FormuInput`] and the submission types,
//!   so forms can be declared in configuration

#![forbid(unsafe_code)]

pub use ::formu_core::*;

pub mod prelude {
    pub use super::components::*;
    pub use super::*;
}

#[doc(hidden)]
pub mod internal {
    pub use leptos;
}
