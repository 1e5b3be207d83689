use crate::*;
use ::std::fmt;

#[cfg(feature = "serde")]
use ::serde::{Deserialize, Serialize};

/// A declared form field.
///
/// `label` is required and keys both the error map and the submitted values,
/// so two inputs sharing a label share an error entry.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct FormuInput {
    /// Name other fields' validators use to read this field's value.
    #[builder(default, setter(into, strip_option))]
    #[cfg_attr(feature = "serde", serde(default, rename = "ref", skip_serializing_if = "Option::is_none"))]
    pub ref_: Option<String>,
    #[builder(setter(into))]
    pub label: String,
    #[builder(default, setter(into))]
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub ty: InputType,
    /// Initial value, empty when unset.
    #[builder(default, setter(into, strip_option))]
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<String>,
    #[builder(default, setter(transform = |rules: &[&str]| rules.iter().map(|rule| ValidationRule::from(*rule)).collect()))]
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub validations: Vec<ValidationRule>,
    /// Name of a registered custom component used instead of the default `<input>`.
    #[builder(default, setter(into, strip_option))]
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub component: Option<String>,
}

/// Html input type of a field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, IsVariant)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(from = "String", into = "String"))]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Submit,
    Other(String),
}

impl InputType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Number => "number",
            Self::Submit => "submit",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for InputType {
    fn from(value: &str) -> Self {
        match value {
            "text" => Self::Text,
            "password" => Self::Password,
            "email" => Self::Email,
            "number" => Self::Number,
            "submit" => Self::Submit,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for InputType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<InputType> for String {
    fn from(value: InputType) -> Self {
        match value {
            InputType::Other(other) => other,
            ty => ty.as_str().to_string(),
        }
    }
}

impl FormuInput {
    /// Whether this input only triggers submission and carries no value.
    pub fn is_submit(&self) -> bool {
        self.ty.is_submit()
    }

    /// Value a freshly loaded field starts with.
    pub fn initial_value(&self) -> String {
        self.value.clone().unwrap_or_default()
    }
}
