use crate::*;
use ::itertools::Itertools;
use ::std::fmt;
use ::std::rc::Rc;

#[cfg(feature = "serde")]
use ::serde::{Deserialize, Serialize};

/// A validation rule of the form `name:arg1:arg2`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(from = "String", into = "String"))]
pub struct ValidationRule {
    name: String,
    args: Vec<String>,
}

impl ValidationRule {
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl From<&str> for ValidationRule {
    fn from(rule: &str) -> Self {
        let mut segments = rule.split(':');
        let name = segments.next().unwrap_or_default();
        Self::new(name, segments)
    }
}

impl From<String> for ValidationRule {
    fn from(rule: String) -> Self {
        Self::from(rule.as_str())
    }
}

impl From<ValidationRule> for String {
    fn from(rule: ValidationRule) -> Self {
        rule.to_string()
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ::std::iter::once(&self.name).chain(&self.args).join(":"))
    }
}

/// Context handed to every validator: the rule's arguments and read access
/// to the other fields of the form.
#[derive(Clone, Copy, Debug)]
pub struct ValidationHelpers<'a> {
    pub(crate) validator: &'a str,
    pub(crate) args: &'a [String],
    pub(crate) fields: &'a [FieldState],
}

impl<'a> ValidationHelpers<'a> {
    pub fn args(&self) -> &'a [String] {
        self.args
    }

    /// Current value of the field declared with `ref_`.
    pub fn get(&self, ref_: &str) -> Result<&'a str, FormuError> {
        crate::state::value_of(self.fields, ref_).ok_or_else(|| FormuError::UnknownRef(ref_.to_string()))
    }

    /// Positional argument `index`, failing with [`FormuError::InvalidArgument`] when absent.
    pub fn arg(&self, index: usize) -> Result<&'a str, FormuError> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| FormuError::invalid_argument(self.validator, format!("missing argument {}", index + 1)))
    }

    pub fn parse_arg<T>(&self, index: usize) -> Result<T, FormuError>
    where
        T: ::std::str::FromStr,
        T::Err: fmt::Display,
    {
        let arg = self.arg(index)?;
        arg.parse()
            .map_err(|err| FormuError::invalid_argument(self.validator, format!("`{arg}`: {err}")))
    }
}

/// Returns whether `value` passes, or an error when the form is misconfigured.
pub trait ValidatorFn: Fn(&str, &ValidationHelpers<'_>) -> Result<bool, FormuError> + 'static {}

impl<F> ValidatorFn for F where F: Fn(&str, &ValidationHelpers<'_>) -> Result<bool, FormuError> + 'static {}

pub type Validator = Rc<dyn ValidatorFn>;

/// Validators available in every registry created with [`Registry::with_builtins`].
pub fn builtin_validators() -> Vec<(&'static str, Validator)> {
    vec![
        ("required", Rc::new(required) as Validator),
        ("email", Rc::new(email) as Validator),
        ("matches", Rc::new(matches) as Validator),
        ("min_length", Rc::new(min_length) as Validator),
        ("max_length", Rc::new(max_length) as Validator),
        ("numeric", Rc::new(numeric) as Validator),
    ]
}

fn required(value: &str, _: &ValidationHelpers<'_>) -> Result<bool, FormuError> {
    Ok(!value.trim().is_empty())
}

fn email(value: &str, _: &ValidationHelpers<'_>) -> Result<bool, FormuError> {
    let Some((local, domain)) = value.split_once('@') else {
        return Ok(false);
    };
    Ok(!local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.split('.').count() > 1
        && domain.split('.').all(|label| !label.is_empty()))
}

fn matches(value: &str, helpers: &ValidationHelpers<'_>) -> Result<bool, FormuError> {
    Ok(value == helpers.get(helpers.arg(0)?)?)
}

fn min_length(value: &str, helpers: &ValidationHelpers<'_>) -> Result<bool, FormuError> {
    Ok(value.chars().count() >= helpers.parse_arg::<usize>(0)?)
}

fn max_length(value: &str, helpers: &ValidationHelpers<'_>) -> Result<bool, FormuError> {
    Ok(value.chars().count() <= helpers.parse_arg::<usize>(0)?)
}

fn numeric(value: &str, _: &ValidationHelpers<'_>) -> Result<bool, FormuError> {
    Ok(value.trim().parse::<f64>().is_ok_and(f64::is_finite))
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields() -> Vec<FieldState> {
        vec![
            FieldState::new(FormuInput::builder().ref_("pass1").label("Password").value("hunter22").build()),
            FieldState::new(FormuInput::builder().label("Confirm Password").build()),
        ]
    }

    fn make_helpers<'a>(validator: &'a str, args: &'a [String], fields: &'a [FieldState]) -> ValidationHelpers<'a> {
        ValidationHelpers { validator, args, fields }
    }

    #[test]
    fn rule_parsing() {
        let rule = ValidationRule::from("between:2:8");
        assert_eq!(rule.name(), "between");
        assert_eq!(rule.args(), ["2".to_string(), "8".to_string()]);
        assert_eq!(rule.to_string(), "between:2:8");

        let rule = ValidationRule::from("required");
        assert!(rule.args().is_empty());
        assert_eq!(rule.to_string(), "required");

        assert_eq!(ValidationRule::from("matches:"), ValidationRule::new("matches", [""]));
    }

    #[test]
    fn helpers_get() {
        let fields = fields();
        let helpers = make_helpers("matches", &[], &fields);
        assert_eq!(helpers.get("pass1"), Ok("hunter22"));
        assert_eq!(helpers.get("pass2"), Err(FormuError::UnknownRef("pass2".into())));
    }

    #[test]
    fn builtin_required_and_email() -> Result<(), FormuError> {
        let fields = fields();
        let helpers = make_helpers("", &[], &fields);
        assert!(!required("  ", &helpers)?);
        assert!(required("x", &helpers)?);

        assert!(email("ada@example.com", &helpers)?);
        assert!(!email("ada@example", &helpers)?);
        assert!(!email("@example.com", &helpers)?);
        assert!(!email("ada@@example.com", &helpers)?);
        assert!(!email("ada lovelace@example.com", &helpers)?);
        assert!(!email("ada@example..com", &helpers)?);
        Ok(())
    }

    #[test]
    fn builtin_matches() -> Result<(), FormuError> {
        let fields = fields();
        let args = vec!["pass1".to_string()];
        let helpers = make_helpers("matches", &args, &fields);
        assert!(matches("hunter22", &helpers)?);
        assert!(!matches("hunter2", &helpers)?);

        let missing = make_helpers("matches", &[], &fields);
        assert_eq!(
            matches("hunter22", &missing),
            Err(FormuError::invalid_argument("matches", "missing argument 1"))
        );
        Ok(())
    }

    #[test]
    fn builtin_lengths() -> Result<(), FormuError> {
        let fields = fields();
        let args = vec!["3".to_string()];
        let helpers = make_helpers("min_length", &args, &fields);
        assert!(min_length("abc", &helpers)?);
        assert!(!min_length("ab", &helpers)?);
        assert!(max_length("abc", &helpers)?);
        assert!(!max_length("abcd", &helpers)?);

        let args = vec!["three".to_string()];
        let helpers = make_helpers("min_length", &args, &fields);
        assert!(matches!(min_length("abc", &helpers), Err(FormuError::InvalidArgument { .. })));
        Ok(())
    }

    #[test]
    fn builtin_numeric() -> Result<(), FormuError> {
        let fields = fields();
        let helpers = make_helpers("numeric", &[], &fields);
        assert!(numeric("42", &helpers)?);
        assert!(numeric(" -1.5 ", &helpers)?);
        assert!(!numeric("forty-two", &helpers)?);
        for non_finite in ["NaN", "inf", "-infinity", "1e400"] {
            assert!(!numeric(non_finite, &helpers)?, "accepted {non_finite}");
        }
        Ok(())
    }
}
