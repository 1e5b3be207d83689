use crate::*;
use ::indexmap::IndexMap;
use ::leptos::View;
use ::std::rc::Rc;

/// Renders a field in place of the default `<input>`.
pub trait CustomComponentFn: Fn(FieldProps) -> View + 'static {}

impl<F> CustomComponentFn for F where F: Fn(FieldProps) -> View + 'static {}

pub type CustomComponent = Rc<dyn CustomComponentFn>;

/// Named validators and components which field declarations refer to by name.
#[derive(Clone, Default, Derivative)]
#[derivative(Debug)]
pub struct Registry {
    #[derivative(Debug(format_with = "fmt_names"))]
    validators: IndexMap<String, Validator>,
    #[derivative(Debug(format_with = "fmt_names"))]
    components: IndexMap<String, CustomComponent>,
}

fn fmt_names<V>(map: &IndexMap<String, V>, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
    f.debug_list().entries(map.keys()).finish()
}

impl Registry {
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        registry.add_validators(builtin_validators());
        registry
    }

    /// Merges `validators` in, replacing any already registered under the same name.
    pub fn add_validators<K: Into<String>>(&mut self, validators: impl IntoIterator<Item = (K, Validator)>) {
        self.validators
            .extend(validators.into_iter().map(|(name, validator)| (name.into(), validator)));
    }

    pub fn add_validator<F>(&mut self, name: impl Into<String>, validator: F)
    where
        F: Fn(&str, &ValidationHelpers<'_>) -> Result<bool, FormuError> + 'static,
    {
        self.validators.insert(name.into(), Rc::new(validator));
    }

    /// Merges `components` in, replacing any already registered under the same name.
    pub fn add_components<K: Into<String>>(&mut self, components: impl IntoIterator<Item = (K, CustomComponent)>) {
        self.components
            .extend(components.into_iter().map(|(name, component)| (name.into(), component)));
    }

    pub fn add_component<F>(&mut self, name: impl Into<String>, component: F)
    where
        F: Fn(FieldProps) -> View + 'static,
    {
        self.components.insert(name.into(), Rc::new(component));
    }

    pub fn validator(&self, name: &str) -> Option<&Validator> {
        self.validators.get(name)
    }

    pub fn component(&self, name: &str) -> Option<&CustomComponent> {
        self.components.get(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtins_are_registered() {
        let registry = Registry::with_builtins();
        for name in ["required", "email", "matches", "min_length", "max_length", "numeric"] {
            assert!(registry.validator(name).is_some(), "missing builtin {name}");
        }
        assert!(Registry::default().validator("required").is_none());
    }

    #[test]
    fn later_registrations_replace_earlier_ones() -> Result<(), FormuError> {
        let mut registry = Registry::with_builtins();
        registry.add_validator("required", |value: &str, _: &ValidationHelpers<'_>| Ok(value == "yes"));
        let shout: Validator = Rc::new(|value: &str, _: &ValidationHelpers<'_>| -> Result<bool, FormuError> {
            Ok(value.chars().all(|c| !c.is_lowercase()))
        });
        registry.add_validators([("shout", shout)]);

        let helpers = ValidationHelpers {
            validator: "required",
            args: &[],
            fields: &[],
        };
        let required = registry.validator("required").cloned();
        assert_eq!(required.map(|required| required("no", &helpers)).transpose()?, Some(false));
        let shout = registry.validator("shout").cloned();
        assert_eq!(shout.map(|shout| shout("HEY", &helpers)).transpose()?, Some(true));
        Ok(())
    }

    #[test]
    fn debug_lists_names() {
        let mut registry = Registry::default();
        registry.add_validator("required", |value: &str, _: &ValidationHelpers<'_>| Ok(!value.is_empty()));
        assert_eq!(
            format!("{registry:?}"),
            r#"Registry { validators: ["required"], components: [] }"#
        );
    }
}
