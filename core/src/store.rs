use crate::*;
use ::leptos::*;

/// Reactive handle over a [`FormuState`] and the [`Registry`] its fields refer to.
///
/// The handle is `Copy`, so it can be moved into as many event handlers and
/// derived signals as a form needs. Every accessor subscribes the running
/// effect to the form state.
#[derive(Clone, Copy)]
pub struct FormuStore {
    state: RwSignal<FormuState>,
    registry: StoredValue<Registry>,
}

impl Default for FormuStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormuStore {
    /// A store whose registry starts with the builtin validators.
    pub fn new() -> Self {
        Self::with_registry(Registry::with_builtins())
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            state: create_rw_signal(FormuState::default()),
            registry: store_value(registry),
        }
    }

    pub fn load(&self, inputs: impl IntoIterator<Item = FormuInput>) {
        self.state.update(|state| state.load(inputs));
    }

    pub fn set_value(&self, index: usize, value: impl Into<String>) {
        let value = value.into();
        self.state.update(|state| state.set_value(index, value));
    }

    pub fn value(&self, index: usize) -> String {
        self.state
            .with(|state| state.value(index).unwrap_or_default().to_string())
    }

    pub fn value_of(&self, ref_: &str) -> Option<String> {
        self.state.with(|state| state.value_of(ref_).map(str::to_string))
    }

    pub fn fields(&self) -> Vec<FieldState> {
        self.state.with(|state| state.fields().to_vec())
    }

    pub fn generation(&self) -> usize {
        self.state.with(FormuState::generation)
    }

    pub fn errors(&self) -> ErrorMap {
        self.state.with(|state| state.errors().clone())
    }

    pub fn field_errors(&self, label: &str) -> Vec<String> {
        self.state.with(|state| state.field_errors(label).to_vec())
    }

    pub fn submitted(&self) -> bool {
        self.state.with(FormuState::submitted)
    }

    pub fn failure(&self) -> Option<FormuError> {
        self.state.with(|state| state.failure().cloned())
    }

    pub fn values(&self) -> FormuValues {
        self.state.with(FormuState::values)
    }

    pub fn check(&self) -> Result<bool, FormuError> {
        self.registry
            .try_with_value(|registry| self.state.try_update(|state| state.check(registry)))
            .flatten()
            .ok_or(FormuError::StoreDisposed)?
    }

    pub fn submit(&self) -> Result<FormuOutcome, FormuError> {
        let outcome = self
            .registry
            .try_with_value(|registry| self.state.try_update(|state| state.submit(registry)))
            .flatten()
            .ok_or(FormuError::StoreDisposed)??;
        match &outcome {
            FormuOutcome::Success(values) => tracing::info!(fields = values.len(), "form submitted"),
            FormuOutcome::Invalid(errors) => tracing::info!(failed_fields = errors.len(), "form rejected"),
        }
        Ok(outcome)
    }

    /// Registers every validator in `validators`; see [`FormuStore::add_validator`].
    pub fn add_validators<K: Into<String>>(&self, validators: impl IntoIterator<Item = (K, Validator)>) {
        self.registry.update_value(|registry| registry.add_validators(validators));
    }

    /// Registers `validator` under `name`.
    ///
    /// Validators run while the store is being updated, so they must read
    /// other fields through [`ValidationHelpers::get`] rather than through
    /// this store.
    pub fn add_validator<F>(&self, name: impl Into<String>, validator: F)
    where
        F: Fn(&str, &ValidationHelpers<'_>) -> Result<bool, FormuError> + 'static,
    {
        self.registry.update_value(|registry| registry.add_validator(name, validator));
    }

    pub fn add_components<K: Into<String>>(&self, components: impl IntoIterator<Item = (K, CustomComponent)>) {
        self.registry.update_value(|registry| registry.add_components(components));
    }

    pub fn add_component<F>(&self, name: impl Into<String>, component: F)
    where
        F: Fn(FieldProps) -> View + 'static,
    {
        self.registry.update_value(|registry| registry.add_component(name, component));
    }

    pub fn component(&self, name: &str) -> Option<CustomComponent> {
        self.registry.with_value(|registry| registry.component(name).cloned())
    }
}

/// Makes `store` the form store of the current component and its children.
pub fn provide_formu_store(store: FormuStore) {
    provide_context(store);
}

/// The form store provided by an ancestor, or a new one provided here if there is none.
pub fn use_formu_store() -> FormuStore {
    use_context::<FormuStore>().unwrap_or_else(|| {
        let store = FormuStore::new();
        provide_context(store);
        store
    })
}

/// Registers validators on the store in context.
pub fn add_validators<K: Into<String>>(validators: impl IntoIterator<Item = (K, Validator)>) {
    use_formu_store().add_validators(validators);
}

/// Registers custom components on the store in context.
pub fn add_components<K: Into<String>>(components: impl IntoIterator<Item = (K, CustomComponent)>) {
    use_formu_store().add_components(components);
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn passwords() -> Vec<FormuInput> {
        vec![
            FormuInput::builder()
                .ref_("pass1")
                .label("Password")
                .ty("password")
                .validations(&["required"])
                .build(),
            FormuInput::builder()
                .label("Confirm Password")
                .ty("password")
                .validations(&["required", "matches:pass1"])
                .build(),
            FormuInput::builder().label("Submit").ty("submit").build(),
        ]
    }

    #[test]
    fn store_tracks_values_and_checks() -> Result<(), FormuError> {
        let runtime = create_runtime();
        let store = FormuStore::new();
        store.load(passwords());
        assert_eq!(store.generation(), 1);

        store.set_value(0, "hunter22");
        store.set_value(1, "hunter2");
        assert_eq!(store.value_of("pass1").as_deref(), Some("hunter22"));
        assert!(!store.check()?);
        assert_eq!(store.field_errors("Confirm Password"), ["matches".to_string()]);

        store.set_value(1, "hunter22");
        let outcome = store.submit()?;
        assert!(store.submitted());
        assert_eq!(
            outcome,
            FormuOutcome::Success(
                ::indexmap::IndexMap::from([
                    ("Password".to_string(), "hunter22".to_string()),
                    ("Confirm Password".to_string(), "hunter22".to_string()),
                ])
                .into()
            )
        );

        runtime.dispose();
        Ok(())
    }

    #[test]
    fn registered_validators_apply_to_later_checks() -> Result<(), FormuError> {
        let runtime = create_runtime();
        let store = FormuStore::with_registry(Registry::default());
        store.load([FormuInput::builder().label("Code").value("abc").validations(&["upper"]).build()]);
        assert_eq!(store.check(), Err(FormuError::UnknownValidator("upper".into())));
        assert_eq!(store.failure(), Some(FormuError::UnknownValidator("upper".into())));

        store.add_validator("upper", |value: &str, _: &ValidationHelpers<'_>| {
            Ok(value.chars().all(char::is_uppercase))
        });
        assert!(!store.check()?);
        assert_eq!(store.failure(), None);
        store.set_value(0, "ABC");
        assert!(store.check()?);

        runtime.dispose();
        Ok(())
    }

    #[test]
    fn disposed_store_reports_an_error() {
        let runtime = create_runtime();
        let store = FormuStore::new();
        store.load(passwords());
        runtime.dispose();

        assert_eq!(store.check(), Err(FormuError::StoreDisposed));
        assert_eq!(store.submit(), Err(FormuError::StoreDisposed));
    }

    #[test]
    fn effects_rerun_on_value_changes() {
        let runtime = create_runtime();
        let store = FormuStore::new();
        store.load(passwords());

        let seen = create_rw_signal(Vec::<String>::new());
        create_isomorphic_effect(move |_| {
            let value = store.value(0);
            seen.update_untracked(|seen| seen.push(value));
        });
        store.set_value(0, "a");
        store.set_value(0, "ab");

        assert_eq!(seen.get_untracked(), ["".to_string(), "a".to_string(), "ab".to_string()]);
        runtime.dispose();
    }
}
