//! Form components

use crate::*;
use ::leptos::*;
use ::std::rc::Rc;

pub trait OnSuccess: Fn(FormuValues) + 'static {}
pub trait OnError: Fn(ErrorMap) + 'static {}

impl<F> OnSuccess for F where F: Fn(FormuValues) + 'static {}
impl<F> OnError for F where F: Fn(ErrorMap) + 'static {}

/// Props provided during render to a custom field component.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct FieldProps {
    pub id: Oco<'static, str>,
    pub label: Oco<'static, str>,
    pub ty: InputType,
    #[derivative(Debug = "ignore")]
    pub value: Signal<String>,
    #[derivative(Debug = "ignore")]
    pub on_change: Rc<dyn Fn(String)>,
}

/// Renders `inputs` as a validated form.
///
/// The inputs are loaded into `store` (or the store in context) when the form
/// is created and again whenever `inputs` changes. Submitting runs every
/// declared validation and hands the collected values to `on_success`, or the
/// errors keyed by label to `on_error`.
#[component]
pub fn Formu(
    #[prop(into)] inputs: MaybeSignal<Vec<FormuInput>>,
    #[prop(optional)] store: Option<FormuStore>,
    #[prop(optional, into)] id: Option<Oco<'static, str>>,
    #[prop(optional, into)] class: Option<Oco<'static, str>>,
    #[prop(optional, into)] field_class: Option<Oco<'static, str>>,
    #[allow(clippy::type_complexity)]
    #[prop(optional)]
    on_success: Option<Rc<dyn OnSuccess>>,
    #[allow(clippy::type_complexity)]
    #[prop(optional)]
    on_error: Option<Rc<dyn OnError>>,
) -> impl IntoView {
    let store = store.unwrap_or_else(use_formu_store);

    create_isomorphic_effect(move |_| store.load(inputs.get()));

    let declared = create_memo(move |_| {
        (
            store.generation(),
            store.fields().into_iter().map(|field| field.input).collect::<Vec<_>>(),
        )
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        dispatch_submit(store, on_success.as_deref(), on_error.as_deref());
    };

    let id_prefix = id.clone();

    view! {
        <form id=id class=class on:submit=on_submit>
            <For
                each=move || {
                    let (generation, inputs) = declared.get();
                    inputs
                        .into_iter()
                        .enumerate()
                        .map(move |(index, input)| (generation, index, input))
                        .collect::<Vec<_>>()
                }
                key=|(generation, index, _): &(usize, usize, FormuInput)| (*generation, *index)
                children=move |(_, index, input)| view! {
                    <FormuField
                        store=store
                        index=index
                        input=input
                        id_prefix=id_prefix.clone()
                        class=field_class.clone()
                    />
                }
            />
        </form>
        <FormuErrors store=store />
        {move || store.failure().map(|failure| view! {
            <div class="formu-failure">{failure.to_string()}</div>
        })}
        {move || store.submitted().then(|| view! {
            <span class="formu-sending">"sending!"</span>
        })}
    }
}

/// Submits `store`, handing the outcome to the matching callback.
fn dispatch_submit(store: FormuStore, on_success: Option<&dyn OnSuccess>, on_error: Option<&dyn OnError>) {
    match store.submit() {
        Ok(FormuOutcome::Success(values)) => {
            if let Some(on_success) = on_success {
                on_success(values);
            }
        }
        Ok(FormuOutcome::Invalid(errors)) => {
            if let Some(on_error) = on_error {
                on_error(errors);
            }
        }
        Err(err) => tracing::error!(%err, "form could not be checked"),
    }
}

/// A single labelled field with its inline errors.
///
/// Renders the custom component named by the input's `component`, falling back
/// to a plain `<input>` bound to the field's value.
#[component]
pub fn FormuField(
    store: FormuStore,
    index: usize,
    input: FormuInput,
    #[prop(optional_no_strip)] id_prefix: Option<Oco<'static, str>>,
    #[prop(optional_no_strip)] class: Option<Oco<'static, str>>,
) -> impl IntoView {
    let id = format_field_id(id_prefix.as_ref(), &input.label);
    let value = Signal::derive(move || store.value(index));
    let on_change: Rc<dyn Fn(String)> = Rc::new(move |value: String| store.set_value(index, value));

    let field = match resolve_component(store, &input) {
        Some(component) => component(FieldProps {
            id: id.clone(),
            label: Oco::Owned(input.label.clone()),
            ty: input.ty.clone(),
            value,
            on_change,
        }),
        None => default_input(id.clone(), &input, value, on_change),
    };

    let label = input.label.clone();
    let errors = move || {
        store
            .field_errors(&label)
            .into_iter()
            .map(|error| view! { <span class="formu-field-error">{error}</span> })
            .collect_view()
    };

    view! {
        <div class=class>
            <label for=id>{input.label}</label>
            {field}
            {errors}
        </div>
    }
}

/// The registered component named by `input`, if it names one that exists.
fn resolve_component(store: FormuStore, input: &FormuInput) -> Option<CustomComponent> {
    let name = input.component.as_deref()?;
    let component = store.component(name);
    if component.is_none() {
        tracing::warn!(component = name, label = %input.label, "component not registered, rendering default input");
    }
    component
}

fn default_input(id: Oco<'static, str>, input: &FormuInput, value: Signal<String>, on_change: Rc<dyn Fn(String)>) -> View {
    let displayed = displayed_value(input, value);
    view! {
        <input
            type=input.ty.to_string()
            id=id.clone()
            name=id
            prop:value=displayed
            on:input=move |ev| on_change(event_target_value(&ev))
        />
    }
    .into_view()
}

/// Value shown by the default input; submit inputs show their label.
fn displayed_value(input: &FormuInput, value: Signal<String>) -> impl Fn() -> String + 'static {
    let submit_label = input.is_submit().then(|| input.label.clone());
    move || submit_label.clone().unwrap_or_else(|| value.get())
}

/// Every label with failed validations, listing the names of the failed rules.
#[component]
pub fn FormuErrors(store: FormuStore, #[prop(optional_no_strip)] class: Option<Oco<'static, str>>) -> impl IntoView {
    view! {
        <ul class=class>
            {move || {
                store
                    .errors()
                    .0
                    .into_iter()
                    .map(|(label, errors)| view! {
                        <li>
                            {label}":"
                            {errors.into_iter().map(|error| view! { <span>{error}</span> }).collect_view()}
                        </li>
                    })
                    .collect_view()
            }}
        </ul>
    }
}
