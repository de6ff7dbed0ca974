//! Form state shared by the field components.
//!
//! A form is a set of string values keyed by a field enum. The state keeps
//! the values, which fields the user has visited and the current error for
//! each field. Components receive a [`FieldHandle`] for the field they
//! render, built from the reducer handle owned by the page.

use payloads::{
    ClientError,
    requests::{CommunityDraft, DraftField, InviteDraft, InviteField},
};
use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::rc::Rc;
use yew::prelude::*;

/// Values edited through a [`FormState`].
pub trait FormValues: Clone + PartialEq + Default + 'static {
    type Field: Copy + Ord + Debug + 'static;

    fn fields() -> &'static [Self::Field];

    fn get(&self, field: Self::Field) -> &str;

    fn set(&mut self, field: Self::Field, value: String);

    /// Client side validation of every field at once.
    fn validate(&self) -> BTreeMap<Self::Field, String>;

    /// Map a field name sent by the server back to a field.
    fn field_from_name(name: &str) -> Option<Self::Field>;
}

impl FormValues for CommunityDraft {
    type Field = DraftField;

    fn fields() -> &'static [DraftField] {
        &DraftField::ALL
    }

    fn get(&self, field: DraftField) -> &str {
        CommunityDraft::get(self, field)
    }

    fn set(&mut self, field: DraftField, value: String) {
        CommunityDraft::set(self, field, value)
    }

    fn validate(&self) -> BTreeMap<DraftField, String> {
        CommunityDraft::validate(self)
            .into_iter()
            .map(|(field, error)| (field, error.to_string()))
            .collect()
    }

    fn field_from_name(name: &str) -> Option<DraftField> {
        DraftField::from_name(name)
    }
}

impl FormValues for InviteDraft {
    type Field = InviteField;

    fn fields() -> &'static [InviteField] {
        &InviteField::ALL
    }

    fn get(&self, field: InviteField) -> &str {
        InviteDraft::get(self, field)
    }

    fn set(&mut self, field: InviteField, value: String) {
        InviteDraft::set(self, field, value)
    }

    fn validate(&self) -> BTreeMap<InviteField, String> {
        InviteDraft::validate(self)
            .into_iter()
            .map(|(field, error)| (field, error.to_string()))
            .collect()
    }

    fn field_from_name(name: &str) -> Option<InviteField> {
        InviteField::from_name(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<V: FormValues> {
    values: V,
    touched: BTreeSet<V::Field>,
    errors: BTreeMap<V::Field, String>,
}

impl<V: FormValues> Default for FormState<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V: FormValues> FormState<V> {
    pub fn new(values: V) -> Self {
        let errors = values.validate();
        Self {
            values,
            touched: BTreeSet::new(),
            errors,
        }
    }

    /// Update one value and revalidate the whole form. Errors the server
    /// reported earlier are dropped.
    pub fn set_value(&mut self, field: V::Field, value: String) {
        self.values.set(field, value);
        self.errors = self.values.validate();
    }

    pub fn touch(&mut self, field: V::Field) {
        self.touched.insert(field);
    }

    pub fn touch_all(&mut self) {
        self.touched.extend(V::fields().iter().copied());
    }

    /// Attach an error reported by the server. The field counts as touched
    /// so the message is shown straight away.
    pub fn set_server_error(&mut self, field: V::Field, message: String) {
        self.touched.insert(field);
        self.errors.insert(field, message);
    }

    pub fn value(&self, field: V::Field) -> &str {
        self.values.get(field)
    }

    /// The error to show under a field: only once it has been touched.
    pub fn visible_error(&self, field: V::Field) -> Option<&str> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn values(&self) -> &V {
        &self.values
    }
}

pub enum FormAction<F> {
    SetValue(F, String),
    Touch(F),
    TouchAll,
    ServerErrors(Vec<(F, String)>),
    /// Back to the default values with nothing touched.
    Reset,
}

impl<V: FormValues> Reducible for FormState<V> {
    type Action = FormAction<V::Field>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = (*self).clone();
        match action {
            FormAction::SetValue(field, value) => state.set_value(field, value),
            FormAction::Touch(field) => state.touch(field),
            FormAction::TouchAll => state.touch_all(),
            FormAction::ServerErrors(errors) => {
                for (field, message) in errors {
                    state.set_server_error(field, message);
                }
            }
            FormAction::Reset => state = Self::default(),
        }
        state.into()
    }
}

/// Everything a field component needs to render and edit one field.
#[derive(Clone, PartialEq)]
pub struct FieldHandle {
    pub name: AttrValue,
    pub value: AttrValue,
    pub error: Option<AttrValue>,
    pub on_change: Callback<String>,
    pub on_blur: Callback<()>,
}

impl FieldHandle {
    pub fn new<V: FormValues>(
        form: &UseReducerHandle<FormState<V>>,
        field: V::Field,
        name: &'static str,
    ) -> Self {
        let on_change = {
            let form = form.clone();
            Callback::from(move |value: String| {
                form.dispatch(FormAction::SetValue(field, value))
            })
        };
        let on_blur = {
            let form = form.clone();
            Callback::from(move |_| form.dispatch(FormAction::Touch(field)))
        };
        Self {
            name: name.into(),
            value: form.value(field).to_string().into(),
            error: form
                .visible_error(field)
                .map(|error| AttrValue::from(error.to_string())),
            on_change,
            on_blur,
        }
    }
}

/// Blocks a second submission while one is in flight.
///
/// The flag is shared between clones and flips synchronously, so a click
/// handled before the next render still sees it.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard(Rc<Cell<bool>>);

impl SubmitGuard {
    /// Returns false if a submission is already running.
    pub fn try_begin(&self) -> bool {
        !self.0.replace(true)
    }

    pub fn finish(&self) {
        self.0.set(false);
    }
}

/// Where a failed submission's errors end up.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitFailure<F> {
    /// Errors attached to individual fields.
    Fields(Vec<(F, String)>),
    /// A single message for the page level error slot.
    Page(String),
}

/// Sort a failed submission into field errors or a page message.
///
/// Field errors the form has no field for are logged and skipped. When none
/// of the reported fields are known, the page message is used instead.
pub fn submit_failure<V: FormValues>(
    error: &ClientError,
) -> SubmitFailure<V::Field> {
    let text = match error {
        ClientError::APIError(_, text) => text,
        ClientError::Network(_) => {
            return SubmitFailure::Page(error.to_string());
        }
    };
    let Some(body) = error.error_body() else {
        return SubmitFailure::Page(text.clone());
    };

    let mut fields = Vec::new();
    for field_error in body.errors {
        match V::field_from_name(&field_error.field) {
            Some(field) => fields.push((field, field_error.message)),
            None => tracing::warn!(
                "Ignoring error for unknown field {}: {}",
                field_error.field,
                field_error.message
            ),
        }
    }
    if !fields.is_empty() {
        return SubmitFailure::Fields(fields);
    }
    SubmitFailure::Page(body.message.unwrap_or_else(|| text.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    type DraftForm = FormState<CommunityDraft>;

    fn filled() -> DraftForm {
        let mut form = DraftForm::default();
        form.set_value(DraftField::Id, "biosyslit".into());
        form.set_value(DraftField::Title, "BLR".into());
        form.set_value(DraftField::Description, "d".into());
        form
    }

    #[test]
    fn defaults_are_invalid_until_required_fields_are_filled() {
        let form = DraftForm::default();
        assert_eq!(form.value(DraftField::Type), "event");
        assert_eq!(form.value(DraftField::Visibility), "public");
        assert!(!form.is_valid());

        assert!(filled().is_valid());
    }

    #[test]
    fn errors_show_only_after_touch() {
        let mut form = DraftForm::default();
        assert_eq!(form.visible_error(DraftField::Title), None);

        form.touch(DraftField::Title);
        assert_eq!(form.visible_error(DraftField::Title), Some("Required"));
        assert_eq!(form.visible_error(DraftField::Id), None);

        form.touch_all();
        assert_eq!(form.visible_error(DraftField::Id), Some("Required"));
        assert_eq!(form.visible_error(DraftField::Website), None);
    }

    #[test]
    fn set_value_revalidates() {
        let mut form = filled();
        form.touch_all();
        form.set_value(DraftField::Title, "T".repeat(121));
        assert_eq!(
            form.visible_error(DraftField::Title),
            Some("Must be 120 characters or less")
        );
        assert!(!form.is_valid());

        form.set_value(DraftField::Website, "nope".into());
        assert_eq!(
            form.visible_error(DraftField::Website),
            Some("Must be a valid URL")
        );

        form.set_value(DraftField::Title, "BLR".into());
        form.set_value(DraftField::Website, String::new());
        assert!(form.is_valid());
    }

    #[test]
    fn server_error_is_visible_until_the_field_changes() {
        let mut form = filled();
        form.set_server_error(DraftField::Id, "taken".into());
        assert_eq!(form.visible_error(DraftField::Id), Some("taken"));
        assert!(!form.is_valid());

        form.set_value(DraftField::Id, "biosyslit2".into());
        assert_eq!(form.visible_error(DraftField::Id), None);
        assert!(form.is_valid());
    }

    #[test]
    fn empty_website_is_left_out_of_the_request() {
        let form = filled();
        let request = form.values().to_request().expect("valid draft");
        let body = serde_json::to_value(&request).expect("serializes");
        assert!(body.get("website").is_none());
        assert_eq!(body["type"], "event");
    }

    #[test]
    fn field_errors_go_to_fields() {
        let error = ClientError::APIError(
            StatusCode::BAD_REQUEST,
            r#"{"errors":[{"field":"id","message":"taken"},
                          {"field":"owner","message":"nope"}]}"#
                .into(),
        );
        assert_eq!(
            submit_failure::<CommunityDraft>(&error),
            SubmitFailure::Fields(vec![(DraftField::Id, "taken".into())])
        );
    }

    #[test]
    fn general_message_goes_to_the_page() {
        let error = ClientError::APIError(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"Something went wrong"}"#.into(),
        );
        assert_eq!(
            submit_failure::<CommunityDraft>(&error),
            SubmitFailure::Page("Something went wrong".into())
        );

        let error = ClientError::APIError(
            StatusCode::BAD_GATEWAY,
            "upstream unavailable".into(),
        );
        assert_eq!(
            submit_failure::<CommunityDraft>(&error),
            SubmitFailure::Page("upstream unavailable".into())
        );
    }

    #[test]
    fn second_submit_is_refused_until_the_first_finishes() {
        let guard = SubmitGuard::default();
        let from_a_stale_render = guard.clone();

        assert!(guard.try_begin());
        assert!(!from_a_stale_render.try_begin());

        guard.finish();
        assert!(from_a_stale_render.try_begin());
    }

    #[test]
    fn invite_errors_map_to_invite_fields() {
        let error = ClientError::APIError(
            StatusCode::BAD_REQUEST,
            r#"{"errors":[{"field":"email","message":"Must be a valid email address"}]}"#
                .into(),
        );
        assert_eq!(
            submit_failure::<InviteDraft>(&error),
            SubmitFailure::Fields(vec![(
                InviteField::Email,
                "Must be a valid email address".into()
            )])
        );

        let mut form = FormState::<InviteDraft>::default();
        assert_eq!(form.value(InviteField::Role), "curator");
        form.set_value(InviteField::Email, "dave@example.org".into());
        assert!(form.is_valid());

        let form = Rc::new(form).reduce(FormAction::Reset);
        assert_eq!(form.value(InviteField::Email), "");
        assert_eq!(form.visible_error(InviteField::Email), None);
        assert!(!form.is_valid());
    }

    #[test]
    fn reducer_applies_server_errors() {
        let form = Rc::new(filled());
        let form = form.reduce(FormAction::ServerErrors(vec![(
            DraftField::Id,
            "taken".into(),
        )]));
        assert_eq!(form.visible_error(DraftField::Id), Some("taken"));
        assert_eq!(form.visible_error(DraftField::Title), None);
    }
}
