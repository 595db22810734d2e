//! The form for creating and editing a record.

use maud::{Markup, html};

use crate::{
    endpoints::format_endpoint,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    record::RecordId,
};

use super::Ledger;

/// Where the form sends its data.
#[derive(Debug, Clone, Copy)]
pub(super) enum FormTarget<'a> {
    Create,
    Edit(&'a RecordId),
}

pub(super) fn text_field(name: &str, label: &str, value: &str, placeholder: &str) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                name=(name)
                id=(name)
                type="text"
                placeholder=(placeholder)
                value=(value)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// A select with one option per label. A `selected` value that is not one of
/// the labels is kept as an extra option so the user can see what was stored.
pub(super) fn select_field(name: &str, label: &str, options: &[&str], selected: &str) -> Markup {
    let unknown_selection = !selected.is_empty() && !options.contains(&selected);

    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            select name=(name) id=(name) required class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[selected.is_empty()] { "Select " (label.to_lowercase()) }

                @if unknown_selection {
                    option value=(selected) selected { (selected) }
                }

                @for choice in options {
                    option value=(choice) selected[*choice == selected] { (choice) }
                }
            }
        }
    }
}

/// The form for `draft`, showing `error` above the submit button.
///
/// Error responses are swapped in place of the form, so the user keeps their
/// input.
pub(super) fn record_form<L: Ledger>(
    target: FormTarget<'_>,
    draft: &L::Draft,
    error: Option<&str>,
) -> Markup {
    let (description, amount, date) = L::draft_common(draft);
    let (title, submit_label) = match target {
        FormTarget::Create => (format!("Add {}", L::SINGULAR), "Create"),
        FormTarget::Edit(_) => (format!("Edit {}", L::SINGULAR), "Save"),
    };
    let item_url = match target {
        FormTarget::Edit(id) => id
            .url_segment()
            .map(|segment| format_endpoint(L::ITEM_API, &segment)),
        FormTarget::Create => None,
    };
    let create_url = item_url.is_none().then_some(L::COLLECTION_API);

    html! {
        form
            id="record-form"
            hx-post=[create_url]
            hx-put=[item_url]
            hx-target-error="this"
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-lg font-semibold capitalize" { (title) }

            (text_field("description", "Description", description, "Description"))

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        value=(amount)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (select_field("category", "Category", &L::category_labels(), L::draft_category(draft)))

            (L::extra_field(draft))

            @if let Some(error) = error {
                p class="text-red-500 text-base" { (error) }
            }

            div class="flex gap-4"
            {
                a href=(L::VIEW) class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::{FormTarget, record_form};
    use crate::{
        record::{Earning, EarningDraft, Expense, ExpenseDraft, RecordId},
        test_utils::{
            assert_form_error_message, assert_form_input_with_value, assert_hx_endpoint,
            must_get_form, select_values,
        },
    };

    #[test]
    fn create_form_posts_to_collection() {
        let html = record_form::<Earning>(FormTarget::Create, &EarningDraft::default(), None);
        let document = Html::parse_fragment(&html.into_string());
        let form = must_get_form(&document);

        assert_hx_endpoint(&form, "/api/earnings", "hx-post");
        assert_eq!(form.value().attr("hx-put"), None);
        assert_form_input_with_value(&form, "source", "text", "");
    }

    #[test]
    fn edit_form_puts_to_item_and_keeps_input() {
        let draft = ExpenseDraft {
            description: "Lunch".to_owned(),
            amount: "-3".to_owned(),
            date: "2024-03-02".to_owned(),
            category: "Food".to_owned(),
            payment_method: "Cash".to_owned(),
        };
        let id = RecordId::new("x1");

        let html = record_form::<Expense>(
            FormTarget::Edit(&id),
            &draft,
            Some("The amount cannot be negative"),
        );
        let document = Html::parse_fragment(&html.into_string());
        let form = must_get_form(&document);

        assert_hx_endpoint(&form, "/api/expenses/x1", "hx-put");
        assert_form_input_with_value(&form, "description", "text", "Lunch");
        assert_form_input_with_value(&form, "amount", "number", "-3");
        assert_form_error_message(&form, "The amount cannot be negative");
        assert_eq!(
            select_values(&document, "select#payment_method option[selected]"),
            ["Cash"]
        );
    }

    #[test]
    fn unknown_stored_category_is_kept_selected() {
        let draft = ExpenseDraft {
            category: "Pets".to_owned(),
            ..Default::default()
        };

        let html = record_form::<Expense>(FormTarget::Create, &draft, None);
        let document = Html::parse_fragment(&html.into_string());

        assert_eq!(
            select_values(&document, "select#category option[selected]"),
            ["Pets"]
        );
    }
}
