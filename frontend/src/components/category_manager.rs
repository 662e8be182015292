use web_sys::HtmlInputElement;
use yew::prelude::*;

use shared::Category;

use crate::hooks::use_categories::{CategoriesState, UseCategoriesActions};

#[derive(Properties, PartialEq)]
pub struct CategoryManagerProps {
    pub state: CategoriesState,
    pub actions: UseCategoriesActions,
    pub on_close: Callback<()>,
}

/// Modal for managing categories. Default (backend-provided) categories are
/// listed read-only; user-owned ones can be renamed or deleted.
#[function_component(CategoryManager)]
pub fn category_manager(props: &CategoryManagerProps) -> Html {
    let new_name = use_state(String::new);
    // id of the category currently being renamed, with its draft name
    let renaming = use_state(|| None::<(i64, String)>);

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_new_name_change = {
        let new_name = new_name.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_name.set(input.value());
        })
    };

    let on_create = {
        let new_name = new_name.clone();
        let create = props.actions.create.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = new_name.trim().to_string();
            if !name.is_empty() {
                create.emit(name);
                new_name.set(String::new());
            }
        })
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal category-manager" onclick={on_modal_click}>
                <div class="modal-header">
                    <h2>{"Categories"}</h2>
                    <button class="btn btn-small" onclick={on_close_click}>{"Close"}</button>
                </div>

                {if let Some(error) = &props.state.error {
                    let dismiss = props.actions.dismiss_error.clone();
                    html! {
                        <div class="form-message error">
                            {error}
                            <button
                                class="btn btn-small"
                                onclick={Callback::from(move |_| dismiss.emit(()))}
                            >
                                {"Dismiss"}
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <form class="category-create" onsubmit={on_create}>
                    <input
                        type="text"
                        placeholder="New category name"
                        value={(*new_name).clone()}
                        onchange={on_new_name_change}
                        disabled={props.state.saving}
                    />
                    <button type="submit" class="btn btn-primary" disabled={props.state.saving}>
                        {"Add"}
                    </button>
                </form>

                {if props.state.loading {
                    html! { <div class="list-loading">{"Loading..."}</div> }
                } else {
                    html! {
                        <ul class="category-list">
                            {for props.state.categories.iter().map(|cat| {
                                category_row(cat, &renaming, props)
                            })}
                        </ul>
                    }
                }}
            </div>
        </div>
    }
}

fn category_row(
    cat: &Category,
    renaming: &UseStateHandle<Option<(i64, String)>>,
    props: &CategoryManagerProps,
) -> Html {
    let is_renaming = matches!(&**renaming, Some((id, _)) if *id == cat.id);

    if is_renaming {
        let draft = renaming
            .as_ref()
            .map(|(_, name)| name.clone())
            .unwrap_or_default();

        let on_draft_change = {
            let renaming = renaming.clone();
            let id = cat.id;
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                renaming.set(Some((id, input.value())));
            })
        };

        let on_save = {
            let renaming = renaming.clone();
            let rename = props.actions.rename.clone();
            let id = cat.id;
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                if let Some((_, name)) = &*renaming {
                    let name = name.trim().to_string();
                    if !name.is_empty() {
                        rename.emit((id, name));
                        renaming.set(None);
                    }
                }
            })
        };

        let on_cancel = {
            let renaming = renaming.clone();
            Callback::from(move |_: MouseEvent| renaming.set(None))
        };

        html! {
            <li class="category-row" key={cat.id}>
                <form class="category-rename" onsubmit={on_save}>
                    <input type="text" value={draft} onchange={on_draft_change} />
                    <button type="submit" class="btn btn-small btn-primary">{"Save"}</button>
                    <button type="button" class="btn btn-small" onclick={on_cancel}>
                        {"Cancel"}
                    </button>
                </form>
            </li>
        }
    } else {
        let start_rename = {
            let renaming = renaming.clone();
            let id = cat.id;
            let name = cat.name.clone();
            Callback::from(move |_: MouseEvent| renaming.set(Some((id, name.clone()))))
        };
        let on_delete = {
            let delete = props.actions.delete.clone();
            let id = cat.id;
            Callback::from(move |_: MouseEvent| delete.emit(id))
        };

        html! {
            <li class="category-row" key={cat.id}>
                <span class="category-name">{&cat.name}</span>
                {if cat.is_user_owned() {
                    html! {
                        <span class="category-actions">
                            <button class="btn btn-small" onclick={start_rename}>{"Rename"}</button>
                            <button class="btn btn-small btn-danger" onclick={on_delete}>
                                {"Delete"}
                            </button>
                        </span>
                    }
                } else {
                    html! { <span class="category-default-tag">{"default"}</span> }
                }}
            </li>
        }
    }
}
