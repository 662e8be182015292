use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::{Category, CategoryPayload};

use crate::services::api::{ApiClient, ApiError};
use crate::services::logging::Logger;
use crate::services::session::Session;

const COMPONENT: &str = "use_categories";

#[derive(Clone, PartialEq)]
pub struct CategoriesState {
    pub categories: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
    pub saving: bool,
}

#[derive(Clone, PartialEq)]
pub struct UseCategoriesActions {
    pub refresh: Callback<()>,
    pub create: Callback<String>,
    pub rename: Callback<(i64, String)>,
    pub delete: Callback<i64>,
    pub dismiss_error: Callback<()>,
}

pub struct UseCategoriesResult {
    pub state: CategoriesState,
    pub actions: UseCategoriesActions,
}

/// Category list with CRUD for user-owned entries. Default categories are
/// rejected server-side; the view also renders them read-only.
#[hook]
pub fn use_categories(api_client: &ApiClient, on_unauthorized: Callback<()>) -> UseCategoriesResult {
    let categories = use_state(Vec::<Category>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let refresh = {
        let api_client = api_client.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let error = error.clone();
        let on_unauthorized = on_unauthorized.clone();

        Callback::from(move |_: ()| {
            let api_client = api_client.clone();
            let categories = categories.clone();
            let loading = loading.clone();
            let error = error.clone();
            let on_unauthorized = on_unauthorized.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.list_categories().await {
                    Ok(list) => {
                        categories.set(list);
                        error.set(None);
                    }
                    Err(ApiError::Unauthorized) => {
                        Session::clear();
                        on_unauthorized.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("failed to fetch categories: {e}"),
                        );
                        error.set(Some(e.to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    // Initial load.
    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| refresh.emit(()));
    }

    // create/rename/delete all run the same way: call the endpoint, then
    // refetch the authoritative list on success.
    let mutate = {
        let error = error.clone();
        let saving = saving.clone();
        let refresh = refresh.clone();
        let on_unauthorized = on_unauthorized.clone();

        move |future: std::pin::Pin<
            Box<dyn std::future::Future<Output = Result<(), ApiError>>>,
        >| {
            let error = error.clone();
            let saving = saving.clone();
            let refresh = refresh.clone();
            let on_unauthorized = on_unauthorized.clone();

            spawn_local(async move {
                saving.set(true);
                match future.await {
                    Ok(()) => {
                        error.set(None);
                        refresh.emit(());
                    }
                    Err(ApiError::Unauthorized) => {
                        Session::clear();
                        on_unauthorized.emit(());
                    }
                    Err(e) => {
                        error.set(Some(e.to_string()));
                    }
                }
                saving.set(false);
            });
        }
    };

    let create = {
        let api_client = api_client.clone();
        let mutate = mutate.clone();
        Callback::from(move |name: String| {
            let api_client = api_client.clone();
            mutate(Box::pin(async move {
                api_client
                    .create_category(&CategoryPayload { name })
                    .await
                    .map(|_| ())
            }));
        })
    };

    let rename = {
        let api_client = api_client.clone();
        let mutate = mutate.clone();
        Callback::from(move |(id, name): (i64, String)| {
            let api_client = api_client.clone();
            mutate(Box::pin(async move {
                api_client
                    .update_category(id, &CategoryPayload { name })
                    .await
                    .map(|_| ())
            }));
        })
    };

    let delete = {
        let api_client = api_client.clone();
        let mutate = mutate.clone();
        Callback::from(move |id: i64| {
            let api_client = api_client.clone();
            mutate(Box::pin(async move { api_client.delete_category(id).await }));
        })
    };

    let dismiss_error = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    let state = CategoriesState {
        categories: (*categories).clone(),
        loading: *loading,
        error: (*error).clone(),
        saving: *saving,
    };

    let actions = UseCategoriesActions {
        refresh,
        create,
        rename,
        delete,
        dismiss_error,
    };

    UseCategoriesResult { state, actions }
}
