//! Handlers for reading shopping lists.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use super::validation::ListId;
use crate::{
    auth::{AuthError, RequireSession},
    database::models::ShoppingListWithItems,
    errors::AppError,
    query::{QueryKey, RequestQueryClient},
    state::AppState,
};

pub fn shopping_list_key(id: &ListId) -> QueryKey {
    QueryKey::new(["shopping-list", id.as_str()])
}

/// Returns a list with its items, household and creator. Only members of the
/// list's household may read it.
pub async fn get_list(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    RequestQueryClient(client): RequestQueryClient,
    Path(id): Path<String>,
) -> Result<Json<ShoppingListWithItems>, AppError> {
    let id = ListId::parse(id)?;

    let database = &state.database;
    let list_id = id.as_str();

    let list = client
        .fetch_query(shopping_list_key(&id), move || async move {
            database
                .shopping_list_with_items(list_id)
                .ok_or(AppError::NotFound("shopping list"))
        })
        .await?;

    if !database.is_household_member(&list.list.household_id, &session.user.id) {
        return Err(AuthError::Forbidden.into());
    }

    debug!(list_id = list_id, user_id = %session.user.id, "serving shopping list");
    Ok(Json(list))
}
