//! Product operations and the dispatcher that selects between them.

use catalog_core::event::{success, Envelope, Outcome, Route, RouteRequest};
use catalog_core::item::Item;
use catalog_core::update::UpdateExpression;

use crate::state::AppState;

use super::failure_response;

/// Handles one invocation end to end.
///
/// Never fails: every error is rendered as the failure envelope.
pub async fn handle_request(state: &AppState, request: RouteRequest) -> Envelope {
    tracing::info!(
        method = request.method(),
        path = request.path.as_deref().unwrap_or_default(),
        resource = request.resource.as_deref().unwrap_or_default(),
        "Handling request"
    );

    match dispatch(state, &request).await {
        Ok(outcome) => success(request.method(), outcome, &state.options),
        Err(err) => failure_response(&err, &state.options),
    }
}

/// Selects the route for `request` and runs exactly one operation.
pub async fn dispatch(state: &AppState, request: &RouteRequest) -> anyhow::Result<Outcome> {
    let route = Route::from_request(request)?;
    tracing::debug!(operation = route.operation(), "Dispatching");

    match route {
        Route::GetItem { id } => get_by_id(state, &id).await,
        Route::ScanItems => scan_all(state).await,
        Route::QueryByCategory { id, category } => {
            query_by_id_and_category(state, &id, &category).await
        }
        Route::CreateItem { body } => create(state, &body).await,
        Route::DeleteItem { id } => delete_by_id(state, &id).await,
        Route::UpdateItem { id, body } => update_by_id(state, &id, &body).await,
    }
}

async fn get_by_id(state: &AppState, id: &str) -> anyhow::Result<Outcome> {
    tracing::debug!(id = %id, "Getting product");
    let item = state.repo.get_item(id).await?;
    Ok(Outcome::Item(item))
}

async fn scan_all(state: &AppState) -> anyhow::Result<Outcome> {
    let items = state.repo.scan_items().await?;
    tracing::debug!(count = items.len(), "Scanned products");
    Ok(Outcome::Scan(items))
}

async fn query_by_id_and_category(
    state: &AppState,
    id: &str,
    category: &str,
) -> anyhow::Result<Outcome> {
    tracing::debug!(id = %id, category = %category, "Querying products");
    let items = state.repo.query_by_category(id, category).await?;
    Ok(Outcome::Query(items))
}

async fn create(state: &AppState, body: &str) -> anyhow::Result<Outcome> {
    let mut item = Item::from_body(body)?;
    let id = item.assign_new_id();
    tracing::debug!(id = %id, "Creating product");

    let ack = state.repo.put_item(&item).await?;
    Ok(Outcome::Write(ack))
}

async fn delete_by_id(state: &AppState, id: &str) -> anyhow::Result<Outcome> {
    tracing::debug!(id = %id, "Deleting product");
    let ack = state.repo.delete_item(id).await?;
    Ok(Outcome::Write(ack))
}

async fn update_by_id(state: &AppState, id: &str, body: &str) -> anyhow::Result<Outcome> {
    let changes = Item::from_body(body)?;
    let update = UpdateExpression::from_changes(&changes)?;
    tracing::debug!(id = %id, expression = update.expression(), "Updating product");

    let ack = state.repo.update_item(id, &update).await?;
    Ok(Outcome::Write(ack))
}
