use lambda_http::{Body, Error, Request, RequestExt, Response};
use tracing::{error, info, warn};

use crate::config::Routing;
use crate::error::CrudError;
use crate::item::Item;
use crate::store::ItemStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

fn route(routing: Routing, event: &Request) -> Option<Operation> {
    match routing {
        Routing::Method => match event.method().as_str() {
            "POST" => Some(Operation::Create),
            "GET" => Some(Operation::Read),
            "PUT" => Some(Operation::Update),
            "DELETE" => Some(Operation::Delete),
            _ => None,
        },
        Routing::Path => match request_path(event).trim_end_matches('/') {
            "/create" => Some(Operation::Create),
            "/read" => Some(Operation::Read),
            "/update" => Some(Operation::Update),
            "/delete" => Some(Operation::Delete),
            _ => None,
        },
    }
}

/// Path as the client sent it. The URI carries the gateway stage in front.
fn request_path(event: &Request) -> &str {
    match event.raw_http_path() {
        "" => event.uri().path(),
        raw => raw,
    }
}

fn query_id(event: &Request) -> Result<String, CrudError> {
    match event.query_string_parameters_ref().and_then(|q| q.first("id")) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(CrudError::MissingIdParameter),
    }
}

fn body_item(event: &Request) -> Result<Item, CrudError> {
    let item: Item = serde_json::from_slice(event.body().as_ref())?;
    if item.id.is_empty() {
        return Err(CrudError::MissingIdField);
    }
    item.check_numbers()?;
    Ok(item)
}

fn text(status: u16, message: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .body(Body::Text(message))?)
}

fn error_response(op: Operation, err: CrudError) -> Result<Response<Body>, Error> {
    let status = err.status();
    if status.is_server_error() {
        error!(operation = ?op, error = %err, "table operation failed");
    } else {
        warn!(operation = ?op, status = status.as_u16(), "{}", err);
    }
    Ok(Response::builder()
        .status(status)
        .body(Body::Text(err.body()))?)
}

async fn create(store: &dyn ItemStore, event: &Request) -> Result<Response<Body>, CrudError> {
    let item = body_item(event)?;
    store.put(&item).await?;
    info!(id = %item.id, "created item");
    text_ok(format!("Successfully created item with ID: {}", item.id))
}

async fn read(store: &dyn ItemStore, event: &Request) -> Result<Response<Body>, CrudError> {
    let id = query_id(event)?;
    let item = store.get(&id).await?.ok_or(CrudError::NotFound)?;
    let body = serde_json::to_string(&item).map_err(|e| CrudError::Codec(e.to_string()))?;
    info!(id = %id, "read item");
    Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .body(Body::Text(body))
        .map_err(|e| CrudError::Codec(e.to_string()))
}

async fn update(store: &dyn ItemStore, event: &Request) -> Result<Response<Body>, CrudError> {
    let item = body_item(event)?;
    store.put(&item).await?;
    info!(id = %item.id, "updated item");
    text_ok(format!("Successfully updated item with ID: {}", item.id))
}

async fn delete(store: &dyn ItemStore, event: &Request) -> Result<Response<Body>, CrudError> {
    let id = query_id(event)?;
    store.delete(&id).await?;
    info!(id = %id, "deleted item");
    text_ok(format!("Successfully deleted item with ID: {}", id))
}

fn text_ok(message: String) -> Result<Response<Body>, CrudError> {
    Response::builder()
        .status(200)
        .body(Body::Text(message))
        .map_err(|e| CrudError::Codec(e.to_string()))
}

pub(crate) async fn function_handler(
    store: &dyn ItemStore,
    routing: Routing,
    event: Request,
) -> Result<Response<Body>, Error> {
    let op = match route(routing, &event) {
        Some(op) => op,
        None => {
            warn!(method = %event.method(), path = request_path(&event), "no route");
            return text(404, "Not Found".to_string());
        }
    };

    let result = match op {
        Operation::Create => create(store, &event).await,
        Operation::Read => read(store, &event).await,
        Operation::Update => update(store, &event).await,
        Operation::Delete => delete(store, &event).await,
    };

    match result {
        Ok(response) => Ok(response),
        Err(err) => error_response(op, err),
    }
}
