use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct PendingAuthorization {
    pub secret: String,
    pub verifier: String,
    pub approved: bool,
}

#[derive(Deserialize)]
pub struct AuthorizeQuery {
    pub oauth_token: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApprovalResponse {
    pub oauth_token: String,
    pub oauth_verifier: String,
}

#[derive(Deserialize)]
pub struct AccessTokenRequest {
    pub oauth_token: String,
    pub oauth_verifier: String,
}

#[derive(Deserialize)]
pub struct CreateCard {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub labels: Vec<LabelInput>,
}

#[derive(Deserialize)]
pub struct LabelInput {
    #[serde(default)]
    pub color: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
}

pub type Pending = Arc<RwLock<HashMap<String, PendingAuthorization>>>;

const LABEL_COLORS: [&str; 6] = ["green", "yellow", "orange", "red", "purple", "blue"];

pub fn app() -> Router {
    let pending: Pending = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/1/OAuthGetRequestToken", post(request_token))
        .route("/1/OAuthAuthorizeToken", get(authorize_token))
        .route("/1/OAuthGetAccessToken", post(access_token))
        .route("/1/cards", post(create_card))
        .with_state(pending)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn mint() -> String {
    Uuid::new_v4().simple().to_string()
}

fn form_body(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/x-www-form-urlencoded")],
        body,
    )
        .into_response()
}

async fn request_token(State(pending): State<Pending>) -> Response {
    let token = mint();
    let secret = mint();
    debug!("issued temporary credentials {token}");
    pending.write().await.insert(
        token.clone(),
        PendingAuthorization {
            secret: secret.clone(),
            verifier: mint(),
            approved: false,
        },
    );
    form_body(format!(
        "oauth_token={token}&oauth_token_secret={secret}&oauth_callback_confirmed=true"
    ))
}

async fn authorize_token(
    State(pending): State<Pending>,
    Query(query): Query<AuthorizeQuery>,
) -> Result<Json<ApprovalResponse>, StatusCode> {
    let mut store = pending.write().await;
    let entry = store
        .get_mut(&query.oauth_token)
        .ok_or(StatusCode::NOT_FOUND)?;
    entry.approved = true;
    Ok(Json(ApprovalResponse {
        oauth_token: query.oauth_token,
        oauth_verifier: entry.verifier.clone(),
    }))
}

async fn access_token(
    State(pending): State<Pending>,
    Form(input): Form<AccessTokenRequest>,
) -> Response {
    let mut store = pending.write().await;
    match store.get(&input.oauth_token) {
        Some(entry) if entry.approved && entry.verifier == input.oauth_verifier => {
            store.remove(&input.oauth_token);
            debug!("exchanged {} for token credentials", input.oauth_token);
            form_body(format!(
                "oauth_token={}&oauth_token_secret={}",
                mint(),
                mint()
            ))
        }
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn create_card(Json(input): Json<CreateCard>) -> Response {
    let mut card_errors = Vec::new();
    if input.name.trim().is_empty() {
        card_errors.push(json!({
            "attribute": "name",
            "code": 5001,
            "message": "name must not be blank"
        }));
    }

    let mut label_children = serde_json::Map::new();
    for (i, label) in input.labels.iter().enumerate() {
        if !LABEL_COLORS.contains(&label.color.as_str()) {
            label_children.insert(
                format!("index{i}"),
                json!({
                    "errors": [{
                        "attribute": "color",
                        "code": 5105,
                        "message": "color is not an allowed value"
                    }]
                }),
            );
        }
    }

    if card_errors.is_empty() && label_children.is_empty() {
        let card = Card {
            id: mint(),
            name: input.name,
        };
        return Json(card).into_response();
    }

    debug!("rejected card creation");
    let mut card_node = serde_json::Map::new();
    card_node.insert("errors".to_string(), Value::Array(card_errors));
    if !label_children.is_empty() {
        card_node.insert("labels".to_string(), Value::Object(label_children));
    }
    (StatusCode::BAD_REQUEST, Json(json!({ "card": card_node }))).into_response()
}
