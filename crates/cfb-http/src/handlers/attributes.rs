use axum::extract::Query;
use serde_json::Value;

use cfb_core::chatfuel::{Map, Message, Response};

use crate::handlers::{reply, Params, Reply};

const DEFAULT_PLAN: &str = "free";

/// POST /set-attributes - stores attributes and tells the user about it.
pub async fn set_attributes(Query(params): Query<Params>) -> Reply {
    let plan = requested_plan(&params);

    let message = Message::create(format!("Your plan is now `{plan}`."))?;
    reply(Response::create(Some(vec![message]))?.user_attributes(plan_attributes(plan)))
}

/// POST /set-attributes-silently - stores attributes without any message.
pub async fn set_attributes_silently(Query(params): Query<Params>) -> Reply {
    reply(Response::new().user_attributes(plan_attributes(requested_plan(&params))))
}

fn requested_plan(params: &Params) -> &str {
    params
        .get("plan")
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PLAN)
}

fn plan_attributes(plan: &str) -> Map {
    let mut attributes = Map::new();
    attributes.insert("plan".into(), Value::from(plan));
    attributes.insert("plan_source".into(), Value::from("json_plugin"));
    attributes
}
