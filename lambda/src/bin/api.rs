use apigw_handler::api::{HandlerInput, api_gateway, run};
use apigw_handler::core::config::AppConfig;
use apigw_handler::errors::{HandlerError, StatusError};
use apigw_handler::logging::Logger;
use apigw_handler::validation::{Request, Rules, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GreetBody {
    name: String,
    #[serde(default)]
    shout: bool,
}

#[derive(Debug, Deserialize)]
struct GreetQuery {
    #[serde(default = "default_times")]
    times: u8,
}

fn default_times() -> u8 {
    1
}

#[derive(Debug, Serialize)]
struct Greeting {
    message: String,
    user_id: Option<String>,
    request_id: String,
}

async fn greet(
    input: HandlerInput<Request<Value, GreetBody, GreetQuery>>,
) -> Result<Greeting, HandlerError> {
    let Request { body, query, .. } = input.data;

    if body.name.eq_ignore_ascii_case("nobody") {
        return Err(StatusError::not_found().into());
    }

    let mut message = vec![format!("Hello, {}!", body.name); usize::from(query.times)].join(" ");
    if body.shout {
        message = message.to_uppercase();
    }
    input.logger.info("Greeting built");

    Ok(Greeting {
        message,
        user_id: input.user_id,
        request_id: input.request_id,
    })
}

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let config = AppConfig::from_env()?;
    apigw_handler::setup_logging_with(&config);

    let validator = Validator::new()
        .body(Rules::<GreetBody>::new().check(|b| {
            if b.name.trim().is_empty() {
                Err("name must not be blank".to_string())
            } else {
                Ok(())
            }
        }))
        .query(Rules::<GreetQuery>::new().check(|q| {
            if (1..=5).contains(&q.times) {
                Ok(())
            } else {
                Err("times must be between 1 and 5".to_string())
            }
        }));

    let handler = api_gateway(Logger::new(config.service_name.clone()), validator, greet);
    run(handler).await
}
