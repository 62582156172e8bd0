use crate::api::{PushRequest, PushResponse};
use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, web};
use common::{PlatformRegistry, PushResult};
use feishu_group_bot::FeishuPlatformFactory;
use log::*;

mod api;

const DEFAULT_ADDR: &str = "127.0.0.1:8888";

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[post("/push")]
async fn push(req: web::Json<PushRequest>, registry: web::Data<PlatformRegistry>) -> HttpResponse {
    let req = req.into_inner();
    info!("Received push request for platform: {}", req.platform);

    let Some(factory) = registry.get_factory(&req.platform) else {
        return HttpResponse::BadRequest().json(PushResponse::rejected(format!(
            "Platform '{}' not found",
            req.platform
        )));
    };

    let platform = match factory.create(req.config) {
        Ok(p) => p,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(PushResponse::rejected(format!("Failed to create platform: {e}")));
        }
    };

    let outcome = platform.send_raw(req.message).await;
    HttpResponse::Ok().json(PushResponse {
        result: PushResult::from_outcome(&outcome),
    })
}

fn build_registry() -> PlatformRegistry {
    let mut registry = PlatformRegistry::new();
    registry.register(Box::new(FeishuPlatformFactory));
    registry
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));

    let registry = build_registry();
    info!("Registered platforms: {:?}", registry.list_platforms());

    let registry_data = web::Data::new(registry);
    let addr = std::env::var("PUSH_SERVER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    info!("Listening on {addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(registry_data.clone())
            .service(health)
            .service(push)
    })
    .bind(addr)?
    .run()
    .await
}
