//! App Router

use std::{sync::Arc, time::Duration};

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    timeout::Timeout,
    trailing_slash::remove_slash,
};

use crate::{carts, healthcheck, observability, state::State};

const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// Cart routes, without middleware.
pub(crate) fn carts_router() -> Router {
    Router::with_path("carts").post(carts::create::handler).push(
        Router::with_path("{cart}")
            .get(carts::get::handler)
            .push(Router::with_path("price").get(carts::price::handler))
            .push(
                Router::with_path("items")
                    .post(carts::items::create::handler)
                    .push(Router::with_path("{item}").delete(carts::items::delete::handler)),
            ),
    )
}

/// The full service router: middleware, API routes, metrics and docs.
pub(crate) fn app_router(state: Arc<State>, request_timeout: Duration) -> Router {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(carts_router().hoop(Timeout::new(request_timeout)));

    let doc = OpenApi::new("Cartly API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    router
        .push(doc.into_router(OPENAPI_PATH))
        .push(SwaggerUi::new(OPENAPI_PATH).into_router("docs"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use cartly_app::domain::carts::MockCartsService;

    use crate::test_helpers::state_with_carts;

    use super::*;

    fn service(carts: MockCartsService) -> Service {
        Service::new(app_router(
            state_with_carts(carts),
            Duration::from_secs(3),
        ))
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().never();

        let res = TestClient::get("http://example.com/carts/abc")
            .send(&service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(
            res.headers().contains_key("x-request-id"),
            "expected x-request-id header"
        );
    }

    #[tokio::test]
    async fn openapi_document_lists_cart_routes() -> TestResult {
        let mut res = TestClient::get(format!("http://example.com{OPENAPI_PATH}"))
            .send(&service(MockCartsService::new()))
            .await;

        let body = res.take_string().await?;

        for path in [
            "/carts",
            "/carts/{cart}",
            "/carts/{cart}/price",
            "/carts/{cart}/items",
            "/carts/{cart}/items/{item}",
        ] {
            assert!(
                body.contains(&format!("\"{path}\"")),
                "expected {path} in openapi document"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let res = TestClient::get("http://example.com/orders")
            .send(&service(MockCartsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
