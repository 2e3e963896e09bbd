//! Integration tests for dataset routes
//!
//! These tests exercise the dataset registry endpoints end to end against
//! a migrated test database.

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use sqlx::PgPool;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::features::datasets::datasets_routes;
    use crate::features::shared::test_helpers::{date, seed_dataset, seed_record};

    /// Helper to create a test router
    fn create_test_router(pool: PgPool) -> Router {
        datasets_routes().with_state(pool)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_list_datasets_empty(pool: PgPool) {
        let app = create_test_router(pool);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["total"], 0);
        assert!(json["datasets"].as_array().unwrap().is_empty());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_list_datasets_with_data(pool: PgPool) {
        seed_dataset(&pool, "sales", &["category", "value"])
            .await
            .unwrap();

        let app = create_test_router(pool);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["datasets"][0]["name"], "sales");
        assert_eq!(json["datasets"][0]["column_names"][0], "category");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_get_dataset_not_found(pool: PgPool) {
        let app = create_test_router(pool);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(&format!("/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("not found"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_get_dataset_with_data(pool: PgPool) {
        let id = seed_dataset(&pool, "sales", &["category", "value"])
            .await
            .unwrap();

        let app = create_test_router(pool);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(&format!("/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["name"], "sales");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_delete_dataset(pool: PgPool) {
        let id = seed_dataset(&pool, "doomed", &["category", "value"])
            .await
            .unwrap();

        let app = create_test_router(pool.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&format!("/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Dataset deleted successfully");

        // A repeat delete is a 404.
        let app = create_test_router(pool);
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&format!("/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_summary_endpoint(pool: PgPool) {
        let id = seed_dataset(&pool, "sales", &["date", "category", "value"])
            .await
            .unwrap();
        seed_record(&pool, id, Some(date(2024, 1, 15)), "A", 100.0)
            .await
            .unwrap();
        seed_record(&pool, id, Some(date(2024, 2, 5)), "B", 200.0)
            .await
            .unwrap();

        let app = create_test_router(pool);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(&format!("/{}/summary", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["total_records"], 2);
        assert_eq!(json["category_count"], 2);
        assert_eq!(json["total_value"], 300.0);
        assert_eq!(json["date_range"]["min"], "2024-01-15");
        assert_eq!(json["date_range"]["max"], "2024-02-05");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_chart_data_endpoint(pool: PgPool) {
        let id = seed_dataset(&pool, "sales", &["date", "category", "value"])
            .await
            .unwrap();
        seed_record(&pool, id, Some(date(2024, 1, 15)), "A", 100.0)
            .await
            .unwrap();
        seed_record(&pool, id, Some(date(2024, 1, 20)), "A", 50.0)
            .await
            .unwrap();

        let app = create_test_router(pool);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(&format!("/{}/chart-data", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["bar_chart"][0]["category"], "A");
        assert_eq!(json["bar_chart"][0]["value"], 150.0);
        assert_eq!(json["line_chart"][0]["date"], "2024-01");
        assert_eq!(json["line_chart"][0]["value"], 150.0);
        assert_eq!(json["pie_chart"], json["bar_chart"]);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_summary_not_found(pool: PgPool) {
        let app = create_test_router(pool);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(&format!("/{}/summary", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
