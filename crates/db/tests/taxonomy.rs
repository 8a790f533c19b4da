//! Integration tests for the report-type repository: uniqueness, upsert
//! idempotence, the referenced-type delete guard, and the most-reported
//! aggregate.

use civica_db::models::report::CreateReport;
use civica_db::models::report_type::{CreateReportType, UpdateReportType};
use civica_db::models::user::CreateUser;
use civica_db::repositories::{ReportRepo, ReportTypeRepo, UserRepo};
use sqlx::PgPool;
use uuid::Uuid;

async fn create_user(pool: &PgPool, username: &str) -> Uuid {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            names: "Test".to_string(),
            surnames: "Citizen".to_string(),
            email: format!("{username}@test.com"),
            password_hash: "$argon2id$fake$hash".to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
    .user_id
}

async fn file_report(pool: &PgPool, user_id: Uuid, type_id: Uuid) {
    ReportRepo::create(
        pool,
        user_id,
        None,
        &CreateReport {
            title: "Reporte".to_string(),
            description: "Detalle".to_string(),
            address: "Calle Falsa 123".to_string(),
            report_type_id: type_id,
        },
    )
    .await
    .expect("report creation should succeed");
}

#[sqlx::test]
async fn test_duplicate_name_violates_unique_constraint(pool: PgPool) {
    let input = CreateReportType {
        name: "Baches".to_string(),
        description: "Baches en la via publica".to_string(),
    };
    ReportTypeRepo::create(&pool, &input).await.unwrap();

    let err = ReportTypeRepo::create(&pool, &input)
        .await
        .expect_err("duplicate name must fail");
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_report_types_name"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_upsert_same_name_twice_yields_one_row(pool: PgPool) {
    let first = ReportTypeRepo::upsert(&pool, "Basura", "Basura en lugar incorrecto")
        .await
        .unwrap();
    let second = ReportTypeRepo::upsert(&pool, "Basura", "Residuos fuera de lugar")
        .await
        .unwrap();

    assert_eq!(first.report_type_id, second.report_type_id);
    assert_eq!(second.description, "Residuos fuera de lugar");

    let all = ReportTypeRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test]
async fn test_update_merges_partial_fields(pool: PgPool) {
    let rtype = ReportTypeRepo::create(
        &pool,
        &CreateReportType {
            name: "Arbolado".to_string(),
            description: "Arboles caidos".to_string(),
        },
    )
    .await
    .unwrap();

    let updated = ReportTypeRepo::update(
        &pool,
        rtype.report_type_id,
        &UpdateReportType {
            name: None,
            description: Some("Arboles caidos o peligrosos".to_string()),
        },
    )
    .await
    .unwrap()
    .expect("type should be found");

    assert_eq!(updated.name, "Arbolado");
    assert_eq!(updated.description, "Arboles caidos o peligrosos");

    let missing = ReportTypeRepo::update(
        &pool,
        Uuid::new_v4(),
        &UpdateReportType {
            name: Some("Nope".to_string()),
            description: None,
        },
    )
    .await
    .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_count_reports_includes_soft_deleted_reports(pool: PgPool) {
    let user = create_user(&pool, "counter").await;
    let rtype = ReportTypeRepo::upsert(&pool, "Baches", "Baches").await.unwrap();

    file_report(&pool, user, rtype.report_type_id).await;
    file_report(&pool, user, rtype.report_type_id).await;

    // Soft-delete one report; it still pins the type.
    let reports = ReportRepo::list_by_author(&pool, user).await.unwrap();
    ReportRepo::soft_delete_owned(&pool, reports[0].report_id, user)
        .await
        .unwrap();

    let count = ReportTypeRepo::count_reports(&pool, rtype.report_type_id)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[sqlx::test]
async fn test_soft_delete_marks_row_and_hides_it(pool: PgPool) {
    let rtype = ReportTypeRepo::upsert(&pool, "Plazas", "Plazas descuidadas")
        .await
        .unwrap();

    assert!(ReportTypeRepo::soft_delete(&pool, rtype.report_type_id).await.unwrap());
    assert!(ReportTypeRepo::find_by_id(&pool, rtype.report_type_id)
        .await
        .unwrap()
        .is_none());
    // Second call matches nothing.
    assert!(!ReportTypeRepo::soft_delete(&pool, rtype.report_type_id).await.unwrap());
}

#[sqlx::test]
async fn test_most_reported_orders_by_count_desc(pool: PgPool) {
    let user = create_user(&pool, "ranker").await;
    let baches = ReportTypeRepo::upsert(&pool, "Baches", "Baches").await.unwrap();
    let basura = ReportTypeRepo::upsert(&pool, "Basura", "Basura").await.unwrap();
    ReportTypeRepo::upsert(&pool, "Plazas", "Plazas").await.unwrap();

    for _ in 0..3 {
        file_report(&pool, user, baches.report_type_id).await;
    }
    file_report(&pool, user, basura.report_type_id).await;

    let ranking = ReportTypeRepo::most_reported(&pool).await.unwrap();
    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking[0].type_name, "Baches");
    assert_eq!(ranking[0].reports, 3);
    assert_eq!(ranking[1].type_name, "Basura");
    assert_eq!(ranking[1].reports, 1);
    assert_eq!(ranking[2].reports, 0, "unreferenced types still appear with zero");
}
