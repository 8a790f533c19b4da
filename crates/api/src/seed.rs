//! Idempotent database seeding.
//!
//! Run via the `civica-seed` binary. Every step upserts or checks before
//! inserting, so re-running against a populated database changes nothing.
//! Roles and the report-type catalog are required for the API to function;
//! the sample users and reports exist for local development.

use civica_core::report_state::{ReportState, ALL_REPORT_STATES};
use civica_core::roles::{ROLE_ADMIN, ROLE_USER};
use civica_db::models::report::CreateReport;
use civica_db::models::role::Role;
use civica_db::models::user::{CreateUser, User};
use civica_db::repositories::{ReportRepo, ReportTypeRepo, RoleRepo, UserRepo};
use civica_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Password for the bootstrap admin account when `SEED_ADMIN_PASSWORD` is not
/// set. Local development only; deployments must override it.
const DEFAULT_ADMIN_PASSWORD: &str = "Password.1";

/// Password shared by the sample citizen accounts.
const SAMPLE_USER_PASSWORD: &str = "Ciudadano.1";

/// The report-type catalog: (name, description).
const REPORT_TYPE_CATALOG: &[(&str, &str)] = &[
    ("Baches", "Baches o hundimientos en la carpeta asfaltica"),
    ("Alumbrado publico", "Luminarias apagadas, intermitentes o danadas"),
    ("Arbol caido", "Arboles o ramas caidas que obstruyen la via"),
    ("Boca de tormenta", "Alcantarillas tapadas, hundidas o sin tapa"),
    ("Basura", "Acumulacion de basura en la via publica"),
    ("Senalizacion vial", "Senales de transito danadas o faltantes"),
    ("Areas verdes", "Parques o camellones sin mantenimiento"),
    ("Contenedores de basura", "Contenedores danados, desbordados o faltantes"),
    ("Abandono de vehiculos", "Vehiculos abandonados en la via publica"),
    ("Falta de mantenimiento", "Espacios publicos deteriorados"),
];

/// Sample citizen accounts: (username, names, surnames, email).
const SAMPLE_USERS: &[(&str, &str, &str, &str)] = &[
    ("mgarcia", "Maria", "Garcia Lopez", "mgarcia@example.com"),
    ("jhernandez", "Jose", "Hernandez Ruiz", "jhernandez@example.com"),
    ("lrodriguez", "Lucia", "Rodriguez Paz", "lrodriguez@example.com"),
];

/// Sample reports created for citizens that have none yet:
/// (type name, title, description, address).
const SAMPLE_REPORTS: &[(&str, &str, &str, &str)] = &[
    (
        "Baches",
        "Bache profundo en avenida principal",
        "Bache de unos 40 cm que ya ha danado varias llantas",
        "Av. Juarez 123, Centro",
    ),
    (
        "Alumbrado publico",
        "Luminaria apagada frente al parque",
        "La luminaria lleva dos semanas sin funcionar",
        "Calle 5 de Mayo esq. Hidalgo",
    ),
    (
        "Basura",
        "Basura acumulada en la esquina",
        "Bolsas de basura sin recolectar desde el fin de semana",
        "Calle Morelos 45, Col. Reforma",
    ),
];

/// Run every seeding step in dependency order.
pub async fn seed_all(pool: &DbPool) -> AppResult<()> {
    let (admin_role, user_role) = seed_roles(pool).await?;
    seed_default_admin(pool, &admin_role, &user_role).await?;
    seed_report_types(pool).await?;
    let users = seed_sample_users(pool, &user_role).await?;
    seed_sample_reports(pool, &users).await?;
    Ok(())
}

/// Upsert the two built-in roles. The migration also inserts them, so this
/// mostly refreshes descriptions.
pub async fn seed_roles(pool: &DbPool) -> AppResult<(Role, Role)> {
    let admin = RoleRepo::upsert(pool, ROLE_ADMIN, Some("Municipal staff")).await?;
    let user = RoleRepo::upsert(pool, ROLE_USER, Some("Registered citizen")).await?;
    tracing::info!("Roles seeded");
    Ok((admin, user))
}

/// Create a bootstrap admin account, but only while no user holds the admin
/// role. An existing deployment keeps whatever admins it already has.
pub async fn seed_default_admin(
    pool: &DbPool,
    admin_role: &Role,
    user_role: &Role,
) -> AppResult<()> {
    if RoleRepo::any_user_has_role(pool, admin_role.id).await? {
        tracing::info!("Admin account already present, skipping");
        return Ok(());
    }

    let password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.into());
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let admin = UserRepo::create(
        pool,
        &CreateUser {
            username: "admin".into(),
            names: "Administrador".into(),
            surnames: "Municipal".into(),
            email: "admin@example.com".into(),
            password_hash,
        },
    )
    .await?;
    RoleRepo::assign_to_user(pool, admin.user_id, admin_role.id).await?;
    RoleRepo::assign_to_user(pool, admin.user_id, user_role.id).await?;

    tracing::info!(user_id = %admin.user_id, "Default admin account created");
    Ok(())
}

/// Upsert the report-type catalog by name.
pub async fn seed_report_types(pool: &DbPool) -> AppResult<()> {
    for (name, description) in REPORT_TYPE_CATALOG {
        ReportTypeRepo::upsert(pool, name, description).await?;
    }
    tracing::info!(count = REPORT_TYPE_CATALOG.len(), "Report types seeded");
    Ok(())
}

/// Insert the sample citizen accounts that do not exist yet.
pub async fn seed_sample_users(pool: &DbPool, user_role: &Role) -> AppResult<Vec<User>> {
    let password_hash = hash_password(SAMPLE_USER_PASSWORD)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let mut users = Vec::with_capacity(SAMPLE_USERS.len());
    for (username, names, surnames, email) in SAMPLE_USERS {
        let user = match UserRepo::find_by_username(pool, username).await? {
            Some(existing) => existing,
            None => {
                let created = UserRepo::create(
                    pool,
                    &CreateUser {
                        username: (*username).into(),
                        names: (*names).into(),
                        surnames: (*surnames).into(),
                        email: (*email).into(),
                        password_hash: password_hash.clone(),
                    },
                )
                .await?;
                RoleRepo::assign_to_user(pool, created.user_id, user_role.id).await?;
                tracing::info!(username, "Sample user created");
                created
            }
        };
        users.push(user);
    }
    Ok(users)
}

/// Create the sample reports for each citizen that has no reports yet,
/// rotating through the lifecycle states so the dashboards have something to
/// show. Citizens with reports are left alone, which is what makes re-running
/// safe.
pub async fn seed_sample_reports(pool: &DbPool, users: &[User]) -> AppResult<()> {
    for user in users {
        if !ReportRepo::list_by_author(pool, user.user_id).await?.is_empty() {
            continue;
        }
        for (index, (type_name, title, description, address)) in
            SAMPLE_REPORTS.iter().enumerate()
        {
            let report_type = ReportTypeRepo::find_by_name(pool, type_name)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError(format!("Seed report type '{type_name}' is missing"))
                })?;
            let report = ReportRepo::create(
                pool,
                user.user_id,
                None,
                &CreateReport {
                    title: (*title).into(),
                    description: (*description).into(),
                    address: (*address).into(),
                    report_type_id: report_type.report_type_id,
                },
            )
            .await?;

            // Reports are created in OPENED; advance the rest of the rotation
            // so every state shows up in the sample data.
            let state = ALL_REPORT_STATES[index % ALL_REPORT_STATES.len()];
            if state != ReportState::Opened {
                ReportRepo::set_state(pool, report.report_id, state.as_str()).await?;
            }
        }
        tracing::info!(username = %user.username, "Sample reports created");
    }
    Ok(())
}
