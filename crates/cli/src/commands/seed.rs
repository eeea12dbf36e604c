//! Seed the default service catalog.
//!
//! Inserts the shop's standard alteration services. Idempotent: existing
//! names are left untouched, so local price or description edits survive a
//! re-seed.

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// The default catalog: (name, description, base price in RM).
const DEFAULT_SERVICES: &[(&str, &str, Option<Decimal>)] = &[
    (
        "Hem Pants/Skirt",
        "Shorten or adjust the hem of pants or a skirt",
        Some(Decimal::from_parts(15, 0, 0, false, 0)),
    ),
    (
        "Taper/Let Out",
        "Take in or let out the fit",
        Some(Decimal::from_parts(25, 0, 0, false, 0)),
    ),
    (
        "Shorten/Lengthen Sleeves",
        "Adjust sleeve length on shirts or jackets",
        Some(Decimal::from_parts(20, 0, 0, false, 0)),
    ),
    (
        "Adjust Waist",
        "Take in or let out the waistband",
        Some(Decimal::from_parts(25, 0, 0, false, 0)),
    ),
    (
        "Replace Zipper",
        "Replace a broken or stuck zipper",
        Some(Decimal::from_parts(20, 0, 0, false, 0)),
    ),
    (
        "Fix Tear/Hole",
        "Repair a tear, hole or loose seam",
        Some(Decimal::from_parts(10, 0, 0, false, 0)),
    ),
    (
        "Adjust Shoulders",
        "Adjust the shoulder fit on jackets or shirts",
        Some(Decimal::from_parts(35, 0, 0, false, 0)),
    ),
    ("Other Repairs", "Anything else - describe it in the order", None),
];

/// Insert the default services, skipping names that already exist.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or an insert fails.
pub async fn services() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let mut inserted = 0_u64;
    for (name, description, base_price) in DEFAULT_SERVICES {
        let result = sqlx::query(
            "INSERT INTO tailor.services (name, description, base_price) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(*name)
        .bind(*description)
        .bind(*base_price)
        .execute(&pool)
        .await?;
        inserted += result.rows_affected();
    }

    info!(
        inserted,
        skipped = DEFAULT_SERVICES.len() as u64 - inserted,
        "Service catalog seeded"
    );
    Ok(())
}
