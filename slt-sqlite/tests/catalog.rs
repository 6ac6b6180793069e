use rstest::*;
use slt_core::{
    models::{ProductData, ProductRecord},
    ports::CatalogRepository as _,
};
use slt_sqlite::{Db, config::SqliteConfig, types::ProductId};
use time::{Date, macros::date};

fn product(code: &str, expiration_date: Date) -> ProductData {
    ProductData {
        code: code.to_owned(),
        description: format!("{code} description"),
        quantity: 10,
        lot: Some(format!("lot-{code}")),
        expiration_date,
        photo_reference: None,
    }
}

#[fixture]
async fn db() -> Db {
    Db::open(&SqliteConfig::default()).await.unwrap()
}

#[rstest]
#[tokio::test]
async fn create_and_get(#[future] db: Db) -> anyhow::Result<()> {
    let db = db.await;
    let id = ProductId::generate();
    let data = product("A", date!(2024 - 05 - 01));

    let created = db.create_product(id, data.clone()).await?;
    assert_eq!(created, ProductRecord { id, data: data.clone() });

    let fetched = db.get_product(id).await?;
    assert_eq!(fetched, Some(ProductRecord { id, data }));

    assert_eq!(db.get_product(ProductId::generate()).await?, None);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn list_orders_by_expiration(#[future] db: Db) -> anyhow::Result<()> {
    let db = db.await;

    let late = ProductId::generate();
    let early = ProductId::generate();
    let tie_first = ProductId::generate();
    let tie_second = ProductId::generate();

    db.create_product(late, product("LATE", date!(2026 - 01 - 01))).await?;
    db.create_product(tie_first, product("T1", date!(2025 - 01 - 01))).await?;
    db.create_product(early, product("EARLY", date!(2023 - 12 - 31))).await?;
    db.create_product(tie_second, product("T2", date!(2025 - 01 - 01))).await?;

    let ids: Vec<_> = db
        .list_products()
        .await?
        .into_iter()
        .map(|record| record.id)
        .collect();
    assert_eq!(ids, vec![early, tie_first, tie_second, late]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn update_keeps_id(#[future] db: Db) -> anyhow::Result<()> {
    let db = db.await;
    let id = ProductId::generate();
    db.create_product(id, product("A", date!(2024 - 05 - 01))).await?;

    let changed = ProductData {
        quantity: 0,
        lot: None,
        photo_reference: Some("uploads/a.png".to_owned()),
        ..product("B", date!(2025 - 05 - 01))
    };
    let updated = db.update_product(id, changed.clone()).await?;
    assert_eq!(updated, Some(ProductRecord { id, data: changed.clone() }));
    assert_eq!(db.get_product(id).await?.map(|record| record.data), Some(changed));

    let missing = db
        .update_product(ProductId::generate(), product("C", date!(2024 - 01 - 01)))
        .await?;
    assert_eq!(missing, None);
    assert_eq!(db.list_products().await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn delete_returns_old_record(#[future] db: Db) -> anyhow::Result<()> {
    let db = db.await;
    let keep = ProductId::generate();
    let dropped = ProductId::generate();
    db.create_product(keep, product("KEEP", date!(2024 - 05 - 01))).await?;
    db.create_product(dropped, product("DROP", date!(2024 - 06 - 01))).await?;

    let deleted = db.delete_product(dropped).await?;
    assert_eq!(deleted.map(|record| record.data.code), Some("DROP".to_owned()));
    assert_eq!(db.get_product(dropped).await?, None);
    assert_eq!(db.delete_product(dropped).await?, None);

    let remaining: Vec<_> = db.list_products().await?.into_iter().map(|r| r.id).collect();
    assert_eq!(remaining, vec![keep]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn codes_need_not_be_unique(#[future] db: Db) -> anyhow::Result<()> {
    let db = db.await;
    db.create_product(ProductId::generate(), product("SAME", date!(2024 - 05 - 01))).await?;
    db.create_product(ProductId::generate(), product("SAME", date!(2024 - 07 - 01))).await?;
    assert_eq!(db.list_products().await?.len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn schema_refuses_malformed_dates(#[future] db: Db) -> anyhow::Result<()> {
    let db = db.await;

    for text in ["2024-02-30", "tomorrow", "2024-1-5"] {
        let result = sqlx::query(
            "insert into product (id, code, description, quantity, expiration_date) values ($1, 'X', 'X', 1, $2)",
        )
        .bind(ProductId::generate())
        .bind(text)
        .execute(&db.writer)
        .await;
        assert!(result.is_err(), "{text:?} was accepted");
    }

    assert!(db.list_products().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn file_database_persists() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("slt-sqlite-{}", ProductId::generate()));
    std::fs::create_dir_all(&dir)?;
    let config = SqliteConfig {
        database_path: Some(dir.join("catalog.db")),
        create_if_missing: true,
    };

    let id = ProductId::generate();
    {
        let db = Db::open(&config).await?;
        db.create_product(id, product("A", date!(2024 - 05 - 01))).await?;
        db.writer.close().await;
        db.reader.close().await;
    }

    let db = Db::open(&config).await?;
    assert!(db.get_product(id).await?.is_some());
    db.writer.close().await;
    db.reader.close().await;

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
