use crate::Db;
use crate::types::{ProductId, ProductRow};
use slt_core::{
    models::{ProductData, ProductRecord},
    ports::CatalogRepository,
};

impl CatalogRepository for Db {
    async fn create_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData,
    ) -> Result<ProductRecord<Self::ProductId, ProductData>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            insert into
                product (id, code, description, quantity, lot, expiration_date, photo_reference)
            values
                ($1, $2, $3, $4, $5, $6, $7)
            returning
                id, code, description, quantity, lot, expiration_date, photo_reference
            "#,
        )
        .bind(product_id)
        .bind(data.code)
        .bind(data.description)
        .bind(data.quantity)
        .bind(data.lot)
        .bind(data.expiration_date)
        .bind(data.photo_reference)
        .fetch_one(&self.writer)
        .await?;

        Ok(row.into())
    }

    async fn list_products(
        &self,
    ) -> Result<Vec<ProductRecord<Self::ProductId, ProductData>>, Self::Error> {
        // rowid breaks ties between equal dates in insertion order
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            select
                id, code, description, quantity, lot, expiration_date, photo_reference
            from
                product
            order by
                expiration_date asc, rowid asc
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> Result<Option<ProductRecord<Self::ProductId, ProductData>>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            select
                id, code, description, quantity, lot, expiration_date, photo_reference
            from
                product
            where
                id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData,
    ) -> Result<Option<ProductRecord<Self::ProductId, ProductData>>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            update
                product
            set
                code = $1,
                description = $2,
                quantity = $3,
                lot = $4,
                expiration_date = $5,
                photo_reference = $6
            where
                id = $7
            returning
                id, code, description, quantity, lot, expiration_date, photo_reference
            "#,
        )
        .bind(data.code)
        .bind(data.description)
        .bind(data.quantity)
        .bind(data.lot)
        .bind(data.expiration_date)
        .bind(data.photo_reference)
        .bind(product_id)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_product(
        &self,
        product_id: ProductId,
    ) -> Result<Option<ProductRecord<Self::ProductId, ProductData>>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            delete from
                product
            where
                id = $1
            returning
                id, code, description, quantity, lot, expiration_date, photo_reference
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Into::into))
    }
}
