//! Order Repository
//!
//! `orders` and `order_items`. Multi-row writes (checkout insert, delete)
//! each run in one transaction.

use shared::models::{Order, OrderCreate, OrderDetail, OrderItem, OrderStats, OrderStatus};
use shared::money::round_money;
use shared::util::now_millis;
use shared::validation::normalize_phone;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult};

const ORDER_COLUMNS: &str = "id, customer_name, whatsapp_number, cohort, nickname, total_amount, \
     status, proof_of_payment_url, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, order_id, product_name, quantity, unit_price, created_at";

/// Insert an order and its items atomically; status starts at `Pending`
///
/// Text fields are stored trimmed and the WhatsApp number without whitespace.
pub async fn create(pool: &SqlitePool, data: &OrderCreate) -> RepoResult<OrderDetail> {
    let id = Uuid::new_v4().to_string();
    let now = now_millis();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO orders (id, customer_name, whatsapp_number, cohort, nickname, total_amount, \
         status, proof_of_payment_url, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(data.customer_name.trim())
    .bind(normalize_phone(&data.whatsapp_number))
    .bind(data.cohort.trim())
    .bind(data.nickname.trim())
    .bind(round_money(data.total_amount))
    .bind(OrderStatus::Pending)
    .bind(data.proof_of_payment_url.trim())
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for item in &data.items {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_name, quantity, unit_price, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(item.product_name.trim())
        .bind(item.quantity)
        .bind(round_money(item.unit_price))
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_detail(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Order {id} missing after insert")))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Order>> {
    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(order)
}

/// Items of one order in insertion order
pub async fn find_items(pool: &SqlitePool, order_id: &str) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ? ORDER BY id"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Order row plus its items, read in one transaction
pub async fn find_detail(pool: &SqlitePool, id: &str) -> RepoResult<Option<OrderDetail>> {
    let mut tx = pool.begin().await?;

    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some(order) = order else {
        tx.commit().await?;
        return Ok(None);
    };

    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ? ORDER BY id"
    ))
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(Some(OrderDetail { order, items }))
}

/// All orders, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, rowid DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Set the status and bump `updated_at`; `None` when the order does not exist
///
/// Any status may follow any other. Concurrent updates are last-write-wins.
pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    status: OrderStatus,
) -> RepoResult<Option<Order>> {
    let rows = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

/// Delete the items then the order in one transaction; `false` when absent
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM order_items WHERE order_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}

/// Dashboard counters; revenue excludes cancelled orders
pub async fn stats(pool: &SqlitePool) -> RepoResult<OrderStats> {
    let (total, pending, confirmed, cancelled, revenue): (i64, i64, i64, i64, f64) =
        sqlx::query_as(
            "SELECT COUNT(*), \
             COALESCE(SUM(CASE WHEN status = 'Pending' THEN 1 ELSE 0 END), 0), \
             COALESCE(SUM(CASE WHEN status = 'Confirmed' THEN 1 ELSE 0 END), 0), \
             COALESCE(SUM(CASE WHEN status = 'Cancelled' THEN 1 ELSE 0 END), 0), \
             CAST(COALESCE(SUM(CASE WHEN status != 'Cancelled' THEN total_amount ELSE 0 END), 0) AS REAL) \
             FROM orders",
        )
        .fetch_one(pool)
        .await?;

    Ok(OrderStats {
        total,
        pending,
        confirmed,
        cancelled,
        revenue: round_money(revenue),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::OrderItemInput;

    async fn pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    fn checkout() -> OrderCreate {
        OrderCreate {
            customer_name: " Ada ".to_string(),
            whatsapp_number: "0801 234 5678".to_string(),
            cohort: "C4".to_string(),
            nickname: "ada".to_string(),
            total_amount: 1700.0,
            proof_of_payment_url: "http://localhost:3000/api/proofs/p.jpg".to_string(),
            items: vec![
                OrderItemInput {
                    product_name: "Visionary Popcorn".to_string(),
                    quantity: 2,
                    unit_price: 600.0,
                },
                OrderItemInput {
                    product_name: "Sachet Water".to_string(),
                    quantity: 1,
                    unit_price: 500.0,
                },
            ],
        }
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_inserts_order_and_items() {
        let pool = pool().await;
        let detail = create(&pool, &checkout()).await.unwrap();

        assert_eq!(detail.order.status, OrderStatus::Pending);
        assert_eq!(detail.order.total_amount, 1700.0);
        assert_eq!(detail.order.customer_name, "Ada");
        assert_eq!(detail.order.whatsapp_number, "08012345678");
        assert_eq!(detail.order.created_at, detail.order.updated_at);
        assert!(Uuid::parse_str(&detail.order.id).is_ok());

        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.items[0].product_name, "Visionary Popcorn");
        assert_eq!(detail.items[0].quantity, 2);
        assert_eq!(detail.items[0].unit_price, 600.0);
        assert_eq!(detail.items[1].order_id, detail.order.id);

        assert_eq!(count(&pool, "orders").await, 1);
        assert_eq!(count(&pool, "order_items").await, 2);
    }

    #[tokio::test]
    async fn test_failed_item_insert_rolls_back_order() {
        let pool = pool().await;
        let mut data = checkout();
        // violates the quantity CHECK constraint
        data.items[1].quantity = 0;

        assert!(create(&pool, &data).await.is_err());
        assert_eq!(count(&pool, "orders").await, 0);
        assert_eq!(count(&pool, "order_items").await, 0);
    }

    #[tokio::test]
    async fn test_find_missing_order() {
        let pool = pool().await;
        assert!(find_by_id(&pool, "nope").await.unwrap().is_none());
        assert!(find_detail(&pool, "nope").await.unwrap().is_none());
        assert!(find_items(&pool, "nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let pool = pool().await;
        let first = create(&pool, &checkout()).await.unwrap();
        let second = create(&pool, &checkout()).await.unwrap();

        let all = find_all(&pool).await.unwrap();
        let ids: Vec<_> = all.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec![second.order.id.as_str(), first.order.id.as_str()]);
    }

    #[tokio::test]
    async fn test_update_status() {
        let pool = pool().await;
        let detail = create(&pool, &checkout()).await.unwrap();

        let updated = update_status(&pool, &detail.order.id, OrderStatus::Confirmed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Confirmed);
        assert!(updated.updated_at >= detail.order.updated_at);

        let reread = find_by_id(&pool, &detail.order.id).await.unwrap().unwrap();
        assert_eq!(reread.status, OrderStatus::Confirmed);

        // unconstrained: back to pending is allowed
        let back = update_status(&pool, &detail.order.id, OrderStatus::Pending)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(back.status, OrderStatus::Pending);

        assert!(update_status(&pool, "nope", OrderStatus::Cancelled)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_order_and_items() {
        let pool = pool().await;
        let keep = create(&pool, &checkout()).await.unwrap();
        let gone = create(&pool, &checkout()).await.unwrap();

        assert!(delete(&pool, &gone.order.id).await.unwrap());
        assert!(find_detail(&pool, &gone.order.id).await.unwrap().is_none());
        assert!(find_items(&pool, &gone.order.id).await.unwrap().is_empty());
        assert_eq!(find_items(&pool, &keep.order.id).await.unwrap().len(), 2);

        assert!(!delete(&pool, &gone.order.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_stats() {
        let pool = pool().await;
        assert_eq!(stats(&pool).await.unwrap(), OrderStats::default());

        let a = create(&pool, &checkout()).await.unwrap();
        let b = create(&pool, &checkout()).await.unwrap();
        create(&pool, &checkout()).await.unwrap();
        update_status(&pool, &a.order.id, OrderStatus::Confirmed).await.unwrap();
        update_status(&pool, &b.order.id, OrderStatus::Cancelled).await.unwrap();

        let stats = stats(&pool).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.confirmed, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.revenue, 3400.0);
    }
}
