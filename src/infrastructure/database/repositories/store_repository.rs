//! SeaORM implementation of StoreRepository

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::sea_query::{Expr, Order, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::db_err;
use crate::domain::store::TrigPosition;
use crate::domain::{
    parse_store_sort, CategoryRef, DomainError, DomainResult, LocationQuery, Position, Store,
    StoreRepository, StoreStatus,
};
use crate::infrastructure::database::entities::store;
use crate::shared::{ListParams, PaginatedResult, Sort};

/// Central-angle cosine between each row and the query center, from the
/// precomputed trig columns. Bound as `[sin_lat0, cos_lat0, cos_lng0, sin_lng0]`.
const PROXIMITY_SQL: &str =
    "(sin_lat * ? + cos_lat * ? * (cos_lng * ? + sin_lng * ?))";

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_entity(s: StoreStatus) -> store::StoreStatus {
    match s {
        StoreStatus::Pending => store::StoreStatus::Pending,
        StoreStatus::Active => store::StoreStatus::Active,
        StoreStatus::Block => store::StoreStatus::Block,
        StoreStatus::Disable => store::StoreStatus::Disable,
    }
}

fn status_to_domain(s: store::StoreStatus) -> StoreStatus {
    match s {
        store::StoreStatus::Pending => StoreStatus::Pending,
        store::StoreStatus::Active => StoreStatus::Active,
        store::StoreStatus::Block => StoreStatus::Block,
        store::StoreStatus::Disable => StoreStatus::Disable,
    }
}

fn model_to_domain(m: store::Model) -> DomainResult<Store> {
    let tags: Vec<String> = serde_json::from_str(&m.tags)
        .map_err(|e| DomainError::Internal(format!("corrupt tags on store {}: {}", m.id, e)))?;
    let position = match (m.latitude, m.longitude) {
        (Some(latitude), Some(longitude)) => Some(Position {
            latitude,
            longitude,
        }),
        _ => None,
    };

    Ok(Store {
        id: m.id,
        name: m.name,
        description: m.description,
        status: status_to_domain(m.status),
        external_id: m.external_id,
        account_id: m.account_id,
        category: CategoryRef::Stub(m.category_id),
        tags,
        position,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(s: &Store) -> DomainResult<store::ActiveModel> {
    let tags = serde_json::to_string(&s.tags)
        .map_err(|e| DomainError::Internal(format!("cannot encode tags: {}", e)))?;
    let trig = s.position.map(TrigPosition::from);
    Ok(store::ActiveModel {
        id: Set(s.id),
        name: Set(s.name.clone()),
        description: Set(s.description.clone()),
        status: Set(status_to_entity(s.status)),
        external_id: Set(s.external_id),
        account_id: Set(s.account_id),
        category_id: Set(s.category.id()),
        tags: Set(tags),
        latitude: Set(s.position.map(|p| p.latitude)),
        longitude: Set(s.position.map(|p| p.longitude)),
        sin_lat: Set(trig.map(|t| t.sin_lat)),
        cos_lat: Set(trig.map(|t| t.cos_lat)),
        sin_lng: Set(trig.map(|t| t.sin_lng)),
        cos_lng: Set(trig.map(|t| t.cos_lng)),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    })
}

fn proximity_expr(query: &LocationQuery) -> SimpleExpr {
    let center = TrigPosition::from(query.center());
    Expr::cust_with_values(
        PROXIMITY_SQL,
        [center.sin_lat, center.cos_lat, center.cos_lng, center.sin_lng],
    )
}

fn order(sort: &Sort) -> Order {
    if sort.descending {
        Order::Desc
    } else {
        Order::Asc
    }
}

/// `proximity` is the central-angle cosine of a location query. It grows
/// as distance shrinks, so a distance sort orders it the opposite way.
fn apply_sort(
    select: Select<store::Entity>,
    sort: &Sort,
    proximity: Option<&SimpleExpr>,
) -> Select<store::Entity> {
    let column = match sort.field.as_str() {
        "name" => store::Column::Name,
        "status" => store::Column::Status,
        "updated_at" => store::Column::UpdatedAt,
        "distance" => {
            if let Some(c) = proximity {
                let by_cosine = if sort.descending {
                    Order::Asc
                } else {
                    Order::Desc
                };
                return select
                    .order_by(c.clone(), by_cosine)
                    .order_by_asc(store::Column::Id);
            }
            store::Column::CreatedAt
        }
        _ => store::Column::CreatedAt,
    };
    select
        .order_by(column, order(sort))
        .order_by_asc(store::Column::Id)
}

// ── SeaOrmStoreRepository ───────────────────────────────────────

pub struct SeaOrmStoreRepository {
    db: DatabaseConnection,
}

impl SeaOrmStoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts the filtered query, then fetches the requested page.
    async fn paginate(
        &self,
        select: Select<store::Entity>,
        params: &ListParams,
        proximity: Option<SimpleExpr>,
    ) -> DomainResult<PaginatedResult<Store>> {
        let sort = parse_store_sort(&params.sort, proximity.is_some())?;

        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let models = apply_sort(select, &sort, proximity.as_ref())
            .offset(params.offset())
            .limit(params.page_size())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models
            .into_iter()
            .map(model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        debug!(
            "Store page {} ({} of {} rows, sort {})",
            params.page,
            items.len(),
            total,
            params.sort
        );

        Ok(PaginatedResult::new(
            items,
            total,
            params.page.max(1) as u64,
            params.page_size(),
        ))
    }
}

#[async_trait]
impl StoreRepository for SeaOrmStoreRepository {
    async fn create(&self, s: Store) -> DomainResult<()> {
        let model = domain_to_active(&s)?;
        model.insert(&self.db).await.map_err(db_err)?;
        info!("Store saved: {} ({})", s.name, s.id);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Store>> {
        let model = store::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn get_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> DomainResult<Option<Store>> {
        let model = store::Entity::find_by_id(id)
            .filter(store::Column::ExternalId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn get_all(&self, params: &ListParams) -> DomainResult<PaginatedResult<Store>> {
        self.paginate(store::Entity::find(), params, None).await
    }

    async fn get_all_by_category(
        &self,
        category_id: Uuid,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        let select = store::Entity::find().filter(store::Column::CategoryId.eq(category_id));
        self.paginate(select, params, None).await
    }

    async fn get_all_by_owner(
        &self,
        owner_id: Uuid,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        let select = store::Entity::find().filter(store::Column::ExternalId.eq(owner_id));
        self.paginate(select, params, None).await
    }

    async fn get_all_by_status(
        &self,
        status: StoreStatus,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        let select =
            store::Entity::find().filter(store::Column::Status.eq(status_to_entity(status)));
        self.paginate(select, params, None).await
    }

    async fn get_all_by_tags(
        &self,
        tags: &[String],
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        if tags.is_empty() {
            parse_store_sort(&params.sort, false)?;
            return Ok(PaginatedResult::new(
                Vec::new(),
                0,
                params.page.max(1) as u64,
                params.page_size(),
            ));
        }

        // exact element match over the JSON array, no LIKE patterns
        let placeholders = vec!["?"; tags.len()].join(", ");
        let any_tag = Expr::cust_with_values(
            format!(
                "EXISTS (SELECT 1 FROM json_each(\"stores\".\"tags\") WHERE json_each.value IN ({}))",
                placeholders
            ),
            tags.iter().cloned(),
        );
        let select = store::Entity::find().filter(any_tag);
        self.paginate(select, params, None).await
    }

    async fn get_all_by_location(
        &self,
        query: &LocationQuery,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        let proximity = proximity_expr(query);
        let select = store::Entity::find()
            .filter(store::Column::Status.eq(status_to_entity(query.status)))
            .filter(store::Column::SinLat.is_not_null())
            .filter(store::Column::CosLat.is_not_null())
            .filter(store::Column::SinLng.is_not_null())
            .filter(store::Column::CosLng.is_not_null())
            .filter(Expr::expr(proximity.clone()).gte(query.min_cosine()));
        self.paginate(select, params, Some(proximity)).await
    }

    async fn update(&self, s: Store) -> DomainResult<()> {
        let existing = store::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Store", "id", s.id));
        };

        let mut model = domain_to_active(&s)?;
        model.created_at = Set(existing.created_at);
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = store::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Store", "id", id));
        }
        info!("Store deleted: {}", id);
        Ok(())
    }
}
