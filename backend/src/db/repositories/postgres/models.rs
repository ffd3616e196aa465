use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{estates, trees};
use crate::api::{Estate, EstateId, Tree, TreeId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = estates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // updated_at is maintained by the database only
pub struct EstateRow {
    pub id: Uuid,
    pub length: i32,
    pub width: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = estates)]
pub struct NewEstateRow {
    pub length: i32,
    pub width: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // updated_at is maintained by the database only
pub struct TreeRow {
    pub id: Uuid,
    pub estate_id: Uuid,
    pub x: i32,
    pub y: i32,
    pub height: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trees)]
pub struct NewTreeRow {
    pub estate_id: Uuid,
    pub x: i32,
    pub y: i32,
    pub height: i32,
}

impl From<EstateRow> for Estate {
    fn from(row: EstateRow) -> Self {
        Estate {
            id: EstateId(row.id),
            length: row.length,
            width: row.width,
            created_at: row.created_at,
        }
    }
}

impl From<TreeRow> for Tree {
    fn from(row: TreeRow) -> Self {
        Tree {
            id: TreeId(row.id),
            estate_id: EstateId(row.estate_id),
            x: row.x,
            y: row.y,
            height: row.height,
            created_at: row.created_at,
        }
    }
}
