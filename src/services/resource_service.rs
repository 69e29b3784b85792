use serde::{de::DeserializeOwned, Serialize};
use sqlx::{
    postgres::PgRow,
    query_builder::Separated,
    FromRow, PgPool, Postgres, QueryBuilder,
};

use crate::error::Result;
use crate::middleware::auth::AuthContext;
use crate::models::user::Role;

/// A create form for one of the flat, list-only record types.
///
/// Implementors describe their table and bind one value per entry of
/// `COLUMNS`, in the same order. Everything else (listing, inserting,
/// role checks, redirects) is shared.
pub trait ResourceForm: DeserializeOwned + Send + 'static {
    type Record: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static;

    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const LIST_PATH: &'static str;
    const REDIRECT_PATH: &'static str = Self::LIST_PATH;
    const LIST_ROLES: &'static [Role] = &[Role::Manager, Role::Admin];
    const CREATE_ROLES: &'static [Role] = &[Role::Manager, Role::Admin];

    fn push_values(self, auth: &AuthContext, row: &mut Separated<'_, 'static, Postgres, &'static str>);
}

#[derive(Clone)]
pub struct ResourceService {
    pool: PgPool,
}

impl ResourceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All records, most recent first.
    pub async fn list<F: ResourceForm>(&self) -> Result<Vec<F::Record>> {
        let sql = format!("SELECT * FROM {} ORDER BY created_at DESC", F::TABLE);
        let items = sqlx::query_as::<_, F::Record>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn create<F: ResourceForm>(&self, form: F, auth: &AuthContext) -> Result<F::Record> {
        let mut qb = insert_statement(form, auth);
        let record = qb
            .build_query_as::<F::Record>()
            .fetch_one(&self.pool)
            .await?;
        tracing::info!(table = F::TABLE, user_id = %auth.user_id, "record created");
        Ok(record)
    }
}

fn insert_statement<F: ResourceForm>(form: F, auth: &AuthContext) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("INSERT INTO {} (", F::TABLE));
    qb.push(F::COLUMNS.join(", "));
    qb.push(") VALUES (");
    {
        let mut row = qb.separated(", ");
        form.push_values(auth, &mut row);
    }
    qb.push(") RETURNING *");
    qb
}
