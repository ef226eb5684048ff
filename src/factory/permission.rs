use chrono::{DateTime, Duration, FixedOffset, SubsecRound, Utc};
use fake::{
    faker::name::en::{FirstName, LastName},
    Dummy, Fake, Faker,
};
use sqlx::PgPool;

use crate::model::permission::Permission;

pub struct PermissionFactory<T: Clone> {
    modifier_one: fn(x: &Permission, ext: T) -> Permission,
    modifier_many: fn(x: &Permission, idx: usize, ext: T) -> Permission,
}

impl<T: Clone> Default for PermissionFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> PermissionFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Permission, ext: T) -> Permission) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Permission, idx: usize, ext: T) -> Permission) {
        self.modifier_many = modifier
    }

    /// Insert one permission. The id is assigned by the database and any id
    /// set by a modifier is ignored.
    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Permission> {
        let data = PermissionDummy::generate_one();
        let mut data = (self.modifier_one)(&data, ext);
        let (id,): (i32,) = sqlx::query_as(r#"
        INSERT INTO public.permission (employee_first_name, employee_last_name, permission_type_id, permission_date)
        VALUES ($1, $2, $3, $4)
        RETURNING id"#)
        .bind(&data.employee_first_name)
        .bind(&data.employee_last_name)
        .bind(data.permission_type_id)
        .bind(data.permission_date)
        .fetch_one(db).await?;
        data.id = id;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Permission>> {
        let data = PermissionDummy::generate_many(num);
        let mut result: Vec<Permission> = vec![];
        for (idx, item) in data.iter().enumerate() {
            result.push((self.modifier_many)(item, idx, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter_mut() {
            let (id,): (i32,) = sqlx::query_as(r#"INSERT INTO public.permission (employee_first_name, employee_last_name, permission_type_id, permission_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id"#)
            .bind(&item.employee_first_name)
            .bind(&item.employee_last_name)
            .bind(item.permission_type_id)
            .bind(item.permission_date)
            .fetch_one(&mut *tx).await?;
            item.id = id;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Dummy, Clone)]
struct PermissionDummy {
    #[dummy(faker = "FirstName()")]
    pub employee_first_name: String,
    #[dummy(faker = "LastName()")]
    pub employee_last_name: String,
    #[dummy(faker = "1..6")]
    pub permission_type_id: i32,
    #[dummy(faker = "1..365")]
    pub days_ahead: i64,
}

impl PermissionDummy {
    fn into_permission(self) -> Permission {
        let permission_date: DateTime<FixedOffset> =
            (Utc::now() + Duration::days(self.days_ahead)).trunc_subsecs(0).fixed_offset();
        Permission {
            id: 0,
            employee_first_name: self.employee_first_name,
            employee_last_name: self.employee_last_name,
            permission_type_id: self.permission_type_id,
            permission_date,
        }
    }

    pub fn generate_one() -> Permission {
        Faker.fake::<Self>().into_permission()
    }

    pub fn generate_many(num: u32) -> Vec<Permission> {
        let mut result: Vec<Permission> = vec![];
        for _ in 0..num {
            result.push(Faker.fake::<Self>().into_permission());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{factory::permission::PermissionFactory, model::permission::Permission};

    #[sqlx::test]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = PermissionFactory::new();
        let permission = factory.generate_one(&pool, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.permission"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 1);
        assert!(permission.id > 0);
        assert!((1..=5).contains(&permission.permission_type_id));
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = PermissionFactory::<String>::new();
        factory.modified_one(|data, ext| Permission {
            id: data.id,
            employee_first_name: ext,
            employee_last_name: "Pérez".to_string(),
            permission_type_id: 4,
            permission_date: data.permission_date,
        });
        let permission = factory.generate_one(&pool, "Juan".to_string()).await?;

        // Expect
        let res: (i32, String, String, i32) = sqlx::query_as(
            r#"SELECT id, employee_first_name, employee_last_name, permission_type_id
        FROM public.permission"#,
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(res.0, permission.id);
        assert_eq!(res.1, "Juan".to_string());
        assert_eq!(res.2, "Pérez".to_string());
        assert_eq!(res.3, 4);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = PermissionFactory::new();
        let permissions = factory.generate_many(&pool, 10, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.permission"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 10);
        let mut ids: Vec<i32> = permissions.iter().map(|x| x.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 10);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = PermissionFactory::new();
        factory.modified_many(|data, idx, _| Permission {
            id: data.id,
            employee_first_name: format!("employee {}", idx),
            employee_last_name: data.employee_last_name.clone(),
            permission_type_id: 5,
            permission_date: data.permission_date,
        });
        factory.generate_many(&pool, 5, ()).await?;

        // Expect
        let res: Vec<(String, i32)> = sqlx::query_as(
            r#"SELECT employee_first_name, permission_type_id
        FROM public.permission ORDER BY id"#,
        )
        .fetch_all(&pool)
        .await?;
        assert_eq!(res.len(), 5);
        for (idx, item) in res.iter().enumerate() {
            assert_eq!(item.0, format!("employee {}", idx));
            assert_eq!(item.1, 5);
        }
        Ok(())
    }
}
