//! Query scopes: composable filter fragments for `get_all`.
//!
//! Entity-specific repositories translate their typed filter structs
//! into scopes instead of re-implementing the count/sort/paginate query.
//! A scope appends an `AND ...` fragment (with bound parameters) to both
//! the count and the fetch builders, so the two queries always agree on
//! the filtered row set.
//!
//! Column names passed to the combinators are `&'static str` supplied by
//! repository code; user input only ever reaches the query as a bound
//! value.

use sqlx::{Postgres, QueryBuilder};

/// A closure that narrows a query by appending `AND ...` SQL.
pub type QueryScope = Box<dyn for<'a> Fn(&mut QueryBuilder<'a, Postgres>) + Send + Sync>;

/// Case-insensitive substring match: `AND column ILIKE '%needle%'`.
pub fn ilike(column: &'static str, needle: &str) -> QueryScope {
    let pattern = format!("%{needle}%");
    Box::new(move |qb| {
        qb.push(format!(" AND {column} ILIKE "));
        qb.push_bind(pattern.clone());
    })
}

/// Exact equality: `AND column = value`.
pub fn eq<V>(column: &'static str, value: V) -> QueryScope
where
    V: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Clone + Send + Sync + 'static,
{
    Box::new(move |qb| {
        qb.push(format!(" AND {column} = "));
        qb.push_bind(value.clone());
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(scope: &QueryScope) -> String {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL");
        scope(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn test_ilike_scope_sql() {
        let scope = ilike("name", "ada");
        assert_eq!(
            rendered(&scope),
            "SELECT COUNT(*) FROM users WHERE deleted_at IS NULL AND name ILIKE $1"
        );
    }

    #[test]
    fn test_eq_scope_sql() {
        let scope = eq("user_type_id", 3i64);
        assert_eq!(
            rendered(&scope),
            "SELECT COUNT(*) FROM users WHERE deleted_at IS NULL AND user_type_id = $1"
        );
    }

    #[test]
    fn test_scopes_compose_in_order() {
        let scopes = vec![ilike("email", "@example.com"), eq("is_active", true)];
        let mut qb = QueryBuilder::new("SELECT * FROM users WHERE deleted_at IS NULL");
        for scope in &scopes {
            scope(&mut qb);
        }
        assert_eq!(
            qb.sql(),
            "SELECT * FROM users WHERE deleted_at IS NULL AND email ILIKE $1 AND is_active = $2"
        );
    }
}
