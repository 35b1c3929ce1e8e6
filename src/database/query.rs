use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{
    postgres::PgArguments,
    query::{QueryAs, QueryScalar},
    Postgres,
};
use uuid::Uuid;

/// A value bound to a `$n` placeholder of a dynamically assembled statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Uuid(Uuid),
    Text(Option<String>),
    Int(Option<i32>),
    BigInt(i64),
    Decimal(Option<Decimal>),
    Timestamp(Option<DateTime<Utc>>),
}

pub fn bind_query_as<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    args: &[SqlArg],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for arg in args {
        query = match arg.clone() {
            SqlArg::Uuid(v) => query.bind(v),
            SqlArg::Text(v) => query.bind(v),
            SqlArg::Int(v) => query.bind(v),
            SqlArg::BigInt(v) => query.bind(v),
            SqlArg::Decimal(v) => query.bind(v),
            SqlArg::Timestamp(v) => query.bind(v),
        };
    }
    query
}

pub fn bind_query_scalar<'q, O>(
    mut query: QueryScalar<'q, Postgres, O, PgArguments>,
    args: &[SqlArg],
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    for arg in args {
        query = match arg.clone() {
            SqlArg::Uuid(v) => query.bind(v),
            SqlArg::Text(v) => query.bind(v),
            SqlArg::Int(v) => query.bind(v),
            SqlArg::BigInt(v) => query.bind(v),
            SqlArg::Decimal(v) => query.bind(v),
            SqlArg::Timestamp(v) => query.bind(v),
        };
    }
    query
}
