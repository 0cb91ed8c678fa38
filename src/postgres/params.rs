use std::error::Error;

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value as JsonValue;

use crate::types::RowValues;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use tokio_util::bytes;

/// Borrowed view of `RowValues` in the shape tokio-postgres wants.
pub struct Params<'a> {
    references: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> Params<'a> {
    /// Convert from a slice of `RowValues` to Postgres parameters
    #[must_use]
    pub fn convert(params: &'a [RowValues]) -> Params<'a> {
        let references: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        Params { references }
    }

    /// Get a reference to the underlying parameter array
    #[must_use]
    pub fn as_refs(&self) -> &[&(dyn ToSql + Sync)] {
        &self.references
    }
}

type BoxError = Box<dyn Error + Sync + Send>;

fn is_text(ty: &Type) -> bool {
    matches!(*ty, Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME)
}

fn kind(value: &RowValues) -> &'static str {
    match value {
        RowValues::Int(_) => "integer",
        RowValues::Float(_) => "float",
        RowValues::Text(_) => "text",
        RowValues::Bool(_) => "boolean",
        RowValues::Date(_) => "date",
        RowValues::Timestamp(_) => "timestamp",
        RowValues::Null => "null",
        RowValues::JSON(_) => "json",
    }
}

fn mismatch(value: &RowValues, ty: &Type) -> BoxError {
    format!("cannot bind a {} value to a {} parameter", kind(value), ty).into()
}

// Postgres' own boolean literals.
fn parse_bool(raw: &str) -> Result<bool, BoxError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "y" | "yes" | "on" | "1" => Ok(true),
        "f" | "false" | "n" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("{other:?} is not a boolean").into()),
    }
}

/// Text is parsed into the placeholder's type, the way the server would
/// coerce an untyped literal.
fn text_to_sql(s: &str, ty: &Type, out: &mut bytes::BytesMut) -> Result<IsNull, BoxError> {
    let value = match *ty {
        _ if is_text(ty) => return s.to_sql(ty, out),
        Type::INT2 | Type::INT4 | Type::INT8 => RowValues::Int(s.trim().parse()?),
        Type::FLOAT4 | Type::FLOAT8 => RowValues::Float(s.trim().parse()?),
        Type::BOOL => RowValues::Bool(parse_bool(s)?),
        Type::DATE => RowValues::Date(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?),
        Type::TIMESTAMP => RowValues::Timestamp(
            RowValues::Text(s.trim().to_string())
                .as_timestamp()
                .ok_or_else(|| format!("{s:?} is not a timestamp"))?,
        ),
        Type::JSON | Type::JSONB => RowValues::JSON(
            serde_json::from_str(s).unwrap_or_else(|_| JsonValue::String(s.to_string())),
        ),
        _ => return Err(mismatch(&RowValues::Text(s.to_string()), ty)),
    };
    value.to_sql(ty, out)
}

impl ToSql for RowValues {
    fn to_sql(&self, ty: &Type, out: &mut bytes::BytesMut) -> Result<IsNull, BoxError> {
        match self {
            RowValues::Null => Ok(IsNull::Yes),
            // The wire format is fixed-width, so integers are narrowed to the
            // width the server inferred for the placeholder.
            RowValues::Int(i) => match *ty {
                Type::INT2 => i16::try_from(*i)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*i)?.to_sql(ty, out),
                Type::INT8 => (*i).to_sql(ty, out),
                #[allow(clippy::cast_precision_loss)]
                Type::FLOAT4 | Type::FLOAT8 => RowValues::Float(*i as f64).to_sql(ty, out),
                _ if is_text(ty) => i.to_string().to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            RowValues::Float(f) => match *ty {
                #[allow(clippy::cast_possible_truncation)]
                Type::FLOAT4 => (*f as f32).to_sql(ty, out),
                Type::FLOAT8 => (*f).to_sql(ty, out),
                _ if is_text(ty) => f.to_string().to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            RowValues::Text(s) => text_to_sql(s, ty, out),
            RowValues::Bool(b) => match *ty {
                Type::BOOL => (*b).to_sql(ty, out),
                _ if is_text(ty) => b.to_string().to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            RowValues::Date(d) => match *ty {
                Type::DATE => d.to_sql(ty, out),
                Type::TIMESTAMP => d.and_time(NaiveTime::MIN).to_sql(ty, out),
                _ if is_text(ty) => d.to_string().to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            RowValues::Timestamp(dt) => match *ty {
                Type::TIMESTAMP => dt.to_sql(ty, out),
                Type::DATE => dt.date().to_sql(ty, out),
                _ if is_text(ty) => dt.to_string().to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            RowValues::JSON(jsval) => match *ty {
                Type::JSON | Type::JSONB => jsval.to_sql(ty, out),
                _ if is_text(ty) => jsval.to_string().to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::TEXT
                | Type::VARCHAR
                | Type::BPCHAR
                | Type::NAME
                | Type::BOOL
                | Type::DATE
                | Type::TIMESTAMP
                | Type::JSON
                | Type::JSONB
        )
    }

    to_sql_checked!();
}
