//! `search` command: renders a product query from command-line criteria.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use pim_core::Catalog;
use pim_index::{Direction, FilterContext, Operator, ProductQueryBuilder};
use serde_json::{json, Value};

/// A `FIELD:OPERATOR[:VALUE]` criterion.
///
/// The value is read as JSON when it parses, and as a plain string
/// otherwise; an omitted value is `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

impl FromStr for FilterArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let field = parts
            .next()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .ok_or_else(|| format!("missing field in filter \"{s}\""))?;
        let operator = parts
            .next()
            .ok_or_else(|| format!("missing operator in filter \"{s}\", expected FIELD:OPERATOR[:VALUE]"))?
            .parse::<Operator>()
            .map_err(|e| e.to_string())?;
        let value = parts.next().map_or(Value::Null, |raw| {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        });

        Ok(Self {
            field: field.to_string(),
            operator,
            value,
        })
    }
}

/// A `FIELD[:ASC|DESC]` sort, ascending when the direction is omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortArg {
    pub field: String,
    pub direction: Direction,
}

impl FromStr for SortArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => {
                (field, direction.parse::<Direction>().map_err(|e| e.to_string())?)
            }
            None => (s, Direction::Ascending),
        };
        if field.trim().is_empty() {
            return Err(format!("missing field in sort \"{s}\""));
        }
        Ok(Self {
            field: field.trim().to_string(),
            direction,
        })
    }
}

/// The part of `context` an attribute accepts: the locale only when it is
/// localizable, the scope only when it is scopable. Product fields and
/// unknown codes keep the whole context.
fn context_for(catalog: &Catalog, field: &str, context: &FilterContext) -> FilterContext {
    let Some(attribute) = catalog.attribute(field) else {
        return context.clone();
    };
    FilterContext {
        locale: context.locale.clone().filter(|_| attribute.localizable),
        scope: context.scope.clone().filter(|_| attribute.scopable),
        options: context.options.clone(),
    }
}

/// Build the search request body for the given criteria.
///
/// Locale and scope are shared by every criterion and dropped for
/// attributes that do not vary by them.
///
/// # Errors
///
/// Returns the first criterion the query builder rejects.
pub(crate) fn build_search(
    catalog: Arc<Catalog>,
    filters: &[FilterArg],
    sorts: &[SortArg],
    context: &FilterContext,
) -> anyhow::Result<Value> {
    let mut query = ProductQueryBuilder::with_defaults(catalog.clone());

    for filter in filters {
        let filter_context = context_for(&catalog, &filter.field, context);
        query
            .add_filter(&filter.field, filter.operator, &filter.value, &filter_context)
            .with_context(|| format!("filter on {} {}", filter.field, filter.operator))?;
    }
    for sort in sorts {
        let sort_context = context_for(&catalog, &sort.field, context);
        query
            .add_sorter(&sort.field, sort.direction, &sort_context)
            .with_context(|| format!("sort on {}", sort.field))?;
    }

    Ok(query.query())
}

/// Print the search request for the configured product index.
///
/// # Errors
///
/// Returns an error if a criterion is rejected or the output cannot be
/// serialized.
pub(crate) fn run_search(
    catalog: Arc<Catalog>,
    index_name: &str,
    filters: &[FilterArg],
    sorts: &[SortArg],
    context: &FilterContext,
) -> anyhow::Result<()> {
    let body = build_search(catalog, filters, sorts, context)?;
    let request = json!({"index": index_name, "body": body});
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
