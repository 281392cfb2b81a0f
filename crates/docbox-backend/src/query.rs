//! Wire encoding of [`DocumentQuery`] into the backend's query strings.
//!
//! The backend accepts each predicate as a JSON object in a repeated
//! `queries[]` request parameter, e.g.
//! `{"method":"equal","attribute":"owner","values":["u1"]}`.

use serde_json::{Value, json};

use docbox_core::error::AppError;
use docbox_core::types::{DocumentQuery, Filter, SortDirection, SortSpec};

/// Encode a query into the backend's `queries[]` strings, in predicate order
/// followed by sort and limit.
pub fn encode(query: &DocumentQuery) -> Result<Vec<String>, AppError> {
    let mut encoded = Vec::with_capacity(query.filters.len() + 2);

    for filter in &query.filters {
        encoded.push(serde_json::to_string(&filter_value(filter))?);
    }

    if let Some(sort) = &query.sort {
        encoded.push(serde_json::to_string(&sort_value(sort))?);
    }

    if let Some(limit) = query.limit {
        encoded.push(serde_json::to_string(&json!({
            "method": "limit",
            "values": [limit],
        }))?);
    }

    Ok(encoded)
}

fn filter_value(filter: &Filter) -> Value {
    match filter {
        Filter::Equal { field, values } => json!({
            "method": "equal",
            "attribute": field,
            "values": values,
        }),
        Filter::Contains { field, value } => json!({
            "method": "contains",
            "attribute": field,
            "values": [value],
        }),
        Filter::Or(filters) => {
            let nested: Vec<Value> = filters.iter().map(filter_value).collect();
            json!({
                "method": "or",
                "values": nested,
            })
        }
    }
}

fn sort_value(sort: &SortSpec) -> Value {
    let method = match sort.direction {
        SortDirection::Asc => "orderAsc",
        SortDirection::Desc => "orderDesc",
    };
    json!({
        "method": method,
        "attribute": sort.field,
    })
}
