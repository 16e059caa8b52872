use chrono::NaiveDate;

use crate::{
    error::{ChartError, ChartResult},
    model::{CategorySet, RawRecord, Record},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(record_name: &str, field: &str, value: &str) -> ChartResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        ChartError::malformed_date(format!("record '{record_name}' {field} '{value}': {e}"))
    })
}

/// Validate and enrich raw records against the declared category set.
///
/// Pure transform: output has the same cardinality and order as the input;
/// sorting happens in the layout stage. Fails on the first structurally
/// invalid record so a partially-correct chart is never produced.
pub fn normalize_records(raw: &[RawRecord], categories: &CategorySet) -> ChartResult<Vec<Record>> {
    let mut out = Vec::with_capacity(raw.len());
    for r in raw {
        let start = parse_date(&r.name, "start", &r.start)?;
        let end = parse_date(&r.name, "end", &r.end)?;
        if end < start {
            return Err(ChartError::invalid_span(format!(
                "record '{}': end {} precedes start {}",
                r.name, end, start
            )));
        }
        let category_rank = categories.rank(&r.category).ok_or_else(|| {
            ChartError::unknown_category(format!(
                "record '{}': category '{}' is not declared",
                r.name, r.category
            ))
        })?;
        // End date is inclusive, so a single-day record has duration 1.
        let duration_days = (end - start).num_days() + 1;
        out.push(Record {
            name: r.name.clone(),
            start,
            end,
            category_rank,
            milestone: r.milestone,
            duration_days,
        });
    }
    Ok(out)
}
