use crate::model::{PhaseSpan, PositionedRecord, Record};

/// Positioned records plus the background phase spans derived from them.
#[derive(Clone, Debug, Default)]
pub struct ChartLayout {
    /// Records in final draw order; `rows[i].slot == i`.
    pub rows: Vec<PositionedRecord>,
    /// One span per contiguous category run, tiling `[-0.5, N - 0.5]`.
    pub spans: Vec<PhaseSpan>,
}

impl ChartLayout {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Sort records into the global chart order and assign vertical slots.
///
/// Primary key is the declared category rank, secondary key the start date;
/// the sort is stable so records tied on both keys keep their input order.
/// Slot 0 is the top row. An empty input produces an empty layout, which the
/// caller reports as a nothing-to-render condition rather than an error.
pub fn lay_out(mut records: Vec<Record>) -> ChartLayout {
    records.sort_by_key(|r| (r.category_rank, r.start));

    let rows: Vec<PositionedRecord> = records
        .into_iter()
        .enumerate()
        .map(|(slot, record)| PositionedRecord { record, slot })
        .collect();

    let mut spans: Vec<PhaseSpan> = Vec::new();
    for row in &rows {
        match spans.last_mut() {
            Some(span) if span.category_rank == row.record.category_rank => {
                span.bottom = row.slot as f64 + 0.5;
            }
            _ => spans.push(PhaseSpan {
                category_rank: row.record.category_rank,
                top: row.slot as f64 - 0.5,
                bottom: row.slot as f64 + 0.5,
            }),
        }
    }

    ChartLayout { rows, spans }
}
