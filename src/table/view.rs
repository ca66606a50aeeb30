//! Table View Computation
//!
//! The pure filter -> sort -> paginate pipeline. Every query change re-runs
//! `compute_view` over the full record set; identical inputs always produce
//! identical output and the input records are never mutated.

use crate::domain::record::Record;
use crate::table::column::Column;
use crate::table::query::{QueryState, SortDirection};

/// The derived, read-only view of a record set under a query
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    /// Records on the effective page, in display order
    pub rows: Vec<&'a Record>,
    /// Count of records passing both filter stages (pre-pagination)
    pub total_count: usize,
    /// Total page count (at least 1, even with no matches)
    pub total_pages: usize,
    /// Effective 1-based page after clamping
    pub page: usize,
}

/// Compute the visible page plus pagination metadata for `rows` under `query`.
pub fn compute_view<'a>(
    rows: &'a [Record],
    columns: &[Column],
    query: &QueryState,
) -> TableView<'a> {
    let matched = visible_rows(rows, columns, query);
    let view = paginate(matched, query);
    tracing::debug!(
        "Table view: {} of {} records match, page {}/{}",
        view.total_count,
        rows.len(),
        view.page,
        view.total_pages
    );
    view
}

/// Records passing both filter stages, sorted, pre-pagination.
///
/// This is the row set the CSV export consumes.
pub fn visible_rows<'a>(
    rows: &'a [Record],
    columns: &[Column],
    query: &QueryState,
) -> Vec<&'a Record> {
    sort_rows(filter_rows(rows, query), columns, query)
}

/// Dimension filters, then the free-text search (an intersection).
fn filter_rows<'a>(rows: &'a [Record], query: &QueryState) -> Vec<&'a Record> {
    let mut kept: Vec<&Record> = rows
        .iter()
        .filter(|record| passes_filters(record, query))
        .collect();

    if !query.search.is_empty() {
        let needle = query.search.to_lowercase();
        kept.retain(|record| {
            record
                .fields
                .values()
                .any(|value| value.canonical().to_lowercase().contains(&needle))
        });
    }

    kept
}

/// Logical AND across filter dimensions. A dimension with an empty accepted
/// set imposes no constraint; a record missing the field fails a constrained
/// dimension.
fn passes_filters(record: &Record, query: &QueryState) -> bool {
    query.filters.iter().all(|(dimension, accepted)| {
        if accepted.is_empty() {
            return true;
        }
        match record.field(dimension) {
            Some(value) => accepted.contains(&value.canonical()),
            None => false,
        }
    })
}

/// Stable sort by the active sort column. Unknown or non-sortable keys fail
/// soft: filter-stage order is kept. Descending reverses the comparator, not
/// the slice, so ties keep their filter-stage order either way.
fn sort_rows<'a>(
    mut rows: Vec<&'a Record>,
    columns: &[Column],
    query: &QueryState,
) -> Vec<&'a Record> {
    let Some(sort) = &query.sort else {
        return rows;
    };
    let Some(column) = columns.iter().find(|c| c.key == sort.key && c.sortable) else {
        return rows;
    };

    rows.sort_by(|a, b| {
        let ordering = column.compare(&column.value_of(a), &column.value_of(b));
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    rows
}

/// Slice out the effective page. The requested page is clamped to
/// `[1, total_pages]`; an empty match set still reports one page.
fn paginate<'a>(matched: Vec<&'a Record>, query: &QueryState) -> TableView<'a> {
    let page_size = query.page_size.max(1);
    let total_count = matched.len();
    let total_pages = ((total_count + page_size - 1) / page_size).max(1);
    let page = query.page.clamp(1, total_pages as i64) as usize;

    let start = (page - 1) * page_size;
    let rows = matched.into_iter().skip(start).take(page_size).collect();

    TableView {
        rows,
        total_count,
        total_pages,
        page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RecordId;
    use crate::table::query::{FilterSelection, SortSpec};

    fn member(id: i64, name: &str, status: &str, visits: i64) -> Record {
        Record::new(id)
            .with_field("name", name)
            .with_field("status", status)
            .with_field("visits", visits)
    }

    fn members() -> Vec<Record> {
        vec![
            member(1, "Sarah Johnson", "active", 24),
            member(2, "Mike Chen", "active", 3),
            member(3, "Emma Wilson", "frozen", 17),
            member(4, "James Lee", "cancelled", 8),
            member(5, "Ana Souza", "active", 17),
            member(6, "Tom Becker", "frozen", 1),
            member(7, "Lena Fischer", "active", 31),
        ]
    }

    fn member_columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("status", "Status"),
            Column::new("visits", "Visits").sortable(),
        ]
    }

    fn ids(view: &TableView<'_>) -> Vec<RecordId> {
        view.rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query.search = "a".to_string();
        query.sort = Some(SortSpec::ascending("visits"));
        query.page_size = 3;
        query.page = 2;

        let first = compute_view(&rows, &columns, &query);
        let second = compute_view(&rows, &columns, &query);
        assert_eq!(first, second);
    }

    #[test]
    fn test_page_rows_are_a_subset_of_input() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query.search = "e".to_string();
        query.page_size = 2;

        let view = compute_view(&rows, &columns, &query);
        for row in &view.rows {
            assert!(rows.iter().any(|r| r.id == row.id));
        }
    }

    #[test]
    fn test_page_bound_holds() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query.page_size = 3;

        for page in 1..=3 {
            query.page = page;
            let view = compute_view(&rows, &columns, &query);
            assert!(view.rows.len() <= query.page_size);
        }
    }

    #[test]
    fn test_total_count_is_independent_of_pagination() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query
            .filters
            .insert("status".to_string(), ["active".to_string()].into_iter().collect());

        query.page_size = 2;
        query.page = 1;
        let a = compute_view(&rows, &columns, &query);
        query.page_size = 100;
        query.page = 9;
        let b = compute_view(&rows, &columns, &query);

        assert_eq!(a.total_count, 4);
        assert_eq!(b.total_count, 4);
    }

    #[test]
    fn test_page_beyond_range_clamps_to_last_page() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query.page_size = 3; // 7 records -> 3 pages

        query.page = 9999;
        let clamped = compute_view(&rows, &columns, &query);
        query.page = 3;
        let last = compute_view(&rows, &columns, &query);

        assert_eq!(clamped.page, 3);
        assert_eq!(ids(&clamped), ids(&last));
    }

    #[test]
    fn test_page_below_one_clamps_to_first_page() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query.page_size = 3;

        for requested in [0, -5] {
            query.page = requested;
            let view = compute_view(&rows, &columns, &query);
            assert_eq!(view.page, 1);
            assert_eq!(ids(&view), vec![RecordId::from(1i64), 2i64.into(), 3i64.into()]);
        }
    }

    #[test]
    fn test_stable_sort_preserves_tie_order() {
        let rows = vec![
            member(1, "a", "active", 5),
            member(2, "b", "active", 5),
            member(3, "c", "active", 3),
        ];
        let columns = member_columns();
        let mut query = QueryState::new();
        query.sort = Some(SortSpec::ascending("visits"));

        let view = compute_view(&rows, &columns, &query);
        assert_eq!(ids(&view), vec![RecordId::from(3i64), 1i64.into(), 2i64.into()]);
    }

    #[test]
    fn test_descending_sort_reverses_order_and_keeps_ties_stable() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query.sort = Some(SortSpec::descending("visits"));

        let view = compute_view(&rows, &columns, &query);
        // 31, 24, 17, 17, 8, 3, 1 -- the two 17s keep original relative order.
        assert_eq!(
            ids(&view),
            vec![
                RecordId::from(7i64),
                1i64.into(),
                3i64.into(),
                5i64.into(),
                4i64.into(),
                2i64.into(),
                6i64.into(),
            ]
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query.search = "sarah".to_string();

        let view = compute_view(&rows, &columns, &query);
        assert_eq!(ids(&view), vec![RecordId::from(1i64)]);
    }

    #[test]
    fn test_filters_and_search_intersect() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query
            .filters
            .insert("status".to_string(), ["active".to_string()].into_iter().collect());
        // "wilson" only matches a frozen member; "chen" matches an active one.
        query.search = "wilson".to_string();
        assert_eq!(compute_view(&rows, &columns, &query).total_count, 0);

        query.search = "chen".to_string();
        let view = compute_view(&rows, &columns, &query);
        assert_eq!(ids(&view), vec![RecordId::from(2i64)]);
    }

    #[test]
    fn test_empty_accepted_set_imposes_no_constraint() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query
            .filters
            .insert("status".to_string(), FilterSelection::new());

        let view = compute_view(&rows, &columns, &query);
        assert_eq!(view.total_count, rows.len());
    }

    #[test]
    fn test_record_missing_field_fails_constrained_dimension() {
        let rows = vec![
            member(1, "Sarah Johnson", "active", 24),
            Record::new(2i64).with_field("name", "No Status"),
        ];
        let columns = member_columns();
        let mut query = QueryState::new();
        query
            .filters
            .insert("status".to_string(), ["active".to_string()].into_iter().collect());

        let view = compute_view(&rows, &columns, &query);
        assert_eq!(ids(&view), vec![RecordId::from(1i64)]);
    }

    #[test]
    fn test_empty_record_set() {
        let rows: Vec<Record> = Vec::new();
        let columns = member_columns();
        let query = QueryState::new();

        let view = compute_view(&rows, &columns, &query);
        assert_eq!(view.total_count, 0);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_second_page_holds_the_remainder() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query.page_size = 5;
        query.page = 2;

        let view = compute_view(&rows, &columns, &query);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.total_pages, 2);
        assert_eq!(ids(&view), vec![RecordId::from(6i64), 7i64.into()]);
    }

    #[test]
    fn test_unknown_sort_key_is_ignored() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query.sort = Some(SortSpec::ascending("no_such_column"));

        let view = compute_view(&rows, &columns, &query);
        assert_eq!(ids(&view)[0], RecordId::from(1i64));
    }

    #[test]
    fn test_unsortable_column_is_ignored() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        // "status" exists but is not marked sortable.
        query.sort = Some(SortSpec::ascending("status"));

        let view = compute_view(&rows, &columns, &query);
        assert_eq!(ids(&view)[0], RecordId::from(1i64));
    }

    #[test]
    fn test_zero_page_size_is_normalized_to_one() {
        let rows = members();
        let columns = member_columns();
        let mut query = QueryState::new();
        query.page_size = 0;

        let view = compute_view(&rows, &columns, &query);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.total_pages, rows.len());
    }
}
