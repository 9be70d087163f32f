use crate::types::ROWS_PER_PAGE;

/// Number of pages needed to show `len` rows; never less than one.
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(ROWS_PER_PAGE).max(1)
}

/// Returns the 1-based `page` slice of `rows`.
///
/// Page zero clamps to the first page; pages past the end yield an empty
/// slice rather than an error.
pub fn paginate<T>(rows: &[T], page: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(ROWS_PER_PAGE);

    if start >= rows.len() {
        return &[];
    }

    let end = (start + ROWS_PER_PAGE).min(rows.len());
    &rows[start..end]
}
