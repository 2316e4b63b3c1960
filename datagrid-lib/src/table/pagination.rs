//! Pagination bookkeeping.

use super::DataTable;

impl DataTable {
    /// Rows rendered per page: the page size, else the live scroll step,
    /// else every row.
    pub fn rows_to_render(&self) -> usize {
        match self.state.rows {
            0 if self.attrs.live_scroll => self.attrs.scroll_rows,
            0 => self.row_count(),
            rows => rows,
        }
    }

    /// Zero-based index of the current page.
    pub fn page(&self) -> usize {
        if self.row_count() == 0 {
            return 0;
        }
        match self.rows_to_render() {
            0 => 0,
            rows => self.state.first / rows,
        }
    }

    /// Number of pages, at least one.
    pub fn page_count(&self) -> usize {
        match self.rows_to_render() {
            0 => 1,
            rows => self.row_count().div_ceil(rows).max(1),
        }
    }

    /// Moves `first` to the start of the last page when it points past the
    /// end of the data.
    pub fn calculate_first(&mut self) {
        let rows = self.state.rows;
        if rows == 0 {
            return;
        }
        let row_count = self.row_count();
        if row_count > 0 && self.state.first >= row_count {
            let pages = row_count.div_ceil(rows);
            self.state.first = pages.saturating_sub(1) * rows;
        }
    }

    /// Offset one past the last row of the current page.
    pub fn last(&self) -> usize {
        let end = self.state.first + self.rows_to_render();
        if self.is_lazy() {
            end
        } else {
            end.min(self.row_count())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::Record;
    use crate::table::DataSource;
    use crate::table::DataTable;
    use crate::table::TableAttributes;

    fn table(rows: usize, count: usize) -> DataTable {
        let attrs = TableAttributes {
            paginator: true,
            rows,
            ..TableAttributes::default()
        };
        let data = (0..count).map(|i| Record::new().set("id", i)).collect();
        DataTable::new("t", attrs).with_data(DataSource::List(data))
    }

    #[test]
    fn test_calculate_first_clamps_to_last_page() {
        let mut table = table(10, 25);
        table.state.first = 40;
        table.calculate_first();
        assert_eq!(table.state.first, 20);
        assert_eq!(table.page(), 2);
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.last(), 25);
    }

    #[test]
    fn test_calculate_first_keeps_valid_offset() {
        let mut table = table(10, 25);
        table.state.first = 10;
        table.calculate_first();
        assert_eq!(table.state.first, 10);
    }

    #[test]
    fn test_rows_to_render_without_page_size() {
        let table = table(0, 7);
        assert_eq!(table.rows_to_render(), 7);
        assert_eq!(table.page(), 0);
        assert_eq!(table.page_count(), 1);
    }
}
