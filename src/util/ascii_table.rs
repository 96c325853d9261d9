/// An ascii table
#[derive(Debug)]
pub struct AsciiTable<'a> {
    data: Vec<Vec<&'a str>>,

    max_cell_widths: Vec<usize>,
}

impl<'a> AsciiTable<'a> {
    /// Make a new table
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![vec![""; width]; height],
            max_cell_widths: vec![0; width],
        }
    }

    /// Set the value of the given cell.
    ///
    /// Indexing starts at 0. It starts at the top left corner and ends at the bottom right.
    pub fn set_cell(&mut self, x: usize, y: usize, data: &'a str) {
        self.data[y][x] = data;
        self.max_cell_widths[x] = std::cmp::max(self.max_cell_widths[x], cell_width(data));
    }

    /// Append a row.
    ///
    /// Extra cells are dropped, missing ones are left empty.
    pub fn push_row(&mut self, row: &[&'a str]) {
        let y = self.data.len();
        self.data.push(vec![""; self.max_cell_widths.len()]);
        for (x, cell) in row.iter().take(self.max_cell_widths.len()).enumerate() {
            self.set_cell(x, y, cell);
        }
    }

    fn fmt_row_border(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+")?;
        for max_cell_width in self.max_cell_widths.iter() {
            // One space of padding on each side
            for _ in 0..(*max_cell_width + 2) {
                write!(f, "-")?;
            }
            write!(f, "+")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

/// Card names are not always ascii
fn cell_width(data: &str) -> usize {
    data.chars().count()
}

impl std::fmt::Display for AsciiTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_row_border(f)?;
        for row in self.data.iter() {
            for (cell, max_cell_width) in row.iter().zip(self.max_cell_widths.iter()) {
                let padding = max_cell_width.saturating_sub(cell_width(cell));

                write!(f, "| {cell}")?;
                for _ in 0..padding {
                    write!(f, " ")?;
                }
                write!(f, " ")?;
            }
            writeln!(f, "|")?;
        }
        self.fmt_row_border(f)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn left_aligned_rows() {
        let mut table = AsciiTable::new(2, 1);
        table.set_cell(0, 0, "format");
        table.set_cell(1, 0, "legality");
        table.push_row(&["modern", "legal"]);
        table.push_row(&["standard", "not_legal"]);

        let expected = "\
+----------+-----------+
| format   | legality  |
| modern   | legal     |
| standard | not_legal |
+----------+-----------+
";
        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn non_ascii_width() {
        let mut table = AsciiTable::new(1, 0);
        table.push_row(&["Æther"]);
        table.push_row(&["abcde"]);

        let rendered = table.to_string();
        let widths: Vec<_> = rendered.lines().map(|line| line.chars().count()).collect();
        assert!(widths.iter().all(|width| *width == widths[0]));
    }
}
