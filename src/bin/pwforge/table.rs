use std::fmt::{self, Display};
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

/// A plain-text table with a header row and a divider.
pub(crate) struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Table {
        Table {
            headers,
            rows: Vec::new(),
        }
    }

    /// Rows shorter than the header are padded with empty cells; extra cells are dropped.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn write_to(&self, mut output: impl Write) -> io::Result<()> {
        let mut column_widths = self.headers.iter().map(|h| h.width()).collect::<Vec<_>>();
        for row in &self.rows {
            for (width, cell) in column_widths.iter_mut().zip(row) {
                *width = std::cmp::max(cell.width(), *width);
            }
        }

        output_row(&mut output, &column_widths, |column_index| {
            Padded(self.headers[column_index], column_widths[column_index])
        })?;
        output_row(&mut output, &column_widths, |column_index| {
            Divider(column_widths[column_index])
        })?;
        for row in &self.rows {
            output_row(&mut output, &column_widths, |column_index| {
                Padded(&row[column_index], column_widths[column_index])
            })?;
        }
        Ok(())
    }
}

fn output_row<F, D>(
    mut output: impl Write,
    column_widths: &[usize],
    get_column_display: F,
) -> io::Result<()>
where
    D: Display,
    F: Fn(usize) -> D,
{
    for column_index in 0..column_widths.len() {
        if column_index > 0 {
            write!(&mut output, "  ")?;
        }
        write!(&mut output, "{}", get_column_display(column_index))?;
    }
    writeln!(&mut output)?;
    Ok(())
}

struct Divider(usize);

impl Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            write!(f, "─")?;
        }
        Ok(())
    }
}

struct Padded<'a>(&'a str, usize);

impl Display for Padded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padding = self.1.saturating_sub(self.0.width());
        write!(f, "{}", self.0)?;
        for _ in 0..padding {
            write!(f, " ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_line_up() {
        let mut table = Table::new(vec!["Password", "Strength"]);
        table.push_row(vec!["correct-horse-battery".to_owned(), "Medium".to_owned()]);
        table.push_row(vec!["x".to_owned()]);
        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Password               Strength");
        assert_eq!(lines[2], "correct-horse-battery  Medium  ");
        assert_eq!(lines[3], "x                              ");
    }
}
