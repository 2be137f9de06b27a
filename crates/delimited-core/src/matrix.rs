//! Row-major two-dimensional storage with row/column insert, remove, and swap.
//!
//! Every row has exactly `column_count` elements and the matrix always holds
//! at least one row and one column. Mutations that would break either rule
//! return an error and leave the matrix unchanged.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{DelimitedError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: Vec<Vec<T>>,
    column_count: usize,
}

impl<T: Clone> Matrix<T> {
    /// A `row_count` × `column_count` matrix filled with `value`.
    /// Zero dimensions are raised to one.
    pub fn new(row_count: usize, column_count: usize, value: T) -> Self {
        let column_count = column_count.max(1);
        let row_count = row_count.max(1);
        Self {
            rows: vec![vec![value; column_count]; row_count],
            column_count,
        }
    }

    /// Copy column `index` out of the matrix.
    pub fn column(&self, index: usize) -> Result<Vec<T>> {
        self.check_column(index)?;
        Ok(self.rows.iter().map(|row| row[index].clone()).collect())
    }
}

impl<T> Matrix<T> {
    /// Build from rows, rejecting empty input and ragged rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let column_count = rows.first().map(Vec::len).ok_or(DelimitedError::WouldBeEmpty)?;
        if column_count == 0 {
            return Err(DelimitedError::WouldBeEmpty);
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != column_count) {
            return Err(DelimitedError::Shape {
                expected: column_count,
                found: bad.len(),
            });
        }
        Ok(Self { rows, column_count })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.rows.get(row)?.get(column)
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        self.rows.get_mut(row)?.get_mut(column)
    }

    pub fn set(&mut self, row: usize, column: usize, value: T) -> Result<()> {
        self.check_row(row)?;
        self.check_column(column)?;
        self.rows[row][column] = value;
        Ok(())
    }

    pub fn row(&self, index: usize) -> Option<&[T]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn first_row(&self) -> &[T] {
        &self.rows[0]
    }

    pub fn last_row(&self) -> &[T] {
        &self.rows[self.rows.len() - 1]
    }

    pub fn set_row(&mut self, index: usize, row: Vec<T>) -> Result<()> {
        self.check_row(index)?;
        self.check_width(&row)?;
        self.rows[index] = row;
        Ok(())
    }

    pub fn insert_row(&mut self, index: usize, row: Vec<T>) -> Result<()> {
        if index > self.rows.len() {
            return Err(DelimitedError::IndexOutOfBounds {
                index,
                len: self.rows.len(),
            });
        }
        self.check_width(&row)?;
        self.rows.insert(index, row);
        Ok(())
    }

    pub fn append_row(&mut self, row: Vec<T>) -> Result<()> {
        self.check_width(&row)?;
        self.rows.push(row);
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> Result<Vec<T>> {
        self.check_row(index)?;
        if self.rows.len() == 1 {
            return Err(DelimitedError::WouldBeEmpty);
        }
        Ok(self.rows.remove(index))
    }

    pub fn swap_rows(&mut self, first: usize, second: usize) -> Result<()> {
        self.check_row(first)?;
        self.check_row(second)?;
        self.rows.swap(first, second);
        Ok(())
    }

    pub fn set_column(&mut self, index: usize, column: Vec<T>) -> Result<()> {
        self.check_column(index)?;
        self.check_height(&column)?;
        for (row, value) in self.rows.iter_mut().zip(column) {
            row[index] = value;
        }
        Ok(())
    }

    pub fn insert_column(&mut self, index: usize, column: Vec<T>) -> Result<()> {
        if index > self.column_count {
            return Err(DelimitedError::IndexOutOfBounds {
                index,
                len: self.column_count,
            });
        }
        self.check_height(&column)?;
        for (row, value) in self.rows.iter_mut().zip(column) {
            row.insert(index, value);
        }
        self.column_count += 1;
        Ok(())
    }

    pub fn append_column(&mut self, column: Vec<T>) -> Result<()> {
        self.insert_column(self.column_count, column)
    }

    pub fn remove_column(&mut self, index: usize) -> Result<Vec<T>> {
        self.check_column(index)?;
        if self.column_count == 1 {
            return Err(DelimitedError::WouldBeEmpty);
        }
        self.column_count -= 1;
        Ok(self.rows.iter_mut().map(|row| row.remove(index)).collect())
    }

    pub fn swap_columns(&mut self, first: usize, second: usize) -> Result<()> {
        self.check_column(first)?;
        self.check_column(second)?;
        for row in &mut self.rows {
            row.swap(first, second);
        }
        Ok(())
    }

    fn check_row(&self, index: usize) -> Result<()> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(DelimitedError::IndexOutOfBounds {
                index,
                len: self.rows.len(),
            })
        }
    }

    fn check_column(&self, index: usize) -> Result<()> {
        if index < self.column_count {
            Ok(())
        } else {
            Err(DelimitedError::IndexOutOfBounds {
                index,
                len: self.column_count,
            })
        }
    }

    fn check_width(&self, row: &[T]) -> Result<()> {
        if row.len() == self.column_count {
            Ok(())
        } else {
            Err(DelimitedError::Shape {
                expected: self.column_count,
                found: row.len(),
            })
        }
    }

    fn check_height(&self, column: &[T]) -> Result<()> {
        if column.len() == self.rows.len() {
            Ok(())
        } else {
            Err(DelimitedError::Shape {
                expected: self.rows.len(),
                found: column.len(),
            })
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &T {
        &self.rows[row][column]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        &mut self.rows[row][column]
    }
}

/// `[[a, b], [c, d]]`, one bracketed list per row.
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", value)?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}
