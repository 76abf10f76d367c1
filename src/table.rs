use crate::percentage::{Fixed, Pct, PLACEHOLDER};
use derive_more::{Display, From};

macro_rules! row {
    ($($value:expr),* $(,)?) => {
        [
            $(
                $crate::table::Value::from($value)
            ),*
        ]
    };
}

pub(crate) use row;

#[derive(Debug)]
pub struct Table<const N: usize> {
    pub header: [String; N],
    pub col_class: [&'static str; N],
    pub rows: Vec<Row<N>>,
}

impl<const N: usize> Table<N>
where
    [Value; N]: Default,
    [String; N]: Default,
{
    pub fn new(header: [impl ToString; N], col_class: &'static str) -> Table<N> {
        Table {
            header: header.map(|h| h.to_string()),
            col_class: [col_class; N],
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, data: [Value; N]) {
        self.rows.push(Row {
            data,
            ..Default::default()
        });
    }

    pub fn insert<const M: usize, const Z: usize>(self, index: usize, other: Table<M>) -> Table<Z>
    where
        [Value; Z]: Default,
        [String; Z]: Default,
        [&'static str; Z]: Default,
    {
        Table {
            header: array_insert(self.header, other.header, index),
            col_class: array_insert(self.col_class, other.col_class, index),
            rows: self
                .rows
                .into_iter()
                .zip(other.rows)
                .map(|(a, b)| a.insert(index, b))
                .collect(),
        }
    }
}

impl<const N: usize> Table<N> {
    pub fn set_href(&mut self, index: usize, href: impl ToString) {
        if let Some(row) = self.rows.last_mut() {
            row.href[index] = href.to_string();
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &'static str)> + '_ {
        self.header.iter().map(String::as_str).zip(self.col_class)
    }

    pub fn cells<'a>(
        &'a self,
        row: &'a Row<N>,
    ) -> impl Iterator<Item = (&'a Value, &'a str, &'static str)> + 'a {
        row.data
            .iter()
            .zip(&row.href)
            .zip(self.col_class)
            .map(|((value, href), class)| (value, href.as_str(), class))
    }
}

#[derive(Debug)]
pub struct Row<const N: usize> {
    pub data: [Value; N],
    pub href: [String; N],
}

impl<const N: usize> Row<N>
where
    [Value; N]: Default,
    [String; N]: Default,
{
    fn insert<const M: usize, const Z: usize>(self, index: usize, other: Row<M>) -> Row<Z>
    where
        [Value; Z]: Default,
        [String; Z]: Default,
    {
        Row {
            data: array_insert(self.data, other.data, index),
            href: array_insert(self.href, other.href, index),
        }
    }
}

impl<const N: usize> Default for Row<N>
where
    [Value; N]: Default,
    [String; N]: Default,
{
    fn default() -> Row<N> {
        Row {
            data: Default::default(),
            href: Default::default(),
        }
    }
}

#[derive(Debug, From, Display)]
pub enum Value {
    Pct3(Pct<3>),
    Fix2(Fixed<2>),
    Fix3(Fixed<3>),
    Str(String),
    U32(u32),
    Usize(usize),
}

impl Default for Value {
    fn default() -> Value {
        Value::Str(String::default())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<u16> for Value {
    fn from(x: u16) -> Value {
        Value::U32(x.into())
    }
}

// counting cells render the dash when the underlying stat never happened
impl From<Option<u32>> for Value {
    fn from(x: Option<u32>) -> Value {
        match x {
            Some(x) => Value::U32(x),
            None => Value::Str(PLACEHOLDER.to_string()),
        }
    }
}

/// Creates a new array with the elements of `a`, with the elements of `b` inserted at `index` of
/// `a`.
fn array_insert<T, const N: usize, const M: usize, const Z: usize>(
    a: [T; N],
    b: [T; M],
    index: usize,
) -> [T; Z]
where
    [T; Z]: Default,
{
    assert_eq!(N + M, Z);
    assert!(index <= a.len());

    let mut new: [T; Z] = Default::default();
    let mut a = a.into_iter();
    let mut i = 0;

    while i < index {
        new[i] = a.next().unwrap();
        i += 1;
    }
    for x in b {
        new[i] = x;
        i += 1;
    }
    for x in a {
        new[i] = x;
        i += 1;
    }

    new
}

#[cfg(test)]
#[test]
fn test_array_insert() {
    assert_eq!(array_insert([1, 2, 3], [], 2), [1, 2, 3]);

    assert_eq!(array_insert([1, 2, 3], [4], 0), [4, 1, 2, 3]);
    assert_eq!(array_insert([1, 2, 3], [4], 1), [1, 4, 2, 3]);
    assert_eq!(array_insert([1, 2, 3], [4], 2), [1, 2, 4, 3]);
    assert_eq!(array_insert([1, 2, 3], [4], 3), [1, 2, 3, 4]);

    assert_eq!(array_insert([1, 2], [3, 4, 5], 1), [1, 3, 4, 5, 2]);
}

#[cfg(test)]
#[test]
#[should_panic]
fn test_array_insert_panic() {
    assert_eq!(array_insert([1, 2, 3], [4], 2), [1, 2, 4, 3, 5]);
}

#[cfg(test)]
#[test]
fn test_value_display() {
    let cells = row!["山田", 3_u32, Some(7_u32), None::<u32>, Pct(Some(0.25))];
    let rendered: Vec<String> = cells.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["山田", "3", "7", "—", ".250"]);
}
