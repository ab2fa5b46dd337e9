use std::cmp::Ordering;

use crate::entry::FsEntry;

/// Natural ordering for sibling names.
///
/// Names are split into runs of ASCII digits and runs of other characters.
/// Digit runs compare by numeric value (`file2` < `file10`), text runs
/// compare case-insensitively, and a plain comparison breaks remaining ties
/// so that distinct names never compare equal.
pub fn compare_titles(left: &str, right: &str) -> Ordering {
    let mut left_runs = Runs { rest: left };
    let mut right_runs = Runs { rest: right };

    loop {
        let order = match (left_runs.next(), right_runs.next()) {
            (Some(Run::Digits(l)), Some(Run::Digits(r))) => {
                compare_digit_runs(l, r)
            },
            (Some(Run::Text(l)), Some(Run::Text(r))) => compare_text_runs(l, r),
            (Some(Run::Digits(_)), Some(Run::Text(_))) => Ordering::Less,
            (Some(Run::Text(_)), Some(Run::Digits(_))) => Ordering::Greater,
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => return left.cmp(right),
        };
        if order != Ordering::Equal {
            return order;
        }
    }
}

/// Order directory entries for enumeration.
pub(crate) fn compare_entries(
    left: &FsEntry,
    right: &FsEntry,
    folders_first: bool,
) -> Ordering {
    let kind = if folders_first {
        right.is_folder().cmp(&left.is_folder())
    } else {
        Ordering::Equal
    };
    kind.then_with(|| compare_titles(left.name(), right.name()))
        .then_with(|| left.path().cmp(right.path()))
}

#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Text(&'a str),
    Digits(&'a str),
}

struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|ch: char| ch.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());

        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Run::Digits(run)
        } else {
            Run::Text(run)
        })
    }
}

fn compare_text_runs(left: &str, right: &str) -> Ordering {
    let left_folded = left.chars().flat_map(char::to_lowercase);
    let right_folded = right.chars().flat_map(char::to_lowercase);
    left_folded.cmp(right_folded).then_with(|| left.cmp(right))
}

fn compare_digit_runs(left: &str, right: &str) -> Ordering {
    let left_value = left.trim_start_matches('0');
    let right_value = right.trim_start_matches('0');

    // Equal lengths without leading zeros compare like numbers; more leading
    // zeros sort later.
    left_value
        .len()
        .cmp(&right_value.len())
        .then_with(|| left_value.cmp(right_value))
        .then_with(|| left.len().cmp(&right.len()))
}
